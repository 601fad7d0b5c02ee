//! A2A protocol types used by the client.
//!
//! Wire format is the A2A JSON-RPC binding: camelCase members, `kind`
//! discriminators on parts and events. Remote agents do not always send
//! `kind` on results, so [`StreamEvent`] and [`SendMessageResult`] fall back
//! to inspecting the payload shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Enums
// ============================================================================

/// The lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been received but not yet started.
    Submitted,
    /// Task is actively being processed.
    Working,
    /// Task requires additional input from the user.
    InputRequired,
    /// Task completed successfully.
    Completed,
    /// Task was canceled.
    Canceled,
    /// Task failed.
    Failed,
    /// Task was rejected by the agent.
    Rejected,
    /// Task requires authentication.
    AuthRequired,
    /// Unknown state.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Returns `true` if no further transitions are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Canceled | TaskState::Failed | TaskState::Rejected
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Submitted => "submitted",
            TaskState::Working => "working",
            TaskState::InputRequired => "input-required",
            TaskState::Completed => "completed",
            TaskState::Canceled => "canceled",
            TaskState::Failed => "failed",
            TaskState::Rejected => "rejected",
            TaskState::AuthRequired => "auth-required",
            TaskState::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from the user / client.
    User,
    /// Message from the agent / server.
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

// ============================================================================
// Message & Parts
// ============================================================================

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier.
    pub message_id: String,

    /// Who sent this message.
    pub role: Role,

    /// Discriminator field, always "message".
    #[serde(default = "kind_message")]
    pub kind: String,

    /// Content parts of the message.
    pub parts: Vec<Part>,

    /// Context this message belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Task this message is associated with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Arbitrary metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// A content part within a message or artifact.
///
/// JSON wire format:
/// - Text: `{"kind": "text", "text": "hello"}`
/// - File: `{"kind": "file", "file": {...}}`
/// - Data: `{"kind": "data", "data": {...}}`
///
/// File and data payloads are carried as raw JSON; the client never looks
/// inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Part {
    /// A text content part.
    #[serde(rename = "text")]
    Text {
        /// The text content.
        text: String,
        /// Optional metadata associated with this part.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
    /// A file content part (inline bytes or URI).
    #[serde(rename = "file")]
    File {
        /// The file descriptor.
        file: Value,
        /// Optional metadata associated with this part.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
    /// A structured data content part.
    #[serde(rename = "data")]
    Data {
        /// Arbitrary structured data.
        data: Value,
        /// Optional metadata associated with this part.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            metadata: None,
        }
    }

    /// The text content, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// Current status of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    /// The current state.
    pub state: TaskState,

    /// Optional message associated with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// ISO-8601 timestamp of when this status was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A task, the server-owned unit of long-running work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,

    /// Context identifier (groups related tasks/messages).
    #[serde(default)]
    pub context_id: String,

    /// Discriminator field, always "task".
    #[serde(default = "kind_task")]
    pub kind: String,

    /// Current task status.
    pub status: TaskStatus,

    /// Artifacts produced by the task, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,

    /// Message history for this task.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Message>,

    /// Arbitrary metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// An artifact produced by a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique artifact identifier.
    #[serde(default)]
    pub artifact_id: String,

    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description of the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Content parts of the artifact.
    pub parts: Vec<Part>,

    /// Arbitrary metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

// ============================================================================
// Streaming Events
// ============================================================================

/// Notification that a task's status has changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusUpdateEvent {
    /// ID of the task whose status changed.
    pub task_id: String,

    /// Context this task belongs to.
    #[serde(default)]
    pub context_id: String,

    /// Discriminator field, always "status-update".
    #[serde(default = "kind_status_update")]
    pub kind: String,

    /// The new status.
    pub status: TaskStatus,

    /// Whether this is the last status update the server will send.
    #[serde(rename = "final", default)]
    pub r#final: bool,

    /// Arbitrary metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Notification that an artifact has been created or updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskArtifactUpdateEvent {
    /// ID of the task that produced the artifact.
    pub task_id: String,

    /// Context this task belongs to.
    #[serde(default)]
    pub context_id: String,

    /// Discriminator field, always "artifact-update".
    #[serde(default = "kind_artifact_update")]
    pub kind: String,

    /// The artifact.
    pub artifact: Artifact,

    /// Whether to append to an existing artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,

    /// Whether this is the last chunk of the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_chunk: Option<bool>,

    /// Arbitrary metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

fn kind_task() -> String {
    "task".to_string()
}

fn kind_message() -> String {
    "message".to_string()
}

fn kind_status_update() -> String {
    "status-update".to_string()
}

fn kind_artifact_update() -> String {
    "artifact-update".to_string()
}

/// One event of a streaming response.
///
/// Serializes flat (no wrapper keys). Deserialization uses the `kind` member
/// when present and otherwise classifies by shape:
///
/// | shape | variant |
/// |---|---|
/// | has `artifact` | `ArtifactUpdate` |
/// | has `status` and `taskId` | `StatusUpdate` |
/// | has `status` and `id` | `Task` |
/// | has `messageId`, or `role` and `parts` | `Message` |
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A direct message.
    Message(Message),

    /// A complete task snapshot.
    Task(Task),

    /// A task status update event.
    StatusUpdate(TaskStatusUpdateEvent),

    /// An artifact update event.
    ArtifactUpdate(TaskArtifactUpdateEvent),
}

impl StreamEvent {
    /// Whether the server has signalled that no further events follow.
    pub fn is_final(&self) -> bool {
        matches!(self, StreamEvent::StatusUpdate(update) if update.r#final)
    }

    /// The task this event refers to, if any.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            StreamEvent::Message(msg) => msg.task_id.as_deref(),
            StreamEvent::Task(task) => Some(&task.id),
            StreamEvent::StatusUpdate(update) => Some(&update.task_id),
            StreamEvent::ArtifactUpdate(update) => Some(&update.task_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Message,
    Task,
    StatusUpdate,
    ArtifactUpdate,
}

fn classify(value: &Value) -> Option<Shape> {
    let obj = value.as_object()?;

    if let Some(kind) = obj.get("kind").and_then(Value::as_str) {
        return match kind {
            "message" => Some(Shape::Message),
            "task" => Some(Shape::Task),
            "status-update" => Some(Shape::StatusUpdate),
            "artifact-update" => Some(Shape::ArtifactUpdate),
            _ => None,
        };
    }

    if obj.contains_key("artifact") {
        Some(Shape::ArtifactUpdate)
    } else if obj.contains_key("status") && obj.contains_key("taskId") {
        Some(Shape::StatusUpdate)
    } else if obj.contains_key("status") && obj.contains_key("id") {
        Some(Shape::Task)
    } else if obj.contains_key("messageId")
        || (obj.contains_key("role") && obj.contains_key("parts"))
    {
        Some(Shape::Message)
    } else {
        None
    }
}

impl Serialize for StreamEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StreamEvent::Message(inner) => inner.serialize(serializer),
            StreamEvent::Task(inner) => inner.serialize(serializer),
            StreamEvent::StatusUpdate(inner) => inner.serialize(serializer),
            StreamEvent::ArtifactUpdate(inner) => inner.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StreamEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        let shape = classify(&value).ok_or_else(|| {
            D::Error::custom(
                "unrecognized stream event: expected a message, task, status update or artifact update",
            )
        })?;

        match shape {
            Shape::Message => serde_json::from_value(value)
                .map(StreamEvent::Message)
                .map_err(D::Error::custom),
            Shape::Task => serde_json::from_value(value)
                .map(StreamEvent::Task)
                .map_err(D::Error::custom),
            Shape::StatusUpdate => serde_json::from_value(value)
                .map(StreamEvent::StatusUpdate)
                .map_err(D::Error::custom),
            Shape::ArtifactUpdate => serde_json::from_value(value)
                .map(StreamEvent::ArtifactUpdate)
                .map_err(D::Error::custom),
        }
    }
}

/// Result of `message/send`: the agent either replies directly or hands back
/// a task.
#[derive(Debug, Clone, PartialEq)]
pub enum SendMessageResult {
    /// A direct reply message.
    Message(Message),
    /// A task tracking the work.
    Task(Task),
}

impl Serialize for SendMessageResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SendMessageResult::Message(inner) => inner.serialize(serializer),
            SendMessageResult::Task(inner) => inner.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SendMessageResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        match classify(&value) {
            Some(Shape::Message) => serde_json::from_value(value)
                .map(SendMessageResult::Message)
                .map_err(D::Error::custom),
            Some(Shape::Task) => serde_json::from_value(value)
                .map(SendMessageResult::Task)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(
                "unrecognized message/send result: expected a message or task",
            )),
        }
    }
}

// ============================================================================
// Agent Card
// ============================================================================

/// Self-describing manifest published by an agent.
///
/// Only `url` is required; everything else defaults so that minimal cards
/// still resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Human-readable agent name.
    #[serde(default)]
    pub name: String,

    /// Description of the agent.
    #[serde(default)]
    pub description: String,

    /// JSON-RPC endpoint of the agent.
    pub url: String,

    /// Agent version string.
    #[serde(default)]
    pub version: String,

    /// Optional capability flags.
    #[serde(default)]
    pub capabilities: AgentCapabilities,

    /// Skills the agent advertises.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<AgentSkill>,

    /// Organization publishing the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<AgentProvider>,

    /// Link to human-readable documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    /// Input MIME types accepted by default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_input_modes: Vec<String>,

    /// Output MIME types produced by default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_output_modes: Vec<String>,
}

/// Agent capabilities declaration. The flags are advisory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Supports `message/stream` and `tasks/resubscribe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,

    /// Supports push notification configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,

    /// Keeps a history of task state transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_transition_history: Option<bool>,
}

/// A skill that an agent can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    /// Unique skill identifier.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// What the skill does.
    #[serde(default)]
    pub description: String,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Example prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// Information about the agent's provider/organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProvider {
    /// Organization name.
    pub organization: String,

    /// Organization URL.
    pub url: String,
}

// ============================================================================
// Push Notifications
// ============================================================================

/// Configuration for push notification delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationConfig {
    /// URL to deliver notifications to.
    pub url: String,

    /// Optional verification token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Authentication configuration for the push endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<PushNotificationAuthenticationInfo>,
}

/// Authentication information for push notification delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationAuthenticationInfo {
    /// Supported authentication schemes (e.g. `["Bearer"]`).
    pub schemes: Vec<String>,

    /// Optional credentials required by the push notification endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

/// Push notification config bound to a specific task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPushNotificationConfig {
    /// Task this config applies to.
    pub task_id: String,

    /// The push notification configuration details.
    pub push_notification_config: PushNotificationConfig,
}

// ============================================================================
// JSON-RPC Foundation
// ============================================================================

/// JSON-RPC protocol version carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request/response ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    /// String identifier.
    String(String),
    /// Numeric identifier.
    Number(i64),
}

impl fmt::Display for JsonRpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonRpcId::String(s) => write!(f, "{}", s),
            JsonRpcId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// An outbound JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,

    /// Correlation identifier.
    pub id: JsonRpcId,

    /// Method name.
    pub method: String,

    /// Method parameters.
    pub params: Value,
}

/// A JSON-RPC 2.0 response.
///
/// Exactly one of `result` or `error` is expected. A response with neither
/// means "no result".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,

    /// Request identifier this response corresponds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonRpcId>,

    /// Successful result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// The result, treating an explicit `null` the same as an absent one.
    pub fn into_result(self) -> Option<Value> {
        self.result.filter(|v| !v.is_null())
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,

    /// Human-readable error message.
    pub message: String,

    /// Optional structured error data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// ============================================================================
// Request Parameter Types
// ============================================================================

/// Parameters for `message/send` and `message/stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendParams {
    /// The message to send.
    pub message: Message,
}

/// Parameters for `tasks/get` and `tasks/resubscribe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueryParams {
    /// Task ID.
    pub id: String,

    /// Maximum number of history messages to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u32>,
}

impl TaskQueryParams {
    /// Query a task by ID without a history limit.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            history_length: None,
        }
    }

    /// Limit the number of history messages returned.
    pub fn with_history_length(mut self, length: u32) -> Self {
        self.history_length = Some(length);
        self
    }
}

/// Task ID parameter used by `tasks/cancel` and `tasks/pushNotification/get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskIdParams {
    /// The task ID.
    pub id: String,
}

impl TaskIdParams {
    /// Wrap a task ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
