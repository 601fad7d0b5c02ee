//! High-level A2A client for interacting with remote agents.
//!
//! Every JSON-RPC method of the binding gets a typed method here. Single-shot
//! calls return `Ok(None)` when the response carries no result; streaming
//! calls return an [`EventStream`] the caller pulls from.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::builders::ClientBuilder;
use crate::error::{A2AError, A2AResult};
use crate::types::{
    AgentCard, JsonRpcId, JsonRpcRequest, JsonRpcResponse, Message, MessageSendParams, Role,
    SendMessageResult, Task, TaskIdParams, TaskPushNotificationConfig, TaskQueryParams,
    JSONRPC_VERSION,
};
use crate::utils::constants::{
    AGENT_CARD_WELL_KNOWN_PATH, METHOD_MESSAGE_SEND, METHOD_MESSAGE_STREAM,
    METHOD_PUSH_NOTIFICATION_GET, METHOD_PUSH_NOTIFICATION_SET, METHOD_TASKS_CANCEL,
    METHOD_TASKS_GET, METHOD_TASKS_RESUBSCRIBE,
};
use crate::utils::message::create_text_message_object;

use super::card_resolver::CardResolver;
use super::sse::EventStream;
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport, RequestOptions};

const APPLICATION_JSON: &str = "application/json";
const TEXT_EVENT_STREAM: &str = "text/event-stream";

/// An optional agent capability advertised in the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `capabilities.streaming`
    Streaming,
    /// `capabilities.pushNotifications`
    PushNotifications,
}

impl Capability {
    /// Whether `card` sets this capability's flag to `true`.
    pub fn is_supported_by(&self, card: &AgentCard) -> bool {
        let flag = match self {
            Capability::Streaming => card.capabilities.streaming,
            Capability::PushNotifications => card.capabilities.push_notifications,
        };
        flag.unwrap_or(false)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Streaming => write!(f, "streaming"),
            Capability::PushNotifications => write!(f, "pushNotifications"),
        }
    }
}

/// Returned when parsing a capability name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability '{0}'")]
pub struct UnknownCapability(pub String);

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "streaming" => Ok(Capability::Streaming),
            "pushNotifications" => Ok(Capability::PushNotifications),
            other => Err(UnknownCapability(other.to_string())),
        }
    }
}

/// Client for interacting with A2A-compatible agents.
///
/// Provides typed methods for the A2A JSON-RPC methods:
/// - `message/send` / `message/stream`
/// - `tasks/get` / `tasks/cancel` / `tasks/resubscribe`
/// - `tasks/pushNotification/set` / `tasks/pushNotification/get`
///
/// The client caches the agent card it resolves (or was built from); the
/// cache is the only state shared between calls.
///
/// # Construction
///
/// ```no_run
/// use a2a_rpc_client::client::A2AClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // From a base URL (resolves the agent card, uses its endpoint):
/// let client = A2AClient::from_card_url("http://localhost:7420").await?;
///
/// // Directly against a known endpoint:
/// let client = A2AClient::new("http://localhost:7420/a2a");
/// # Ok(())
/// # }
/// ```
pub struct A2AClient {
    url: String,
    transport: Arc<dyn HttpTransport>,
    options: RequestOptions,
    card_path: String,
    agent_card: RwLock<Option<Arc<AgentCard>>>,
}

impl fmt::Debug for A2AClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("A2AClient")
            .field("url", &self.url)
            .field("card_path", &self.card_path)
            .finish_non_exhaustive()
    }
}

impl A2AClient {
    /// Create a client that calls the given protocol endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_parts(
            url.into(),
            Arc::new(ReqwestTransport::new()),
            RequestOptions::default(),
            AGENT_CARD_WELL_KNOWN_PATH.to_string(),
            None,
        )
    }

    /// Create a client from an already-resolved agent card.
    ///
    /// The card's `url` becomes the call target and the card seeds the
    /// cache.
    pub fn from_card(card: AgentCard) -> Self {
        Self::from_parts(
            card.url.clone(),
            Arc::new(ReqwestTransport::new()),
            RequestOptions::default(),
            AGENT_CARD_WELL_KNOWN_PATH.to_string(),
            Some(card),
        )
    }

    /// Resolve the agent card published under `base_url`, then build a
    /// client from it.
    pub async fn from_card_url(base_url: &str) -> A2AResult<Self> {
        let card = CardResolver::new().resolve(base_url).await?;
        Ok(Self::from_card(card))
    }

    /// A builder for custom transports, headers and card paths.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        url: String,
        transport: Arc<dyn HttpTransport>,
        options: RequestOptions,
        card_path: String,
        card: Option<AgentCard>,
    ) -> Self {
        Self {
            url,
            transport,
            options,
            card_path,
            agent_card: RwLock::new(card.map(Arc::new)),
        }
    }

    /// The protocol endpoint this client calls.
    pub fn url(&self) -> &str {
        &self.url
    }

    // ──────────────────────────────────────────────────
    // Core A2A JSON-RPC Methods
    // ──────────────────────────────────────────────────

    /// Send a message to the agent (`message/send`).
    ///
    /// The agent replies with either a [`Message`] or a [`Task`].
    pub async fn send_message(&self, message: Message) -> A2AResult<Option<SendMessageResult>> {
        self.call(METHOD_MESSAGE_SEND, &MessageSendParams { message })
            .await
    }

    /// Send a message and stream the agent's updates (`message/stream`).
    pub async fn send_message_stream(&self, message: Message) -> A2AResult<EventStream> {
        self.stream(METHOD_MESSAGE_STREAM, &MessageSendParams { message })
            .await
    }

    /// Get the current state of a task (`tasks/get`).
    pub async fn get_task(&self, params: TaskQueryParams) -> A2AResult<Option<Task>> {
        self.call(METHOD_TASKS_GET, &params).await
    }

    /// Cancel a running task (`tasks/cancel`).
    pub async fn cancel_task(&self, params: TaskIdParams) -> A2AResult<Option<Task>> {
        self.call(METHOD_TASKS_CANCEL, &params).await
    }

    /// Set or update the push notification config for a task
    /// (`tasks/pushNotification/set`).
    pub async fn set_task_push_notification_config(
        &self,
        config: TaskPushNotificationConfig,
    ) -> A2AResult<Option<TaskPushNotificationConfig>> {
        self.call(METHOD_PUSH_NOTIFICATION_SET, &config).await
    }

    /// Get the push notification config for a task
    /// (`tasks/pushNotification/get`).
    pub async fn get_task_push_notification_config(
        &self,
        params: TaskIdParams,
    ) -> A2AResult<Option<TaskPushNotificationConfig>> {
        self.call(METHOD_PUSH_NOTIFICATION_GET, &params).await
    }

    /// Resubscribe to a task's event stream after a disconnection
    /// (`tasks/resubscribe`).
    pub async fn resubscribe_task(&self, params: TaskQueryParams) -> A2AResult<EventStream> {
        self.stream(METHOD_TASKS_RESUBSCRIBE, &params).await
    }

    /// Send an arbitrary JSON-RPC request and return the whole response.
    ///
    /// Unlike the typed methods this keeps the `error` object, if any.
    pub async fn send_request<P: Serialize + ?Sized>(
        &self,
        method: &str,
        params: &P,
    ) -> A2AResult<JsonRpcResponse> {
        let request = build_request(method, params)?;
        let body = serde_json::to_vec(&request)
            .map_err(|e| A2AError::decode(format!("failed to serialize request: {e}")))?;

        tracing::debug!(method, id = %request.id, url = %self.url, "sending JSON-RPC request");

        let mut http = HttpRequest::post(&self.url, body);
        http.headers = self.options.merged_with(&[
            (CONTENT_TYPE, APPLICATION_JSON),
            (ACCEPT, APPLICATION_JSON),
        ]);

        let response = self.transport.execute(http).await?;
        if !response.is_success() {
            return Err(response.into_http_error().await);
        }

        let bytes = response.bytes().await?;
        let rpc: JsonRpcResponse = serde_json::from_slice(&bytes)
            .map_err(|e| A2AError::decode(format!("failed to parse JSON-RPC response: {e}")))?;

        check_correlation(&request, &rpc);
        Ok(rpc)
    }

    // ──────────────────────────────────────────────────
    // Agent card & capabilities
    // ──────────────────────────────────────────────────

    /// The agent card, resolving and caching it on first use.
    ///
    /// The card is fetched from this client's own endpoint. Concurrent first
    /// calls may each fetch; the last one to finish wins.
    pub async fn agent_card(&self) -> A2AResult<Arc<AgentCard>> {
        let cached = self.agent_card.read().await.clone();
        if let Some(card) = cached {
            return Ok(card);
        }

        let resolver =
            CardResolver::with_transport(self.transport.clone()).with_card_path(&self.card_path);
        let card = Arc::new(
            resolver
                .resolve_with_options(&self.url, &self.options)
                .await?,
        );

        *self.agent_card.write().await = Some(card.clone());
        Ok(card)
    }

    /// The cached agent card, without fetching.
    pub async fn cached_agent_card(&self) -> Option<Arc<AgentCard>> {
        self.agent_card.read().await.clone()
    }

    /// Drop the cached agent card so the next lookup fetches it again.
    pub async fn invalidate_agent_card(&self) {
        *self.agent_card.write().await = None;
    }

    /// Whether the agent advertises `capability`.
    ///
    /// Advisory only: resolution failures are logged and reported as
    /// `false`, never returned.
    pub async fn supports(&self, capability: Capability) -> bool {
        match self.agent_card().await {
            Ok(card) => capability.is_supported_by(&card),
            Err(e) => {
                tracing::warn!(
                    capability = %capability,
                    error = %e,
                    "failed to determine capability support"
                );
                false
            }
        }
    }

    // ──────────────────────────────────────────────────
    // Convenience Helpers
    // ──────────────────────────────────────────────────

    /// Send a user text message within `context_id` (`message/send`).
    pub async fn send_text(
        &self,
        context_id: &str,
        text: &str,
    ) -> A2AResult<Option<SendMessageResult>> {
        self.send_message(create_text_message_object(context_id, Role::User, text))
            .await
    }

    /// Stream the reply to a user text message within `context_id`
    /// (`message/stream`).
    pub async fn send_text_stream(&self, context_id: &str, text: &str) -> A2AResult<EventStream> {
        self.send_message_stream(create_text_message_object(context_id, Role::User, text))
            .await
    }

    // ──────────────────────────────────────────────────
    // Internal helpers
    // ──────────────────────────────────────────────────

    async fn call<P, R>(&self, method: &str, params: &P) -> A2AResult<Option<R>>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send_request(method, params).await?;

        if let Some(error) = &response.error {
            tracing::warn!(
                method,
                code = error.code,
                message = %error.message,
                "agent returned a JSON-RPC error"
            );
        }

        response
            .into_result()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| A2AError::decode(format!("failed to deserialize {method} result: {e}")))
    }

    async fn stream<P: Serialize + ?Sized>(
        &self,
        method: &str,
        params: &P,
    ) -> A2AResult<EventStream> {
        let request = build_request(method, params)?;
        let body = serde_json::to_vec(&request)
            .map_err(|e| A2AError::decode(format!("failed to serialize request: {e}")))?;

        tracing::debug!(method, id = %request.id, url = %self.url, "opening event stream");

        let mut http = HttpRequest::post(&self.url, body);
        http.headers = self.options.merged_with(&[
            (CONTENT_TYPE, APPLICATION_JSON),
            (ACCEPT, TEXT_EVENT_STREAM),
        ]);

        let response = self.transport.execute(http).await?;
        if !response.is_success() {
            return Err(response.into_http_error().await);
        }

        Ok(EventStream::new(response.body))
    }
}

/// Build a JSON-RPC request with a random UUID ID.
fn build_request<P: Serialize + ?Sized>(method: &str, params: &P) -> A2AResult<JsonRpcRequest> {
    let params = serde_json::to_value(params)
        .map_err(|e| A2AError::decode(format!("failed to serialize request params: {e}")))?;

    Ok(JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id: JsonRpcId::String(uuid::Uuid::new_v4().to_string()),
        method: method.to_string(),
        params,
    })
}

/// Log, but do not fail, when a response answers a different request.
fn check_correlation(request: &JsonRpcRequest, response: &JsonRpcResponse) {
    if let Some(id) = &response.id {
        if *id != request.id {
            tracing::warn!(
                expected = %request.id,
                received = %id,
                method = %request.method,
                "JSON-RPC response id does not match request"
            );
        }
    }
}
