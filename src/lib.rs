//! # a2a-rpc-client: client core for the Agent-to-Agent (A2A) protocol
//!
//! This crate lets a program talk to remote A2A agents over the JSON-RPC 2.0
//! binding, with streaming replies delivered as Server-Sent Events (SSE).
//!
//! ## Overview
//!
//! With it you can:
//! - Discover an agent through its published agent card
//! - Send messages and receive a direct reply or a task
//! - Stream status and artifact updates as they happen
//! - Query and cancel tasks, and resubscribe to a task's stream
//! - Configure push notifications for a task
//!
//! The crate provides:
//! - **Wire types** for the protocol objects ([`types`])
//! - **Client** for calling remote agents ([`client::A2AClient`])
//! - **Incremental SSE decoding** that tolerates arbitrary chunk boundaries
//!   ([`client::SseDecoder`])
//! - **Ergonomic builders** ([`AgentCardBuilder`], [`ClientBuilder`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use a2a_rpc_client::client::A2AClient;
//! use a2a_rpc_client::types::StreamEvent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect to an A2A agent (auto-discovers endpoint)
//!     let client = A2AClient::from_card_url("http://localhost:7420").await?;
//!
//!     // Send a simple text message
//!     if let Some(reply) = client.send_text("ctx-1", "Write a haiku about Rust").await? {
//!         println!("{:?}", a2a_rpc_client::utils::reply_text(&reply));
//!     }
//!
//!     // Or stream responses in real-time
//!     let mut stream = client.send_text_stream("ctx-1", "Tell me a story").await?;
//!     while let Some(event) = stream.next().await {
//!         match event? {
//!             StreamEvent::StatusUpdate(update) => {
//!                 println!("Status: {}", update.status.state);
//!             }
//!             StreamEvent::ArtifactUpdate(artifact) => {
//!                 println!("Artifact: {:?}", artifact.artifact.name);
//!             }
//!             _ => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every protocol call returns [`A2AResult`]. [`A2AError::Http`] covers
//! non-success statuses and transport faults (status 503);
//! [`A2AError::Decode`] covers bodies and stream frames that are not valid
//! JSON of the expected shape. Building a client can additionally fail with
//! [`error::ConfigError`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for request flow, `warn` for
//! absorbed failures) and never installs a subscriber.
//!
//! Supported JSON-RPC methods:
//! - `message/send`: send a message, get a message or a task
//! - `message/stream`: send a message with SSE streaming
//! - `tasks/get`: retrieve a task by ID
//! - `tasks/cancel`: cancel a running task
//! - `tasks/pushNotification/set` / `tasks/pushNotification/get`
//! - `tasks/resubscribe`: reattach to a task's event stream

pub mod builders;
pub mod client;
pub mod error;
pub mod types;
pub mod utils;

/// Prelude module that re-exports commonly used types and traits.
///
/// ```
/// use a2a_rpc_client::prelude::*;
///
/// let message = create_text_message_object("ctx", Role::User, "hi");
/// assert_eq!(message.parts.len(), 1);
/// ```
pub mod prelude {
    // Core types
    pub use crate::types::{
        AgentCapabilities, AgentCard, AgentSkill, Artifact, Message, Part, Role,
        SendMessageResult, StreamEvent, Task, TaskArtifactUpdateEvent, TaskIdParams,
        TaskQueryParams, TaskState, TaskStatus, TaskStatusUpdateEvent,
    };

    // Error types
    pub use crate::error::{A2AError, A2AResult, ConfigError};

    // Builders
    pub use crate::builders::{AgentCardBuilder, ClientBuilder};

    // Client
    pub use crate::client::{A2AClient, Capability, EventStream};

    // Helpers
    pub use crate::utils::{create_text_message_object, get_message_text, reply_text};
}

// Re-export core types at crate root for convenience.
pub use builders::{AgentCardBuilder, ClientBuilder};
pub use error::{A2AError, A2AResult};
pub use types::*;
