//! A2A client: call remote A2A agents.
//!
//! - [`A2AClient`]: high-level client with typed methods for every A2A
//!   JSON-RPC operation (send messages, get/cancel tasks, push notification
//!   configs, subscribe to streams)
//! - [`CardResolver`]: discover agent cards via the well-known URL convention
//! - [`HttpTransport`] / [`ReqwestTransport`]: pluggable HTTP layer
//! - [`EventStream`]: typed event stream over a streaming response, built on
//!   the incremental [`SseDecoder`]
//!
//! # Quick Start
//!
//! ```no_run
//! use a2a_rpc_client::client::A2AClient;
//! use a2a_rpc_client::types::SendMessageResult;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect to an agent (resolves agent card automatically):
//! let client = A2AClient::from_card_url("http://localhost:7420").await?;
//!
//! // Send a text message:
//! match client.send_text("ctx-1", "Hello, agent!").await? {
//!     Some(SendMessageResult::Task(task)) => {
//!         println!("Task {}: {}", task.id, task.status.state);
//!     }
//!     Some(SendMessageResult::Message(msg)) => println!("Direct reply: {:?}", msg),
//!     None => println!("No result"),
//! }
//!
//! // Stream responses:
//! let mut stream = client.send_text_stream("ctx-1", "Write a haiku").await?;
//! while let Some(event) = stream.next().await {
//!     println!("{:?}", event?);
//! }
//! # Ok(())
//! # }
//! ```

mod a2a_client;
mod card_resolver;
mod sse;
mod transport;

pub use a2a_client::{A2AClient, Capability, UnknownCapability};
pub use card_resolver::CardResolver;
pub use sse::{EventStream, SseDecoder, Utf8Decoder};
pub use transport::{
    ByteStream, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestOptions,
};
