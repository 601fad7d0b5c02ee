//! Utility functions for creating and reading A2A Message objects.

use crate::types::{Message, Part, Role};
use crate::utils::parts::get_text_parts;
use uuid::Uuid;

/// Creates a message with a single text Part and a fresh message id.
///
/// # Arguments
///
/// * `context_id` - The conversation the message belongs to.
/// * `role` - Who is speaking.
/// * `content` - The text content.
///
/// # Example
///
/// ```
/// use a2a_rpc_client::types::Role;
/// use a2a_rpc_client::utils::create_text_message_object;
///
/// let message = create_text_message_object("ctx-1", Role::User, "Hello");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.context_id.as_deref(), Some("ctx-1"));
/// ```
pub fn create_text_message_object(
    context_id: impl Into<String>,
    role: Role,
    content: impl Into<String>,
) -> Message {
    Message {
        message_id: Uuid::new_v4().to_string(),
        role,
        kind: "message".to_string(),
        parts: vec![Part::text(content)],
        context_id: Some(context_id.into()),
        task_id: None,
        metadata: None,
    }
}

/// Extracts and joins all text content from a Message's parts.
///
/// Returns an empty string if the message has no text parts.
///
/// ```
/// use a2a_rpc_client::types::Role;
/// use a2a_rpc_client::utils::{create_text_message_object, get_message_text};
///
/// let message = create_text_message_object("ctx", Role::Agent, "Hello, world!");
/// assert_eq!(get_message_text(&message, "\n"), "Hello, world!");
/// ```
pub fn get_message_text(message: &Message, delimiter: &str) -> String {
    get_text_parts(&message.parts).join(delimiter)
}
