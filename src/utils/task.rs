//! Utility functions for reading agent replies.

use crate::types::{Message, SendMessageResult, Task};

/// The text a user would see as the agent's reply.
///
/// For a task: the first text part of the first artifact, falling back to
/// the first text part of the status message. For a message: its first text
/// part. `None` when there is no text anywhere.
///
/// ```
/// use a2a_rpc_client::types::{Role, SendMessageResult};
/// use a2a_rpc_client::utils::{create_text_message_object, reply_text};
///
/// let reply = SendMessageResult::Message(create_text_message_object("ctx", Role::Agent, "hi"));
/// assert_eq!(reply_text(&reply), Some("hi"));
/// ```
pub fn reply_text(result: &SendMessageResult) -> Option<&str> {
    match result {
        SendMessageResult::Message(message) => first_text(message),
        SendMessageResult::Task(task) => task_reply_text(task),
    }
}

/// Like [`reply_text`], for a task on its own.
pub fn task_reply_text(task: &Task) -> Option<&str> {
    task.artifacts
        .first()
        .and_then(|artifact| artifact.parts.iter().find_map(|p| p.as_text()))
        .or_else(|| task.status.message.as_ref().and_then(first_text))
}

fn first_text(message: &Message) -> Option<&str> {
    message.parts.iter().find_map(|p| p.as_text())
}
