//! Well-known paths and method names of the A2A JSON-RPC binding.

/// The well-known path for the agent card.
pub const AGENT_CARD_WELL_KNOWN_PATH: &str = "/.well-known/agent.json";

/// `message/send`
pub const METHOD_MESSAGE_SEND: &str = "message/send";

/// `message/stream`
pub const METHOD_MESSAGE_STREAM: &str = "message/stream";

/// `tasks/get`
pub const METHOD_TASKS_GET: &str = "tasks/get";

/// `tasks/cancel`
pub const METHOD_TASKS_CANCEL: &str = "tasks/cancel";

/// `tasks/pushNotification/set`
pub const METHOD_PUSH_NOTIFICATION_SET: &str = "tasks/pushNotification/set";

/// `tasks/pushNotification/get`
pub const METHOD_PUSH_NOTIFICATION_GET: &str = "tasks/pushNotification/get";

/// `tasks/resubscribe`
pub const METHOD_TASKS_RESUBSCRIBE: &str = "tasks/resubscribe";
