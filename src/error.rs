//! Client error taxonomy.
//!
//! Every fallible protocol call returns [`A2AResult`]. The error is always
//! one of two kinds:
//!
//! - [`A2AError::Http`]: the server answered with a non-success status, or
//!   the transport could not complete the call at all (reported as 503).
//! - [`A2AError::Decode`]: a response body, or one streamed frame payload,
//!   was not valid structured data.
//!
//! [`ConfigError`] is separate and only arises while building a client.

/// Status code used when the transport itself failed (DNS, refused
/// connection, broken stream).
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// Unified error type for every A2A client operation.
///
/// `A2AError` is the base kind: match on it exhaustively to tell the
/// variants apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A2AError {
    /// HTTP error with status code and reason.
    ///
    /// `reason` is the response body text, the canonical status reason when
    /// the body was empty, or a description of the transport fault.
    #[error("HTTP Error {status}: {reason}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Human-readable reason.
        reason: String,
    },

    /// Invalid JSON received from the remote agent.
    #[error("JSON Error: {0}")]
    Decode(String),
}

/// Convenience result type for A2A client operations.
pub type A2AResult<T> = Result<T, A2AError>;

impl A2AError {
    /// Create an `Http` error.
    pub fn http(status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            status,
            reason: reason.into(),
        }
    }

    /// Create a `Decode` error.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }

    /// Wrap a transport fault that prevented the call from completing.
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::http(
            SERVICE_UNAVAILABLE,
            format!("Network communication error: {err}"),
        )
    }

    /// Wrap a transport fault that broke an already-open response body.
    pub fn stream(err: impl std::fmt::Display) -> Self {
        Self::http(SERVICE_UNAVAILABLE, format!("Stream error: {err}"))
    }

    /// The HTTP status code, if this is an `Http` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            A2AError::Http { status, .. } => Some(*status),
            A2AError::Decode(_) => None,
        }
    }

    /// The reason text carried by either variant.
    pub fn reason(&self) -> &str {
        match self {
            A2AError::Http { reason, .. } => reason,
            A2AError::Decode(reason) => reason,
        }
    }

    /// Returns `true` for `Http` errors.
    pub fn is_http(&self) -> bool {
        matches!(self, A2AError::Http { .. })
    }

    /// Returns `true` for `Decode` errors.
    pub fn is_decode(&self) -> bool {
        matches!(self, A2AError::Decode(_))
    }
}

impl From<serde_json::Error> for A2AError {
    fn from(err: serde_json::Error) -> Self {
        A2AError::Decode(err.to_string())
    }
}

/// Errors raised while configuring a client, before any call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither an agent card nor a URL was supplied.
    #[error("must provide either an agent card or a url")]
    MissingTarget,

    /// A header name or value could not be represented on the wire.
    #[error("invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}
