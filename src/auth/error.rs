//! Error taxonomy for backend calls
//!
//! Classification happens once, at the HTTP boundary; each gateway
//! operation maps the classified error to its own user-facing message.

/// Error raised by any backend operation
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// 400 with a field-level cause; payload is the server-provided detail
    #[error("validation error: {0:?}")]
    Validation(Option<String>),

    /// 401 from any endpoint
    #[error("authentication failed")]
    Authentication,

    /// 409, or a 400 whose detail reports a duplicate
    #[error("conflict: {0:?}")]
    Conflict(Option<String>),

    /// 5xx
    #[error("server error: {0:?}")]
    Server(Option<String>),

    /// No response received
    #[error("network error: {0}")]
    Network(String),

    /// Anything else, status and server message preserved
    #[error("unexpected response ({status}): {message:?}")]
    Unknown {
        status: u16,
        message: Option<String>,
    },
}

impl AuthError {
    /// Server-provided detail or message, when one was carried
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AuthError::Validation(detail)
            | AuthError::Conflict(detail)
            | AuthError::Server(detail) => detail.as_deref(),
            AuthError::Unknown { message, .. } => message.as_deref(),
            AuthError::Authentication | AuthError::Network(_) => None,
        }
    }
}
