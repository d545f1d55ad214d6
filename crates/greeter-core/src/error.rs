//! Shared error type across greeter crates.

use std::fmt;

use thiserror::Error;

/// Credential field checked by the expensive operation, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Connection,
    Username,
    Password,
}

impl Field {
    /// Name used in client-visible messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Connection => "connectionString",
            Field::Username => "username",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GreeterError>;

/// Unified error type used by core and gateway.
///
/// The display strings are stable: they travel to clients in the `err` field
/// of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GreeterError {
    #[error("empty greeting")]
    EmptyInput,
    #[error("empty greeting")]
    EmptyResult,
    #[error("request cancelled")]
    Cancelled,
    #[error("request timed out")]
    TimedOut,
    #[error("missing {0}")]
    MissingField(Field),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GreeterError {
    /// Operation-level failures that are reported inside a successful response.
    pub fn is_application(&self) -> bool {
        !matches!(self, GreeterError::BadRequest(_) | GreeterError::Internal(_))
    }
}
