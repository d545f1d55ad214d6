//! HTTP JSON bodies.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// `POST /greeting` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetRequest {
    #[serde(default)]
    pub s: String,
}

/// `POST /greeting` response. `err` is omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetResponse {
    pub greeting: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub err: String,
}

/// `POST /expensive` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensiveRequest {
    #[serde(default)]
    pub connection_string: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /expensive` response. `err` is omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensiveResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub err: String,
}

/// Builds a response envelope from an operation outcome.
///
/// Exactly one of value / err is populated.
pub trait Envelope: Sized {
    fn ok(value: String) -> Self;
    fn err(msg: String) -> Self;

    fn from_result<E: std::fmt::Display>(res: std::result::Result<String, E>) -> Self {
        match res {
            Ok(v) => Self::ok(v),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

impl Envelope for GreetResponse {
    fn ok(greeting: String) -> Self {
        Self { greeting, err: String::new() }
    }
    fn err(err: String) -> Self {
        Self { greeting: String::new(), err }
    }
}

impl Envelope for ExpensiveResponse {
    fn ok(status: String) -> Self {
        Self { status, err: String::new() }
    }
    fn err(err: String) -> Self {
        Self { status: String::new(), err }
    }
}

/// Convenience for callers holding a crate `Result`.
pub fn envelope<T: Envelope>(res: Result<String>) -> T {
    T::from_result(res)
}
