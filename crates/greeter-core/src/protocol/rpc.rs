//! RPC messages.
//!
//! One method: greet. There is no error channel; failures are answered with an
//! empty greeting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcGreetRequest {
    #[serde(default)]
    pub s: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcGreetResponse {
    pub greeting: String,
}
