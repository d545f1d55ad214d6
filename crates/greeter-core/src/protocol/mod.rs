//! Wire types for the two transports.
//!
//! - HTTP: JSON request/response bodies for `/greeting` and `/expensive`.
//! - RPC: the single greet message pair carried over the RPC session.
//!
//! Request fields default to the empty string when absent, so a body of `{}`
//! reaches the service and fails there with an operation error instead of a
//! decode error. Unknown fields are ignored.

pub mod http;
pub mod rpc;
