//! Transport adapters.
//!
//! Translate protocol requests into service calls and marshal results back:
//! - `http`: JSON bodies over `POST`
//! - `rpc`: greet messages over a WebSocket session
//!
//! Both derive a cancellation signal from their own lifecycle (`scope`).

pub mod codec;
pub mod http;
pub mod rpc;
pub mod scope;
