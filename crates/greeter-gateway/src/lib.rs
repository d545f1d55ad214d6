//! greeter gateway library entry.
//!
//! This crate wires the work executor, the service chain (baseline service plus
//! decorators), metrics, and the HTTP/RPC transport adapters into one service.
//! It is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod executor;
pub mod middleware;
pub mod obs;
pub mod ops;
pub mod router;
pub mod service;
pub mod transport;
