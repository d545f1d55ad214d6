//! greeter core: transport-agnostic contracts shared by the gateway and clients.
//!
//! This crate defines the error taxonomy and the wire types for the HTTP JSON
//! bodies and RPC messages. It intentionally carries no transport or runtime
//! dependencies so it can be reused by clients and test tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GreeterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Field, GreeterError, Result};
