//! Top-level facade crate for the greeter service.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use greeter_core::*;
}

pub mod gateway {
    pub use greeter_gateway::*;
}
