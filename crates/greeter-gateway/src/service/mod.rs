//! Service contract.
//!
//! `GreetingService` is the capability every layer of the chain implements: the
//! baseline service at the bottom and each decorator in `crate::middleware`
//! above it. Chains are assembled by nesting at startup (see
//! `crate::app_state::build_service`). The RPC transport has its own, smaller
//! contract in `rpc`.

pub mod greeting;
pub mod rpc;

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use greeter_core::error::Result;

pub use greeting::GreeterService;
pub use rpc::{RpcGreeterService, RpcGreetingService, SharedRpcService};

/// Sentinel returned by the gate to every caller after the first.
pub const ALREADY_INITIALIZED: &str = "already initialized";

#[async_trait]
pub trait GreetingService: Send + Sync {
    /// Echo `greeting` back. Fails on empty input.
    async fn greet(&self, cancel: &CancellationToken, greeting: &str) -> Result<String>;

    /// Validate the three credentials and produce the connection status.
    async fn expensive(
        &self,
        cancel: &CancellationToken,
        connection: &str,
        username: &str,
        password: &str,
    ) -> Result<String>;
}

/// Shared handle to the head of a decoration chain.
pub type SharedService = Arc<dyn GreetingService>;

/// Operation names used as log fields and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Greet,
    Expensive,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Greet => "greet",
            Method::Expensive => "expensive",
        }
    }
}
