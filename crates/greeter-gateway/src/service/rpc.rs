//! RPC greeter: prefixes the greeting and never rejects input.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use greeter_core::error::Result;

use crate::executor::execute;

pub const RPC_GREETING_PREFIX: &str = "GRPC - ";

#[async_trait]
pub trait RpcGreetingService: Send + Sync {
    /// Only fails when the caller's signal fires first.
    async fn greet_rpc(&self, cancel: &CancellationToken, greeting: &str) -> Result<String>;
}

pub type SharedRpcService = Arc<dyn RpcGreetingService>;

#[derive(Debug, Clone, Default)]
pub struct RpcGreeterService;

#[async_trait]
impl RpcGreetingService for RpcGreeterService {
    async fn greet_rpc(&self, cancel: &CancellationToken, greeting: &str) -> Result<String> {
        let s = format!("{RPC_GREETING_PREFIX}{greeting}");
        execute(async move { s }, cancel, None).await
    }
}
