//! Shared application state.
//!
//! The decorated services are built once here and handed to the transport
//! adapters through axum state. Nothing is looked up at runtime.

use std::sync::Arc;

use greeter_core::error::Result;

use crate::config::GreeterConfig;
use crate::middleware::{InstrumentingService, LoggingService, OnceGate, RpcLoggingService};
use crate::obs::ServiceMetrics;
use crate::service::{GreeterService, RpcGreeterService, SharedRpcService, SharedService};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GreeterConfig,
    service: SharedService,
    rpc_service: SharedRpcService,
    metrics: Arc<ServiceMetrics>,
}

/// Assemble the HTTP chain, outermost first:
/// logging -> instrumenting -> gate -> baseline.
pub fn build_service(cfg: &GreeterConfig, metrics: Arc<ServiceMetrics>) -> SharedService {
    let baseline: SharedService = Arc::new(GreeterService::new(cfg.service.expensive_timeout()));
    let gated: SharedService = Arc::new(OnceGate::new(baseline));
    let instrumented: SharedService = Arc::new(InstrumentingService::new(metrics, gated));
    Arc::new(LoggingService::new(instrumented))
}

/// Assemble the RPC chain: logging -> prefixing greeter.
pub fn build_rpc_service() -> SharedRpcService {
    Arc::new(RpcLoggingService::new(Arc::new(RpcGreeterService)))
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GreeterConfig) -> Result<Self> {
        cfg.validate()?;
        let metrics = Arc::new(ServiceMetrics::new(&cfg.metrics));
        let service = build_service(&cfg, Arc::clone(&metrics));
        Ok(Self::from_parts(cfg, service, build_rpc_service(), metrics))
    }

    /// State around externally assembled chains.
    pub fn from_parts(
        cfg: GreeterConfig,
        service: SharedService,
        rpc_service: SharedRpcService,
        metrics: Arc<ServiceMetrics>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                service,
                rpc_service,
                metrics,
            }),
        }
    }

    pub fn cfg(&self) -> &GreeterConfig {
        &self.inner.cfg
    }

    pub fn service(&self) -> SharedService {
        Arc::clone(&self.inner.service)
    }

    pub fn rpc_service(&self) -> SharedRpcService {
        Arc::clone(&self.inner.rpc_service)
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
