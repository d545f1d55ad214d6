use std::time::Duration;

use serde::Deserialize;
use greeter_core::error::{GreeterError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GreeterConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            service: ServiceSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl GreeterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GreeterError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.service.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// RPC session keepalive.
    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    /// RPC session closes after this long without inbound frames.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Deadline applied to every HTTP request's cancellation signal.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// Report body decode failures as `200` + `err` instead of `500`.
    #[serde(default)]
    pub fold_decode_errors: bool,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            request_timeout_ms: None,
            fold_decode_errors: false,
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !(5000..=120000).contains(&self.ping_interval_ms) {
            return Err(GreeterError::BadRequest(
                "gateway.ping_interval_ms must be between 5000 and 120000".into(),
            ));
        }
        if !(10000..=600000).contains(&self.idle_timeout_ms) {
            return Err(GreeterError::BadRequest(
                "gateway.idle_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(GreeterError::BadRequest(
                "gateway.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".into()
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    /// Executor timeout for the expensive operation.
    #[serde(default = "default_expensive_timeout_ms")]
    pub expensive_timeout_ms: u64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            expensive_timeout_ms: default_expensive_timeout_ms(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=60000).contains(&self.expensive_timeout_ms) {
            return Err(GreeterError::BadRequest(
                "service.expensive_timeout_ms must be between 1 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn expensive_timeout(&self) -> Duration {
        Duration::from_millis(self.expensive_timeout_ms)
    }
}

fn default_expensive_timeout_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_subsystem")]
    pub subsystem: String,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            subsystem: default_subsystem(),
        }
    }
}

fn default_namespace() -> String {
    "greeter".into()
}
fn default_subsystem() -> String {
    "greeting_service".into()
}
