//! Service config loader (strict parsing).
//!
//! The file is optional: `load_from_env` falls back to built-in defaults when
//! `GREETER_CONFIG` is not set.

pub mod schema;

use std::fs;

use greeter_core::error::{GreeterError, Result};

pub use schema::{GatewaySection, GreeterConfig, MetricsSection, ServiceSection};

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "GREETER_CONFIG";

pub fn load_from_file(path: &str) -> Result<GreeterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GreeterError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GreeterConfig> {
    let cfg: GreeterConfig = serde_yaml::from_str(s)
        .map_err(|e| GreeterError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_env() -> Result<GreeterConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(&path),
        Err(_) => {
            tracing::debug!("{CONFIG_ENV} not set; using default config");
            Ok(GreeterConfig::default())
        }
    }
}
