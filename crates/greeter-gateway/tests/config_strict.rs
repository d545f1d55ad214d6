#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use greeter_core::GreeterError;
use greeter_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
service:
  expensive_timout_ms: 500 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, GreeterError::BadRequest(_)));
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "127.0.0.1:8080");
    assert_eq!(cfg.gateway.request_timeout(), None);
    assert!(!cfg.gateway.fold_decode_errors);
    assert_eq!(cfg.service.expensive_timeout(), Duration::from_secs(1));
    assert_eq!(cfg.metrics.namespace, "greeter");
    assert_eq!(cfg.metrics.subsystem, "greeting_service");
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
gateway:
  listen: "0.0.0.0:9090"
  ping_interval_ms: 10000
  idle_timeout_ms: 30000
  request_timeout_ms: 250
  fold_decode_errors: true
service:
  expensive_timeout_ms: 50
metrics:
  namespace: "my_group"
  subsystem: "greeting_service"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.listen, "0.0.0.0:9090");
    assert_eq!(cfg.gateway.request_timeout(), Some(Duration::from_millis(250)));
    assert!(cfg.gateway.fold_decode_errors);
    assert_eq!(cfg.service.expensive_timeout(), Duration::from_millis(50));
    assert_eq!(cfg.metrics.namespace, "my_group");
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(err.to_string().contains("unsupported config version"));
}

#[test]
fn rejects_idle_timeout_not_above_ping() {
    let bad = r#"
version: 1
gateway:
  ping_interval_ms: 20000
  idle_timeout_ms: 20000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("idle_timeout_ms"));
}

#[test]
fn rejects_zero_expensive_timeout() {
    let bad = r#"
version: 1
service:
  expensive_timeout_ms: 0
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn default_config_is_valid() {
    config::GreeterConfig::default().validate().expect("defaults must validate");
}

#[test]
fn missing_file_is_internal_error() {
    let err = config::load_from_file("/nonexistent/greeter.yaml").expect_err("must fail");
    assert!(matches!(err, GreeterError::Internal(_)));
}
