//! Per-request cancellation scope.
//!
//! The token is cancelled when the scope is dropped (the request future ended
//! or was dropped on client disconnect) or when the deadline elapses. A zero
//! deadline yields an already-cancelled token.
//!
//! `run` drives the service call on its own task, so a dropped request still
//! lets the chain observe the cancellation and finish (decorators record it).

use std::future::Future;
use std::time::Duration;

use axum::http::HeaderMap;
use tokio_util::sync::{CancellationToken, DropGuard};

use greeter_core::error::{GreeterError, Result};

/// Client-supplied deadline in milliseconds.
pub const TIMEOUT_HEADER: &str = "x-request-timeout-ms";

pub struct RequestScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestScope {
    pub fn new(deadline: Option<Duration>) -> Self {
        let token = CancellationToken::new();
        match deadline {
            Some(d) if d.is_zero() => token.cancel(),
            Some(d) => {
                let t = token.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = tokio::time::sleep(d) => t.cancel(),
                        _ = t.cancelled() => {}
                    }
                });
            }
            None => {}
        }
        Self {
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Spawn `call` with a clone of the token and wait for it. Dropping the
    /// returned future cancels the token; the spawned call keeps running until
    /// it settles.
    pub async fn run<F, Fut>(self, call: F) -> Result<String>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        let handle = tokio::spawn(call(self.token.clone()));
        match handle.await {
            Ok(res) => res,
            Err(e) => Err(GreeterError::Internal(format!("request task failed: {e}"))),
        }
    }
}

/// Smaller of the configured deadline and the client's header, if any.
pub fn effective_deadline(configured: Option<Duration>, headers: &HeaderMap) -> Option<Duration> {
    let requested = headers.get(TIMEOUT_HEADER).and_then(|v| {
        let parsed = v.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok());
        if parsed.is_none() {
            tracing::debug!(header = TIMEOUT_HEADER, "ignoring malformed deadline header");
        }
        parsed.map(Duration::from_millis)
    });

    match (configured, requested) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
