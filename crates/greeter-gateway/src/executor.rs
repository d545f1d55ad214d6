//! Work executor.
//!
//! Runs one unit of work on its own task and races it, exactly once, against
//! the caller's cancellation signal and an optional timeout. The first event to
//! settle decides the outcome:
//! - work finishes: its value, or `EmptyResult` when the value is empty
//! - cancellation fires: `Cancelled`
//! - timeout elapses: `TimedOut`
//!
//! Abandoned work is detached, not aborted. It is not guaranteed to stop, only
//! to have its result ignored.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use greeter_core::error::{GreeterError, Result};

pub async fn execute<F>(
    work: F,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
) -> Result<String>
where
    F: Future<Output = String> + Send + 'static,
{
    let task = tokio::spawn(work);

    let deadline = async move {
        match timeout {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };

    // Polled in order so an already-expired signal always wins over work that
    // completes instantly. A signal that never fires cannot preempt the value.
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(GreeterError::Cancelled),
        _ = deadline => Err(GreeterError::TimedOut),
        joined = task => match joined {
            Ok(v) if v.is_empty() => Err(GreeterError::EmptyResult),
            Ok(v) => Ok(v),
            Err(e) => Err(GreeterError::Internal(format!("worker task failed: {e}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_value_when_work_finishes_first() {
        let cancel = CancellationToken::new();
        let out = execute(async { "hello".to_string() }, &cancel, None).await;
        assert_eq!(out, Ok("hello".to_string()));
    }

    #[tokio::test]
    async fn empty_value_is_an_error() {
        let cancel = CancellationToken::new();
        let out = execute(async { String::new() }, &cancel, None).await;
        assert_eq!(out, Err(GreeterError::EmptyResult));
    }

    #[tokio::test]
    async fn expired_signal_wins_over_instant_work() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        for _ in 0..32 {
            let out = execute(async { "hello".to_string() }, &cancel, None).await;
            assert_eq!(out, Err(GreeterError::Cancelled));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_mid_flight_abandons_work() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let out = execute(
            async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "late".to_string()
            },
            &cancel,
            None,
        )
        .await;
        assert_eq!(out, Err(GreeterError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_elapses_before_slow_work() {
        let cancel = CancellationToken::new();
        let out = execute(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late".to_string()
            },
            &cancel,
            Some(Duration::from_secs(1)),
        )
        .await;
        assert_eq!(out, Err(GreeterError::TimedOut));
    }

    #[tokio::test(start_paused = true)]
    async fn no_timeout_means_slow_work_still_completes() {
        let cancel = CancellationToken::new();
        let out = execute(
            async {
                tokio::time::sleep(Duration::from_secs(120)).await;
                "done".to_string()
            },
            &cancel,
            None,
        )
        .await;
        assert_eq!(out, Ok("done".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn work_within_timeout_completes() {
        let cancel = CancellationToken::new();
        let out = execute(
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                "in time".to_string()
            },
            &cancel,
            Some(Duration::from_secs(1)),
        )
        .await;
        assert_eq!(out, Ok("in time".to_string()));
    }

    #[tokio::test]
    async fn panicking_work_surfaces_as_internal() {
        let cancel = CancellationToken::new();
        let out = execute(async { None::<String>.expect("boom") }, &cancel, None).await;
        assert!(matches!(out, Err(GreeterError::Internal(_))));
    }
}
