//! Logging decorators: one structured event per call, result untouched.

use std::time::Instant;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use greeter_core::error::Result;

use crate::service::{GreetingService, Method, RpcGreetingService, SharedRpcService, SharedService};

pub struct LoggingService {
    next: SharedService,
}

impl LoggingService {
    pub fn new(next: SharedService) -> Self {
        Self { next }
    }
}

fn split(res: &Result<String>) -> (&str, String) {
    match res {
        Ok(v) => (v.as_str(), String::new()),
        Err(e) => ("", e.to_string()),
    }
}

#[async_trait]
impl GreetingService for LoggingService {
    async fn greet(&self, cancel: &CancellationToken, greeting: &str) -> Result<String> {
        let begin = Instant::now();
        let res = self.next.greet(cancel, greeting).await;

        let (output, err) = split(&res);
        tracing::info!(
            method = Method::Greet.as_str(),
            input = %greeting,
            output = %output,
            err = %err,
            took = ?begin.elapsed(),
            "call completed"
        );
        res
    }

    async fn expensive(
        &self,
        cancel: &CancellationToken,
        connection: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let begin = Instant::now();
        let res = self
            .next
            .expensive(cancel, connection, username, password)
            .await;

        let (output, err) = split(&res);
        tracing::info!(
            method = Method::Expensive.as_str(),
            connection_string = %connection,
            username = %username,
            password_len = password.len(),
            output = %output,
            err = %err,
            took = ?begin.elapsed(),
            "call completed"
        );
        res
    }
}

/// Same event shape for the RPC greeter, which is only ever logged.
pub struct RpcLoggingService {
    next: SharedRpcService,
}

impl RpcLoggingService {
    pub fn new(next: SharedRpcService) -> Self {
        Self { next }
    }
}

#[async_trait]
impl RpcGreetingService for RpcLoggingService {
    async fn greet_rpc(&self, cancel: &CancellationToken, greeting: &str) -> Result<String> {
        let begin = Instant::now();
        let res = self.next.greet_rpc(cancel, greeting).await;

        let (output, err) = split(&res);
        tracing::info!(
            method = "greet_rpc",
            input = %greeting,
            output = %output,
            err = %err,
            took = ?begin.elapsed(),
            "call completed"
        );
        res
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::middleware::test_support::Recorder;
    use crate::service::RpcGreeterService;
    use greeter_core::error::GreeterError;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (out, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn forwards_results_unmodified() {
        let inner = Recorder::shared();
        let svc = LoggingService::new(inner.clone());
        let cancel = CancellationToken::new();

        assert_eq!(svc.greet(&cancel, "hi").await, Ok("hi".to_string()));
        assert_eq!(svc.greet(&cancel, "").await, Err(GreeterError::EmptyInput));
        assert_eq!(
            svc.expensive(&cancel, "a", "b", "c").await,
            Ok("abc".to_string())
        );
        assert_eq!(inner.greets(), 2);
        assert_eq!(inner.expensives(), 1);
    }

    #[tokio::test]
    async fn greet_event_carries_call_fields() {
        let (out, _guard) = capture();
        let svc = LoggingService::new(Recorder::shared());
        let cancel = CancellationToken::new();

        let _ = svc.greet(&cancel, "hi").await;
        let _ = svc.greet(&cancel, "").await;

        let text = out.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "{text}");
        for line in &lines {
            assert!(line.contains("method="), "{line}");
            assert!(line.contains("greet"), "{line}");
            assert!(line.contains("took="), "{line}");
        }
        assert!(lines[0].contains("input=hi"), "{}", lines[0]);
        assert!(lines[0].contains("output=hi"), "{}", lines[0]);
        assert!(lines[1].contains("err=empty greeting"), "{}", lines[1]);
    }

    #[tokio::test]
    async fn expensive_event_redacts_password() {
        let (out, _guard) = capture();
        let svc = LoggingService::new(Recorder::shared());
        let cancel = CancellationToken::new();

        let _ = svc.expensive(&cancel, "conn", "user", "hunter2").await;

        let text = out.text();
        assert!(text.contains("connection_string=conn"), "{text}");
        assert!(text.contains("username=user"), "{text}");
        assert!(text.contains("password_len=7"), "{text}");
        assert!(!text.contains("hunter2"), "{text}");
    }

    #[tokio::test]
    async fn rpc_calls_are_logged_and_forwarded() {
        let (out, _guard) = capture();
        let svc = RpcLoggingService::new(Arc::new(RpcGreeterService));
        let cancel = CancellationToken::new();

        assert_eq!(
            svc.greet_rpc(&cancel, "world").await,
            Ok("GRPC - world".to_string())
        );
        let text = out.text();
        assert!(text.contains("greet_rpc"), "{text}");
        assert!(text.contains("input=world"), "{text}");
    }
}
