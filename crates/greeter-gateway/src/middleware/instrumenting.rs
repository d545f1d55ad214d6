//! Instrumenting decorator: request count and latency by method and error.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use greeter_core::error::Result;

use crate::obs::ServiceMetrics;
use crate::service::{GreetingService, Method, SharedService};

pub struct InstrumentingService {
    metrics: Arc<ServiceMetrics>,
    next: SharedService,
}

impl InstrumentingService {
    pub fn new(metrics: Arc<ServiceMetrics>, next: SharedService) -> Self {
        Self { metrics, next }
    }

    fn record(&self, method: Method, begin: Instant, failed: bool) {
        let labels = [
            ("method", method.as_str()),
            ("error", if failed { "true" } else { "false" }),
        ];
        self.metrics.request_count.inc(&labels);
        self.metrics.request_latency.observe(&labels, begin.elapsed());
    }
}

#[async_trait]
impl GreetingService for InstrumentingService {
    async fn greet(&self, cancel: &CancellationToken, greeting: &str) -> Result<String> {
        let begin = Instant::now();
        let res = self.next.greet(cancel, greeting).await;
        self.record(Method::Greet, begin, res.is_err());
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
        self.record(Method::Expensive, begin, res.is_err());
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::test_support::Recorder;

    #[tokio::test]
    async fn counts_split_by_error_label() {
        let metrics = Arc::new(ServiceMetrics::default());
        let svc = InstrumentingService::new(metrics.clone(), Recorder::shared());
        let cancel = CancellationToken::new();

        let inputs = ["a", "", "b", "", "", "c", "d"];
        for s in inputs {
            let _ = svc.greet(&cancel, s).await;
        }

        let errors = inputs.iter().filter(|s| s.is_empty()).count() as u64;
        let total = inputs.len() as u64;
        let count = &metrics.request_count;
        assert_eq!(count.get(&[("method", "greet"), ("error", "true")]), errors);
        assert_eq!(
            count.get(&[("method", "greet"), ("error", "false")]),
            total - errors
        );
        assert_eq!(
            metrics
                .request_latency
                .count(&[("method", "greet"), ("error", "true")]),
            errors
        );
    }

    #[tokio::test]
    async fn expensive_failures_are_labelled() {
        let metrics = Arc::new(ServiceMetrics::default());
        let inner = Arc::new(Recorder {
            expensive_fails: true,
            ..Recorder::default()
        });
        let svc = InstrumentingService::new(metrics.clone(), inner);
        let cancel = CancellationToken::new();

        assert!(svc.expensive(&cancel, "c", "u", "p").await.is_err());
        let count = &metrics.request_count;
        assert_eq!(count.get(&[("method", "expensive"), ("error", "true")]), 1);
        assert_eq!(count.get(&[("method", "expensive"), ("error", "false")]), 0);
    }
}
