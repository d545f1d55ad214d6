//! Baseline service: performs the actual (trivial) work through the executor.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use greeter_core::error::{Field, GreeterError, Result};

use crate::executor::execute;
use crate::service::GreetingService;

pub const DEFAULT_EXPENSIVE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct GreeterService {
    expensive_timeout: Duration,
}

impl Default for GreeterService {
    fn default() -> Self {
        Self::new(DEFAULT_EXPENSIVE_TIMEOUT)
    }
}

impl GreeterService {
    pub fn new(expensive_timeout: Duration) -> Self {
        Self { expensive_timeout }
    }
}

fn require(value: &str, field: Field) -> Result<()> {
    if value.is_empty() {
        return Err(GreeterError::MissingField(field));
    }
    Ok(())
}

#[async_trait]
impl GreetingService for GreeterService {
    async fn greet(&self, cancel: &CancellationToken, greeting: &str) -> Result<String> {
        // Empty input is rejected before racing, so the outcome does not depend
        // on the cancellation state.
        if greeting.is_empty() {
            return Err(GreeterError::EmptyInput);
        }
        let s = greeting.to_owned();
        execute(async move { s }, cancel, None).await
    }

    async fn expensive(
        &self,
        cancel: &CancellationToken,
        connection: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        require(connection, Field::Connection)?;
        require(username, Field::Username)?;
        require(password, Field::Password)?;

        let status = format!("{connection}{username}{password}");
        execute(async move { status }, cancel, Some(self.expensive_timeout)).await
    }
}
