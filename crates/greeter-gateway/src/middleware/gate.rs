//! Single-invocation gate for the expensive operation.
//!
//! The first caller to arrive wins a compare-and-swap on the gate state and
//! runs the wrapped call. Every other caller, concurrent or later, gets
//! `ALREADY_INITIALIZED` immediately without waiting for the winner and
//! without its arguments being looked at. This holds even when the first call
//! failed or is still in flight. `greet` passes through.

use std::sync::atomic::{AtomicU8, Ordering};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use greeter_core::error::Result;

use crate::service::{GreetingService, SharedService, ALREADY_INITIALIZED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GateState {
    NotStarted = 0,
    InProgress = 1,
    Completed = 2,
}

impl GateState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => GateState::NotStarted,
            1 => GateState::InProgress,
            _ => GateState::Completed,
        }
    }
}

/// Marks the gate completed when the winning call ends, including when its
/// future is dropped mid-flight.
struct CompleteOnDrop<'a>(&'a AtomicU8);

impl Drop for CompleteOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(GateState::Completed as u8, Ordering::Release);
    }
}

pub struct OnceGate {
    state: AtomicU8,
    next: SharedService,
}

impl OnceGate {
    pub fn new(next: SharedService) -> Self {
        Self {
            state: AtomicU8::new(GateState::NotStarted as u8),
            next,
        }
    }

    pub fn state(&self) -> GateState {
        GateState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn try_enter(&self) -> Option<CompleteOnDrop<'_>> {
        self.state
            .compare_exchange(
                GateState::NotStarted as u8,
                GateState::InProgress as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| CompleteOnDrop(&self.state))
    }
}

#[async_trait]
impl GreetingService for OnceGate {
    async fn greet(&self, cancel: &CancellationToken, greeting: &str) -> Result<String> {
        self.next.greet(cancel, greeting).await
    }

    async fn expensive(
        &self,
        cancel: &CancellationToken,
        connection: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let Some(_done) = self.try_enter() else {
            return Ok(ALREADY_INITIALIZED.to_string());
        };

        tracing::info!("expensive gate opened; running initialization once");
        self.next
            .expensive(cancel, connection, username, password)
            .await
    }
}
