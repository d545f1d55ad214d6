//! Lightweight in-process metrics (dependency-free).
//!
//! Request counters and latency summaries are stored as atomics and rendered by
//! the `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::{CounterVec, ServiceMetrics, SummaryVec};
