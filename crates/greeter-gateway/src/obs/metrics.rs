//! Minimal metrics registry for the service.
//!
//! No metrics crate is used; this module provides counter and summary types
//! with dynamic labels backed by `DashMap`. Labels are flattened into sorted
//! key vectors to keep deterministic ordering. Latencies are recorded as
//! integer microseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::schema::MetricsSection;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str(r.key()), val);
        }
    }
}

#[derive(Default)]
struct AtomicSummary {
    count: AtomicU64,
    sum: AtomicU64,
}

/// Summary without quantiles: `_sum` and `_count` per label set.
#[derive(Default)]
pub struct SummaryVec {
    map: DashMap<Vec<(String, String)>, AtomicSummary>,
}

impl SummaryVec {
    /// Observe a duration (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let summary = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicSummary::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        summary.count.fetch_add(1, Ordering::Relaxed);
        summary.sum.fetch_add(micros, Ordering::Relaxed);
    }

    /// Number of observations recorded for one series.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|s| s.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format (unit: microseconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} summary", name);
        for r in self.map.iter() {
            let labels = label_str(r.key());
            let summary = r.value();
            let sum = summary.sum.load(Ordering::Relaxed);
            let count = summary.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

/// Request metrics recorded by the instrumenting decorator.
pub struct ServiceMetrics {
    pub request_count: CounterVec,
    pub request_latency: SummaryVec,
    count_name: String,
    latency_name: String,
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new(&MetricsSection::default())
    }
}

impl ServiceMetrics {
    pub fn new(cfg: &MetricsSection) -> Self {
        let prefix = [cfg.namespace.as_str(), cfg.subsystem.as_str()]
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{p}_"))
            .collect::<String>();
        Self {
            request_count: CounterVec::default(),
            request_latency: SummaryVec::default(),
            count_name: format!("{prefix}request_count"),
            latency_name: format!("{prefix}request_latency_microseconds"),
        }
    }

    /// Fully-qualified counter name.
    pub fn count_name(&self) -> &str {
        &self.count_name
    }

    /// Fully-qualified latency summary name.
    pub fn latency_name(&self) -> &str {
        &self.latency_name
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.request_count
            .render(&self.count_name, "Number of requests received.", &mut out);
        self.request_latency.render(
            &self.latency_name,
            "Total duration of requests in microseconds.",
            &mut out,
        );
        out
    }
}
