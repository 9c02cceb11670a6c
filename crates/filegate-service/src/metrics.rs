//! Metrics sinks injected into the file service.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use filegate_core::traits::metrics::MetricsSink;

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record_operation(&self, _operation: &'static str, _outcome: &'static str) {}

    fn record_cache_lookup(&self, _hit: bool) {}

    fn record_cache_failure(&self, _operation: &'static str) {}
}

/// Process-local counters, exposed through `/health/detailed`.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_failures: AtomicU64,
    /// `"<operation>.<outcome>"` → count.
    operations: Mutex<BTreeMap<String, u64>>,
}

/// Point-in-time copy of [`InMemoryMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Cache lookups that returned an entry.
    pub cache_hits: u64,
    /// Cache lookups that returned nothing.
    pub cache_misses: u64,
    /// Cache calls that failed and were swallowed.
    pub cache_failures: u64,
    /// Operation outcomes keyed by `"<operation>.<outcome>"`.
    pub operations: BTreeMap<String, u64>,
}

impl InMemoryMetrics {
    /// Create a sink with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let operations = self
            .operations
            .lock()
            .map(|ops| ops.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
        MetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_failures: self.cache_failures.load(Ordering::Relaxed),
            operations,
        }
    }
}

impl MetricsSink for InMemoryMetrics {
    fn record_operation(&self, operation: &'static str, outcome: &'static str) {
        let mut ops = self
            .operations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *ops.entry(format!("{operation}.{outcome}")).or_default() += 1;
    }

    fn record_cache_lookup(&self, hit: bool) {
        let counter = if hit {
            &self.cache_hits
        } else {
            &self.cache_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cache_failure(&self, _operation: &'static str) {
        self.cache_failures.fetch_add(1, Ordering::Relaxed);
    }
}
