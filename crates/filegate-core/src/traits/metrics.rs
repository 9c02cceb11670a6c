//! Metrics port injected into services.
//!
//! Services report what happened; the sink decides where counters live.
//! Keeping this a trait lets tests run without a metrics registry.

/// Receiver for operation and cache counters.
pub trait MetricsSink: Send + Sync + std::fmt::Debug + 'static {
    /// Record the outcome of a service operation (`"ok"`, `"not_found"`, `"error"`, ...).
    fn record_operation(&self, operation: &'static str, outcome: &'static str);

    /// Record a cache lookup and whether it hit.
    fn record_cache_lookup(&self, hit: bool);

    /// Record a cache failure that was swallowed (`"get"`, `"set"`, `"delete"`).
    fn record_cache_failure(&self, operation: &'static str);
}
