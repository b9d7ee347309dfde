//! ORM counters
//!
//! - Counters only, monotonic
//! - Atomic, Relaxed ordering; values are exact once writers are done

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by a registry and its `Db`
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Record types parsed into models (cache misses)
    models_parsed: AtomicU64,
    /// Model lookups served from the cache
    model_cache_hits: AtomicU64,
    /// SELECT statements compiled
    queries_built: AtomicU64,
    /// Queries the executor accepted
    queries_executed: AtomicU64,
    /// Queries that failed at build, execution or binding
    queries_failed: AtomicU64,
    /// Rows written into records
    rows_bound: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_models_parsed(&self) {
        self.models_parsed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_model_cache_hits(&self) {
        self.model_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_built(&self) {
        self.queries_built.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_bound(&self, rows: u64) {
        self.rows_bound.fetch_add(rows, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            models_parsed: self.models_parsed.load(Ordering::Relaxed),
            model_cache_hits: self.model_cache_hits.load(Ordering::Relaxed),
            queries_built: self.queries_built.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            rows_bound: self.rows_bound.load(Ordering::Relaxed),
        }
    }

    /// Get current counters as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub models_parsed: u64,
    pub model_cache_hits: u64,
    pub queries_built: u64,
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub rows_bound: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.models_parsed, 0);
        assert_eq!(snapshot.queries_built, 0);
        assert_eq!(snapshot.rows_bound, 0);
    }

    #[test]
    fn test_increment_counters() {
        let metrics = MetricsRegistry::new();
        metrics.increment_models_parsed();
        metrics.increment_model_cache_hits();
        metrics.increment_model_cache_hits();
        metrics.increment_queries_built();
        metrics.increment_queries_executed();
        metrics.increment_queries_failed();
        metrics.add_rows_bound(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.models_parsed, 1);
        assert_eq!(snapshot.model_cache_hits, 2);
        assert_eq!(snapshot.queries_built, 1);
        assert_eq!(snapshot.queries_executed, 1);
        assert_eq!(snapshot.queries_failed, 1);
        assert_eq!(snapshot.rows_bound, 3);
    }

    #[test]
    fn test_to_json() {
        let metrics = MetricsRegistry::new();
        metrics.add_rows_bound(7);
        metrics.increment_queries_built();

        let parsed: serde_json::Value = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(parsed["rows_bound"], 7);
        assert_eq!(parsed["queries_built"], 1);
        assert_eq!(parsed["models_parsed"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let metrics = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let m = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.increment_model_cache_hits();
                        m.add_rows_bound(1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.model_cache_hits, 1000);
        assert_eq!(snapshot.rows_bound, 1000);
    }
}
