//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Typed events
//! - Atomic counters
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes a query result
//! 2. Logging failures are swallowed
//! 3. No background threads
//!
//! # Usage
//!
//! ```ignore
//! use tinyorm::observability::{Event, Logger, MetricsRegistry};
//!
//! log_event_with_fields(Event::QueryBuilt, &[("sql", "SELECT * FROM `user`;")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_queries_built();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event with fields at its natural severity
///
/// Failures are logged at WARN, everything else at TRACE.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Trace
    };
    Logger::log(severity, event.as_str(), fields);
}
