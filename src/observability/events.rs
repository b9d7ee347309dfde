//! Observable ORM events
//!
//! Events are explicit and typed; the logger only ever sees their
//! string form.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and applied
    ConfigLoaded,

    // Model registry
    /// A record type was parsed into a model
    ModelParsed,
    /// A model was registered with explicit options
    ModelRegistered,

    // Query operations
    /// SELECT compiled
    QueryBuilt,
    /// Executor returned a cursor
    QueryExecuted,
    /// Build, execution or binding failed
    QueryFailed,
    /// Single-row fetch found nothing
    NoRows,
    /// Rows written into records
    RowsBound,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ModelParsed => "MODEL_PARSED",
            Event::ModelRegistered => "MODEL_REGISTERED",
            Event::QueryBuilt => "QUERY_BUILT",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::NoRows => "NO_ROWS",
            Event::RowsBound => "ROWS_BOUND",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::QueryFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
