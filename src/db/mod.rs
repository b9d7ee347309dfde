//! Database handle
//!
//! `Db` ties together the model registry, the executor and the valuer
//! strategy. It is the entry point for building queries:
//!
//! ```ignore
//! let db = Db::new(executor);
//! let user: User = db
//!     .selector::<User>()
//!     .where_([col("age").gt(18)])
//!     .get()?;
//! ```
//!
//! Several handles may share one registry through `Db::with_registry`.

mod config;
mod executor;
pub mod mock;

pub use config::{ConfigError, ConfigResult, OrmConfig};
pub use executor::{Executor, Rows};

use std::sync::Arc;

use crate::errors::OrmResult;
use crate::model::{Entity, Registry};
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry};
use crate::query::Selector;
use crate::valuer::ValuerKind;

/// Handle over an executor
#[derive(Debug)]
pub struct Db<E> {
    registry: Arc<Registry>,
    executor: E,
    valuer: ValuerKind,
}

impl<E: Executor> Db<E> {
    /// Create a handle with a fresh registry and the default valuer
    pub fn new(executor: E) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            executor,
            valuer: ValuerKind::default(),
        }
    }

    /// Create a handle and apply `config`
    ///
    /// The valuer applies to this handle only. The log level is
    /// process-wide: it changes logging for every `Db` in the process
    /// and the last call wins.
    pub fn from_config(executor: E, config: &OrmConfig) -> Self {
        Logger::set_min_severity(config.log_level);
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("log_level", config.log_level.as_str()),
                ("valuer", config.valuer.as_str()),
            ],
        );
        Self::new(executor).with_valuer(config.valuer)
    }

    /// Use a shared registry
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Use a different binding strategy
    pub fn with_valuer(mut self, valuer: ValuerKind) -> Self {
        self.valuer = valuer;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn valuer(&self) -> ValuerKind {
        self.valuer
    }

    /// Metrics of the underlying registry
    pub fn metrics(&self) -> &MetricsRegistry {
        self.registry.metrics()
    }

    /// Start a SELECT for records of type `T`
    pub fn selector<T: Entity>(&self) -> Selector<'_, T, E> {
        Selector::new(self)
    }

    /// Bind the current row of `rows` into a fresh `T`
    pub(crate) fn bind_row<T: Entity, R: Rows + ?Sized>(&self, rows: &mut R) -> OrmResult<T> {
        let model = self.registry.get::<T>()?;
        let mut record = T::default();
        self.valuer.bind(&mut record, &model, rows)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockExecutor, MockRows};
    use super::*;
    use crate::observability::Severity;

    #[test]
    fn test_defaults() {
        let db = Db::new(MockExecutor::new());
        assert_eq!(db.valuer(), ValuerKind::Unsafe);
        assert!(db.registry().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = OrmConfig {
            valuer: ValuerKind::Reflect,
            log_level: Severity::Error,
        };
        let db = Db::from_config(MockExecutor::new(), &config);
        assert_eq!(db.valuer(), ValuerKind::Reflect);
    }

    #[test]
    fn test_shared_registry() {
        let registry = Arc::new(Registry::new());
        let a = Db::new(MockExecutor::new()).with_registry(Arc::clone(&registry));
        let b = Db::new(MockExecutor::new()).with_registry(Arc::clone(&registry));
        assert!(Arc::ptr_eq(a.registry(), b.registry()));
        assert!(std::ptr::eq(a.metrics(), b.metrics()));
    }

    #[test]
    fn test_executor_is_reachable() {
        let db = Db::new(MockExecutor::new());
        db.executor().expect_rows(MockRows::new(["id"]));
        assert_eq!(db.executor().pending(), 1);
    }
}
