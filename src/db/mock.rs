//! Scripted in-memory executor for tests
//!
//! Each call to `query` pops the next scripted result. Every executed
//! statement is recorded so tests can assert on SQL and arguments.
//!
//! ```ignore
//! let mock = MockExecutor::new();
//! mock.expect_rows(MockRows::new(["id", "first_name"]).row([1.into(), "Tom".into()]));
//! let db = Db::new(mock);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::{OrmError, OrmResult};
use crate::query::Query;
use crate::value::Value;

use super::executor::{Executor, Rows};

enum Scripted {
    Rows(MockRows),
    Error(OrmError),
}

/// An `Executor` returning scripted results in order
#[derive(Default)]
pub struct MockExecutor {
    script: Mutex<VecDeque<Scripted>>,
    executed: Mutex<Vec<Query>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result set
    pub fn expect_rows(&self, rows: MockRows) -> &Self {
        self.push(Scripted::Rows(rows));
        self
    }

    /// Queue an executor failure
    pub fn expect_error(&self, err: OrmError) -> &Self {
        self.push(Scripted::Error(err));
        self
    }

    /// Statements executed so far
    pub fn executed(&self) -> Vec<Query> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of scripted results not yet consumed
    pub fn pending(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(&self, scripted: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(scripted);
    }
}

impl Executor for MockExecutor {
    type Rows = MockRows;

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<MockRows> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Query::new(sql, args.to_vec()));

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(Scripted::Rows(rows)) => Ok(rows),
            Some(Scripted::Error(err)) => Err(err),
            None => Err(OrmError::driver(format!("unexpected query: {}", sql))),
        }
    }
}

/// A scripted result set
///
/// Clones share the pending rows, so a test can keep a clone and check
/// how far the cursor handed to the executor was advanced.
#[derive(Debug, Clone, Default)]
pub struct MockRows {
    columns: Vec<String>,
    rows: Arc<Mutex<VecDeque<Vec<Value>>>>,
    current: Option<Vec<Value>>,
}

impl MockRows {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Arc::default(),
            current: None,
        }
    }

    /// Append a row
    pub fn row(self, values: impl IntoIterator<Item = Value>) -> Self {
        self.pending().push_back(values.into_iter().collect());
        self
    }

    /// Rows not yet advanced over
    pub fn remaining(&self) -> usize {
        self.pending().len()
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<Vec<Value>>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Rows for MockRows {
    fn columns(&self) -> OrmResult<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> bool {
        let next = self.pending().pop_front();
        self.current = next;
        self.current.is_some()
    }

    fn scan(&mut self) -> OrmResult<Vec<Value>> {
        self.current
            .clone()
            .ok_or_else(|| OrmError::driver("scan called without a current row"))
    }
}
