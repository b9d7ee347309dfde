//! Executor boundary
//!
//! The ORM never opens connections, manages pools or retries. A driver
//! adapter implements `Executor` and hands back a `Rows` cursor; every
//! error it reports is surfaced to the caller unchanged (wrap foreign
//! errors with `OrmError::driver`).

use crate::errors::OrmResult;
use crate::value::Value;

/// Runs a statement and returns a cursor over its result
pub trait Executor {
    type Rows: Rows;

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Self::Rows>;
}

/// A forward-only result cursor
pub trait Rows {
    /// Column names of the result, in order
    fn columns(&self) -> OrmResult<Vec<String>>;

    /// Move to the next row; false when the result is exhausted
    fn advance(&mut self) -> bool;

    /// Values of the current row, in column order
    fn scan(&mut self) -> OrmResult<Vec<Value>>;
}

impl<E: Executor + ?Sized> Executor for &E {
    type Rows = E::Rows;

    fn query(&self, sql: &str, args: &[Value]) -> OrmResult<Self::Rows> {
        (**self).query(sql, args)
    }
}
