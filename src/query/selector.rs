//! SELECT builder
//!
//! A `Selector` is created per logical query, configured fluently and
//! then built or executed. It borrows the `Db` and must not be shared
//! between threads.

use std::marker::PhantomData;

use crate::db::{Db, Executor, Rows};
use crate::errors::{OrmError, OrmResult};
use crate::model::Entity;
use crate::observability::{log_event_with_fields, Event};

use super::builder::SqlBuilder;
use super::expr::{Predicate, Selectable};
use super::{Query, QueryBuilder};

/// Builds and runs a SELECT for records of type `T`
pub struct Selector<'a, T, E> {
    db: &'a Db<E>,
    table: Option<String>,
    predicates: Vec<Predicate>,
    columns: Vec<Selectable>,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: Entity, E: Executor> Selector<'a, T, E> {
    pub fn new(db: &'a Db<E>) -> Self {
        Self {
            db,
            table: None,
            predicates: Vec::new(),
            columns: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Read from `table` instead of the model's table
    ///
    /// The name is emitted verbatim. An empty string clears the override.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        self.table = if table.is_empty() { None } else { Some(table) };
        self
    }

    /// Set the WHERE predicates; several are combined with AND
    pub fn where_(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates = predicates.into_iter().collect();
        self
    }

    /// Set the projected columns; none means `*`
    pub fn select<S: Into<Selectable>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    fn compile(&self) -> OrmResult<Query> {
        let model = self.db.registry().get::<T>()?;
        let mut sb = SqlBuilder::new(&model);

        sb.push_str("SELECT ");
        sb.build_projection(&self.columns)?;
        sb.push_str(" FROM ");
        sb.build_table(self.table.as_deref());

        let mut predicates = self.predicates.iter().cloned();
        if let Some(first) = predicates.next() {
            let folded = predicates.fold(first, Predicate::and);
            sb.push_str(" WHERE ");
            sb.build_predicate(&folded)?;
        }

        sb.push_str(";");
        let (sql, args) = sb.finish();
        Ok(Query { sql, args })
    }

    /// Execute and bind the first row
    ///
    /// Fails with `ORM_NO_ROWS` when the result is empty. Trailing rows
    /// are left unread.
    pub fn get(&self) -> OrmResult<T> {
        self.run(|db, rows| {
            if !rows.advance() {
                log_event_with_fields(Event::NoRows, &[("type", std::any::type_name::<T>())]);
                return Err(OrmError::no_rows());
            }
            let record = db.bind_row::<T, _>(rows)?;
            db.metrics().add_rows_bound(1);
            Ok(record)
        })
    }

    /// Execute and bind every row
    pub fn get_multi(&self) -> OrmResult<Vec<T>> {
        self.run(|db, rows| {
            let mut records = Vec::new();
            while rows.advance() {
                records.push(db.bind_row::<T, _>(rows)?);
            }
            db.metrics().add_rows_bound(records.len() as u64);
            let count = records.len().to_string();
            log_event_with_fields(Event::RowsBound, &[("rows", count.as_str())]);
            Ok(records)
        })
    }

    fn run<R>(
        &self,
        bind: impl FnOnce(&Db<E>, &mut E::Rows) -> OrmResult<R>,
    ) -> OrmResult<R> {
        let result = self.build().and_then(|query| {
            let mut rows = self.db.executor().query(&query.sql, &query.args)?;
            self.db.metrics().increment_queries_executed();
            log_event_with_fields(Event::QueryExecuted, &[("sql", query.sql.as_str())]);
            bind(self.db, &mut rows)
        });

        if let Err(ref err) = result {
            if !err.is_no_rows() {
                self.db.metrics().increment_queries_failed();
                log_event_with_fields(
                    Event::QueryFailed,
                    &[("code", err.code().code()), ("message", err.message())],
                );
            }
        }
        result
    }
}

impl<T: Entity, E: Executor> QueryBuilder for Selector<'_, T, E> {
    fn build(&self) -> OrmResult<Query> {
        let query = self.compile()?;
        self.db.metrics().increment_queries_built();
        log_event_with_fields(Event::QueryBuilt, &[("sql", query.sql.as_str())]);
        Ok(query)
    }
}
