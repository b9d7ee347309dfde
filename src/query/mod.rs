//! Query subsystem
//!
//! Predicates are built as typed trees and compiled into parameterized
//! SQL. Building and executing are separate steps: `QueryBuilder::build`
//! is pure, `Selector::get` runs it against the executor.
//!
//! # Compilation rules
//!
//! - Literals become `?` placeholders, arguments follow traversal order
//! - Columns are resolved by field identifier, never by column name
//! - Multiple `where_` predicates are folded left-to-right with AND
//! - Nested predicates are parenthesized

mod builder;
mod expr;
mod selector;

pub use expr::{col, not, Column, Expression, IntoExpression, Op, Predicate, Selectable};
pub use selector::Selector;

use crate::errors::OrmResult;
use crate::value::Value;

/// A compiled statement
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Query {
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}

/// Produces a compiled statement without touching the executor
pub trait QueryBuilder {
    fn build(&self) -> OrmResult<Query>;
}
