//! Lowers expression trees into SQL text and positional arguments

use crate::errors::{OrmError, OrmResult};
use crate::model::Model;
use crate::value::Value;

use super::expr::{Column, Expression, Op, Predicate, Selectable};

/// Accumulates SQL for one statement against one model
pub(crate) struct SqlBuilder<'m> {
    model: &'m Model,
    sql: String,
    args: Vec<Value>,
}

impl<'m> SqlBuilder<'m> {
    pub(crate) fn new(model: &'m Model) -> Self {
        Self {
            model,
            sql: String::with_capacity(64),
            args: Vec::new(),
        }
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    /// `*` for an empty list, otherwise quoted columns joined by `,`
    pub(crate) fn build_projection(&mut self, columns: &[Selectable]) -> OrmResult<()> {
        if columns.is_empty() {
            self.sql.push('*');
            return Ok(());
        }
        for (i, selectable) in columns.iter().enumerate() {
            if i != 0 {
                self.sql.push(',');
            }
            match selectable {
                Selectable::Column(c) => self.build_column(c)?,
            }
        }
        Ok(())
    }

    /// Explicit table names are emitted verbatim; the model's is quoted
    pub(crate) fn build_table(&mut self, table: Option<&str>) {
        match table {
            Some(table) => self.sql.push_str(table),
            None => {
                self.sql.push('`');
                self.sql.push_str(self.model.table_name());
                self.sql.push('`');
            }
        }
    }

    pub(crate) fn build_predicate(&mut self, p: &Predicate) -> OrmResult<()> {
        match p.op() {
            Op::Not => match (p.left(), p.right()) {
                (None, Some(right)) => {
                    self.sql.push_str("NOT ");
                    self.build_operand(right)
                }
                _ => Err(OrmError::unsupported_expression(p)),
            },
            Op::And | Op::Or => match (p.left(), p.right()) {
                (Some(left @ Expression::Predicate(_)), Some(right @ Expression::Predicate(_))) => {
                    self.build_operand(left)?;
                    self.push_op(p.op());
                    self.build_operand(right)
                }
                _ => Err(OrmError::unsupported_expression(p)),
            },
            Op::Eq | Op::Lt | Op::Gt => match (p.left(), p.right()) {
                (Some(Expression::Column(c)), Some(right)) => {
                    self.build_column(c)?;
                    self.push_op(p.op());
                    self.build_operand(right)
                }
                _ => Err(OrmError::unsupported_expression(p)),
            },
        }
    }

    fn push_op(&mut self, op: Op) {
        self.sql.push(' ');
        self.sql.push_str(op.as_str());
        self.sql.push(' ');
    }

    /// Nested predicates are parenthesized, columns and values are not
    fn build_operand(&mut self, expr: &Expression) -> OrmResult<()> {
        match expr {
            Expression::Predicate(p) => {
                self.sql.push('(');
                self.build_predicate(p)?;
                self.sql.push(')');
                Ok(())
            }
            Expression::Column(c) => self.build_column(c),
            Expression::Value(v) => {
                self.sql.push('?');
                self.args.push(v.clone());
                Ok(())
            }
        }
    }

    fn build_column(&mut self, c: &Column) -> OrmResult<()> {
        let field = self
            .model
            .field(c.name())
            .ok_or_else(|| OrmError::unknown_field(c.name()))?;
        self.sql.push('`');
        self.sql.push_str(&field.column_name);
        self.sql.push('`');
        Ok(())
    }

    pub(crate) fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }
}
