//! Predicate expression tree
//!
//! A predicate reads as `left op right`:
//!
//! - comparisons: left is a column, right is any expression (usually a value)
//! - NOT: no left operand, right is the negated predicate
//! - AND / OR: both sides are predicates
//!
//! The fluent constructors can only produce well-formed trees.
//! `Predicate::new` accepts any shape; the compiler rejects malformed
//! ones with `ORM_UNSUPPORTED_EXPRESSION_TYPE`.

use std::fmt;
use std::ops;

use chrono::{DateTime, Utc};

use crate::value::Value;

/// Predicate operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Lt,
    Gt,
    And,
    Or,
    Not,
}

impl Op {
    /// Returns the SQL spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::And => "AND",
            Op::Or => "OR",
            Op::Not => "NOT",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node of the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Column(Column),
    /// Literal, compiled to a `?` placeholder
    Value(Value),
    Predicate(Box<Predicate>),
}

/// A reference to a record field by its Rust identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
}

/// Shorthand for `Column::new`
pub fn col(name: impl Into<String>) -> Column {
    Column::new(name)
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Field identifier this column refers to
    pub fn name(&self) -> &str {
        &self.name
    }

    fn compare(self, op: Op, arg: impl IntoExpression) -> Predicate {
        Predicate {
            left: Some(Expression::Column(self)),
            op,
            right: Some(arg.into_expression()),
        }
    }

    /// `col("id").eq(12)`
    pub fn eq(self, arg: impl IntoExpression) -> Predicate {
        self.compare(Op::Eq, arg)
    }

    pub fn lt(self, arg: impl IntoExpression) -> Predicate {
        self.compare(Op::Lt, arg)
    }

    pub fn gt(self, arg: impl IntoExpression) -> Predicate {
        self.compare(Op::Gt, arg)
    }
}

/// A query condition
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    left: Option<Expression>,
    op: Op,
    right: Option<Expression>,
}

impl Predicate {
    /// Build a predicate from raw parts without shape checks
    pub fn new(left: Option<Expression>, op: Op, right: Option<Expression>) -> Self {
        Self { left, op, right }
    }

    pub fn left(&self) -> Option<&Expression> {
        self.left.as_ref()
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn right(&self) -> Option<&Expression> {
        self.right.as_ref()
    }

    pub fn and(self, right: Predicate) -> Predicate {
        Self::combine(self, Op::And, right)
    }

    pub fn or(self, right: Predicate) -> Predicate {
        Self::combine(self, Op::Or, right)
    }

    fn combine(left: Predicate, op: Op, right: Predicate) -> Predicate {
        Predicate {
            left: Some(Expression::Predicate(Box::new(left))),
            op,
            right: Some(Expression::Predicate(Box::new(right))),
        }
    }
}

/// Negate a predicate
pub fn not(p: Predicate) -> Predicate {
    Predicate {
        left: None,
        op: Op::Not,
        right: Some(Expression::Predicate(Box::new(p))),
    }
}

impl ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        not(self)
    }
}

/// Something that can appear in a SELECT list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selectable {
    Column(Column),
}

impl From<Column> for Selectable {
    fn from(c: Column) -> Self {
        Selectable::Column(c)
    }
}

/// Right-hand side of a comparison
///
/// Expressions are used as-is; any other value becomes a literal.
pub trait IntoExpression {
    fn into_expression(self) -> Expression;
}

impl IntoExpression for Expression {
    fn into_expression(self) -> Expression {
        self
    }
}

impl IntoExpression for Column {
    fn into_expression(self) -> Expression {
        Expression::Column(self)
    }
}

impl IntoExpression for Predicate {
    fn into_expression(self) -> Expression {
        Expression::Predicate(Box::new(self))
    }
}

impl IntoExpression for Value {
    fn into_expression(self) -> Expression {
        Expression::Value(self)
    }
}

macro_rules! literal_expression {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoExpression for $ty {
                fn into_expression(self) -> Expression {
                    Expression::Value(Value::from(self))
                }
            }
        )*
    };
}

literal_expression!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    &str,
    Vec<u8>,
    DateTime<Utc>,
);

impl<T: Into<Value>> IntoExpression for Option<T> {
    fn into_expression(self) -> Expression {
        Expression::Value(Value::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_wraps_literal() {
        let p = col("Age").gt(18);
        assert_eq!(p.op(), Op::Gt);
        assert_eq!(p.left(), Some(&Expression::Column(col("Age"))));
        assert_eq!(p.right(), Some(&Expression::Value(Value::Int(18))));
    }

    #[test]
    fn test_expression_used_as_is() {
        let p = col("first_name").eq(col("last_name"));
        assert_eq!(p.right(), Some(&Expression::Column(col("last_name"))));

        let v = col("age").eq(Value::Null);
        assert_eq!(v.right(), Some(&Expression::Value(Value::Null)));
    }

    #[test]
    fn test_not_has_no_left() {
        let p = not(col("age").gt(18));
        assert_eq!(p.op(), Op::Not);
        assert!(p.left().is_none());
        assert!(matches!(p.right(), Some(Expression::Predicate(_))));
        assert_eq!(!col("age").gt(18), p);
    }

    #[test]
    fn test_and_or() {
        let p = col("age").gt(18).and(col("age").lt(35));
        assert_eq!(p.op(), Op::And);
        assert!(matches!(p.left(), Some(Expression::Predicate(_))));
        assert!(matches!(p.right(), Some(Expression::Predicate(_))));

        let p = col("age").gt(18).or(col("age").lt(35));
        assert_eq!(p.op(), Op::Or);
    }

    #[test]
    fn test_op_strings() {
        assert_eq!(Op::Eq.as_str(), "=");
        assert_eq!(Op::Not.to_string(), "NOT");
    }
}
