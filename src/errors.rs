//! ORM error types
//!
//! Error codes:
//! - ORM_POINTER_ONLY (REJECT)
//! - ORM_INVALID_TAG (REJECT)
//! - ORM_INVALID_COLUMN (REJECT)
//! - ORM_UNKNOWN_FIELD (REJECT)
//! - ORM_UNKNOWN_COLUMN (ERROR)
//! - ORM_TOO_MANY_RETURNED_COLUMNS (ERROR)
//! - ORM_UNSUPPORTED_EXPRESSION_TYPE (REJECT)
//! - ORM_NO_ROWS (ERROR)
//! - ORM_TYPE_MISMATCH (ERROR)
//! - ORM_MODEL_MISMATCH (REJECT)
//! - ORM_DRIVER (ERROR)
//!
//! Every error is terminal. Nothing in the core retries or recovers;
//! callers decide whether e.g. `ORM_NO_ROWS` is expected.

use std::fmt;

/// Severity levels for ORM errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller handed the ORM something it cannot accept
    Reject,
    /// Execution or binding failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// ORM error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrmErrorCode {
    /// Record type is not a struct (or boxed struct)
    PointerOnly,
    /// Malformed `orm` tag segment
    InvalidTag,
    /// Empty or duplicated column name
    InvalidColumn,
    /// Referenced field is not part of the model
    UnknownField,
    /// Result set column is not part of the model
    UnknownColumn,
    /// Result set is wider than the model
    TooManyReturnedColumns,
    /// Expression tree node the compiler cannot lower
    UnsupportedExpressionType,
    /// Single-row fetch returned nothing
    NoRows,
    /// Column value cannot be converted into the field type
    TypeMismatch,
    /// Model does not describe the record being bound
    ModelMismatch,
    /// Failure surfaced by the executor or its cursor
    Driver,
}

impl OrmErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            OrmErrorCode::PointerOnly => "ORM_POINTER_ONLY",
            OrmErrorCode::InvalidTag => "ORM_INVALID_TAG",
            OrmErrorCode::InvalidColumn => "ORM_INVALID_COLUMN",
            OrmErrorCode::UnknownField => "ORM_UNKNOWN_FIELD",
            OrmErrorCode::UnknownColumn => "ORM_UNKNOWN_COLUMN",
            OrmErrorCode::TooManyReturnedColumns => "ORM_TOO_MANY_RETURNED_COLUMNS",
            OrmErrorCode::UnsupportedExpressionType => "ORM_UNSUPPORTED_EXPRESSION_TYPE",
            OrmErrorCode::NoRows => "ORM_NO_ROWS",
            OrmErrorCode::TypeMismatch => "ORM_TYPE_MISMATCH",
            OrmErrorCode::ModelMismatch => "ORM_MODEL_MISMATCH",
            OrmErrorCode::Driver => "ORM_DRIVER",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            OrmErrorCode::PointerOnly
            | OrmErrorCode::InvalidTag
            | OrmErrorCode::InvalidColumn
            | OrmErrorCode::UnknownField
            | OrmErrorCode::UnsupportedExpressionType
            | OrmErrorCode::ModelMismatch => Severity::Reject,
            OrmErrorCode::UnknownColumn
            | OrmErrorCode::TooManyReturnedColumns
            | OrmErrorCode::NoRows
            | OrmErrorCode::TypeMismatch
            | OrmErrorCode::Driver => Severity::Error,
        }
    }
}

impl fmt::Display for OrmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// ORM error with the offending field, column, segment or type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrmError {
    code: OrmErrorCode,
    message: String,
    subject: Option<String>,
}

impl OrmError {
    fn new(code: OrmErrorCode, message: String, subject: Option<String>) -> Self {
        Self {
            code,
            message,
            subject,
        }
    }

    /// Create a pointer-only error for a non-struct record type
    pub fn pointer_only(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self::new(
            OrmErrorCode::PointerOnly,
            format!(
                "only structs or boxed structs can be mapped, got {}",
                kind
            ),
            Some(kind),
        )
    }

    /// Create an invalid tag error naming the malformed segment
    pub fn invalid_tag(segment: impl Into<String>) -> Self {
        let segment = segment.into();
        Self::new(
            OrmErrorCode::InvalidTag,
            format!("invalid tag segment '{}'", segment),
            Some(segment),
        )
    }

    /// Create an invalid column error
    pub fn invalid_column(column: impl Into<String>, reason: impl fmt::Display) -> Self {
        let column = column.into();
        Self::new(
            OrmErrorCode::InvalidColumn,
            format!("invalid column '{}': {}", column, reason),
            Some(column),
        )
    }

    /// Create an unknown field error
    ///
    /// Usually means a column name was passed where a field name was expected.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            OrmErrorCode::UnknownField,
            format!("unknown field '{}'", field),
            Some(field),
        )
    }

    /// Create an unknown column error
    pub fn unknown_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::new(
            OrmErrorCode::UnknownColumn,
            format!("unknown column '{}'", column),
            Some(column),
        )
    }

    /// Create a too-many-columns error
    pub fn too_many_returned_columns(returned: usize, fields: usize) -> Self {
        Self::new(
            OrmErrorCode::TooManyReturnedColumns,
            format!(
                "result set has {} columns but the model has {} fields",
                returned, fields
            ),
            None,
        )
    }

    /// Create an unsupported expression error
    pub fn unsupported_expression(expr: impl fmt::Debug) -> Self {
        let rendered = format!("{:?}", expr);
        Self::new(
            OrmErrorCode::UnsupportedExpressionType,
            format!("unsupported expression {}", rendered),
            Some(rendered),
        )
    }

    /// Create a no-rows error
    pub fn no_rows() -> Self {
        Self::new(OrmErrorCode::NoRows, "no rows in result set".into(), None)
    }

    /// Create a type mismatch error for a conversion into `expected`
    pub fn type_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::new(
            OrmErrorCode::TypeMismatch,
            format!("cannot convert {} into {}", found, expected),
            None,
        )
    }

    /// Create a model mismatch error
    pub fn model_mismatch(model: &str, record: &str) -> Self {
        Self::new(
            OrmErrorCode::ModelMismatch,
            format!("model '{}' does not describe record '{}'", model, record),
            Some(record.to_string()),
        )
    }

    /// Create a driver error from anything the executor reports
    pub fn driver(reason: impl fmt::Display) -> Self {
        Self::new(OrmErrorCode::Driver, reason.to_string(), None)
    }

    /// Attach the column a binding error happened on
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.message = format!("column '{}': {}", column, self.message);
        self.subject = Some(column);
        self
    }

    /// Returns the error code
    pub fn code(&self) -> OrmErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field, column, segment or type if known
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns true if this is a `ORM_NO_ROWS` error
    pub fn is_no_rows(&self) -> bool {
        self.code == OrmErrorCode::NoRows
    }
}

impl fmt::Display for OrmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for OrmError {}

/// Result type for ORM operations
pub type OrmResult<T> = Result<T, OrmError>;
