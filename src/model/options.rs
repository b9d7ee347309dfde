//! Explicit model overrides applied by `Registry::register`

use crate::errors::OrmResult;

use super::types::Model;

/// One override applied to a freshly parsed model, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOption {
    /// Replace the table name; empty keeps the parsed name
    TableName(String),
    /// Replace the column name of a field
    ColumnName { field: String, column: String },
}

impl ModelOption {
    pub fn table_name(name: impl Into<String>) -> Self {
        ModelOption::TableName(name.into())
    }

    pub fn column_name(field: impl Into<String>, column: impl Into<String>) -> Self {
        ModelOption::ColumnName {
            field: field.into(),
            column: column.into(),
        }
    }

    pub(crate) fn apply(&self, model: &mut Model) -> OrmResult<()> {
        match self {
            ModelOption::TableName(name) => {
                model.set_table_name(name);
                Ok(())
            }
            ModelOption::ColumnName { field, column } => model.set_column_name(field, column),
        }
    }
}
