//! Model and field metadata

use std::any::TypeId;
use std::collections::HashMap;

use crate::errors::{OrmError, OrmResult};
use crate::value::FieldType;

use super::reflect::FieldWriter;

/// Metadata for one record field mapped to one column
#[derive(Debug, Clone)]
pub struct Field {
    /// Column name, never empty
    pub column_name: String,
    /// Rust field identifier
    pub field_name: String,
    pub field_type: FieldType,
    /// Byte offset inside the record, used by the unsafe valuer
    pub offset: usize,
    pub(crate) writer: FieldWriter,
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.column_name == other.column_name
            && self.field_name == other.field_name
            && self.field_type == other.field_type
            && self.offset == other.offset
    }
}

/// Table and column metadata for one record type
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    type_id: TypeId,
    type_name: &'static str,
    table_name: String,
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
    by_column: HashMap<String, usize>,
}

impl Model {
    /// Build a model, rejecting duplicated column names
    pub(crate) fn new(
        type_id: TypeId,
        type_name: &'static str,
        table_name: String,
        fields: Vec<Field>,
    ) -> OrmResult<Self> {
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut by_column = HashMap::with_capacity(fields.len());

        for (idx, field) in fields.iter().enumerate() {
            by_name.insert(field.field_name.clone(), idx);
            if let Some(prev) = by_column.insert(field.column_name.clone(), idx) {
                return Err(OrmError::invalid_column(
                    field.column_name.clone(),
                    format!(
                        "used by both '{}' and '{}'",
                        fields[prev].field_name, field.field_name
                    ),
                ));
            }
        }

        Ok(Self {
            type_id,
            type_name,
            table_name,
            fields,
            by_name,
            by_column,
        })
    }

    /// Returns the `TypeId` of the described struct
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the Rust type name of the described struct
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field by its Rust identifier
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Look up a field by its column name
    pub fn field_by_column(&self, column: &str) -> Option<&Field> {
        self.by_column.get(column).map(|&idx| &self.fields[idx])
    }

    pub(crate) fn set_table_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.table_name = name.to_string();
        }
    }

    pub(crate) fn set_column_name(&mut self, field: &str, column: &str) -> OrmResult<()> {
        let idx = *self
            .by_name
            .get(field)
            .ok_or_else(|| OrmError::unknown_field(field))?;

        if column.is_empty() {
            return Err(OrmError::invalid_column(column, "column name is empty"));
        }
        match self.by_column.get(column) {
            Some(&other) if other != idx => {
                return Err(OrmError::invalid_column(
                    column,
                    format!("already used by '{}'", self.fields[other].field_name),
                ));
            }
            _ => {}
        }

        let old = std::mem::replace(&mut self.fields[idx].column_name, column.to_string());
        self.by_column.remove(&old);
        self.by_column.insert(column.to_string(), idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OrmErrorCode;
    use crate::model::write_field;

    fn field(name: &str, column: &str, offset: usize) -> Field {
        Field {
            column_name: column.into(),
            field_name: name.into(),
            field_type: FieldType::Int64,
            offset,
            writer: write_field::<i64>,
        }
    }

    fn model() -> Model {
        Model::new(
            TypeId::of::<()>(),
            "Pair",
            "pair".into(),
            vec![field("left", "left", 0), field("right", "right", 8)],
        )
        .unwrap()
    }

    #[test]
    fn test_lookups() {
        let m = model();
        assert_eq!(m.field_count(), 2);
        assert_eq!(m.field("left").unwrap().column_name, "left");
        assert_eq!(m.field_by_column("right").unwrap().field_name, "right");
        assert!(m.field("missing").is_none());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Model::new(
            TypeId::of::<()>(),
            "Pair",
            "pair".into(),
            vec![field("left", "same", 0), field("right", "same", 8)],
        )
        .unwrap_err();
        assert_eq!(err.code(), OrmErrorCode::InvalidColumn);
        assert_eq!(err.subject(), Some("same"));
    }

    #[test]
    fn test_set_column_name_updates_column_map() {
        let mut m = model();
        m.set_column_name("left", "left_t").unwrap();
        assert_eq!(m.field("left").unwrap().column_name, "left_t");
        assert!(m.field_by_column("left").is_none());
        assert_eq!(m.field_by_column("left_t").unwrap().field_name, "left");
    }

    #[test]
    fn test_set_column_name_errors() {
        let mut m = model();
        assert_eq!(
            m.set_column_name("missing", "x").unwrap_err().code(),
            OrmErrorCode::UnknownField
        );
        assert_eq!(
            m.set_column_name("left", "").unwrap_err().code(),
            OrmErrorCode::InvalidColumn
        );
        assert_eq!(
            m.set_column_name("left", "right").unwrap_err().code(),
            OrmErrorCode::InvalidColumn
        );
        // Renaming to its own column is a no-op
        m.set_column_name("left", "left").unwrap();
    }

    #[test]
    fn test_empty_table_name_keeps_current() {
        let mut m = model();
        m.set_table_name("");
        assert_eq!(m.table_name(), "pair");
        m.set_table_name("pair_t");
        assert_eq!(m.table_name(), "pair_t");
    }
}
