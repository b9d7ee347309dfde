//! Valuer that assigns fields by identifier

use crate::db::Rows;
use crate::errors::OrmResult;
use crate::model::{Model, Reflect};

use super::{check_model, read_row, Valuer};

/// Binds rows through `Reflect::set_field`
pub struct ReflectValue<'a, T> {
    target: &'a mut T,
    model: &'a Model,
}

impl<'a, T: Reflect> ReflectValue<'a, T> {
    /// Wrap `target`; `model` must describe `T`
    pub fn new(target: &'a mut T, model: &'a Model) -> OrmResult<Self> {
        check_model::<T>(model)?;
        Ok(Self { target, model })
    }
}

impl<T: Reflect> Valuer for ReflectValue<'_, T> {
    fn set_columns<R: Rows + ?Sized>(&mut self, rows: &mut R) -> OrmResult<()> {
        for (field, value) in read_row(self.model, rows)? {
            self.target
                .set_field(&field.field_name, value)
                .map_err(|e| e.in_column(field.column_name.as_str()))?;
        }
        Ok(())
    }
}
