//! Valuer that writes through field offsets

use std::marker::PhantomData;

use crate::db::Rows;
use crate::errors::OrmResult;
use crate::model::{Model, Reflect};

use super::{check_model, read_row, Valuer};

/// Binds rows by writing at `base + field.offset`
pub struct UnsafeValue<'a, T> {
    base: *mut u8,
    model: &'a Model,
    _target: PhantomData<&'a mut T>,
}

impl<'a, T: Reflect> UnsafeValue<'a, T> {
    /// Wrap `target`; `model` must describe `T`
    ///
    /// The model check is what makes the offset writes sound: every
    /// offset and writer in a model was generated for its own struct.
    pub fn new(target: &'a mut T, model: &'a Model) -> OrmResult<Self> {
        check_model::<T>(model)?;
        Ok(Self {
            base: (target as *mut T).cast::<u8>(),
            model,
            _target: PhantomData,
        })
    }
}

impl<T: Reflect> Valuer for UnsafeValue<'_, T> {
    fn set_columns<R: Rows + ?Sized>(&mut self, rows: &mut R) -> OrmResult<()> {
        for (field, value) in read_row(self.model, rows)? {
            // SAFETY: the model describes `T` (checked in `new`), so the
            // offset lies inside the exclusively borrowed record and the
            // writer matches the field's type.
            unsafe { (field.writer)(self.base.add(field.offset), value) }
                .map_err(|e| e.in_column(field.column_name.as_str()))?;
        }
        Ok(())
    }
}
