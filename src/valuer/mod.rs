//! Row binding
//!
//! A valuer wraps one target record and writes the current row of a
//! cursor into it. Two strategies exist and are interchangeable:
//!
//! - `Reflect`: assigns fields by identifier through `Reflect::set_field`
//! - `Unsafe`: writes through the record's base address plus each
//!   field's byte offset
//!
//! Both go through the same column resolution and the same `FromValue`
//! conversions, so they reject the same inputs and produce identical
//! records.
//!
//! # Check order
//!
//! 1. More columns than model fields → `ORM_TOO_MANY_RETURNED_COLUMNS`
//! 2. Column not in the model → `ORM_UNKNOWN_COLUMN`
//! 3. Scan the row
//! 4. Convert and write each value → `ORM_TYPE_MISMATCH` on failure

mod reflect;
mod unsafe_value;

pub use reflect::ReflectValue;
pub use unsafe_value::UnsafeValue;

use std::any::TypeId;

use serde::{Deserialize, Serialize};

use crate::db::Rows;
use crate::errors::{OrmError, OrmResult};
use crate::model::{Entity, Field, Model};
use crate::value::Value;

/// Writes the current row of a cursor into the wrapped record
pub trait Valuer {
    fn set_columns<R: Rows + ?Sized>(&mut self, rows: &mut R) -> OrmResult<()>;
}

/// Which valuer a `Db` creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuerKind {
    Reflect,
    #[default]
    Unsafe,
}

impl ValuerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValuerKind::Reflect => "reflect",
            ValuerKind::Unsafe => "unsafe",
        }
    }

    /// Bind the current row of `rows` into `target` with this strategy
    pub fn bind<T, R>(&self, target: &mut T, model: &Model, rows: &mut R) -> OrmResult<()>
    where
        T: Entity,
        R: Rows + ?Sized,
    {
        match self {
            ValuerKind::Reflect => ReflectValue::new(target, model)?.set_columns(rows),
            ValuerKind::Unsafe => UnsafeValue::new(target, model)?.set_columns(rows),
        }
    }
}

fn check_model<T: 'static>(model: &Model) -> OrmResult<()> {
    if model.type_id() != TypeId::of::<T>() {
        return Err(OrmError::model_mismatch(
            model.type_name(),
            std::any::type_name::<T>(),
        ));
    }
    Ok(())
}

/// Resolve the returned columns and scan the row
///
/// Shared by both strategies so that they fail identically.
fn read_row<'m, R: Rows + ?Sized>(
    model: &'m Model,
    rows: &mut R,
) -> OrmResult<Vec<(&'m Field, Value)>> {
    let columns = rows.columns()?;
    if columns.len() > model.field_count() {
        return Err(OrmError::too_many_returned_columns(
            columns.len(),
            model.field_count(),
        ));
    }

    let fields = columns
        .iter()
        .map(|c| {
            model
                .field_by_column(c)
                .ok_or_else(|| OrmError::unknown_column(c.as_str()))
        })
        .collect::<OrmResult<Vec<_>>>()?;

    let values = rows.scan()?;
    if values.len() != fields.len() {
        return Err(OrmError::driver(format!(
            "scan returned {} values for {} columns",
            values.len(),
            fields.len()
        )));
    }

    Ok(fields.into_iter().zip(values).collect())
}
