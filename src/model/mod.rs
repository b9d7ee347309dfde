//! Model subsystem
//!
//! Turns record types into table/column metadata.
//!
//! # Resolution rules
//!
//! - Column name: `orm` tag `column=...`, else the mangled field name
//! - Table name: `Entity::table_name`, else the mangled type name
//! - Only structs (or boxed structs) can be mapped
//! - Explicit `ModelOption`s are applied last, in order

mod options;
mod reflect;
mod registry;
mod tag;
mod types;

pub use options::ModelOption;
pub use reflect::{Entity, FieldShape, FieldWriter, Reflect, Shape, StructShape};
#[doc(hidden)]
pub use reflect::write_field;
pub use registry::Registry;
pub use tag::{parse_tag, TAG_KEY_COLUMN};
pub use types::{Field, Model};
