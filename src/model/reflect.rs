//! Record shape description
//!
//! Rust has no runtime struct introspection, so a record describes
//! itself through `Reflect`. The `entity!` macro generates the
//! implementation from an ordinary struct definition: field identifiers,
//! `orm` tags, semantic types, byte offsets and a typed writer per
//! field, plus a by-name setter.
//!
//! Non-struct types also implement `Reflect` so the registry can reject
//! them with `ORM_POINTER_ONLY` instead of failing to compile.

use std::any::TypeId;
use std::collections::HashMap;

use crate::errors::{OrmError, OrmResult};
use crate::value::{FieldType, FromValue, Value};

/// Writes a converted value at a raw field address
///
/// # Safety
///
/// `ptr` must point to an initialized, properly aligned value of the
/// field type the writer was generated for.
pub type FieldWriter = unsafe fn(*mut u8, Value) -> OrmResult<()>;

/// Shape of a type as seen by the registry
#[derive(Debug, Clone)]
pub enum Shape {
    /// `()`
    Unit,
    /// Integers, floats, strings, ...
    Scalar(&'static str),
    /// `Option<T>`
    Optional,
    /// `Vec<T>`
    Sequence,
    /// `HashMap<K, V>`
    Map,
    Struct(StructShape),
}

impl Shape {
    /// Returns the kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Unit => "unit",
            Shape::Scalar(name) => name,
            Shape::Optional => "option",
            Shape::Sequence => "sequence",
            Shape::Map => "map",
            Shape::Struct(_) => "struct",
        }
    }
}

/// Shape of a struct record
#[derive(Debug, Clone)]
pub struct StructShape {
    pub type_id: TypeId,
    pub type_name: &'static str,
    /// Result of `Entity::table_name`; empty means no override
    pub table_name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldShape>,
}

/// Shape of one struct field
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub ident: &'static str,
    /// Raw `orm` tag, empty when the field has none
    pub tag: &'static str,
    pub field_type: FieldType,
    pub offset: usize,
    pub writer: FieldWriter,
}

/// A type that can describe its own shape
///
/// Implement it through `entity!`; a hand-written implementation has to
/// be `unsafe impl`:
///
/// ```compile_fail
/// use tinyorm::model::{Reflect, Shape};
///
/// struct Plain;
///
/// impl Reflect for Plain {
///     fn shape() -> Shape {
///         Shape::Unit
///     }
/// }
/// ```
///
/// # Safety
///
/// For a `Shape::Struct` returned by `shape`, with `type_id` naming the
/// struct `S` being described:
///
/// - every field's `offset` is the byte offset of that field in `S`
/// - every field's `writer` was generated for that field's exact type
/// - `set_field` accepts exactly the identifiers listed in `fields`
///
/// The offset valuer only checks that the target's `TypeId` equals
/// `type_id`, then writes through `offset` and `writer`.
pub unsafe trait Reflect: 'static {
    fn shape() -> Shape;

    /// Key the registry caches this type's model under
    fn record_type() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Assign a field by identifier
    fn set_field(&mut self, ident: &str, value: Value) -> OrmResult<()> {
        let _ = value;
        Err(OrmError::unknown_field(ident))
    }
}

/// A record that can be selected into
///
/// Implement `table_name` to override the mangled type name; an empty
/// string keeps the default.
pub trait Entity: Reflect + Default {
    fn table_name(&self) -> String {
        String::new()
    }
}

/// Typed writer used by `entity!`
///
/// # Safety
///
/// See [`FieldWriter`].
#[doc(hidden)]
pub unsafe fn write_field<F: FromValue>(ptr: *mut u8, value: Value) -> OrmResult<()> {
    let converted = F::from_value(value)?;
    // Plain assignment drops the previous value in place.
    *ptr.cast::<F>() = converted;
    Ok(())
}

/// Define a record struct and derive its `Reflect` implementation
///
/// ```ignore
/// tinyorm::entity! {
///     #[derive(Debug, Default)]
///     pub struct User {
///         pub id: i64,
///         #[orm = "column=first_name_t"]
///         pub first_name: String,
///         pub last_name: Option<String>,
///     }
/// }
///
/// impl tinyorm::model::Entity for User {}
/// ```
#[macro_export]
macro_rules! entity {
    (@tag) => { "" };
    (@tag $tag:literal) => { $tag };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[orm = $tag:literal])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $field : $ty, )*
        }

        // SAFETY: type id, offsets and writers are derived from the
        // struct definition emitted above.
        unsafe impl $crate::model::Reflect for $name {
            fn shape() -> $crate::model::Shape {
                let record = <$name as ::std::default::Default>::default();
                $crate::model::Shape::Struct($crate::model::StructShape {
                    type_id: ::std::any::TypeId::of::<$name>(),
                    type_name: stringify!($name),
                    table_name: <$name as $crate::model::Entity>::table_name(&record),
                    fields: vec![
                        $(
                            $crate::model::FieldShape {
                                ident: stringify!($field),
                                tag: $crate::entity!(@tag $($tag)?),
                                field_type: <$ty as $crate::value::FromValue>::field_type(),
                                offset: ::std::mem::offset_of!($name, $field),
                                writer: $crate::model::write_field::<$ty>,
                            },
                        )*
                    ],
                })
            }

            fn set_field(
                &mut self,
                ident: &str,
                value: $crate::value::Value,
            ) -> $crate::errors::OrmResult<()> {
                match ident {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::value::FromValue>::from_value(value)?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::errors::OrmError::unknown_field(ident)),
                }
            }
        }
    };
}

macro_rules! scalar_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            unsafe impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(stringify!($ty))
                }
            }
        )*
    };
}

scalar_shape!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String, &'static str);

unsafe impl Reflect for () {
    fn shape() -> Shape {
        Shape::Unit
    }
}

unsafe impl<T: 'static> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::Optional
    }
}

unsafe impl<T: 'static> Reflect for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence
    }
}

unsafe impl<K: 'static, V: 'static, S: 'static> Reflect for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Map
    }
}

/// A boxed record maps like the record itself and shares its model
///
/// The shape describes `T`, not the box, so binders reject a boxed
/// target with `ORM_MODEL_MISMATCH`.
unsafe impl<T: Reflect> Reflect for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn record_type() -> TypeId {
        T::record_type()
    }

    fn set_field(&mut self, ident: &str, value: Value) -> OrmResult<()> {
        (**self).set_field(ident, value)
    }
}
