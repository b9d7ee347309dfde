//! Shared helpers

mod naming;

pub use naming::camel_to_snake;
