//! tinyorm - a small, strict object-relational mapper
//!
//! Maps Rust structs to SQL tables, compiles typed predicates into
//! parameterized SELECT statements and binds result rows back into
//! records.
//!
//! ```ignore
//! use tinyorm::db::Db;
//! use tinyorm::model::Entity;
//! use tinyorm::query::{col, QueryBuilder};
//!
//! tinyorm::entity! {
//!     #[derive(Debug, Default)]
//!     pub struct User {
//!         pub id: i64,
//!         pub first_name: String,
//!         pub age: i8,
//!     }
//! }
//!
//! impl Entity for User {}
//!
//! let db = Db::new(executor);
//! let query = db.selector::<User>().where_([col("age").gt(18)]).build()?;
//! assert_eq!(query.sql, "SELECT * FROM `user` WHERE `age` > ?;");
//! ```

pub mod db;
pub mod errors;
pub mod model;
pub mod observability;
pub mod query;
pub mod util;
pub mod value;
pub mod valuer;

pub use db::{Db, Executor, OrmConfig, Rows};
pub use errors::{OrmError, OrmErrorCode, OrmResult};
pub use model::{Entity, Model, ModelOption, Registry};
pub use query::{col, not, Query, QueryBuilder, Selector};
pub use value::Value;
pub use valuer::ValuerKind;
