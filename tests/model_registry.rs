//! Model Registry Tests
//!
//! - One model per record type, parsed once
//! - Concurrent first lookups all observe the same model
//! - Explicit options override tags and type names

mod common;

use std::sync::Arc;
use std::thread;

use common::{CustomTableName, TaggedModel, TestModel};
use tinyorm::db::mock::MockExecutor;
use tinyorm::db::Db;
use tinyorm::model::{ModelOption, Registry};
use tinyorm::query::{col, QueryBuilder};
use tinyorm::value::FieldType;
use tinyorm::OrmErrorCode;

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_model_fields() {
    let registry = Registry::new();
    let model = registry.get::<TestModel>().unwrap();

    assert_eq!(model.table_name(), "test_model");
    assert_eq!(model.field_count(), 4);

    let columns: Vec<_> = model.fields().iter().map(|f| f.column_name.as_str()).collect();
    assert_eq!(columns, vec!["id", "first_name", "age", "last_name"]);

    let age = model.field("age").unwrap();
    assert_eq!(age.field_type, FieldType::Int8);
    assert_eq!(age.offset, std::mem::offset_of!(TestModel, age));
    assert_eq!(model.field_by_column("age"), Some(age));

    let last_name = model.field("last_name").unwrap();
    assert_eq!(
        last_name.field_type,
        FieldType::Nullable(Box::new(FieldType::Text))
    );
}

#[test]
fn test_custom_table_and_tag() {
    let registry = Registry::new();

    let custom = registry.get::<CustomTableName>().unwrap();
    assert_eq!(custom.table_name(), "custom_table_name_t");

    let tagged = registry.get::<TaggedModel>().unwrap();
    assert_eq!(tagged.field("first_name").unwrap().column_name, "first_name_t");
    assert!(tagged.field_by_column("first_name").is_none());
    assert_eq!(tagged.field("user_pwd").unwrap().column_name, "user_pwd");
}

#[test]
fn test_boxed_record_maps_like_record() {
    let registry = Registry::new();
    let model = registry.get::<Box<TestModel>>().unwrap();
    assert_eq!(model.table_name(), "test_model");
    assert_eq!(model.field_count(), 4);

    // one record type, one parse
    assert!(Arc::ptr_eq(&model, &registry.get::<TestModel>().unwrap()));
    assert_eq!(registry.metrics().snapshot().models_parsed, 1);
}

#[test]
fn test_non_struct_rejected() {
    let registry = Registry::new();
    for err in [
        registry.get::<i64>().unwrap_err(),
        registry.get::<Vec<TestModel>>().unwrap_err(),
        registry.get::<Option<TestModel>>().unwrap_err(),
        registry.get::<()>().unwrap_err(),
    ] {
        assert_eq!(err.code(), OrmErrorCode::PointerOnly);
    }
    assert!(registry.is_empty());
}

// =============================================================================
// Caching Tests
// =============================================================================

#[test]
fn test_cached_once() {
    let registry = Registry::new();
    let first = registry.get::<TestModel>().unwrap();
    let second = registry.get::<TestModel>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);

    let snapshot = registry.metrics().snapshot();
    assert_eq!(snapshot.models_parsed, 1);
    assert_eq!(snapshot.model_cache_hits, 1);
}

/// Many threads racing on the first lookup all get the same model.
#[test]
fn test_concurrent_first_lookup() {
    let registry = Arc::new(Registry::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.get::<TestModel>().unwrap())
        })
        .collect();

    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let cached = registry.get::<TestModel>().unwrap();
    for model in &models {
        assert!(Arc::ptr_eq(model, &cached));
    }
    assert_eq!(registry.len(), 1);
}

// =============================================================================
// Registration Tests
// =============================================================================

#[test]
fn test_register_with_options() {
    let registry = Registry::new();
    let model = registry
        .register::<TestModel, _>([
            ModelOption::table_name("users_t"),
            ModelOption::column_name("first_name", "given_name"),
        ])
        .unwrap();

    assert_eq!(model.table_name(), "users_t");
    assert_eq!(model.field("first_name").unwrap().column_name, "given_name");
    assert!(Arc::ptr_eq(&model, &registry.get::<TestModel>().unwrap()));
}

#[test]
fn test_register_replaces_cached_model() {
    let registry = Registry::new();
    let parsed = registry.get::<TestModel>().unwrap();
    let registered = registry
        .register::<TestModel, _>([ModelOption::table_name("people")])
        .unwrap();

    assert!(!Arc::ptr_eq(&parsed, &registered));
    assert_eq!(registry.get::<TestModel>().unwrap().table_name(), "people");
}

#[test]
fn test_register_rejects_bad_options() {
    let registry = Registry::new();

    let err = registry
        .register::<TestModel, _>([ModelOption::column_name("missing", "x")])
        .unwrap_err();
    assert_eq!(err.code(), OrmErrorCode::UnknownField);

    let err = registry
        .register::<TestModel, _>([ModelOption::column_name("first_name", "age")])
        .unwrap_err();
    assert_eq!(err.code(), OrmErrorCode::InvalidColumn);

    assert!(!registry.contains::<TestModel>());
}

/// A registered model drives query compilation through a shared registry.
#[test]
fn test_registered_model_used_by_selector() {
    let registry = Arc::new(Registry::new());
    registry
        .register::<TestModel, _>([
            ModelOption::table_name("users_t"),
            ModelOption::column_name("age", "user_age"),
        ])
        .unwrap();

    let db = Db::new(MockExecutor::new()).with_registry(registry);
    let q = db
        .selector::<TestModel>()
        .where_([col("age").gt(18)])
        .build()
        .unwrap();
    assert_eq!(q.sql, "SELECT * FROM `users_t` WHERE `user_age` > ?;");
}
