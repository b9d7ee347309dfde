//! Model registry
//!
//! Parses a record type into a `Model` on first use and caches it for
//! the lifetime of the registry. The registry is an ordinary value owned
//! by the caller (usually through `Db`), never a process global.
//!
//! # Concurrency
//!
//! Lookups take a read lock. Parsing happens outside any lock; the
//! result is inserted under a short write lock with insert-if-absent,
//! so concurrent first lookups of the same type may both parse but all
//! of them return the `Arc` that was inserted first. No reader ever
//! observes a partially built model.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::errors::{OrmError, OrmResult};
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::util::camel_to_snake;

use super::options::ModelOption;
use super::reflect::{Reflect, Shape, StructShape};
use super::tag::{parse_tag, TAG_KEY_COLUMN};
use super::types::{Field, Model};

/// Caches one `Model` per record type
#[derive(Debug, Default)]
pub struct Registry {
    models: RwLock<HashMap<TypeId, Arc<Model>>>,
    metrics: Arc<MetricsRegistry>,
}

impl Registry {
    /// Create an empty registry with its own metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry reporting into shared metrics
    pub fn with_metrics(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
            metrics,
        }
    }

    /// Returns the metrics this registry reports into
    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Look up the model for `T`, parsing it on first use
    ///
    /// `Box<T>` resolves to the model of `T`.
    pub fn get<T: Reflect>(&self) -> OrmResult<Arc<Model>> {
        let key = T::record_type();
        if let Some(model) = self.lookup(key) {
            self.metrics.increment_model_cache_hits();
            return Ok(model);
        }

        let model = Arc::new(self.parse::<T>()?);
        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(models.entry(key).or_insert(model)))
    }

    /// Parse `T`, apply `options` in order and store the result
    ///
    /// Replaces any model previously cached for `T`.
    pub fn register<T, I>(&self, options: I) -> OrmResult<Arc<Model>>
    where
        T: Reflect,
        I: IntoIterator<Item = ModelOption>,
    {
        let mut model = self.parse::<T>()?;
        for option in options {
            option.apply(&mut model)?;
        }

        Logger::trace(
            Event::ModelRegistered.as_str(),
            &[("table", model.table_name()), ("type", model.type_name())],
        );

        let model = Arc::new(model);
        self.models
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(T::record_type(), Arc::clone(&model));
        Ok(model)
    }

    /// Returns true if a model for `T` is cached
    pub fn contains<T: Reflect>(&self) -> bool {
        self.lookup(T::record_type()).is_some()
    }

    /// Number of cached models
    pub fn len(&self) -> usize {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: TypeId) -> Option<Arc<Model>> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    fn parse<T: Reflect>(&self) -> OrmResult<Model> {
        let shape = match T::shape() {
            Shape::Struct(shape) => shape,
            other => return Err(OrmError::pointer_only(other.kind())),
        };

        let model = Self::parse_struct(shape)?;
        self.metrics.increment_models_parsed();

        let field_count = model.field_count().to_string();
        Logger::trace(
            Event::ModelParsed.as_str(),
            &[
                ("fields", field_count.as_str()),
                ("table", model.table_name()),
                ("type", model.type_name()),
            ],
        );
        Ok(model)
    }

    fn parse_struct(shape: StructShape) -> OrmResult<Model> {
        let mut fields = Vec::with_capacity(shape.fields.len());
        for fd in shape.fields {
            let mut tags = parse_tag(fd.tag)?;
            let column_name = match tags.remove(TAG_KEY_COLUMN) {
                Some(column) if !column.is_empty() => column,
                _ => camel_to_snake(fd.ident),
            };

            fields.push(Field {
                column_name,
                field_name: fd.ident.to_string(),
                field_type: fd.field_type,
                offset: fd.offset,
                writer: fd.writer,
            });
        }

        let table_name = if shape.table_name.is_empty() {
            camel_to_snake(shape.type_name)
        } else {
            shape.table_name
        };

        Model::new(shape.type_id, shape.type_name, table_name, fields)
    }
}
