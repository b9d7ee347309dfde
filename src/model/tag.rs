//! `orm` tag parsing
//!
//! Tag form: `key1=value1,key2=value2`. Every key the registry
//! understands is listed here.

use std::collections::HashMap;

use crate::errors::{OrmError, OrmResult};

/// Explicit column name override
pub const TAG_KEY_COLUMN: &str = "column";

/// Parse an `orm` tag into its key/value options
///
/// An empty tag yields an empty map. Unknown keys are kept; callers
/// ignore what they do not understand.
pub fn parse_tag(tag: &str) -> OrmResult<HashMap<String, String>> {
    if tag.is_empty() {
        return Ok(HashMap::new());
    }

    let mut options = HashMap::new();
    for segment in tag.split(',') {
        let mut parts = segment.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                options.insert(key.to_string(), value.to_string());
            }
            _ => return Err(OrmError::invalid_tag(segment)),
        }
    }
    Ok(options)
}
