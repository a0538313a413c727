//! Tag normalization and category discovery.
//!
//! Coding items carry tags grouped by category. Authors write them in one of
//! two shapes, and both must end up as the same [`TagMap`]:
//!
//! ```json
//! "tags": [ { "content": [{"tag": "web"}] }, { "skill": [{"tag": "rust"}] } ]
//! "tags": { "content": [{"tag": "web"}], "skill": [{"tag": "rust"}] }
//! ```
//!
//! Records may also be bare strings (`"rust"` instead of `{"tag": "rust"}`).
//! Nothing here fails: unrecognized shapes degrade to empty.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// One tag label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    /// Display label; empty for records that carried no usable label.
    pub tag: String,
}

impl TagRecord {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Canonical tag mapping: category name → tags in encounter order.
pub type TagMap = BTreeMap<String, Vec<TagRecord>>;

/// Coerce a raw `tags` value into a [`TagMap`].
///
/// - list of maps: same-category lists are concatenated in encounter order
/// - map: taken as-is
/// - absent, `null`, or anything else: empty
pub fn normalize_tags(raw: Option<&Value>) -> TagMap {
    let mut out = TagMap::new();
    match raw {
        Some(Value::Array(groups)) => {
            for group in groups {
                let Value::Object(group) = group else {
                    continue;
                };
                for (category, records) in group {
                    out.entry(category.clone())
                        .or_default()
                        .extend(records_from(records));
                }
            }
        }
        Some(Value::Object(map)) => {
            for (category, records) in map {
                out.insert(category.clone(), records_from(records).collect());
            }
        }
        _ => {}
    }
    out
}

fn records_from(value: &Value) -> Box<dyn Iterator<Item = TagRecord> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter().map(record_from)),
        Value::Null => Box::new(std::iter::empty()),
        other => Box::new(std::iter::once(record_from(other))),
    }
}

fn record_from(value: &Value) -> TagRecord {
    let tag = match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj
            .get("tag")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    };
    TagRecord { tag }
}

/// Labels of the non-empty tags filed under `category`.
pub fn labels_in<'a>(tags: &'a TagMap, category: &str) -> Vec<&'a str> {
    tags.get(category)
        .map(|records| {
            records
                .iter()
                .map(|r| r.tag.as_str())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Sorted, de-duplicated category names across all tag maps.
pub fn discover_categories<'a>(maps: impl IntoIterator<Item = &'a TagMap>) -> Vec<String> {
    let set: BTreeSet<&str> = maps
        .into_iter()
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();
    set.into_iter().map(String::from).collect()
}

/// Pick the initial category: `preferred` if available, else the first one,
/// else none.
pub fn default_category(categories: &[String], preferred: &str) -> Option<String> {
    if categories.iter().any(|c| c == preferred) {
        Some(preferred.to_string())
    } else {
        categories.first().cloned()
    }
}
