//! Metadata document loading and ingestion.
//!
//! The page is driven by one `metadata.json`:
//!
//! ```json
//! {
//!   "coding": [
//!     { "project_name": "folio", "description": "...", "link": "https://...",
//!       "tags": [ { "content": [{"tag": "web"}] }, { "skill": [{"tag": "rust"}] } ] }
//!   ],
//!   "art": [
//!     { "title": "Dusk", "description": "...", "image": "dusk.png" }
//!   ]
//! }
//! ```
//!
//! ## Field aliases
//!
//! Older documents use different field names for the same thing. Aliases are
//! resolved here, once, so the renderers only ever see one schema:
//!
//! | Canonical | Accepted, in priority order |
//! |-----------|-----------------------------|
//! | `CodingItem::name` | `project_name`, `title` |
//! | `ArtItem::title` | `title`, `name` |
//! | `ArtItem::image` | `image`, `file`, `src` |
//!
//! ## Permissive input
//!
//! Only the JSON syntax itself can fail. Missing sections, non-object items,
//! missing fields and malformed tags all degrade to empty values.

use crate::paths::normalize_art_path;
use crate::tags::{TagMap, normalize_tags};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The whole page's content, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataDocument {
    pub coding: Vec<CodingItem>,
    pub art: Vec<ArtItem>,
}

/// A coding project card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodingItem {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    pub tags: TagMap,
}

/// An artwork card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtItem {
    pub title: String,
    pub description: String,
    /// Resolved image path; empty when the entry named no image.
    pub image: String,
}

impl MetadataDocument {
    /// Parse a document, resolving bare art filenames against `art_base`.
    pub fn from_json(json: &str, art_base: &str) -> Result<Self, LoadError> {
        let raw: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&raw, art_base))
    }

    /// Ingest an already-parsed document.
    pub fn from_value(raw: &Value, art_base: &str) -> Self {
        let coding = section(raw, "coding").filter_map(coding_item).collect();
        let art = section(raw, "art")
            .filter_map(|obj| art_item(obj, art_base))
            .collect();
        Self { coding, art }
    }

    pub fn is_empty(&self) -> bool {
        self.coding.is_empty() && self.art.is_empty()
    }

    /// Tag categories across all coding items, sorted.
    pub fn categories(&self) -> Vec<String> {
        crate::tags::discover_categories(self.coding.iter().map(|item| &item.tags))
    }
}

/// Read and ingest `metadata.json` from disk.
pub fn load_metadata(path: &Path, art_base: &str) -> Result<MetadataDocument, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    MetadataDocument::from_json(&content, art_base)
}

fn section<'a>(raw: &'a Value, key: &str) -> impl Iterator<Item = Option<&'a Map<String, Value>>> {
    raw.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(Value::as_object)
}

fn coding_item(obj: Option<&Map<String, Value>>) -> Option<CodingItem> {
    let obj = obj?;
    Some(CodingItem {
        name: field(obj, &["project_name", "title"]).unwrap_or_default(),
        description: field(obj, &["description"]).unwrap_or_default(),
        link: field(obj, &["link"]),
        tags: normalize_tags(obj.get("tags")),
    })
}

fn art_item(obj: Option<&Map<String, Value>>, art_base: &str) -> Option<ArtItem> {
    let obj = obj?;
    let image = field(obj, &["image", "file", "src"]).unwrap_or_default();
    Some(ArtItem {
        title: field(obj, &["title", "name"]).unwrap_or_default(),
        description: field(obj, &["description"]).unwrap_or_default(),
        image: normalize_art_path(&image, art_base),
    })
}

/// First non-empty value among `keys`. Numbers are accepted and stringified.
fn field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let values: Vec<Option<String>> = keys
        .iter()
        .map(|k| match obj.get(*k) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .collect();
    resolve(&values.iter().map(Option::as_deref).collect::<Vec<_>>())
}

/// Return the first non-None, non-blank value, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::ART_BASE;
    use crate::tags::labels_in;
    use tempfile::TempDir;

    const DOC: &str = r#"{
        "coding": [
            {
                "project_name": "folio",
                "description": "Portfolio builder",
                "link": "https://example.com/folio",
                "tags": [{"content": [{"tag": "web"}]}, {"skill": [{"tag": "rust"}]}]
            },
            {
                "title": "tiny",
                "description": "No link",
                "tags": {"skill": [{"tag": "go"}]}
            }
        ],
        "art": [
            {"title": "Dusk", "description": "Oil", "image": "dusk.png"},
            {"name": "Dawn", "file": "https://cdn.example/dawn.png"},
            {"title": "Noon", "src": "gallery/noon.png"}
        ]
    }"#;

    #[test]
    fn parses_coding_items() {
        let doc = MetadataDocument::from_json(DOC, ART_BASE).unwrap();
        assert_eq!(doc.coding.len(), 2);
        let first = &doc.coding[0];
        assert_eq!(first.name, "folio");
        assert_eq!(first.link.as_deref(), Some("https://example.com/folio"));
        assert_eq!(labels_in(&first.tags, "skill"), vec!["rust"]);
        assert_eq!(doc.coding[1].name, "tiny");
        assert_eq!(doc.coding[1].link, None);
    }

    #[test]
    fn resolves_art_aliases_and_paths() {
        let doc = MetadataDocument::from_json(DOC, ART_BASE).unwrap();
        assert_eq!(doc.art[0].image, "./assets/art/dusk.png");
        assert_eq!(doc.art[1].title, "Dawn");
        assert_eq!(doc.art[1].image, "https://cdn.example/dawn.png");
        assert_eq!(doc.art[1].description, "");
        assert_eq!(doc.art[2].image, "gallery/noon.png");
    }

    #[test]
    fn categories_across_items() {
        let doc = MetadataDocument::from_json(DOC, ART_BASE).unwrap();
        assert_eq!(doc.categories(), vec!["content", "skill"]);
    }

    #[test]
    fn project_name_wins_over_title() {
        let doc = MetadataDocument::from_json(
            r#"{"coding": [{"project_name": "a", "title": "b"}]}"#,
            ART_BASE,
        )
        .unwrap();
        assert_eq!(doc.coding[0].name, "a");
    }

    #[test]
    fn blank_alias_falls_through() {
        let doc = MetadataDocument::from_json(
            r#"{"art": [{"image": "  ", "file": "x.png"}]}"#,
            ART_BASE,
        )
        .unwrap();
        assert_eq!(doc.art[0].image, "./assets/art/x.png");
    }

    #[test]
    fn missing_sections_are_empty() {
        let doc = MetadataDocument::from_json("{}", ART_BASE).unwrap();
        assert!(doc.is_empty());
        let doc = MetadataDocument::from_json("[1, 2]", ART_BASE).unwrap();
        assert!(doc.is_empty());
        let doc = MetadataDocument::from_json(r#"{"coding": "nope"}"#, ART_BASE).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn non_object_items_are_dropped() {
        let doc =
            MetadataDocument::from_json(r#"{"art": [1, null, {"title": "ok"}]}"#, ART_BASE)
                .unwrap();
        assert_eq!(doc.art.len(), 1);
        assert_eq!(doc.art[0].image, "");
    }

    #[test]
    fn malformed_json_is_error() {
        let result = MetadataDocument::from_json("{not json", ART_BASE);
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("metadata.json");
        fs::write(&path, DOC).unwrap();
        let doc = load_metadata(&path, ART_BASE).unwrap();
        assert_eq!(doc.art.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_metadata(&tmp.path().join("missing.json"), ART_BASE);
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn resolve_returns_first_non_empty() {
        assert_eq!(resolve(&[None, Some(" "), Some(" b "), Some("c")]).as_deref(), Some("b"));
        assert_eq!(resolve(&[None, Some("")]), None);
    }
}
