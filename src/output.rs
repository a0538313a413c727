//! CLI output formatting.
//!
//! Output is information-first: each entity leads with its positional index
//! and title, with paths and tags as indented context lines.
//!
//! ## Check
//!
//! ```text
//! Coding projects
//! 001 folio
//!     Link: https://example.com/folio
//!     content: web, cli
//!     skill: rust
//!
//! Artwork
//! 001 Dusk
//!     Image: ./assets/art/dusk.png
//! 002 Dawn
//!     Image: ./assets/art/dawn.png (missing)
//!
//! Categories
//!     content (default)
//!     skill
//! ```
//!
//! ## Build
//!
//! ```text
//! Coding → 3 of 5 cards, category "content"
//! Art → 3 of 4 cards
//! Wrote index.html, metadata.json, 12 asset files
//! ```
//!
//! Each `format_*` function is pure and returns lines; `print_*` wrappers
//! write them to stdout.

use crate::generate::BuildReport;
use crate::metadata::MetadataDocument;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Title line; untitled entries show a placeholder.
fn entity_line(index: usize, title: &str) -> String {
    if title.is_empty() {
        format!("{} (untitled)", format_index(index))
    } else {
        format!("{} {}", format_index(index), title)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Format the content inventory for `folio check`.
///
/// `missing_images` lists resolved art paths that point at local files not
/// present on disk.
pub fn format_check_output(
    doc: &MetadataDocument,
    default_category: Option<&str>,
    missing_images: &[String],
) -> Vec<String> {
    let mut lines = vec!["Coding projects".to_string()];
    for (i, item) in doc.coding.iter().enumerate() {
        lines.push(entity_line(i + 1, &item.name));
        if !item.description.is_empty() {
            lines.push(format!("{}{}", indent(1), truncate_desc(&item.description, 60)));
        }
        if let Some(link) = &item.link {
            lines.push(format!("{}Link: {}", indent(1), link));
        }
        for (category, records) in &item.tags {
            let labels: Vec<&str> = records
                .iter()
                .map(|r| r.tag.as_str())
                .filter(|t| !t.is_empty())
                .collect();
            lines.push(format!("{}{}: {}", indent(1), category, labels.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push("Artwork".to_string());
    for (i, item) in doc.art.iter().enumerate() {
        lines.push(entity_line(i + 1, &item.title));
        if item.image.is_empty() {
            lines.push(format!("{}Image: (none)", indent(1)));
        } else if missing_images.contains(&item.image) {
            lines.push(format!("{}Image: {} (missing)", indent(1), item.image));
        } else {
            lines.push(format!("{}Image: {}", indent(1), item.image));
        }
    }

    lines.push(String::new());
    lines.push("Categories".to_string());
    for category in doc.categories() {
        if Some(category.as_str()) == default_category {
            lines.push(format!("{}{} (default)", indent(1), category));
        } else {
            lines.push(format!("{}{}", indent(1), category));
        }
    }
    lines
}

pub fn print_check_output(
    doc: &MetadataDocument,
    default_category: Option<&str>,
    missing_images: &[String],
) {
    for line in format_check_output(doc, default_category, missing_images) {
        println!("{}", line);
    }
}

/// Format the summary printed after `folio build`.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.load_failed {
        lines.push("Metadata could not be loaded; carousels are empty".to_string());
    }
    match &report.category {
        Some(c) => lines.push(format!(
            "Coding → {} of {} cards, category \"{}\"",
            report.coding_shown, report.coding_total, c
        )),
        None => lines.push(format!(
            "Coding → {} of {} cards",
            report.coding_shown, report.coding_total
        )),
    }
    lines.push(format!(
        "Art → {} of {} cards",
        report.art_shown, report.art_total
    ));

    let mut written = report.files.join(", ");
    if report.assets_copied > 0 {
        if !written.is_empty() {
            written.push_str(", ");
        }
        written.push_str(&format!("{} asset files", report.assets_copied));
    }
    lines.push(format!("Wrote {}", written));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
