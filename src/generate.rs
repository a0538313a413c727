//! HTML page generation.
//!
//! Loads `metadata.json` from the source directory, drives a [`Page`] through
//! the same events a browser session starts with (load, then an optional
//! category pick) at the configured viewport width, and writes the result as
//! a static `index.html`.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html        # Header, category control, both carousels, lightbox
//! ├── metadata.json     # Copied as-is for client-side consumers
//! └── assets/           # Copied from the source directory
//!     └── art/
//!         └── dusk.png
//! ```
//!
//! A metadata load failure is not fatal: it is logged, and the page is still
//! written with empty carousels.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Card markup comes from [`crate::cards`]; the stylesheet is embedded at
//! compile time with color variables from config prepended.

use crate::carousel::Track;
use crate::config::{self, FolioConfig};
use crate::metadata::{MetadataDocument, load_metadata};
use crate::paths::is_remote;
use crate::page::{Page, PageEvent, PageOptions};
use crate::sanitize::text;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Name of the metadata document inside the source directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Directory copied verbatim from source to output.
pub const ASSETS_DIR: &str = "assets";

/// Per-build overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Viewport width to lay the page out for; config value when `None`.
    pub width: Option<u32>,
    /// Category to select after load.
    pub category: Option<String>,
    /// Year shown in the footer.
    pub year: i32,
}

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub coding_total: usize,
    pub coding_shown: usize,
    pub art_total: usize,
    pub art_shown: usize,
    pub category: Option<String>,
    /// Top-level files written, in order.
    pub files: Vec<String>,
    pub assets_copied: usize,
    pub load_failed: bool,
}

/// Build the page from `source` into `output`.
pub fn build(
    source: &Path,
    output: &Path,
    config: &FolioConfig,
    options: &BuildOptions,
) -> Result<BuildReport, GenerateError> {
    let width = options.width.unwrap_or(config.site.viewport_width);
    let metadata_path = source.join(METADATA_FILE);

    let mut page = Page::new(PageOptions::from(config), width);
    let now = Instant::now();
    page.dispatch(
        PageEvent::Loaded(load_metadata(&metadata_path, &config.paths.art_base)),
        now,
    );
    if let Some(category) = &options.category {
        page.dispatch(PageEvent::SelectCategory(category.clone()), now);
        if page.category() != Some(category.as_str()) {
            tracing::warn!(category = %category, "category not offered by any project, keeping default");
        }
    }

    let css = format!(
        "{}\n\n{}",
        config::theme_css(&config.theme),
        CSS_STATIC
    );

    fs::create_dir_all(output)?;
    let mut files = Vec::new();

    let html = render_page(&page, &config.site.title, &css, options.year);
    fs::write(output.join("index.html"), html.into_string())?;
    files.push("index.html".to_string());
    tracing::info!(path = %output.join("index.html").display(), "generated page");

    if metadata_path.is_file() {
        fs::copy(&metadata_path, output.join(METADATA_FILE))?;
        files.push(METADATA_FILE.to_string());
    }

    let assets = source.join(ASSETS_DIR);
    let assets_copied = if assets.is_dir() {
        copy_dir_recursive(&assets, &output.join(ASSETS_DIR))?
    } else {
        0
    };

    Ok(BuildReport {
        coding_total: page.coding().map_or(0, |c| c.items().len()),
        coding_shown: page.coding().map_or(0, |c| c.track().cards.len()),
        art_total: page.art().map_or(0, |c| c.items().len()),
        art_shown: page.art().map_or(0, |c| c.track().cards.len()),
        category: page.category().map(String::from),
        files,
        assets_copied,
        load_failed: page.load_failed(),
    })
}

/// Resolved art paths that point at local files absent under `source`.
pub fn missing_local_images(doc: &MetadataDocument, source: &Path) -> Vec<String> {
    doc.art
        .iter()
        .map(|item| item.image.as_str())
        .filter(|image| !image.is_empty() && !is_remote(image))
        .filter(|image| {
            let rel = image.strip_prefix("./").unwrap_or(image);
            !source.join(rel).is_file()
        })
        .map(String::from)
        .collect()
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (text(title)) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the site header with in-page section links
fn site_header(title: &str, page: &Page) -> Markup {
    let sections = page.sections();
    html! {
        header.site-header {
            a.site-title href="#top" { (text(title)) }
            nav.site-nav {
                @if sections.coding {
                    a href="#coding" { "Coding" }
                }
                @if sections.art {
                    a href="#art" { "Art" }
                }
            }
        }
    }
}

/// Renders one carousel section: heading, prev/next buttons, and track.
fn carousel_section(id: &str, heading: &str, track: Option<&Track>, extra: Option<Markup>) -> Markup {
    let empty = Track {
        prev_disabled: true,
        next_disabled: true,
        ..Track::default()
    };
    let track = track.unwrap_or(&empty);
    html! {
        section.carousel id=(id) {
            header.carousel-header {
                h2 { (heading) }
                @if let Some(extra) = extra {
                    (extra)
                }
            }
            div.carousel-body {
                button.carousel-nav.carousel-nav--prev id={ (id) "Prev" } type="button"
                    aria-label="Previous" disabled[track.prev_disabled] { "‹" }
                div.carousel-track id={ (id) "Track" } style={ "--visible: " (track.visible) } {
                    (track.markup())
                }
                button.carousel-nav.carousel-nav--next id={ (id) "Next" } type="button"
                    aria-label="Next" disabled[track.next_disabled] { "›" }
            }
        }
    }
}

/// Renders the full page for the current state of `page`.
pub fn render_page(page: &Page, title: &str, css: &str, year: i32) -> Markup {
    let sections = page.sections();
    let selector = page.selector().map(|s| {
        html! {
            div #tagCategoryToggle { (s.markup()) }
        }
    });
    let lightbox_open = page.lightbox().is_some_and(|lb| lb.is_open());

    let content = html! {
        (site_header(title, page))
        main #top {
            @if sections.coding {
                (carousel_section("coding", "Coding Projects", page.coding().map(|c| c.track()), selector))
            }
            @if sections.art {
                (carousel_section("art", "Artwork", page.art().map(|c| c.track()), None))
            }
        }
        @if let Some(lightbox) = page.lightbox() {
            (lightbox.markup())
        }
        footer.site-footer {
            "© " span #year { (year) } " " (text(title))
        }
    };

    base_document(
        title,
        css,
        lightbox_open.then_some("modal-open"),
        content,
    )
}
