//! Card renderers for the two carousels.
//!
//! Both are pure: item + context in, markup out. Every interpolated field
//! goes through [`crate::sanitize`]. Field aliases were already resolved at
//! ingestion, so each renderer reads exactly one schema.

use crate::metadata::{ArtItem, CodingItem};
use crate::sanitize::text;
use crate::tags::labels_in;
use maud::{Markup, PreEscaped, html};

/// Script hook that flips a card into its "not found" state when the browser
/// fails to load the image.
const MISSING_IMAGE_HOOK: &str = "this.closest('.art-card').classList.add('is-missing')";

/// Render a coding project card.
///
/// Only tags filed under `category` are emitted; with no category selected
/// the tag row is empty.
pub fn render_coding_card(item: &CodingItem, category: Option<&str>) -> Markup {
    let tags = category
        .map(|c| labels_in(&item.tags, c))
        .unwrap_or_default();

    html! {
        article.project-card {
            h4 { u { (text(&item.name)) } }
            p.desc { (text(&item.description)) }
            div.tags {
                @for tag in &tags {
                    span.tag { (text(tag)) }
                }
            }
            @if let Some(link) = &item.link {
                p.actions {
                    a.btn href=(text(link)) target="_blank" rel="noopener" { "View Project →" }
                }
            }
        }
    }
}

/// Options for [`render_art_card`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtCardOptions {
    /// Render missing images as a "not found" card and hook load failures.
    pub image_fallback: bool,
}

/// Render an art card.
pub fn render_art_card(item: &ArtItem, options: ArtCardOptions) -> Markup {
    let missing = options.image_fallback && item.image.is_empty();
    let class = if missing {
        "art-card tile is-missing"
    } else {
        "art-card tile"
    };
    let onerror = options.image_fallback.then_some(PreEscaped(MISSING_IMAGE_HOOK));

    html! {
        article class=(class) {
            div.thumb {
                @if missing {
                    span.missing-label aria-hidden="true" { "Image not found" }
                } @else {
                    img src=(text(&item.image)) alt=(text(&item.title)) loading="lazy" decoding="async" onerror=[onerror];
                }
                div.text {
                    h1 { (text(&item.title)) }
                    p.animate-text { (text(&item.description)) }
                }
            }
        }
    }
}
