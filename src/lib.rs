//! # Folio
//!
//! A portfolio page builder. One metadata document lists coding projects and
//! artwork; the page shows each list as a responsive carousel, lets the
//! visitor switch which tag category the project cards display, and opens
//! art cards in a lightbox.
//!
//! # Architecture
//!
//! The page is modelled as a state machine that reacts to the same events a
//! browser would deliver, and the static generator replays the initial ones:
//!
//! ```text
//! metadata.json ─→ MetadataDocument ─→ Page ─(events)─→ Page ─→ index.html
//!                   (aliases resolved)   ├─ CategorySelector
//!                                        ├─ Carousel<CodingItem>
//!                                        ├─ Carousel<ArtItem>
//!                                        └─ Lightbox (reads rendered cards)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Loads the document and resolves field aliases into one schema |
//! | [`tags`] | Tag map normalization and category discovery |
//! | [`paths`] | Art image path resolution against the asset base |
//! | [`sanitize`] | HTML escaping for every interpolated value |
//! | [`cards`] | Project and art card markup |
//! | [`carousel`] | Windowed, wrap-around carousel with breakpoint-driven visible count |
//! | [`category`] | Segmented tag category control with change notifications |
//! | [`lightbox`] | Overlay viewer driven by the rendered art track |
//! | [`debounce`] | Trailing-edge debounce for resize handling |
//! | [`page`] | Event dispatch tying the pieces together |
//! | [`generate`] | Static `index.html` output and asset copying |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## The Lightbox Reads Markup, Not Data
//!
//! Slides come from the art track exactly as rendered, so the lightbox always
//! shows what the visitor clicked, including fallbacks like the alt text
//! default. Card HTML is parsed back with `quick-xml`.
//!
//! ## Time Is an Argument
//!
//! [`page::Page::dispatch`] takes the current `Instant`. Resize debouncing is
//! then a pure function of the event sequence, which keeps tests free of
//! sleeps.

pub mod cards;
pub mod carousel;
pub mod category;
pub mod config;
pub mod debounce;
pub mod generate;
pub mod lightbox;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod page;
pub mod paths;
pub mod sanitize;
pub mod tags;
