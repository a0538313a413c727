//! The page controller.
//!
//! Ties the pieces together the way the browser page does: the metadata
//! arrives once, a category selector is built from the discovered tag
//! categories, two carousels render their cards, and the lightbox opens on
//! art card clicks. All state changes go through [`Page::dispatch`], one
//! event at a time, with the current time passed in for the resize debounce.
//!
//! ## Mounts
//!
//! Each subsystem only exists when its mount does ([`SectionsConfig`]):
//!
//! - carousels and the category selector need both the coding and art tracks
//! - the lightbox needs the art track and the lightbox overlay
//!
//! Events aimed at a missing subsystem are ignored.

use crate::cards::{ArtCardOptions, render_art_card, render_coding_card};
use crate::carousel::{Breakpoints, Carousel, RenderContext};
use crate::category::{CategoryChange, CategorySelector};
use crate::config::{FolioConfig, SectionsConfig};
use crate::debounce::Debouncer;
use crate::lightbox::{Key, Lightbox, OverlayTarget};
use crate::metadata::{ArtItem, CodingItem, LoadError, MetadataDocument};
use crate::tags::default_category;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Everything the page needs from configuration.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub breakpoints: Breakpoints,
    pub resize_debounce: Duration,
    pub preferred_category: String,
    pub art: ArtCardOptions,
    pub sections: SectionsConfig,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::from(&FolioConfig::default())
    }
}

impl From<&FolioConfig> for PageOptions {
    fn from(config: &FolioConfig) -> Self {
        Self {
            breakpoints: config.carousel.breakpoints(),
            resize_debounce: config.carousel.resize_debounce(),
            preferred_category: config.categories.default.clone(),
            art: ArtCardOptions {
                image_fallback: config.art.image_fallback,
            },
            sections: config.sections.clone(),
        }
    }
}

#[derive(Debug)]
pub enum PageEvent {
    /// The metadata load finished.
    Loaded(Result<MetadataDocument, LoadError>),
    /// A category button was clicked.
    SelectCategory(String),
    /// The viewport changed size.
    Resize { width: u32 },
    /// Time passed with no other input.
    Tick,
    CodingPrev,
    CodingNext,
    ArtPrev,
    ArtNext,
    /// Click on the art card at `index` of the art track. `on_link` is set
    /// when the click landed on a link inside the card.
    ArtCardClick { index: usize, on_link: bool },
    Key(Key),
    LightboxPrev,
    LightboxNext,
    LightboxClose,
    LightboxClick(OverlayTarget),
}

#[derive(Debug)]
pub struct Page {
    options: PageOptions,
    width: u32,
    selector: Option<CategorySelector>,
    coding: Option<Carousel<CodingItem>>,
    art: Option<Carousel<ArtItem>>,
    lightbox: Option<Lightbox>,
    resize: Debouncer,
    /// Filled by the selector's change subscription, drained after each `set`.
    category_changes: Rc<RefCell<Vec<CategoryChange>>>,
    load_failed: bool,
}

impl Page {
    pub fn new(options: PageOptions, width: u32) -> Self {
        let sections = &options.sections;
        let lightbox = (sections.art && sections.lightbox).then(Lightbox::new);
        let resize = Debouncer::new(options.resize_debounce);
        Self {
            options,
            width,
            selector: None,
            coding: None,
            art: None,
            lightbox,
            resize,
            category_changes: Rc::default(),
            load_failed: false,
        }
    }

    fn carousels_mounted(&self) -> bool {
        self.options.sections.coding && self.options.sections.art
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn selector(&self) -> Option<&CategorySelector> {
        self.selector.as_ref()
    }

    pub fn coding(&self) -> Option<&Carousel<CodingItem>> {
        self.coding.as_ref()
    }

    pub fn art(&self) -> Option<&Carousel<ArtItem>> {
        self.art.as_ref()
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn sections(&self) -> &SectionsConfig {
        &self.options.sections
    }

    /// True once a load has failed; the carousels then stay empty.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Selected category, if any.
    pub fn category(&self) -> Option<&str> {
        self.selector
            .as_ref()
            .map(CategorySelector::get)
            .filter(|c| !c.is_empty())
    }

    /// Handle one event. Returns true when the event's default action (link
    /// navigation) is cancelled.
    pub fn dispatch(&mut self, event: PageEvent, now: Instant) -> bool {
        self.poll(now);
        tracing::debug!(?event, "dispatch");
        let mut cancel_default = false;
        match event {
            PageEvent::Loaded(Ok(doc)) => self.load(doc),
            PageEvent::Loaded(Err(e)) => {
                tracing::error!(error = %e, "failed to load metadata");
                self.load_failed = true;
            }
            PageEvent::SelectCategory(value) => self.select_category(&value),
            PageEvent::Resize { width } => {
                self.width = width;
                self.resize.schedule(now);
            }
            PageEvent::Tick => {}
            PageEvent::CodingPrev => self.step_coding(-1),
            PageEvent::CodingNext => self.step_coding(1),
            PageEvent::ArtPrev => self.step_art(-1),
            PageEvent::ArtNext => self.step_art(1),
            PageEvent::ArtCardClick { index, on_link } => {
                if let (Some(lightbox), Some(art)) = (self.lightbox.as_mut(), self.art.as_ref()) {
                    cancel_default = lightbox.click_card(&art.track().cards, index, on_link);
                }
            }
            PageEvent::Key(key) => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.key(key);
                }
            }
            PageEvent::LightboxPrev => self.with_lightbox(Lightbox::prev),
            PageEvent::LightboxNext => self.with_lightbox(Lightbox::next),
            PageEvent::LightboxClose => self.with_lightbox(Lightbox::close),
            PageEvent::LightboxClick(target) => {
                self.with_lightbox(|lb| lb.click_overlay(target));
            }
        }
        cancel_default
    }

    /// Run the debounced resize re-render if its quiet period has passed.
    fn poll(&mut self, now: Instant) {
        if self.resize.fire(now) {
            tracing::debug!(width = self.width, "resize settled");
            self.render_coding(true);
            self.render_art(true);
        }
    }

    fn load(&mut self, doc: MetadataDocument) {
        if !self.carousels_mounted() {
            tracing::debug!("carousel mounts missing, skipping wiring");
            return;
        }
        let categories = doc.categories();
        let default = default_category(&categories, &self.options.preferred_category);
        let mut selector = CategorySelector::new();
        let inbox = Rc::clone(&self.category_changes);
        selector.subscribe(move |change| inbox.borrow_mut().push(change.clone()));
        selector.render(categories, default.as_deref());
        self.selector = Some(selector);

        let bp = self.options.breakpoints;
        self.coding = Some(Carousel::new(
            doc.coding,
            bp,
            Box::new(|item: &CodingItem, ctx: &RenderContext<'_>| {
                render_coding_card(item, ctx.category)
            }),
        ));
        let art_options = self.options.art;
        self.art = Some(Carousel::new(
            doc.art,
            bp,
            Box::new(move |item: &ArtItem, _: &RenderContext<'_>| {
                render_art_card(item, art_options)
            }),
        ));

        self.render_coding(false);
        self.render_art(false);
        tracing::info!(
            coding = self.coding.as_ref().map_or(0, |c| c.items().len()),
            art = self.art.as_ref().map_or(0, |c| c.items().len()),
            category = self.category().unwrap_or(""),
            "page loaded"
        );
    }

    fn select_category(&mut self, value: &str) {
        if let Some(selector) = self.selector.as_mut() {
            selector.set(value);
        }
        let latest = self.category_changes.borrow_mut().drain(..).last();
        if let Some(change) = latest {
            tracing::debug!(category = %change.value, "tag category changed");
            self.render_coding(false);
        }
    }

    fn step_coding(&mut self, delta: i64) {
        let width = self.width;
        let category = self.category().map(String::from);
        if let Some(coding) = self.coding.as_mut() {
            let ctx = RenderContext {
                viewport_width: width,
                category: category.as_deref(),
            };
            if delta < 0 {
                coding.prev(&ctx);
            } else {
                coding.next(&ctx);
            }
        }
    }

    fn step_art(&mut self, delta: i64) {
        let ctx = RenderContext {
            viewport_width: self.width,
            category: None,
        };
        if let Some(art) = self.art.as_mut() {
            if delta < 0 {
                art.prev(&ctx);
            } else {
                art.next(&ctx);
            }
        }
    }

    fn render_coding(&mut self, keep_index: bool) {
        let width = self.width;
        let category = self.category().map(String::from);
        if let Some(coding) = self.coding.as_mut() {
            let ctx = RenderContext {
                viewport_width: width,
                category: category.as_deref(),
            };
            coding.render(&ctx, keep_index);
        }
    }

    fn render_art(&mut self, keep_index: bool) {
        let ctx = RenderContext {
            viewport_width: self.width,
            category: None,
        };
        if let Some(art) = self.art.as_mut() {
            art.render(&ctx, keep_index);
        }
    }

    fn with_lightbox(&mut self, f: impl FnOnce(&mut Lightbox)) {
        if let Some(lightbox) = self.lightbox.as_mut() {
            f(lightbox);
        }
    }
}
