//! Artwork lightbox.
//!
//! A modal with two states, closed and open. Opening collects the art
//! track's rendered cards as slides; every navigation step reads the slide's
//! image, alt text, title and description back out of that markup, never out
//! of the metadata. The track may have been re-rendered since the last open,
//! so slides are recollected on every open.
//!
//! ```text
//!            click card (not a link)
//!   Closed ─────────────────────────▶ Open ◀─┐ ←/→, prev/next
//!     ▲                                │ └───┘ (wraps)
//!     └──── Escape, close, backdrop ───┘
//! ```

use crate::carousel::clamp_index;
use crate::sanitize::text;
use maud::{Markup, html};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Content of one slide as read from a rendered art card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub description: String,
}

/// Keys the lightbox reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Where a click inside the open overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    /// The image or its caption.
    Figure,
    /// One of the prev/next/close controls.
    Control,
    /// Anywhere else on the overlay.
    Backdrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    CloseButton,
}

#[derive(Debug, Default)]
pub struct Lightbox {
    slides: Vec<String>,
    index: usize,
    open: bool,
    current: Slide,
    preloaded: Vec<String>,
    listening: bool,
    focus: Focus,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current(&self) -> &Slide {
        &self.current
    }

    /// Neighbour image sources fetched ahead of navigation.
    pub fn preloaded(&self) -> &[String] {
        &self.preloaded
    }

    /// True while the keydown handler is installed.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Handle a click on the card at `index` of the rendered art track.
    ///
    /// A click on a link inside the card opens the lightbox too; the return
    /// value is true when that link's navigation must be cancelled.
    pub fn click_card(&mut self, cards: &[String], index: usize, on_link: bool) -> bool {
        if index >= cards.len() {
            return false;
        }
        self.open_at(cards, index);
        on_link && self.open
    }

    /// Collect `cards` as slides and show the one at `index`.
    /// Does nothing when there are no cards.
    pub fn open_at(&mut self, cards: &[String], index: usize) {
        self.slides = cards.to_vec();
        if self.slides.is_empty() {
            return;
        }
        self.show(index as i64);
        self.open = true;
        self.focus = Focus::CloseButton;
        self.listening = true;
        tracing::debug!(index = self.index, slides = self.slides.len(), "lightbox opened");
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.listening = false;
        self.focus = Focus::Page;
        self.slides.clear();
        self.preloaded.clear();
        self.current = Slide::default();
        self.index = 0;
    }

    pub fn next(&mut self) {
        if self.open {
            self.show(self.index as i64 + 1);
        }
    }

    pub fn prev(&mut self) {
        if self.open {
            self.show(self.index as i64 - 1);
        }
    }

    pub fn key(&mut self, key: Key) {
        if !self.listening {
            return;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Other => {}
        }
    }

    pub fn click_overlay(&mut self, target: OverlayTarget) {
        if target == OverlayTarget::Backdrop {
            self.close();
        }
    }

    fn show(&mut self, index: i64) {
        let n = self.slides.len();
        self.index = clamp_index(index, n);
        self.current = read_slide(&self.slides[self.index]);

        let before = clamp_index(self.index as i64 - 1, n);
        let after = clamp_index(self.index as i64 + 1, n);
        self.preloaded = [before, after]
            .into_iter()
            .map(|i| read_slide(&self.slides[i]).src)
            .collect();
    }

    /// Overlay markup for the current state.
    pub fn markup(&self) -> Markup {
        html! {
            div #lightbox .lightbox.is-open[self.open]
                role="dialog" aria-modal="true"
                aria-hidden=(if self.open { "false" } else { "true" }) {
                button #lbClose .lightbox__close type="button" aria-label="Close"
                    autofocus[self.focus == Focus::CloseButton] { "×" }
                button #lbPrev .lightbox__nav.lightbox__nav--prev type="button" aria-label="Previous" { "‹" }
                figure.lightbox__figure {
                    img #lbImg src=(text(&self.current.src)) alt=(text(&self.current.alt));
                    figcaption {
                        h2 #lbTitle { (text(&self.current.title)) }
                        p #lbDesc { (text(&self.current.description)) }
                    }
                }
                button #lbNext .lightbox__nav.lightbox__nav--next type="button" aria-label="Next" { "›" }
                @if !self.preloaded.is_empty() {
                    div.lightbox__preload aria-hidden="true" {
                        @for src in &self.preloaded {
                            img src=(text(src)) alt="";
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Description,
}

const VOID_ELEMENTS: &[&[u8]] = &[b"img", b"br", b"hr", b"input", b"meta", b"link", b"source"];

/// Read slide content from a rendered art card.
///
/// - image: first `img`, its `src` and `alt`
/// - title: text of the first `h1`, `h3` or `.title`
/// - description: text of the first `p` or `.desc`
///
/// Alt text falls back to the title, then to `"Artwork"`. Markup that stops
/// parsing part-way yields whatever was read up to that point.
pub fn read_slide(card: &str) -> Slide {
    let mut reader = Reader::from_str(card);
    reader.config_mut().enable_all_checks(false);
    reader.config_mut().allow_unmatched_ends = true;

    let mut src: Option<String> = None;
    let mut alt: Option<String> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    let mut depth = 0usize;
    let mut capture: Option<(Field, usize, String)> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "stopped reading art card markup");
                break;
            }
        };
        match event {
            Event::Start(e) | Event::Empty(e) => {
                let name = e.name().as_ref().to_ascii_lowercase();
                if name == b"img" {
                    if src.is_none() {
                        src = Some(attr(&e, b"src").unwrap_or_default());
                        alt = attr(&e, b"alt");
                    }
                    continue;
                }
                if VOID_ELEMENTS.contains(&name.as_slice()) {
                    continue;
                }
                depth += 1;
                if capture.is_none() {
                    let class = attr(&e, b"class").unwrap_or_default();
                    let has_class = |c: &str| class.split_whitespace().any(|x| x == c);
                    let field = if title.is_none()
                        && (name == b"h1" || name == b"h3" || has_class("title"))
                    {
                        Some(Field::Title)
                    } else if description.is_none() && (name == b"p" || has_class("desc")) {
                        Some(Field::Description)
                    } else {
                        None
                    };
                    if let Some(field) = field {
                        capture = Some((field, depth, String::new()));
                    }
                }
            }
            Event::End(_) => {
                if let Some((field, at, buf)) = capture.take() {
                    if at == depth {
                        let value = buf.trim().to_string();
                        match field {
                            Field::Title => title = Some(value),
                            Field::Description => description = Some(value),
                        }
                    } else {
                        capture = Some((field, at, buf));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) => {
                if let Some((_, _, buf)) = capture.as_mut() {
                    let raw = String::from_utf8_lossy(&t);
                    match quick_xml::escape::unescape(&raw) {
                        Ok(s) => buf.push_str(&s),
                        Err(_) => buf.push_str(&raw),
                    }
                }
            }
            Event::GeneralRef(r) => {
                if let Some((_, _, buf)) = capture.as_mut() {
                    let name = String::from_utf8_lossy(&r);
                    match resolve_reference(&name) {
                        Some(s) => buf.push_str(&s),
                        None => {
                            buf.push('&');
                            buf.push_str(&name);
                            buf.push(';');
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let title = title.unwrap_or_default();
    let alt = alt
        .filter(|a| !a.is_empty())
        .or_else(|| (!title.is_empty()).then(|| title.clone()))
        .unwrap_or_else(|| "Artwork".to_string());

    Slide {
        src: src.unwrap_or_default(),
        alt,
        title,
        description: description.unwrap_or_default(),
    }
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.html_attributes()
        .flatten()
        .find(|a| a.key.as_ref().eq_ignore_ascii_case(key))
        .map(|a| {
            let raw = String::from_utf8_lossy(&a.value).into_owned();
            match quick_xml::escape::unescape(&raw) {
                Ok(s) => s.into_owned(),
                Err(_) => raw,
            }
        })
}

/// Resolve `amp`, `#39`, `#x27` and friends.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    quick_xml::escape::resolve_predefined_entity(name).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ArtCardOptions, render_art_card};
    use crate::metadata::ArtItem;

    fn card(title: &str, image: &str) -> String {
        render_art_card(
            &ArtItem {
                title: title.into(),
                description: format!("About {title}"),
                image: image.into(),
            },
            ArtCardOptions {
                image_fallback: true,
            },
        )
        .into_string()
    }

    fn three() -> Vec<String> {
        vec![card("A", "a.png"), card("B", "b.png"), card("C", "c.png")]
    }

    #[test]
    fn reads_slide_from_rendered_card() {
        let slide = read_slide(&card("Dusk", "./assets/art/dusk.png"));
        assert_eq!(slide.src, "./assets/art/dusk.png");
        assert_eq!(slide.alt, "Dusk");
        assert_eq!(slide.title, "Dusk");
        assert_eq!(slide.description, "About Dusk");
    }

    #[test]
    fn reads_escaped_text_back() {
        let slide = read_slide(&card("Tom & Jerry's <b>", "x&y.png"));
        assert_eq!(slide.title, "Tom & Jerry's <b>");
        assert_eq!(slide.alt, "Tom & Jerry's <b>");
        assert_eq!(slide.src, "x&y.png");
        assert_eq!(slide.description, "About Tom & Jerry's <b>");
    }

    #[test]
    fn alt_falls_back_to_title_then_artwork() {
        let slide = read_slide(r#"<article class="art-card"><img src="a.png"><h3> Sea </h3></article>"#);
        assert_eq!(slide.alt, "Sea");
        assert_eq!(slide.title, "Sea");
        let slide = read_slide(r#"<article class="art-card"><img src="a.png"></article>"#);
        assert_eq!(slide.alt, "Artwork");
        assert_eq!(slide.description, "");
    }

    #[test]
    fn class_selectors_are_recognised() {
        let slide = read_slide(
            r#"<article class="art-card"><span class="title">T</span><div class="desc">D</div></article>"#,
        );
        assert_eq!(slide.title, "T");
        assert_eq!(slide.description, "D");
        assert_eq!(slide.src, "");
    }

    #[test]
    fn resolves_references() {
        assert_eq!(resolve_reference("amp").as_deref(), Some("&"));
        assert_eq!(resolve_reference("#39").as_deref(), Some("'"));
        assert_eq!(resolve_reference("#x27").as_deref(), Some("'"));
        assert_eq!(resolve_reference("nbspx"), None);
    }

    #[test]
    fn opens_at_clicked_card() {
        let mut lb = Lightbox::new();
        lb.click_card(&three(), 1, false);
        assert!(lb.is_open());
        assert_eq!(lb.index(), 1);
        assert_eq!(lb.current().title, "B");
        assert_eq!(lb.focus(), Focus::CloseButton);
        assert!(lb.is_listening());
        assert_eq!(lb.preloaded(), ["a.png", "c.png"]);
    }

    #[test]
    fn click_on_link_opens_and_cancels_navigation() {
        let cards = vec![
            r#"<article class="art-card"><a href="x"><img src="a.png" alt="A"></a><h1>A</h1></article>"#
                .to_string(),
        ];
        let mut lb = Lightbox::new();
        assert!(lb.click_card(&cards, 0, true));
        assert!(lb.is_open());
        assert_eq!(lb.current().src, "a.png");
    }

    #[test]
    fn plain_click_has_no_navigation_to_cancel() {
        let mut lb = Lightbox::new();
        assert!(!lb.click_card(&three(), 2, false));
        assert!(lb.is_open());
    }

    #[test]
    fn click_outside_track_is_ignored() {
        let mut lb = Lightbox::new();
        assert!(!lb.click_card(&three(), 3, true));
        assert!(!lb.is_open());
    }

    #[test]
    fn open_with_no_cards_is_noop() {
        let mut lb = Lightbox::new();
        lb.open_at(&[], 0);
        assert!(!lb.is_open());
        assert!(!lb.is_listening());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut lb = Lightbox::new();
        lb.open_at(&three(), 0);
        lb.prev();
        assert_eq!(lb.index(), 2);
        assert_eq!(lb.current().title, "C");
        lb.next();
        assert_eq!(lb.index(), 0);
        lb.open_at(&three(), 2);
        lb.next();
        assert_eq!(lb.index(), 0);
        assert_eq!(lb.preloaded(), ["c.png", "b.png"]);
    }

    #[test]
    fn arrow_keys_navigate_and_escape_closes() {
        let mut lb = Lightbox::new();
        lb.open_at(&three(), 0);
        lb.key(Key::from_name("ArrowRight"));
        assert_eq!(lb.index(), 1);
        lb.key(Key::from_name("ArrowLeft"));
        lb.key(Key::from_name("ArrowLeft"));
        assert_eq!(lb.index(), 2);
        lb.key(Key::from_name("Enter"));
        assert_eq!(lb.index(), 2);
        lb.key(Key::from_name("Escape"));
        assert!(!lb.is_open());
        assert!(!lb.is_listening());
        assert_eq!(lb.focus(), Focus::Page);
        assert_eq!(lb.slide_count(), 0);
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut lb = Lightbox::new();
        lb.key(Key::ArrowRight);
        assert!(!lb.is_open());
        assert_eq!(lb.index(), 0);
    }

    #[test]
    fn backdrop_click_closes_figure_click_does_not() {
        let mut lb = Lightbox::new();
        lb.open_at(&three(), 0);
        lb.click_overlay(OverlayTarget::Figure);
        lb.click_overlay(OverlayTarget::Control);
        assert!(lb.is_open());
        lb.click_overlay(OverlayTarget::Backdrop);
        assert!(!lb.is_open());
    }

    #[test]
    fn reopen_recollects_slides() {
        let mut lb = Lightbox::new();
        lb.open_at(&three(), 0);
        lb.close();
        let two = vec![card("X", "x.png"), card("Y", "y.png")];
        lb.open_at(&two, 1);
        assert_eq!(lb.slide_count(), 2);
        assert_eq!(lb.current().title, "Y");
    }

    #[test]
    fn markup_reflects_state() {
        let mut lb = Lightbox::new();
        let closed = lb.markup().into_string();
        assert!(closed.contains(r#"aria-hidden="true""#));
        assert!(!closed.contains("is-open"));

        lb.open_at(&three(), 1);
        let open = lb.markup().into_string();
        assert!(open.contains("is-open"));
        assert!(open.contains(r#"aria-hidden="false""#));
        assert!(open.contains(r#"id="lbImg" src="b.png" alt="B""#));
        assert!(open.contains(r#"<h2 id="lbTitle">B</h2>"#));
        assert!(open.contains("lightbox__preload"));
        assert!(open.contains("autofocus"));
    }
}
