//! Wrap-around card carousel.
//!
//! A carousel shows a window of `visible` consecutive items starting at
//! `first_index`. Indices wrap in both directions, so paging past the last
//! item continues at the first:
//!
//! ```text
//! items:   A B C D E        visible = 3
//! first=0  [A B C]
//! first=3  [D E A]
//! first=4  [E A B]
//! ```
//!
//! The visible count comes from the viewport width via [`Breakpoints`] and is
//! recomputed on every render, never cached. `first_index` survives resizes.
//!
//! The carousel owns its [`Track`], the mount it renders into: the rendered
//! card fragments, the `--visible` value exposed to CSS, and the disabled
//! state of the prev/next buttons.

use maud::{Markup, PreEscaped};

/// Viewport widths at which the visible count steps up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Widths below this show one card.
    pub narrow_below: u32,
    /// Widths below this (and at least `narrow_below`) show two cards.
    pub medium_below: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            narrow_below: 640,
            medium_below: 1024,
        }
    }
}

impl Breakpoints {
    /// Cards per window for a viewport `width` in CSS pixels.
    pub fn visible_count(&self, width: u32) -> usize {
        if width < self.narrow_below {
            1
        } else if width < self.medium_below {
            2
        } else {
            3
        }
    }
}

/// Wrap any integer into `[0, n)`. Returns 0 for an empty list.
pub fn clamp_index(i: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let n = n as i64;
    (((i % n) + n) % n) as usize
}

/// What a card renderer gets besides the item itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub viewport_width: u32,
    /// Selected tag category, if any.
    pub category: Option<&'a str>,
}

/// The mount a carousel renders into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// Rendered card fragments in window order.
    pub cards: Vec<String>,
    /// Effective visible count, `min(visible, n)`, exposed as `--visible`.
    pub visible: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl Track {
    /// Track content as one fragment.
    pub fn markup(&self) -> Markup {
        PreEscaped(self.cards.concat())
    }
}

pub type CardRenderer<T> = Box<dyn Fn(&T, &RenderContext<'_>) -> Markup>;

pub struct Carousel<T> {
    items: Vec<T>,
    first_index: usize,
    breakpoints: Breakpoints,
    render_card: CardRenderer<T>,
    track: Track,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, breakpoints: Breakpoints, render_card: CardRenderer<T>) -> Self {
        Self {
            items,
            first_index: 0,
            breakpoints,
            render_card,
            track: Track::default(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access to the item list. The next `render(ctx, false)` brings
    /// `first_index` back into range.
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn first_index(&self) -> usize {
        self.first_index
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Indices of the items in the current window.
    pub fn window(&self, width: u32) -> Vec<usize> {
        let n = self.items.len();
        let count = self.breakpoints.visible_count(width).min(n);
        (0..count)
            .map(|k| clamp_index(self.first_index as i64 + k as i64, n))
            .collect()
    }

    /// Rebuild the track from the current window.
    ///
    /// Without `keep_index`, `first_index` is re-clamped first, which covers
    /// item lists that shrank since the last render.
    pub fn render(&mut self, ctx: &RenderContext<'_>, keep_index: bool) {
        let n = self.items.len();
        if !keep_index {
            self.first_index = clamp_index(self.first_index as i64, n);
        }
        let count = self.breakpoints.visible_count(ctx.viewport_width);

        let cards = self
            .window(ctx.viewport_width)
            .into_iter()
            .map(|i| (self.render_card)(&self.items[i], ctx).into_string())
            .collect();

        let disable = n <= count;
        self.track = Track {
            cards,
            visible: count.min(n),
            prev_disabled: disable,
            next_disabled: disable,
        };
    }

    pub fn next(&mut self, ctx: &RenderContext<'_>) {
        self.step(ctx, 1);
    }

    pub fn prev(&mut self, ctx: &RenderContext<'_>) {
        self.step(ctx, -1);
    }

    fn step(&mut self, ctx: &RenderContext<'_>, delta: i64) {
        self.first_index = clamp_index(self.first_index as i64 + delta, self.items.len());
        self.render(ctx, true);
    }
}

impl<T> std::fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.items.len())
            .field("first_index", &self.first_index)
            .field("track", &self.track)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::html;

    const WIDE: u32 = 1280;
    const MEDIUM: u32 = 800;
    const NARROW: u32 = 400;

    fn ctx(width: u32) -> RenderContext<'static> {
        RenderContext {
            viewport_width: width,
            category: None,
        }
    }

    fn letters(n: usize) -> Carousel<char> {
        let items = ('A'..='Z').take(n).collect();
        Carousel::new(
            items,
            Breakpoints::default(),
            Box::new(|c: &char, _: &RenderContext<'_>| html! { i { (c) } }),
        )
    }

    fn shown(c: &Carousel<char>) -> String {
        c.track()
            .cards
            .iter()
            .map(|s| s.trim_start_matches("<i>").trim_end_matches("</i>"))
            .collect()
    }

    #[test]
    fn visible_count_policy() {
        let bp = Breakpoints::default();
        assert_eq!(bp.visible_count(0), 1);
        assert_eq!(bp.visible_count(639), 1);
        assert_eq!(bp.visible_count(640), 2);
        assert_eq!(bp.visible_count(1023), 2);
        assert_eq!(bp.visible_count(1024), 3);
        assert_eq!(bp.visible_count(4000), 3);
    }

    #[test]
    fn clamp_index_in_range_and_periodic() {
        for n in 1..=7usize {
            for i in -30i64..30 {
                let c = clamp_index(i, n);
                assert!(c < n, "clamp_index({i}, {n}) = {c}");
                assert_eq!(c, clamp_index(i + n as i64, n));
            }
        }
    }

    #[test]
    fn clamp_index_negative() {
        assert_eq!(clamp_index(-1, 5), 4);
        assert_eq!(clamp_index(-6, 5), 4);
        assert_eq!(clamp_index(7, 5), 2);
    }

    #[test]
    fn clamp_index_empty_is_zero() {
        assert_eq!(clamp_index(0, 0), 0);
        assert_eq!(clamp_index(-3, 0), 0);
        assert_eq!(clamp_index(42, 0), 0);
    }

    #[test]
    fn empty_carousel_renders_nothing_and_disables_nav() {
        let mut c = letters(0);
        c.render(&ctx(WIDE), false);
        assert!(c.track().cards.is_empty());
        assert_eq!(c.track().visible, 0);
        assert!(c.track().prev_disabled);
        assert!(c.track().next_disabled);
        c.next(&ctx(WIDE));
        assert_eq!(c.first_index(), 0);
    }

    #[test]
    fn nav_disabled_when_everything_fits() {
        let mut c = letters(3);
        c.render(&ctx(WIDE), false);
        assert_eq!(shown(&c), "ABC");
        assert!(c.track().prev_disabled && c.track().next_disabled);
    }

    #[test]
    fn nav_enabled_when_items_overflow() {
        let mut c = letters(3);
        c.render(&ctx(MEDIUM), false);
        assert_eq!(shown(&c), "AB");
        assert!(!c.track().prev_disabled && !c.track().next_disabled);
    }

    #[test]
    fn window_wraps_past_the_end() {
        let mut c = letters(5);
        c.render(&ctx(WIDE), false);
        for _ in 0..3 {
            c.next(&ctx(WIDE));
        }
        assert_eq!(c.first_index(), 3);
        assert_eq!(shown(&c), "DEA");
        c.next(&ctx(WIDE));
        assert_eq!(shown(&c), "EAB");
    }

    #[test]
    fn prev_wraps_to_the_end() {
        let mut c = letters(5);
        c.render(&ctx(NARROW), false);
        c.prev(&ctx(NARROW));
        assert_eq!(c.first_index(), 4);
        assert_eq!(shown(&c), "E");
    }

    #[test]
    fn resize_keeps_first_index() {
        let mut c = letters(6);
        c.render(&ctx(WIDE), false);
        c.next(&ctx(WIDE));
        c.next(&ctx(WIDE));
        c.render(&ctx(NARROW), true);
        assert_eq!(c.first_index(), 2);
        assert_eq!(shown(&c), "C");
        assert_eq!(c.track().visible, 1);
        c.render(&ctx(MEDIUM), true);
        assert_eq!(shown(&c), "CD");
    }

    #[test]
    fn visible_never_exceeds_item_count() {
        let mut c = letters(2);
        c.render(&ctx(WIDE), false);
        assert_eq!(c.track().visible, 2);
        assert_eq!(shown(&c), "AB");
    }

    #[test]
    fn render_reclamps_after_items_shrink() {
        let mut c = letters(6);
        c.render(&ctx(NARROW), false);
        for _ in 0..5 {
            c.next(&ctx(NARROW));
        }
        assert_eq!(c.first_index(), 5);
        c.items_mut().truncate(4);
        c.render(&ctx(NARROW), false);
        assert_eq!(c.first_index(), 1);
        assert_eq!(shown(&c), "B");
    }

    #[test]
    fn renderer_sees_context() {
        let mut c = Carousel::new(
            vec![1, 2],
            Breakpoints::default(),
            Box::new(|n: &i32, ctx: &RenderContext<'_>| {
                html! { b { (n) ":" (ctx.category.unwrap_or("-")) } }
            }),
        );
        c.render(
            &RenderContext {
                viewport_width: WIDE,
                category: Some("skill"),
            },
            false,
        );
        assert_eq!(c.track().markup().into_string(), "<b>1:skill</b><b>2:skill</b>");
    }
}
