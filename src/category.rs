//! Tag category selector.
//!
//! A segmented control with one button per tag category. Exactly one
//! category is active; changing it broadcasts a [`CategoryChange`] to every
//! subscriber. The page subscribes nothing itself: it re-renders the coding
//! carousel from the change returned by [`CategorySelector::set`], and
//! external listeners can hook in through [`CategorySelector::subscribe`].

use crate::sanitize::text;
use maud::{Markup, html};

/// Notification emitted when the selected category changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChange {
    pub value: String,
}

type Listener = Box<dyn FnMut(&CategoryChange)>;

#[derive(Default)]
pub struct CategorySelector {
    categories: Vec<String>,
    value: String,
    listeners: Vec<Listener>,
}

impl CategorySelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the control and select `default`.
    ///
    /// Falls back to the first category when `default` is missing or not
    /// offered, and to an empty selection when there are no categories.
    pub fn render(&mut self, categories: Vec<String>, default: Option<&str>) -> Markup {
        self.value = default
            .filter(|d| categories.iter().any(|c| c == d))
            .map(String::from)
            .or_else(|| categories.first().cloned())
            .unwrap_or_default();
        self.categories = categories;
        self.markup()
    }

    /// Markup for the current state.
    pub fn markup(&self) -> Markup {
        html! {
            div.segmented role="group" aria-label="Tag category" {
                @for c in &self.categories {
                    @let active = *c == self.value;
                    button type="button"
                        class=(if active { "segmented-btn is-active" } else { "segmented-btn" })
                        data-value=(text(c))
                        aria-pressed=(if active { "true" } else { "false" }) {
                        (text(c))
                    }
                }
            }
        }
    }

    /// Select `value` and notify subscribers.
    ///
    /// No-op (returns `None`) when `value` is empty, already selected, or not
    /// one of the offered categories.
    pub fn set(&mut self, value: &str) -> Option<CategoryChange> {
        if value.is_empty() || value == self.value {
            return None;
        }
        if !self.categories.iter().any(|c| c == value) {
            tracing::debug!(category = value, "ignoring unknown tag category");
            return None;
        }
        self.value = value.to_string();
        let change = CategoryChange {
            value: self.value.clone(),
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
        Some(change)
    }

    /// Currently selected category; empty when none.
    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CategoryChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for CategorySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategorySelector")
            .field("categories", &self.categories)
            .field("value", &self.value)
            .field("listeners", &self.listener_count())
            .finish()
    }
}
