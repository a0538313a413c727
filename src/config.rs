//! Page configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives next
//! to `metadata.json` in the source directory; every key is optional and
//! overrides the stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Portfolio"       # <title> and header text
//! viewport_width = 1280     # Width the static page is laid out for
//!
//! [paths]
//! art_base = "./assets/art/" # Base for bare art filenames
//!
//! [carousel]
//! narrow_below = 640        # Below this width: one card per window
//! medium_below = 1024       # Below this width: two cards; otherwise three
//! resize_debounce_ms = 120  # Quiet period before a resize re-renders
//!
//! [categories]
//! default = "content"       # Preferred initial tag category
//!
//! [art]
//! image_fallback = true     # Show a "not found" card for missing images
//!
//! [sections]
//! coding = true             # Mount the coding carousel
//! art = true                # Mount the art carousel
//! lightbox = true           # Mount the art lightbox
//!
//! [theme.light]            # Page palette; [theme.dark] mirrors it
//! page = "#fbfaf7"          # Page background
//! surface = "#ffffff"       # Card and segmented control background
//! text = "#1d1d1f"
//! muted = "#6b6b70"         # Descriptions, footer
//! accent = "#2f5d8a"        # Links, active category, tag chips
//! on_accent = "#ffffff"     # Text on accent
//! border = "#e3e1dc"
//! backdrop = "rgba(10, 10, 12, 0.88)" # Lightbox overlay
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::Breakpoints;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Page configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub site: SiteConfig,
    pub paths: PathsConfig,
    pub carousel: CarouselConfig,
    pub categories: CategoriesConfig,
    pub art: ArtConfig,
    pub sections: SectionsConfig,
    pub theme: ThemeConfig,
}

impl FolioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.viewport_width == 0 {
            return Err(ConfigError::Validation(
                "site.viewport_width must be non-zero".into(),
            ));
        }
        if self.carousel.narrow_below == 0 || self.carousel.medium_below == 0 {
            return Err(ConfigError::Validation(
                "carousel breakpoints must be non-zero".into(),
            ));
        }
        if self.carousel.narrow_below >= self.carousel.medium_below {
            return Err(ConfigError::Validation(
                "carousel.narrow_below must be less than carousel.medium_below".into(),
            ));
        }
        if self.paths.art_base.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.art_base must not be empty".into(),
            ));
        }
        for (scheme, palette) in [("light", &self.theme.light), ("dark", &self.theme.dark)] {
            if let Some(entry) = palette.blank_entry() {
                return Err(ConfigError::Validation(format!(
                    "theme.{scheme}.{entry} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title, shown in `<title>` and the header.
    pub title: String,
    /// Viewport width, in CSS pixels, the static page is rendered for.
    pub viewport_width: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            viewport_width: 1280,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Prefix for bare art filenames.
    pub art_base: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            art_base: crate::paths::ART_BASE.to_string(),
        }
    }
}

/// Carousel breakpoints and resize behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub narrow_below: u32,
    pub medium_below: u32,
    pub resize_debounce_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let bp = Breakpoints::default();
        Self {
            narrow_below: bp.narrow_below,
            medium_below: bp.medium_below,
            resize_debounce_ms: 120,
        }
    }
}

impl CarouselConfig {
    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            narrow_below: self.narrow_below,
            medium_below: self.medium_below,
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoriesConfig {
    /// Preferred initial category; the first available one is used when absent.
    pub default: String,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            default: "content".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtConfig {
    /// Swap art cards with missing or broken images into a "not found" state.
    pub image_fallback: bool,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            image_fallback: true,
        }
    }
}

/// Which page mounts exist. A missing mount disables its subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionsConfig {
    pub coding: bool,
    pub art: bool,
    pub lightbox: bool,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            coding: true,
            art: true,
            lightbox: true,
        }
    }
}

/// Page palettes, one per `prefers-color-scheme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub light: Palette,
    pub dark: Palette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light: Palette::light(),
            dark: Palette::dark(),
        }
    }
}

/// Colors for one scheme. Any CSS color value is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub page: String,
    /// Card and segmented control background.
    pub surface: String,
    pub text: String,
    pub muted: String,
    /// Links, the active category button and tag chips.
    pub accent: String,
    pub on_accent: String,
    pub border: String,
    /// Lightbox overlay.
    pub backdrop: String,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            page: "#fbfaf7".into(),
            surface: "#ffffff".into(),
            text: "#1d1d1f".into(),
            muted: "#6b6b70".into(),
            accent: "#2f5d8a".into(),
            on_accent: "#ffffff".into(),
            border: "#e3e1dc".into(),
            backdrop: "rgba(10, 10, 12, 0.88)".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            page: "#121214".into(),
            surface: "#1c1c1f".into(),
            text: "#ececee".into(),
            muted: "#9a9aa0".into(),
            accent: "#8ab4e0".into(),
            on_accent: "#0d1b2a".into(),
            border: "#2c2c30".into(),
            backdrop: "rgba(0, 0, 0, 0.92)".into(),
        }
    }

    /// `(custom property, value)` pairs in stylesheet order.
    fn css_vars(&self) -> [(&'static str, &str); 8] {
        [
            ("--folio-page", self.page.as_str()),
            ("--folio-surface", self.surface.as_str()),
            ("--folio-text", self.text.as_str()),
            ("--folio-muted", self.muted.as_str()),
            ("--folio-accent", self.accent.as_str()),
            ("--folio-on-accent", self.on_accent.as_str()),
            ("--folio-border", self.border.as_str()),
            ("--folio-backdrop", self.backdrop.as_str()),
        ]
    }

    /// Name of the first blank entry, if any.
    fn blank_entry(&self) -> Option<String> {
        self.css_vars()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name.trim_start_matches("--folio-").replace('-', "_"))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(FolioConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base), toml::Value::Table(overlay)) => {
            merge_tables(&mut base, overlay);
            toml::Value::Table(base)
        }
        (_, overlay) => overlay,
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let merged = match (base.remove(&key), value) {
            (Some(toml::Value::Table(mut nested)), toml::Value::Table(patch)) => {
                merge_tables(&mut nested, patch);
                toml::Value::Table(nested)
            }
            (_, value) => value,
        };
        base.insert(key, merged);
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FolioConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FolioConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<FolioConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`. Used by `folio gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Page title, used for <title> and the page header.
title = "Portfolio"

# Viewport width (CSS pixels) the static page is laid out for. Decides how
# many cards each carousel shows in the generated HTML.
viewport_width = 1280

# ---------------------------------------------------------------------------
# Paths
# ---------------------------------------------------------------------------
[paths]
# Bare art filenames ("dusk.png") are prefixed with this. Values that are
# URLs or contain a "/" are used as-is.
art_base = "./assets/art/"

# ---------------------------------------------------------------------------
# Carousels
# ---------------------------------------------------------------------------
[carousel]
# Widths below narrow_below show one card, below medium_below two cards,
# anything wider three cards.
narrow_below = 640
medium_below = 1024

# Quiet period after the last resize before carousels re-render.
resize_debounce_ms = 120

# ---------------------------------------------------------------------------
# Tag categories
# ---------------------------------------------------------------------------
[categories]
# Category selected on load. Falls back to the first category (sorted)
# when no project uses it.
default = "content"

# ---------------------------------------------------------------------------
# Artwork
# ---------------------------------------------------------------------------
[art]
# Render art cards whose image is missing or fails to load in a
# "not found" state instead of a broken image.
image_fallback = true

# ---------------------------------------------------------------------------
# Sections
# ---------------------------------------------------------------------------
[sections]
# Turning a section off removes its mount from the page; the matching
# subsystem then does nothing.
coding = true
art = true
lightbox = true

# ---------------------------------------------------------------------------
# Theme (light applies by default, dark under prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[theme.light]
page = "#fbfaf7"
surface = "#ffffff"        # Cards, segmented control
text = "#1d1d1f"
muted = "#6b6b70"          # Descriptions, footer
accent = "#2f5d8a"         # Links, active category, tag chips
on_accent = "#ffffff"      # Text drawn on accent
border = "#e3e1dc"
backdrop = "rgba(10, 10, 12, 0.88)"  # Lightbox overlay

[theme.dark]
page = "#121214"
surface = "#1c1c1f"
text = "#ececee"
muted = "#9a9aa0"
accent = "#8ab4e0"
on_accent = "#0d1b2a"
border = "#2c2c30"
backdrop = "rgba(0, 0, 0, 0.92)"
"##
}

/// Theme palettes as CSS custom properties. The dark palette applies under
/// `prefers-color-scheme: dark`.
pub fn theme_css(theme: &ThemeConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in theme.light.css_vars() {
        css.push_str(&format!("    {name}: {value};\n"));
    }
    css.push_str("}\n\n@media (prefers-color-scheme: dark) {\n    :root {\n");
    for (name, value) in theme.dark.css_vars() {
        css.push_str(&format!("        {name}: {value};\n"));
    }
    css.push_str("    }\n}\n");
    css
}
