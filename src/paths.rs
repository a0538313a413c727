//! Art image path resolution.
//!
//! Art entries in `metadata.json` name their image either as a bare filename
//! (`cat.png`) or as something already usable as a `src` (`sub/cat.png`,
//! `https://cdn.example/cat.png`). Bare filenames are resolved against the
//! configured art base directory; everything else passes through.

/// Default base for bare art filenames.
pub const ART_BASE: &str = "./assets/art/";

/// Resolve an image field into a usable path.
///
/// - `"cat.png"` → `"./assets/art/cat.png"`
/// - `"sub/cat.png"` → unchanged
/// - `"https://x/y.png"` → unchanged
/// - `"  "` → `""`
pub fn normalize_art_path(value: &str, base: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        return String::new();
    }
    if is_remote(v) || v.contains('/') {
        return v.to_string();
    }
    format!("{base}{v}")
}

/// True for `http://` and `https://` URLs.
pub fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_filename_gets_base() {
        assert_eq!(normalize_art_path("cat.png", ART_BASE), "./assets/art/cat.png");
    }

    #[test]
    fn url_passes_through() {
        assert_eq!(
            normalize_art_path("https://x/y.png", ART_BASE),
            "https://x/y.png"
        );
        assert_eq!(normalize_art_path("http://x/y.png", ART_BASE), "http://x/y.png");
    }

    #[test]
    fn path_with_separator_passes_through() {
        assert_eq!(normalize_art_path("sub/cat.png", ART_BASE), "sub/cat.png");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize_art_path("  cat.png ", ART_BASE), "./assets/art/cat.png");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_art_path("", ART_BASE), "");
        assert_eq!(normalize_art_path("   ", ART_BASE), "");
    }

    #[test]
    fn custom_base() {
        assert_eq!(normalize_art_path("a.jpg", "/img/"), "/img/a.jpg");
    }
}
