//! HTML escaping for interpolated text.
//!
//! Maud escapes `&`, `<`, `>` and `"` on its own but leaves `'` alone. Card
//! markup may end up inside single-quoted attributes of hand-written page
//! shells, so every interpolated field goes through [`escape_html`] instead
//! and is handed to Maud as pre-escaped text via [`text`].

use maud::PreEscaped;

/// Escape the five HTML-significant characters.
///
/// ```text
/// <b>&"'  →  &lt;b&gt;&amp;&quot;&#39;
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value. Same table as [`escape_html`].
pub fn escape_attr(s: &str) -> String {
    escape_html(s)
}

/// Escape `s` and wrap it so Maud inserts it verbatim.
pub fn text(s: &str) -> PreEscaped<String> {
    PreEscaped(escape_html(s))
}
