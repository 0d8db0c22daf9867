//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns a string occupies
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `max_cols` terminal columns.
///
/// Cuts on character boundaries, so wide characters (CJK, emoji) that would
/// straddle the limit are dropped entirely rather than split.
pub fn truncate_to_width(s: &str, max_cols: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_cols {
            return &s[..idx];
        }
        used += w;
    }
    s
}
