//! Title decoration: glyph table, composition, and prefix stripping.

/// Separator between the countdown glyph and the original title.
pub const TITLE_DELIMITER: &str = " - ";

/// Countdown glyphs by intensity level. Index 0 is the final, least intense
/// frame; the last entry is reused for any level beyond the table.
pub const EMOJI_DIGITS: [&str; 11] = [
    "0\u{fe0f}\u{20e3}",
    "1\u{fe0f}\u{20e3}",
    "2\u{fe0f}\u{20e3}",
    "3\u{fe0f}\u{20e3}",
    "4\u{fe0f}\u{20e3}",
    "5\u{fe0f}\u{20e3}",
    "6\u{fe0f}\u{20e3}",
    "7\u{fe0f}\u{20e3}",
    "8\u{fe0f}\u{20e3}",
    "9\u{fe0f}\u{20e3}",
    "\u{1f51f}",
];

/// Composes a decorated title from a glyph and the undecorated original.
#[must_use]
pub fn compose(glyph: &str, original: &str) -> String {
    format!("{glyph}{TITLE_DELIMITER}{original}")
}

/// Strips a previously-applied decoration prefix, if present.
///
/// Only a recognized `{glyph}{delimiter}` prefix is removed; a title that
/// legitimately contains the delimiter is returned intact. This keeps capture
/// self-healing against repeated decoration even without session continuity.
#[must_use]
pub fn strip(title: &str) -> &str {
    for glyph in &EMOJI_DIGITS {
        if let Some(rest) = title
            .strip_prefix(glyph)
            .and_then(|rest| rest.strip_prefix(TITLE_DELIMITER))
        {
            return rest;
        }
    }
    title
}
