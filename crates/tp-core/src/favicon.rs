//! Favicon decoration constants.
//!
//! The packaged icon assets by intensity level, plus the attribute names the
//! page agent uses to mark inserted links and back up the page's own icons.

/// Packaged icon assets by intensity level. Index 0 is the terminal frame
/// rendered just before restoration; the last entry is reused for any level
/// beyond the table.
pub const ICON_ASSETS: [&str; 6] = [
    "icons/pulse-0.png",
    "icons/pulse-1.png",
    "icons/pulse-2.png",
    "icons/pulse-3.png",
    "icons/pulse-4.png",
    "icons/pulse-5.png",
];

/// Attribute a live favicon link's `href` is renamed to during capture.
pub const BACKUP_HREF_ATTR: &str = "data-tabpulse-href";

/// Attribute marking link elements inserted by the decorator.
pub const MARKER_ATTR: &str = "data-tabpulse";

/// Fallback icon prepended on restore for pages without an explicit icon tag.
pub const FALLBACK_FAVICON: &str = "favicon.ico";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_table_covers_countdown_and_terminal_frame() {
        // A 5-second favicon countdown renders levels 5 down to 0.
        assert_eq!(ICON_ASSETS.len(), 6);
    }

    #[test]
    fn marker_and_backup_attributes_are_distinct() {
        assert_ne!(MARKER_ATTR, BACKUP_HREF_ATTR);
    }
}
