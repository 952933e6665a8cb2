//! Captured page state used for restoration.

use serde::{Deserialize, Serialize};

/// The page state captured once at session start, before any decoration.
///
/// Restoration hands this back to the page agent verbatim; a session never
/// re-captures after its first frame, so repeated decoration cannot compound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OriginalState {
    /// The tab's undecorated title.
    Title { title: String },
    /// The original favicon link hrefs. The capture call has already renamed
    /// them to the backup attribute on the page, so the live document carries
    /// no visible icon until a decoration frame or a restore lands.
    Favicon { hrefs: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_state_serde_roundtrip() {
        let state = OriginalState::Title {
            title: "Rust Book".to_string(),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"kind":"title","title":"Rust Book"}"#);
        let parsed: OriginalState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn favicon_state_serde_roundtrip() {
        let state = OriginalState::Favicon {
            hrefs: vec!["/a.png".to_string(), "/b.ico".to_string()],
        };
        let json = serde_json::to_string(&state).unwrap();
        let parsed: OriginalState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
