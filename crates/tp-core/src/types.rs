//! Tab identifiers and host-delivered tab lifecycle events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle identifying a browser tab.
///
/// Supplied by the host environment, never generated internally.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    /// Creates a `TabId` from the host's raw numeric value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TabId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A tab lifecycle event delivered by the host environment.
///
/// Events arrive in activation order, exactly once per transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabEvent {
    /// The tab became the foreground tab.
    Activated { tab: TabId },
    /// The tab was closed.
    Removed { tab: TabId },
}

impl TabEvent {
    /// The tab this event concerns.
    #[must_use]
    pub const fn tab(self) -> TabId {
        match self {
            Self::Activated { tab } | Self::Removed { tab } => tab,
        }
    }
}
