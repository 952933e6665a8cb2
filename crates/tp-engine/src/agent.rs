//! The interface through which the engine reaches a tab's document.

use thiserror::Error;
use tp_core::{OriginalState, TabId};

/// Errors surfaced by a page host.
///
/// Every engine call site treats these as best-effort failures: they are
/// logged at debug level and swallowed, never propagated.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The target tab no longer exists (closed or navigated away mid-call).
    #[error("tab {0} is gone")]
    TabGone(TabId),

    /// The page-side call failed for any other reason.
    #[error("page call failed: {0}")]
    Page(String),
}

/// Message-passing interface to a content-side agent that can read and
/// mutate one tab's rendered document.
///
/// In a browser deployment this bridges to an injected content script; the
/// replay driver and tests implement it over an in-memory page model.
#[expect(
    async_fn_in_trait,
    reason = "the engine runs agent futures on its own task; no Send bound is required"
)]
pub trait PageAgent {
    /// Captures the tab's pre-decoration state.
    ///
    /// Title mode reads the current title, stripping any decoration prefix a
    /// previous run left behind. Favicon mode renames the live favicon link
    /// hrefs to the backup attribute and returns the original href set.
    async fn capture(&self, tab: TabId) -> Result<OriginalState, AgentError>;

    /// Renders one decoration frame.
    ///
    /// `payload` is the fully-resolved content for this frame: the composed
    /// title string in title mode, the icon asset path in favicon mode.
    async fn apply(&self, tab: TabId, level: usize, payload: &str) -> Result<(), AgentError>;

    /// Puts the captured state back on the page.
    async fn restore(&self, tab: TabId, original: &OriginalState) -> Result<(), AgentError>;
}
