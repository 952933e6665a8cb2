//! In-memory page host used by the replay driver.
//!
//! Models each tab's document as a title, a set of favicon link hrefs, and an
//! optional decorator-marked link, mirroring what the content-side agent does
//! to a real page. Calls against closed tabs fail the way a real bridge does.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tp_core::{DecorationMode, OriginalState, TabId, favicon, title};
use tp_engine::{AgentError, PageAgent};
use tracing::trace;

/// Observable state of one simulated page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageModel {
    pub title: String,
    /// Live favicon link hrefs, in document order.
    pub favicon_hrefs: Vec<String>,
    /// Hrefs renamed to the backup attribute by a capture.
    pub backup_hrefs: Vec<String>,
    /// Href of the decorator-marked link element, if one is inserted.
    pub marker: Option<String>,
}

#[derive(Debug, Default)]
struct SimState {
    pages: HashMap<TabId, PageModel>,
    closed: HashSet<TabId>,
}

/// Simulated page host implementing [`PageAgent`] over [`PageModel`]s.
#[derive(Debug, Clone)]
pub struct SimulatedPages {
    mode: DecorationMode,
    inner: Arc<Mutex<SimState>>,
}

impl SimulatedPages {
    #[must_use]
    pub fn new(mode: DecorationMode) -> Self {
        Self {
            mode,
            inner: Arc::new(Mutex::new(SimState::default())),
        }
    }

    /// Seeds a page for a tab, replacing any previous model.
    pub fn open_tab(&self, tab: TabId, page_title: &str, favicon_hrefs: Vec<String>) {
        let mut state = self.inner.lock().unwrap();
        state.closed.remove(&tab);
        state.pages.insert(
            tab,
            PageModel {
                title: page_title.to_string(),
                favicon_hrefs,
                ..PageModel::default()
            },
        );
    }

    /// Marks a tab closed; subsequent agent calls against it fail.
    pub fn close_tab(&self, tab: TabId) {
        self.inner.lock().unwrap().closed.insert(tab);
    }

    /// Final page states keyed by raw tab id, for printing and assertions.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<u64, PageModel> {
        self.inner
            .lock()
            .unwrap()
            .pages
            .iter()
            .map(|(tab, page)| (tab.get(), page.clone()))
            .collect()
    }

    fn check_open(state: &SimState, tab: TabId) -> Result<(), AgentError> {
        if state.closed.contains(&tab) {
            Err(AgentError::TabGone(tab))
        } else {
            Ok(())
        }
    }
}

impl PageAgent for SimulatedPages {
    async fn capture(&self, tab: TabId) -> Result<OriginalState, AgentError> {
        let mut state = self.inner.lock().unwrap();
        Self::check_open(&state, tab)?;
        let page = state.pages.entry(tab).or_default();
        match self.mode {
            DecorationMode::Title => {
                let original = title::strip(&page.title).to_string();
                trace!(%tab, title = %original, "captured title");
                Ok(OriginalState::Title { title: original })
            }
            DecorationMode::Favicon => {
                // Hide the live icons by moving their hrefs to the backup
                // attribute, like the content agent does on a real page.
                let hrefs = std::mem::take(&mut page.favicon_hrefs);
                page.backup_hrefs.clone_from(&hrefs);
                trace!(%tab, count = hrefs.len(), "captured favicon hrefs");
                Ok(OriginalState::Favicon { hrefs })
            }
        }
    }

    async fn apply(&self, tab: TabId, level: usize, payload: &str) -> Result<(), AgentError> {
        let mut state = self.inner.lock().unwrap();
        Self::check_open(&state, tab)?;
        let page = state.pages.entry(tab).or_default();
        match self.mode {
            DecorationMode::Title => page.title = payload.to_string(),
            DecorationMode::Favicon => page.marker = Some(payload.to_string()),
        }
        trace!(%tab, level, payload, "applied decoration");
        Ok(())
    }

    async fn restore(&self, tab: TabId, original: &OriginalState) -> Result<(), AgentError> {
        let mut state = self.inner.lock().unwrap();
        Self::check_open(&state, tab)?;
        let page = state.pages.entry(tab).or_default();
        match original {
            OriginalState::Title { title } => page.title.clone_from(title),
            OriginalState::Favicon { hrefs } => {
                page.marker = None;
                page.backup_hrefs.clear();
                // Fallback icon first, for pages lacking an explicit tag.
                let mut restored = Vec::with_capacity(hrefs.len() + 1);
                restored.push(favicon::FALLBACK_FAVICON.to_string());
                restored.extend(hrefs.iter().cloned());
                page.favicon_hrefs = restored;
            }
        }
        trace!(%tab, "restored page state");
        Ok(())
    }
}
