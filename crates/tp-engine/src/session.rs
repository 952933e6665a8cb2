//! In-flight decoration sessions and the registry that owns them.

use std::collections::HashMap;

use tokio::task::JoinHandle;
use tp_core::{OriginalState, TabId};
use tracing::trace;

/// One in-flight countdown for exactly one tab.
///
/// The ticker task handle is owned exclusively by this session; cancelling
/// the session aborts it. A tick message already queued when the session is
/// torn down is discarded by the engine's epoch check.
#[derive(Debug)]
pub(crate) struct DecorationSession {
    pub(crate) tab: TabId,
    /// Generation counter distinguishing this session's ticks from those of
    /// any earlier session on the same tab.
    pub(crate) epoch: u64,
    pub(crate) original: OriginalState,
    /// Remaining countdown seconds. Reaches -1 only in profiles that render
    /// a terminal frame at level 0.
    pub(crate) seconds_left: i64,
    ticker: JoinHandle<()>,
}

impl DecorationSession {
    pub(crate) fn new(
        tab: TabId,
        epoch: u64,
        original: OriginalState,
        seconds_left: i64,
        ticker: JoinHandle<()>,
    ) -> Self {
        Self {
            tab,
            epoch,
            original,
            seconds_left,
            ticker,
        }
    }

    /// Stops the ticker and hands back the captured state for restoration.
    pub(crate) fn cancel(self) -> OriginalState {
        self.ticker.abort();
        trace!(tab = %self.tab, epoch = self.epoch, "session cancelled");
        self.original
    }
}

/// Tab -> session map. The sole synchronization point for per-tab mutual
/// exclusion: starting a session always removes any prior entry first.
#[derive(Debug, Default)]
pub(crate) struct SessionRegistry {
    sessions: HashMap<TabId, DecorationSession>,
}

impl SessionRegistry {
    /// Inserts a session, returning a displaced one if the invariant that a
    /// caller removes the old entry first was violated.
    pub(crate) fn insert(&mut self, session: DecorationSession) -> Option<DecorationSession> {
        self.sessions.insert(session.tab, session)
    }

    pub(crate) fn remove(&mut self, tab: TabId) -> Option<DecorationSession> {
        self.sessions.remove(&tab)
    }

    pub(crate) fn get(&self, tab: TabId) -> Option<&DecorationSession> {
        self.sessions.get(&tab)
    }

    pub(crate) fn get_mut(&mut self, tab: TabId) -> Option<&mut DecorationSession> {
        self.sessions.get_mut(&tab)
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Empties the registry, yielding every live session for teardown.
    pub(crate) fn drain(&mut self) -> Vec<DecorationSession> {
        self.sessions.drain().map(|(_, session)| session).collect()
    }
}
