//! The decoration engine: activation tracking, countdown scheduling, reaping.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tp_core::{DecorationProfile, OriginalState, ProfileError, TabEvent, TabId, title};
use tracing::{debug, trace};

use crate::agent::PageAgent;
use crate::session::{DecorationSession, SessionRegistry};

/// A countdown tick scheduled by a session's interval task.
///
/// Carries the epoch it was scheduled under so ticks from a torn-down
/// session are discarded instead of mutating a successor's state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tick {
    pub(crate) tab: TabId,
    pub(crate) epoch: u64,
}

/// Owns all decoration state for one process lifetime.
///
/// All state mutation happens on the task driving [`Engine::run`] (or calling
/// the handler methods directly); ticker tasks only send messages. A handler
/// awaits page-agent calls inline, so a slow call delays later events rather
/// than racing them.
pub struct Engine<A: PageAgent> {
    agent: A,
    profile: DecorationProfile,
    /// The tab currently considered foreground. Never cleared once set, even
    /// if that tab is removed; the next activation simply replaces it.
    last_active: Option<TabId>,
    registry: SessionRegistry,
    next_epoch: u64,
    tick_tx: mpsc::UnboundedSender<Tick>,
    tick_rx: mpsc::UnboundedReceiver<Tick>,
}

impl<A: PageAgent> Engine<A> {
    /// Creates an engine for a validated profile.
    pub fn new(agent: A, profile: DecorationProfile) -> Result<Self, ProfileError> {
        profile.validate()?;
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Ok(Self {
            agent,
            profile,
            last_active: None,
            registry: SessionRegistry::default(),
            next_epoch: 0,
            tick_tx,
            tick_rx,
        })
    }

    /// Drives the engine until the event channel closes, then tears down:
    /// every live session is cancelled and restored best-effort.
    ///
    /// Returns the page agent so callers can inspect the final page state.
    pub async fn run(mut self, mut events: mpsc::Receiver<TabEvent>) -> A {
        enum Next {
            Event(Option<TabEvent>),
            Tick(Tick),
        }

        loop {
            let next = tokio::select! {
                event = events.recv() => Next::Event(event),
                Some(tick) = self.tick_rx.recv() => Next::Tick(tick),
            };
            match next {
                Next::Event(Some(event)) => self.handle_event(event).await,
                Next::Event(None) => break,
                Next::Tick(tick) => self.handle_tick(tick).await,
            }
        }
        self.shutdown().await
    }

    /// Processes one host event. Exposed for hosts that drive their own loop.
    pub async fn handle_event(&mut self, event: TabEvent) {
        match event {
            TabEvent::Activated { tab } => self.handle_activated(tab).await,
            TabEvent::Removed { tab } => self.handle_removed(tab).await,
        }
    }

    /// Number of live decoration sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether the tab currently has a live session.
    #[must_use]
    pub fn has_session(&self, tab: TabId) -> bool {
        self.registry.get(tab).is_some()
    }

    /// Remaining countdown seconds for the tab's session, if any.
    #[must_use]
    pub fn seconds_left(&self, tab: TabId) -> Option<i64> {
        self.registry.get(tab).map(|session| session.seconds_left)
    }

    /// The tab currently considered foreground.
    #[must_use]
    pub fn last_active(&self) -> Option<TabId> {
        self.last_active
    }

    #[must_use]
    pub fn profile(&self) -> &DecorationProfile {
        &self.profile
    }

    async fn handle_activated(&mut self, tab: TabId) {
        let Some(previous) = self.last_active else {
            // Cold start: there is no tab being left yet.
            trace!(%tab, "first activation");
            self.last_active = Some(tab);
            return;
        };
        if previous == tab {
            trace!(%tab, "self activation ignored");
            return;
        }
        self.last_active = Some(tab);
        self.start_session(previous).await;
    }

    async fn handle_removed(&mut self, tab: TabId) {
        let Some(session) = self.registry.remove(tab) else {
            trace!(%tab, "removal for tab without session");
            return;
        };
        let original = session.cancel();
        // Uniform teardown: the restore is attempted even though the tab is
        // normally gone by now; the failure is swallowed like any other.
        self.restore_best_effort(tab, &original).await;
        debug!(%tab, "session reaped");
    }

    /// Starts a countdown for the tab the user just left, preempting any
    /// session it already has.
    async fn start_session(&mut self, tab: TabId) {
        if let Some(old) = self.registry.remove(tab) {
            let original = old.cancel();
            self.restore_best_effort(tab, &original).await;
            debug!(%tab, "session preempted");
        }

        let original = match self.agent.capture(tab).await {
            Ok(original) => original,
            Err(err) => {
                // The tab may have closed in the race window; decoration
                // silently does nothing.
                debug!(%tab, error = %err, "capture failed, not decorating");
                return;
            }
        };

        let epoch = self.next_epoch;
        self.next_epoch += 1;

        let countdown = i64::from(self.profile.countdown);
        self.render(tab, countdown, &original).await;

        let ticker = spawn_ticker(self.tick_tx.clone(), tab, epoch, self.profile.tick_interval);
        let displaced = self.registry.insert(DecorationSession::new(
            tab,
            epoch,
            original,
            countdown - 1,
            ticker,
        ));
        debug_assert!(displaced.is_none(), "tab already had a live session");
        debug!(%tab, epoch, "session started");
    }

    pub(crate) async fn handle_tick(&mut self, tick: Tick) {
        let (seconds_left, original) = {
            let Some(session) = self.registry.get(tick.tab) else {
                trace!(tab = %tick.tab, "tick for tab without session discarded");
                return;
            };
            if session.epoch != tick.epoch {
                trace!(tab = %tick.tab, epoch = tick.epoch, "stale tick discarded");
                return;
            }
            (session.seconds_left, session.original.clone())
        };

        let terminal = if self.profile.renders_final_frame {
            seconds_left < 0
        } else {
            seconds_left == 0
        };

        if terminal {
            if let Some(finished) = self.registry.remove(tick.tab) {
                let original = finished.cancel();
                self.restore_best_effort(tick.tab, &original).await;
                debug!(tab = %tick.tab, "countdown finished");
            }
        } else {
            self.render(tick.tab, seconds_left, &original).await;
            if let Some(session) = self.registry.get_mut(tick.tab) {
                session.seconds_left -= 1;
            }
        }
    }

    /// Renders the frame for `seconds_left`, clamped into the level table.
    async fn render(&self, tab: TabId, seconds_left: i64, original: &OriginalState) {
        let level = self
            .profile
            .clamp_level(usize::try_from(seconds_left).unwrap_or(0));
        let payload = self.frame_payload(level, original);
        if let Err(err) = self.agent.apply(tab, level, &payload).await {
            debug!(%tab, level, error = %err, "apply failed");
        }
    }

    fn frame_payload(&self, level: usize, original: &OriginalState) -> String {
        match original {
            OriginalState::Title { title } => title::compose(&self.profile.levels[level], title),
            OriginalState::Favicon { .. } => self.profile.levels[level].clone(),
        }
    }

    async fn restore_best_effort(&self, tab: TabId, original: &OriginalState) {
        if let Err(err) = self.agent.restore(tab, original).await {
            debug!(%tab, error = %err, "restore failed");
        }
    }

    async fn shutdown(mut self) -> A {
        for session in self.registry.drain() {
            let tab = session.tab;
            let original = session.cancel();
            self.restore_best_effort(tab, &original).await;
        }
        debug!("engine stopped");
        self.agent
    }
}

/// Spawns the per-session interval task. It only sends messages; all state
/// stays with the engine.
fn spawn_ticker(
    tx: mpsc::UnboundedSender<Tick>,
    tab: TabId,
    epoch: u64,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = time::interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; the initial frame
        // was already rendered inline.
        ticks.tick().await;
        loop {
            ticks.tick().await;
            if tx.send(Tick { tab, epoch }).is_err() {
                break;
            }
        }
    })
}
