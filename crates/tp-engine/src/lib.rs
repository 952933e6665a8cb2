//! Runtime engine for tabpulse.
//!
//! Consumes tab lifecycle events from the host and manages the per-tab
//! decoration countdown: when the user switches away from a tab, that tab is
//! decorated with a fading countdown and restored once the countdown ends, the
//! tab is closed, or a newer session preempts the old one.
//!
//! The engine never touches a tab's rendered document itself; all page access
//! goes through the [`PageAgent`] trait, whose calls are best-effort and may
//! fail at any time (the tab may be gone). Failures are swallowed: nothing in
//! the engine aborts the event loop.

mod agent;
mod engine;
mod session;

pub use agent::{AgentError, PageAgent};
pub use engine::Engine;
