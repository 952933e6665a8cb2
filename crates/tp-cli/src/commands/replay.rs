//! Replay a tab-event feed through the engine against simulated pages.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::sync::mpsc;
use tp_core::{DecorationProfile, TabEvent, TabId};
use tp_engine::Engine;
use tracing::debug;

use crate::sim::SimulatedPages;

/// One line of a replay feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayStep {
    /// Forwarded to the engine as a tab activation.
    Activated { tab: TabId },
    /// Closes the simulated tab, then forwards the removal.
    Removed { tab: TabId },
    /// Pauses the feed so countdowns can tick.
    Wait { ms: u64 },
}

/// Runs the feed to completion and prints the final page states as JSON.
///
/// The engine shuts down when the feed ends, restoring any countdown still in
/// flight; append a `wait` step if a feed should let countdowns finish first.
pub async fn run(profile: DecorationProfile, input: Option<&Path>) -> Result<()> {
    let steps = read_steps(input)?;
    debug!(steps = steps.len(), mode = %profile.mode, "replaying feed");

    let pages = SimulatedPages::new(profile.mode);
    let mut seeded = BTreeSet::new();
    for step in &steps {
        if let ReplayStep::Activated { tab } | ReplayStep::Removed { tab } = step {
            if seeded.insert(tab.get()) {
                pages.open_tab(*tab, &format!("Tab {tab}"), vec!["/favicon-32.png".to_string()]);
            }
        }
    }

    let engine = Engine::new(pages.clone(), profile)?;
    let (tx, rx) = mpsc::channel(64);

    let feeder_pages = pages.clone();
    let feeder = async move {
        for step in steps {
            match step {
                ReplayStep::Activated { tab } => {
                    if tx.send(TabEvent::Activated { tab }).await.is_err() {
                        break;
                    }
                }
                ReplayStep::Removed { tab } => {
                    feeder_pages.close_tab(tab);
                    if tx.send(TabEvent::Removed { tab }).await.is_err() {
                        break;
                    }
                }
                ReplayStep::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms)).await,
            }
        }
    };

    let (pages_back, ()) = tokio::join!(engine.run(rx), feeder);

    println!("{}", serde_json::to_string_pretty(&pages_back.snapshot())?);
    Ok(())
}

fn read_steps(input: Option<&Path>) -> Result<Vec<ReplayStep>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("failed to open feed {}", path.display())
        })?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut steps = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read feed line")?;
        if line.trim().is_empty() {
            continue;
        }
        let step = serde_json::from_str(&line)
            .with_context(|| format!("invalid feed step on line {}", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn feed_steps_parse_from_jsonl() {
        let step: ReplayStep = serde_json::from_str(r#"{"type":"activated","tab":1}"#).unwrap();
        assert_eq!(step, ReplayStep::Activated { tab: TabId::new(1) });

        let step: ReplayStep = serde_json::from_str(r#"{"type":"removed","tab":2}"#).unwrap();
        assert_eq!(step, ReplayStep::Removed { tab: TabId::new(2) });

        let step: ReplayStep = serde_json::from_str(r#"{"type":"wait","ms":500}"#).unwrap();
        assert_eq!(step, ReplayStep::Wait { ms: 500 });
    }

    #[test]
    fn read_steps_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"activated","tab":1}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"type":"wait","ms":10}}"#).unwrap();

        let steps = read_steps(Some(file.path())).unwrap();
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn read_steps_reports_the_bad_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"activated","tab":1}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        let err = read_steps(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn read_steps_fails_for_missing_file() {
        let err = read_steps(Some(Path::new("/nonexistent/feed.jsonl"))).unwrap_err();
        assert!(err.to_string().contains("failed to open feed"));
    }
}
