//! Per-path replay/live phase tracking.

use std::collections::HashMap;

use crate::EventKind;

/// Tracks which subscribed paths have finished their backlog replay.
///
/// A path starts `uninitialized`. The sync service only delivers a `value`
/// notification for a path once its backlog has been fully replayed, so
/// every event observed on a still-uninitialized path is a replay event and
/// the first `value` flips the path to `initialized` — a terminal state for
/// the path's lifetime. Replay events are counted globally so they can be
/// trimmed off the actual queue once every path is live.
#[derive(Debug, Default)]
pub(crate) struct InitTracker {
    paths: HashMap<String, bool>,
    replay_events: usize,
}

impl InitTracker {
    /// Start tracking a raw path in the uninitialized state.
    ///
    /// Re-tracking an already known path keeps its current state: listeners
    /// are created at most once per path, but expectation batches may name
    /// the same path repeatedly.
    pub(crate) fn track(&mut self, raw_path: &str) {
        self.paths.entry(raw_path.to_string()).or_insert(false);
    }

    /// Returns true if the path has completed its replay phase.
    ///
    /// Unknown paths report false; dispatch only sees paths the registrar
    /// has tracked.
    pub(crate) fn is_initialized(&self, raw_path: &str) -> bool {
        self.paths.get(raw_path).copied().unwrap_or(false)
    }

    /// Record a replay event on a still-uninitialized path.
    ///
    /// Increments the global replay counter; a `value` kind completes the
    /// path's replay phase.
    pub(crate) fn note_replay(&mut self, raw_path: &str, kind: EventKind) {
        self.replay_events += 1;
        if kind == EventKind::Value {
            if let Some(initialized) = self.paths.get_mut(raw_path) {
                *initialized = true;
                tracing::debug!(path = raw_path, "replay complete");
            }
        }
    }

    /// Returns true once every tracked path has initialized.
    ///
    /// An empty tracker is trivially initialized.
    pub(crate) fn all_initialized(&self) -> bool {
        self.paths.values().all(|initialized| *initialized)
    }

    /// Returns the accumulated replay count and resets it to zero.
    pub(crate) fn take_replay_count(&mut self) -> usize {
        std::mem::take(&mut self.replay_events)
    }

    #[cfg(test)]
    pub(crate) fn replay_count(&self) -> usize {
        self.replay_events
    }
}
