//! Shared mutable state of one harness instance.

use crate::{comparator, init_tracker::InitTracker, Error, EventRecord, Result};

/// The queues and phase state behind one [`EventHarness`](crate::EventHarness).
///
/// Owned behind a single `Rc<RefCell<_>>`: listener callbacks, the
/// registrar, and the façade all mutate through the same cell. Delivery is
/// single-threaded and cooperative, so borrows never overlap.
#[derive(Debug, Default)]
pub(crate) struct HarnessState {
    /// Pre-rendered failure-message prefix (`"name: "` or empty).
    label: String,
    expected: Vec<EventRecord>,
    actual: Vec<EventRecord>,
    tracker: InitTracker,
    /// First mismatch observed during live dispatch, held until polled.
    deferred: Option<Error>,
}

impl HarnessState {
    pub(crate) fn new(label: Option<&str>) -> Self {
        Self {
            label: label.map(|l| format!("{l}: ")).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Append a declared expectation.
    pub(crate) fn push_expected(&mut self, record: EventRecord) {
        self.expected.push(record);
    }

    /// Start tracking a raw path's initialization state.
    pub(crate) fn track_path(&mut self, raw_path: &str) {
        self.tracker.track(raw_path);
    }

    /// The sink every path listener forwards into.
    ///
    /// Replay events (path still uninitialized) are appended and counted
    /// for the later tail trim. Live events are appended and immediately
    /// compared, so an ordering violation is pinned to the offending
    /// arrival; a failure found here is deferred and surfaced by the next
    /// [`waiter`](Self::waiter) call rather than unwinding through the
    /// client's delivery machinery.
    pub(crate) fn dispatch(&mut self, raw_path: &str, record: EventRecord) {
        if self.tracker.is_initialized(raw_path) {
            tracing::trace!(path = raw_path, %record, "live event");
            self.actual.push(record);
            if self.deferred.is_none() {
                if let Err(err) = comparator::compare(&self.label, &self.expected, &self.actual) {
                    tracing::debug!(%err, "live dispatch detected divergence");
                    self.deferred = Some(err);
                }
            }
        } else {
            tracing::trace!(path = raw_path, %record, "replay event");
            let kind = record.kind();
            self.actual.push(record);
            self.tracker.note_replay(raw_path, kind);
        }
    }

    /// Poll the comparator. See [`EventHarness::waiter`](crate::EventHarness::waiter).
    pub(crate) fn waiter(&self) -> Result<bool> {
        if let Some(err) = &self.deferred {
            return Err(err.clone());
        }
        comparator::compare(&self.label, &self.expected, &self.actual)
    }

    /// Poll for replay completion across all tracked paths.
    ///
    /// Returns false while any path is still replaying. On the first call
    /// after the last path initializes, trims the accumulated replay events
    /// off the actual-queue tail and zeroes the counter; later calls are
    /// no-ops that keep returning true.
    pub(crate) fn watches_initialized(&mut self) -> bool {
        if !self.tracker.all_initialized() {
            return false;
        }
        let replayed = self.tracker.take_replay_count();
        if replayed > 0 {
            // Assumes replay events sit contiguously at the tail. A live
            // event interleaved with another path's ongoing replay would be
            // trimmed with them; see DESIGN.md.
            debug_assert!(replayed <= self.actual.len());
            let keep = self.actual.len().saturating_sub(replayed);
            self.actual.truncate(keep);
            tracing::debug!(replayed, remaining = keep, "trimmed replay events");
        }
        true
    }

    pub(crate) fn expected_count(&self) -> usize {
        self.expected.len()
    }

    pub(crate) fn actual_count(&self) -> usize {
        self.actual.len()
    }

    pub(crate) fn expected_records(&self) -> &[EventRecord] {
        &self.expected
    }

    pub(crate) fn actual_records(&self) -> &[EventRecord] {
        &self.actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventKind;

    fn value(path: &str, key: &str) -> EventRecord {
        EventRecord::new(path, EventKind::Value, Some(key.to_string()))
    }

    fn added(path: &str, key: &str) -> EventRecord {
        EventRecord::new(path, EventKind::ChildAdded, Some(key.to_string()))
    }

    fn state_with_path(path: &str) -> HarnessState {
        let mut state = HarnessState::new(None);
        state.track_path(path);
        state
    }

    #[test]
    fn replay_events_accumulate_without_eager_comparison() {
        let mut state = state_with_path("/a");
        // Deliberately not what the expectation queue would hold: replay
        // dispatch must never run the comparator.
        state.dispatch("/a", added("/a", "x"));
        state.dispatch("/a", added("/a", "y"));
        assert_eq!(state.actual_count(), 2);
        assert!(state.deferred.is_none());
    }

    #[test]
    fn watches_initialized_false_until_value_arrives() {
        let mut state = state_with_path("/a");
        state.dispatch("/a", added("/a", "x"));
        assert!(!state.watches_initialized());

        state.dispatch("/a", value("/a", "a"));
        assert!(state.watches_initialized());
    }

    #[test]
    fn initialization_strips_exactly_the_replay_tail() {
        let mut state = state_with_path("/a");
        state.track_path("/b");
        state.dispatch("/a", added("/a", "x"));
        state.dispatch("/a", value("/a", "a"));
        state.dispatch("/b", value("/b", "b"));
        assert_eq!(state.actual_count(), 3);

        assert!(state.watches_initialized());
        assert_eq!(state.actual_count(), 0);
    }

    #[test]
    fn watches_initialized_is_idempotent() {
        let mut state = state_with_path("/a");
        state.dispatch("/a", value("/a", "a"));
        assert!(state.watches_initialized());

        // Live events recorded after the trim must survive a second call.
        state.dispatch("/a", value("/a", "a"));
        assert!(state.watches_initialized());
        assert_eq!(state.actual_count(), 1);
    }

    #[test]
    fn live_dispatch_defers_mismatch_for_the_next_poll() {
        let mut state = state_with_path("/a");
        state.push_expected(added("/a", "x"));
        state.dispatch("/a", value("/a", "a"));
        assert!(state.watches_initialized());

        state.dispatch("/a", added("/a", "wrong"));
        let err = state.waiter().unwrap_err();
        assert!(matches!(err, Error::Mismatch { index: 0, .. }));
        // The failure is permanent: polling again keeps failing.
        assert_eq!(state.waiter().unwrap_err(), err);
    }

    #[test]
    fn live_match_completes_the_contract() {
        let mut state = state_with_path("/a");
        state.push_expected(added("/a", "x"));
        state.dispatch("/a", value("/a", "a"));
        assert!(state.watches_initialized());
        assert_eq!(state.waiter(), Ok(false));

        state.dispatch("/a", added("/a", "x"));
        assert_eq!(state.waiter(), Ok(true));
    }

    #[test]
    fn label_prefix_reaches_failure_messages() {
        let mut state = HarnessState::new(Some("checkout"));
        state.track_path("/a");
        state.push_expected(added("/a", "x"));
        state.dispatch("/a", value("/a", "a"));
        state.watches_initialized();
        state.dispatch("/a", added("/a", "y"));

        let msg = state.waiter().unwrap_err().to_string();
        assert!(msg.starts_with("checkout: "), "{msg}");
    }
}
