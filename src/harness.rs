use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{
    state::HarnessState, CleanupRegistry, ExpectedEvent, Registrar, Result, SyncClient,
};

/// The public façade: declare an ordered event contract, then poll until
/// the observed sequence has matched it.
///
/// Construction subscribes every declared path (ancestors first), records
/// the expectations, and registers the harness's teardown into the given
/// [`CleanupRegistry`]. From then on the sync client drives everything:
/// each notification is normalized and appended to the actual queue, and
/// live notifications trigger an immediate comparison so an ordering
/// violation is pinned to the offending arrival.
///
/// The harness never blocks or suspends. Callers poll
/// [`watches_initialized`](Self::watches_initialized) until the replay
/// burst is over, then poll [`waiter`](Self::waiter) until it returns
/// `Ok(true)` — both from whatever wait-until-true utility the test runner
/// provides, which also owns timeout policy.
///
/// # Example
///
/// ```rust,ignore
/// use ordwatch::{CleanupRegistry, EventHarness, EventKind};
///
/// let registry = CleanupRegistry::new();
/// let harness = EventHarness::labeled(client.clone(), &registry, "rooms", [
///     (rooms.clone(), EventKind::ChildAdded, "alpha"),
///     (rooms.clone(), EventKind::Value),
/// ]);
///
/// wait_until(|| harness.watches_initialized());
/// wait_until(|| harness.waiter().unwrap());
///
/// registry.drain(); // test boundary
/// ```
///
/// # Note
///
/// The harness uses `Rc` internally and is `!Send`. This is intentional —
/// it is designed for single-threaded, callback-driven test contexts only.
pub struct EventHarness<C: SyncClient> {
    state: Rc<RefCell<HarnessState>>,
    registrar: Registrar<C>,
}

impl<C: SyncClient> EventHarness<C> {
    /// Create a harness with an initial expectation batch.
    pub fn new<I, X>(client: Rc<C>, registry: &CleanupRegistry, expected: I) -> Self
    where
        I: IntoIterator<Item = X>,
        X: Into<ExpectedEvent<C::Ref>>,
    {
        Self::build(client, registry, None, expected)
    }

    /// Create a harness whose failure messages are prefixed with `label`.
    pub fn labeled<I, X>(client: Rc<C>, registry: &CleanupRegistry, label: &str, expected: I) -> Self
    where
        I: IntoIterator<Item = X>,
        X: Into<ExpectedEvent<C::Ref>>,
    {
        Self::build(client, registry, Some(label), expected)
    }

    fn build<I, X>(client: Rc<C>, registry: &CleanupRegistry, label: Option<&str>, expected: I) -> Self
    where
        I: IntoIterator<Item = X>,
        X: Into<ExpectedEvent<C::Ref>>,
    {
        let state = Rc::new(RefCell::new(HarnessState::new(label)));
        let registrar = Registrar::new(client, state.clone());
        registrar.add_expected_events(expected);

        let teardown = registrar.clone();
        registry.register(move || teardown.detach_all());

        Self { state, registrar }
    }

    /// Extend the expectation contract with another ordered batch.
    ///
    /// May be called any number of times; previously accumulated actual
    /// state is kept, so a test can verify a prefix, declare more events,
    /// and keep polling. New paths are subscribed ancestors-first.
    pub fn add_expected_events<I, X>(&self, expected: I)
    where
        I: IntoIterator<Item = X>,
        X: Into<ExpectedEvent<C::Ref>>,
    {
        self.registrar.add_expected_events(expected);
    }

    /// Poll the ordered comparison.
    ///
    /// Returns `Ok(true)` once every declared expectation has been matched
    /// in order, `Ok(false)` while the actual queue is still a proper
    /// prefix (keep polling), and `Err` on the first divergence — either a
    /// positional mismatch or an unexpected extra event. A failure detected
    /// eagerly during live delivery is returned here as well, and keeps
    /// being returned: failures are permanent.
    pub fn waiter(&self) -> Result<bool> {
        self.state.borrow().waiter()
    }

    /// Poll for the end of the backlog-replay phase.
    ///
    /// Returns false while any subscribed path is still replaying. The
    /// first `true` discards the replay events from the actual queue, so
    /// subsequent verification covers only events the test author declares.
    /// Further calls are no-ops that keep returning true.
    pub fn watches_initialized(&self) -> bool {
        self.state.borrow_mut().watches_initialized()
    }

    /// Detach every path listener registered by this harness.
    ///
    /// The only cancellation primitive; there is no per-path removal.
    /// Also runs via the [`CleanupRegistry`] at the test boundary, and
    /// running both is harmless.
    pub fn unregister(&self) {
        self.registrar.detach_all();
    }

    // ==================== Debugging ====================

    /// Returns the number of declared expectations.
    pub fn expected_count(&self) -> usize {
        self.state.borrow().expected_count()
    }

    /// Returns the number of recorded actual events (replay included until
    /// the initialization trim).
    pub fn actual_count(&self) -> usize {
        self.state.borrow().actual_count()
    }

    /// Print both queues to stdout for debugging.
    pub fn dump(&self) {
        let state = self.state.borrow();
        println!(
            "Expected events ({} declared):",
            state.expected_count()
        );
        for (i, record) in state.expected_records().iter().enumerate() {
            println!("  {i}: {record}");
        }
        println!("Actual events ({} recorded):", state.actual_count());
        for (i, record) in state.actual_records().iter().enumerate() {
            println!("  {i}: {record}");
        }
    }
}

impl<C: SyncClient> fmt::Debug for EventHarness<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventHarness")
            .field("expected", &state.expected_count())
            .field("actual", &state.actual_count())
            .finish_non_exhaustive()
    }
}
