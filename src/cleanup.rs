//! Caller-owned teardown registry.

use std::cell::RefCell;
use std::rc::Rc;

/// Accumulates unregister actions across harness instances and runs them
/// all at a test-case boundary.
///
/// The registry is an explicit value the test setup owns and threads
/// through harness construction — not process-global state — so
/// independent test runs cannot interfere. Handles are cheap clones of the
/// same underlying list. The lifecycle is accumulate-then-drain: there is
/// no partial removal.
///
/// # Example
///
/// ```rust,ignore
/// let registry = CleanupRegistry::new();
/// let harness = EventHarness::new(client, &registry, expectations);
/// // ... drive the test ...
/// registry.drain(); // once per test boundary
/// ```
#[derive(Clone, Default)]
pub struct CleanupRegistry {
    actions: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a teardown action to run on the next [`drain`](Self::drain).
    pub fn register(&self, action: impl FnOnce() + 'static) {
        self.actions.borrow_mut().push(Box::new(action));
    }

    /// Invoke every registered action and clear the registry.
    pub fn drain(&self) {
        let actions = std::mem::take(&mut *self.actions.borrow_mut());
        tracing::debug!(count = actions.len(), "draining cleanup registry");
        for action in actions {
            action();
        }
    }

    /// Returns the number of pending actions.
    pub fn len(&self) -> usize {
        self.actions.borrow().len()
    }

    /// Returns true if no actions are pending.
    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }
}

impl std::fmt::Debug for CleanupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupRegistry")
            .field("pending", &self.len())
            .finish()
    }
}
