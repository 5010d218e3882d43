//! Expectation registration and dedup-safe subscription ordering.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    event_record::raw_path,
    path_listener::{EventSink, PathListener},
    state::HarnessState,
    EventKind, EventRecord, ExpectedEvent, NodeRef, SyncClient,
};

/// Owns the active path listeners and turns declared expectations into
/// subscriptions and expectation-queue entries.
///
/// Cheap to clone: all fields are shared handles, so the cleanup registry
/// can hold a clone whose teardown action detaches the same listeners the
/// harness owns.
pub(crate) struct Registrar<C: SyncClient> {
    client: Rc<C>,
    state: Rc<RefCell<HarnessState>>,
    listeners: Rc<RefCell<HashMap<String, PathListener<C>>>>,
}

impl<C: SyncClient> Clone for Registrar<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: self.state.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<C: SyncClient> Registrar<C> {
    pub(crate) fn new(client: Rc<C>, state: Rc<RefCell<HarnessState>>) -> Self {
        Self {
            client,
            state,
            listeners: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Append a batch of expectations and subscribe any new paths.
    ///
    /// The batch is processed in order: each entry becomes an
    /// [`EventRecord`] on the expectation queue (a `value` entry with an
    /// omitted key inherits the path's own key). Input is read-only; the
    /// internal records are freshly built.
    ///
    /// New paths are subscribed *after* the whole batch is recorded, in
    /// ascending raw-path-length order. Subscribing an ancestor before its
    /// descendants keeps the client's subscription deduplication from
    /// emitting unlisten/relisten traffic that reorders replay delivery —
    /// a mitigating heuristic, not a guarantee. Paths of equal length
    /// subscribe in first-declared order.
    pub(crate) fn add_expected_events<I, X>(&self, events: I)
    where
        I: IntoIterator<Item = X>,
        X: Into<ExpectedEvent<C::Ref>>,
    {
        let root_prefix = self.client.root_prefix();
        let mut pending: Vec<(String, C::Ref)> = Vec::new();

        for event in events {
            let (path, kind, key) = event.into().into_parts();
            let raw = raw_path(&path.canonical(), &root_prefix);
            let key = match (kind, key) {
                (EventKind::Value, None) => path.key(),
                (_, key) => key,
            };
            if !pending.iter().any(|(seen, _)| *seen == raw) {
                pending.push((raw.clone(), path));
            }
            self.state
                .borrow_mut()
                .push_expected(EventRecord::new(raw, kind, key));
        }

        // Dedup-safe subscribe order: shortest raw path first.
        pending.sort_by_key(|(raw, _)| raw.len());
        for (raw, path) in pending {
            self.subscribe_path(raw, path);
        }
    }

    fn subscribe_path(&self, raw: String, path: C::Ref) {
        if self.listeners.borrow().contains_key(&raw) {
            return;
        }
        self.state.borrow_mut().track_path(&raw);

        let state = self.state.clone();
        let sink: EventSink = Rc::new(move |raw_path, record| {
            state.borrow_mut().dispatch(raw_path, record);
        });
        let listener = PathListener::attach(self.client.clone(), path, raw.clone(), sink);
        self.listeners.borrow_mut().insert(raw, listener);
    }

    /// Detach every listener across all batches. Full teardown only —
    /// there is no per-path removal.
    pub(crate) fn detach_all(&self) {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in listeners.values() {
            listener.detach();
        }
    }
}
