//! Per-path subscription bundle.

use std::rc::Rc;

use crate::{EventKind, EventRecord, NodeRef, SnapshotCallback, SyncClient};

/// The dispatch function listeners forward normalized records into.
///
/// Receives the raw path the listener was registered under (the
/// initialization-state lookup key) together with the record built from
/// the delivered snapshot. Must tolerate reentrancy: a single notification
/// both appends to the actual queue and, for live events, runs the
/// comparator synchronously.
pub(crate) type EventSink = Rc<dyn Fn(&str, EventRecord)>;

/// Subscribes one path to all five event kinds and normalizes every
/// delivery into an [`EventRecord`] for the sink.
///
/// Created once per distinct raw path and kept until full harness
/// teardown; [`detach`](Self::detach) removes all five subscriptions in
/// one step.
pub(crate) struct PathListener<C: SyncClient> {
    client: Rc<C>,
    path: C::Ref,
    handlers: Vec<(EventKind, SnapshotCallback<C::Snapshot>)>,
}

impl<C: SyncClient> PathListener<C> {
    /// Subscribe `path` to every kind, forwarding normalized records to
    /// `sink` keyed by `raw_path`.
    pub(crate) fn attach(client: Rc<C>, path: C::Ref, raw_path: String, sink: EventSink) -> Self {
        tracing::debug!(path = %raw_path, "attaching listener");
        let root_prefix = client.root_prefix();
        let mut handlers = Vec::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            let sink = sink.clone();
            let raw = raw_path.clone();
            let prefix = root_prefix.clone();
            let callback: SnapshotCallback<C::Snapshot> = Rc::new(move |snapshot| {
                let record = EventRecord::from_snapshot(snapshot, kind, &prefix);
                sink(&raw, record);
            });
            client.subscribe(&path, kind, callback.clone());
            handlers.push((kind, callback));
        }
        Self {
            client,
            path,
            handlers,
        }
    }

    /// Remove all five subscriptions.
    pub(crate) fn detach(&self) {
        tracing::debug!(path = %self.path.canonical(), "detaching listener");
        for (kind, callback) in &self.handlers {
            self.client.unsubscribe(&self.path, *kind, callback);
        }
    }
}
