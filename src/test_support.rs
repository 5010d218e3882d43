//! In-memory fake of the realtime sync client, for exercising the harness
//! without a live service.
//!
//! Deliveries are explicit: tests call `deliver_value` / `deliver_child`
//! to push notifications through whatever subscriptions are registered,
//! which is enough to simulate both the replay burst and live updates.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{EventKind, NodeRef, SnapshotCallback, SnapshotView, SyncClient};

/// A node reference addressed by path segments under a fixed root.
#[derive(Clone)]
pub(crate) struct MockRef {
    root: Rc<str>,
    segments: Vec<String>,
}

impl MockRef {
    pub(crate) fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self {
            root: self.root.clone(),
            segments,
        }
    }
}

impl NodeRef for MockRef {
    fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self {
            root: self.root.clone(),
            segments,
        })
    }

    fn canonical(&self) -> String {
        if self.segments.is_empty() {
            self.root.to_string()
        } else {
            format!("{}/{}", self.root, self.segments.join("/"))
        }
    }

    fn key(&self) -> Option<String> {
        self.segments.last().cloned()
    }
}

pub(crate) struct MockSnapshot {
    reference: MockRef,
    key: Option<String>,
}

impl MockSnapshot {
    /// A `value` snapshot of the node at `reference`.
    pub(crate) fn at(reference: MockRef) -> Self {
        let key = reference.key();
        Self { reference, key }
    }

    /// A child snapshot under `parent`.
    pub(crate) fn child_of(parent: &MockRef, key: &str) -> Self {
        Self {
            reference: parent.child(key),
            key: Some(key.to_string()),
        }
    }
}

impl SnapshotView for MockSnapshot {
    type Ref = MockRef;

    fn reference(&self) -> MockRef {
        self.reference.clone()
    }

    fn key(&self) -> Option<String> {
        self.key.clone()
    }
}

struct Subscription {
    canonical: String,
    kind: EventKind,
    callback: SnapshotCallback<MockSnapshot>,
}

/// The fake client: a flat subscription table plus a subscribe-order log.
pub(crate) struct MockClient {
    root: Rc<str>,
    subscriptions: RefCell<Vec<Subscription>>,
    subscribe_log: RefCell<Vec<String>>,
}

impl MockClient {
    pub(crate) fn new(root: &str) -> Rc<Self> {
        Rc::new(Self {
            root: Rc::from(root),
            subscriptions: RefCell::new(Vec::new()),
            subscribe_log: RefCell::new(Vec::new()),
        })
    }

    /// A reference to the node at `relative` (slash-separated, no leading
    /// slash; empty string addresses the connection root).
    pub(crate) fn path(&self, relative: &str) -> MockRef {
        let segments = if relative.is_empty() {
            Vec::new()
        } else {
            relative.split('/').map(str::to_string).collect()
        };
        MockRef {
            root: self.root.clone(),
            segments,
        }
    }

    /// Deliver a `value` notification for the node at `path`.
    pub(crate) fn deliver_value(&self, path: &MockRef) {
        self.deliver(path, EventKind::Value, MockSnapshot::at(path.clone()));
    }

    /// Deliver a child notification of `kind` for `key` under `path`.
    pub(crate) fn deliver_child(&self, path: &MockRef, kind: EventKind, key: &str) {
        self.deliver(path, kind, MockSnapshot::child_of(path, key));
    }

    fn deliver(&self, path: &MockRef, kind: EventKind, snapshot: MockSnapshot) {
        let canonical = path.canonical();
        // Clone callbacks out first: a callback may re-enter the client.
        let callbacks: Vec<_> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|sub| sub.canonical == canonical && sub.kind == kind)
            .map(|sub| sub.callback.clone())
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }
    }

    /// Number of live (kind, callback) registrations.
    pub(crate) fn active_subscriptions(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Distinct raw paths in first-subscription order.
    pub(crate) fn subscribed_paths(&self) -> Vec<String> {
        self.subscribe_log.borrow().clone()
    }
}

impl SyncClient for MockClient {
    type Ref = MockRef;
    type Snapshot = MockSnapshot;

    fn subscribe(&self, path: &MockRef, kind: EventKind, callback: SnapshotCallback<MockSnapshot>) {
        let canonical = path.canonical();
        let raw = canonical
            .strip_prefix(&*self.root)
            .map(|s| if s.is_empty() { "/" } else { s })
            .unwrap_or(&canonical)
            .to_string();
        let mut log = self.subscribe_log.borrow_mut();
        if !log.contains(&raw) {
            log.push(raw);
        }
        self.subscriptions.borrow_mut().push(Subscription {
            canonical,
            kind,
            callback,
        });
    }

    fn unsubscribe(&self, path: &MockRef, kind: EventKind, callback: &SnapshotCallback<MockSnapshot>) {
        let canonical = path.canonical();
        self.subscriptions.borrow_mut().retain(|sub| {
            !(sub.canonical == canonical && sub.kind == kind && Rc::ptr_eq(&sub.callback, callback))
        });
    }

    fn root_prefix(&self) -> String {
        self.root.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://db.example.test";

    #[test]
    fn canonical_includes_the_root() {
        let client = MockClient::new(ROOT);
        assert_eq!(client.path("").canonical(), ROOT);
        assert_eq!(client.path("a/b").canonical(), format!("{ROOT}/a/b"));
    }

    #[test]
    fn parent_walks_up_and_stops_at_root() {
        let client = MockClient::new(ROOT);
        let ab = client.path("a/b");
        let a = ab.parent().unwrap();
        assert_eq!(a.canonical(), format!("{ROOT}/a"));
        let root = a.parent().unwrap();
        assert_eq!(root.canonical(), ROOT);
        assert!(root.parent().is_none());
    }

    #[test]
    fn key_is_the_last_segment() {
        let client = MockClient::new(ROOT);
        assert_eq!(client.path("a/b").key().as_deref(), Some("b"));
        assert_eq!(client.path("").key(), None);
    }

    #[test]
    fn delivery_reaches_only_matching_subscriptions() {
        let client = MockClient::new(ROOT);
        let a = client.path("a");
        let b = client.path("b");
        let hits = Rc::new(RefCell::new(0));

        let counter = hits.clone();
        let callback: SnapshotCallback<MockSnapshot> =
            Rc::new(move |_| *counter.borrow_mut() += 1);
        client.subscribe(&a, EventKind::Value, callback);

        client.deliver_value(&b);
        client.deliver_child(&a, EventKind::ChildAdded, "x");
        assert_eq!(*hits.borrow(), 0);

        client.deliver_value(&a);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn unsubscribe_matches_by_callback_identity() {
        let client = MockClient::new(ROOT);
        let a = client.path("a");
        let first: SnapshotCallback<MockSnapshot> = Rc::new(|_| {});
        let second: SnapshotCallback<MockSnapshot> = Rc::new(|_| {});

        client.subscribe(&a, EventKind::Value, first.clone());
        client.subscribe(&a, EventKind::Value, second);
        assert_eq!(client.active_subscriptions(), 2);

        client.unsubscribe(&a, EventKind::Value, &first);
        assert_eq!(client.active_subscriptions(), 1);
    }
}
