//! Ordered-Event Verification Example
//!
//! This example drives the harness against a small in-memory stand-in for a
//! realtime sync client. It walks through the full lifecycle:
//!
//! 1. Declare an ordered expectation contract across two paths
//! 2. Simulate the backlog-replay burst and wait for initialization
//! 3. Deliver live events and poll `waiter()` to completion
//! 4. Demonstrate a deliberate ordering violation and its diagnostic
//! 5. Tear everything down through the cleanup registry
//!
//! A real test suite would implement [`SyncClient`] over its actual client
//! handles and poll the two waiters from its wait-until-true utility.

use std::cell::RefCell;
use std::rc::Rc;

use ordwatch::{
    CleanupRegistry, EventHarness, EventKind, NodeRef, SnapshotCallback, SnapshotView, SyncClient,
};

const ROOT: &str = "https://demo.example.test";

/// A node reference addressed by segments under the connection root.
#[derive(Clone)]
struct DemoRef {
    segments: Vec<String>,
}

impl DemoRef {
    fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }
}

impl NodeRef for DemoRef {
    fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    fn canonical(&self) -> String {
        if self.segments.is_empty() {
            ROOT.to_string()
        } else {
            format!("{}/{}", ROOT, self.segments.join("/"))
        }
    }

    fn key(&self) -> Option<String> {
        self.segments.last().cloned()
    }
}

struct DemoSnapshot {
    reference: DemoRef,
    key: Option<String>,
}

impl SnapshotView for DemoSnapshot {
    type Ref = DemoRef;

    fn reference(&self) -> DemoRef {
        self.reference.clone()
    }

    fn key(&self) -> Option<String> {
        self.key.clone()
    }
}

/// A minimal in-memory sync client: a subscription table plus manual
/// delivery methods standing in for the server push.
#[derive(Default)]
struct DemoClient {
    subscriptions: RefCell<Vec<(String, EventKind, SnapshotCallback<DemoSnapshot>)>>,
}

impl DemoClient {
    fn path(&self, relative: &str) -> DemoRef {
        DemoRef {
            segments: relative.split('/').map(str::to_string).collect(),
        }
    }

    fn deliver_value(&self, path: &DemoRef) {
        self.deliver(
            path,
            EventKind::Value,
            DemoSnapshot {
                reference: path.clone(),
                key: path.key(),
            },
        );
    }

    fn deliver_child(&self, path: &DemoRef, kind: EventKind, key: &str) {
        self.deliver(
            path,
            kind,
            DemoSnapshot {
                reference: path.child(key),
                key: Some(key.to_string()),
            },
        );
    }

    fn deliver(&self, path: &DemoRef, kind: EventKind, snapshot: DemoSnapshot) {
        let canonical = path.canonical();
        let callbacks: Vec<_> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|(p, k, _)| *p == canonical && *k == kind)
            .map(|(_, _, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl SyncClient for DemoClient {
    type Ref = DemoRef;
    type Snapshot = DemoSnapshot;

    fn subscribe(&self, path: &DemoRef, kind: EventKind, callback: SnapshotCallback<DemoSnapshot>) {
        self.subscriptions
            .borrow_mut()
            .push((path.canonical(), kind, callback));
    }

    fn unsubscribe(&self, path: &DemoRef, kind: EventKind, callback: &SnapshotCallback<DemoSnapshot>) {
        let canonical = path.canonical();
        self.subscriptions
            .borrow_mut()
            .retain(|(p, k, cb)| !(*p == canonical && *k == kind && Rc::ptr_eq(cb, callback)));
    }

    fn root_prefix(&self) -> String {
        ROOT.to_string()
    }
}

fn main() {
    let client = Rc::new(DemoClient::default());
    let registry = CleanupRegistry::new();

    let rooms = client.path("rooms");
    let lobby = client.path("rooms/lobby");

    // Declare the contract. `rooms/lobby` is requested first, but the
    // harness subscribes `rooms` before it (ascending path length) to stay
    // clear of ancestor/descendant subscription deduplication.
    let harness = EventHarness::labeled(
        client.clone(),
        &registry,
        "rooms",
        [
            (lobby.clone(), EventKind::Value, "lobby"),
            (rooms.clone(), EventKind::ChildAdded, "attic"),
        ],
    );

    // Backlog replay: a child burst followed by the value that marks each
    // path live. None of this needs to be declared.
    client.deliver_child(&rooms, EventKind::ChildAdded, "lobby");
    client.deliver_value(&rooms);
    client.deliver_value(&lobby);

    assert!(harness.watches_initialized());
    println!("replay finished; actual queue is empty: {}", harness.actual_count() == 0);

    // Live phase: deliver the declared events in order.
    client.deliver_value(&lobby);
    assert!(!harness.waiter().unwrap()); // one down, keep waiting
    client.deliver_child(&rooms, EventKind::ChildAdded, "attic");
    assert!(harness.waiter().unwrap());
    println!("contract satisfied:");
    harness.dump();

    // A second harness showing the failure diagnostic.
    let strict = EventHarness::labeled(
        client.clone(),
        &registry,
        "strict",
        [(rooms.clone(), EventKind::ChildRemoved, "attic")],
    );
    client.deliver_value(&rooms); // initializes the new listener
    assert!(strict.watches_initialized());
    client.deliver_child(&rooms, EventKind::ChildMoved, "attic");
    match strict.waiter() {
        Err(err) => println!("diagnostic: {err}"),
        Ok(_) => unreachable!("the delivery above diverges from the contract"),
    }

    // Test boundary: detach every listener of every harness.
    registry.drain();
    println!("Done");
}
