//! The seam between the harness and the realtime sync client under test.
//!
//! The client itself is an external collaborator: the harness only needs to
//! subscribe and unsubscribe callbacks on a path, read snapshots, and walk
//! node references. Implement these traits over your client's handle types
//! (or over an in-memory fake when testing the harness itself).

use std::rc::Rc;

use crate::EventKind;

/// A reference to a node in the hierarchical store.
///
/// References must render a deterministic canonical string (including the
/// shared connection-root prefix) and expose their own key. The harness
/// uses the canonical string, with the root prefix stripped, as the stable
/// identity of a subscription.
pub trait NodeRef: Clone {
    /// Returns the parent reference, or `None` at the connection root.
    fn parent(&self) -> Option<Self>;

    /// Returns the full canonical string form of this reference,
    /// including the connection-root prefix.
    fn canonical(&self) -> String;

    /// Returns this node's own key, or `None` at the connection root.
    fn key(&self) -> Option<String>;
}

/// A snapshot delivered by the sync client to a subscription callback.
///
/// For `value` notifications the snapshot describes the subscribed node;
/// for `child_*` notifications it describes the affected child.
pub trait SnapshotView {
    type Ref: NodeRef;

    /// Returns the snapshot's own reference.
    fn reference(&self) -> Self::Ref;

    /// Returns the snapshot's key (the child key for `child_*` kinds, the
    /// node's own key for `value`), or `None` at the connection root.
    fn key(&self) -> Option<String>;
}

/// A subscription callback.
///
/// Callbacks are `Rc` and deliberately `!Send`: the harness is a
/// single-threaded test utility driven by cooperative callback delivery.
/// Unsubscription identifies a callback by `Rc` pointer identity, so pass
/// back the same clone that was registered.
pub type SnapshotCallback<S> = Rc<dyn Fn(&S)>;

/// The subscribe/unsubscribe surface the harness consumes.
///
/// Delivery failures are the client's concern; neither method reports
/// errors to the harness.
pub trait SyncClient: 'static {
    type Ref: NodeRef + 'static;
    type Snapshot: SnapshotView<Ref = Self::Ref> + 'static;

    /// Register `callback` for notifications of `kind` on `path`.
    fn subscribe(&self, path: &Self::Ref, kind: EventKind, callback: SnapshotCallback<Self::Snapshot>);

    /// Remove a previously registered callback, identified by pointer
    /// equality. Removing a callback that is not registered is a no-op.
    fn unsubscribe(&self, path: &Self::Ref, kind: EventKind, callback: &SnapshotCallback<Self::Snapshot>);

    /// Returns the shared connection-root prefix. Stripping it from a
    /// reference's canonical string yields the raw path used for record
    /// comparison, independent of which server instance produced it.
    fn root_prefix(&self) -> String;
}
