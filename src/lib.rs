//! # ordwatch
//!
//! An event-ordering verification harness for clients of hierarchical,
//! path-addressed realtime data-synchronization services.
//!
//! Such services deliver asynchronous notifications (value snapshot, child
//! added/removed/moved/changed) on arbitrary, possibly overlapping
//! subscribed paths, with a backlog-replay burst before live updates
//! begin. ordwatch lets a test declare the exact sequence of events it
//! expects across one or more paths, then verifies — as events actually
//! arrive — that the observed sequence is a prefix of the declared one,
//! failing immediately and descriptively on the first divergence.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ordwatch::{CleanupRegistry, EventHarness, EventKind};
//!
//! let registry = CleanupRegistry::new();
//! let rooms = client.path("rooms");
//!
//! let harness = EventHarness::new(client.clone(), &registry, [
//!     (rooms.clone(), EventKind::ChildAdded, "alpha"),
//!     (rooms.clone(), EventKind::ChildRemoved, "alpha"),
//! ]);
//!
//! // Phase 1: let the backlog replay finish (polled by your wait utility).
//! wait_until(|| harness.watches_initialized());
//!
//! // Phase 2: verify live events in order. Err = divergence,
//! // Ok(false) = keep waiting, Ok(true) = contract satisfied.
//! wait_until(|| harness.waiter().unwrap());
//!
//! // Once per test boundary:
//! registry.drain();
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EventHarness`] | The façade: declare expectations, poll verification |
//! | [`EventKind`] | The five notification kinds |
//! | [`EventRecord`] | Canonical comparable observation (path, kind, key) |
//! | [`ExpectedEvent`] | One declared expectation (tuples convert) |
//! | [`CleanupRegistry`] | Caller-owned teardown registry, drained per test |
//! | [`SyncClient`] / [`SnapshotView`] / [`NodeRef`] | The seam to the client under test |
//!
//! ## Replay vs. live
//!
//! The service replays a path's backlog before its first `value`
//! notification. The harness counts everything delivered on a
//! still-initializing path as replay, and
//! [`watches_initialized`](EventHarness::watches_initialized) discards
//! those records once every path is live — replay shapes are not worth
//! asserting on. Live events are compared eagerly on arrival, so an
//! ordering violation surfaces at the offending delivery, not at the next
//! poll.
//!
//! ## Subscription ordering
//!
//! New paths are subscribed in ascending raw-path-length order. When a
//! client deduplicates a descendant subscription against an existing
//! ancestor it can emit unlisten/relisten traffic that reorders replay
//! delivery; subscribing ancestors first sidesteps the common case.
//!
//! ## Note
//!
//! All types use `Rc` internally and are `!Send`. This is intentional —
//! the harness is designed for single-threaded, callback-driven test
//! contexts only.

mod cleanup;
mod comparator;
mod error;
mod event_kind;
mod event_record;
mod expected_event;
mod harness;
mod init_tracker;
mod path_listener;
mod registrar;
mod state;
mod sync_client;

#[cfg(test)]
pub(crate) mod test_support;

pub use cleanup::CleanupRegistry;
pub use error::Error;
pub use event_kind::EventKind;
pub use event_record::EventRecord;
pub use expected_event::ExpectedEvent;
pub use harness::EventHarness;
pub use sync_client::{NodeRef, SnapshotCallback, SnapshotView, SyncClient};

pub(crate) use registrar::Registrar;

/// Convenience alias for `Result<T, ordwatch::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
