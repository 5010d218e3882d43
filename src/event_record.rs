use std::fmt;

use crate::{EventKind, NodeRef, SnapshotView};

/// A canonical, comparable observation: one notification reduced to the
/// tuple the harness asserts on.
///
/// # Fields
///
/// - `path`: the raw path of the subscription the notification belongs to
///   (canonical string with the connection-root prefix stripped)
/// - `kind`: which of the five notification kinds was delivered
/// - `key`: the child key for `child_*` kinds, the node's own key for
///   `value`; `None` only at the connection root
///
/// Two records are equal iff all three fields are equal. Content beyond
/// path, kind, and key is deliberately not captured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    path: String,
    kind: EventKind,
    key: Option<String>,
}

impl EventRecord {
    /// Build a record directly from its parts.
    pub fn new(path: impl Into<String>, kind: EventKind, key: Option<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            key,
        }
    }

    /// Normalize a delivered snapshot into a record.
    ///
    /// Resolves the reference to compare — the snapshot's own reference for
    /// `value`, the parent reference for `child_*` kinds — then strips
    /// `root_prefix` from its canonical string. A child snapshot always has
    /// a parent; the own-reference fallback only fires for a root snapshot.
    pub fn from_snapshot<S: SnapshotView>(snapshot: &S, kind: EventKind, root_prefix: &str) -> Self {
        let own = snapshot.reference();
        let reference = if kind.compares_parent_reference() {
            own.parent().unwrap_or(own)
        } else {
            own
        };
        Self {
            path: raw_path(&reference.canonical(), root_prefix),
            kind,
            key: snapshot.key(),
        }
    }

    /// Returns the raw path this record was observed on.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the notification kind.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the record's key, if any.
    #[inline]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl fmt::Display for EventRecord {
    /// Renders `{path: P, event:[kind, key]}`, the shape embedded in
    /// failure messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{path: {}, event:[{}, {}]}}",
            self.path,
            self.kind,
            self.key.as_deref().unwrap_or("null"),
        )
    }
}

/// Strips the connection-root prefix from a canonical reference string.
///
/// An empty remainder (a subscription at the connection root) normalizes
/// to `"/"`.
pub(crate) fn raw_path(canonical: &str, root_prefix: &str) -> String {
    let stripped = canonical.strip_prefix(root_prefix).unwrap_or(canonical);
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}
