use crate::{EventKind, NodeRef};

/// One declared expectation: an event of `kind` on `path`, optionally with
/// a specific key.
///
/// For [`EventKind::Value`] the key may be omitted — it is filled in from
/// the path's own key at registration time. Child kinds should name the
/// child key explicitly; a child expectation without a key will never match
/// a real child event (which always carries one) and the comparator will
/// report the difference.
///
/// Tuples convert for brevity:
///
/// ```rust,ignore
/// harness.add_expected_events([
///     (rooms.clone(), EventKind::ChildAdded, "alpha").into(),
///     ExpectedEvent::new(rooms.clone(), EventKind::Value),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct ExpectedEvent<R> {
    path: R,
    kind: EventKind,
    key: Option<String>,
}

impl<R: NodeRef> ExpectedEvent<R> {
    /// Expect an event of `kind` on `path` with no declared key.
    pub fn new(path: R, kind: EventKind) -> Self {
        Self {
            path,
            kind,
            key: None,
        }
    }

    /// Declare the key the event must carry.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub(crate) fn into_parts(self) -> (R, EventKind, Option<String>) {
        (self.path, self.kind, self.key)
    }
}

impl<R: NodeRef> From<(R, EventKind)> for ExpectedEvent<R> {
    fn from((path, kind): (R, EventKind)) -> Self {
        ExpectedEvent::new(path, kind)
    }
}

impl<R: NodeRef> From<(R, EventKind, &str)> for ExpectedEvent<R> {
    fn from((path, kind, key): (R, EventKind, &str)) -> Self {
        ExpectedEvent::new(path, kind).with_key(key)
    }
}

impl<R: NodeRef> From<(R, EventKind, String)> for ExpectedEvent<R> {
    fn from((path, kind, key): (R, EventKind, String)) -> Self {
        ExpectedEvent::new(path, kind).with_key(key)
    }
}
