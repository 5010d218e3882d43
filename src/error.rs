use crate::EventRecord;

/// The single error type for all ordwatch operations.
///
/// There is exactly one failure kind — an ordering/content assertion
/// failure — with two sub-cases. A *missing* event is never an error:
/// [`waiter`](crate::EventHarness::waiter) reports absence as `Ok(false)`
/// (keep polling) and leaves timeout policy to the caller's wait loop.
///
/// Errors are `Clone` so a failure captured during live delivery can be
/// returned again from every subsequent poll; they are never caught or
/// retried internally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The actual queue diverged from the expectation queue inside their
    /// overlapping prefix.
    #[error("{label}event mismatch at index {index}: expected {expected}, actual {actual}")]
    Mismatch {
        /// Pre-rendered harness label prefix (`"name: "` or empty).
        label: String,
        /// First index at which the two queues differ.
        index: usize,
        expected: EventRecord,
        actual: EventRecord,
    },

    /// Every expected event matched, but the actual queue kept going.
    #[error("{label}unexpected event at index {index}: {actual}")]
    UnexpectedEvent {
        /// Pre-rendered harness label prefix (`"name: "` or empty).
        label: String,
        /// Index of the first actual record past the expectation queue.
        index: usize,
        actual: EventRecord,
    },
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Mismatch {
                    label: l1,
                    index: i1,
                    expected: e1,
                    actual: a1,
                },
                Self::Mismatch {
                    label: l2,
                    index: i2,
                    expected: e2,
                    actual: a2,
                },
            ) => l1 == l2 && i1 == i2 && e1 == e2 && a1 == a2,
            (
                Self::UnexpectedEvent {
                    label: l1,
                    index: i1,
                    actual: a1,
                },
                Self::UnexpectedEvent {
                    label: l2,
                    index: i2,
                    actual: a2,
                },
            ) => l1 == l2 && i1 == i2 && a1 == a2,
            _ => false,
        }
    }
}

impl Eq for Error {}
