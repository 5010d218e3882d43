//! Positional comparison of the expectation queue against the actual queue.

use crate::{Error, EventRecord, Result};

/// Compare the two queues positionally and report the verdict.
///
/// Walks both queues from index 0 through the overlapping prefix. The first
/// divergence fails with [`Error::Mismatch`]; an actual queue that outgrew
/// the expectation queue with a clean prefix fails with
/// [`Error::UnexpectedEvent`] naming the first extra record. Otherwise
/// returns `Ok(true)` when the queues are equal in length (everything
/// declared so far has been verified) and `Ok(false)` while the actual
/// queue is still shorter (keep polling — not yet a failure).
///
/// `label` is the pre-rendered harness prefix (`"name: "` or empty).
pub(crate) fn compare(label: &str, expected: &[EventRecord], actual: &[EventRecord]) -> Result<bool> {
    let shared = expected.len().min(actual.len());
    for index in 0..shared {
        if expected[index] != actual[index] {
            return Err(Error::Mismatch {
                label: label.to_string(),
                index,
                expected: expected[index].clone(),
                actual: actual[index].clone(),
            });
        }
    }
    if actual.len() > expected.len() {
        let index = expected.len();
        return Err(Error::UnexpectedEvent {
            label: label.to_string(),
            index,
            actual: actual[index].clone(),
        });
    }
    Ok(actual.len() == expected.len())
}
