use std::fmt;

/// The five notification kinds a hierarchical sync service delivers.
///
/// `Value` reports the state of the subscribed node itself; the four
/// `Child*` kinds report membership changes beneath it. The distinction
/// matters for record normalization: a `Value` snapshot's own reference
/// *is* the subscribed path, while a child snapshot's reference points at
/// the child and must be resolved through its parent. See
/// [`compares_parent_reference`](Self::compares_parent_reference).
///
/// # Example
///
/// ```rust
/// use ordwatch::EventKind;
///
/// assert_eq!(EventKind::ChildAdded.to_string(), "child_added");
/// assert!(!EventKind::Value.compares_parent_reference());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    Value,
    ChildAdded,
    ChildRemoved,
    ChildMoved,
    ChildChanged,
}

impl EventKind {
    /// Every kind a path listener subscribes to, in subscription order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Value,
        EventKind::ChildAdded,
        EventKind::ChildRemoved,
        EventKind::ChildMoved,
        EventKind::ChildChanged,
    ];

    /// Returns the snake_case wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Value => "value",
            EventKind::ChildAdded => "child_added",
            EventKind::ChildRemoved => "child_removed",
            EventKind::ChildMoved => "child_moved",
            EventKind::ChildChanged => "child_changed",
        }
    }

    /// Returns true if records of this kind are compared against the
    /// snapshot's *parent* reference rather than its own reference.
    ///
    /// Child snapshots point at the child node; the subscribed path is
    /// their parent. `Value` snapshots point at the subscribed path itself.
    pub fn compares_parent_reference(&self) -> bool {
        !matches!(self, EventKind::Value)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_kind_once() {
        assert_eq!(EventKind::ALL.len(), 5);
        let mut seen = std::collections::HashSet::new();
        for kind in EventKind::ALL {
            assert!(seen.insert(kind));
        }
    }

    #[test]
    fn display_uses_snake_case_wire_names() {
        assert_eq!(EventKind::Value.to_string(), "value");
        assert_eq!(EventKind::ChildAdded.to_string(), "child_added");
        assert_eq!(EventKind::ChildRemoved.to_string(), "child_removed");
        assert_eq!(EventKind::ChildMoved.to_string(), "child_moved");
        assert_eq!(EventKind::ChildChanged.to_string(), "child_changed");
    }

    #[test]
    fn only_value_compares_own_reference() {
        assert!(!EventKind::Value.compares_parent_reference());
        assert!(EventKind::ChildAdded.compares_parent_reference());
        assert!(EventKind::ChildRemoved.compares_parent_reference());
        assert!(EventKind::ChildMoved.compares_parent_reference());
        assert!(EventKind::ChildChanged.compares_parent_reference());
    }
}
