/// Linear undo history of whole-document snapshots.
///
/// `index` always points at a valid snapshot. Recording after an undo
/// discards every snapshot after `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<String>,
    index: usize,
}

impl History {
    /// Seed the history with the document's initial value.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            snapshots: vec![initial.into()],
            index: 0,
        }
    }

    /// Append `snapshot` unless it equals the current one.
    ///
    /// Returns `true` when a new entry was added.
    pub fn record(&mut self, snapshot: impl Into<String>) -> bool {
        let snapshot = snapshot.into();
        if snapshot == self.snapshots[self.index] {
            return false;
        }
        let discarded = self.snapshots.len() - self.index - 1;
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index = self.snapshots.len() - 1;
        tracing::trace!(index = self.index, discarded, "history.record");
        true
    }

    /// Step back one snapshot. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        tracing::trace!(index = self.index, "history.undo");
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&str> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        tracing::trace!(index = self.index, "history.redo");
        Some(&self.snapshots[self.index])
    }

    /// The snapshot `index` points at.
    pub fn current(&self) -> &str {
        &self.snapshots[self.index]
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of snapshots held, always at least one.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub const fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_history_has_single_snapshot() {
        let history = History::new("seed");
        assert_eq!(history.current(), "seed");
        assert_eq!(history.snapshot_count(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_identical_snapshot_is_ignored() {
        let mut history = History::new("a");
        assert!(!history.record("a"));
        assert_eq!(history.snapshot_count(), 1);
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut history = History::new("a");
        assert_eq!(history.undo(), None);
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut history = History::new("a");
        history.record("b");
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), "b");
    }

    #[test]
    fn test_undo_then_redo_returns_forward() {
        let mut history = History::new("a");
        history.record("b");
        history.record("c");
        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.redo(), Some("b"));
        assert_eq!(history.redo(), Some("c"));
    }

    #[test]
    fn test_record_after_undo_discards_forward_branch() {
        let mut history = History::new("a");
        history.record("b");
        history.record("c");
        history.undo();
        assert!(history.record("x"));
        assert_eq!(history.redo(), None);
        assert_eq!(history.snapshot_count(), 3);
        assert_eq!(history.undo(), Some("b"));
    }

    #[test]
    fn test_record_equal_to_current_after_undo_keeps_forward_branch() {
        let mut history = History::new("a");
        history.record("b");
        history.undo();
        assert!(!history.record("a"));
        assert_eq!(history.redo(), Some("b"));
    }

    proptest! {
        #[test]
        fn prop_undo_walks_back_through_recorded_snapshots(
            seeds in proptest::collection::vec("[a-z]{1,6}", 1..12)
        ) {
            // Suffix the index so consecutive snapshots always differ.
            let snapshots: Vec<String> = seeds
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{s}{i}"))
                .collect();
            let mut history = History::new("");
            for snapshot in &snapshots {
                prop_assert!(history.record(snapshot.as_str()));
            }

            let mut expected: Vec<&str> = vec![""];
            expected.extend(snapshots.iter().map(String::as_str));
            expected.pop();
            for want in expected.iter().rev() {
                prop_assert_eq!(history.undo(), Some(*want));
            }
            prop_assert_eq!(history.undo(), None);
        }

        #[test]
        fn prop_index_stays_in_bounds(ops in proptest::collection::vec(0u8..3, 0..40)) {
            let mut history = History::new("");
            for (i, op) in ops.into_iter().enumerate() {
                match op {
                    0 => { history.record(format!("v{i}")); }
                    1 => { history.undo(); }
                    _ => { history.redo(); }
                }
                prop_assert!(history.index() < history.snapshot_count());
            }
        }
    }
}
