//! Undo/redo history of committed strokes.

use crate::record::StrokeRecord;

/// Ordered committed strokes plus the undo cursor.
///
/// Records before the cursor are active and get rendered. Records at or after
/// the cursor have been undone and are kept only so they can be redone.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    records: Vec<StrokeRecord>,
    cursor: usize,
    /// Oldest strokes are dropped once this many are stored.
    max_strokes: Option<usize>,
}

impl StrokeHistory {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `max_strokes` records.
    pub fn with_max_strokes(max_strokes: Option<usize>) -> Self {
        Self {
            max_strokes,
            ..Self::default()
        }
    }

    /// Append a stroke at the cursor, discarding any undone records first.
    pub fn commit(&mut self, record: StrokeRecord) {
        let discarded = self.records.len() - self.cursor;
        if discarded > 0 {
            log::debug!("Discarding {} undone stroke(s)", discarded);
        }
        self.records.truncate(self.cursor);
        self.records.push(record);

        if let Some(max) = self.max_strokes {
            if self.records.len() > max {
                let excess = self.records.len() - max;
                self.records.drain(..excess);
                log::debug!("History limit {} reached, dropped {} oldest stroke(s)", max, excess);
            }
        }
        self.cursor = self.records.len();
    }

    /// Step back one stroke. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            log::trace!("Undo ignored: nothing to undo");
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one stroke. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            log::trace!("Redo ignored: nothing to redo");
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Drop every record, including the redo tail. Not undoable.
    pub fn clear(&mut self) -> bool {
        let changed = !self.records.is_empty();
        self.records.clear();
        self.cursor = 0;
        changed
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.records.len()
    }

    /// Check if any stroke is active.
    pub fn can_clear(&self) -> bool {
        self.cursor > 0
    }

    /// Active records in commit order.
    pub fn active_records(&self) -> std::slice::Iter<'_, StrokeRecord> {
        self.records[..self.cursor].iter()
    }

    /// All stored records, including undone ones.
    pub fn records(&self) -> &[StrokeRecord] {
        &self.records
    }

    /// Number of active strokes; index of the first undone one.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored records, including undone ones.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the history limit, if any.
    pub fn max_strokes(&self) -> Option<usize> {
        self.max_strokes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StrokeGeometry;
    use crate::types::Rgba;
    use kurbo::Point;

    fn record(x: f64) -> StrokeRecord {
        let mut geometry = StrokeGeometry::start(Point::new(x, 0.0));
        geometry.push_line(Point::new(x, 0.0), Point::new(x, 10.0));
        StrokeRecord::new(geometry, 2.0, Rgba::BLACK, Rgba::TRANSPARENT, false)
    }

    fn active(history: &StrokeHistory) -> Vec<StrokeRecord> {
        history.active_records().cloned().collect()
    }

    #[test]
    fn test_empty_history() {
        let mut history = StrokeHistory::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.can_clear());
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.active_records().count(), 0);
    }

    #[test]
    fn test_commit_advances_cursor() {
        let mut history = StrokeHistory::new();
        for i in 0..3 {
            history.commit(record(i as f64));
            assert_eq!(history.cursor(), i + 1);
            assert!(history.can_undo());
            assert!(!history.can_redo());
        }
    }

    #[test]
    fn test_undo_all_then_redo_all_restores_sequence() {
        let mut history = StrokeHistory::new();
        for i in 0..5 {
            history.commit(record(i as f64));
        }
        let before = active(&history);

        for _ in 0..5 {
            assert!(history.undo());
        }
        assert!(!history.can_undo());
        assert!(history.active_records().next().is_none());

        for _ in 0..5 {
            assert!(history.redo());
        }
        assert!(!history.can_redo());
        assert_eq!(active(&history), before);
    }

    #[test]
    fn test_commit_after_undo_truncates() {
        let mut history = StrokeHistory::new();
        let a = record(1.0);
        let b = record(2.0);
        let c = record(3.0);

        history.commit(a.clone());
        history.commit(b);
        history.undo();
        history.commit(c.clone());

        assert_eq!(active(&history), vec![a, c]);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clear_is_not_redoable() {
        let mut history = StrokeHistory::new();
        history.commit(record(1.0));
        history.commit(record(2.0));
        history.undo();

        assert!(history.clear());
        assert!(!history.can_redo());
        assert!(!history.can_undo());
        assert!(!history.can_clear());
        assert!(history.is_empty());
    }

    #[test]
    fn test_can_clear_tracks_active_records() {
        let mut history = StrokeHistory::new();
        history.commit(record(1.0));
        assert!(history.can_clear());

        history.undo();
        assert!(!history.can_clear());
        assert!(history.can_redo());
    }

    #[test]
    fn test_active_records_is_restartable() {
        let mut history = StrokeHistory::new();
        history.commit(record(1.0));
        history.commit(record(2.0));

        let iter = history.active_records();
        assert_eq!(iter.clone().count(), 2);
        assert_eq!(iter.count(), 2);
        assert_eq!(history.active_records().count(), 2);
    }

    #[test]
    fn test_max_strokes_drops_oldest() {
        let mut history = StrokeHistory::with_max_strokes(Some(2));
        let a = record(1.0);
        let b = record(2.0);
        let c = record(3.0);
        history.commit(a);
        history.commit(b.clone());
        history.commit(c.clone());

        assert_eq!(active(&history), vec![b, c]);
        assert_eq!(history.cursor(), 2);
        assert!(!history.can_redo());
    }
}
