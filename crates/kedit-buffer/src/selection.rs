//! Anchored text selection.

use serde::{Deserialize, Serialize};

use crate::Position;

/// A directed selection between two cursor positions.
///
/// The anchor is where the selection started; the head tracks the cursor
/// as it moves. The pair is stored as-is — the anchor may be after the
/// head in document order — and consumers normalize on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Fixed end, captured when selecting began.
    pub anchor: Position,
    /// Moving end, follows the cursor.
    pub head: Position,
}

impl Selection {
    /// Starts a selection anchored at a position, head at the same spot.
    pub fn anchored_at(anchor: Position) -> Self {
        Self {
            anchor,
            head: anchor,
        }
    }

    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Moves the head, keeping the anchor.
    pub fn extend_to(&mut self, head: Position) {
        self.head = head;
    }

    /// Returns true if the selection covers no text.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Returns the endpoints ordered so that start <= end.
    pub fn normalized(&self) -> (Position, Position) {
        (self.anchor.min(self.head), self.anchor.max(self.head))
    }

    /// Returns the selected column sub-range on one line.
    ///
    /// For the first selected line the range starts at the start column,
    /// for the last it ends at the end column; interior lines are covered
    /// in full. `line_len` is the byte length of the line being asked
    /// about. Returns `None` when the line is outside the selection or
    /// the resulting range is empty.
    pub fn columns_on_line(&self, line: usize, line_len: usize) -> Option<(usize, usize)> {
        let (start, end) = self.normalized();
        if line < start.line || line > end.line {
            return None;
        }

        let from = if line == start.line { start.col } else { 0 };
        let to = if line == end.line { end.col } else { line_len };

        (to > from).then_some((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_inverted_endpoints() {
        let sel = Selection::new(Position::new(2, 5), Position::new(1, 3));
        let (start, end) = sel.normalized();
        assert_eq!(start, Position::new(1, 3));
        assert_eq!(end, Position::new(2, 5));
    }

    #[test]
    fn extend_moves_head_only() {
        let mut sel = Selection::anchored_at(Position::new(0, 0));
        assert!(sel.is_empty());

        sel.extend_to(Position::new(0, 3));
        assert_eq!(sel.anchor, Position::ZERO);
        assert_eq!(sel.head, Position::new(0, 3));
        assert!(!sel.is_empty());
    }

    #[test]
    fn single_line_columns() {
        let mut sel = Selection::anchored_at(Position::new(0, 0));
        sel.extend_to(Position::new(0, 3));

        assert_eq!(sel.columns_on_line(0, 5), Some((0, 3)));
        assert_eq!(sel.columns_on_line(1, 5), None);
    }

    #[test]
    fn multi_line_columns() {
        // "hel[lo / wor]ld" — anchor (0,3), head (1,3)
        let sel = Selection::new(Position::new(0, 3), Position::new(1, 3));

        assert_eq!(sel.columns_on_line(0, 5), Some((3, 5)));
        assert_eq!(sel.columns_on_line(1, 5), Some((0, 3)));
    }

    #[test]
    fn interior_lines_are_fully_covered() {
        let sel = Selection::new(Position::new(0, 2), Position::new(2, 1));
        assert_eq!(sel.columns_on_line(1, 7), Some((0, 7)));
    }

    #[test]
    fn backward_selection_matches_forward() {
        let fwd = Selection::new(Position::new(0, 1), Position::new(1, 4));
        let bwd = Selection::new(Position::new(1, 4), Position::new(0, 1));

        assert_eq!(fwd.columns_on_line(0, 6), bwd.columns_on_line(0, 6));
        assert_eq!(fwd.columns_on_line(1, 6), bwd.columns_on_line(1, 6));
    }

    #[test]
    fn empty_range_yields_none() {
        // Zero-width selection at (0,2)
        let sel = Selection::anchored_at(Position::new(0, 2));
        assert_eq!(sel.columns_on_line(0, 5), None);
    }
}
