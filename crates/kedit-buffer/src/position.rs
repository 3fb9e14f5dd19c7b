//! Cursor position type.

use serde::{Deserialize, Serialize};

/// A position in the document: line index and column.
///
/// Both fields are 0-indexed. The column is a byte offset into the line,
/// valid anywhere from 0 to the line length inclusive (the slot past the
/// last byte is the end-of-line insertion point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Position at the start of the document.
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Returns the earlier of two positions in document order.
    pub fn min(self, other: Position) -> Position {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Returns the later of two positions in document order.
    pub fn max(self, other: Position) -> Position {
        if self >= other {
            self
        } else {
            other
        }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.col.cmp(&other.col),
            other => other,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1-indexed for user-facing output (infobar, logs)
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic() {
        let a = Position::new(1, 9);
        let b = Position::new(2, 0);
        let c = Position::new(1, 3);

        assert!(a < b);
        assert!(c < a);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(c), a);
    }

    #[test]
    fn display_is_one_indexed() {
        assert_eq!(Position::new(0, 4).to_string(), "1:5");
    }
}
