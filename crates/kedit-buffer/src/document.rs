//! The line-oriented document.
//!
//! Storage is a growable `Vec<String>`, but two policy bounds are
//! enforced on every mutation: a maximum line count and a maximum line
//! length. An edit that would cross a bound is rejected as a whole
//! (the operation reports `false`/`None` and mutates nothing), matching
//! the editor's fail-silent capacity behavior. There is no partial
//! truncation mid-edit.
//!
//! The document always holds at least one line: an empty document is one
//! empty line, never zero lines.

use crate::Position;

/// Capacity policy for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLimits {
    /// Maximum number of lines the document will hold.
    pub max_lines: usize,
    /// Maximum line length in bytes. A line may grow to at most
    /// `max_line_len - 1` bytes, leaving the final slot free the way the
    /// original fixed-size storage did.
    pub max_line_len: usize,
}

impl Default for DocumentLimits {
    fn default() -> Self {
        Self {
            max_lines: 1024,
            max_line_len: 256,
        }
    }
}

/// An ordered sequence of text lines with a saved-state snapshot.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
    /// Parallel copy of `lines` captured at the last load/save.
    saved: Vec<String>,
    limits: DocumentLimits,
}

impl Document {
    /// Creates an empty document: one empty line, marked saved.
    pub fn new() -> Self {
        Self::with_limits(DocumentLimits::default())
    }

    /// Creates an empty document with a custom capacity policy.
    pub fn with_limits(limits: DocumentLimits) -> Self {
        Self {
            lines: vec![String::new()],
            saved: vec![String::new()],
            limits,
        }
    }

    /// Resets to a single empty line, snapshot included.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(String::new());
        self.saved.clear();
        self.saved.push(String::new());
    }

    // ==================== Access ====================

    pub fn limits(&self) -> DocumentLimits {
        self.limits
    }

    /// Number of lines; always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|l| l.as_str())
    }

    /// Byte length of a line, 0 for an out-of-range index.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map(|l| l.len()).unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole document joined with `\n`, no trailing newline.
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    // ==================== Edits ====================

    /// Inserts one character at a byte offset in a line.
    ///
    /// Rejected when the line is at capacity, the position is out of
    /// range, or the character is not printable ASCII — columns are byte
    /// offsets, so one character must be one byte.
    pub fn insert_char(&mut self, pos: Position, ch: char) -> bool {
        if !ch.is_ascii() || (ch.is_ascii_control() && ch != ' ') {
            return false;
        }
        let max_len = self.limits.max_line_len;
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        if pos.col > line.len() || line.len() + 1 >= max_len {
            return false;
        }

        line.insert(pos.col, ch);
        true
    }

    /// Removes the byte immediately left of `pos.col`.
    pub fn remove_char_before(&mut self, pos: Position) -> bool {
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        if pos.col == 0 || pos.col > line.len() {
            return false;
        }

        line.remove(pos.col - 1);
        true
    }

    /// Joins line `idx` onto the end of the line above it.
    ///
    /// Succeeds only when the combined text stays under the line-length
    /// bound; otherwise the document is untouched. On success every line
    /// below shifts up by one and the pre-join length of the previous
    /// line is returned (the column a cursor lands on after a backspace
    /// at column 0).
    pub fn join_with_previous(&mut self, idx: usize) -> Option<usize> {
        if idx == 0 || idx >= self.lines.len() {
            return None;
        }

        let prev_len = self.lines[idx - 1].len();
        if prev_len + self.lines[idx].len() >= self.limits.max_line_len {
            return None;
        }

        let tail = self.lines.remove(idx);
        self.lines[idx - 1].push_str(&tail);
        Some(prev_len)
    }

    /// Splits a line at a byte offset, inserting the tail as a new line
    /// below. Rejected at the line-count bound.
    pub fn split_line(&mut self, pos: Position) -> bool {
        if self.lines.len() >= self.limits.max_lines {
            return false;
        }
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        if pos.col > line.len() {
            return false;
        }

        let tail = line.split_off(pos.col);
        self.lines.insert(pos.line + 1, tail);
        true
    }

    // ==================== Loading ====================

    /// Replaces the document content from an iterator of lines.
    ///
    /// Input lines longer than the line-length bound are chunked into
    /// consecutive document lines (the original reader filled fixed
    /// buffers and carried the overflow into the next slot). Reading
    /// stops at the line-count bound. The result is marked saved.
    pub fn load_lines<I>(&mut self, input: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.lines.clear();

        'outer: for line in input {
            let mut rest = line.as_str();
            loop {
                if self.lines.len() >= self.limits.max_lines {
                    break 'outer;
                }
                if rest.len() < self.limits.max_line_len {
                    self.lines.push(rest.to_string());
                    break;
                }

                // Longest prefix under the bound that ends on a char boundary.
                let mut cut = self.limits.max_line_len - 1;
                while !rest.is_char_boundary(cut) {
                    cut -= 1;
                }
                let (chunk, tail) = rest.split_at(cut);
                self.lines.push(chunk.to_string());
                rest = tail;
            }
        }

        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.mark_saved();
    }

    // ==================== Dirty tracking ====================

    /// Captures the current lines as the saved snapshot.
    pub fn mark_saved(&mut self) {
        self.saved.clear();
        self.saved.extend(self.lines.iter().cloned());
    }

    /// True when every line matches its snapshot counterpart.
    ///
    /// A plain per-index comparison: mutate a line and revert it, and the
    /// document reads as saved again.
    pub fn is_saved(&self) -> bool {
        self.lines.len() == self.saved.len()
            && self.lines.iter().zip(self.saved.iter()).all(|(a, b)| a == b)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
