//! # kedit-buffer
//!
//! Line-oriented text storage for the kedit editor.
//!
//! The document is an ordered sequence of lines with two policy bounds
//! (maximum line count, maximum line length). Edits that would cross a
//! bound are rejected whole: the document is never left half-mutated and
//! nothing is truncated mid-operation. Columns are byte offsets into a
//! line, not grapheme indices.
//!
//! Alongside the live lines the document keeps a saved-state snapshot,
//! refreshed on load/save, so dirty checking is a per-line comparison
//! rather than a hash.

mod document;
mod position;
mod selection;

pub use document::{Document, DocumentLimits};
pub use position::Position;
pub use selection::Selection;
