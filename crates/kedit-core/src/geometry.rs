//! Selection and cursor pixel geometry.
//!
//! Converts the engine's logical positions into horizontal pixel spans
//! using prefix-width queries against the font catalog. Only the lines a
//! caller says are visible get measured, so the per-frame cost is
//! O(visible lines) no matter how large the document is.
//!
//! All coordinates here are in unscrolled document space; the render
//! adapter subtracts the scroll offsets when it draws.

use std::ops::Range;

use kedit_buffer::{Document, Position, Selection};

use crate::font::{FontCatalog, FontId};

/// A horizontal pixel span on one document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub line: usize,
    /// Pixel offset of the span start from the text origin.
    pub x: u32,
    pub width: u32,
}

/// Pixel spans covering a selection across the visible lines.
///
/// The selection is normalized first, so an inverted anchor/head pair
/// produces the same spans as its forward twin. Lines with an empty
/// selected sub-range contribute nothing.
pub fn selection_spans(
    doc: &Document,
    selection: &Selection,
    visible: Range<usize>,
    fonts: &dyn FontCatalog,
    font: FontId,
) -> Vec<LineSpan> {
    let mut spans = Vec::new();

    for line in visible {
        let Some(text) = doc.line(line) else { break };
        let Some((from, to)) = selection.columns_on_line(line, text.len()) else {
            continue;
        };

        let x_start = if from > 0 {
            fonts.measure(font, &text[..from])
        } else {
            0
        };
        let x_end = fonts.measure(font, &text[..to]);

        spans.push(LineSpan {
            line,
            x: x_start,
            width: x_end.saturating_sub(x_start),
        });
    }

    spans
}

/// Horizontal pixel offset of the cursor from the text origin.
pub fn cursor_x(doc: &Document, cursor: Position, fonts: &dyn FontCatalog, font: FontId) -> u32 {
    if cursor.col == 0 {
        return 0;
    }
    match doc.line(cursor.line) {
        Some(text) if cursor.col <= text.len() => fonts.measure(font, &text[..cursor.col]),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedAdvance;
    use std::path::Path;

    fn doc(lines: &[&str]) -> Document {
        let mut d = Document::new();
        d.load_lines(lines.iter().map(|l| l.to_string()));
        d
    }

    #[test]
    fn single_line_selection_measures_prefixes() {
        let d = doc(&["hello"]);
        let mut fonts = FixedAdvance::new(10, 20);
        let font = fonts.font(Path::new("mono.ttf"), 18);

        let sel = Selection::new(Position::new(0, 0), Position::new(0, 3));
        let spans = selection_spans(&d, &sel, 0..1, &fonts, font);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0], LineSpan { line: 0, x: 0, width: 30 });
        assert_eq!(spans[0].width, fonts.measure(font, "hel"));
    }

    #[test]
    fn inverted_selection_produces_identical_spans() {
        let d = doc(&["hello", "world"]);
        let mut fonts = FixedAdvance::new(10, 20);
        let font = fonts.font(Path::new("mono.ttf"), 18);

        let fwd = Selection::new(Position::new(0, 2), Position::new(1, 4));
        let bwd = Selection::new(Position::new(1, 4), Position::new(0, 2));

        assert_eq!(
            selection_spans(&d, &fwd, 0..2, &fonts, font),
            selection_spans(&d, &bwd, 0..2, &fonts, font)
        );
    }

    #[test]
    fn interior_lines_span_their_full_width() {
        let d = doc(&["aa", "bbbb", "cc"]);
        let mut fonts = FixedAdvance::new(10, 20);
        let font = fonts.font(Path::new("mono.ttf"), 18);

        let sel = Selection::new(Position::new(0, 1), Position::new(2, 1));
        let spans = selection_spans(&d, &sel, 0..3, &fonts, font);

        assert_eq!(spans[1], LineSpan { line: 1, x: 0, width: 40 });
    }

    #[test]
    fn only_visible_lines_are_measured() {
        let d = doc(&["aa", "bb", "cc", "dd"]);
        let mut fonts = FixedAdvance::new(10, 20);
        let font = fonts.font(Path::new("mono.ttf"), 18);

        let sel = Selection::new(Position::new(0, 0), Position::new(3, 2));
        let spans = selection_spans(&d, &sel, 1..3, &fonts, font);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].line, 1);
        assert_eq!(spans[1].line, 2);
    }

    #[test]
    fn cursor_x_is_prefix_width() {
        let d = doc(&["hello"]);
        let mut fonts = FixedAdvance::new(10, 20);
        let font = fonts.font(Path::new("mono.ttf"), 18);

        assert_eq!(cursor_x(&d, Position::new(0, 0), &fonts, font), 0);
        assert_eq!(cursor_x(&d, Position::new(0, 5), &fonts, font), 50);
    }
}
