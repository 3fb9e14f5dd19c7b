//! Draws the editor into its area of the window.
//!
//! Pure translation from engine state to renderer calls; nothing here
//! mutates the editor. Paint order: current-line highlight, selection
//! fills, text, cursor, gutter background, line numbers, infobar.
//! The gutter is painted after the text so a horizontally scrolled line
//! slides underneath it instead of over it.

use kedit_core::{Editor, FontCatalog, FontId, GUTTER_PADDING, INFOBAR_HEIGHT};

use crate::render::{Align, Rect, Renderer};
use crate::theme;

/// Renders the whole editor area, `area` being the window rectangle
/// below the titlebar.
pub fn render(
    editor: &Editor,
    fonts: &dyn FontCatalog,
    r: &mut dyn Renderer,
    area: Rect,
    infobar_font: FontId,
) {
    let font = editor.font();
    let line_height = editor.line_height();
    let scroll_x = editor.scroll_x();
    let scroll_y = editor.scroll_y();

    // The gutter is wide enough for the largest line number.
    let number_width = fonts.measure(font, &editor.document().line_count().to_string()) as i32;
    let text_x = area.x + editor.gutter_margin() + number_width + GUTTER_PADDING;

    // Highlight behind the cursor's line.
    let cursor_line_y = area.y + editor.cursor().line as i32 * line_height - scroll_y;
    r.fill_rect(
        Rect::new(text_x, cursor_line_y, area.w - text_x + area.x, line_height),
        theme::CURRENT_LINE,
    );

    for span in editor.selection_spans(fonts) {
        let y = area.y + span.line as i32 * line_height - scroll_y;
        r.fill_rect(
            Rect::new(
                text_x + span.x as i32 - scroll_x,
                y,
                span.width as i32,
                line_height,
            ),
            theme::SELECTION,
        );
    }

    let visible = editor.visible_lines();
    for i in visible.clone() {
        let Some(line) = editor.document().line(i) else {
            break;
        };
        let y = area.y + i as i32 * line_height - scroll_y;
        r.draw_text(font, line, text_x - scroll_x, y, Align::Left, theme::TEXT);
    }

    let cursor_x = editor.cursor_x(fonts) as i32;
    let alpha = (editor.cursor_alpha() * 255.0) as u8;
    r.fill_rect(
        Rect::new(text_x + cursor_x - scroll_x, cursor_line_y, 2, line_height),
        theme::CURSOR.with_alpha(alpha),
    );

    // Gutter background covers whatever text scrolled under it.
    r.fill_rect(
        Rect::new(
            area.x,
            area.y,
            editor.gutter_margin() + number_width - GUTTER_PADDING,
            area.h,
        ),
        theme::BACKGROUND,
    );

    for i in visible {
        let y = area.y + i as i32 * line_height - scroll_y;
        let color = if i == editor.cursor().line {
            theme::LINE_NUMBER
        } else {
            theme::LINE_NUMBER.with_alpha(100)
        };
        r.draw_text(
            font,
            &format!("{:>4}", i + 1),
            area.x + number_width + 20,
            y,
            Align::Right,
            color,
        );
    }

    let infobar_y = area.y + area.h - INFOBAR_HEIGHT;
    r.fill_rect(
        Rect::new(area.x, infobar_y, area.w, INFOBAR_HEIGHT),
        theme::INFOBAR,
    );
    r.draw_text(
        infobar_font,
        &editor.infobar_text(),
        area.x + 5,
        infobar_y,
        Align::Left,
        theme::INFOBAR_TEXT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingRenderer};
    use kedit_core::{EditorConfig, FixedAdvance, Mods};
    use std::path::Path;

    fn setup() -> (Editor, FixedAdvance, FontId) {
        let mut fonts = FixedAdvance::new(10, 20);
        let mut editor = Editor::new(&EditorConfig::default(), &mut fonts);
        editor.set_viewport(800, 600);
        let infobar_font = fonts.font(Path::new("ui.ttf"), 16);
        (editor, fonts, infobar_font)
    }

    #[test]
    fn draws_text_numbers_and_infobar() {
        let (mut editor, mut fonts, infobar_font) = setup();
        editor.handle_event(
            &kedit_core::Event::TextInput("hi".to_string()),
            &mut fonts,
        );

        let mut r = RecordingRenderer::new();
        render(&editor, &fonts, &mut r, Rect::new(0, 35, 800, 565), infobar_font);

        let texts = r.texts();
        assert!(texts.contains(&"hi"));
        assert!(texts.contains(&"   1"));
        assert!(texts.iter().any(|t| t.ends_with("| Line 1, Col 3")));
    }

    #[test]
    fn selection_fill_is_drawn_before_text() {
        let (mut editor, mut fonts, infobar_font) = setup();
        editor.handle_event(
            &kedit_core::Event::TextInput("hello".to_string()),
            &mut fonts,
        );
        editor.move_cursor(0, 0, false);
        for _ in 0..3 {
            editor.handle_key(kedit_core::Key::Right, Mods::SHIFT, &mut fonts);
        }

        let mut r = RecordingRenderer::new();
        render(&editor, &fonts, &mut r, Rect::new(0, 0, 800, 600), infobar_font);

        let sel_idx = r
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Rect(_, c) if *c == theme::SELECTION))
            .expect("selection rect drawn");
        let text_idx = r
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Text { text, .. } if text == "hello"))
            .expect("text drawn");
        assert!(sel_idx < text_idx);

        // 3 selected columns at 10 px each.
        if let DrawOp::Rect(rect, _) = &r.ops[sel_idx] {
            assert_eq!(rect.w, 30);
        }
    }

    #[test]
    fn cursor_rect_carries_blink_alpha() {
        let (mut editor, fonts, infobar_font) = setup();
        editor.update(0.016); // inside cooldown, alpha 1.0

        let mut r = RecordingRenderer::new();
        render(&editor, &fonts, &mut r, Rect::new(0, 0, 800, 600), infobar_font);

        let cursor_op = r.ops.iter().find(
            |op| matches!(op, DrawOp::Rect(rect, c) if rect.w == 2 && c.r == theme::CURSOR.r),
        );
        assert!(matches!(cursor_op, Some(DrawOp::Rect(_, c)) if c.a == 255));
    }

    #[test]
    fn only_visible_lines_are_drawn() {
        let (mut editor, mut fonts, infobar_font) = setup();
        for _ in 0..99 {
            editor.split_line();
        }
        editor.handle_event(
            &kedit_core::Event::TextInput("last".to_string()),
            &mut fonts,
        );
        editor.set_viewport(800, 200);
        editor.move_cursor(99, 4, false);

        let mut r = RecordingRenderer::new();
        render(&editor, &fonts, &mut r, Rect::new(0, 0, 800, 200), infobar_font);

        // Line 1 scrolled far out of view; its number is not drawn.
        let texts = r.texts();
        assert!(texts.contains(&"last"));
        assert!(texts.contains(&" 100"));
        assert!(!texts.contains(&"   1"));
    }
}
