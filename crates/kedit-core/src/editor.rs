//! The editing engine.
//!
//! `Editor` owns the document, the cursor, the anchored selection, the
//! pixel scroll offsets and the cursor-blink animation, and it is the
//! only component that mutates any of them. The frame loop feeds it
//! events, ticks `update` with the elapsed time, and then reads its
//! state back out to draw.
//!
//! Two rules shape every operation in here:
//!
//! - Capacity exhaustion is a silent no-op. An insert, split or join
//!   that would cross a document bound leaves the buffer, the cursor and
//!   the selection exactly as they were.
//! - All navigation funnels through [`Editor::move_cursor`], which
//!   handles the selection state machine, resets the blink cooldown and
//!   reconciles the scroll window so a margin of context lines stays
//!   visible around the cursor.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::{Path, PathBuf};

use kedit_buffer::{Document, DocumentLimits, Position, Selection};

use crate::config::EditorConfig;
use crate::font::{FontCatalog, FontId};
use crate::geometry::{self, LineSpan};
use crate::input::{Event, Key, Mods};
use crate::{CoreError, CoreResult};

/// Height of the infobar strip at the bottom of the editor viewport.
/// The scroll math treats it as opaque: text never scrolls under it.
pub const INFOBAR_HEIGHT: i32 = 25;

/// F1 can shrink the font down to this point size and no further.
const MIN_FONT_SIZE: u16 = 6;

/// Pixel gap between the line-number column and the text.
pub const GUTTER_PADDING: i32 = 5;

pub struct Editor {
    doc: Document,
    cursor: Position,
    /// Present iff a shift-navigation is in flight ("selecting" mode).
    selection: Option<Selection>,

    scroll_x: i32,
    scroll_y: i32,

    line_height: i32,
    viewport_width: i32,
    viewport_height: i32,

    gutter_margin: i32,
    cursor_margin_lines: usize,
    tab_width: usize,

    cursor_timer: f32,
    cursor_alpha: f32,
    cursor_cooldown: f32,
    cursor_blink_duration: f32,

    file_path: Option<PathBuf>,
    /// Cached snapshot comparison, refreshed every update tick.
    saved: bool,

    font: FontId,
    font_path: PathBuf,
    font_size: u16,
}

impl Editor {
    pub fn new(config: &EditorConfig, fonts: &mut dyn FontCatalog) -> Self {
        let font = fonts.font(&config.font_path, config.font_size);
        let line_height = fonts.line_skip(font) as i32;

        Self {
            doc: Document::with_limits(DocumentLimits {
                max_lines: config.max_lines,
                max_line_len: config.max_line_len,
            }),
            cursor: Position::ZERO,
            selection: None,
            scroll_x: 0,
            scroll_y: 0,
            line_height,
            viewport_width: 0,
            viewport_height: 0,
            gutter_margin: config.gutter_margin,
            cursor_margin_lines: config.cursor_margin_lines,
            tab_width: config.tab_width,
            cursor_timer: 0.0,
            cursor_alpha: 1.0,
            cursor_cooldown: 1.0,
            cursor_blink_duration: config.cursor_blink_duration,
            file_path: None,
            saved: true,
            font,
            font_path: config.font_path.clone(),
            font_size: config.font_size,
        }
    }

    /// Back to a blank single-line document with everything zeroed.
    fn reset(&mut self) {
        self.doc.clear();
        self.cursor = Position::ZERO;
        self.selection = None;
        self.scroll_x = 0;
        self.scroll_y = 0;
        self.cursor_timer = 0.0;
        self.cursor_alpha = 1.0;
        self.cursor_cooldown = 1.0;
        self.file_path = None;
        self.saved = true;
    }

    // ==================== State access ====================

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn scroll_x(&self) -> i32 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    pub fn gutter_margin(&self) -> i32 {
        self.gutter_margin
    }

    pub fn cursor_alpha(&self) -> f32 {
        self.cursor_alpha
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// The viewport is owned by the frame loop; it tells the engine the
    /// current size before events and rendering each frame.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Viewport height minus the infobar strip.
    fn usable_height(&self) -> i32 {
        self.viewport_height - INFOBAR_HEIGHT
    }

    /// Lines intersecting the current viewport, for rendering.
    pub fn visible_lines(&self) -> Range<usize> {
        let first = (self.scroll_y / self.line_height).max(0) as usize;
        let last = ((self.scroll_y + self.viewport_height) / self.line_height + 1).max(0) as usize;
        first.min(self.doc.line_count())..last.min(self.doc.line_count())
    }

    /// Status line content: `name[*] | Line l, Col c`, 1-indexed.
    pub fn infobar_text(&self) -> String {
        let name = self
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        format!(
            "{}{} | Line {}, Col {}",
            name,
            if self.saved { "" } else { "*" },
            self.cursor.line + 1,
            self.cursor.col + 1
        )
    }

    // ==================== Geometry ====================

    /// Pixel spans of the active selection across the visible lines.
    pub fn selection_spans(&self, fonts: &dyn FontCatalog) -> Vec<LineSpan> {
        match &self.selection {
            Some(sel) if !sel.is_empty() => {
                geometry::selection_spans(&self.doc, sel, self.visible_lines(), fonts, self.font)
            }
            _ => Vec::new(),
        }
    }

    /// Horizontal pixel offset of the cursor from the text origin.
    pub fn cursor_x(&self, fonts: &dyn FontCatalog) -> u32 {
        geometry::cursor_x(&self.doc, self.cursor, fonts, self.font)
    }

    // ==================== Editing ====================

    /// Inserts one character at the cursor.
    ///
    /// Silent no-op when the line is at capacity. An active selection is
    /// neither replaced nor cleared — typing over a selection leaves the
    /// selected text in place, as the editor has always behaved.
    pub fn insert_char(&mut self, ch: char) {
        if self.doc.insert_char(self.cursor, ch) {
            self.cursor.col += 1;
        }
    }

    /// Removes the character left of the cursor, joining lines at column
    /// 0. The join is silently refused when the merged line would not
    /// fit; nothing happens at the very start of the document.
    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            if self.doc.remove_char_before(self.cursor) {
                self.cursor.col -= 1;
            }
        } else if self.cursor.line > 0 {
            if let Some(col) = self.doc.join_with_previous(self.cursor.line) {
                self.cursor.line -= 1;
                self.cursor.col = col;
            }
        }

        self.cursor_cooldown = 1.0;
    }

    /// Splits the current line at the cursor (Return). Silent no-op at
    /// the line-count bound; otherwise the cursor moves to column 0 of
    /// the new line through the usual choke point.
    pub fn split_line(&mut self) {
        if self.doc.split_line(self.cursor) {
            self.move_cursor(self.cursor.line + 1, 0, false);
        }
    }

    fn insert_tab(&mut self) {
        for _ in 0..self.tab_width {
            self.insert_char(' ');
        }
    }

    // ==================== Navigation ====================

    /// The single choke point for cursor movement.
    ///
    /// With `extend` the pre-move cursor becomes the anchor of a fresh
    /// selection (or an existing one keeps its anchor) and the head
    /// follows the new cursor; without it any selection is cleared. The
    /// blink cooldown restarts and the scroll window is reconciled so
    /// the cursor keeps `cursor_margin_lines` of context visible.
    pub fn move_cursor(&mut self, line: usize, col: usize, extend: bool) {
        if extend {
            let sel = self
                .selection
                .get_or_insert_with(|| Selection::anchored_at(self.cursor));
            sel.extend_to(Position::new(line, col));
        } else {
            self.selection = None;
        }

        self.cursor = Position::new(line, col);
        self.cursor_cooldown = 1.0;
        self.reconcile_scroll();
    }

    /// Margin-based scroll reconciliation: scroll just enough that the
    /// cursor sits no closer than the margin to either edge of the
    /// usable window, rather than snapping to "barely visible".
    fn reconcile_scroll(&mut self) {
        if self.viewport_height <= 0 {
            return;
        }

        let usable = self.usable_height();
        let first_visible = self.scroll_y / self.line_height;
        let last_visible = (self.scroll_y + usable) / self.line_height;
        let margin = self.cursor_margin_lines as i32;
        let line = self.cursor.line as i32;

        if line < first_visible + margin {
            // Cursor too close to the top: scroll up, clamping at the
            // document start where the margin cannot be satisfied.
            self.scroll_y = (line - margin).max(0) * self.line_height;
        } else if line > last_visible - margin {
            let lines_fit = usable / self.line_height;
            self.scroll_y = (line - lines_fit + margin) * self.line_height;
        }
    }

    fn max_scroll_y(&self) -> i32 {
        let content_height = self.doc.line_count() as i32 * self.line_height + INFOBAR_HEIGHT;
        let max = content_height - (self.viewport_height + INFOBAR_HEIGHT)
            + self.line_height * self.cursor_margin_lines as i32;
        max.max(0)
    }

    fn clamp_scroll_y(&mut self) {
        self.scroll_y = self.scroll_y.clamp(0, self.max_scroll_y());
    }

    fn move_left(&mut self, extend: bool) {
        let Position { mut line, mut col } = self.cursor;
        if col > 0 {
            col -= 1;
        } else if line > 0 {
            line -= 1;
            col = self.doc.line_len(line);
        }
        self.move_cursor(line, col, extend);
    }

    fn move_right(&mut self, extend: bool) {
        let Position { mut line, mut col } = self.cursor;
        if col < self.doc.line_len(line) {
            col += 1;
        } else if line + 1 < self.doc.line_count() {
            line += 1;
            col = 0;
        }
        self.move_cursor(line, col, extend);
    }

    fn move_up(&mut self, extend: bool) {
        if self.cursor.line > 0 {
            let line = self.cursor.line - 1;
            let col = self.cursor.col.min(self.doc.line_len(line));
            self.move_cursor(line, col, extend);
        } else if !extend {
            self.selection = None;
        }
    }

    fn move_down(&mut self, extend: bool) {
        if self.cursor.line + 1 < self.doc.line_count() {
            let line = self.cursor.line + 1;
            let col = self.cursor.col.min(self.doc.line_len(line));
            self.move_cursor(line, col, extend);
        } else if !extend {
            self.selection = None;
        }
    }

    // ==================== Input ====================

    /// Routes a polled event into the engine.
    pub fn handle_event(&mut self, event: &Event, fonts: &mut dyn FontCatalog) {
        match event {
            Event::KeyDown { key, mods } => self.handle_key(*key, *mods, fonts),
            Event::TextInput(text) => {
                for ch in text.chars() {
                    self.insert_char(ch);
                }
            }
            Event::MouseWheel { y, mods, .. } => self.handle_scroll(*y, *mods, fonts),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: Key, mods: Mods, fonts: &mut dyn FontCatalog) {
        match key {
            Key::Backspace => self.backspace(),
            Key::Tab => self.insert_tab(),
            Key::Return => self.split_line(),
            Key::Left => self.move_left(mods.shift()),
            Key::Right => self.move_right(mods.shift()),
            Key::Up => self.move_up(mods.shift()),
            Key::Down => self.move_down(mods.shift()),
            Key::F1 => {
                if self.font_size > MIN_FONT_SIZE {
                    self.set_font_size(self.font_size - 1, fonts);
                }
            }
            Key::F2 => self.set_font_size(self.font_size + 1, fonts),
            Key::F5 => {
                if let Err(e) = self.save_file() {
                    tracing::error!("save failed: {e}");
                }
            }
            _ => {}
        }
    }

    fn set_font_size(&mut self, size: u16, fonts: &mut dyn FontCatalog) {
        self.font = fonts.font(&self.font_path, size);
        self.font_size = size;
        self.line_height = fonts.line_skip(self.font) as i32;
        self.clamp_scroll_y();
    }

    /// Wheel scrolling. Vertical moves by whole lines and clamps to the
    /// content. Shift+wheel scrolls horizontally, but only while some
    /// currently visible line is wider than the text area — otherwise
    /// the horizontal offset snaps back to zero so a short-lined view
    /// can never wander sideways.
    pub fn handle_scroll(&mut self, wheel_y: i32, mods: Mods, fonts: &dyn FontCatalog) {
        if mods.shift() {
            let widest = self
                .visible_lines()
                .filter_map(|i| self.doc.line(i))
                .map(|l| fonts.measure(self.font, l))
                .max()
                .unwrap_or(0) as i32;

            if widest > self.viewport_width - self.gutter_margin - 40 {
                self.scroll_x -= wheel_y * self.line_height * 2;
                self.scroll_x = self
                    .scroll_x
                    .clamp(0, self.viewport_width + self.gutter_margin);
            } else {
                self.scroll_x = 0;
            }
        } else {
            self.scroll_y -= wheel_y * self.line_height;
            self.clamp_scroll_y();
        }
    }

    // ==================== Per-frame update ====================

    /// Advances the blink animation and refreshes the dirty flag.
    ///
    /// While the cooldown runs (restarted by every cursor move and
    /// backspace) the cursor stays fully opaque; afterwards the alpha
    /// follows a cosine over the blink period, scaled into [0.1, 1.0]
    /// so the cursor never fully vanishes.
    pub fn update(&mut self, dt: f32) {
        if self.cursor_cooldown > 0.0 {
            self.cursor_cooldown -= dt;
            if self.cursor_cooldown <= 0.0 {
                self.cursor_cooldown = 0.0;
                // Fade starts from full opacity.
                self.cursor_timer = 0.0;
            }
            self.cursor_alpha = 1.0;
        } else {
            self.cursor_timer += dt;
            let t = (self.cursor_timer % self.cursor_blink_duration) / self.cursor_blink_duration;
            let wave = (t * 2.0 * std::f32::consts::PI).cos();
            self.cursor_alpha = 0.1 + ((wave + 1.0) / 2.0) * 0.9;
        }

        self.saved = self.doc.is_saved();
    }

    // ==================== Persistence ====================

    /// Loads a file, replacing the entire engine state.
    ///
    /// The file is opened before anything is touched: a failed open
    /// returns the error with the previous document, cursor and scroll
    /// fully intact. On success the engine resets, lines stream in with
    /// their trailing `\n`/`\r` stripped (stopping at the line bound),
    /// the cursor lands at end-of-file and the snapshot marks the fresh
    /// content as saved.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::info!("loading {}", path.display());

        self.reset();

        let reader = BufReader::new(file);
        let lines = reader
            .lines()
            .map_while(Result::ok)
            .map(|l| l.strip_suffix('\r').map(str::to_string).unwrap_or(l));
        self.doc.load_lines(lines);

        let last = self.doc.line_count() - 1;
        self.cursor = Position::new(last, self.doc.line_len(last));
        self.file_path = Some(path.to_path_buf());
        self.saved = true;
        Ok(())
    }

    /// Writes the document to its file: lines joined with `\n`, no
    /// trailing newline, no metadata. The in-memory buffer is unaffected
    /// either way; the snapshot refreshes only after the write succeeds.
    pub fn save_file(&mut self) -> CoreResult<()> {
        let path = self.file_path.clone().ok_or(CoreError::NoFileName)?;
        std::fs::write(&path, self.doc.contents())?;
        tracing::info!("saved {}", path.display());

        self.doc.mark_saved();
        self.saved = true;
        Ok(())
    }
}
