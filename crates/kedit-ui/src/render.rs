//! Backend-neutral drawing surface.
//!
//! Everything above the backend draws through [`Renderer`]: filled
//! rectangles and text runs, nothing else. The SDL backend implements it
//! over a hardware canvas; [`RecordingRenderer`] implements it headless
//! so chrome, dialog and view code can be tested without a display.

use kedit_core::FontId;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// Horizontal anchoring for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// The drawing operations the UI needs from a backend.
///
/// `x` for [`Renderer::draw_text`] is the anchor point; the backend
/// shifts left by half or all of the measured width for center/right
/// alignment.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, font: FontId, text: &str, x: i32, y: i32, align: Align, color: Color);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear(Color),
    Rect(Rect, Color),
    Text {
        font: FontId,
        text: String,
        x: i32,
        y: i32,
        align: Align,
        color: Color,
    },
}

/// Headless renderer that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub ops: Vec<DrawOp>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded text runs, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect(rect, color));
    }

    fn draw_text(&mut self, font: FontId, text: &str, x: i32, y: i32, align: Align, color: Color) {
        self.ops.push(DrawOp::Text {
            font,
            text: text.to_string(),
            x,
            y,
            align,
            color,
        });
    }
}
