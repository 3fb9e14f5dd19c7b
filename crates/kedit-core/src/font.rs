//! Font metrics abstraction.
//!
//! Rasterization lives in the display backend; the engine only ever asks
//! two questions — how wide is this string, and how tall is a line. The
//! catalog owns the loaded fonts and is passed by reference into
//! whatever needs metrics. It is an ordinary value, not a process-wide
//! singleton: its lifetime is the application session.

use std::path::{Path, PathBuf};

/// Handle to a loaded font. Only meaningful to the catalog that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub usize);

/// Owned cache of loaded fonts plus pixel-metric queries.
///
/// `font` loads on first use and is idempotent: asking for the same
/// path/size pair again returns the same handle.
pub trait FontCatalog {
    /// Loads (or finds) a font by path and point size.
    fn font(&mut self, path: &Path, point_size: u16) -> FontId;

    /// Pixel width of `text` rendered in the given font.
    fn measure(&self, id: FontId, text: &str) -> u32;

    /// Recommended vertical distance between baselines, in pixels.
    fn line_skip(&self, id: FontId) -> u32;

    /// The point size the font was loaded at.
    fn point_size(&self, id: FontId) -> u16;
}

/// Deterministic fixed-advance metrics.
///
/// Every byte is `advance` pixels wide and a line is `line_skip` pixels
/// tall, regardless of the requested font. Used by the engine tests and
/// anywhere a real rasterizer is unavailable.
#[derive(Debug, Clone)]
pub struct FixedAdvance {
    advance: u32,
    line_skip: u32,
    loaded: Vec<(PathBuf, u16)>,
}

impl FixedAdvance {
    pub fn new(advance: u32, line_skip: u32) -> Self {
        Self {
            advance,
            line_skip,
            loaded: Vec::new(),
        }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(10, 20)
    }
}

impl FontCatalog for FixedAdvance {
    fn font(&mut self, path: &Path, point_size: u16) -> FontId {
        let key = (path.to_path_buf(), point_size);
        if let Some(idx) = self.loaded.iter().position(|k| *k == key) {
            return FontId(idx);
        }
        self.loaded.push(key);
        FontId(self.loaded.len() - 1)
    }

    fn measure(&self, _id: FontId, text: &str) -> u32 {
        text.len() as u32 * self.advance
    }

    fn line_skip(&self, _id: FontId) -> u32 {
        self.line_skip
    }

    fn point_size(&self, id: FontId) -> u16 {
        self.loaded.get(id.0).map(|(_, size)| *size).unwrap_or(0)
    }
}
