//! # kedit-core
//!
//! The editing engine behind kedit: a line-oriented document with a
//! cursor, an anchored selection, and a pixel-scrolled viewport kept in
//! sync with cursor movement.
//!
//! The engine is strictly single-threaded: one owner drives it through a
//! poll/update/render frame loop, so there is no locking anywhere.
//! Editing operations never fail visibly — capacity exhaustion is a
//! silent no-op and navigation clamps by construction. Only the I/O
//! boundary (file load/save) returns a `Result`.
//!
//! Drawing and font rasterization live behind small capability traits
//! (`FontCatalog` here, `Renderer` in the UI crate) so the engine can be
//! exercised headless in tests.

pub mod config;
pub mod editor;
pub mod font;
pub mod geometry;
pub mod input;

pub use config::{Config, EditorConfig, UiConfig};
pub use editor::{Editor, GUTTER_PADDING, INFOBAR_HEIGHT};
pub use font::{FixedAdvance, FontCatalog, FontId};
pub use geometry::LineSpan;
pub use input::{Event, Key, Mods, MouseButton};

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can cross the engine boundary.
///
/// Ordinary editing never produces one of these; only the persistence
/// calls do, and they leave the in-memory state untouched on failure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("no file name set for this buffer")]
    NoFileName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}
