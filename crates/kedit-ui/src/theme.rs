//! The editor's color palette.
//!
//! A single dark theme, expressed as constants. Alpha-carrying entries
//! rely on the backend drawing with blending enabled.

use crate::render::Color;

/// Window and editor background.
pub const BACKGROUND: Color = Color::rgb(20, 20, 20);

/// Body text.
pub const TEXT: Color = Color::rgb(230, 230, 230);

/// Gutter line numbers. Dimmed to alpha 100 off the cursor line.
pub const LINE_NUMBER: Color = Color::rgb(100, 180, 100);

/// Highlight behind the cursor's line.
pub const CURRENT_LINE: Color = Color::rgb(25, 25, 25);

/// Selection fill, translucent over the line highlight.
pub const SELECTION: Color = Color::rgba(60, 90, 180, 150);

/// Cursor bar; the blink animation scales its alpha.
pub const CURSOR: Color = Color::rgb(200, 200, 200);

/// Infobar strip.
pub const INFOBAR: Color = Color::rgb(30, 30, 30);
pub const INFOBAR_TEXT: Color = Color::rgb(200, 200, 200);

/// Titlebar strip and its title text.
pub const TITLEBAR: Color = Color::rgb(10, 10, 10);
pub const TITLE_TEXT: Color = Color::rgb(255, 255, 255);

/// Titlebar buttons: resting state plus per-button hover targets.
pub const BUTTON: Color = Color::rgb(20, 20, 20);
pub const BUTTON_HOVER: Color = Color::rgb(50, 50, 50);
pub const CLOSE_HOVER: Color = Color::rgb(200, 50, 50);

/// File dialog surface and entries.
pub const DIALOG_BACKGROUND: Color = Color::rgb(20, 20, 20);
pub const DIALOG_TEXT: Color = Color::rgb(200, 200, 200);
pub const DIALOG_SELECTION: Color = Color::rgb(230, 70, 110);

/// Dimming veil drawn over everything while the window is unfocused.
pub const UNFOCUSED_VEIL: Color = Color::rgba(40, 40, 40, 100);
