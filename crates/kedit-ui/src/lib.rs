//! # kedit-ui
//!
//! Everything the user sees: the borderless-window chrome, the file
//! dialog, the render adapter for the editor, and the SDL2 display
//! backend that drives the frame loop.
//!
//! The backend is feature-gated (`sdl`) so the crate compiles and its
//! tests run on machines without the SDL2 libraries; everything above
//! the [`render::Renderer`] trait is backend-neutral.

pub mod animation;
pub mod app;
pub mod chrome;
pub mod dialog;
pub mod editor_view;
pub mod render;
pub mod theme;

mod backend;

use std::path::PathBuf;

use kedit_core::Config;

/// Startup parameters handed down from the binary.
#[derive(Debug, Clone)]
pub struct Flags {
    /// File to open at startup.
    pub file: Option<PathBuf>,
    pub config: Config,
}

/// Opens the window and runs the frame loop until the app quits.
#[cfg(feature = "sdl")]
pub fn run(flags: Flags) -> anyhow::Result<()> {
    backend::sdl::run(flags)
}

#[cfg(not(feature = "sdl"))]
pub fn run(flags: Flags) -> anyhow::Result<()> {
    let _ = flags;
    anyhow::bail!("built without a display backend; rebuild with `--features sdl`")
}
