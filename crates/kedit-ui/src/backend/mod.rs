//! Display backends. Exactly one is compiled in, by feature.

#[cfg(feature = "sdl")]
pub mod sdl;
