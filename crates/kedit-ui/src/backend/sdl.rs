//! SDL2 + SDL_ttf display backend.
//!
//! Owns the window, the hardware canvas and the loaded fonts, and runs
//! the poll/update/render frame loop. Everything editor-shaped happens
//! in [`App`]; this module only translates SDL events into the neutral
//! event type, applies [`WindowRequest`]s to the real window, and
//! rasterizes text.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context};
use sdl2::event::Event as SdlEvent;
use sdl2::keyboard::{Keycode, Mod};
use sdl2::mouse::MouseButton as SdlMouseButton;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{BlendMode, Canvas, TextureCreator};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext, WindowPos};

use kedit_core::{Event, FontCatalog, FontId, Key, Mods, MouseButton};

use crate::app::{App, WindowRequest};
use crate::render::{Align, Color, Renderer};
use crate::Flags;

// ==================== Fonts ====================

/// SDL_ttf-backed font catalog. Fonts load once per (path, size) pair
/// and live for the session.
struct TtfCatalog<'ttf> {
    ctx: &'ttf Sdl2TtfContext,
    fonts: Vec<LoadedFont<'ttf>>,
}

struct LoadedFont<'ttf> {
    path: PathBuf,
    size: u16,
    font: Font<'ttf, 'static>,
}

impl<'ttf> TtfCatalog<'ttf> {
    fn new(ctx: &'ttf Sdl2TtfContext) -> Self {
        Self {
            ctx,
            fonts: Vec::new(),
        }
    }

    fn get(&self, id: FontId) -> Option<&Font<'ttf, 'static>> {
        self.fonts.get(id.0).map(|f| &f.font)
    }
}

impl FontCatalog for TtfCatalog<'_> {
    fn font(&mut self, path: &Path, point_size: u16) -> FontId {
        if let Some(idx) = self
            .fonts
            .iter()
            .position(|f| f.path == path && f.size == point_size)
        {
            return FontId(idx);
        }

        match self.ctx.load_font(path, point_size) {
            Ok(font) => {
                self.fonts.push(LoadedFont {
                    path: path.to_path_buf(),
                    size: point_size,
                    font,
                });
                FontId(self.fonts.len() - 1)
            }
            Err(e) => {
                // Keep the previous handle rather than crash mid-session
                // (an F2 resize past what the file supports, say).
                tracing::error!("cannot load font {} at {point_size}pt: {e}", path.display());
                FontId(0)
            }
        }
    }

    fn measure(&self, id: FontId, text: &str) -> u32 {
        self.get(id)
            .and_then(|f| f.size_of(text).ok())
            .map(|(w, _)| w)
            .unwrap_or(0)
    }

    fn line_skip(&self, id: FontId) -> u32 {
        self.get(id)
            .map(|f| f.recommended_line_spacing().max(1) as u32)
            .unwrap_or(1)
    }

    fn point_size(&self, id: FontId) -> u16 {
        self.fonts.get(id.0).map(|f| f.size).unwrap_or(0)
    }
}

// ==================== Drawing ====================

/// Per-frame renderer over the SDL canvas. Borrows the catalog
/// immutably, so font loads must happen before the draw phase.
struct SdlFrame<'a, 'ttf> {
    canvas: &'a mut Canvas<Window>,
    creator: &'a TextureCreator<WindowContext>,
    fonts: &'a TtfCatalog<'ttf>,
}

fn to_sdl(color: Color) -> SdlColor {
    SdlColor::RGBA(color.r, color.g, color.b, color.a)
}

impl Renderer for SdlFrame<'_, '_> {
    fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(to_sdl(color));
        self.canvas.clear();
    }

    fn fill_rect(&mut self, rect: crate::render::Rect, color: Color) {
        self.canvas.set_draw_color(to_sdl(color));
        if let Err(e) = self
            .canvas
            .fill_rect(SdlRect::new(rect.x, rect.y, rect.w.max(0) as u32, rect.h.max(0) as u32))
        {
            tracing::warn!("fill_rect failed: {e}");
        }
    }

    fn draw_text(&mut self, font: FontId, text: &str, x: i32, y: i32, align: Align, color: Color) {
        if text.is_empty() {
            return;
        }
        let Some(f) = self.fonts.get(font) else {
            return;
        };

        let surface = match f.render(text).blended(to_sdl(color)) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("text render failed: {e}");
                return;
            }
        };
        let (w, h) = (surface.width(), surface.height());
        let texture = match self.creator.create_texture_from_surface(&surface) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("texture upload failed: {e}");
                return;
            }
        };

        let x = match align {
            Align::Left => x,
            Align::Center => x - w as i32 / 2,
            Align::Right => x - w as i32,
        };

        if let Err(e) = self
            .canvas
            .copy(&texture, None, SdlRect::new(x, y, w, h))
        {
            tracing::warn!("texture copy failed: {e}");
        }
    }
}

// ==================== Event translation ====================

fn translate_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Return => Key::Return,
        Keycode::Backspace => Key::Backspace,
        Keycode::Delete => Key::Delete,
        Keycode::Tab => Key::Tab,
        Keycode::Escape => Key::Escape,
        Keycode::F1 => Key::F1,
        Keycode::F2 => Key::F2,
        Keycode::F3 => Key::F3,
        Keycode::F4 => Key::F4,
        Keycode::F5 => Key::F5,
        Keycode::F6 => Key::F6,
        Keycode::F7 => Key::F7,
        Keycode::F8 => Key::F8,
        _ => Key::Unknown,
    }
}

fn translate_mods(keymod: Mod) -> Mods {
    let mut mods = Mods::NONE;
    if keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD) {
        mods = mods | Mods::SHIFT;
    }
    if keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD) {
        mods = mods | Mods::CTRL;
    }
    if keymod.intersects(Mod::LALTMOD | Mod::RALTMOD) {
        mods = mods | Mods::ALT;
    }
    mods
}

fn translate_button(button: SdlMouseButton) -> Option<MouseButton> {
    match button {
        SdlMouseButton::Left => Some(MouseButton::Left),
        SdlMouseButton::Middle => Some(MouseButton::Middle),
        SdlMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

fn translate_event(event: SdlEvent, wheel_mods: Mods) -> Option<Event> {
    match event {
        SdlEvent::Quit { .. } => Some(Event::Quit),

        SdlEvent::KeyDown {
            keycode: Some(keycode),
            keymod,
            ..
        } => Some(Event::KeyDown {
            key: translate_key(keycode),
            mods: translate_mods(keymod),
        }),

        SdlEvent::KeyUp {
            keycode: Some(keycode),
            keymod,
            ..
        } => Some(Event::KeyUp {
            key: translate_key(keycode),
            mods: translate_mods(keymod),
        }),

        SdlEvent::TextInput { text, .. } => Some(Event::TextInput(text)),

        SdlEvent::MouseButtonDown {
            x,
            y,
            mouse_btn,
            clicks,
            ..
        } => translate_button(mouse_btn).map(|button| Event::MouseButtonDown {
            x,
            y,
            button,
            clicks,
        }),

        SdlEvent::MouseButtonUp {
            x, y, mouse_btn, ..
        } => translate_button(mouse_btn).map(|button| Event::MouseButtonUp { x, y, button }),

        SdlEvent::MouseMotion {
            x, y, xrel, yrel, ..
        } => Some(Event::MouseMotion {
            x,
            y,
            dx: xrel,
            dy: yrel,
        }),

        // SDL wheel events carry no modifier state; it is sampled from
        // the keyboard at poll time.
        SdlEvent::MouseWheel { x, y, .. } => Some(Event::MouseWheel {
            x,
            y,
            mods: wheel_mods,
        }),

        _ => None,
    }
}

// ==================== Frame loop ====================

pub fn run(flags: Flags) -> anyhow::Result<()> {
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let video = sdl.video().map_err(|e| anyhow!(e))?;
    let ttf = sdl2::ttf::init().context("SDL_ttf init")?;

    let ui = &flags.config.ui;
    let window = video
        .window("kedit", ui.window_width, ui.window_height)
        .position_centered()
        .borderless()
        .resizable()
        .build()
        .context("window creation")?;

    let mut canvas = window
        .into_canvas()
        .accelerated()
        .present_vsync()
        .build()
        .context("canvas creation")?;
    canvas.set_blend_mode(BlendMode::Blend);
    let creator = canvas.texture_creator();

    let mut fonts = TtfCatalog::new(&ttf);
    // The editor font must exist; everything else can degrade.
    fonts.font(&flags.config.editor.font_path, flags.config.editor.font_size);
    if fonts.fonts.is_empty() {
        return Err(anyhow!(
            "cannot load font {}",
            flags.config.editor.font_path.display()
        ));
    }

    let mut app = App::new(&flags.config, &mut fonts);
    if let Some(path) = &flags.file {
        app.open_initial_file(path);
    }

    video.text_input().start();
    let mut pump = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let keyboard = sdl.keyboard();
    let mut maximized = false;
    let mut last_tick = Instant::now();

    tracing::info!("entering frame loop");

    'running: loop {
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;

        let (win_w, win_h) = canvas.output_size().map_err(|e| anyhow!(e))?;
        app.set_window_size(win_w as i32, win_h as i32);
        app.set_focused(canvas.window().has_input_focus());

        while let Some(sdl_event) = pump.poll_event() {
            let wheel_mods = translate_mods(keyboard.mod_state());
            let Some(event) = translate_event(sdl_event, wheel_mods) else {
                continue;
            };

            match app.handle_event(&event, &mut fonts) {
                Some(WindowRequest::Quit) => break 'running,
                Some(WindowRequest::Minimize) => canvas.window_mut().minimize(),
                Some(WindowRequest::ToggleMaximize) => {
                    if maximized {
                        canvas.window_mut().restore();
                    } else {
                        canvas.window_mut().maximize();
                    }
                    maximized = !maximized;
                }
                Some(WindowRequest::DragTo { offset_x, offset_y }) => {
                    let state = pump.mouse_state();
                    let (wx, wy) = canvas.window().position();
                    canvas.window_mut().set_position(
                        WindowPos::Positioned(wx + state.x() - offset_x),
                        WindowPos::Positioned(wy + state.y() - offset_y),
                    );
                }
                None => {}
            }
        }

        app.update(dt);

        {
            let mut frame = SdlFrame {
                canvas: &mut canvas,
                creator: &creator,
                fonts: &fonts,
            };
            app.render(&mut frame, &fonts);
        }
        canvas.present();
    }

    tracing::info!("shutting down");
    Ok(())
}
