//! Application state machine and frame composition.
//!
//! The app owns the editor, the titlebar chrome and the file dialog,
//! and routes events to whichever of the editor or dialog is active.
//! Window-level effects (quit, minimize, drag) come back to the backend
//! as [`WindowRequest`]s rather than being applied here, so the whole
//! state machine runs headless in tests.

use std::path::Path;

use kedit_core::{Config, Editor, Event, FontCatalog, FontId, Key};

use crate::chrome::{ChromeAction, Titlebar};
use crate::dialog::{DialogAction, FileDialog};
use crate::editor_view;
use crate::render::{Rect, Renderer};
use crate::theme;

/// Vertical gap between the titlebar and the text area.
const EDITOR_TOP_GAP: i32 = 5;

/// Point size for chrome and infobar text, independent of the editor
/// font size the user resizes with F1/F2.
const UI_FONT_SIZE: u16 = 16;

/// Something the backend must do to the window on the app's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    Quit,
    Minimize,
    ToggleMaximize,
    DragTo { offset_x: i32, offset_y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Editor,
    FileDialog,
}

pub struct App {
    pub editor: Editor,
    titlebar: Titlebar,
    dialog: FileDialog,
    state: AppState,
    ui_font: FontId,
    focused: bool,
    width: i32,
    height: i32,
}

impl App {
    pub fn new(config: &Config, fonts: &mut dyn FontCatalog) -> Self {
        let editor = Editor::new(&config.editor, fonts);
        let ui_font = fonts.font(&config.editor.font_path, UI_FONT_SIZE);

        Self {
            editor,
            titlebar: Titlebar::new("kedit", config.ui.titlebar_height),
            dialog: FileDialog::new("."),
            state: AppState::Editor,
            ui_font,
            focused: true,
            width: config.ui.window_width as i32,
            height: config.ui.window_height as i32,
        }
    }

    /// Loads a file given on the command line; a failure logs and leaves
    /// the empty buffer.
    pub fn open_initial_file(&mut self, path: &Path) {
        if let Err(e) = self.editor.load_file(path) {
            tracing::error!("cannot open {}: {e}", path.display());
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// The backend reports the window size each frame, before events.
    pub fn set_window_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        let area = self.editor_area();
        self.editor.set_viewport(area.w, area.h);
    }

    fn editor_area(&self) -> Rect {
        let top = self.titlebar.height() + EDITOR_TOP_GAP;
        Rect::new(0, top, self.width, self.height - top)
    }

    /// Routes one event. Chrome gets first look; F4 summons the file
    /// dialog from anywhere; everything else goes to whichever surface
    /// is active.
    pub fn handle_event(
        &mut self,
        event: &Event,
        fonts: &mut dyn FontCatalog,
    ) -> Option<WindowRequest> {
        if matches!(event, Event::Quit) {
            return Some(WindowRequest::Quit);
        }

        if let Some(action) = self.titlebar.handle_event(event, self.width) {
            return Some(match action {
                ChromeAction::Close => WindowRequest::Quit,
                ChromeAction::Minimize => WindowRequest::Minimize,
                ChromeAction::ToggleMaximize => WindowRequest::ToggleMaximize,
                ChromeAction::DragTo { offset_x, offset_y } => {
                    WindowRequest::DragTo { offset_x, offset_y }
                }
            });
        }

        if matches!(
            event,
            Event::KeyDown { key: Key::F4, .. }
        ) {
            self.dialog.reopen();
            self.state = AppState::FileDialog;
            return None;
        }

        match self.state {
            AppState::Editor => {
                self.editor.handle_event(event, fonts);
            }
            AppState::FileDialog => match self.dialog.handle_event(event) {
                Some(DialogAction::Chosen(path)) => {
                    if let Err(e) = self.editor.load_file(&path) {
                        tracing::error!("cannot open {}: {e}", path.display());
                    }
                    self.state = AppState::Editor;
                }
                Some(DialogAction::Cancelled) => {
                    self.state = AppState::Editor;
                }
                None => {}
            },
        }

        None
    }

    pub fn update(&mut self, dt: f32) {
        self.editor.update(dt);
        self.titlebar.update(dt);
    }

    pub fn render(&mut self, r: &mut dyn Renderer, fonts: &dyn FontCatalog) {
        r.clear(theme::BACKGROUND);
        self.titlebar.render(r, fonts, self.ui_font, self.width);

        let area = self.editor_area();
        self.editor.set_viewport(area.w, area.h);

        match self.state {
            AppState::Editor => {
                editor_view::render(&self.editor, fonts, r, area, self.ui_font);
            }
            AppState::FileDialog => {
                self.dialog.set_bounds(area);
                self.dialog.render(r, fonts, self.ui_font);
            }
        }

        if !self.focused {
            r.fill_rect(
                Rect::new(0, 0, self.width, self.height),
                theme::UNFOCUSED_VEIL,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use kedit_core::{FixedAdvance, Mods, MouseButton};
    use std::io::Write;

    fn app() -> (App, FixedAdvance) {
        let mut fonts = FixedAdvance::new(10, 20);
        let mut app = App::new(&Config::default(), &mut fonts);
        app.set_window_size(1000, 600);
        (app, fonts)
    }

    fn keydown(key: Key) -> Event {
        Event::KeyDown {
            key,
            mods: Mods::NONE,
        }
    }

    #[test]
    fn quit_event_requests_quit() {
        let (mut app, mut fonts) = app();
        assert_eq!(
            app.handle_event(&Event::Quit, &mut fonts),
            Some(WindowRequest::Quit)
        );
    }

    #[test]
    fn close_button_requests_quit() {
        let (mut app, mut fonts) = app();
        let click = Event::MouseButtonDown {
            x: 960,
            y: 10,
            button: MouseButton::Left,
            clicks: 1,
        };
        assert_eq!(
            app.handle_event(&click, &mut fonts),
            Some(WindowRequest::Quit)
        );
    }

    #[test]
    fn f4_opens_the_dialog_and_escape_returns() {
        let (mut app, mut fonts) = app();

        app.handle_event(&keydown(Key::F4), &mut fonts);
        assert_eq!(app.state, AppState::FileDialog);

        // Typing goes to the dialog, not the buffer.
        app.handle_event(&Event::TextInput("x".to_string()), &mut fonts);
        assert_eq!(app.editor.document().line(0), Some(""));

        app.handle_event(&keydown(Key::Escape), &mut fonts);
        assert_eq!(app.state, AppState::Editor);
    }

    #[test]
    fn choosing_a_file_loads_it_and_closes_the_dialog() {
        let (mut app, mut fonts) = app();

        let dir = tempfile::tempdir().expect("tempdir");
        let mut file = std::fs::File::create(dir.path().join("note.txt")).expect("create");
        write!(file, "from dialog").expect("write");
        app.dialog = FileDialog::new(dir.path());

        app.handle_event(&keydown(Key::F4), &mut fonts);
        assert_eq!(app.state, AppState::FileDialog);

        // "..", then the single file.
        app.handle_event(&keydown(Key::Down), &mut fonts);
        app.handle_event(&keydown(Key::Down), &mut fonts);
        app.handle_event(&keydown(Key::Return), &mut fonts);

        assert_eq!(app.state, AppState::Editor);
        assert_eq!(app.editor.document().line(0), Some("from dialog"));
    }

    #[test]
    fn editor_gets_events_in_editor_state() {
        let (mut app, mut fonts) = app();
        app.handle_event(&Event::TextInput("ok".to_string()), &mut fonts);
        assert_eq!(app.editor.document().line(0), Some("ok"));
    }

    #[test]
    fn window_size_flows_into_editor_viewport() {
        let (mut app, mut fonts) = app();
        app.set_window_size(500, 300);
        app.handle_event(&Event::TextInput("x".to_string()), &mut fonts);

        // Viewport-dependent scrolling stays sane at the new size.
        assert_eq!(app.editor.scroll_y(), 0);
    }

    #[test]
    fn unfocused_window_gets_a_veil() {
        let (mut app, fonts) = app();
        app.set_focused(false);

        let mut r = RecordingRenderer::new();
        app.render(&mut r, &fonts);

        let last_rect = r
            .ops
            .iter()
            .rev()
            .find_map(|op| match op {
                crate::render::DrawOp::Rect(_, c) => Some(*c),
                _ => None,
            })
            .expect("rects drawn");
        assert_eq!(last_rect, theme::UNFOCUSED_VEIL);
    }

    #[test]
    fn render_in_dialog_state_draws_the_listing() {
        let (mut app, mut fonts) = app();
        app.handle_event(&keydown(Key::F4), &mut fonts);

        let mut r = RecordingRenderer::new();
        app.render(&mut r, &fonts);

        assert!(r.texts().contains(&".."));
    }
}
