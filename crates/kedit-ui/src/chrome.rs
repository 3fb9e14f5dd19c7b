//! Borderless-window chrome: the custom titlebar.
//!
//! The titlebar owns three proportionally-placed buttons and the drag
//! state for moving the window. It never touches the window itself;
//! handling an event yields a [`ChromeAction`] and the backend applies
//! it to whatever windowing system is underneath.

use kedit_core::{Event, FontCatalog, FontId, MouseButton};

use crate::animation::ColorTransition;
use crate::render::{Align, Color, Rect, Renderer};
use crate::theme;

const HOVER_FADE_SECS: f32 = 0.2;

/// What the backend should do to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeAction {
    Close,
    ToggleMaximize,
    Minimize,
    /// The titlebar is being dragged; reposition the window so the
    /// point grabbed at press time stays under the pointer.
    DragTo { offset_x: i32, offset_y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonKind {
    Minimize,
    Maximize,
    Close,
}

struct Button {
    kind: ButtonKind,
    /// Horizontal placement as a fraction of the window width, so the
    /// buttons track the right edge through resizes.
    rel_x: f32,
    rel_width: f32,
    label: &'static str,
    hovered: bool,
    fade: ColorTransition,
}

impl Button {
    fn new(kind: ButtonKind, rel_x: f32, label: &'static str, hover_color: Color) -> Self {
        Self {
            kind,
            rel_x,
            rel_width: 0.05,
            label,
            hovered: false,
            fade: ColorTransition::new(theme::BUTTON, hover_color, HOVER_FADE_SECS),
        }
    }

    fn bounds(&self, width: i32) -> Rect {
        let x = (self.rel_x * width as f32) as i32;
        let w = (self.rel_width * width as f32) as i32;
        Rect::new(x, 0, w, 0)
    }

    fn action(&self) -> ChromeAction {
        match self.kind {
            ButtonKind::Minimize => ChromeAction::Minimize,
            ButtonKind::Maximize => ChromeAction::ToggleMaximize,
            ButtonKind::Close => ChromeAction::Close,
        }
    }
}

pub struct Titlebar {
    title: String,
    height: i32,
    buttons: Vec<Button>,
    dragging: bool,
    drag_offset: (i32, i32),
}

impl Titlebar {
    pub fn new(title: impl Into<String>, height: i32) -> Self {
        Self {
            title: title.into(),
            height,
            buttons: vec![
                Button::new(ButtonKind::Minimize, 0.85, "-", theme::BUTTON_HOVER),
                Button::new(ButtonKind::Maximize, 0.90, "o", theme::BUTTON_HOVER),
                Button::new(ButtonKind::Close, 0.95, "X", theme::CLOSE_HOVER),
            ],
            dragging: false,
            drag_offset: (0, 0),
        }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn button_at(&self, x: i32, y: i32, width: i32) -> Option<usize> {
        if y >= self.height {
            return None;
        }
        self.buttons.iter().position(|b| {
            let r = b.bounds(width);
            x >= r.x && x < r.x + r.w
        })
    }

    /// Feeds one event through the chrome. Mouse coordinates are
    /// window-local; `width` is the current window width.
    pub fn handle_event(&mut self, event: &Event, width: i32) -> Option<ChromeAction> {
        match *event {
            Event::MouseButtonDown {
                x,
                y,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(idx) = self.button_at(x, y, width) {
                    return Some(self.buttons[idx].action());
                }
                if y < self.height {
                    self.dragging = true;
                    self.drag_offset = (x, y);
                }
                None
            }

            Event::MouseButtonUp {
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = false;
                None
            }

            Event::MouseMotion { x, y, .. } => {
                if self.dragging {
                    return Some(ChromeAction::DragTo {
                        offset_x: self.drag_offset.0,
                        offset_y: self.drag_offset.1,
                    });
                }

                let hit = self.button_at(x, y, width);
                for (i, button) in self.buttons.iter_mut().enumerate() {
                    let hovering = hit == Some(i);
                    if hovering != button.hovered {
                        button.fade.start(hovering);
                    }
                    button.hovered = hovering;
                }
                None
            }

            _ => None,
        }
    }

    /// Ticks the hover fades.
    pub fn update(&mut self, dt: f32) {
        for button in &mut self.buttons {
            if button.fade.is_active() {
                button.fade.update(dt);
            }
        }
    }

    pub fn render(&self, r: &mut dyn Renderer, fonts: &dyn FontCatalog, font: FontId, width: i32) {
        r.fill_rect(Rect::new(0, 0, width, self.height), theme::TITLEBAR);
        r.draw_text(
            font,
            &self.title,
            10,
            self.height / 2 - fonts.line_skip(font) as i32 / 2,
            Align::Left,
            theme::TITLE_TEXT,
        );

        for button in &self.buttons {
            let b = button.bounds(width);
            r.fill_rect(Rect::new(b.x, 0, b.w, self.height), button.fade.current());
            r.draw_text(
                font,
                button.label,
                b.x + b.w / 2,
                self.height / 2 - fonts.line_skip(font) as i32 / 2,
                Align::Center,
                theme::TITLE_TEXT,
            );
        }
    }
}
