//! Normalized input events.
//!
//! The engine consumes a backend-neutral event stream; a display backend
//! translates its native events into these before the frame loop drains
//! them. Variants carry their data directly, so a `match` in the frame
//! loop handles every case.

/// A single polled input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The window was asked to close.
    Quit,
    KeyDown {
        key: Key,
        mods: Mods,
    },
    KeyUp {
        key: Key,
        mods: Mods,
    },
    MouseButtonDown {
        x: i32,
        y: i32,
        button: MouseButton,
        /// 1 for a single click, 2 for a double click.
        clicks: u8,
    },
    MouseButtonUp {
        x: i32,
        y: i32,
        button: MouseButton,
    },
    MouseMotion {
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
    },
    /// Wheel motion; `y` is positive when scrolling up. Modifiers are
    /// sampled at poll time so shift+wheel can scroll horizontally.
    MouseWheel {
        x: i32,
        y: i32,
        mods: Mods,
    },
    /// A short UTF-8 fragment of typed text.
    TextInput(String),
}

/// Keys the editor reacts to. Printable input arrives as
/// [`Event::TextInput`], not as key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Return,
    Backspace,
    Delete,
    Tab,
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    Unknown,
}

/// Modifier bitmask: shift, ctrl and alt, combinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mods(u8);

impl Mods {
    pub const NONE: Mods = Mods(0);
    pub const SHIFT: Mods = Mods(1);
    pub const CTRL: Mods = Mods(1 << 1);
    pub const ALT: Mods = Mods(1 << 2);

    pub fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn shift(self) -> bool {
        self.contains(Mods::SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.contains(Mods::CTRL)
    }

    pub fn alt(self) -> bool {
        self.contains(Mods::ALT)
    }
}

impl std::ops::BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}

/// Mouse buttons, numbered the way the original event layer numbered
/// them (left = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}
