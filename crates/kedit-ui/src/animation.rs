//! Small time-based animations.

use crate::render::Color;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A color that eases between two endpoints over a fixed duration.
///
/// `start` picks a direction without resetting elapsed time, so a hover
/// that reverses mid-flight finishes on the same clock. The transition
/// deactivates itself when it lands and holds the final color.
#[derive(Debug, Clone)]
pub struct ColorTransition {
    from: Color,
    to: Color,
    current: Color,
    duration: f32,
    elapsed: f32,
    active: bool,
    forward: bool,
}

impl ColorTransition {
    pub fn new(from: Color, to: Color, duration: f32) -> Self {
        Self {
            from,
            to,
            current: from,
            duration,
            elapsed: 0.0,
            active: false,
            forward: true,
        }
    }

    /// Begins animating toward `to` (forward) or back toward `from`.
    pub fn start(&mut self, forward: bool) {
        self.active = true;
        self.forward = forward;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        self.elapsed += dt;
        let mut t = self.elapsed / self.duration;
        if t >= 1.0 {
            t = 1.0;
            self.active = false;
            self.elapsed = 0.0;
        }

        let (from, to) = if self.forward {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };

        self.current = Color::rgba(
            lerp(from.r as f32, to.r as f32, t) as u8,
            lerp(from.g as f32, to.g as f32, t) as u8,
            lerp(from.b as f32, to.b as f32, t) as u8,
            lerp(from.a as f32, to.a as f32, t) as u8,
        );
    }

    pub fn current(&self) -> Color {
        self.current
    }
}
