//! Mouse Input Module
//!
//! Mouse buttons, pointer positions, scroll deltas and the viewport that
//! turns pixel positions into normalized device coordinates.
//! Decoupled from winit to use generic types.

use glam::Vec2;

use crate::camera::pixel_to_ndc;

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; runs the active tool.
    Left,
    /// Camera navigation.
    Middle,
    /// Secondary button; always selects.
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// State of the three main mouse buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {}
        }
    }

    pub fn any_pressed(&self) -> bool {
        self.left || self.middle || self.right
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Pointer position in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Position {
    fn from(tuple: (f32, f32)) -> Self {
        Self {
            x: tuple.0,
            y: tuple.1,
        }
    }
}

/// Scroll wheel delta, can be line-based or pixel-based.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollDelta {
    /// Horizontal scroll (positive = right)
    pub x: f32,
    /// Vertical scroll (positive = up/forward)
    pub y: f32,
}

impl ScrollDelta {
    /// Create from line delta (common for mouse wheels).
    pub fn from_lines(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create from pixel delta (common for trackpads).
    /// Normalizes by dividing by 100 to get approximate line equivalents.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self {
            x: (x / 100.0) as f32,
            y: (y / 100.0) as f32,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Drawable area size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Sizes are clamped to at least one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn center(&self) -> Position {
        Position::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    /// Pixel position to NDC, +Y up.
    pub fn to_ndc(&self, position: Position) -> Vec2 {
        pixel_to_ndc(
            position.x,
            position.y,
            self.width as f32,
            self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state() {
        let mut buttons = ButtonState::new();
        assert!(!buttons.any_pressed());

        buttons.set(MouseButton::Middle, true);
        assert!(buttons.is_pressed(MouseButton::Middle));
        assert!(!buttons.is_pressed(MouseButton::Left));

        buttons.set(MouseButton::Other(4), true);
        assert!(!buttons.is_pressed(MouseButton::Other(4)));

        buttons.reset();
        assert!(!buttons.any_pressed());
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::from((3.0, 4.0));
        assert!((a.distance(&b) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_scroll_from_pixels() {
        let delta = ScrollDelta::from_pixels(0.0, 250.0);
        assert!((delta.y - 2.5).abs() < 0.001);
        assert!(!delta.is_zero());
        assert!(ScrollDelta::default().is_zero());
    }

    #[test]
    fn test_viewport_ndc() {
        let viewport = Viewport::new(800, 400);
        let ndc = viewport.to_ndc(viewport.center());
        assert!(ndc.length() < 0.001);

        let corner = viewport.to_ndc(Position::new(800.0, 0.0));
        assert!((corner.x - 1.0).abs() < 0.001);
        assert!((corner.y - 1.0).abs() < 0.001);
        assert!((viewport.aspect() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_viewport_clamps_zero() {
        let viewport = Viewport::new(0, 0);
        assert_eq!(viewport.width, 1);
        assert_eq!(viewport.height, 1);
    }
}
