//! Input Module
//!
//! Platform-agnostic pointer input. Decoupled from any specific windowing
//! system (like winit); the front-end converts window events into these
//! types before handing them to the viewer.

pub mod mouse;

pub use mouse::{ButtonState, MouseButton, Position, ScrollDelta, Viewport};
