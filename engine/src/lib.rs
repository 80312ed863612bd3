//! Wall Viewer Engine Library
//!
//! Draw line-segment walls in an orthographic plan view and inspect them as
//! extruded boxes in a perspective elevation view.
//!
//! # Modules
//!
//! - [`camera`] - Plan (orthographic) and elevation (orbit) cameras, raycasting
//! - [`input`] - Window-system agnostic mouse state and viewport conversion
//! - [`render`] - Vertex/mesh types, uniforms, and the wgpu view renderer
//! - [`world`] - Ground grid and axes helpers
//! - [`planner`] - Wall registry, picking, tools, and view synchronization
//!
//! # Example
//!
//! ```ignore
//! use wall_viewer_engine::planner::{Tool, Viewer, ViewerConfig};
//! use wall_viewer_engine::input::MouseButton;
//!
//! let mut viewer = Viewer::new(ViewerConfig::default(), 1280, 800);
//! viewer.on_walls_update(|walls| println!("{} walls", walls.len()));
//!
//! viewer.set_tool(Tool::Draw);
//! viewer.pointer_pressed(MouseButton::Left, 640.0, 400.0);
//! viewer.pointer_pressed(MouseButton::Left, 800.0, 400.0);
//!
//! let frame = viewer.frame();
//! renderer.render(&frame);
//! ```

pub mod camera;
pub mod error;
pub mod input;
pub mod render;
pub mod world;

// Wall planning modules (located in src/planner/ directory)
#[path = "../../src/planner/mod.rs"]
pub mod planner;

pub use error::ViewerError;
// Re-export commonly used input types
pub use input::{ButtonState, MouseButton, Position, Viewport};
// Re-export camera types
pub use camera::{OrbitCamera, PlanCamera, ViewCamera};
// Re-export the planner entry points
pub use planner::{PickResult, Tool, ViewKind, Viewer, ViewerConfig, Wall, WallId};
