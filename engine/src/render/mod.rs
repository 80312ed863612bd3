//! Render Module
//!
//! Rendering infrastructure for the wall viewer: vertex and mesh types,
//! uniforms, the WGSL view shader and a wgpu pipeline that draws the
//! active view's frame geometry.

pub mod frame;
pub mod mesh;
pub mod pipeline;
pub mod uniforms;

// Re-export commonly used types for convenience
pub use frame::FrameGeometry;
pub use mesh::{generate_oriented_box, rgb_hex, Mesh, Vertex};
pub use pipeline::{request_gpu, ViewRenderer, WALL_VIEW_SHADER};
pub use uniforms::{ViewUniforms, LIGHT_DIRECTION};
