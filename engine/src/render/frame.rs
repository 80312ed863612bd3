//! Frame Geometry
//!
//! Everything the renderer needs to draw one frame of the active view.
//! Produced by the viewer, consumed by [`super::ViewRenderer`].

use super::mesh::Mesh;
use super::uniforms::ViewUniforms;

/// CPU-side frame: merged mesh, uniforms and background colour.
#[derive(Debug, Clone)]
pub struct FrameGeometry {
    pub mesh: Mesh,
    pub uniforms: ViewUniforms,
    pub clear_color: [f32; 4],
}

impl FrameGeometry {
    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    pub fn clear_color_wgpu(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}
