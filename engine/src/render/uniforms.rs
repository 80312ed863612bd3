//! Uniform Structs for GPU Shaders
//!
//! Must match the WGSL layout in `shaders/wall_view.wgsl` exactly.

use glam::{Mat4, Vec3};

/// Per-frame uniforms for the view shader.
///
/// WGSL layout (80 bytes total):
///   offset  0: view_proj (mat4x4<f32>) = 64 bytes
///   offset 64: light_dir (vec4<f32>)   = 16 bytes, w = 1.0 enables shading
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
}

static_assertions::assert_eq_size!(ViewUniforms, [u8; 80]);

/// Directional light used by the elevation view.
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(10.0, 20.0, 10.0);

impl ViewUniforms {
    /// Flat colours, no lighting. Used by the plan view.
    pub fn flat(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: [0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Ambient plus one directional light. Used by the elevation view.
    pub fn lit(view_proj: Mat4, light: Vec3) -> Self {
        let dir = light.normalize_or_zero();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: [dir.x, dir.y, dir.z, 1.0],
        }
    }

    pub fn is_lit(&self) -> bool {
        self.light_dir[3] > 0.5
    }
}

impl Default for ViewUniforms {
    fn default() -> Self {
        Self::flat(Mat4::IDENTITY)
    }
}
