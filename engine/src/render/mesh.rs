//! Mesh Types
//!
//! CPU-side vertex/index data for the viewer. Every wall representation,
//! the preview line and the grid are boxes or flat quads built here and
//! merged into one mesh per frame.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

// ============================================================================
// GPU VERTEX TYPES
// ============================================================================

/// Vertex with position, normal and RGBA colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(Vertex, [u8; 40]);

impl Vertex {
    /// Buffer layout matching `VertexInput` in `wall_view.wgsl`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1, // normal
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 24,
                    shader_location: 2, // color
                },
            ],
        }
    }
}

/// Convert `0xRRGGBB` to a linear-ish RGBA array.
pub fn rgb_hex(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

// ============================================================================
// MESH STRUCTURE
// ============================================================================

/// A mesh with vertices and indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn merge(&mut self, other: &Mesh) {
        let base_idx = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base_idx));
    }

    /// Append a flat quad. Corners are given in winding order.
    pub fn add_quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for corner in corners {
            self.vertices.push(Vertex {
                position: corner.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Append a thin strip from `a` to `b` lying in the plane with `normal`.
    /// Zero-length segments add nothing.
    pub fn add_line(&mut self, a: Vec3, b: Vec3, half_width: f32, normal: Vec3, color: [f32; 4]) {
        let dir = b - a;
        let side = normal.cross(dir).normalize_or_zero() * half_width;
        if side == Vec3::ZERO {
            return;
        }
        self.add_quad([a - side, b - side, b + side, a + side], normal, color);
    }
}

// ============================================================================
// MESH GENERATION
// ============================================================================

/// Generate a box of full `size` centred at `center`, rotated by `rotation`.
///
/// Local X is the box's length axis; for walls that is the segment direction.
pub fn generate_oriented_box(center: Vec3, rotation: Quat, size: Vec3, color: [f32; 4]) -> Mesh {
    let right = rotation * Vec3::X;
    let up = rotation * Vec3::Y;
    let forward = rotation * Vec3::Z;

    let (hx, hy, hz) = (size.x / 2.0, size.y / 2.0, size.z / 2.0);
    let transform = |local: Vec3| -> Vec3 { center + right * local.x + up * local.y + forward * local.z };

    let corners = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];

    let faces = [
        ([1, 0, 3, 2], -forward),
        ([4, 5, 6, 7], forward),
        ([0, 4, 7, 3], -right),
        ([5, 1, 2, 6], right),
        ([3, 7, 6, 2], up),
        ([0, 1, 5, 4], -up),
    ];

    let mut mesh = Mesh::new();
    for (face_indices, normal) in faces {
        mesh.add_quad(face_indices.map(|i| transform(corners[i])), normal, color);
    }
    mesh
}
