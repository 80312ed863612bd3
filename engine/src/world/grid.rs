//! Ground Grid Module
//!
//! Square reference grid and coordinate axes for both views. The plan view
//! lays them out in the XY plane (z = 0); the elevation view in the XZ plane
//! (y = 0). Lines are thin flat strips so they go through the same triangle
//! pipeline as the walls.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::render::mesh::{rgb_hex, Mesh};

/// Lift above the ground so axes win the depth test against the grid.
const AXES_LIFT: f32 = 0.002;

/// Ground plane a grid is laid out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridPlane {
    /// z = 0, seen from +Z.
    Plan,
    /// y = 0, seen from above.
    Elevation,
}

impl GridPlane {
    /// Map in-plane coordinates (u, v) plus a lift along the normal to world space.
    pub fn point(&self, u: f32, v: f32, lift: f32) -> Vec3 {
        match self {
            GridPlane::Plan => Vec3::new(u, v, lift),
            GridPlane::Elevation => Vec3::new(u, lift, v),
        }
    }

    pub fn normal(&self) -> Vec3 {
        match self {
            GridPlane::Plan => Vec3::Z,
            GridPlane::Elevation => Vec3::Y,
        }
    }
}

/// Grid and axes settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Total side length in world units.
    pub size: f32,
    pub divisions: u32,
    pub visible: bool,
    /// Half width of grid and axis strips in world units.
    pub line_half_width: f32,
    pub center_color: [f32; 4],
    pub line_color: [f32; 4],
    pub plan_axes_length: f32,
    pub elevation_axes_length: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            divisions: 40,
            visible: true,
            line_half_width: 0.05,
            center_color: rgb_hex(0x444444, 1.0),
            line_color: rgb_hex(0x888888, 1.0),
            plan_axes_length: 50.0,
            elevation_axes_length: 5.0,
        }
    }
}

impl GridConfig {
    /// Distance between neighbouring lines.
    pub fn spacing(&self) -> f32 {
        self.size / self.divisions.max(1) as f32
    }

    pub fn axes_length(&self, plane: GridPlane) -> f32 {
        match plane {
            GridPlane::Plan => self.plan_axes_length,
            GridPlane::Elevation => self.elevation_axes_length,
        }
    }
}

/// Generate `divisions + 1` lines in each direction, centred on the origin.
/// The two lines through the origin use `center_color`.
pub fn generate_grid(config: &GridConfig, plane: GridPlane) -> Mesh {
    let mut mesh = Mesh::new();
    let half = config.size * 0.5;
    let step = config.spacing();
    let divisions = config.divisions.max(1);
    let normal = plane.normal();

    for i in 0..=divisions {
        let offset = -half + step * i as f32;
        let color = if i * 2 == divisions {
            config.center_color
        } else {
            config.line_color
        };

        mesh.add_line(
            plane.point(-half, offset, 0.0),
            plane.point(half, offset, 0.0),
            config.line_half_width,
            normal,
            color,
        );
        mesh.add_line(
            plane.point(offset, -half, 0.0),
            plane.point(offset, half, 0.0),
            config.line_half_width,
            normal,
            color,
        );
    }

    mesh
}

/// Generate coordinate axes from the origin: X red, Y green, Z blue.
///
/// In the plan view the Z axis points at the camera and is omitted.
pub fn generate_axes(config: &GridConfig, plane: GridPlane) -> Mesh {
    let mut mesh = Mesh::new();
    let length = config.axes_length(plane);
    let hw = config.line_half_width * 1.5;
    let red = rgb_hex(0xff0000, 1.0);
    let green = rgb_hex(0x00ff00, 1.0);
    let blue = rgb_hex(0x0000ff, 1.0);

    match plane {
        GridPlane::Plan => {
            let origin = Vec3::new(0.0, 0.0, AXES_LIFT);
            mesh.add_line(origin, origin + Vec3::X * length, hw, Vec3::Z, red);
            mesh.add_line(origin, origin + Vec3::Y * length, hw, Vec3::Z, green);
        }
        GridPlane::Elevation => {
            let origin = Vec3::new(0.0, AXES_LIFT, 0.0);
            mesh.add_line(origin, origin + Vec3::X * length, hw, Vec3::Y, red);
            mesh.add_line(origin, origin + Vec3::Y * length, hw, Vec3::Z, green);
            mesh.add_line(origin, origin + Vec3::Z * length, hw, Vec3::Y, blue);
        }
    }

    mesh
}
