//! Camera Module
//!
//! Plan and elevation cameras plus raycasting for picking.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod orbit_camera;
pub mod plan_camera;
pub mod raycast;

use glam::{Mat4, Vec2, Vec3};

pub use orbit_camera::{CameraDrag, ElevationViewConfig, OrbitCamera};
pub use plan_camera::{PlanCamera, PlanViewConfig};
pub use raycast::{pixel_to_ndc, ray_aabb_hit_t, OrientedBox, Plane, Ray};

/// Common interface of the plan and elevation cameras.
///
/// Picking only needs `ray_from_ndc`, which falls back to unprojecting
/// through the view-projection matrix; everything else is per-camera
/// interaction state.
pub trait ViewCamera {
    fn view_matrix(&self) -> Mat4;

    fn projection_matrix(&self) -> Mat4;

    /// World-space eye position.
    fn eye(&self) -> Vec3;

    /// Update the aspect ratio after a viewport resize. Zero sizes are ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Return to the default pose.
    fn reset(&mut self);

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the camera through an NDC point.
    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        Ray::from_ndc(self.view_projection().inverse(), ndc)
    }
}
