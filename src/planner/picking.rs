//! Picking
//!
//! Resolve a normalized device coordinate to a ground point or a wall by
//! casting a ray from the active camera.

use glam::Vec2;

use super::scene::Scene;
use super::view_sync::ViewKind;
use super::wall::WallId;
use crate::camera::{Plane, ViewCamera};

/// Outcome of a pointer pick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PickResult {
    #[default]
    None,
    /// Point on the ground plane, in plan coordinates.
    GroundPoint(Vec2),
    Wall(WallId),
}

impl PickResult {
    pub fn ground_point(&self) -> Option<Vec2> {
        match self {
            PickResult::GroundPoint(p) => Some(*p),
            _ => None,
        }
    }

    pub fn wall(&self) -> Option<WallId> {
        match self {
            PickResult::Wall(id) => Some(*id),
            _ => None,
        }
    }
}

/// Ground plane of `view` in that view's world frame.
pub fn ground_plane(view: ViewKind) -> Plane {
    view.ground_plane()
}

/// Intersect the camera ray through `ndc` with the view's ground plane.
///
/// Returns [`PickResult::None`] when the ray is parallel to the ground or
/// the hit lies behind the camera.
pub fn pick_ground(camera: &dyn ViewCamera, view: ViewKind, ndc: Vec2) -> PickResult {
    let ray = camera.ray_from_ndc(ndc);
    match ray.intersect_plane(&ground_plane(view)) {
        Some(hit) => PickResult::GroundPoint(view.ground_to_plan(hit)),
        None => PickResult::None,
    }
}

/// Nearest wall representation in `scene` under `ndc`.
pub fn pick_wall(camera: &dyn ViewCamera, scene: &Scene, ndc: Vec2) -> PickResult {
    let ray = camera.ray_from_ndc(ndc);
    match scene.pick(&ray).and_then(|hit| hit.wall) {
        Some(id) => PickResult::Wall(id),
        None => PickResult::None,
    }
}
