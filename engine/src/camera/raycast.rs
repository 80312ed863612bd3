//! Raycast Module
//!
//! Rays, planes and oriented boxes for picking. A pointer position is
//! converted to normalized device coordinates, unprojected through the active
//! camera's view-projection matrix, and intersected with the ground plane or
//! with wall geometry.

use glam::{Mat4, Quat, Vec2, Vec3};

/// Below this, a ray direction is treated as parallel to a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Convert a pixel position to normalized device coordinates.
///
/// # Arguments
/// * `x`, `y` - Pixel position, origin at the top-left of the viewport
/// * `width`, `height` - Viewport size in pixels
///
/// # Returns
/// NDC in [-1, 1] with +Y up. A zero-sized viewport maps to the centre.
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, -(y / height * 2.0 - 1.0))
}

/// A half-line with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. The direction is normalized (zero stays zero).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Build a ray through an NDC point by unprojecting the near (z=0) and
    /// a mid depth (z=0.5) through the inverse view-projection matrix.
    ///
    /// Works for both perspective and orthographic cameras: for the latter
    /// the origins differ per pixel while directions stay parallel. The far
    /// plane (z=1) is avoided, it loses most of its precision in f32.
    pub fn from_ndc(inverse_view_projection: Mat4, ndc: Vec2) -> Self {
        let near = inverse_view_projection.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse_view_projection.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Self::new(near, far - near)
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to a plane.
    ///
    /// # Returns
    /// * `Some(t)` - `t >= 0`, the hit lies in front of the origin
    /// * `None` - The ray is parallel to the plane or the hit is behind it
    pub fn plane_distance(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -(plane.normal.dot(self.origin) + plane.constant) / denom;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }

    /// Intersection point with a plane, if any.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        self.plane_distance(plane).map(|t| self.at(t))
    }

    /// Distance along the ray to the first hit on an oriented box.
    ///
    /// The ray is moved into the box's local frame, where the box is an
    /// axis-aligned cube of `half_extents`, and tested with the slab method.
    /// A ray starting inside the box reports the exit distance.
    pub fn intersect_oriented_box(&self, obb: &OrientedBox) -> Option<f32> {
        let inv_rotation = obb.rotation.inverse();
        let local_origin = inv_rotation * (self.origin - obb.center);
        let local_direction = inv_rotation * self.direction;
        ray_aabb_hit_t(
            local_origin,
            local_direction,
            -obb.half_extents,
            obb.half_extents,
        )
    }
}

/// Plane `normal . p + constant = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// The plan-view ground: z = 0, facing the plan camera.
    pub const PLAN_GROUND: Plane = Plane {
        normal: Vec3::Z,
        constant: 0.0,
    };

    /// The elevation-view ground: y = 0, facing up.
    pub const ELEVATION_GROUND: Plane = Plane {
        normal: Vec3::Y,
        constant: 0.0,
    };

    /// Create a plane; the normal is normalized.
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            constant,
        }
    }

    /// Signed distance from the plane to a point.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// A box with centre, orientation and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
    pub center: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Build from a full `size` (not half extents).
    pub fn new(center: Vec3, rotation: Quat, size: Vec3) -> Self {
        Self {
            center,
            rotation,
            half_extents: size * 0.5,
        }
    }
}

/// Slab-method ray vs axis-aligned box.
///
/// Returns the entry distance, or the exit distance when the origin is
/// inside the box; `None` on a miss or when the box is behind the ray.
pub fn ray_aabb_hit_t(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        safe_recip(direction.x),
        safe_recip(direction.y),
        safe_recip(direction.z),
    );

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let mut t0 = (min[axis] - origin[axis]) * inv[axis];
        let mut t1 = (max[axis] - origin[axis]) * inv[axis];
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t_min > t1 || t0 > t_max {
            return None;
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
    }

    if t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

fn safe_recip(v: f32) -> f32 {
    if v != 0.0 { 1.0 / v } else { f32::INFINITY }
}
