//! Plan Geometry
//!
//! Planar helpers for walls: distance, angle, midpoint, bounds and the
//! mapping between plan coordinates (x, y on z = 0) and the Y-up
//! elevation frame (x, 0, y).

use glam::{Vec2, Vec3};

/// Walls shorter than this are rejected as degenerate.
pub const MIN_WALL_LENGTH: f32 = 1e-4;

/// Euclidean distance between two plan points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Direction angle from `a` to `b` in radians, `atan2(dy, dx)`.
pub fn angle(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    d.y.atan2(d.x)
}

pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Plan point to the elevation frame, on the ground.
pub fn plan_to_elevation(p: Vec2) -> Vec3 {
    Vec3::new(p.x, 0.0, p.y)
}

/// Elevation ground point back to plan coordinates. Height is dropped.
pub fn elevation_to_plan(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Axis-aligned plan rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds2 {
    /// Smallest rectangle containing every point; `None` when empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds2 {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min = bounds.min.min(p);
            bounds.max = bounds.max.max(p);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Vec2 {
        midpoint(self.min, self.max)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
