//! View Synchronization
//!
//! Mirrors the wall registry into the two scenes. Every wall has a plan
//! representation (centre line plus footprint) from the moment it is added.
//! Its elevation representation (extruded body) exists only while the
//! elevation view has been built: immediately if elevation is active, else
//! on the next switch to elevation, which rebuilds all bodies from scratch.
//!
//! The synchronizer also holds the draw preview line and grid visibility.

use std::collections::HashMap;

use glam::{Quat, Vec2, Vec3};

use super::config::{ViewerConfig, WallDimensions, WallPalette};
use super::geometry;
use super::scene::{ObjectHandle, ObjectKind, Scene, SceneObject};
use super::wall::{Wall, WallId};
use crate::camera::{Plane, Ray};
use crate::world::GridPlane;

/// Height of the preview line above the ground.
const PREVIEW_LIFT: f32 = 0.02;
/// Thickness of line-like boxes along the view normal.
const LINE_DEPTH: f32 = 0.002;

/// Which view is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Top-down orthographic 2D view.
    Plan,
    /// Perspective 3D view with extruded walls.
    Elevation,
}

impl ViewKind {
    pub fn from_is_2d(is_2d: bool) -> Self {
        if is_2d { ViewKind::Plan } else { ViewKind::Elevation }
    }

    pub fn is_plan(&self) -> bool {
        *self == ViewKind::Plan
    }

    pub fn toggled(&self) -> Self {
        match self {
            ViewKind::Plan => ViewKind::Elevation,
            ViewKind::Elevation => ViewKind::Plan,
        }
    }

    /// Ground plane picks are made against.
    pub fn ground_plane(&self) -> Plane {
        match self {
            ViewKind::Plan => Plane::PLAN_GROUND,
            ViewKind::Elevation => Plane::ELEVATION_GROUND,
        }
    }

    /// Map a ground hit in this view's frame back to plan coordinates.
    pub fn ground_to_plan(&self, hit: Vec3) -> Vec2 {
        match self {
            ViewKind::Plan => hit.truncate(),
            ViewKind::Elevation => geometry::elevation_to_plan(hit),
        }
    }

    pub fn grid_plane(&self) -> GridPlane {
        match self {
            ViewKind::Plan => GridPlane::Plan,
            ViewKind::Elevation => GridPlane::Elevation,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Plan => "2D",
            ViewKind::Elevation => "3D",
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PlanRepresentation {
    line: ObjectHandle,
    footprint: ObjectHandle,
}

#[derive(Clone, Copy, Debug)]
struct Preview {
    view: ViewKind,
    handle: ObjectHandle,
    from: Vec2,
    to: Vec2,
}

/// Keeps the plan and elevation scenes consistent with the wall sequence.
#[derive(Debug)]
pub struct ViewSynchronizer {
    plan: Scene,
    elevation: Scene,
    plan_reps: HashMap<WallId, PlanRepresentation>,
    elevation_reps: HashMap<WallId, ObjectHandle>,
    preview: Option<Preview>,
    active: ViewKind,
    grid_visible: bool,
    dimensions: WallDimensions,
    plan_palette: WallPalette,
    elevation_palette: WallPalette,
    footprint_opacity: f32,
    preview_color: [f32; 4],
}

impl ViewSynchronizer {
    /// Empty scenes, plan view active.
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            plan: Scene::new(),
            elevation: Scene::new(),
            plan_reps: HashMap::new(),
            elevation_reps: HashMap::new(),
            preview: None,
            active: ViewKind::Plan,
            grid_visible: config.grid.visible,
            dimensions: config.walls.clone(),
            plan_palette: config.plan_palette.clone(),
            elevation_palette: config.elevation_palette.clone(),
            footprint_opacity: config.footprint_opacity,
            preview_color: config.preview_color,
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn active_view(&self) -> ViewKind {
        self.active
    }

    pub fn scene(&self, view: ViewKind) -> &Scene {
        match view {
            ViewKind::Plan => &self.plan,
            ViewKind::Elevation => &self.elevation,
        }
    }

    pub fn active_scene(&self) -> &Scene {
        self.scene(self.active)
    }

    pub fn has_plan(&self, id: WallId) -> bool {
        self.plan_reps.contains_key(&id)
    }

    pub fn has_elevation(&self, id: WallId) -> bool {
        self.elevation_reps.contains_key(&id)
    }

    pub fn plan_count(&self) -> usize {
        self.plan_reps.len()
    }

    pub fn elevation_count(&self) -> usize {
        self.elevation_reps.len()
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Endpoints of the draw preview, if one is shown.
    pub fn preview(&self) -> Option<(Vec2, Vec2)> {
        self.preview.map(|p| (p.from, p.to))
    }

    /// Wall under the ray in the active view, nearest first.
    pub fn pick_wall(&self, ray: &Ray) -> Option<WallId> {
        self.active_scene().pick(ray).and_then(|hit| hit.wall)
    }

    // ========================================================================
    // WALL LIFECYCLE
    // ========================================================================

    /// Create the representations of a new wall.
    pub fn wall_added(&mut self, wall: &Wall) {
        self.create_plan(wall);
        if self.active == ViewKind::Elevation {
            self.create_elevation(wall);
        }
    }

    /// Remove every representation of `id` from both scenes.
    pub fn wall_removed(&mut self, id: WallId) {
        if let Some(rep) = self.plan_reps.remove(&id) {
            self.plan.remove(rep.line);
            self.plan.remove(rep.footprint);
        }
        if let Some(handle) = self.elevation_reps.remove(&id) {
            self.elevation.remove(handle);
        }
    }

    /// Recolour whatever representations `wall` has from its flags.
    pub fn refresh_appearance(&mut self, wall: &Wall) {
        let appearance = wall.appearance();

        if let Some(rep) = self.plan_reps.get(&wall.id()) {
            let color = self.plan_palette.color(appearance);
            if let Some(line) = self.plan.get_mut(rep.line) {
                line.color = color;
            }
            if let Some(footprint) = self.plan.get_mut(rep.footprint) {
                footprint.color = with_alpha(color, self.footprint_opacity);
            }
        }

        if let Some(&handle) = self.elevation_reps.get(&wall.id()) {
            let color = self.elevation_palette.color(appearance);
            if let Some(body) = self.elevation.get_mut(handle) {
                body.color = color;
            }
        }
    }

    /// Drop all elevation bodies and rebuild one per wall, in order.
    pub fn rebuild_elevation(&mut self, walls: &[Wall]) {
        for (_, handle) in self.elevation_reps.drain() {
            self.elevation.remove(handle);
        }
        for wall in walls {
            self.create_elevation(wall);
        }
        log::debug!("Rebuilt {} elevation bodies", self.elevation_reps.len());
    }

    /// Switch the active view. Entering elevation rebuilds its bodies;
    /// a shown preview moves to the new view's scene.
    pub fn set_active_view(&mut self, view: ViewKind, walls: &[Wall]) {
        self.active = view;
        if view == ViewKind::Elevation {
            self.rebuild_elevation(walls);
        }

        if let Some(preview) = self.preview {
            if preview.view != view {
                self.show_preview(preview.from, preview.to);
            }
        }
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    // ========================================================================
    // DRAW PREVIEW
    // ========================================================================

    /// Show (or replace) the preview line in the active scene.
    pub fn show_preview(&mut self, from: Vec2, to: Vec2) {
        self.clear_preview();
        let object = self.preview_object(self.active, from, to);
        let handle = self.scene_mut(self.active).add(object);
        self.preview = Some(Preview {
            view: self.active,
            handle,
            from,
            to,
        });
    }

    /// Move the preview's far endpoint. No-op without a preview.
    pub fn update_preview(&mut self, to: Vec2) {
        let Some(preview) = self.preview else {
            return;
        };
        let object = self.preview_object(preview.view, preview.from, to);
        if let Some(existing) = self.scene_mut(preview.view).get_mut(preview.handle) {
            *existing = object;
        }
        self.preview = Some(Preview { to, ..preview });
    }

    pub fn clear_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.scene_mut(preview.view).remove(preview.handle);
        }
    }

    // ========================================================================
    // REPRESENTATION BUILDERS
    // ========================================================================

    fn scene_mut(&mut self, view: ViewKind) -> &mut Scene {
        match view {
            ViewKind::Plan => &mut self.plan,
            ViewKind::Elevation => &mut self.elevation,
        }
    }

    fn create_plan(&mut self, wall: &Wall) {
        if self.plan_reps.contains_key(&wall.id()) {
            return;
        }
        let color = self.plan_palette.color(wall.appearance());
        let dims = &self.dimensions;
        let mid = wall.midpoint();
        let rotation = Quat::from_rotation_z(wall.angle());

        let footprint = SceneObject {
            kind: ObjectKind::WallFootprint,
            wall: Some(wall.id()),
            center: mid.extend(dims.footprint_depth * 0.5),
            rotation,
            size: Vec3::new(wall.length(), dims.thickness, dims.footprint_depth),
            color: with_alpha(color, self.footprint_opacity),
        };
        let line = SceneObject {
            kind: ObjectKind::WallLine,
            wall: Some(wall.id()),
            center: mid.extend(dims.footprint_depth + LINE_DEPTH),
            rotation,
            size: Vec3::new(wall.length(), dims.line_width, LINE_DEPTH),
            color,
        };

        let footprint = self.plan.add(footprint);
        let line = self.plan.add(line);
        self.plan_reps
            .insert(wall.id(), PlanRepresentation { line, footprint });
    }

    fn create_elevation(&mut self, wall: &Wall) {
        if self.elevation_reps.contains_key(&wall.id()) {
            return;
        }
        let dims = &self.dimensions;
        let mid = geometry::plan_to_elevation(wall.midpoint());

        let body = SceneObject {
            kind: ObjectKind::WallBody,
            wall: Some(wall.id()),
            center: mid + Vec3::Y * (dims.height * 0.5),
            // plan angle is counter-clockwise about +Z; in the Y-up frame
            // the same turn is clockwise about +Y
            rotation: Quat::from_rotation_y(-wall.angle()),
            size: Vec3::new(wall.length(), dims.height, dims.thickness),
            color: self.elevation_palette.color(wall.appearance()),
        };

        let handle = self.elevation.add(body);
        self.elevation_reps.insert(wall.id(), handle);
    }

    fn preview_object(&self, view: ViewKind, from: Vec2, to: Vec2) -> SceneObject {
        let length = geometry::distance(from, to);
        let angle = geometry::angle(from, to);
        let mid = geometry::midpoint(from, to);
        let width = self.dimensions.line_width;

        let (center, rotation, size) = match view {
            ViewKind::Plan => (
                mid.extend(self.dimensions.footprint_depth + PREVIEW_LIFT),
                Quat::from_rotation_z(angle),
                Vec3::new(length, width, LINE_DEPTH),
            ),
            ViewKind::Elevation => (
                geometry::plan_to_elevation(mid) + Vec3::Y * PREVIEW_LIFT,
                Quat::from_rotation_y(-angle),
                Vec3::new(length, LINE_DEPTH, width),
            ),
        };

        SceneObject {
            kind: ObjectKind::Preview,
            wall: None,
            center,
            rotation,
            size,
            color: self.preview_color,
        }
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn wall(id: u64, start: (f32, f32), end: (f32, f32)) -> Wall {
        Wall::new(WallId(id), Vec2::new(start.0, start.1), Vec2::new(end.0, end.1))
    }

    fn sync() -> ViewSynchronizer {
        ViewSynchronizer::new(&ViewerConfig::default())
    }

    #[test]
    fn test_plan_created_immediately_elevation_lazily() {
        let mut sync = sync();
        let w = wall(0, (0.0, 0.0), (10.0, 0.0));
        sync.wall_added(&w);

        assert!(sync.has_plan(w.id()));
        assert!(!sync.has_elevation(w.id()));
        assert_eq!(sync.scene(ViewKind::Plan).len(), 2);
        assert!(sync.scene(ViewKind::Elevation).is_empty());
    }

    #[test]
    fn test_added_in_elevation_creates_both() {
        let mut sync = sync();
        sync.set_active_view(ViewKind::Elevation, &[]);
        let w = wall(0, (0.0, 0.0), (10.0, 0.0));
        sync.wall_added(&w);
        assert!(sync.has_plan(w.id()));
        assert!(sync.has_elevation(w.id()));
    }

    #[test]
    fn test_rebuild_never_duplicates() {
        let mut sync = sync();
        let walls = vec![wall(0, (0.0, 0.0), (10.0, 0.0)), wall(1, (0.0, 0.0), (0.0, 5.0))];
        for w in &walls {
            sync.wall_added(w);
        }

        for _ in 0..3 {
            sync.set_active_view(ViewKind::Elevation, &walls);
            sync.set_active_view(ViewKind::Plan, &walls);
        }
        sync.set_active_view(ViewKind::Elevation, &walls);

        assert_eq!(sync.elevation_count(), 2);
        assert_eq!(sync.scene(ViewKind::Elevation).len(), 2);
    }

    #[test]
    fn test_removed_from_both_scenes() {
        let mut sync = sync();
        let w = wall(0, (0.0, 0.0), (10.0, 0.0));
        sync.wall_added(&w);
        sync.set_active_view(ViewKind::Elevation, std::slice::from_ref(&w));

        sync.wall_removed(w.id());
        assert!(sync.scene(ViewKind::Plan).is_empty());
        assert!(sync.scene(ViewKind::Elevation).is_empty());
        assert!(!sync.has_plan(w.id()));
    }

    #[test]
    fn test_elevation_body_pose() {
        let mut sync = sync();
        sync.set_active_view(ViewKind::Elevation, &[]);
        let w = wall(0, (0.0, 0.0), (0.0, 10.0));
        sync.wall_added(&w);

        let (_, body) = sync.scene(ViewKind::Elevation).iter().next().unwrap();
        assert!((body.center - Vec3::new(0.0, 1.5, 5.0)).length() < 1e-5);
        // length axis follows the plan direction mapped to (x, 0, y)
        let axis = body.rotation * Vec3::X;
        assert!((axis - Vec3::Z).length() < 1e-5);
        assert!((w.angle() - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_refresh_appearance_colors() {
        let config = ViewerConfig::default();
        let mut sync = ViewSynchronizer::new(&config);
        let mut w = wall(0, (0.0, 0.0), (10.0, 0.0));
        sync.set_active_view(ViewKind::Elevation, &[]);
        sync.wall_added(&w);

        w.set_selected(true);
        sync.refresh_appearance(&w);

        for (_, object) in sync.scene(ViewKind::Plan).iter() {
            assert_eq!(object.color[..3], config.plan_palette.selected[..3]);
        }
        let (_, body) = sync.scene(ViewKind::Elevation).iter().next().unwrap();
        assert_eq!(body.color, config.elevation_palette.selected);
    }

    #[test]
    fn test_preview_lifecycle() {
        let mut sync = sync();
        sync.show_preview(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(sync.scene(ViewKind::Plan).count_kind(ObjectKind::Preview), 1);

        sync.update_preview(Vec2::new(4.0, 0.0));
        assert_eq!(sync.preview(), Some((Vec2::ZERO, Vec2::new(4.0, 0.0))));

        sync.set_active_view(ViewKind::Elevation, &[]);
        assert_eq!(sync.scene(ViewKind::Plan).count_kind(ObjectKind::Preview), 0);
        assert_eq!(sync.scene(ViewKind::Elevation).count_kind(ObjectKind::Preview), 1);

        sync.clear_preview();
        assert!(sync.preview().is_none());
        assert!(sync.scene(ViewKind::Elevation).is_empty());
    }

    #[test]
    fn test_pick_wall_plan_footprint() {
        let mut sync = sync();
        let w = wall(4, (-5.0, 0.0), (5.0, 0.0));
        sync.wall_added(&w);

        let hit = Ray::new(Vec3::new(1.0, 0.05, 5.0), Vec3::NEG_Z);
        assert_eq!(sync.pick_wall(&hit), Some(WallId(4)));

        let miss = Ray::new(Vec3::new(1.0, 2.0, 5.0), Vec3::NEG_Z);
        assert_eq!(sync.pick_wall(&miss), None);
    }
}
