//! Plan Camera
//!
//! Orthographic top-down camera for the 2D plan view. Looks down -Z at the
//! z = 0 ground plane with +Y up on screen.
//!
//! Controls:
//! - Middle mouse drag: Pan
//! - Scroll wheel: Zoom (multiplicative, clamped)

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::ViewCamera;
use super::raycast::Ray;

/// Zoom factor per scroll tick.
const ZOOM_FACTOR: f32 = 1.1;

/// Plan camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanViewConfig {
    /// Visible world height at zoom 1.0.
    pub frustum_size: f32,
    /// Camera z position above the ground.
    pub height: f32,
    pub near: f32,
    pub far: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for PlanViewConfig {
    fn default() -> Self {
        Self {
            frustum_size: 100.0,
            height: 5.0,
            near: 1.0,
            far: 100.0,
            min_zoom: 0.05,
            max_zoom: 40.0,
        }
    }
}

/// Orthographic plan-view camera.
///
/// The visible area is `frustum_size / zoom` world units tall and
/// `aspect` times that wide, centred on `center`.
#[derive(Debug, Clone)]
pub struct PlanCamera {
    /// Plan point at the centre of the viewport.
    pub center: Vec2,
    /// 1.0 shows `frustum_size` world units vertically.
    pub zoom: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    config: PlanViewConfig,

    // -- Mouse interaction state --
    is_panning: bool,
    last_mouse: [f32; 2],
    viewport_height: f32,
}

impl PlanCamera {
    pub fn new(config: PlanViewConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            center: Vec2::ZERO,
            zoom: 1.0,
            aspect: 1.0,
            config,
            is_panning: false,
            last_mouse: [0.0, 0.0],
            viewport_height: 1.0,
        };
        camera.resize(width, height);
        camera
    }

    pub fn config(&self) -> &PlanViewConfig {
        &self.config
    }

    /// Half of the visible height in world units.
    pub fn half_height(&self) -> f32 {
        self.config.frustum_size * 0.5 / self.zoom
    }

    /// Half of the visible width in world units.
    pub fn half_width(&self) -> f32 {
        self.half_height() * self.aspect
    }

    /// World units covered by one pixel.
    pub fn world_per_pixel(&self) -> f32 {
        self.half_height() * 2.0 / self.viewport_height
    }

    // ========================================================================
    // INPUT HANDLING
    // ========================================================================

    /// Start or stop a pan drag.
    pub fn handle_pan_drag(&mut self, pressed: bool) {
        self.is_panning = pressed;
    }

    /// Handle mouse movement. Call this on every cursor move so deltas stay
    /// correct when a drag starts.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        let dx = x - self.last_mouse[0];
        let dy = y - self.last_mouse[1];

        if self.is_panning {
            let scale = self.world_per_pixel();
            self.center.x -= dx * scale;
            self.center.y += dy * scale;
        }

        self.last_mouse = [x, y];
    }

    /// Positive `delta` zooms in, negative zooms out.
    pub fn handle_scroll(&mut self, delta: f32) {
        if delta > 0.0 {
            self.zoom *= ZOOM_FACTOR;
        } else if delta < 0.0 {
            self.zoom /= ZOOM_FACTOR;
        }
        self.zoom = self.zoom.clamp(self.config.min_zoom, self.config.max_zoom);
    }

    pub fn is_active(&self) -> bool {
        self.is_panning
    }

    // ========================================================================
    // VIEW COMMANDS
    // ========================================================================

    /// Move back over the origin, keeping the zoom.
    pub fn recenter(&mut self) {
        self.center = Vec2::ZERO;
    }

    /// Fit a plan-space rectangle into the viewport with `padding` world
    /// units on every side.
    pub fn zoom_to_fit(&mut self, min: Vec2, max: Vec2, padding: f32) {
        let size = (max - min).max(Vec2::ZERO) + Vec2::splat(2.0 * padding);
        self.center = (min + max) * 0.5;

        let fit_height = if size.y > 0.0 {
            self.config.frustum_size / size.y
        } else {
            f32::INFINITY
        };
        let fit_width = if size.x > 0.0 {
            self.config.frustum_size * self.aspect / size.x
        } else {
            f32::INFINITY
        };

        let zoom = fit_height.min(fit_width);
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        }
    }
}

impl ViewCamera for PlanCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.center.extend(0.0), Vec3::Y)
    }

    fn projection_matrix(&self) -> Mat4 {
        let hw = self.half_width();
        let hh = self.half_height();
        Mat4::orthographic_rh(-hw, hw, -hh, hh, self.config.near, self.config.far)
    }

    fn eye(&self) -> Vec3 {
        self.center.extend(self.config.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
            self.viewport_height = height as f32;
        }
    }

    fn reset(&mut self) {
        self.center = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Parallel rays straight down from the eye plane.
    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let offset = Vec2::new(ndc.x * self.half_width(), ndc.y * self.half_height());
        Ray::new((self.center + offset).extend(self.config.height), Vec3::NEG_Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_new_defaults() {
        let cam = PlanCamera::new(PlanViewConfig::default(), 800, 600);
        assert!(approx_eq(cam.zoom, 1.0));
        assert!(approx_eq(cam.aspect, 800.0 / 600.0));
        assert!(approx_eq(cam.half_height(), 50.0));
        assert_eq!(cam.eye(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_projection_maps_half_extent_to_ndc_edge() {
        let cam = PlanCamera::new(PlanViewConfig::default(), 600, 600);
        let clip = cam.view_projection() * Vec3::new(50.0, 50.0, 0.0).extend(1.0);
        assert!(approx_eq(clip.x / clip.w, 1.0));
        assert!(approx_eq(clip.y / clip.w, 1.0));
    }

    #[test]
    fn test_ground_is_inside_depth_range() {
        let cam = PlanCamera::new(PlanViewConfig::default(), 600, 600);
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn test_corner_ray_is_vertical_at_frustum_edge() {
        let mut cam = PlanCamera::new(PlanViewConfig::default(), 600, 600);
        cam.center = Vec2::new(3.0, -2.0);
        let ray = cam.ray_from_ndc(Vec2::new(1.0, -1.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert!(approx_eq(ray.origin.x, 53.0));
        assert!(approx_eq(ray.origin.y, -52.0));
        assert!(approx_eq(ray.origin.z, 5.0));
    }

    #[test]
    fn test_pan_moves_center_opposite_to_drag() {
        let mut cam = PlanCamera::new(PlanViewConfig::default(), 100, 100);
        cam.handle_mouse_move(50.0, 50.0);
        cam.handle_pan_drag(true);
        cam.handle_mouse_move(60.0, 40.0);
        // 100 world units over 100 pixels
        assert!(approx_eq(cam.center.x, -10.0));
        assert!(approx_eq(cam.center.y, -10.0));
    }

    #[test]
    fn test_no_pan_without_drag() {
        let mut cam = PlanCamera::new(PlanViewConfig::default(), 100, 100);
        cam.handle_mouse_move(0.0, 0.0);
        cam.handle_mouse_move(80.0, 80.0);
        assert_eq!(cam.center, Vec2::ZERO);
    }

    #[test]
    fn test_scroll_zoom_clamped() {
        let mut cam = PlanCamera::new(PlanViewConfig::default(), 100, 100);
        for _ in 0..200 {
            cam.handle_scroll(1.0);
        }
        assert!(approx_eq(cam.zoom, 40.0));
        for _ in 0..400 {
            cam.handle_scroll(-1.0);
        }
        assert!(approx_eq(cam.zoom, 0.05));
    }

    #[test]
    fn test_zoom_to_fit_wide_bounds() {
        let mut cam = PlanCamera::new(PlanViewConfig::default(), 200, 100);
        cam.zoom_to_fit(Vec2::new(0.0, 0.0), Vec2::new(90.0, 10.0), 5.0);
        assert!(approx_eq(cam.center.x, 45.0));
        assert!(approx_eq(cam.center.y, 5.0));
        // width-limited: 100 * 2 / 100
        assert!(approx_eq(cam.zoom, 2.0));
        assert!(cam.half_width() >= 50.0 - EPSILON);
    }

    #[test]
    fn test_recenter_keeps_zoom() {
        let mut cam = PlanCamera::new(PlanViewConfig::default(), 100, 100);
        cam.center = Vec2::new(7.0, -3.0);
        cam.zoom = 3.0;
        cam.recenter();
        assert_eq!(cam.center, Vec2::ZERO);
        assert!(approx_eq(cam.zoom, 3.0));

        cam.reset();
        assert!(approx_eq(cam.zoom, 1.0));
    }

    #[test]
    fn test_resize_zero_ignored() {
        let mut cam = PlanCamera::new(PlanViewConfig::default(), 300, 200);
        cam.resize(0, 0);
        assert!(approx_eq(cam.aspect, 1.5));
    }
}
