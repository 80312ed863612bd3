//! Orbit Camera for the Elevation View
//!
//! A spherical-coordinate orbit camera used to inspect the extruded walls
//! from any angle. The plan view uses an orthographic projection instead.
//!
//! Controls:
//! - Middle mouse drag: Orbit (rotate around target)
//! - Shift + middle mouse drag: Pan (translate target point)
//! - Scroll wheel: Zoom (change distance from target)

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::ViewCamera;
use super::raycast::Ray;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum elevation angle in degrees (prevent gimbal lock).
const MIN_ELEVATION: f32 = -89.0;
/// Maximum elevation angle in degrees (prevent gimbal lock).
const MAX_ELEVATION: f32 = 89.0;

/// Orbit sensitivity: degrees per pixel of mouse movement.
const ORBIT_SENSITIVITY: f32 = 0.3;
/// Pan sensitivity factor: multiplied by distance for depth-proportional panning.
const PAN_SENSITIVITY: f32 = 0.002;
/// Scroll zoom factor: how much each scroll tick affects distance.
const SCROLL_FACTOR: f32 = 0.1;

// ============================================================================
// CONFIG
// ============================================================================

/// Elevation camera settings. The default pose is given as an eye position
/// looking at `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationViewConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ElevationViewConfig {
    fn default() -> Self {
        Self {
            fov: 35.0,
            near: 0.1,
            far: 500.0,
            eye: Vec3::new(50.0, 50.0, 50.0),
            target: Vec3::ZERO,
            min_distance: 1.0,
            max_distance: 400.0,
        }
    }
}

// ============================================================================
// DRAG MODE
// ============================================================================

/// What a camera drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDrag {
    /// Rotate around the target.
    Orbit,
    /// Translate the target in the view plane.
    Pan,
}

// ============================================================================
// ORBIT CAMERA
// ============================================================================

/// A spherical-coordinate orbit camera for the elevation view.
///
/// # Coordinate System
/// - Azimuth: horizontal angle in degrees, 0 looks from +Z
/// - Elevation: vertical angle in degrees (clamped -89 to 89)
/// - Distance: zoom distance from target (clamped by config)
/// - Y is up
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal angle in degrees (wraps around).
    pub azimuth: f32,
    /// Vertical angle in degrees (clamped to [-89, 89]).
    pub elevation: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// The point the camera orbits around.
    pub target: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    config: ElevationViewConfig,

    // -- Mouse interaction state --
    is_orbiting: bool,
    is_panning: bool,
    last_mouse: [f32; 2],
}

impl OrbitCamera {
    /// Create a camera at the configured default pose.
    pub fn new(config: ElevationViewConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            azimuth: 0.0,
            elevation: 0.0,
            distance: 1.0,
            target: Vec3::ZERO,
            aspect: 1.0,
            config,
            is_orbiting: false,
            is_panning: false,
            last_mouse: [0.0, 0.0],
        };
        camera.reset();
        camera.resize(width, height);
        camera
    }

    pub fn config(&self) -> &ElevationViewConfig {
        &self.config
    }

    /// Set azimuth/elevation/distance so the eye sits at `eye`.
    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        let offset = eye - target;
        let distance = offset.length();
        self.target = target;
        if distance <= f32::EPSILON {
            return;
        }
        self.distance = distance;
        self.elevation = (offset.y / distance)
            .asin()
            .to_degrees()
            .clamp(MIN_ELEVATION, MAX_ELEVATION);
        self.azimuth = offset.x.atan2(offset.z).to_degrees();
    }

    // ========================================================================
    // INPUT HANDLING
    // ========================================================================

    /// Start or stop an orbit or pan drag.
    pub fn handle_mouse_drag(&mut self, drag: CameraDrag, pressed: bool) {
        match drag {
            CameraDrag::Orbit => self.is_orbiting = pressed,
            CameraDrag::Pan => self.is_panning = pressed,
        }
    }

    /// Handle mouse movement. Call this on every cursor move.
    ///
    /// - While orbiting: dx rotates azimuth, dy rotates elevation
    /// - While panning: moves the target in camera-local right/up
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        let dx = x - self.last_mouse[0];
        let dy = y - self.last_mouse[1];

        if self.is_orbiting {
            self.azimuth -= dx * ORBIT_SENSITIVITY;
            self.elevation =
                (self.elevation + dy * ORBIT_SENSITIVITY).clamp(MIN_ELEVATION, MAX_ELEVATION);
        }

        if self.is_panning {
            self.pan(
                -dx * PAN_SENSITIVITY * self.distance,
                dy * PAN_SENSITIVITY * self.distance,
            );
        }

        self.last_mouse = [x, y];
    }

    /// Multiplicative zoom. Positive delta zooms in, negative zooms out.
    pub fn handle_scroll(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * SCROLL_FACTOR;
        self.distance = self
            .distance
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        let forward = self.offset_direction();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        self.target += right * dx + up * dy;
    }

    pub fn is_active(&self) -> bool {
        self.is_orbiting || self.is_panning
    }

    // ========================================================================
    // VIEW COMMANDS
    // ========================================================================

    /// Frame an axis-aligned box: target its centre and back off until the
    /// largest dimension fills the vertical field of view, plus `padding`.
    pub fn zoom_to_fit(&mut self, min: Vec3, max: Vec3, padding: f32) {
        let size = (max - min).max(Vec3::ZERO);
        self.target = (min + max) * 0.5;

        let half_fov = (self.config.fov.to_radians() * 0.5).tan();
        let fit = size.max_element() / (2.0 * half_fov) + padding;
        self.distance = fit.clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Unit vector from target toward the eye.
    fn offset_direction(&self) -> Vec3 {
        let azim_rad = self.azimuth.to_radians();
        let elev_rad = self.elevation.to_radians();
        let cos_elev = elev_rad.cos();
        Vec3::new(
            cos_elev * azim_rad.sin(),
            elev_rad.sin(),
            cos_elev * azim_rad.cos(),
        )
    }
}

impl ViewCamera for OrbitCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    fn eye(&self) -> Vec3 {
        self.target + self.offset_direction() * self.distance
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    fn reset(&mut self) {
        let eye = self.config.eye;
        let target = self.config.target;
        self.look_from(eye, target);
    }

    /// Ray from the eye, built in camera space so it stays exact at any
    /// far-plane distance.
    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let forward = -self.offset_direction();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let half_fov = (self.config.fov.to_radians() * 0.5).tan();

        let direction =
            forward + right * (ndc.x * half_fov * self.aspect) + up * (ndc.y * half_fov);
        Ray::new(self.eye(), direction)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn camera() -> OrbitCamera {
        OrbitCamera::new(ElevationViewConfig::default(), 1000, 1000)
    }

    #[test]
    fn test_new_defaults() {
        let cam = camera();
        assert!(approx_eq(cam.azimuth, 45.0));
        assert!(approx_eq(cam.elevation, 35.264));
        assert!(approx_eq(cam.distance, 86.6025));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_eye_matches_config() {
        let eye = camera().eye();
        assert!(approx_eq(eye.x, 50.0));
        assert!(approx_eq(eye.y, 50.0));
        assert!(approx_eq(eye.z, 50.0));
    }

    #[test]
    fn test_projection_matrix_is_perspective() {
        let proj = camera().projection_matrix();
        assert!(proj.x_axis.x > 0.0);
        assert!(proj.y_axis.y > 0.0);
        assert!(approx_eq(proj.w_axis.w, 0.0));
    }

    #[test]
    fn test_orbit_changes_azimuth_elevation() {
        let mut cam = camera();
        cam.handle_mouse_move(100.0, 100.0);
        cam.handle_mouse_drag(CameraDrag::Orbit, true);
        cam.handle_mouse_move(200.0, 150.0);

        assert!(approx_eq(cam.azimuth, 45.0 - 30.0));
        assert!(approx_eq(cam.elevation, 35.264 + 15.0));
    }

    #[test]
    fn test_elevation_clamped() {
        let mut cam = camera();
        cam.handle_mouse_move(100.0, 100.0);
        cam.handle_mouse_drag(CameraDrag::Orbit, true);
        cam.handle_mouse_move(100.0, 900.0);
        assert!(cam.elevation <= MAX_ELEVATION);
        cam.handle_mouse_move(100.0, -900.0);
        assert!(cam.elevation >= MIN_ELEVATION);
    }

    #[test]
    fn test_scroll_clamped() {
        let mut cam = camera();
        for _ in 0..200 {
            cam.handle_scroll(2.0);
        }
        assert!(cam.distance >= 1.0);
        for _ in 0..200 {
            cam.handle_scroll(-2.0);
        }
        assert!(cam.distance <= 400.0);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut cam = camera();
        cam.handle_mouse_move(100.0, 100.0);
        cam.handle_mouse_drag(CameraDrag::Pan, true);
        cam.handle_mouse_move(200.0, 200.0);
        assert!(cam.target != Vec3::ZERO);
        assert!(cam.is_active());

        cam.handle_mouse_drag(CameraDrag::Pan, false);
        assert!(!cam.is_active());
    }

    #[test]
    fn test_no_movement_without_drag() {
        let mut cam = camera();
        cam.handle_mouse_move(100.0, 100.0);
        cam.handle_mouse_move(300.0, 300.0);
        assert!(approx_eq(cam.azimuth, 45.0));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_zoom_to_fit_targets_center() {
        let mut cam = camera();
        cam.zoom_to_fit(Vec3::new(0.0, 0.0, 0.0), Vec3::new(20.0, 3.0, 10.0), 5.0);
        assert!(approx_eq(cam.target.x, 10.0));
        assert!(approx_eq(cam.target.y, 1.5));
        assert!(approx_eq(cam.target.z, 5.0));
        let expected = 20.0 / (2.0 * (17.5_f32.to_radians()).tan()) + 5.0;
        assert!(approx_eq(cam.distance, expected));
    }

    #[test]
    fn test_reset_restores_pose() {
        let mut cam = camera();
        cam.azimuth = 180.0;
        cam.distance = 10.0;
        cam.target = Vec3::new(5.0, 3.0, 1.0);
        cam.reset();
        assert!(approx_eq(cam.azimuth, 45.0));
        assert!(approx_eq(cam.distance, 86.6025));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_center_ray_reaches_target() {
        let mut cam = camera();
        cam.target = Vec3::new(10.0, 0.0, -5.0);
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!((ray.at(cam.distance) - cam.target).length() < EPSILON);
    }

    #[test]
    fn test_ray_projects_back_to_its_ndc() {
        let mut cam = camera();
        cam.resize(1600, 900);
        let ndc = Vec2::new(0.4, -0.3);
        let point = cam.ray_from_ndc(ndc).at(60.0);

        let clip = cam.view_projection() * point.extend(1.0);
        assert!(approx_eq(clip.x / clip.w, ndc.x));
        assert!(approx_eq(clip.y / clip.w, ndc.y));
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut cam = camera();
        cam.resize(1920, 1080);
        assert!(approx_eq(cam.aspect, 1920.0 / 1080.0));
        cam.resize(0, 10);
        assert!(approx_eq(cam.aspect, 1920.0 / 1080.0));
    }
}
