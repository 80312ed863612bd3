//! Viewer
//!
//! Central state struct of the wall viewer. Owns the registry, both cameras
//! and the tool state, and turns pointer and command input into changes on
//! them. The front-end feeds it window events and draws [`Viewer::frame`].

use glam::{Vec2, Vec3};

use super::command::ViewerCommand;
use super::config::ViewerConfig;
use super::geometry::Bounds2;
use super::picking::{self, PickResult};
use super::registry::WallRegistry;
use super::tool::{DrawGesture, Tool, ToolState};
use super::view_sync::ViewKind;
use super::wall::{Wall, WallId, WallSummary};
use crate::camera::{CameraDrag, OrbitCamera, PlanCamera, ViewCamera};
use crate::input::{ButtonState, MouseButton, Position, Viewport};
use crate::render::{FrameGeometry, Mesh, ViewUniforms, LIGHT_DIRECTION};
use crate::world::{generate_axes, generate_grid};

/// Application state of the wall viewer.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    registry: WallRegistry,
    tools: ToolState,

    // === Cameras ===
    plan_camera: PlanCamera,
    elevation_camera: OrbitCamera,

    // === Pointer ===
    viewport: Viewport,
    buttons: ButtonState,
    pointer: Position,
    /// Middle drag pans instead of orbiting in elevation while held.
    pan_modifier: bool,
}

impl Viewer {
    /// Create a viewer in plan view with the draw tool active.
    pub fn new(config: ViewerConfig, width: u32, height: u32) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            registry: WallRegistry::new(&config),
            tools: ToolState::default(),
            plan_camera: PlanCamera::new(config.plan_view.clone(), viewport.width, viewport.height),
            elevation_camera: OrbitCamera::new(
                config.elevation_view.clone(),
                viewport.width,
                viewport.height,
            ),
            viewport,
            buttons: ButtonState::new(),
            pointer: viewport.center(),
            pan_modifier: false,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    // ========================================================================
    // TOOLS AND VIEWS
    // ========================================================================

    pub fn tool(&self) -> Tool {
        self.tools.tool()
    }

    /// Activate `tool`. Any draw gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.set_tool(tool);
        self.registry.views_mut().clear_preview();
        log::info!("Tool: {}", tool);
    }

    pub fn view(&self) -> ViewKind {
        self.registry.views().active_view()
    }

    /// Switch the active scene and camera.
    pub fn set_view(&mut self, view: ViewKind) {
        self.end_camera_drags();
        self.registry.set_active_view(view);
        if view == ViewKind::Plan {
            self.plan_camera.recenter();
        }
        log::info!("View: {}", view.label());
    }

    /// Host-facing form of [`Viewer::set_view`].
    pub fn set_plan_view(&mut self, is_2d: bool) {
        self.set_view(ViewKind::from_is_2d(is_2d));
    }

    pub fn toggle_view(&mut self) {
        self.set_view(self.view().toggled());
    }

    pub fn active_camera(&self) -> &dyn ViewCamera {
        match self.view() {
            ViewKind::Plan => &self.plan_camera,
            ViewKind::Elevation => &self.elevation_camera,
        }
    }

    pub fn plan_camera(&self) -> &PlanCamera {
        &self.plan_camera
    }

    pub fn elevation_camera(&self) -> &OrbitCamera {
        &self.elevation_camera
    }

    // ========================================================================
    // POINTER INPUT
    // ========================================================================

    /// Handle a button press at pixel `(x, y)`.
    ///
    /// Primary runs the active tool, secondary always selects, middle starts
    /// camera navigation.
    pub fn pointer_pressed(&mut self, button: MouseButton, x: f32, y: f32) {
        self.track_pointer(x, y);
        self.buttons.set(button, true);

        match button {
            MouseButton::Left => self.primary_action(),
            MouseButton::Right => self.select_action(),
            MouseButton::Middle => match self.view() {
                ViewKind::Plan => self.plan_camera.handle_pan_drag(true),
                ViewKind::Elevation => {
                    let drag = if self.pan_modifier {
                        CameraDrag::Pan
                    } else {
                        CameraDrag::Orbit
                    };
                    self.elevation_camera.handle_mouse_drag(drag, true);
                }
            },
            MouseButton::Other(_) => {}
        }
    }

    /// Handle pointer movement: camera drags first, then the draw preview or
    /// hover highlight.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.track_pointer(x, y);

        if self.plan_camera.is_active() || self.elevation_camera.is_active() {
            return;
        }

        match self.tools.gesture() {
            DrawGesture::Pending { .. } => {
                if let Some(point) = self.pick_ground().ground_point() {
                    self.registry.views_mut().update_preview(point);
                }
            }
            DrawGesture::Idle => match self.pick_wall() {
                PickResult::Wall(id) => self.registry.highlight_wall(id),
                // selection stays; only a select-action miss clears it
                _ => self.registry.clear_highlight(),
            },
        }
    }

    /// Releases never touch walls; they only end camera drags.
    pub fn pointer_released(&mut self, button: MouseButton, x: f32, y: f32) {
        self.track_pointer(x, y);
        self.buttons.set(button, false);
        if button == MouseButton::Middle {
            self.end_camera_drags();
        }
    }

    /// Wheel input; positive zooms in.
    pub fn scroll(&mut self, delta: f32) {
        match self.view() {
            ViewKind::Plan => self.plan_camera.handle_scroll(delta),
            ViewKind::Elevation => self.elevation_camera.handle_scroll(delta),
        }
    }

    /// While held, middle drag in elevation pans instead of orbiting.
    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }

    pub fn buttons(&self) -> &ButtonState {
        &self.buttons
    }

    /// Last pointer position in pixels.
    pub fn pointer(&self) -> Position {
        self.pointer
    }

    /// Ground point under the last pointer position.
    pub fn pick_ground(&self) -> PickResult {
        let ndc = self.viewport.to_ndc(self.pointer);
        picking::pick_ground(self.active_camera(), self.view(), ndc)
    }

    /// Wall under the last pointer position.
    pub fn pick_wall(&self) -> PickResult {
        let ndc = self.viewport.to_ndc(self.pointer);
        picking::pick_wall(self.active_camera(), self.registry.views().active_scene(), ndc)
    }

    fn track_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Position::new(x, y);
        self.plan_camera.handle_mouse_move(x, y);
        self.elevation_camera.handle_mouse_move(x, y);
    }

    fn end_camera_drags(&mut self) {
        self.plan_camera.handle_pan_drag(false);
        self.elevation_camera.handle_mouse_drag(CameraDrag::Orbit, false);
        self.elevation_camera.handle_mouse_drag(CameraDrag::Pan, false);
    }

    fn primary_action(&mut self) {
        match self.tools.tool() {
            Tool::Draw => self.draw_action(),
            Tool::Select => self.select_action(),
            Tool::Delete => {
                if let PickResult::Wall(id) = self.pick_wall() {
                    self.registry.delete_wall(id);
                }
            }
        }
    }

    fn draw_action(&mut self) {
        let Some(point) = self.pick_ground().ground_point() else {
            log::debug!("Draw click missed the ground");
            return;
        };

        match self.tools.gesture() {
            DrawGesture::Idle => {
                self.tools.begin(point);
                self.registry.views_mut().show_preview(point, point);
            }
            DrawGesture::Pending { anchor } => match self.registry.add_wall(anchor, point) {
                Ok(_) => {
                    self.registry.views_mut().clear_preview();
                    self.tools.cancel();
                }
                Err(e) => log::warn!("{e}"),
            },
        }
    }

    fn select_action(&mut self) {
        match self.pick_wall() {
            PickResult::Wall(id) => self.registry.select_wall(id),
            _ => self.registry.clear_states(),
        }
    }

    // ========================================================================
    // VIEW COMMANDS
    // ========================================================================

    /// Update the viewport and both cameras. Walls are untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.plan_camera.resize(width, height);
        self.elevation_camera.resize(width, height);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Fit the active camera to all walls, or reset it when there are none.
    pub fn zoom_to_fit(&mut self) {
        let points = self
            .registry
            .walls()
            .iter()
            .flat_map(|w| [w.start(), w.end()]);
        let Some(bounds) = Bounds2::from_points(points) else {
            self.reset_view();
            return;
        };

        let padding = self.config.fit_padding;
        match self.view() {
            ViewKind::Plan => self.plan_camera.zoom_to_fit(bounds.min, bounds.max, padding),
            ViewKind::Elevation => {
                let min = Vec3::new(bounds.min.x, 0.0, bounds.min.y);
                let max = Vec3::new(bounds.max.x, self.config.walls.height, bounds.max.y);
                self.elevation_camera.zoom_to_fit(min, max, padding);
            }
        }
    }

    /// Active camera back to its default pose.
    pub fn reset_view(&mut self) {
        match self.view() {
            ViewKind::Plan => self.plan_camera.reset(),
            ViewKind::Elevation => self.elevation_camera.reset(),
        }
    }

    /// Flip grid visibility; returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        let visible = !self.registry.views().grid_visible();
        self.registry.views_mut().set_grid_visible(visible);
        visible
    }

    pub fn grid_visible(&self) -> bool {
        self.registry.views().grid_visible()
    }

    /// Run one host command (toolbar button, wall-list click or key).
    pub fn apply(&mut self, command: ViewerCommand) {
        log::debug!("Command {:?}", command);
        match command {
            ViewerCommand::SetTool(tool) => self.set_tool(tool),
            ViewerCommand::SetView(view) => self.set_view(view),
            ViewerCommand::ToggleView => self.toggle_view(),
            ViewerCommand::ZoomToFit => self.zoom_to_fit(),
            ViewerCommand::ResetView => self.reset_view(),
            ViewerCommand::ToggleGrid => {
                let visible = self.toggle_grid();
                log::info!("Grid {}", if visible { "on" } else { "off" });
            }
            ViewerCommand::SelectWall(id) => self.select_wall(id),
            ViewerCommand::DeleteWall(id) => {
                self.delete_wall(id);
            }
        }
    }

    // ========================================================================
    // WALLS
    // ========================================================================

    /// Install the wall-list callback.
    pub fn on_walls_update<F>(&mut self, listener: F)
    where
        F: FnMut(&[Wall]) + 'static,
    {
        self.registry.set_listener(listener);
    }

    pub fn select_wall(&mut self, id: WallId) {
        self.registry.select_wall(id);
    }

    pub fn delete_wall(&mut self, id: WallId) -> bool {
        self.registry.delete_wall(id)
    }

    pub fn walls(&self) -> &[Wall] {
        self.registry.walls()
    }

    pub fn summary(&self) -> WallSummary {
        self.registry.summary()
    }

    pub fn registry(&self) -> &WallRegistry {
        &self.registry
    }

    /// First point of a pending draw gesture.
    pub fn pending_anchor(&self) -> Option<Vec2> {
        self.tools.gesture().anchor()
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    /// Geometry and uniforms for the active view.
    pub fn frame(&self) -> FrameGeometry {
        let view = self.view();
        let grid_plane = view.grid_plane();

        let mut mesh = Mesh::new();
        if self.grid_visible() {
            mesh.merge(&generate_grid(&self.config.grid, grid_plane));
        }
        mesh.merge(&generate_axes(&self.config.grid, grid_plane));
        self.registry.views().active_scene().append_meshes(&mut mesh);

        let view_proj = self.active_camera().view_projection();
        let uniforms = match view {
            ViewKind::Plan => ViewUniforms::flat(view_proj),
            ViewKind::Elevation => ViewUniforms::lit(view_proj, LIGHT_DIRECTION),
        };

        FrameGeometry {
            mesh,
            uniforms,
            clear_color: self.config.background,
        }
    }

    /// e.g. `Wall Viewer | 2D | Draw | 2 walls, 15.00m`
    pub fn window_title(&self) -> String {
        format!(
            "Wall Viewer | {} | {} | {}",
            self.view().label(),
            self.tool(),
            self.summary()
        )
    }
}
