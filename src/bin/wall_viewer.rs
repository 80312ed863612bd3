//! Wall Viewer - Plan and Elevation Wall Drawing
//!
//! Run with: `cargo run --bin wall_viewer`
//!
//! Controls:
//! - Left click: Use the active tool (two clicks draw a wall)
//! - Right click: Select the wall under the pointer
//! - Middle drag: Pan (plan) / Orbit (elevation), Shift+Middle drag pans in elevation
//! - Scroll wheel: Zoom
//! - D: Draw tool
//! - S: Select tool
//! - X / Delete: Delete tool
//! - Tab: Toggle plan / elevation, 2: Plan view, 3: Elevation view
//! - F: Zoom to fit
//! - R: Reset view
//! - G: Toggle grid
//! - ESC: Exit
//!
//! Set `WALL_VIEWER_CONFIG` to a JSON file to override defaults, and
//! `RUST_LOG=debug` for per-event logging.
//!
//! Browser (wasm): build with `cargo build --bin wall_viewer --target wasm32-unknown-unknown`,
//! then run `wasm-bindgen` and serve a page with a `viewer-container` element.
//! Optional page elements: the `switch-to-2d`, `switch-to-3d`, `zoom-fit`,
//! `reset-view`, `toggle-grid` and `draw-wall` buttons, plus the
//! `wall-list-container` and `wall-details` panels.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use wall_viewer_engine::input::ScrollDelta;
use wall_viewer_engine::planner::{Tool, ViewKind, Viewer, ViewerCommand, ViewerConfig, Wall};
use wall_viewer_engine::render::{ViewRenderer, request_gpu};
use wall_viewer_engine::MouseButton;

const WINDOW_TITLE: &str = "Wall Viewer";
const INITIAL_SIZE: PhysicalSize<u32> = PhysicalSize::new(1280, 800);

/// Commands queued by page listeners, drained on the event loop.
type CommandQueue = Rc<RefCell<Vec<ViewerCommand>>>;

// ============================================================================
// APPLICATION
// ============================================================================

struct WallViewerApp {
    window: Option<Arc<Window>>,
    renderer: Option<ViewRenderer>,
    viewer: Viewer,
    commands: CommandQueue,
    /// Last title set on the window, to skip redundant updates.
    title: String,
    /// Control state last pushed to the page buttons.
    #[cfg(target_arch = "wasm32")]
    controls: Option<(ViewKind, Tool, bool)>,
}

impl WallViewerApp {
    fn new(config: ViewerConfig) -> Self {
        let mut viewer = Viewer::new(config, INITIAL_SIZE.width, INITIAL_SIZE.height);
        viewer.on_walls_update(report_walls);
        Self {
            window: None,
            renderer: None,
            viewer,
            commands: Rc::new(RefCell::new(Vec::new())),
            title: String::new(),
            #[cfg(target_arch = "wasm32")]
            controls: None,
        }
    }

    /// Create the surface and renderer for a native window.
    fn initialize(&mut self, window: Arc<Window>) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(Arc::clone(&window))
            .expect("Failed to create surface");

        let (adapter, device, queue) =
            pollster::block_on(request_gpu(&instance, &surface)).expect("Failed to initialize GPU");
        self.initialize_from_gpu(window, surface, adapter, device, queue);
    }

    /// Finish initialization with an already-created GPU (native after
    /// block_on, wasm after the async request).
    fn initialize_from_gpu(
        &mut self,
        window: Arc<Window>,
        surface: wgpu::Surface<'static>,
        adapter: wgpu::Adapter,
        device: wgpu::Device,
        queue: wgpu::Queue,
    ) {
        let size = window.inner_size();
        self.window = Some(window);

        match ViewRenderer::new(surface, &adapter, device, queue, size.width, size.height) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("{e}");
                return;
            }
        }

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        self.viewer.resize(size.width, size.height);
        self.update_title();
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if matches!(key, KeyCode::ShiftLeft | KeyCode::ShiftRight) {
            self.viewer.set_pan_modifier(pressed);
            return;
        }
        if pressed {
            if let Some(command) = key_command(key) {
                self.viewer.apply(command);
            }
        }
    }

    /// Apply everything the page listeners queued since the last frame.
    fn drain_commands(&mut self) {
        let queued: Vec<_> = self.commands.borrow_mut().drain(..).collect();
        for command in queued {
            self.viewer.apply(command);
        }
    }

    /// Mirror view, tool and grid state onto the page buttons' `active` class.
    #[cfg(target_arch = "wasm32")]
    fn sync_controls(&mut self) {
        use wall_viewer_engine::planner::{control_active, CONTROL_IDS};

        let state = (self.viewer.view(), self.viewer.tool(), self.viewer.grid_visible());
        if self.controls == Some(state) {
            return;
        }
        self.controls = Some(state);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let (view, tool, grid) = state;
        for id in CONTROL_IDS {
            if let Some(element) = document.get_element_by_id(id) {
                let active = control_active(id, view, tool, grid);
                let _ = element.class_list().toggle_with_force("active", active);
            }
        }
    }

    fn update_title(&mut self) {
        let title = self.viewer.window_title();
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn render(&mut self) {
        self.drain_commands();
        #[cfg(target_arch = "wasm32")]
        self.sync_controls();
        self.update_title();
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.viewer.frame());
        }
    }
}

/// Native key bindings for host commands.
fn key_command(key: KeyCode) -> Option<ViewerCommand> {
    let command = match key {
        KeyCode::KeyD => ViewerCommand::SetTool(Tool::Draw),
        KeyCode::KeyS => ViewerCommand::SetTool(Tool::Select),
        KeyCode::KeyX | KeyCode::Delete => ViewerCommand::SetTool(Tool::Delete),
        KeyCode::Tab => ViewerCommand::ToggleView,
        KeyCode::Digit2 => ViewerCommand::SetView(ViewKind::Plan),
        KeyCode::Digit3 => ViewerCommand::SetView(ViewKind::Elevation),
        KeyCode::KeyF => ViewerCommand::ZoomToFit,
        KeyCode::KeyR => ViewerCommand::ResetView,
        KeyCode::KeyG => ViewerCommand::ToggleGrid,
        _ => return None,
    };
    Some(command)
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    }
}

impl ApplicationHandler for WallViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // the browser build creates its window before the loop starts
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title(WINDOW_TITLE)
                .with_inner_size(INITIAL_SIZE);
            let window = Arc::new(event_loop.create_window(attrs).unwrap());
            self.initialize(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == KeyCode::Escape && event.state == ElementState::Pressed {
                        #[cfg(not(target_arch = "wasm32"))]
                        event_loop.exit();
                        return;
                    }
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.viewer
                    .pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(button);
                let pos = self.viewer.pointer();
                match state {
                    ElementState::Pressed => self.viewer.pointer_pressed(button, pos.x, pos.y),
                    ElementState::Released => self.viewer.pointer_released(button, pos.x, pos.y),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(x, y) => ScrollDelta::from_lines(x, y),
                    MouseScrollDelta::PixelDelta(p) => ScrollDelta::from_pixels(p.x, p.y),
                };
                if !scroll.is_zero() {
                    self.viewer.scroll(scroll.y);
                }
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(size.width, size.height);
                    }
                    self.viewer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        self.drain_commands();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// ============================================================================
// WALL LIST OUTPUT
// ============================================================================

/// Native wall-list sink: log every wall and the summary.
#[cfg(not(target_arch = "wasm32"))]
fn report_walls(walls: &[Wall]) {
    for (i, wall) in walls.iter().enumerate() {
        let marker = if wall.is_selected() { " *" } else { "" };
        log::info!("Wall {}  {:.2}m{}", i + 1, wall.length(), marker);
    }
    log::info!("{}", wall_viewer_engine::planner::WallSummary::of(walls));
}

/// Browser wall-list sink: fill `wall-list-container` and `wall-details`
/// when the page has them.
#[cfg(target_arch = "wasm32")]
fn report_walls(walls: &[Wall]) {
    use wall_viewer_engine::planner::{wall_details_html, wall_list_html};

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(list) = document.get_element_by_id("wall-list-container") {
        list.set_inner_html(&wall_list_html(walls));
    }
    if let Some(details) = document.get_element_by_id("wall-details") {
        details.set_inner_html(&wall_details_html(walls));
    }
}

/// Route page clicks into `queue`: one listener per control button, plus a
/// delegated listener on the wall list that reads the clicked item's
/// `data-wall-id`. Missing elements are skipped.
#[cfg(target_arch = "wasm32")]
fn wire_page_controls(queue: &CommandQueue) {
    use wall_viewer_engine::planner::{CONTROL_IDS, WALL_ID_ATTRIBUTE};

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    for id in CONTROL_IDS {
        let (Some(element), Some(command)) = (
            document.get_element_by_id(id),
            ViewerCommand::from_control_id(id),
        ) else {
            continue;
        };
        let queue = Rc::clone(queue);
        let on_click = Closure::<dyn FnMut()>::new(move || queue.borrow_mut().push(command));
        if element
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::warn_1(&format!("Could not listen on #{id}").into());
        }
        on_click.forget();
    }

    let Some(list) = document.get_element_by_id("wall-list-container") else {
        return;
    };
    let selector = format!("[{WALL_ID_ATTRIBUTE}]");
    let queue = Rc::clone(queue);
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let command = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|element| element.closest(&selector).ok().flatten())
            .and_then(|item| item.get_attribute(WALL_ID_ATTRIBUTE))
            .and_then(|value| ViewerCommand::from_wall_item(&value));
        if let Some(command) = command {
            queue.borrow_mut().push(command);
        }
    });
    if list
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .is_err()
    {
        web_sys::console::warn_1(&"Could not listen on #wall-list-container".into());
    }
    on_click.forget();
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("===========================================");
    println!("   Wall Viewer - Plan / Elevation");
    println!("===========================================");
    println!();
    println!("Controls: Left click Draw/Select/Delete, Right click Select");
    println!("D: Draw, S: Select, X/Delete: Delete, Tab/2/3: Switch view");
    println!("F: Zoom to fit, R: Reset view, G: Grid, Middle drag: Pan/Orbit, ESC: Exit");
    println!();

    let config = ViewerConfig::from_env();

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = WallViewerApp::new(config);
    event_loop.run_app(&mut app).unwrap();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Browser entry point. Attaches to the page's `viewer-container`, then
/// requests the GPU asynchronously and runs the event loop.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_start() {
    use wall_viewer_engine::ViewerError;
    use winit::platform::web::{EventLoopExtWebSys, WindowAttributesExtWebSys};

    console_error_panic_hook::set_once();

    let canvas = match viewer_canvas("viewer-container") {
        Ok(canvas) => canvas,
        Err(e) => {
            web_sys::console::error_1(&e.to_string().into());
            return;
        }
    };

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let attrs = WindowAttributes::default()
        .with_title(WINDOW_TITLE)
        .with_canvas(Some(canvas));
    let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let surface = instance.create_surface(Arc::clone(&window)).unwrap();

    spawn_local(async move {
        let (adapter, device, queue) = match request_gpu(&instance, &surface).await {
            Ok(gpu) => gpu,
            Err(e) => {
                web_sys::console::error_1(&e.to_string().into());
                return;
            }
        };

        let mut app = WallViewerApp::new(ViewerConfig::default());
        app.initialize_from_gpu(window, surface, adapter, device, queue);

        wire_page_controls(&app.commands);
        report_walls(app.viewer.walls());
        app.sync_controls();

        event_loop.spawn_app(app);
    });

    /// The container itself when it is a canvas, else a new canvas
    /// appended to it.
    fn viewer_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement, ViewerError> {
        let not_found = || ViewerError::ContainerNotFound(id.to_string());
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(not_found)?;
        let container = document.get_element_by_id(id).ok_or_else(not_found)?;

        if let Ok(canvas) = container.clone().dyn_into::<web_sys::HtmlCanvasElement>() {
            return Ok(canvas);
        }

        let canvas = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .ok_or_else(not_found)?;
        container
            .append_child(&canvas)
            .map_err(|_| ViewerError::ContainerNotFound(id.to_string()))?;
        Ok(canvas)
    }
}
