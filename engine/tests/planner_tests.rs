//! Planner Tests - Walls, Tools, Views and Picking
//!
//! End-to-end tests driving the `Viewer` the way the front-end does: pixel
//! pointer events, tool and view commands, and the wall-list callback.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::Vec2;
use wall_viewer_engine::planner::{
    pick_ground, ObjectKind, PickResult, Tool, ViewKind, Viewer, ViewerConfig, WallId,
};
use wall_viewer_engine::{MouseButton, ViewerError};

const EPSILON: f32 = 1e-3;
const SIZE: u32 = 1000;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn viewer() -> Viewer {
    Viewer::new(ViewerConfig::default(), SIZE, SIZE)
}

/// Pixel for a plan point under the default plan camera: 100 world units
/// across 1000 pixels, origin at the viewport centre.
fn to_pixel(p: Vec2) -> (f32, f32) {
    (500.0 + p.x * 10.0, 500.0 - p.y * 10.0)
}

fn click(viewer: &mut Viewer, button: MouseButton, p: Vec2) {
    let (x, y) = to_pixel(p);
    viewer.pointer_pressed(button, x, y);
    viewer.pointer_released(button, x, y);
}

fn draw(viewer: &mut Viewer, from: Vec2, to: Vec2) {
    click(viewer, MouseButton::Left, from);
    click(viewer, MouseButton::Left, to);
}

// ============================================================================
// Wall creation
// ============================================================================

#[test]
fn test_drawn_walls_have_derived_length_and_angle() {
    let mut v = viewer();
    draw(&mut v, Vec2::ZERO, Vec2::new(10.0, 0.0));
    draw(&mut v, Vec2::ZERO, Vec2::new(0.0, 5.0));

    let walls = v.walls();
    assert_eq!(walls.len(), 2);
    assert!(approx_eq(walls[0].length(), 10.0));
    assert!(approx_eq(walls[0].angle(), 0.0));
    assert!(approx_eq(walls[1].length(), 5.0));
    assert!(approx_eq(walls[1].angle(), FRAC_PI_2));
    assert!(walls[0].id() < walls[1].id());
}

#[test]
fn test_select_second_then_first() {
    let mut v = viewer();
    draw(&mut v, Vec2::ZERO, Vec2::new(10.0, 0.0));
    draw(&mut v, Vec2::ZERO, Vec2::new(0.0, 5.0));

    v.select_wall(WallId(1));
    v.select_wall(WallId(0));

    let selected: Vec<_> = v.walls().iter().filter(|w| w.is_selected()).map(|w| w.id()).collect();
    assert_eq!(selected, vec![WallId(0)]);
}

#[test]
fn test_degenerate_wall_does_not_consume_id() {
    let mut v = viewer();
    click(&mut v, MouseButton::Left, Vec2::new(3.0, 3.0));
    click(&mut v, MouseButton::Left, Vec2::new(3.0, 3.0));
    assert!(v.walls().is_empty());

    click(&mut v, MouseButton::Left, Vec2::new(8.0, 3.0));
    assert_eq!(v.walls().len(), 1);
    assert_eq!(v.walls()[0].id(), WallId(0));
}

#[test]
fn test_degenerate_error_message() {
    let err = ViewerError::DegenerateWall {
        start: Vec2::ONE,
        end: Vec2::ONE,
        length: 0.0,
    };
    assert!(err.to_string().contains("degenerate"));
}

// ============================================================================
// Deletion
// ============================================================================

#[test]
fn test_delete_removes_wall_and_representations() {
    let mut v = viewer();
    draw(&mut v, Vec2::ZERO, Vec2::new(10.0, 0.0));
    draw(&mut v, Vec2::new(0.0, 20.0), Vec2::new(10.0, 20.0));
    v.set_view(ViewKind::Elevation);

    assert!(v.delete_wall(WallId(0)));

    let views = v.registry().views();
    assert_eq!(v.walls().len(), 1);
    assert!(!views.has_plan(WallId(0)));
    assert!(!views.has_elevation(WallId(0)));
    assert!(views.has_elevation(WallId(1)));
    assert_eq!(views.scene(ViewKind::Plan).count_kind(ObjectKind::WallFootprint), 1);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut v = viewer();
    draw(&mut v, Vec2::ZERO, Vec2::new(10.0, 0.0));

    let notified = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&notified);
    v.on_walls_update(move |_| *sink.borrow_mut() += 1);

    let before = v.walls().to_vec();
    assert!(!v.delete_wall(WallId(7)));
    assert_eq!(v.walls(), before.as_slice());
    assert_eq!(*notified.borrow(), 0);
}

// ============================================================================
// Selection, highlight and tools
// ============================================================================

#[test]
fn test_at_most_one_selected_and_highlighted() {
    let mut v = viewer();
    for i in 0..4 {
        let y = i as f32 * 10.0;
        draw(&mut v, Vec2::new(-5.0, y), Vec2::new(5.0, y));
    }

    v.set_tool(Tool::Select);
    for i in 0..4 {
        let p = Vec2::new(0.0, i as f32 * 10.0);
        click(&mut v, MouseButton::Left, p);
        let (x, y) = to_pixel(p);
        v.pointer_moved(x, y);

        assert_eq!(v.walls().iter().filter(|w| w.is_selected()).count(), 1);
        assert_eq!(v.walls().iter().filter(|w| w.is_highlighted()).count(), 1);
    }
}

#[test]
fn test_select_miss_clears_states() {
    let mut v = viewer();
    draw(&mut v, Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0));
    v.set_tool(Tool::Select);
    click(&mut v, MouseButton::Left, Vec2::ZERO);
    assert!(v.walls()[0].is_selected());

    click(&mut v, MouseButton::Left, Vec2::new(0.0, 30.0));
    assert!(!v.walls()[0].is_selected());
    assert!(!v.walls()[0].is_highlighted());
}

#[test]
fn test_tool_switch_discards_pending_gesture() {
    let mut v = viewer();
    click(&mut v, MouseButton::Left, Vec2::new(1.0, 1.0));
    let anchor = v.pending_anchor().unwrap();
    assert!((anchor - Vec2::new(1.0, 1.0)).length() < EPSILON);

    v.set_tool(Tool::Select);
    v.set_tool(Tool::Draw);
    assert!(v.pending_anchor().is_none());
    assert_eq!(v.registry().views().scene(ViewKind::Plan).count_kind(ObjectKind::Preview), 0);

    // the next click starts fresh instead of committing from (1, 1)
    click(&mut v, MouseButton::Left, Vec2::new(5.0, 5.0));
    assert!(v.walls().is_empty());
    let anchor = v.pending_anchor().unwrap();
    assert!((anchor - Vec2::new(5.0, 5.0)).length() < EPSILON);
}

#[test]
fn test_preview_follows_pointer() {
    let mut v = viewer();
    click(&mut v, MouseButton::Left, Vec2::ZERO);
    let (x, y) = to_pixel(Vec2::new(4.0, 2.0));
    v.pointer_moved(x, y);

    let (from, to) = v.registry().views().preview().unwrap();
    assert_eq!(from, Vec2::ZERO);
    assert!((to - Vec2::new(4.0, 2.0)).length() < EPSILON);
}

#[test]
fn test_listener_receives_full_sequence() {
    let mut v = viewer();
    let lengths = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lengths);
    v.on_walls_update(move |walls| sink.borrow_mut().push(walls.len()));

    draw(&mut v, Vec2::ZERO, Vec2::new(10.0, 0.0));
    draw(&mut v, Vec2::ZERO, Vec2::new(0.0, 5.0));
    v.select_wall(WallId(0));
    v.delete_wall(WallId(1));

    assert_eq!(*lengths.borrow(), vec![1, 2, 2, 1]);
    assert_eq!(v.summary().to_string(), "1 wall, 10.00m");
}

// ============================================================================
// Views
// ============================================================================

#[test]
fn test_elevation_rebuild_never_duplicates() {
    let mut v = viewer();
    draw(&mut v, Vec2::ZERO, Vec2::new(10.0, 0.0));
    draw(&mut v, Vec2::ZERO, Vec2::new(0.0, 5.0));
    assert_eq!(v.registry().views().elevation_count(), 0);

    for _ in 0..5 {
        v.set_plan_view(false);
        v.set_plan_view(true);
    }
    v.set_plan_view(false);

    let views = v.registry().views();
    assert_eq!(views.elevation_count(), 2);
    assert_eq!(views.scene(ViewKind::Elevation).count_kind(ObjectKind::WallBody), 2);
}

#[test]
fn test_walls_drawn_in_elevation_get_bodies() {
    let mut v = viewer();
    v.set_view(ViewKind::Elevation);

    // the default elevation camera looks at the origin from (50, 50, 50)
    let before = pick_ground(v.active_camera(), ViewKind::Elevation, Vec2::ZERO);
    assert!(matches!(before, PickResult::GroundPoint(p) if p.length() < EPSILON));

    v.pointer_pressed(MouseButton::Left, 500.0, 500.0);
    v.pointer_pressed(MouseButton::Left, 700.0, 500.0);
    assert_eq!(v.walls().len(), 1);
    assert!(v.registry().views().has_elevation(v.walls()[0].id()));
    assert!(v.registry().views().has_plan(v.walls()[0].id()));
}

#[test]
fn test_resize_keeps_walls() {
    let mut v = viewer();
    draw(&mut v, Vec2::ZERO, Vec2::new(10.0, 0.0));
    let walls = v.walls().to_vec();

    v.resize(1600, 800);
    assert!(approx_eq(v.plan_camera().aspect, 2.0));
    assert!(approx_eq(v.elevation_camera().aspect, 2.0));
    assert_eq!(v.walls(), walls.as_slice());
}

#[test]
fn test_ground_pick_at_viewport_center() {
    let mut v = viewer();
    v.pointer_pressed(MouseButton::Middle, 500.0, 500.0);
    v.pointer_moved(400.0, 600.0);
    v.pointer_released(MouseButton::Middle, 400.0, 600.0);
    let center = v.plan_camera().center;

    v.pointer_moved(500.0, 500.0);
    let p = v.pick_ground().ground_point().unwrap();
    assert!((p - center).length() < EPSILON);
}
