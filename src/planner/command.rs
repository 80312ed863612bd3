//! Host Commands
//!
//! Discrete actions that arrive from outside the canvas: toolbar buttons and
//! wall-list clicks on the browser page, key presses in the native window.
//! Both front-ends translate their input into a [`ViewerCommand`] and hand it
//! to [`Viewer::apply`](super::Viewer::apply).
//!
//! The page markup produced for the wall list and the summary panel lives
//! here too, so the browser sink is a thin `set_inner_html` call.

use std::fmt::Write;

use super::tool::Tool;
use super::view_sync::ViewKind;
use super::wall::{Wall, WallId, WallSummary};

/// Attribute carried by every wall-list item, holding its [`WallId`].
pub const WALL_ID_ATTRIBUTE: &str = "data-wall-id";

/// Element ids of the page controls, in toolbar order.
pub const CONTROL_IDS: [&str; 8] = [
    "switch-to-2d",
    "switch-to-3d",
    "zoom-fit",
    "reset-view",
    "toggle-grid",
    "draw-wall",
    "select-tool",
    "delete-tool",
];

/// One host-side action on the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    SetTool(Tool),
    SetView(ViewKind),
    ToggleView,
    ZoomToFit,
    ResetView,
    ToggleGrid,
    /// Exclusive select, e.g. from a wall-list click
    SelectWall(WallId),
    DeleteWall(WallId),
}

impl ViewerCommand {
    /// Command issued by the page control with element id `id`.
    pub fn from_control_id(id: &str) -> Option<Self> {
        let command = match id {
            "switch-to-2d" => Self::SetView(ViewKind::Plan),
            "switch-to-3d" => Self::SetView(ViewKind::Elevation),
            "zoom-fit" => Self::ZoomToFit,
            "reset-view" => Self::ResetView,
            "toggle-grid" => Self::ToggleGrid,
            "draw-wall" => Self::SetTool(Tool::Draw),
            "select-tool" => Self::SetTool(Tool::Select),
            "delete-tool" => Self::SetTool(Tool::Delete),
            _ => return None,
        };
        Some(command)
    }

    /// Select command for a wall-list item's `data-wall-id` value.
    pub fn from_wall_item(value: &str) -> Option<Self> {
        match value.trim().parse::<WallId>() {
            Ok(id) => Some(Self::SelectWall(id)),
            Err(e) => {
                log::warn!("Ignoring wall-list click: {e}");
                None
            }
        }
    }
}

/// Whether the control `id` should show as active for the given state.
///
/// Only the view switches, the grid toggle and the tool buttons have an
/// active state; the one-shot controls never do.
pub fn control_active(id: &str, view: ViewKind, tool: Tool, grid_visible: bool) -> bool {
    match ViewerCommand::from_control_id(id) {
        Some(ViewerCommand::SetView(v)) => v == view,
        Some(ViewerCommand::SetTool(t)) => t == tool,
        Some(ViewerCommand::ToggleGrid) => grid_visible,
        _ => false,
    }
}

/// Markup for `wall-list-container`: one item per wall, 1-based labels.
pub fn wall_list_html(walls: &[Wall]) -> String {
    let mut html = String::new();
    for (i, wall) in walls.iter().enumerate() {
        let class = if wall.is_selected() {
            "wall-item selected"
        } else {
            "wall-item"
        };
        let _ = write!(
            html,
            "<div class=\"{class}\" {WALL_ID_ATTRIBUTE}=\"{}\"><span>Wall {}</span><span class=\"wall-length\">{:.2}m</span></div>",
            wall.id(),
            i + 1,
            wall.length()
        );
    }
    html
}

/// Markup for the `wall-details` summary panel.
pub fn wall_details_html(walls: &[Wall]) -> String {
    let summary = WallSummary::of(walls);
    format!(
        "<b>Walls Summary</b><br>Total Walls: <b>{}</b><br>Total Length: <b>{:.2} m</b><br>",
        summary.count, summary.total_length
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_every_control_maps_to_a_command() {
        for id in CONTROL_IDS {
            assert!(ViewerCommand::from_control_id(id).is_some(), "{id}");
        }
        assert_eq!(
            ViewerCommand::from_control_id("switch-to-3d"),
            Some(ViewerCommand::SetView(ViewKind::Elevation))
        );
        assert_eq!(
            ViewerCommand::from_control_id("draw-wall"),
            Some(ViewerCommand::SetTool(Tool::Draw))
        );
        assert_eq!(ViewerCommand::from_control_id("wall-list-container"), None);
    }

    #[test]
    fn test_from_wall_item() {
        assert_eq!(
            ViewerCommand::from_wall_item("wall_3"),
            Some(ViewerCommand::SelectWall(WallId(3)))
        );
        assert_eq!(
            ViewerCommand::from_wall_item(" wall_0 "),
            Some(ViewerCommand::SelectWall(WallId(0)))
        );
        assert_eq!(ViewerCommand::from_wall_item("3"), None);
        assert_eq!(ViewerCommand::from_wall_item(""), None);
    }

    #[test]
    fn test_control_active() {
        assert!(control_active("switch-to-2d", ViewKind::Plan, Tool::Draw, true));
        assert!(!control_active("switch-to-3d", ViewKind::Plan, Tool::Draw, true));
        assert!(control_active("draw-wall", ViewKind::Plan, Tool::Draw, false));
        assert!(!control_active("draw-wall", ViewKind::Plan, Tool::Select, false));
        assert!(!control_active("toggle-grid", ViewKind::Plan, Tool::Draw, false));
        assert!(!control_active("zoom-fit", ViewKind::Plan, Tool::Draw, true));
    }

    #[test]
    fn test_wall_list_html_round_trips_ids() {
        let mut walls = vec![
            Wall::new(WallId(4), Vec2::ZERO, Vec2::new(10.0, 0.0)),
            Wall::new(WallId(9), Vec2::ZERO, Vec2::new(0.0, 2.5)),
        ];
        walls[1].set_selected(true);

        let html = wall_list_html(&walls);
        assert!(html.contains("data-wall-id=\"wall_4\""));
        assert!(html.contains("<span>Wall 2</span>"));
        assert!(html.contains("class=\"wall-item selected\" data-wall-id=\"wall_9\""));
        assert!(html.contains("2.50m"));
        assert_eq!(
            ViewerCommand::from_wall_item("wall_9"),
            Some(ViewerCommand::SelectWall(walls[1].id()))
        );
    }

    #[test]
    fn test_startup_details_show_empty_summary() {
        assert_eq!(wall_list_html(&[]), "");
        let html = wall_details_html(&[]);
        assert!(html.contains("Total Walls: <b>0</b>"));
        assert!(html.contains("Total Length: <b>0.00 m</b>"));
    }
}
