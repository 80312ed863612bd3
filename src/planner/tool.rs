//! Tool State
//!
//! The active tool and the two-click draw gesture.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What a primary click does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Draw,
    Select,
    Delete,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Draw, Tool::Select, Tool::Delete];

    /// Parse a host-side tool name (`"draw"`, `"select"`, `"delete"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "draw" => Some(Tool::Draw),
            "select" => Some(Tool::Select),
            "delete" => Some(Tool::Delete),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Draw => "draw",
            Tool::Select => "select",
            Tool::Delete => "delete",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tool::Draw => "Draw",
            Tool::Select => "Select",
            Tool::Delete => "Delete",
        };
        f.write_str(label)
    }
}

/// Progress of a draw gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DrawGesture {
    #[default]
    Idle,
    /// First point placed, waiting for the second.
    Pending { anchor: Vec2 },
}

impl DrawGesture {
    pub fn anchor(&self) -> Option<Vec2> {
        match self {
            DrawGesture::Idle => None,
            DrawGesture::Pending { anchor } => Some(*anchor),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, DrawGesture::Pending { .. })
    }
}

/// Current tool plus the gesture it may be in the middle of.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ToolState {
    tool: Tool,
    gesture: DrawGesture,
}

impl ToolState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> DrawGesture {
        self.gesture
    }

    /// Enter `tool`. Always resets the gesture, even for the current tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.gesture = DrawGesture::Idle;
    }

    pub fn begin(&mut self, anchor: Vec2) {
        self.gesture = DrawGesture::Pending { anchor };
    }

    pub fn cancel(&mut self) {
        self.gesture = DrawGesture::Idle;
    }
}
