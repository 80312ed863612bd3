//! Wall Model
//!
//! A wall is one drawn segment on the plan ground. Its endpoints, length and
//! angle are fixed at creation; only the selection and highlight flags
//! change afterwards.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::Serialize;

use super::geometry;

/// Unique wall identifier. Displays and serializes as `wall_<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct WallId(pub u64);

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wall_{}", self.0)
    }
}

impl From<WallId> for String {
    fn from(id: WallId) -> Self {
        id.to_string()
    }
}

/// Error for strings that are not `wall_<n>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid wall id `{0}`")]
pub struct ParseWallIdError(pub String);

impl FromStr for WallId {
    type Err = ParseWallIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("wall_")
            .and_then(|n| n.parse::<u64>().ok())
            .map(WallId)
            .ok_or_else(|| ParseWallIdError(s.to_string()))
    }
}

/// Colour class of a wall, by precedence selected > highlighted > default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallAppearance {
    Selected,
    Highlighted,
    Default,
}

/// One drawn wall.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Wall {
    id: WallId,
    start: Vec2,
    end: Vec2,
    length: f32,
    angle: f32,
    selected: bool,
    highlighted: bool,
}

impl Wall {
    /// Build a wall; length and angle are derived here and never change.
    pub(crate) fn new(id: WallId, start: Vec2, end: Vec2) -> Self {
        Self {
            id,
            start,
            end,
            length: geometry::distance(start, end),
            angle: geometry::angle(start, end),
            selected: false,
            highlighted: false,
        }
    }

    pub fn id(&self) -> WallId {
        self.id
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Radians, `atan2(end.y - start.y, end.x - start.x)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn midpoint(&self) -> Vec2 {
        geometry::midpoint(self.start, self.end)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn appearance(&self) -> WallAppearance {
        if self.selected {
            WallAppearance::Selected
        } else if self.highlighted {
            WallAppearance::Highlighted
        } else {
            WallAppearance::Default
        }
    }
}

/// Count and total length of the current walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct WallSummary {
    pub count: usize,
    pub total_length: f32,
}

impl WallSummary {
    pub fn of(walls: &[Wall]) -> Self {
        Self {
            count: walls.len(),
            // f32 sum() starts from -0.0, which would print as "-0.00m"
            total_length: walls.iter().fold(0.0, |acc, w| acc + w.length()),
        }
    }
}

impl fmt::Display for WallSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.count == 1 { "wall" } else { "walls" };
        write!(f, "{} {}, {:.2}m", self.count, noun, self.total_length)
    }
}
