//! Planner Module
//!
//! Wall drawing and inspection on top of the engine: the wall model and
//! registry, per-view scenes kept in sync with it, picking, the tool state
//! machine, and the [`Viewer`] that ties them together.

pub mod command;
pub mod config;
pub mod geometry;
pub mod picking;
pub mod registry;
pub mod scene;
pub mod tool;
pub mod view_sync;
pub mod viewer;
pub mod wall;

pub use command::{
    control_active, wall_details_html, wall_list_html, ViewerCommand, CONTROL_IDS,
    WALL_ID_ATTRIBUTE,
};
pub use config::{ViewerConfig, WallDimensions, WallPalette, CONFIG_ENV_VAR};
pub use geometry::{Bounds2, MIN_WALL_LENGTH};
pub use picking::{pick_ground, pick_wall, PickResult};
pub use registry::{WallListener, WallRegistry};
pub use scene::{ObjectHandle, ObjectKind, Scene, SceneHit, SceneObject};
pub use tool::{DrawGesture, Tool, ToolState};
pub use view_sync::{ViewKind, ViewSynchronizer};
pub use viewer::Viewer;
pub use wall::{ParseWallIdError, Wall, WallAppearance, WallId, WallSummary};
