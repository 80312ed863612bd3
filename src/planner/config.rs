//! Viewer Configuration
//!
//! All tunables of the wall viewer, grouped per concern. Every field has a
//! default, so a config file only needs the values it changes:
//!
//! ```json
//! { "walls": { "height": 2.7 }, "grid": { "visible": false } }
//! ```
//!
//! The native binary loads the file named by `WALL_VIEWER_CONFIG` if set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::wall::WallAppearance;
use crate::camera::{ElevationViewConfig, PlanViewConfig};
use crate::error::ViewerError;
use crate::render::mesh::rgb_hex;
use crate::world::GridConfig;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "WALL_VIEWER_CONFIG";

/// Physical wall size and plan-view drawing sizes, in world units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallDimensions {
    /// Extrusion height in the elevation view.
    pub height: f32,
    pub thickness: f32,
    /// Width of the plan-view centre line.
    pub line_width: f32,
    /// Thickness of the plan-view footprint slab.
    pub footprint_depth: f32,
}

impl Default for WallDimensions {
    fn default() -> Self {
        Self {
            height: 3.0,
            thickness: 0.2,
            line_width: 0.08,
            footprint_depth: 0.01,
        }
    }
}

/// Colours per appearance class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallPalette {
    pub selected: [f32; 4],
    pub highlighted: [f32; 4],
    pub default: [f32; 4],
}

impl WallPalette {
    /// Gold walls on the plan: magenta when selected, cyan when hovered.
    pub fn plan() -> Self {
        Self {
            selected: rgb_hex(0xff00ff, 1.0),
            highlighted: rgb_hex(0x00ffff, 1.0),
            default: rgb_hex(0xffd700, 1.0),
        }
    }

    /// Grey boxes in elevation: blue when selected, light blue when hovered.
    pub fn elevation() -> Self {
        Self {
            selected: rgb_hex(0x2196f3, 1.0),
            highlighted: rgb_hex(0x90caf9, 1.0),
            default: rgb_hex(0x757575, 1.0),
        }
    }

    pub fn color(&self, appearance: WallAppearance) -> [f32; 4] {
        match appearance {
            WallAppearance::Selected => self.selected,
            WallAppearance::Highlighted => self.highlighted,
            WallAppearance::Default => self.default,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub walls: WallDimensions,
    pub plan_view: PlanViewConfig,
    pub elevation_view: ElevationViewConfig,
    pub grid: GridConfig,
    pub plan_palette: WallPalette,
    pub elevation_palette: WallPalette,
    /// Alpha of plan-view footprints; centre lines are opaque.
    pub footprint_opacity: f32,
    pub preview_color: [f32; 4],
    pub background: [f32; 4],
    /// World units kept free around the walls by zoom-to-fit.
    pub fit_padding: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            walls: WallDimensions::default(),
            plan_view: PlanViewConfig::default(),
            elevation_view: ElevationViewConfig::default(),
            grid: GridConfig::default(),
            plan_palette: WallPalette::plan(),
            elevation_palette: WallPalette::elevation(),
            footprint_opacity: 0.6,
            preview_color: rgb_hex(0xff0000, 1.0),
            background: rgb_hex(0xffffff, 1.0),
            fit_padding: 5.0,
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ViewerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ViewerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `WALL_VIEWER_CONFIG` when set. Unreadable or invalid files
    /// are reported and the defaults are used.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}
