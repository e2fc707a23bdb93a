use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::window::{Point, Viewport};

/// Desktop layout constants. Every field has a default, so an empty or
/// missing `desktop.toml` gives the stock layout.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct DesktopConfig {
    /// Position of the first window opened on an empty desktop
    #[serde(default = "default_cascade_base")]
    pub cascade_base: Point,
    /// Offset added per already-open window
    #[serde(default = "default_cascade_step")]
    pub cascade_step: Point,
    /// Distance in pixels within which a dragged window clamps to an edge
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f64,
    #[serde(default = "default_taskbar_height")]
    pub taskbar_height: f64,
    /// Assumed until the frontend reports its real size
    #[serde(default = "default_viewport")]
    pub initial_viewport: Viewport,
}

fn default_cascade_base() -> Point {
    Point::new(100.0, 60.0)
}

fn default_cascade_step() -> Point {
    Point::new(30.0, 30.0)
}

fn default_snap_threshold() -> f64 {
    25.0
}

fn default_taskbar_height() -> f64 {
    56.0
}

fn default_viewport() -> Viewport {
    Viewport::new(1280.0, 800.0)
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            cascade_base: default_cascade_base(),
            cascade_step: default_cascade_step(),
            snap_threshold: default_snap_threshold(),
            taskbar_height: default_taskbar_height(),
            initial_viewport: default_viewport(),
        }
    }
}

impl DesktopConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read the config at `path`, falling back to defaults if there is none
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no desktop config, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}
