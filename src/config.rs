//! Session settings (advent.yaml) parsing.
//!
//! Settings cover screen geometry, the tick period, where referenced files
//! are resolved from, per-subsystem debug levels and key bindings. Every
//! field has a default, so an empty or missing file is valid.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AdventError, Result};
use crate::types::Colour;
use crate::world::{Action, Key};

/// The name of the settings file looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "advent.yaml";

/// Debug verbosity per subsystem. Zero is quiet; higher values log more
/// through the `log` facade at debug/trace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugLevels {
    /// 1 logs every parsed item, 2 also every grid cell.
    pub parse: u8,
    /// 1 dumps every loaded entity.
    pub load: u8,
    /// 1 logs every rendered room.
    pub render: u8,
}

/// Session settings loaded from advent.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Device pixels per tile cell, horizontally.
    pub cell_w: u32,

    /// Device pixels per tile cell, vertically.
    pub cell_h: u32,

    /// View width in tile cells.
    pub view_w: u32,

    /// View height in tile cells.
    pub view_h: u32,

    /// Simulation tick period in milliseconds.
    pub tick_ms: u64,

    /// Directory references are resolved against. When unset, references
    /// resolve against the directory of the file that names them.
    pub root: Option<PathBuf>,

    /// Colour the canvas is cleared to before each frame.
    pub background: Colour,

    pub debug: DebugLevels,

    /// Key bindings overriding the defaults, by action.
    pub bindings: BTreeMap<Action, Key>,

    /// Key that ends the session when pressed.
    pub quit_key: Key,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_w: 4,
            cell_h: 4,
            view_w: 64,
            view_h: 64,
            tick_ms: 33,
            root: None,
            background: Colour::BLACK,
            debug: DebugLevels::default(),
            bindings: BTreeMap::new(),
            quit_key: Key::Escape,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AdventError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Load the given file, or `advent.yaml` from the working directory when
    /// it exists, or fall back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(SETTINGS_FILENAME);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse settings from a YAML string. `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config_error = |message: String| AdventError::Config {
            path: path.to_path_buf(),
            message,
        };

        // serde_yaml rejects an empty document for a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self =
            serde_yaml::from_str(content).map_err(|e| config_error(e.to_string()))?;

        if settings.cell_w == 0 || settings.cell_h == 0 {
            return Err(config_error("cell_w and cell_h must be at least 1".to_string()));
        }
        if settings.tick_ms == 0 {
            return Err(config_error("tick_ms must be at least 1".to_string()));
        }

        Ok(settings)
    }

    /// Screen size in device pixels.
    pub fn screen_size(&self) -> (u32, u32) {
        (self.cell_w * self.view_w, self.cell_h * self.view_h)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
