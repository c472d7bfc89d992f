//! Resource loader - turns definition files into the resource model.
//!
//! Each entity type has its own key schema; all share the same loop:
//! read the whole file, read items until the terminal key that starts the
//! bulk payload, then read the payload sized by the scalars seen so far.
//! References (`tileset=`, `palette=`, the `rooms=` list) are loaded
//! recursively with the same loader. Nothing is cached: every reference
//! is read again.
//!
//! # Example
//!
//! ```ignore
//! use advent::loader::load_map;
//!
//! let map = load_map("data/map0.txt")?;
//! println!("{} has {} rooms", map.name, map.rooms().len());
//! ```

mod map;
mod palette;
mod room;
mod sprite;
mod tileset;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};

use crate::config::{DebugLevels, Settings};
use crate::error::{AdventError, Result};
use crate::parser::{Cursor, Item};
use crate::types::{Grid, Map, Palette, Room, Tileset};
use crate::world::Sprite;

/// Options for loading definition files.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Directory references resolve against; `None` means the directory of
    /// the referencing file.
    pub root: Option<PathBuf>,
    /// Debug verbosity for parsing and loading.
    pub debug: DebugLevels,
}

impl LoadOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            root: settings.root.clone(),
            debug: settings.debug,
        }
    }
}

/// The kinds of definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Palette,
    Tileset,
    Room,
    Map,
    Sprite,
}

impl EntityKind {
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Palette => "palette",
            EntityKind::Tileset => "tileset",
            EntityKind::Room => "room",
            EntityKind::Map => "map",
            EntityKind::Sprite => "sprite",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any loaded entity, for callers that do not know the kind up front.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Palette(Palette),
    Tileset(Tileset),
    Room(Room),
    Map(Map),
    Sprite(Sprite),
}

impl Loaded {
    pub fn kind(&self) -> EntityKind {
        match self {
            Loaded::Palette(_) => EntityKind::Palette,
            Loaded::Tileset(_) => EntityKind::Tileset,
            Loaded::Room(_) => EntityKind::Room,
            Loaded::Map(_) => EntityKind::Map,
            Loaded::Sprite(_) => EntityKind::Sprite,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Loaded::Palette(p) => &p.name,
            Loaded::Tileset(t) => &t.name,
            Loaded::Room(r) => &r.name,
            Loaded::Map(m) => &m.name,
            Loaded::Sprite(s) => &s.name,
        }
    }
}

/// Guess the entity kind of a source from the keys it uses.
///
/// Only keys are inspected; the file is not validated.
pub fn detect_kind(source: &str) -> Option<EntityKind> {
    let mut cursor = Cursor::new(source);
    let mut has_reference = false;

    while let Ok(Some(item)) = cursor.read_item() {
        match item.key {
            "colors" => return Some(EntityKind::Palette),
            "tiles" | "tile_w" | "tile_h" => return Some(EntityKind::Tileset),
            "rooms" | "entrance_x" | "entrance_y" => return Some(EntityKind::Map),
            "palette" | "offset_n" | "offset_s" | "offset_e" | "offset_w" => {
                return Some(EntityKind::Room)
            }
            "tileset" => has_reference = true,
            "data" if has_reference => return Some(EntityKind::Room),
            "data" => return Some(EntityKind::Map),
            "frame" | "cpu" => return Some(EntityKind::Sprite),
            _ => {}
        }
    }

    has_reference.then_some(EntityKind::Sprite)
}

/// Load a map and everything it references, with default options.
pub fn load_map(path: impl AsRef<Path>) -> Result<Map> {
    Loader::default().load_map(path.as_ref())
}

/// Loads definition files into the resource model.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: LoadOptions,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load a file of any kind, detecting the kind from its keys.
    pub fn load_any(&self, path: &Path) -> Result<Loaded> {
        let source = read_source(path)?;
        let kind = detect_kind(&source).ok_or_else(|| AdventError::Schema {
            path: path.to_path_buf(),
            message: "cannot tell what kind of definition this is".to_string(),
            help: Some(
                "Palettes end in colors=, tilesets in tiles=, rooms and maps in data=".to_string(),
            ),
        })?;

        Ok(match kind {
            EntityKind::Palette => Loaded::Palette(self.parse_palette(&source, path)?),
            EntityKind::Tileset => Loaded::Tileset(self.parse_tileset(&source, path)?),
            EntityKind::Room => Loaded::Room(self.parse_room(&source, path)?),
            EntityKind::Map => Loaded::Map(self.parse_map(&source, path)?),
            EntityKind::Sprite => Loaded::Sprite(self.parse_sprite(&source, path)?),
        })
    }

    /// Read the next item, logging it at the parse debug level.
    fn next_item<'a>(&self, cursor: &mut Cursor<'a>, path: &Path) -> Result<Option<Item<'a>>> {
        let item = cursor.read_item().map_err(|e| e.in_file(path))?;
        if let Some(item) = &item {
            if self.options.debug.parse >= 1 {
                debug!(
                    "Parsed: {}={} ({}:{})",
                    item.key,
                    item.value,
                    path.display(),
                    item.location
                );
            }
        }
        Ok(item)
    }

    /// Read a grid payload and convert it into the model.
    fn read_grid(
        &self,
        cursor: &mut Cursor<'_>,
        path: &Path,
        width: usize,
        height: usize,
        base: u32,
    ) -> Result<Grid> {
        let raw = cursor
            .read_int_grid(width, height, base)
            .map_err(|e| e.in_file(path))?;

        if self.options.debug.parse >= 2 {
            debug!("Parsed grid {}x{} (base {}): {:?}", width, height, base, raw);
        }

        Grid::from_raw(width, height, &raw).ok_or_else(|| {
            AdventError::schema(path, format!("grid does not hold {}x{} cells", width, height))
        })
    }

    /// Resolve a referenced path.
    fn resolve(&self, referrer: &Path, value: &str) -> PathBuf {
        let target = Path::new(value.trim());
        if target.is_absolute() {
            return target.to_path_buf();
        }
        match &self.options.root {
            Some(root) => root.join(target),
            None => referrer
                .parent()
                .map(|dir| dir.join(target))
                .unwrap_or_else(|| target.to_path_buf()),
        }
    }

    /// Load a referenced file, wrapping any failure with the reference.
    fn load_reference<T>(
        &self,
        referrer: &Path,
        key: &str,
        value: &str,
        load: impl FnOnce(&Path) -> Result<T>,
    ) -> Result<T> {
        if value.trim().is_empty() {
            return Err(AdventError::schema(referrer, format!("key \"{}\" has an empty path", key)));
        }

        let target = self.resolve(referrer, value);
        load(&target).map_err(|source| AdventError::Reference {
            path: referrer.to_path_buf(),
            key: key.to_string(),
            target,
            source: Box::new(source),
        })
    }

    fn log_loaded(&self, kind: EntityKind, path: &Path, dump: impl FnOnce() -> String) {
        info!("Loaded {}: {}", kind, path.display());
        if self.options.debug.load >= 1 {
            debug!("{}", dump());
        }
    }
}

/// Read a whole definition file.
fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AdventError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse an item's value as a scalar.
fn parse_scalar<T: FromStr>(path: &Path, item: &Item<'_>) -> Result<T> {
    item.value.trim().parse().map_err(|_| AdventError::Schema {
        path: path.to_path_buf(),
        message: format!(
            "invalid value \"{}\" for key \"{}\" at {}",
            item.value, item.key, item.location
        ),
        help: None,
    })
}

fn unexpected_key(path: &Path, item: &Item<'_>, expected: &[&str]) -> AdventError {
    AdventError::Schema {
        path: path.to_path_buf(),
        message: format!("unexpected key \"{}\" at {}", item.key, item.location),
        help: Some(format!("Expected one of: {}", expected.join(", "))),
    }
}

fn missing_key(path: &Path, key: &str, before: &str) -> AdventError {
    AdventError::Schema {
        path: path.to_path_buf(),
        message: format!("missing key \"{}\" before \"{}\"", key, before),
        help: Some(format!("Declare {}= above {}=", key, before)),
    }
}

fn missing_terminal(path: &Path, terminal: &str) -> AdventError {
    AdventError::schema(path, format!("expected key \"{}\" before end of input", terminal))
}

/// Require that only whitespace and comments follow the payload.
fn expect_end(path: &Path, cursor: &mut Cursor<'_>) -> Result<()> {
    cursor.skip_insignificant(true, true);
    if cursor.is_at_end() {
        return Ok(());
    }
    Err(AdventError::Schema {
        path: path.to_path_buf(),
        message: format!("unexpected content at {}", cursor.location()),
        help: Some("The payload is longer than its declared size".to_string()),
    })
}

/// Check every filled cell of a grid against the length of its target.
fn check_grid(path: &Path, grid: &Grid, bound: usize, what: &str, target: &str) -> Result<()> {
    grid.check_bound(bound).map_err(|e| {
        AdventError::range(
            path,
            format!(
                "{} cell {} at ({}, {}) exceeds {} length {}",
                what, e.value, e.x, e.y, target, e.bound
            ),
        )
    })
}
