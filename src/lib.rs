//! advent - tiled 2D world definitions
//!
//! A library for loading palettes, tilesets, rooms, maps and sprites from
//! line-oriented text definition files, rendering rooms onto a canvas, and
//! driving sprites through a map on a fixed tick.

pub mod cli;
pub mod config;
pub mod describe;
pub mod error;
pub mod loader;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod world;

pub use config::{DebugLevels, Settings};
pub use describe::{describe, Describe, Node};
pub use error::{AdventError, Result};
pub use loader::{detect_kind, load_map, EntityKind, LoadOptions, Loaded, Loader};
pub use render::{write_png, Canvas, Compositor, ImageCanvas, Rect};
pub use types::{Colour, Grid, Map, Offsets, Palette, Room, Tile, Tileset};
pub use world::{Action, Controller, InputEvent, Key, Sprite, SpriteId, World};
