//! Core domain types for advent.
//!
//! Everything here is plain data populated by the loader:
//! - `Colour` - opaque RGB values
//! - `Grid` - fixed-size grids of optional indices
//! - `Palette`, `Tile`, `Tileset` - indexed colours and glyphs
//! - `Room`, `Map` - the playable layout

mod colour;
mod grid;
mod map;
mod palette;
mod room;
mod tileset;

pub use colour::Colour;
pub use grid::{Grid, OutOfRange};
pub use map::Map;
pub use palette::Palette;
pub use room::{Offsets, Room};
pub use tileset::{Tile, Tileset};
