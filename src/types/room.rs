//! Room type: a playable grid of tiles.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{Grid, Palette, Tileset};

/// Exit alignment offsets, one per edge.
///
/// For the north and south edges the offset is the x position treated as
/// zero when lining the room up with its neighbour; for east and west it is
/// the y position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offsets {
    pub n: i32,
    pub s: i32,
    pub e: i32,
    pub w: i32,
}

/// A room: a grid of tileset indices drawn with a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,

    path: PathBuf,

    tileset: Rc<Tileset>,
    palette: Rc<Palette>,

    pub offsets: Offsets,

    grid: Grid,
}

impl Room {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        tileset: Rc<Tileset>,
        palette: Rc<Palette>,
        offsets: Offsets,
        grid: Grid,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            tileset,
            palette,
            offsets,
            grid,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tileset(&self) -> &Rc<Tileset> {
        &self.tileset
    }

    pub fn palette(&self) -> &Rc<Palette> {
        &self.palette
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Width in tiles.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Height in tiles.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Size of the room in tile cells (tiles times tile size), or `None`
    /// when that does not fit in a `usize`.
    pub fn cell_size(&self) -> Option<(usize, usize)> {
        Some((
            self.width().checked_mul(self.tileset.tile_w)?,
            self.height().checked_mul(self.tileset.tile_h)?,
        ))
    }
}
