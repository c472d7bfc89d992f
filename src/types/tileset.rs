//! Tiles and the tilesets that own them.

use std::path::{Path, PathBuf};

use super::Grid;

/// A tile: a grid of palette indices sized by its tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    cells: Grid,
}

impl Tile {
    pub fn new(cells: Grid) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }
}

/// An ordered list of tiles sharing the same dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    pub name: String,

    path: PathBuf,

    /// Tile width in cells.
    pub tile_w: usize,

    /// Tile height in cells.
    pub tile_h: usize,

    tiles: Vec<Tile>,
}

impl Tileset {
    /// Create a tileset. Every tile must be `tile_w` x `tile_h`.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        tile_w: usize,
        tile_h: usize,
        tiles: Vec<Tile>,
    ) -> Self {
        debug_assert!(tiles
            .iter()
            .all(|t| t.cells.width() == tile_w && t.cells.height() == tile_h));

        Self {
            name: name.into(),
            path: path.into(),
            tile_w,
            tile_h,
            tiles,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a tile by tileset index.
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile dimensions as (width, height) in cells.
    pub fn tile_size(&self) -> (usize, usize) {
        (self.tile_w, self.tile_h)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::NONE;

    #[test]
    fn test_tile_lookup() {
        let tile = Tile::new(Grid::from_raw(2, 2, &[10, NONE, NONE, 10]).unwrap());
        let tileset = Tileset::new("glyphs", "glyphs.txt", 2, 2, vec![tile.clone()]);

        assert_eq!(tileset.len(), 1);
        assert_eq!(tileset.tile(0), Some(&tile));
        assert!(tileset.tile(1).is_none());
        assert_eq!(tileset.tile_size(), (2, 2));
    }
}
