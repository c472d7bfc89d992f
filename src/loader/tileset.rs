//! Tileset loading.
//!
//! After `tiles=` come `len` tiles, each introduced by `data=` and
//! followed by a `tile_w` x `tile_h` grid of hex palette indices:
//!
//! ```text
//! name=Glyphs
//! tile_w=2
//! tile_h=2
//! len=1
//! tiles=
//! data=
//! A .
//! . A
//! ```

use std::path::Path;

use super::{
    expect_end, missing_key, missing_terminal, parse_scalar, read_source, unexpected_key,
    EntityKind, Loader,
};
use crate::describe::Describe;
use crate::error::{AdventError, Result};
use crate::parser::Cursor;
use crate::types::{Tile, Tileset};

const KEYS: &[&str] = &["name", "tile_w", "tile_h", "len", "tiles"];

const TILE_BASE: u32 = 16;

impl Loader {
    /// Load a tileset file.
    pub fn load_tileset(&self, path: &Path) -> Result<Tileset> {
        let source = read_source(path)?;
        self.parse_tileset(&source, path)
    }

    pub(crate) fn parse_tileset(&self, source: &str, path: &Path) -> Result<Tileset> {
        let mut cursor = Cursor::new(source);
        let mut name = String::new();
        let mut tile_w: Option<usize> = None;
        let mut tile_h: Option<usize> = None;
        let mut len: Option<usize> = None;

        loop {
            let item = self
                .next_item(&mut cursor, path)?
                .ok_or_else(|| missing_terminal(path, "tiles"))?;

            match item.key {
                "name" => name = item.value.to_string(),
                "tile_w" => tile_w = Some(parse_scalar(path, &item)?),
                "tile_h" => tile_h = Some(parse_scalar(path, &item)?),
                "len" => len = Some(parse_scalar(path, &item)?),
                "tiles" => break,
                _ => return Err(unexpected_key(path, &item, KEYS)),
            }
        }

        let tile_w = tile_w.ok_or_else(|| missing_key(path, "tile_w", "tiles"))?;
        let tile_h = tile_h.ok_or_else(|| missing_key(path, "tile_h", "tiles"))?;
        let len = len.ok_or_else(|| missing_key(path, "len", "tiles"))?;

        let tiles = (0..len)
            .map(|index| self.parse_tile(&mut cursor, path, index, tile_w, tile_h))
            .collect::<Result<Vec<_>>>()?;
        expect_end(path, &mut cursor)?;

        let tileset = Tileset::new(name, path, tile_w, tile_h, tiles);
        self.log_loaded(EntityKind::Tileset, path, || tileset.describe().to_text());
        Ok(tileset)
    }

    fn parse_tile(
        &self,
        cursor: &mut Cursor<'_>,
        path: &Path,
        index: usize,
        tile_w: usize,
        tile_h: usize,
    ) -> Result<Tile> {
        match self.next_item(cursor, path)? {
            Some(item) if item.key == "data" => {}
            Some(item) => return Err(unexpected_key(path, &item, &["data"])),
            None => {
                return Err(AdventError::schema(
                    path,
                    format!("expected \"data\" for tile {} at {}", index, cursor.location()),
                ))
            }
        }

        let cells = self.read_grid(cursor, path, tile_w, tile_h, TILE_BASE)?;
        Ok(Tile::new(cells))
    }
}
