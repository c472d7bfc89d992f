//! Room loading.
//!
//! ```text
//! name=Start
//! tileset=glyphs.txt
//! palette=gray.txt
//! w=2
//! h=2
//! offset_e=1
//! data=
//! 0 .
//! . 0
//! ```
//!
//! The grid is in hex. Every room cell must name a tile of the tileset and
//! every tile of the tileset must fit the palette.

use std::path::Path;
use std::rc::Rc;

use super::{
    check_grid, expect_end, missing_key, missing_terminal, parse_scalar, read_source,
    unexpected_key, EntityKind, Loader,
};
use crate::describe::Describe;
use crate::error::{AdventError, Result};
use crate::parser::Cursor;
use crate::types::{Offsets, Palette, Room, Tileset};

const KEYS: &[&str] = &[
    "name", "tileset", "palette", "w", "h", "offset_n", "offset_s", "offset_e", "offset_w", "data",
];

const ROOM_BASE: u32 = 16;

impl Loader {
    /// Load a room file with its tileset and palette.
    pub fn load_room(&self, path: &Path) -> Result<Room> {
        let source = read_source(path)?;
        self.parse_room(&source, path)
    }

    pub(crate) fn parse_room(&self, source: &str, path: &Path) -> Result<Room> {
        let mut cursor = Cursor::new(source);
        let mut name = String::new();
        let mut tileset: Option<Rc<Tileset>> = None;
        let mut palette: Option<Rc<Palette>> = None;
        let mut width: Option<usize> = None;
        let mut height: Option<usize> = None;
        let mut offsets = Offsets::default();

        loop {
            let item = self
                .next_item(&mut cursor, path)?
                .ok_or_else(|| missing_terminal(path, "data"))?;

            match item.key {
                "name" => name = item.value.to_string(),
                "tileset" => {
                    let loaded = self.load_reference(path, item.key, item.value, |p| {
                        self.load_tileset(p)
                    })?;
                    tileset = Some(Rc::new(loaded));
                }
                "palette" => {
                    let loaded = self.load_reference(path, item.key, item.value, |p| {
                        self.load_palette(p)
                    })?;
                    palette = Some(Rc::new(loaded));
                }
                "w" => width = Some(parse_scalar(path, &item)?),
                "h" => height = Some(parse_scalar(path, &item)?),
                "offset_n" => offsets.n = parse_scalar(path, &item)?,
                "offset_s" => offsets.s = parse_scalar(path, &item)?,
                "offset_e" => offsets.e = parse_scalar(path, &item)?,
                "offset_w" => offsets.w = parse_scalar(path, &item)?,
                "data" => break,
                _ => return Err(unexpected_key(path, &item, KEYS)),
            }
        }

        let tileset = tileset.ok_or_else(|| missing_key(path, "tileset", "data"))?;
        let palette = palette.ok_or_else(|| missing_key(path, "palette", "data"))?;
        let width = width.ok_or_else(|| missing_key(path, "w", "data"))?;
        let height = height.ok_or_else(|| missing_key(path, "h", "data"))?;

        let grid = self.read_grid(&mut cursor, path, width, height, ROOM_BASE)?;
        expect_end(path, &mut cursor)?;

        check_grid(path, &grid, tileset.len(), "room", "tileset")?;
        check_tiles_fit_palette(path, &tileset, &palette)?;

        let room = Room::new(name, path, tileset, palette, offsets, grid);
        self.log_loaded(EntityKind::Room, path, || room.describe().to_text());
        Ok(room)
    }
}

fn check_tiles_fit_palette(path: &Path, tileset: &Tileset, palette: &Palette) -> Result<()> {
    for (index, tile) in tileset.tiles().iter().enumerate() {
        tile.cells().check_bound(palette.len()).map_err(|e| {
            AdventError::range(
                path,
                format!(
                    "tile {} of tileset \"{}\" uses colour {} at ({}, {}), \
                     but palette \"{}\" has {} colours",
                    index, tileset.name, e.value, e.x, e.y, palette.name, e.bound
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::fixtures;
    use crate::types::Colour;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_room() {
        let dir = tempdir().unwrap();
        let path = fixtures::write_room_set(dir.path());

        let room = Loader::default().load_room(&path).unwrap();
        assert_eq!(room.name, "Start");
        assert_eq!((room.width(), room.height()), (2, 2));
        assert_eq!(room.offsets, Offsets { e: 1, ..Offsets::default() });
        assert_eq!(room.grid().get(0, 0), Some(0));
        assert_eq!(room.grid().get(1, 0), None);
        assert_eq!(room.tileset().name, "Solid");
        assert_eq!(room.palette().colour(1), Some(Colour::WHITE));
    }

    #[test]
    fn test_room_grid_is_hex() {
        let dir = tempdir().unwrap();
        fixtures::write(dir.path(), "gray.txt", fixtures::GRAY_PALETTE);
        let tiles = (0..11).map(|_| "data=\n0\n").collect::<String>();
        fixtures::write(
            dir.path(),
            "many.txt",
            &format!("tile_w=1\ntile_h=1\nlen=11\ntiles=\n{}", tiles),
        );
        let path = fixtures::write(
            dir.path(),
            "room.txt",
            "tileset=many.txt\npalette=gray.txt\nw=1\nh=1\ndata=\nA\n",
        );

        let room = Loader::default().load_room(&path).unwrap();
        assert_eq!(room.grid().get(0, 0), Some(10));
    }

    #[test]
    fn test_cell_past_tileset_is_range_error() {
        let dir = tempdir().unwrap();
        fixtures::write_room_set(dir.path());
        let path = fixtures::write(
            dir.path(),
            "bad.txt",
            "tileset=solid.txt\npalette=gray.txt\nw=1\nh=1\ndata=\n1\n",
        );

        let err = Loader::default().load_room(&path).unwrap_err();
        assert!(matches!(err, AdventError::Range { .. }));
    }

    #[test]
    fn test_tile_past_palette_is_range_error() {
        let dir = tempdir().unwrap();
        fixtures::write(dir.path(), "gray.txt", fixtures::GRAY_PALETTE);
        fixtures::write(dir.path(), "glyphs.txt", fixtures::GLYPH_TILESET);
        let path = fixtures::write(
            dir.path(),
            "room.txt",
            "tileset=glyphs.txt\npalette=gray.txt\nw=1\nh=1\ndata=\n0\n",
        );

        let err = Loader::default().load_room(&path).unwrap_err();
        match err {
            AdventError::Range { message, .. } => assert!(message.contains("colour 10")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_tileset_reference_wraps_io_error() {
        let dir = tempdir().unwrap();
        fixtures::write(dir.path(), "gray.txt", fixtures::GRAY_PALETTE);
        let path = fixtures::write(
            dir.path(),
            "room.txt",
            "tileset=nowhere.txt\npalette=gray.txt\nw=1\nh=1\ndata=\n0\n",
        );

        let err = Loader::default().load_room(&path).unwrap_err();
        match &err {
            AdventError::Reference { key, target, .. } => {
                assert_eq!(key, "tileset");
                assert_eq!(target, &dir.path().join("nowhere.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(err.root_cause(), AdventError::Io { .. }));
    }

    #[test]
    fn test_missing_dimensions() {
        let dir = tempdir().unwrap();
        fixtures::write_room_set(dir.path());
        let path = fixtures::write(
            dir.path(),
            "room.txt",
            "tileset=solid.txt\npalette=gray.txt\nw=1\ndata=\n0\n",
        );

        let err = Loader::default().load_room(&path).unwrap_err();
        assert!(err.to_string().contains("\"h\""));
    }

    #[test]
    fn test_trailing_row_is_schema_error() {
        let dir = tempdir().unwrap();
        fixtures::write_room_set(dir.path());
        let path = fixtures::write(
            dir.path(),
            "room.txt",
            "tileset=solid.txt\npalette=gray.txt\nw=1\nh=1\ndata=\n0\n0\n",
        );

        let err = Loader::default().load_room(&path).unwrap_err();
        assert!(matches!(err, AdventError::Schema { .. }));
    }

    #[test]
    fn test_negative_offsets() {
        let dir = tempdir().unwrap();
        fixtures::write_room_set(dir.path());
        let path = fixtures::write(
            dir.path(),
            "room.txt",
            "tileset=solid.txt\npalette=gray.txt\noffset_n=-3\nw=1\nh=1\ndata=\n.\n",
        );

        let room = Loader::default().load_room(&path).unwrap();
        assert_eq!(room.offsets.n, -3);
    }

    #[test]
    fn test_empty_reference() {
        let dir = tempdir().unwrap();
        let path = fixtures::write(dir.path(), "room.txt", "tileset=\nw=1\nh=1\ndata=\n0\n");

        let err = Loader::default().load_room(&path).unwrap_err();
        assert!(err.to_string().contains("empty path"));
    }
}
