//! Map loading.
//!
//! A map has two payloads, `rooms=` (a list of `len` room paths, one per
//! line) and `data=` (a `w` x `h` decimal grid of room indices), in either
//! order. The sizes must be declared before the payload that uses them and
//! cannot change once either payload has been read.
//!
//! ```text
//! name=Overworld
//! len=2
//! w=2
//! h=1
//! rooms=
//! room0.txt
//! room1.txt
//! data=
//! 0 1
//! ```

use std::path::Path;

use super::{check_grid, missing_key, parse_scalar, read_source, unexpected_key, EntityKind, Loader};
use crate::describe::Describe;
use crate::error::{AdventError, Result};
use crate::parser::Cursor;
use crate::types::{Grid, Map, Room};

const KEYS: &[&str] = &["name", "len", "w", "h", "entrance_x", "entrance_y", "rooms", "data"];

const MAP_BASE: u32 = 10;

impl Loader {
    /// Load a map file with all of its rooms.
    pub fn load_map(&self, path: &Path) -> Result<Map> {
        let source = read_source(path)?;
        self.parse_map(&source, path)
    }

    pub(crate) fn parse_map(&self, source: &str, path: &Path) -> Result<Map> {
        let mut cursor = Cursor::new(source);
        let mut name = String::new();
        let mut len: Option<usize> = None;
        let mut width: Option<usize> = None;
        let mut height: Option<usize> = None;
        let mut entrance = (0usize, 0usize);
        let mut rooms: Option<Vec<Room>> = None;
        let mut grid: Option<Grid> = None;

        while let Some(item) = self.next_item(&mut cursor, path)? {
            let allocated = rooms.is_some() || grid.is_some();

            match item.key {
                "name" => name = item.value.to_string(),
                "len" | "w" | "h" if allocated => {
                    return Err(AdventError::Schema {
                        path: path.to_path_buf(),
                        message: format!(
                            "key \"{}\" at {} comes after a payload",
                            item.key, item.location
                        ),
                        help: Some("Declare len, w and h above rooms= and data=".to_string()),
                    });
                }
                "len" => len = Some(parse_scalar(path, &item)?),
                "w" => width = Some(parse_scalar(path, &item)?),
                "h" => height = Some(parse_scalar(path, &item)?),
                "entrance_x" => entrance.0 = parse_scalar(path, &item)?,
                "entrance_y" => entrance.1 = parse_scalar(path, &item)?,
                "rooms" | "data" if payload_seen(item.key, &rooms, &grid) => {
                    return Err(AdventError::schema(
                        path,
                        format!("duplicate key \"{}\" at {}", item.key, item.location),
                    ));
                }
                "rooms" => {
                    let len = len.ok_or_else(|| missing_key(path, "len", "rooms"))?;
                    rooms = Some(self.read_room_list(&mut cursor, path, len)?);
                }
                "data" => {
                    let width = width.ok_or_else(|| missing_key(path, "w", "data"))?;
                    let height = height.ok_or_else(|| missing_key(path, "h", "data"))?;
                    grid = Some(self.read_grid(&mut cursor, path, width, height, MAP_BASE)?);
                }
                _ => return Err(unexpected_key(path, &item, KEYS)),
            }
        }

        if !cursor.is_at_end() {
            return Err(AdventError::schema(
                path,
                format!("unexpected content at {}", cursor.location()),
            ));
        }

        let rooms = rooms.ok_or_else(|| AdventError::schema(path, "missing key \"rooms\""))?;
        let grid = grid.ok_or_else(|| AdventError::schema(path, "missing key \"data\""))?;

        check_grid(path, &grid, rooms.len(), "map", "room list")?;

        if grid.get(entrance.0, entrance.1).is_none() {
            return Err(AdventError::Schema {
                path: path.to_path_buf(),
                message: format!(
                    "map entrance ({}, {}) does not resolve to a room",
                    entrance.0, entrance.1
                ),
                help: Some("Point entrance_x and entrance_y at a filled data cell".to_string()),
            });
        }

        let map = Map::new(name, path, rooms, grid, entrance);
        self.log_loaded(EntityKind::Map, path, || map.describe().to_text());
        Ok(map)
    }

    fn read_room_list(
        &self,
        cursor: &mut Cursor<'_>,
        path: &Path,
        len: usize,
    ) -> Result<Vec<Room>> {
        let mut rooms = Vec::new();
        for index in 0..len {
            let line = cursor.read_rest_of_line();
            if line.trim().is_empty() {
                return Err(AdventError::schema(
                    path,
                    format!("expected {} room paths, found {}", len, index),
                ));
            }
            rooms.push(self.load_reference(path, "rooms", line, |p| self.load_room(p))?);
        }
        Ok(rooms)
    }
}

fn payload_seen(key: &str, rooms: &Option<Vec<Room>>, grid: &Option<Grid>) -> bool {
    match key {
        "rooms" => rooms.is_some(),
        _ => grid.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::fixtures;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_map(dir: &Path, content: &str) -> PathBuf {
        fixtures::write_room_set(dir);
        fixtures::write(dir, "map.txt", content)
    }

    #[test]
    fn test_load_map() {
        let dir = tempdir().unwrap();
        let path = write_map(
            dir.path(),
            "name=World\nlen=1\nw=2\nh=2\nentrance_x=1\nentrance_y=1\n\
             rooms=\nroom0.txt\ndata=\n0 .\n. 0\n",
        );

        let map = Loader::default().load_map(&path).unwrap();
        assert_eq!(map.name, "World");
        assert_eq!(map.rooms().len(), 1);
        assert_eq!((map.width(), map.height()), (2, 2));
        assert_eq!(map.entrance, (1, 1));
        assert_eq!(map.entrance_room().map(|r| r.name.as_str()), Some("Start"));
    }

    #[test]
    fn test_data_before_rooms() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "w=1\nh=1\nlen=1\ndata=\n0\nrooms=\nroom0.txt\n");

        let map = Loader::default().load_map(&path).unwrap();
        assert_eq!(map.grid().get(0, 0), Some(0));
    }

    #[test]
    fn test_map_grid_is_decimal() {
        let dir = tempdir().unwrap();
        let rooms = "room0.txt\n".repeat(11);
        let path = write_map(
            dir.path(),
            &format!("len=11\nw=1\nh=1\nentrance_x=0\nrooms=\n{}data=\n10\n", rooms),
        );

        let map = Loader::default().load_map(&path).unwrap();
        assert_eq!(map.grid().get(0, 0), Some(10));
    }

    #[test]
    fn test_same_room_listed_twice_loads_twice() {
        let dir = tempdir().unwrap();
        let path = write_map(
            dir.path(),
            "len=2\nw=2\nh=1\nrooms=\nroom0.txt\nroom0.txt\ndata=\n0 1\n",
        );

        let map = Loader::default().load_map(&path).unwrap();
        assert_eq!(map.rooms()[0], map.rooms()[1]);
    }

    #[test]
    fn test_size_after_payload_is_schema_error() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "len=1\nrooms=\nroom0.txt\nw=1\nh=1\ndata=\n0\n");

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(matches!(err, AdventError::Schema { .. }));
        assert!(err.to_string().contains("\"w\""));
    }

    #[test]
    fn test_rooms_before_len() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "rooms=\nroom0.txt\nlen=1\n");

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(err.to_string().contains("\"len\""));
    }

    #[test]
    fn test_missing_data() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "len=1\nrooms=\nroom0.txt\n");

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(err.to_string().contains("\"data\""));
    }

    #[test]
    fn test_duplicate_data() {
        let dir = tempdir().unwrap();
        let path = write_map(
            dir.path(),
            "len=1\nw=1\nh=1\nrooms=\nroom0.txt\ndata=\n0\ndata=\n0\n",
        );

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_short_room_list() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "w=1\nh=1\ndata=\n0\nlen=2\nrooms=\nroom0.txt\n");

        // len after data is itself an error; put it first to reach the list
        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(matches!(err, AdventError::Schema { .. }));

        let path = write_map(dir.path(), "len=2\nw=1\nh=1\ndata=\n0\nrooms=\nroom0.txt\n");
        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(err.to_string().contains("expected 2 room paths, found 1"));
    }

    #[test]
    fn test_huge_room_count_is_schema_error() {
        let dir = tempdir().unwrap();
        let path = write_map(
            dir.path(),
            "len=100000000000000\nw=1\nh=1\ndata=\n0\nrooms=\nroom0.txt\n",
        );

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(matches!(err, AdventError::Schema { .. }));
        assert!(err.to_string().contains("expected 100000000000000 room paths, found 1"));
    }

    #[test]
    fn test_cell_past_room_list_is_range_error() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "len=1\nw=2\nh=1\nrooms=\nroom0.txt\ndata=\n0 1\n");

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(matches!(err, AdventError::Range { .. }));
    }

    #[test]
    fn test_entrance_on_empty_cell() {
        let dir = tempdir().unwrap();
        let path = write_map(
            dir.path(),
            "len=1\nw=2\nh=1\nentrance_x=1\nrooms=\nroom0.txt\ndata=\n0 .\n",
        );

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(err.to_string().contains("does not resolve to a room"));
    }

    #[test]
    fn test_entrance_outside_grid() {
        let dir = tempdir().unwrap();
        let path = write_map(
            dir.path(),
            "len=1\nw=1\nh=1\nentrance_y=4\nrooms=\nroom0.txt\ndata=\n0\n",
        );

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(matches!(err, AdventError::Schema { .. }));
    }

    #[test]
    fn test_broken_room_wraps_error_with_reference() {
        let dir = tempdir().unwrap();
        fixtures::write_room_set(dir.path());
        fixtures::write(
            dir.path(),
            "broken.txt",
            "tileset=solid.txt\npalette=gray.txt\nw=2\nh=1\ndata=\n0\n",
        );
        let path = fixtures::write(
            dir.path(),
            "map.txt",
            "len=1\nw=1\nh=1\nrooms=\nbroken.txt\ndata=\n0\n",
        );

        let err = Loader::default().load_map(&path).unwrap_err();
        match &err {
            AdventError::Reference { key, path: referrer, .. } => {
                assert_eq!(key, "rooms");
                assert_eq!(referrer, &path);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        match err.root_cause() {
            AdventError::Schema { path, .. } => assert_eq!(path, &dir.path().join("broken.txt")),
            other => panic!("unexpected root cause: {other:?}"),
        }
    }

    #[test]
    fn test_stray_payload_after_items() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "len=1\nw=1\nh=1\nrooms=\nroom0.txt\ndata=\n0\n7 7\n");

        let err = Loader::default().load_map(&path).unwrap_err();
        assert!(err.to_string().contains("unexpected content"));
    }

    #[test]
    fn test_load_twice_is_identical() {
        let dir = tempdir().unwrap();
        let path = write_map(dir.path(), "len=1\nw=1\nh=1\nrooms=\nroom0.txt\ndata=\n0\n");

        let loader = Loader::default();
        assert_eq!(loader.load_map(&path).unwrap(), loader.load_map(&path).unwrap());
    }
}
