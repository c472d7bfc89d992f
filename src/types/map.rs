//! Map type: rooms laid out on a grid.
//!
//! A map owns its rooms and places them with a grid of room indices. The
//! same room may appear in several cells; empty cells have no room.
//!
//! # Example
//!
//! ```text
//! name=Overworld
//! len=2
//! w=3
//! h=2
//! entrance_x=0
//! entrance_y=0
//! rooms=
//! data/room0.txt
//! data/room1.txt
//! data=
//! 0 1 .
//! . 1 1
//! ```

use std::path::{Path, PathBuf};

use super::{Grid, Room};

/// A map definition: owned rooms and their placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    /// Map name.
    pub name: String,

    path: PathBuf,

    rooms: Vec<Room>,

    /// Room placement (cells index into `rooms`).
    grid: Grid,

    /// Coordinates of the initial room.
    pub entrance: (usize, usize),
}

impl Map {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        rooms: Vec<Room>,
        grid: Grid,
        entrance: (usize, usize),
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            rooms,
            grid,
            entrance,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Width of the map in rooms.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Height of the map in rooms.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Room index at the given map coordinate. Coordinates are signed so
    /// callers can look up neighbours off the edge.
    pub fn room_index_at(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.grid.get(x, y)
    }

    /// Room at the given map coordinate, if any.
    pub fn room_at(&self, x: i64, y: i64) -> Option<&Room> {
        self.room_index_at(x, y).and_then(|i| self.rooms.get(i))
    }

    /// The room at the entrance coordinate.
    pub fn entrance_room(&self) -> Option<&Room> {
        let (x, y) = self.entrance;
        self.room_at(x as i64, y as i64)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::parser::NONE;
    use crate::types::{Colour, Offsets, Palette, Tile, Tileset};

    fn room(name: &str) -> Room {
        let tileset = Rc::new(Tileset::new("t", "t.txt", 1, 1, vec![Tile::new(Grid::empty(1, 1))]));
        let palette = Rc::new(Palette::new("p", "p.txt", vec![Colour::BLACK]));
        let grid = Grid::empty(1, 1);
        Room::new(name, format!("{name}.txt"), tileset, palette, Offsets::default(), grid)
    }

    fn sample_map() -> Map {
        let grid = Grid::from_raw(3, 2, &[0, 1, NONE, NONE, 1, 1]).unwrap();
        Map::new("overworld", "map.txt", vec![room("a"), room("b")], grid, (0, 0))
    }

    #[test]
    fn test_room_at() {
        let map = sample_map();

        assert_eq!(map.room_at(0, 0).map(|r| r.name.as_str()), Some("a"));
        assert_eq!(map.room_at(1, 1).map(|r| r.name.as_str()), Some("b"));
        assert!(map.room_at(2, 0).is_none());
    }

    #[test]
    fn test_room_at_off_the_edge() {
        let map = sample_map();

        assert!(map.room_at(-1, 0).is_none());
        assert!(map.room_at(0, -1).is_none());
        assert!(map.room_at(3, 0).is_none());
        assert!(map.room_at(0, 2).is_none());
    }

    #[test]
    fn test_entrance_room() {
        let map = sample_map();
        assert_eq!(map.entrance_room().map(|r| r.name.as_str()), Some("a"));
        assert_eq!((map.width(), map.height()), (3, 2));
    }
}
