//! Structured dumps of loaded entities.
//!
//! `describe` turns an entity into a tree of [`Node`]s. The tree can be
//! printed in the definition-file layout with [`Node::to_text`] or
//! serialized as JSON; nothing here writes anywhere.
//!
//! Tile grids are shown in hex and room and map grids in decimal, with `.`
//! for empty cells.

use serde::Serialize;

use crate::loader::Loaded;
use crate::types::{Grid, Map, Palette, Room, Tileset};
use crate::world::{Sprite, World};

/// One node of a describe tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// `key=value`
    Field { key: String, value: String },
    /// `key=` followed by indented children
    Group { key: String, children: Vec<Node> },
    /// A bare line, such as a grid row or a path
    Line { text: String },
}

impl Node {
    pub fn field(key: impl Into<String>, value: impl ToString) -> Self {
        Node::Field {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn group(key: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Group {
            key: key.into(),
            children,
        }
    }

    pub fn line(text: impl Into<String>) -> Self {
        Node::Line { text: text.into() }
    }

    /// Render as indented text. The children of a root group are printed
    /// at the left margin.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        match self {
            Node::Group { children, .. } => {
                for child in children {
                    child.write_text(&mut out, 0);
                }
            }
            other => other.write_text(&mut out, 0),
        }
        out
    }

    fn write_text(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Node::Field { key, value } => out.push_str(&format!("{indent}{key}={value}\n")),
            Node::Line { text } => out.push_str(&format!("{indent}{text}\n")),
            Node::Group { key, children } => {
                out.push_str(&format!("{indent}{key}=\n"));
                for child in children {
                    child.write_text(out, depth + 1);
                }
            }
        }
    }
}

/// Entities that can be described.
pub trait Describe {
    fn describe(&self) -> Node;
}

/// Describe any entity.
pub fn describe<T: Describe + ?Sized>(entity: &T) -> Node {
    entity.describe()
}

#[derive(Clone, Copy)]
enum Radix {
    Hex,
    Decimal,
}

fn grid_lines(grid: &Grid, radix: Radix) -> Vec<Node> {
    grid.rows()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match (cell, radix) {
                    (None, _) => ".".to_string(),
                    (Some(v), Radix::Hex) => format!("{:X}", v),
                    (Some(v), Radix::Decimal) => v.to_string(),
                })
                .collect();
            Node::line(cells.join(" "))
        })
        .collect()
}

impl Describe for Palette {
    fn describe(&self) -> Node {
        let colours = self
            .colours()
            .iter()
            .map(|c| Node::line(format!("{} {} {}", c.r, c.g, c.b)))
            .collect();

        Node::group(
            "palette",
            vec![
                Node::field("name", &self.name),
                Node::field("len", self.len()),
                Node::group("colors", colours),
            ],
        )
    }
}

impl Describe for Tileset {
    fn describe(&self) -> Node {
        let tiles = self
            .tiles()
            .iter()
            .map(|tile| Node::group("data", grid_lines(tile.cells(), Radix::Hex)))
            .collect();

        Node::group(
            "tileset",
            vec![
                Node::field("name", &self.name),
                Node::field("tile_w", self.tile_w),
                Node::field("tile_h", self.tile_h),
                Node::field("len", self.len()),
                Node::group("tiles", tiles),
            ],
        )
    }
}

impl Describe for Room {
    fn describe(&self) -> Node {
        Node::group(
            "room",
            vec![
                Node::field("name", &self.name),
                Node::field("tileset", self.tileset().path().display()),
                Node::field("palette", self.palette().path().display()),
                Node::field("w", self.width()),
                Node::field("h", self.height()),
                Node::field("offset_n", self.offsets.n),
                Node::field("offset_s", self.offsets.s),
                Node::field("offset_e", self.offsets.e),
                Node::field("offset_w", self.offsets.w),
                Node::group("data", grid_lines(self.grid(), Radix::Decimal)),
            ],
        )
    }
}

impl Describe for Map {
    fn describe(&self) -> Node {
        let rooms = self
            .rooms()
            .iter()
            .map(|room| Node::line(room.path().display().to_string()))
            .collect();

        Node::group(
            "map",
            vec![
                Node::field("name", &self.name),
                Node::field("len", self.rooms().len()),
                Node::field("w", self.width()),
                Node::field("h", self.height()),
                Node::field("entrance_x", self.entrance.0),
                Node::field("entrance_y", self.entrance.1),
                Node::group("rooms", rooms),
                Node::group("data", grid_lines(self.grid(), Radix::Decimal)),
            ],
        )
    }
}

impl Describe for Sprite {
    fn describe(&self) -> Node {
        Node::group(
            "sprite",
            vec![
                Node::field("name", &self.name),
                Node::field("tileset", self.tileset().path().display()),
                Node::field("room_x", self.room.0),
                Node::field("room_y", self.room.1),
                Node::field("x", self.position.0),
                Node::field("y", self.position.1),
                Node::field("frame", self.frame()),
                Node::field("cpu", u8::from(self.controller.cpu)),
            ],
        )
    }
}

impl Describe for World {
    fn describe(&self) -> Node {
        let (rx, ry) = self.room_coord();
        let mut children = vec![
            Node::field("map", self.map().path().display()),
            Node::field("room_x", rx),
            Node::field("room_y", ry),
        ];
        if let Some(room) = self.current_room() {
            children.push(Node::field("room", &room.name));
        }
        if let Some(focus) = self.focus() {
            children.push(Node::field("focus", focus.index()));
        }
        children.push(Node::group(
            "sprites",
            self.sprites().map(|(_, sprite)| sprite.describe()).collect(),
        ));

        Node::group("world", children)
    }
}

impl Describe for Loaded {
    fn describe(&self) -> Node {
        match self {
            Loaded::Palette(p) => p.describe(),
            Loaded::Tileset(t) => t.describe(),
            Loaded::Room(r) => r.describe(),
            Loaded::Map(m) => m.describe(),
            Loaded::Sprite(s) => s.describe(),
        }
    }
}
