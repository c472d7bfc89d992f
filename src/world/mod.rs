//! World overlay: sprites moving through the rooms of a loaded map.
//!
//! The world owns the map and a sprite arena. A tick is driven from
//! outside (see [`tick::run`]): clear the pressed edges, apply every
//! pending input event, then step the simulation.

mod controller;
mod input;
mod sprite;
pub mod tick;

use log::debug;

use crate::error::{AdventError, Result};
use crate::types::{Map, Room};

pub use controller::{Action, Controller, KeySlot};
pub use input::{EventSource, InputEvent, Key, ScriptedEvents};
pub use sprite::Sprite;
pub use tick::{run, SystemClock, TickClock, TickOptions, TickStats};

/// Handle to a sprite in the world's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(usize);

impl SpriteId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which edge of a room a sprite walked off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    North,
    South,
    East,
    West,
}

/// The running world.
#[derive(Debug, Clone)]
pub struct World {
    map: Map,
    room: (usize, usize),
    sprites: Vec<Option<Sprite>>,
    free: Vec<usize>,
    focus: Option<SpriteId>,
}

impl World {
    /// Start a world in the map's entrance room.
    pub fn new(map: Map) -> Result<Self> {
        if map.entrance_room().is_none() {
            let (x, y) = map.entrance;
            return Err(AdventError::schema(
                map.path(),
                format!("map entrance ({}, {}) does not resolve to a room", x, y),
            ));
        }

        Ok(Self {
            room: map.entrance,
            map,
            sprites: Vec::new(),
            free: Vec::new(),
            focus: None,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Map coordinate of the current room.
    pub fn room_coord(&self) -> (usize, usize) {
        self.room
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.map.room_at(self.room.0 as i64, self.room.1 as i64)
    }

    /// Move the view to another room of the map.
    pub fn enter_room(&mut self, coord: (usize, usize)) -> Result<()> {
        if self.map.room_at(coord.0 as i64, coord.1 as i64).is_none() {
            return Err(AdventError::schema(
                self.map.path(),
                format!("no room at ({}, {})", coord.0, coord.1),
            ));
        }
        self.room = coord;
        Ok(())
    }

    /// Add a sprite, reusing a free slot when there is one.
    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteId {
        match self.free.pop() {
            Some(index) => {
                self.sprites[index] = Some(sprite);
                SpriteId(index)
            }
            None => {
                self.sprites.push(Some(sprite));
                SpriteId(self.sprites.len() - 1)
            }
        }
    }

    /// Remove a sprite and free its slot. Clears the focus if it was the
    /// focus sprite.
    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<Sprite> {
        let sprite = self.sprites.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        if self.focus == Some(id) {
            self.focus = None;
        }
        Some(sprite)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0)?.as_ref()
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0)?.as_mut()
    }

    /// Occupied slots, in slot order.
    pub fn sprites(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> + '_ {
        self.sprites
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (SpriteId(i), s)))
    }

    /// Number of slots, occupied or free.
    pub fn capacity(&self) -> usize {
        self.sprites.len()
    }

    /// Sprites standing in the current room.
    pub fn sprites_in_current_room(&self) -> impl Iterator<Item = &Sprite> + '_ {
        self.sprites()
            .map(|(_, sprite)| sprite)
            .filter(move |sprite| sprite.room == self.room)
    }

    pub fn focus(&self) -> Option<SpriteId> {
        self.focus
    }

    /// Set the sprite the view follows. The current room jumps to it.
    pub fn set_focus(&mut self, id: Option<SpriteId>) {
        self.focus = id.filter(|&id| self.sprite(id).is_some());
        self.follow_focus();
    }

    /// Clear every pressed edge.
    pub fn prepare_tick(&mut self) {
        for sprite in self.sprites.iter_mut().flatten() {
            sprite.controller.clear_pressed();
        }
    }

    /// Apply one input event to every sprite's controller.
    pub fn apply_event(&mut self, event: InputEvent) {
        for sprite in self.sprites.iter_mut().flatten() {
            sprite.controller.apply(event);
        }
    }

    /// One simulation step: every keyboard-driven sprite with a pressed
    /// direction moves one tile and advances its animation.
    pub fn step(&mut self) {
        let map = &self.map;
        for sprite in self.sprites.iter_mut().flatten() {
            if sprite.controller.cpu {
                continue;
            }
            if let Some(direction) = sprite.controller.pressed_direction() {
                if move_sprite(map, sprite, direction) {
                    sprite.advance_frame();
                }
            }
        }
        self.follow_focus();
    }

    fn follow_focus(&mut self) {
        let Some(room) = self.focus.and_then(|id| self.sprite(id)).map(|s| s.room) else {
            return;
        };
        if room != self.room {
            debug!("View follows focus into room ({}, {})", room.0, room.1);
            self.room = room;
        }
    }
}

/// Move a sprite one tile, crossing into the neighbouring room when it
/// walks off an edge. Returns whether the sprite moved.
fn move_sprite(map: &Map, sprite: &mut Sprite, (dx, dy): (i64, i64)) -> bool {
    let (rx, ry) = (sprite.room.0 as i64, sprite.room.1 as i64);
    let Some(from) = map.room_at(rx, ry) else {
        return false;
    };

    let (x, y) = (sprite.position.0 as i64, sprite.position.1 as i64);
    let (nx, ny) = (x + dx, y + dy);
    if let Some(position) = inside(from, nx, ny) {
        sprite.position = position;
        return true;
    }

    let edge = if ny < 0 {
        Edge::North
    } else if ny >= from.height() as i64 {
        Edge::South
    } else if nx >= from.width() as i64 {
        Edge::East
    } else {
        Edge::West
    };

    let (trx, try_) = match edge {
        Edge::North => (rx, ry - 1),
        Edge::South => (rx, ry + 1),
        Edge::East => (rx + 1, ry),
        Edge::West => (rx - 1, ry),
    };
    let Some(to) = map.room_at(trx, try_) else {
        return false;
    };

    let (f, t) = (from.offsets, to.offsets);
    let (tx, ty) = match edge {
        Edge::North => (x - f.n as i64 + t.s as i64, to.height() as i64 - 1),
        Edge::South => (x - f.s as i64 + t.n as i64, 0),
        Edge::East => (0, y - f.e as i64 + t.w as i64),
        Edge::West => (to.width() as i64 - 1, y - f.w as i64 + t.e as i64),
    };

    match inside(to, tx, ty) {
        Some(position) => {
            debug!(
                "{} crosses {:?} from ({}, {}) to ({}, {})",
                sprite.name, edge, rx, ry, trx, try_
            );
            sprite.room = (trx as usize, try_ as usize);
            sprite.position = position;
            true
        }
        None => false,
    }
}

fn inside(room: &Room, x: i64, y: i64) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    (x < room.width() && y < room.height()).then_some((x, y))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory worlds for tests.

    use std::rc::Rc;

    use super::*;
    use crate::parser::NONE;
    use crate::types::{Colour, Grid, Offsets, Palette, Tile, Tileset};

    pub fn tileset(frames: usize) -> Rc<Tileset> {
        let tiles = (0..frames)
            .map(|_| Tile::new(Grid::from_raw(1, 1, &[1]).unwrap()))
            .collect();
        Rc::new(Tileset::new("solid", "solid.txt", 1, 1, tiles))
    }

    pub fn room(name: &str, w: usize, h: usize, offsets: Offsets) -> Room {
        let palette = Rc::new(Palette::new("gray", "gray.txt", vec![Colour::BLACK, Colour::WHITE]));
        let grid = Grid::from_raw(w, h, &vec![0; w * h]).unwrap();
        Room::new(name, format!("{name}.txt"), tileset(1), palette, offsets, grid)
    }

    /// Rooms laid out as `a b` over `c .`.
    pub fn map(a: Room, b: Room, c: Room) -> Map {
        let grid = Grid::from_raw(2, 2, &[0, 1, 2, NONE]).unwrap();
        Map::new("world", "map.txt", vec![a, b, c], grid, (0, 0))
    }

    pub fn hero() -> Sprite {
        Sprite::new("hero", "hero.txt", tileset(2), 0, Controller::default())
    }
}
