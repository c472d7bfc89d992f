//! Compositor: paints tiles, rooms and the world's current room.
//!
//! One tile cell becomes a `cell_w` x `cell_h` rectangle of device pixels.
//! Empty cells are left untouched, so whatever the canvas was cleared to
//! shows through.

use log::debug;

use super::canvas::{Canvas, Rect};
use crate::config::{DebugLevels, Settings};
use crate::error::{AdventError, Result};
use crate::types::{Palette, Room, Tile};
use crate::world::World;

/// Renders the resource model onto a [`Canvas`]. Never mutates the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compositor {
    cell_w: u32,
    cell_h: u32,
    debug: DebugLevels,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl Compositor {
    pub fn new(cell_w: u32, cell_h: u32) -> Self {
        Self {
            cell_w,
            cell_h,
            debug: DebugLevels::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.cell_w, settings.cell_h).with_debug(settings.debug)
    }

    pub fn with_debug(mut self, debug: DebugLevels) -> Self {
        self.debug = debug;
        self
    }

    /// Device pixels per tile cell.
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_w, self.cell_h)
    }

    /// Size of a room in device pixels.
    pub fn room_size(&self, room: &Room) -> Result<(u32, u32)> {
        let too_large = || AdventError::Render {
            message: format!("room \"{}\" is too large to render", room.name),
        };
        let device = |cells: usize, cell: u32| {
            u32::try_from(cells).ok().and_then(|cells| cells.checked_mul(cell))
        };

        let (w, h) = room.cell_size().ok_or_else(too_large)?;
        let w = device(w, self.cell_w).ok_or_else(too_large)?;
        let h = device(h, self.cell_h).ok_or_else(too_large)?;
        Ok((w, h))
    }

    /// Paint the filled cells of a tile with its top-left corner at
    /// `origin`.
    pub fn render_tile(
        &self,
        tile: &Tile,
        origin: (i64, i64),
        palette: &Palette,
        canvas: &mut impl Canvas,
    ) -> Result<()> {
        for (x, y, index) in tile.cells().iter_filled() {
            let colour = palette.colour(index).ok_or_else(|| AdventError::Render {
                message: format!(
                    "colour {} is outside palette \"{}\" ({} colours)",
                    index,
                    palette.name,
                    palette.len()
                ),
            })?;

            let cell_x = offset(origin.0, x, i64::from(self.cell_w))?;
            let cell_y = offset(origin.1, y, i64::from(self.cell_h))?;

            canvas.set_draw_colour(colour)?;
            canvas.fill_rect(Rect::new(cell_x, cell_y, self.cell_w, self.cell_h))?;
        }
        Ok(())
    }

    /// Paint every filled cell of a room with its top-left corner at
    /// `origin`.
    pub fn render_room(
        &self,
        room: &Room,
        origin: (i64, i64),
        canvas: &mut impl Canvas,
    ) -> Result<()> {
        let tileset = room.tileset();
        let (step_x, step_y) = self.tile_step(room)?;

        for (x, y, index) in room.grid().iter_filled() {
            let tile = tileset.tile(index).ok_or_else(|| AdventError::Render {
                message: format!(
                    "tile {} is outside tileset \"{}\" ({} tiles)",
                    index,
                    tileset.name,
                    tileset.len()
                ),
            })?;

            let cell_origin = (offset(origin.0, x, step_x)?, offset(origin.1, y, step_y)?);
            self.render_tile(tile, cell_origin, room.palette(), canvas)?;
        }

        if self.debug.render >= 1 {
            debug!("Rendered room {} at ({}, {})", room.name, origin.0, origin.1);
        }
        Ok(())
    }

    /// Paint the room the world is in at (0, 0), then the sprites standing
    /// in it using the room's palette.
    pub fn render_current_room(&self, world: &World, canvas: &mut impl Canvas) -> Result<()> {
        let (rx, ry) = world.room_coord();
        let room = world.current_room().ok_or_else(|| AdventError::Render {
            message: format!("no room at map coordinate ({}, {})", rx, ry),
        })?;

        self.render_room(room, (0, 0), canvas)?;

        let (step_x, step_y) = self.tile_step(room)?;
        for sprite in world.sprites_in_current_room() {
            let Some(tile) = sprite.current_tile() else {
                continue;
            };
            let (x, y) = sprite.position;
            let origin = (offset(0, x, step_x)?, offset(0, y, step_y)?);
            self.render_tile(tile, origin, room.palette(), canvas)?;
        }
        Ok(())
    }

    /// Device pixels between neighbouring tiles of a room.
    fn tile_step(&self, room: &Room) -> Result<(i64, i64)> {
        let tileset = room.tileset();
        let step = |tile: usize, cell: u32| {
            i64::try_from(tile).ok().and_then(|tile| tile.checked_mul(i64::from(cell)))
        };

        match (step(tileset.tile_w, self.cell_w), step(tileset.tile_h, self.cell_h)) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(AdventError::Render {
                message: format!("tiles of \"{}\" are too large to render", tileset.name),
            }),
        }
    }
}

/// `origin + index * step` in device pixels.
fn offset(origin: i64, index: usize, step: i64) -> Result<i64> {
    i64::try_from(index)
        .ok()
        .and_then(|index| index.checked_mul(step))
        .and_then(|distance| distance.checked_add(origin))
        .ok_or_else(|| AdventError::Render {
            message: format!("cell {} is outside the drawable area", index),
        })
}
