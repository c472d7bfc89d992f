//! Sprites: animated tiles positioned in a room of the map.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::controller::Controller;
use crate::error::{AdventError, Result};
use crate::types::{Palette, Tile, Tileset};

/// A sprite. Its frames are the tiles of its tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,

    path: PathBuf,

    /// Map coordinate of the room the sprite is in.
    pub room: (usize, usize),

    /// Position inside the room, in tiles.
    pub position: (usize, usize),

    tileset: Rc<Tileset>,

    frame: usize,

    pub controller: Controller,
}

impl Sprite {
    /// Create a sprite at the origin of room (0, 0).
    ///
    /// `frame` must index a tile of `tileset`.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        tileset: Rc<Tileset>,
        frame: usize,
        controller: Controller,
    ) -> Self {
        debug_assert!(frame < tileset.len() || tileset.is_empty());

        Self {
            name: name.into(),
            path: path.into(),
            room: (0, 0),
            position: (0, 0),
            tileset,
            frame,
            controller,
        }
    }

    /// Place the sprite in a room.
    pub fn at(mut self, room: (usize, usize), position: (usize, usize)) -> Self {
        self.room = room;
        self.position = position;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tileset(&self) -> &Rc<Tileset> {
        &self.tileset
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// The tile shown for the current frame.
    pub fn current_tile(&self) -> Option<&Tile> {
        self.tileset.tile(self.frame)
    }

    /// Check that every frame only uses colours of `palette`.
    ///
    /// Sprites are drawn with the palette of the room they stand in, which
    /// is not known when the sprite file is loaded.
    pub fn check_palette(&self, palette: &Palette) -> Result<()> {
        for (frame, tile) in self.tileset.tiles().iter().enumerate() {
            tile.cells().check_bound(palette.len()).map_err(|e| {
                AdventError::range(
                    &self.path,
                    format!(
                        "frame {} cell {} at ({}, {}) exceeds palette \"{}\" length {}",
                        frame, e.value, e.x, e.y, palette.name, e.bound
                    ),
                )
            })?;
        }
        Ok(())
    }

    /// Advance to the next frame, wrapping at the end of the tileset.
    pub fn advance_frame(&mut self) {
        if !self.tileset.is_empty() {
            self.frame = (self.frame + 1) % self.tileset.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::NONE;
    use crate::types::{Colour, Grid};

    fn tileset(frames: usize) -> Rc<Tileset> {
        let tiles = (0..frames).map(|_| Tile::new(Grid::empty(1, 1))).collect();
        Rc::new(Tileset::new("hero", "hero.txt", 1, 1, tiles))
    }

    #[test]
    fn test_advance_frame_wraps() {
        let mut sprite = Sprite::new("hero", "hero.txt", tileset(3), 1, Controller::default());

        sprite.advance_frame();
        assert_eq!(sprite.frame(), 2);
        sprite.advance_frame();
        assert_eq!(sprite.frame(), 0);
        assert!(sprite.current_tile().is_some());
    }

    #[test]
    fn test_at_places_sprite() {
        let sprite = Sprite::new("hero", "hero.txt", tileset(1), 0, Controller::default())
            .at((1, 2), (3, 4));

        assert_eq!(sprite.room, (1, 2));
        assert_eq!(sprite.position, (3, 4));
    }

    #[test]
    fn test_check_palette() {
        let frames = vec![
            Tile::new(Grid::from_raw(1, 1, &[0]).unwrap()),
            Tile::new(Grid::from_raw(1, 1, &[NONE]).unwrap()),
            Tile::new(Grid::from_raw(1, 1, &[2]).unwrap()),
        ];
        let tileset = Rc::new(Tileset::new("hero", "hero.txt", 1, 1, frames));
        let sprite = Sprite::new("hero", "hero.txt", tileset, 0, Controller::default());

        let wide = Palette::new("rgb", "rgb.txt", vec![Colour::BLACK; 3]);
        assert!(sprite.check_palette(&wide).is_ok());

        let narrow = Palette::new("gray", "gray.txt", vec![Colour::BLACK, Colour::WHITE]);
        let err = sprite.check_palette(&narrow).unwrap_err();
        assert!(matches!(err, AdventError::Range { .. }));
        assert!(err.to_string().contains("frame 2 cell 2"));
    }
}
