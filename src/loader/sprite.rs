//! Sprite loading.
//!
//! A sprite file is items only; there is no payload and the items run to
//! the end of input.
//!
//! ```text
//! name=Hero
//! tileset=hero_frames.txt
//! frame=0
//! cpu=0
//! ```
//!
//! The loaded sprite sits at the origin of room (0, 0) with the default
//! key bindings; callers place it and rebind it.

use std::path::Path;
use std::rc::Rc;

use super::{missing_key, parse_scalar, read_source, unexpected_key, EntityKind, Loader};
use crate::describe::Describe;
use crate::error::{AdventError, Result};
use crate::parser::Cursor;
use crate::types::Tileset;
use crate::world::{Controller, Sprite};

const KEYS: &[&str] = &["name", "tileset", "frame", "cpu"];

impl Loader {
    /// Load a sprite file with its tileset of frames.
    pub fn load_sprite(&self, path: &Path) -> Result<Sprite> {
        let source = read_source(path)?;
        self.parse_sprite(&source, path)
    }

    pub(crate) fn parse_sprite(&self, source: &str, path: &Path) -> Result<Sprite> {
        let mut cursor = Cursor::new(source);
        let mut name = String::new();
        let mut tileset: Option<Rc<Tileset>> = None;
        let mut frame = 0usize;
        let mut cpu = false;

        while let Some(item) = self.next_item(&mut cursor, path)? {
            match item.key {
                "name" => name = item.value.to_string(),
                "tileset" => {
                    let loaded = self.load_reference(path, item.key, item.value, |p| {
                        self.load_tileset(p)
                    })?;
                    tileset = Some(Rc::new(loaded));
                }
                "frame" => frame = parse_scalar(path, &item)?,
                "cpu" => cpu = parse_scalar::<u8>(path, &item)? != 0,
                _ => return Err(unexpected_key(path, &item, KEYS)),
            }
        }

        if !cursor.is_at_end() {
            return Err(AdventError::schema(
                path,
                format!("unexpected content at {}", cursor.location()),
            ));
        }

        let tileset = tileset.ok_or_else(|| AdventError::Schema {
            path: path.to_path_buf(),
            message: "missing key \"tileset\"".to_string(),
            help: Some("A sprite needs a tileset of animation frames".to_string()),
        })?;

        if frame >= tileset.len() {
            return Err(AdventError::range(
                path,
                format!(
                    "frame {} exceeds tileset \"{}\" length {}",
                    frame,
                    tileset.name,
                    tileset.len()
                ),
            ));
        }

        let mut controller = Controller::default();
        controller.cpu = cpu;
        let sprite = Sprite::new(name, path, tileset, frame, controller);
        self.log_loaded(EntityKind::Sprite, path, || sprite.describe().to_text());
        Ok(sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::fixtures;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const FRAMES: &str = "name=Frames\ntile_w=1\ntile_h=1\nlen=2\ntiles=\ndata=\n0\ndata=\n1\n";

    #[test]
    fn test_load_sprite() {
        let dir = tempdir().unwrap();
        fixtures::write(dir.path(), "frames.txt", FRAMES);
        let hero = "name=Hero\ntileset=frames.txt\nframe=1\ncpu=1\n";
        let path = fixtures::write(dir.path(), "hero.txt", hero);

        let sprite = Loader::default().load_sprite(&path).unwrap();
        assert_eq!(sprite.name, "Hero");
        assert_eq!(sprite.frame(), 1);
        assert!(sprite.controller.cpu);
        assert_eq!(sprite.tileset().len(), 2);
        assert_eq!(sprite.room, (0, 0));
    }

    #[test]
    fn test_defaults() {
        let dir = tempdir().unwrap();
        fixtures::write(dir.path(), "frames.txt", FRAMES);
        let path = fixtures::write(dir.path(), "hero.txt", "tileset=frames.txt\n");

        let sprite = Loader::default().load_sprite(&path).unwrap();
        assert_eq!(sprite.frame(), 0);
        assert!(!sprite.controller.cpu);
    }

    #[test]
    fn test_missing_tileset() {
        let dir = tempdir().unwrap();
        let path = fixtures::write(dir.path(), "hero.txt", "name=Hero\nframe=0\n");

        let err = Loader::default().load_sprite(&path).unwrap_err();
        assert!(err.to_string().contains("\"tileset\""));
    }

    #[test]
    fn test_frame_past_tileset_is_range_error() {
        let dir = tempdir().unwrap();
        fixtures::write(dir.path(), "frames.txt", FRAMES);
        let path = fixtures::write(dir.path(), "hero.txt", "tileset=frames.txt\nframe=2\n");

        let err = Loader::default().load_sprite(&path).unwrap_err();
        assert!(matches!(err, AdventError::Range { .. }));
    }

    #[test]
    fn test_stray_content() {
        let dir = tempdir().unwrap();
        fixtures::write(dir.path(), "frames.txt", FRAMES);
        let path = fixtures::write(dir.path(), "hero.txt", "tileset=frames.txt\n0 1\n");

        let err = Loader::default().load_sprite(&path).unwrap_err();
        assert!(matches!(err, AdventError::Schema { .. }));
    }

    #[test]
    fn test_unknown_key_is_named() {
        let dir = tempdir().unwrap();
        let path = fixtures::write(dir.path(), "hero.txt", "foo=bar\n");

        let err = Loader::default().load_sprite(&path).unwrap_err();
        assert!(err.to_string().contains("\"foo\""));
    }
}
