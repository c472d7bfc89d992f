//! Render command implementation.
//!
//! Loads a map, starts a world at the entrance (or a chosen room) and
//! writes the current room to a PNG.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::Result;
use crate::loader::{LoadOptions, Loader};
use crate::output::{display_path, Printer};
use crate::render::{write_png, Canvas, Compositor, ImageCanvas};
use crate::world::{Controller, World};

/// Render a room of a map to PNG
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Map file to render
    pub map: PathBuf,

    /// Output file
    #[arg(long, short, default_value = "room.png")]
    pub output: PathBuf,

    /// Map coordinate of the room to render (default: the entrance)
    #[arg(long, value_name = "X,Y", value_parser = parse_coord)]
    pub room: Option<(usize, usize)>,

    /// Scale factor for output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Sprite files to place in the rendered room, at its origin
    #[arg(long = "sprite", value_name = "FILE")]
    pub sprites: Vec<PathBuf>,
}

pub fn run(args: RenderArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    let loader = Loader::new(LoadOptions::from_settings(settings));
    let map = loader.load_map(&args.map)?;
    let mut world = World::new(map)?;

    if let Some(coord) = args.room {
        world.enter_room(coord)?;
    }

    for path in &args.sprites {
        let mut sprite = loader.load_sprite(path)?;
        if let Some(room) = world.current_room() {
            sprite.check_palette(room.palette())?;
        }
        let cpu = sprite.controller.cpu;
        sprite.room = world.room_coord();
        sprite.controller = Controller::with_bindings(&settings.bindings);
        sprite.controller.cpu = cpu;
        world.add_sprite(sprite);
    }

    let compositor = Compositor::from_settings(settings);
    let (width, height) = match world.current_room() {
        Some(room) => compositor.room_size(room)?,
        None => settings.screen_size(),
    };

    let mut canvas = ImageCanvas::new(width, height);
    canvas.clear(settings.background)?;
    compositor.render_current_room(&world, &mut canvas)?;
    write_png(canvas.image(), &args.output, args.scale)?;

    let (x, y) = world.room_coord();
    printer.success(
        "Rendered",
        &format!(
            "room ({}, {}) of {} -> {}",
            x,
            y,
            world.map().name,
            display_path(&args.output)
        ),
    );
    Ok(())
}

/// Parse `X,Y`.
fn parse_coord(s: &str) -> std::result::Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got \"{}\"", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid coordinate \"{}\"", v))
    };
    Ok((parse(x)?, parse(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdventError;
    use crate::loader::fixtures;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_world(dir: &Path) -> PathBuf {
        fixtures::write_room_set(dir);
        fixtures::write(dir, "map.txt", "len=1\nw=1\nh=1\nrooms=\nroom0.txt\ndata=\n0\n")
    }

    fn args(map: PathBuf, output: PathBuf, sprites: Vec<PathBuf>) -> RenderArgs {
        RenderArgs {
            map,
            output,
            room: None,
            scale: 1,
            sprites,
        }
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("1,2"), Ok((1, 2)));
        assert_eq!(parse_coord(" 3 , 4 "), Ok((3, 4)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("-1,0").is_err());
    }

    #[test]
    fn test_render_writes_room_png() {
        let dir = tempdir().unwrap();
        let map = write_world(dir.path());
        let output = dir.path().join("room.png");

        let args = args(map, output.clone(), Vec::new());
        run(args, &Settings::default(), &Printer::plain()).unwrap();

        let img = image::open(&output).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 16));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(15, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_sprite_colours_outside_room_palette() {
        let dir = tempdir().unwrap();
        let map = write_world(dir.path());
        let frames = "tile_w=1\ntile_h=1\nlen=1\ntiles=\ndata=\n5\n";
        fixtures::write(dir.path(), "frames.txt", frames);
        let sprite = fixtures::write(dir.path(), "ghost.txt", "name=Ghost\ntileset=frames.txt\n");
        let output = dir.path().join("room.png");

        let args = args(map, output.clone(), vec![sprite]);
        let err = run(args, &Settings::default(), &Printer::plain()).unwrap_err();

        assert!(matches!(err, AdventError::Range { .. }));
        assert!(err.to_string().contains("palette \"Gray\""));
        assert!(!output.exists());
    }
}
