//! Palette loading.
//!
//! ```text
//! name=Gray
//! len=2
//! colors=
//! 0 0 0
//! 255 255 255
//! ```

use std::path::Path;

use super::{
    expect_end, missing_key, missing_terminal, parse_scalar, read_source, unexpected_key,
    EntityKind, Loader,
};
use crate::describe::Describe;
use crate::error::{AdventError, Result};
use crate::parser::{Cursor, NONE};
use crate::types::{Colour, Palette};

const KEYS: &[&str] = &["name", "len", "colors"];

impl Loader {
    /// Load a palette file.
    pub fn load_palette(&self, path: &Path) -> Result<Palette> {
        let source = read_source(path)?;
        self.parse_palette(&source, path)
    }

    pub(crate) fn parse_palette(&self, source: &str, path: &Path) -> Result<Palette> {
        let mut cursor = Cursor::new(source);
        let mut name = String::new();
        let mut len: Option<usize> = None;

        loop {
            let item = self
                .next_item(&mut cursor, path)?
                .ok_or_else(|| missing_terminal(path, "colors"))?;

            match item.key {
                "name" => name = item.value.to_string(),
                "len" => len = Some(parse_scalar(path, &item)?),
                "colors" => break,
                _ => return Err(unexpected_key(path, &item, KEYS)),
            }
        }

        let len = len.ok_or_else(|| missing_key(path, "len", "colors"))?;
        let cells = cursor
            .read_int_grid(3, len, 10)
            .map_err(|e| e.in_file(path))?;
        expect_end(path, &mut cursor)?;

        let colours = cells
            .chunks(3)
            .enumerate()
            .map(|(index, rgb)| colour_from_row(path, index, rgb))
            .collect::<Result<Vec<_>>>()?;

        let palette = Palette::new(name, path, colours);
        self.log_loaded(EntityKind::Palette, path, || palette.describe().to_text());
        Ok(palette)
    }
}

fn colour_from_row(path: &Path, index: usize, rgb: &[i64]) -> Result<Colour> {
    let mut components = [0u8; 3];
    for (channel, (&value, slot)) in rgb.iter().zip(components.iter_mut()).enumerate() {
        if value == NONE {
            return Err(AdventError::schema(
                path,
                format!("colour {} has an empty component", index),
            ));
        }
        *slot = u8::try_from(value).map_err(|_| {
            AdventError::range(
                path,
                format!(
                    "colour {} component {} is {}, expected 0-255",
                    index, channel, value
                ),
            )
        })?;
    }

    let [r, g, b] = components;
    Ok(Colour::rgb(r, g, b))
}
