//! Palette type for indexed colour collections.

use std::path::{Path, PathBuf};

use super::Colour;

/// An ordered list of colours, referenced by index from tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Palette name
    pub name: String,

    /// File this palette was loaded from
    path: PathBuf,

    colours: Vec<Colour>,
}

impl Palette {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, colours: Vec<Colour>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            colours,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a colour by palette index.
    pub fn colour(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
