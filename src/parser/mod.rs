//! Grammar primitives for advent definition files.
//!
//! Definition files are plain text made of `key=value` items, optionally
//! followed by a bulk payload (a grid of integers or a list of paths).
//! The primitives here know nothing about palettes or rooms; the
//! [`loader`](crate::loader) drives them in the order each entity expects.
//!
//! # Usage
//!
//! ```ignore
//! use advent::parser::Cursor;
//!
//! let mut cursor = Cursor::new("len=1\ncolors=\n0 0 0\n");
//! while let Some(item) = cursor.read_item()? {
//!     if item.key == "colors" {
//!         let cells = cursor.read_int_grid(3, 1, 10)?;
//!     }
//! }
//! ```

mod cursor;
mod location;

use std::fmt;
use std::path::Path;

use crate::error::AdventError;

pub use cursor::{Cursor, Item, NONE};
pub use location::Location;

/// What went wrong at the grammar level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A token that cannot be read: missing `=`, bad digit.
    Malformed,
    /// Well-formed tokens in the wrong amount: short rows, missing rows.
    Shape,
}

/// Error raised by a grammar primitive, before the file path is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub location: Location,
    pub message: String,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }

    /// Attach the file the error came from.
    ///
    /// Malformed tokens become grammar errors; shape mismatches are schema
    /// errors since the payload disagrees with the declared dimensions.
    pub fn in_file(self, path: &Path) -> AdventError {
        match self.kind {
            SyntaxErrorKind::Malformed => AdventError::Grammar {
                path: path.to_path_buf(),
                location: self.location,
                message: self.message,
            },
            SyntaxErrorKind::Shape => AdventError::Schema {
                path: path.to_path_buf(),
                message: format!("{} (at {})", self.message, self.location),
                help: Some("Check the declared dimensions against the payload".to_string()),
            },
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}
