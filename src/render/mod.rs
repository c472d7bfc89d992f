//! Rendering: the compositor and the canvases it paints on.
//!
//! The compositor only knows the [`Canvas`] trait. [`ImageCanvas`] backs
//! it with an RGBA image for the `render` command and tests.

mod canvas;
mod compositor;
mod png;

pub use canvas::{Canvas, Rect};
pub use compositor::Compositor;
pub use png::{write_png, ImageCanvas};
