//! The drawing surface the compositor paints on.

use crate::error::Result;
use crate::types::Colour;

/// A rectangle in device pixels. The origin may lie off the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i64, y: i64, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// A pixel surface with a current draw colour.
pub trait Canvas {
    fn set_draw_colour(&mut self, colour: Colour) -> Result<()>;

    /// Fill a rectangle with the current draw colour.
    fn fill_rect(&mut self, rect: Rect) -> Result<()>;

    /// Fill the whole surface.
    fn clear(&mut self, colour: Colour) -> Result<()>;
}
