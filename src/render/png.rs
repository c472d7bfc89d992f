//! An in-memory RGBA canvas and PNG output.
//!
//! Fills are clipped to the image, so callers can draw rooms larger than
//! the view without bounds checks of their own.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use super::canvas::{Canvas, Rect};
use crate::error::{AdventError, Result};
use crate::types::Colour;

/// A [`Canvas`] over an RGBA image.
#[derive(Debug, Clone)]
pub struct ImageCanvas {
    image: RgbaImage,
    colour: Colour,
}

impl ImageCanvas {
    /// Create a canvas cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, Rgba(Colour::BLACK.to_rgba())),
            colour: Colour::WHITE,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The colour of one pixel, if it is on the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Colour::rgb(p.0[0], p.0[1], p.0[2]))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Canvas for ImageCanvas {
    fn set_draw_colour(&mut self, colour: Colour) -> Result<()> {
        self.colour = colour;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.x.saturating_add(i64::from(rect.w)).min(i64::from(self.image.width()));
        let y1 = rect.y.saturating_add(i64::from(rect.h)).min(i64::from(self.image.height()));

        let rgba = Rgba(self.colour.to_rgba());
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x as u32, y as u32, rgba);
            }
        }
        Ok(())
    }

    fn clear(&mut self, colour: Colour) -> Result<()> {
        let rgba = Rgba(colour.to_rgba());
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
        Ok(())
    }
}

/// Write an image to a PNG file.
///
/// # Arguments
///
/// * `image` - The rendered image
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(image: &RgbaImage, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);

    let scaled: RgbaImage = if scale == 1 {
        image.clone()
    } else {
        let (width, height) = image
            .width()
            .checked_mul(scale)
            .zip(image.height().checked_mul(scale))
            .ok_or_else(|| AdventError::Render {
                message: format!(
                    "{}x{} image scaled by {} is too large",
                    image.width(),
                    image.height(),
                    scale
                ),
            })?;
        ImageBuffer::from_fn(width, height, |x, y| *image.get_pixel(x / scale, y / scale))
    };

    scaled.save(path).map_err(|e| AdventError::Render {
        message: format!("Failed to write PNG {}: {}", path.display(), e),
    })
}
