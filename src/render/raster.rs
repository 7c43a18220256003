use image::RgbImage;

use crate::color::palette::{BOUNDED, Palette};
use crate::decode::document::FrameSeries;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};

/// Pixel position of linear cell `cell` in a grid of the given height.
///
/// The producer walks columns: the divisor is the grid *height*, so consecutive cells run down a
/// column before moving one pixel to the right.
pub fn cell_to_pixel(cell: usize, height: u32) -> (u32, u32) {
    let h = height as usize;
    ((cell / h) as u32, (cell % h) as u32)
}

/// Paint frame `idx` of `series` into `buf`.
///
/// `buf` is resized when its dimensions differ from the series and cleared to black otherwise,
/// then every cell is painted exactly once.
pub fn paint_frame(
    series: &FrameSeries,
    idx: FrameIndex,
    palette: Palette,
    buf: &mut RgbImage,
) -> ReelResult<()> {
    let samples = series.frame(idx).ok_or_else(|| {
        ReelError::render(format!(
            "frame {idx} is out of range for a series of {} frames",
            series.iterations()
        ))
    })?;

    let (width, height) = (series.width(), series.height());
    if buf.dimensions() == (width, height) {
        buf.pixels_mut().for_each(|px| *px = BOUNDED);
    } else {
        *buf = RgbImage::from_pixel(width, height, BOUNDED);
    }

    for (cell, &sample) in samples.iter().enumerate() {
        let (x, y) = cell_to_pixel(cell, height);
        buf.put_pixel(x, y, palette.color(sample));
    }
    Ok(())
}

/// Rasterizer that owns one reusable pixel buffer.
#[derive(Debug)]
pub struct Rasterizer {
    palette: Palette,
    buffer: RgbImage,
}

impl Rasterizer {
    /// Create a rasterizer with an empty buffer.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            buffer: RgbImage::new(0, 0),
        }
    }

    /// Palette in use.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Paint one frame and borrow the result.
    pub fn paint(&mut self, series: &FrameSeries, idx: FrameIndex) -> ReelResult<&RgbImage> {
        paint_frame(series, idx, self.palette, &mut self.buffer)?;
        Ok(&self.buffer)
    }

    /// Drop the buffer's pixel storage.
    pub fn release(&mut self) {
        self.buffer = RgbImage::new(0, 0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
