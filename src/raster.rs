//! Single-channel glyph rasters
//!
//! A [`Raster`] stores raw intensities in `[0, 255]` with row 0 at the top of
//! the image. Lower raw values mean more ink; [`Raster::ink`] returns the
//! inverted value `255 - raw` that the feature extractor works with.

use std::ops::Range;

use ndarray::{Array2, ArrayView2};

use crate::error::{PlaError, Result};

/// Raw intensity of a pixel with no ink at all
pub const WHITE: u8 = 255;

/// A rectangular grid of raw intensities for one glyph
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Array2<u8>,
}

impl Raster {
    /// Wraps an existing intensity grid (shape is `(height, width)`)
    pub fn new(pixels: Array2<u8>) -> Self {
        Raster { pixels }
    }

    /// Creates an all-white raster
    pub fn blank(height: usize, width: usize) -> Self {
        Raster { pixels: Array2::from_elem((height, width), WHITE) }
    }

    /// Builds a raster from row-major intensities
    pub fn from_shape_vec(height: usize, width: usize, data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        let pixels = Array2::from_shape_vec((height, width), data).map_err(|_| {
            PlaError::InvalidRaster(format!(
                "expected {} pixels for a {}x{} raster, got {}",
                height * width, height, width, len
            ))
        })?;

        Ok(Raster { pixels })
    }

    /// Picks one channel out of interleaved pixel data (e.g. RGBA)
    pub fn from_interleaved(
        height: usize,
        width: usize,
        channels: usize,
        data: &[u8],
        channel: usize,
    ) -> Result<Self> {
        if channel >= channels {
            return Err(PlaError::InvalidRaster(format!(
                "channel {} out of range for {} channels",
                channel, channels
            )));
        }
        if data.len() != height * width * channels {
            return Err(PlaError::InvalidRaster(format!(
                "expected {} bytes for {}x{}x{}, got {}",
                height * width * channels, height, width, channels, data.len()
            )));
        }

        let plane: Vec<u8> = data
            .chunks_exact(channels)
            .map(|pixel| pixel[channel])
            .collect();

        Self::from_shape_vec(height, width, plane)
    }

    /// Sets every pixel in the given row and column ranges to `intensity`
    pub fn fill_rect(&mut self, rows: Range<usize>, cols: Range<usize>, intensity: u8) -> Result<()> {
        if rows.end > self.height() || cols.end > self.width() {
            return Err(PlaError::InvalidRaster(format!(
                "rectangle rows {:?} cols {:?} exceeds {}x{} raster",
                rows, cols, self.height(), self.width()
            )));
        }

        for r in rows {
            for c in cols.clone() {
                self.pixels[[r, c]] = intensity;
            }
        }

        Ok(())
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Raw intensity at `(row, col)`
    pub fn raw(&self, row: usize, col: usize) -> u8 {
        self.pixels[[row, col]]
    }

    /// Ink coverage at `(row, col)`, i.e. `255 - raw`
    pub fn ink(&self, row: usize, col: usize) -> u8 {
        WHITE - self.pixels[[row, col]]
    }

    /// Ink coverage of the whole raster as floating point values
    pub fn ink_map(&self) -> Array2<f64> {
        self.pixels.mapv(|raw| f64::from(WHITE - raw))
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_channel_selection() {
        // 1x2 RGBA image, red channel carries the ink
        let data = [10, 200, 200, 255, 250, 0, 0, 255];
        let raster = Raster::from_interleaved(1, 2, 4, &data, 0).unwrap();

        assert_eq!(raster.raw(0, 0), 10);
        assert_eq!(raster.ink(0, 1), 5);
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            Raster::from_shape_vec(2, 2, vec![0; 3]),
            Err(PlaError::InvalidRaster(_))
        ));
        assert!(Raster::from_interleaved(1, 1, 3, &[0, 0, 0], 3).is_err());

        let mut raster = Raster::blank(2, 2);
        assert!(raster.fill_rect(0..3, 0..1, 0).is_err());
    }
}
