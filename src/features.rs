//! Geometric feature extraction for glyph rasters
//!
//! Every glyph is reduced to three features plus a constant bias term:
//!
//! - ink density: total ink divided by the ink of an all-black raster
//! - aspect ratio: bounding box height over bounding box width
//! - right heaviness: share of ink right of the bounding box midpoint
//!
//! Coordinates follow the usual plot convention: `x` grows left to right
//! (`x = column`) and `y` grows bottom to top, so row 0 of an `h`-row raster
//! sits at `y = h` and the last row at `y = 1`.

use ndarray::Array1;
use rayon::prelude::*;

use crate::error::{PlaError, Result};
use crate::raster::{Raster, WHITE};

/// Length of every feature vector, bias included
pub const FEATURE_DIM: usize = 4;

/// The constant trailing component of every feature vector
pub const BIAS: f64 = 1.0;

/// Smallest axis-aligned box enclosing all ink pixels, in plot coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub xmin: usize,
    pub xmax: usize,
    pub ymin: usize,
    pub ymax: usize,
}

impl BoundingBox {
    /// Computes the bounding box of the inked pixels, `None` when there are none
    pub fn of(raster: &Raster) -> Option<Self> {
        let height = raster.height();
        let mut bbox: Option<BoundingBox> = None;

        for ((row, col), &raw) in raster.view().indexed_iter() {
            if raw == WHITE {
                continue;
            }

            let (x, y) = (col, height - row);
            bbox = Some(match bbox {
                None => BoundingBox { xmin: x, xmax: x, ymin: y, ymax: y },
                Some(b) => BoundingBox {
                    xmin: b.xmin.min(x),
                    xmax: b.xmax.max(x),
                    ymin: b.ymin.min(y),
                    ymax: b.ymax.max(y),
                },
            });
        }

        bbox
    }

    pub fn width(&self) -> usize {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> usize {
        self.ymax - self.ymin
    }

    /// Horizontal midpoint `(xmin + xmax) / 2`
    pub fn x_mid(&self) -> f64 {
        (self.xmin + self.xmax) as f64 / 2.0
    }
}

/// The three geometric features of a glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphFeatures {
    pub ink_density: f64,
    pub aspect_ratio: f64,
    pub right_heaviness: f64,
}

impl GlyphFeatures {
    pub fn new(ink_density: f64, aspect_ratio: f64, right_heaviness: f64) -> Self {
        GlyphFeatures { ink_density, aspect_ratio, right_heaviness }
    }

    /// `[ink_density, aspect_ratio, right_heaviness, 1.0]`
    pub fn to_vector(&self) -> Array1<f64> {
        Array1::from_vec(vec![self.ink_density, self.aspect_ratio, self.right_heaviness, BIAS])
    }
}

/// Converts rasters into fixed-length feature vectors.
///
/// The extractor is stateless: the same instance (or any other) yields
/// bit-identical vectors for the same raster, at training and inference time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        FeatureExtractor
    }

    /// Computes the named features of a raster
    pub fn features(&self, raster: &Raster) -> Result<GlyphFeatures> {
        let (height, width) = (raster.height(), raster.width());

        let bbox = BoundingBox::of(raster).ok_or(PlaError::EmptyGlyph { height, width })?;
        if bbox.width() == 0 {
            return Err(PlaError::DegenerateBoundingBox { column: bbox.xmin });
        }

        let middle = bbox.x_mid();
        let mut total_ink = 0.0;
        let mut right_ink = 0.0;

        for ((_, col), &raw) in raster.view().indexed_iter() {
            let ink = f64::from(WHITE - raw);
            total_ink += ink;
            if col as f64 > middle {
                right_ink += ink;
            }
        }

        let all_black = f64::from(WHITE) * height as f64 * width as f64;

        Ok(GlyphFeatures {
            ink_density: total_ink / all_black,
            aspect_ratio: bbox.height() as f64 / bbox.width() as f64,
            right_heaviness: right_ink / total_ink,
        })
    }

    /// Computes the feature vector `[ink_density, aspect_ratio, right_heaviness, 1.0]`
    pub fn extract(&self, raster: &Raster) -> Result<Array1<f64>> {
        self.features(raster).map(|features| features.to_vector())
    }

    /// Extracts every raster in parallel; results keep the input order
    pub fn extract_batch(&self, rasters: &[Raster]) -> Vec<Result<Array1<f64>>> {
        rasters.par_iter().map(|raster| self.extract(raster)).collect()
    }
}
