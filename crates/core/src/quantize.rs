//! Gray-level quantization
//!
//! Reduces an 8-bit grayscale raster to `N` evenly spaced gray levels and
//! keeps the ascending level table used as co-occurrence matrix indices.

use crate::error::{Error, Result};
use crate::io;
use crate::raster::Raster;
use std::path::Path;
use tracing::warn;

/// Number of intensity values of an 8-bit grayscale pixel
pub const MAX_PIXEL_VALUE: usize = 256;

/// Ascending, duplicate-free list of the gray levels present in a quantized image.
///
/// The position of a level in this list is its index in a co-occurrence matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayLevels(Vec<u8>);

impl GrayLevels {
    /// Build a level table, rejecting empty or non strictly ascending lists
    pub fn new(levels: Vec<u8>) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::InvalidParameter {
                name: "gray_levels",
                value: "[]".into(),
                reason: "at least one gray level is required".into(),
            });
        }
        if levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidParameter {
                name: "gray_levels",
                value: format!("{:?}", levels),
                reason: "gray levels must be strictly ascending".into(),
            });
        }
        Ok(Self(levels))
    }

    /// Evenly spaced table for `amount` levels: `0, scale, 2*scale, ...` below 256
    pub fn uniform(amount: usize) -> Self {
        let scale = Self::scale_for(amount);
        Self((0..MAX_PIXEL_VALUE).step_by(scale).map(|v| v as u8).collect())
    }

    /// Width of one quantization bucket, `ceil(256 / amount)`
    pub fn scale_for(amount: usize) -> usize {
        MAX_PIXEL_VALUE.div_ceil(amount.max(1))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Matrix index of a pixel value, if the value is one of the levels
    pub fn index_of(&self, value: u8) -> Option<usize> {
        self.0.binary_search(&value).ok()
    }

    /// Closest level to `value`; ties resolve to the lower level.
    pub fn nearest(&self, value: i64) -> u8 {
        let mut best = self.0[0];
        let mut best_diff = i64::MAX;
        for &level in &self.0 {
            let diff = (value - level as i64).abs();
            if diff < best_diff {
                best_diff = diff;
                best = level;
            }
        }
        best
    }

    /// Map a scalar onto the level table: scale to `0..=255`, truncate, snap to the nearest level.
    pub fn to_gray(&self, value: f64) -> u8 {
        self.nearest((value * 255.0) as i64)
    }
}

/// Parameters for gray-level reduction
#[derive(Debug, Clone)]
pub struct QuantizeParams {
    /// Requested amount of gray levels, valid in `1..=255`
    pub levels: usize,
    /// Amount used when `levels` is out of range
    pub default_levels: usize,
}

impl Default for QuantizeParams {
    fn default() -> Self {
        Self {
            levels: 8,
            default_levels: 8,
        }
    }
}

/// A grayscale raster whose every pixel is one of its `GrayLevels`.
#[derive(Debug, Clone)]
pub struct QuantizedImage {
    name: String,
    extension: String,
    raster: Raster<u8>,
    levels: GrayLevels,
    original_levels: usize,
}

impl QuantizedImage {
    /// Quantize an 8-bit grayscale raster.
    ///
    /// An out-of-range level amount is replaced by `params.default_levels`
    /// with a warning. Asking for more levels than the raster has distinct
    /// values fails with [`Error::InvalidGrayLevels`].
    pub fn quantize(
        name: impl Into<String>,
        extension: impl Into<String>,
        gray: &Raster<u8>,
        params: &QuantizeParams,
    ) -> Result<Self> {
        let amount = if (1..MAX_PIXEL_VALUE).contains(&params.levels) {
            params.levels
        } else {
            warn!(
                "Wrong gray levels amount {}, it has to be within 1..=255. Using {}",
                params.levels, params.default_levels
            );
            params.default_levels
        };
        if !(1..MAX_PIXEL_VALUE).contains(&amount) {
            return Err(Error::InvalidParameter {
                name: "default_levels",
                value: amount.to_string(),
                reason: "must be within 1..=255".into(),
            });
        }

        let original_levels = gray.distinct_values().len();
        if amount > original_levels {
            return Err(Error::InvalidGrayLevels {
                requested: amount,
                available: original_levels,
            });
        }

        let scale = GrayLevels::scale_for(amount);
        let data = gray
            .data()
            .mapv(|v| ((v as usize / scale) * scale) as u8);

        Ok(Self {
            name: name.into(),
            extension: extension.into(),
            raster: Raster::from_array(data),
            levels: GrayLevels::uniform(amount),
            original_levels,
        })
    }

    /// Wrap a raster that is already quantized against `levels`.
    ///
    /// Pixel membership is not scanned here; a pixel outside the table
    /// surfaces as [`Error::LevelLookupFailure`] when it is first resolved.
    pub fn from_parts(raster: Raster<u8>, levels: GrayLevels) -> Self {
        let original_levels = raster.distinct_values().len();
        Self {
            name: "image".into(),
            extension: ".png".into(),
            raster,
            levels,
            original_levels,
        }
    }

    /// Read an image file as grayscale and quantize it
    pub fn open<P: AsRef<Path>>(path: P, params: &QuantizeParams) -> Result<Self> {
        let path = path.as_ref();
        let gray = io::read_grayscale(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into());
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_else(|| ".png".into());
        Self::quantize(name, extension, &gray, params)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File extension including the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn raster(&self) -> &Raster<u8> {
        &self.raster
    }

    pub fn levels(&self) -> &GrayLevels {
        &self.levels
    }

    /// Number of gray levels, the side of every co-occurrence matrix built from this image
    pub fn levels_amount(&self) -> usize {
        self.levels.len()
    }

    /// Distinct values the raster held before quantization
    pub fn original_levels(&self) -> usize {
        self.original_levels
    }

    pub fn rows(&self) -> usize {
        self.raster.rows()
    }

    pub fn cols(&self) -> usize {
        self.raster.cols()
    }

    /// Resolve the pixel at (row, col) to its gray-level index
    pub fn level_index(&self, row: usize, col: usize) -> Result<usize> {
        let value = self.raster.get(row, col)?;
        self.levels
            .index_of(value)
            .ok_or(Error::LevelLookupFailure { value, row, col })
    }
}
