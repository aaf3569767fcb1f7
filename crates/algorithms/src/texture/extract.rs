//! Sliding-window texture feature maps
//!
//! For every window that fits entirely inside the image, a GLCM is built
//! from the window alone and reduced to one feature value, which is written
//! at the window center. Pixels closer than half a window to an edge are
//! never written and keep the background value.
//!
//! Origins are inclusive on both axes: the last origin row is `rows - w`,
//! so the window touching the bottom edge is scanned too.

use super::engine::{co_occurrence, mean_co_occurrence, Region};
use super::features::GlcmFeature;
use super::offset::Offset;
use haralick_core::{io, Algorithm, Error, QuantizedImage, Raster, Result};
use haralick_parallel::{ParallelStrategy, ProcessingMode};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Parameters for sliding-window feature extraction
#[derive(Debug, Clone)]
pub struct ExtractParams {
    /// Side of the square window, a positive odd number fitting the image
    pub window_size: usize,
    /// Window side used when `window_size` is not acceptable
    pub default_window_size: usize,
    /// One offset, or several for a mean GLCM
    pub offsets: Vec<Offset>,
    /// Which texture measure to compute
    pub feature: GlcmFeature,
    /// How window rows are scheduled
    pub mode: ProcessingMode,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            window_size: 7,
            default_window_size: 7,
            offsets: vec![Offset::DEG_0],
            feature: GlcmFeature::Contrast,
            mode: ProcessingMode::Parallel,
        }
    }
}

/// A per-pixel texture map and the metadata needed to save it
#[derive(Debug, Clone)]
pub struct FeatureMap {
    name: String,
    extension: String,
    values: Raster<f64>,
    image: Raster<u8>,
    feature: GlcmFeature,
    offsets: Vec<Offset>,
    window_size: usize,
    written: usize,
}

impl FeatureMap {
    /// Descriptive output name, see [`feature_map_name`]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw feature values; unwritten cells are NaN
    pub fn values(&self) -> &Raster<f64> {
        &self.values
    }

    /// Feature values snapped to the source image gray levels; unwritten cells are 0
    pub fn image(&self) -> &Raster<u8> {
        &self.image
    }

    pub fn feature(&self) -> GlcmFeature {
        self.feature
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Window side actually used, after any fallback
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of window centers written
    pub fn written(&self) -> usize {
        self.written
    }

    /// Save the gray-level map as `<dir>/<name><extension>`
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = io::output_path(dir, &self.name, &self.extension);
        io::write_grayscale(&self.image, &path)?;
        Ok(path)
    }
}

/// Build the output name of a feature map.
///
/// `<base>_<feature>_offset(dx,dy)_windowSize_<w>_grayLevels_<n>` for one
/// offset, `<base>_<feature>_mean_offset_windowSize_<w>_grayLevels_<n>` for
/// several.
pub fn feature_map_name(
    base: &str,
    feature: GlcmFeature,
    offsets: &[Offset],
    window_size: usize,
    levels: usize,
) -> String {
    let offset_part = match offsets {
        [offset] => format!("offset{}", offset),
        _ => "mean_offset".to_string(),
    };
    format!(
        "{}_{}_{}_windowSize_{}_grayLevels_{}",
        base, feature, offset_part, window_size, levels
    )
}

/// Accept `requested` if it is a positive odd number not larger than the
/// image, otherwise warn and fall back to `default`.
///
/// # Errors
/// [`Error::InvalidParameter`] when the fallback is needed and `default` is
/// not a positive odd number. A default larger than the image is accepted;
/// such a window has no origin.
pub fn resolve_window_size(
    requested: usize,
    default: usize,
    rows: usize,
    cols: usize,
) -> Result<usize> {
    if requested % 2 == 1 && requested <= rows && requested <= cols {
        return Ok(requested);
    }
    if default % 2 == 0 {
        return Err(Error::InvalidParameter {
            name: "default_window_size",
            value: default.to_string(),
            reason: "must be a positive odd number".into(),
        });
    }
    let err = Error::InvalidWindowSize {
        size: requested,
        rows,
        cols,
    };
    warn!("{}. Using default window size {}", err, default);
    Ok(default)
}

/// Compute a sliding-window texture feature map.
///
/// Offsets are validated before any window is processed. A single offset
/// uses its one-sided GLCM per window; several offsets use the mean of
/// their one-sided GLCMs. Window origins cover rows `0..=rows - w` and
/// columns `0..=cols - w`; each value lands at `(row + w/2, col + w/2)`.
///
/// # Errors
/// - [`Error::EmptyOffsetSet`] / [`Error::InvalidOffset`] for a bad offset set
/// - [`Error::InvalidParameter`] when an unusable window falls back to an even default
/// - [`Error::LevelLookupFailure`] when a pixel is not one of the image gray levels
pub fn extract_feature(image: &QuantizedImage, params: &ExtractParams) -> Result<FeatureMap> {
    Offset::validate_all(&params.offsets)?;

    let (rows, cols) = image.raster().shape();
    let window =
        resolve_window_size(params.window_size, params.default_window_size, rows, cols)?;
    let half = window / 2;

    let (origin_rows, origin_cols) = if window > rows || window > cols {
        warn!(
            "Window size {} does not fit a {}x{} image, no window is processed",
            window, rows, cols
        );
        (0, 0)
    } else {
        (rows - window + 1, cols - window + 1)
    };

    let offsets = params.offsets.as_slice();
    let feature = params.feature;

    let row_values: Vec<Vec<f64>> = params.mode.try_par_map(0..origin_rows, |row| {
        (0..origin_cols)
            .map(|col| {
                let region = Region::window(row, col, window);
                let glcm = match offsets {
                    [offset] => co_occurrence(image, *offset, region, false)?,
                    _ => mean_co_occurrence(image, offsets, region, false)?,
                };
                Ok(feature.evaluate(&glcm))
            })
            .collect::<Result<Vec<f64>>>()
    })?;

    let mut values = image.raster().like(f64::NAN);
    values.set_nodata(Some(f64::NAN));
    let mut gray = image.raster().like(0u8);
    let levels = image.levels();

    for (row, row_data) in row_values.iter().enumerate() {
        for (col, &value) in row_data.iter().enumerate() {
            values.set(row + half, col + half, value)?;
            gray.set(row + half, col + half, levels.to_gray(value))?;
        }
    }

    let written = origin_rows * origin_cols;
    debug!(
        "{} map: {} windows of {}x{} over {} offset(s)",
        feature,
        written,
        window,
        window,
        offsets.len()
    );

    Ok(FeatureMap {
        name: feature_map_name(image.name(), feature, offsets, window, image.levels_amount()),
        extension: image.extension().to_string(),
        values,
        image: gray,
        feature,
        offsets: offsets.to_vec(),
        window_size: window,
        written,
    })
}

/// Sliding-window GLCM texture extraction as an [`Algorithm`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureExtraction;

impl Algorithm for TextureExtraction {
    type Input = QuantizedImage;
    type Output = FeatureMap;
    type Params = ExtractParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "GLCM texture"
    }

    fn description(&self) -> &'static str {
        "Per-pixel Haralick texture feature from a GLCM computed in a sliding window"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        extract_feature(&input, &params)
    }
}
