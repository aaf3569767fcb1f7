//! Error types for haralick

use thiserror::Error;

/// Main error type for haralick operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid offset ({dx}, {dy}): allowed values are (1, 0), (0, 1), (1, 1) and (-1, 1) as (dx, dy)")]
    InvalidOffset { dx: i32, dy: i32 },

    #[error("Mean GLCM requested without any offset")]
    EmptyOffsetSet,

    #[error("Pixel value {value} at ({row}, {col}) is not one of the image gray levels")]
    LevelLookupFailure { value: u8, row: usize, col: usize },

    #[error("Co-occurrence matrix has no accumulated pairs, cannot normalize")]
    DegenerateNormalization,

    #[error("Invalid window size {size}: must be a positive odd number fitting a {rows}x{cols} image")]
    InvalidWindowSize { size: usize, rows: usize, cols: usize },

    #[error("Invalid gray levels amount {requested}: image only has {available} distinct levels")]
    InvalidGrayLevels { requested: usize, available: usize },

    #[error(
        "Region (top {top}, left {left}, {height}x{width}) does not fit a raster of size ({rows}, {cols})"
    )]
    RegionOutOfBounds {
        top: usize,
        left: usize,
        height: usize,
        width: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for haralick operations
pub type Result<T> = std::result::Result<T, Error>;
