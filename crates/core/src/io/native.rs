//! Native image reading/writing
//!
//! Uses the `image` crate; any decodable format is converted to 8-bit luma
//! on read. The output format on write follows the path extension.

use crate::error::{Error, Result};
use crate::raster::Raster;
use image::{DynamicImage, GrayImage};
use std::path::{Path, PathBuf};

/// Read an image file into an 8-bit grayscale raster
pub fn read_grayscale<P: AsRef<Path>>(path: P) -> Result<Raster<u8>> {
    let decoded = image::open(path.as_ref())?;
    luma_to_raster(decoded)
}

fn luma_to_raster(decoded: DynamicImage) -> Result<Raster<u8>> {
    let gray = decoded.to_luma8();
    let (width, height) = gray.dimensions();
    Raster::from_vec(gray.into_raw(), height as usize, width as usize)
}

/// Write a grayscale raster; the format is chosen from the file extension
pub fn write_grayscale<P: AsRef<Path>>(raster: &Raster<u8>, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    raster_to_luma(raster)?.save(path)?;
    Ok(())
}

fn raster_to_luma(raster: &Raster<u8>) -> Result<GrayImage> {
    let (rows, cols) = raster.shape();
    let pixels: Vec<u8> = raster.data().iter().copied().collect();
    GrayImage::from_raw(cols as u32, rows as u32, pixels).ok_or(Error::InvalidDimensions {
        width: cols,
        height: rows,
    })
}

/// `<dir>/<name><extension>`, where `extension` carries its leading dot
pub fn output_path<P: AsRef<Path>>(dir: P, name: &str, extension: &str) -> PathBuf {
    dir.as_ref().join(format!("{}{}", name, extension))
}
