//! GLCM engine
//!
//! Builds co-occurrence matrices for one offset or for the mean of several
//! offsets, over a whole image or over a rectangular region of it.
//!
//! Neighbor lookups are scoped to the region: a pixel whose neighbor falls
//! outside the region is skipped even if the neighbor exists in the image.
//! Pixels within one step of the region edge therefore contribute fewer
//! pairs than interior pixels, a known boundary bias that feature values
//! are defined against.

use super::matrix::CoMatrix;
use super::offset::Offset;
use haralick_core::{Error, QuantizedImage, Result};
use tracing::debug;

/// Rectangular part of an image, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: usize,
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

impl Region {
    /// The whole image
    pub fn full(image: &QuantizedImage) -> Self {
        Self {
            top: 0,
            left: 0,
            height: image.rows(),
            width: image.cols(),
        }
    }

    /// Square window of side `size` with its top-left corner at (top, left)
    pub fn window(top: usize, left: usize, size: usize) -> Self {
        Self {
            top,
            left,
            height: size,
            width: size,
        }
    }

    fn bottom(&self) -> usize {
        self.top + self.height
    }

    fn right(&self) -> usize {
        self.left + self.width
    }

    /// Whether (row, col) lies inside the region, for signed coordinates
    fn contains(&self, row: isize, col: isize) -> bool {
        row >= self.top as isize
            && row < self.bottom() as isize
            && col >= self.left as isize
            && col < self.right() as isize
    }

    /// `bottom` and `right` are only meaningful once this has passed
    fn check_fits(&self, image: &QuantizedImage) -> Result<()> {
        let (rows, cols) = image.raster().shape();
        let fits = matches!(self.top.checked_add(self.height), Some(bottom) if bottom <= rows)
            && matches!(self.left.checked_add(self.width), Some(right) if right <= cols);
        if !fits {
            return Err(Error::RegionOutOfBounds {
                top: self.top,
                left: self.left,
                height: self.height,
                width: self.width,
                rows,
                cols,
            });
        }
        Ok(())
    }
}

/// Compute the normalized GLCM of `image` for one offset over `region`.
///
/// With `symmetric` the raw counts are added to their transpose before
/// normalization, so each pair is also counted in the opposite direction.
/// A region without any pixel pair yields an all-zero matrix.
///
/// # Errors
/// - [`Error::InvalidOffset`] for an offset outside the four canonical ones
/// - [`Error::RegionOutOfBounds`] when `region` does not fit the image
/// - [`Error::LevelLookupFailure`] when a pixel is not one of the image gray levels
pub fn co_occurrence(
    image: &QuantizedImage,
    offset: Offset,
    region: Region,
    symmetric: bool,
) -> Result<CoMatrix> {
    offset.validate()?;
    region.check_fits(image)?;
    accumulate_normalized(image, offset, region, symmetric)
}

/// Compute the elementwise mean of the per-offset GLCMs over `region`.
///
/// The whole offset set is validated before any matrix is built.
///
/// # Errors
/// - [`Error::EmptyOffsetSet`] when `offsets` is empty
/// - any error of [`co_occurrence`]
pub fn mean_co_occurrence(
    image: &QuantizedImage,
    offsets: &[Offset],
    region: Region,
    symmetric: bool,
) -> Result<CoMatrix> {
    Offset::validate_all(offsets)?;
    region.check_fits(image)?;

    let matrices = offsets
        .iter()
        .map(|&offset| accumulate_normalized(image, offset, region, symmetric))
        .collect::<Result<Vec<_>>>()?;

    CoMatrix::mean(&matrices)
}

/// Raw pair counts of `image` for one offset over `region`, neither
/// symmetrized nor normalized. The matrix sum is the number of pairs scanned.
pub fn co_occurrence_counts(
    image: &QuantizedImage,
    offset: Offset,
    region: Region,
) -> Result<CoMatrix> {
    offset.validate()?;
    region.check_fits(image)?;
    count_pairs(image, offset, region)
}

fn count_pairs(image: &QuantizedImage, offset: Offset, region: Region) -> Result<CoMatrix> {
    let mut glcm = CoMatrix::zeros(image.levels_amount());
    let (dx, dy) = (offset.dx as isize, offset.dy as isize);

    for row in region.top..region.bottom() {
        let neighbor_row = row as isize + dy;
        for col in region.left..region.right() {
            let neighbor_col = col as isize + dx;
            if !region.contains(neighbor_row, neighbor_col) {
                continue;
            }

            let current = image.level_index(row, col)?;
            let neighbor = image.level_index(neighbor_row as usize, neighbor_col as usize)?;
            glcm.accumulate(current, neighbor);
        }
    }

    Ok(glcm)
}

/// Scan `region` for one already validated offset
fn accumulate_normalized(
    image: &QuantizedImage,
    offset: Offset,
    region: Region,
    symmetric: bool,
) -> Result<CoMatrix> {
    let mut glcm = count_pairs(image, offset, region)?;

    if symmetric {
        glcm.symmetrize()?;
    }

    match glcm.try_normalize() {
        Ok(()) => {}
        Err(Error::DegenerateNormalization) => {
            debug!(
                "No pixel pairs for offset {} in region {:?}, keeping an all-zero GLCM",
                offset, region
            );
        }
        Err(e) => return Err(e),
    }

    Ok(glcm)
}
