//! Whole-image texture descriptors

use super::engine::{co_occurrence, mean_co_occurrence, Region};
use super::features::TextureDescriptors;
use super::offset::Offset;
use haralick_core::{QuantizedImage, Result};

/// Compute all four descriptors from the GLCM of the whole image.
///
/// One offset uses its GLCM directly; several offsets use their mean GLCM.
pub fn global_descriptors(
    image: &QuantizedImage,
    offsets: &[Offset],
    symmetric: bool,
) -> Result<TextureDescriptors> {
    Offset::validate_all(offsets)?;
    let region = Region::full(image);
    let glcm = match offsets {
        [offset] => co_occurrence(image, *offset, region, symmetric)?,
        _ => mean_co_occurrence(image, offsets, region, symmetric)?,
    };
    Ok(TextureDescriptors::from_matrix(&glcm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use haralick_core::{Error, GrayLevels, Raster};

    fn stripes(size: usize) -> QuantizedImage {
        let data = (0..size * size)
            .map(|i| if (i % size) % 2 == 0 { 0 } else { 128 })
            .collect();
        let raster = Raster::from_vec(data, size, size).unwrap();
        QuantizedImage::from_parts(raster, GrayLevels::uniform(2))
    }

    #[test]
    fn test_vertical_stripes() {
        let image = stripes(6);

        // Along the stripes every pair matches
        let along = global_descriptors(&image, &[Offset::DEG_90], true).unwrap();
        assert_relative_eq!(along.contrast, 0.0);
        assert_relative_eq!(along.homogeneity, 1.0, epsilon = 1e-12);

        // Across the stripes every pair differs by one level
        let across = global_descriptors(&image, &[Offset::DEG_0], true).unwrap();
        assert_relative_eq!(across.contrast, 1.0, epsilon = 1e-12);
        assert_relative_eq!(across.homogeneity, 0.5, epsilon = 1e-12);
        assert_relative_eq!(across.energy, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_of_directions() {
        let image = stripes(6);
        let both = global_descriptors(&image, &[Offset::DEG_0, Offset::DEG_90], true).unwrap();
        assert_relative_eq!(both.contrast, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_empty_offsets() {
        let image = stripes(4);
        assert!(matches!(
            global_descriptors(&image, &[], true),
            Err(Error::EmptyOffsetSet)
        ));
    }
}
