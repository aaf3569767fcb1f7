//! Property checks for GLCM construction, reductions and window scans
//! over small synthetic images.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use haralick_algorithms::texture::{
    co_occurrence, co_occurrence_counts, extract_feature, global_descriptors, mean_co_occurrence,
    ExtractParams, GlcmFeature, Offset, Region, TextureDescriptors,
};
use haralick_core::{Error, GrayLevels, QuantizeParams, QuantizedImage, Raster};
use haralick_parallel::ProcessingMode;

/// Deterministic pseudo-random 8-bit raster (LCG)
fn noise(rows: usize, cols: usize, seed: u64) -> Raster<u8> {
    let mut state = seed;
    let data = (0..rows * cols)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect();
    Raster::from_vec(data, rows, cols).unwrap()
}

fn noisy_image(rows: usize, cols: usize, levels: usize, seed: u64) -> QuantizedImage {
    QuantizedImage::quantize(
        "noise",
        ".png",
        &noise(rows, cols, seed),
        &QuantizeParams {
            levels,
            ..Default::default()
        },
    )
    .unwrap()
}

fn uniform_image(rows: usize, cols: usize, value: u8) -> QuantizedImage {
    QuantizedImage::from_parts(
        Raster::filled(rows, cols, value),
        GrayLevels::new(vec![value]).unwrap(),
    )
}

fn regions(image: &QuantizedImage) -> Vec<Region> {
    vec![
        Region::full(image),
        Region::window(0, 0, 3),
        Region::window(2, 5, 5),
        Region::window(4, 1, 7),
    ]
}

#[test]
fn raw_sum_equals_scanned_pairs() {
    let image = noisy_image(12, 15, 8, 7);
    for offset in Offset::ALL {
        let full = co_occurrence_counts(&image, offset, Region::full(&image)).unwrap();
        let (dx, dy) = (offset.dx.unsigned_abs() as usize, offset.dy.unsigned_abs() as usize);
        let expected = (12 - dy) * (15 - dx);
        assert_eq!(full.sum(), expected as f64, "offset {}", offset);

        // Windows only pair pixels with neighbors inside the window
        let window = co_occurrence_counts(&image, offset, Region::window(3, 4, 5)).unwrap();
        let expected = (5 - dy) * (5 - dx);
        assert_eq!(window.sum(), expected as f64, "offset {}", offset);
    }
}

#[test]
fn normalized_matrices_sum_to_one() {
    let image = noisy_image(12, 15, 16, 11);
    for region in regions(&image) {
        for offset in Offset::ALL {
            for symmetric in [true, false] {
                let glcm = co_occurrence(&image, offset, region, symmetric).unwrap();
                assert_relative_eq!(glcm.sum(), 1.0, epsilon = 1e-9);
                assert!(glcm.as_slice().iter().all(|&p| p >= 0.0));
            }
        }
        let mean = mean_co_occurrence(&image, &Offset::ALL, region, false).unwrap();
        assert_relative_eq!(mean.sum(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn symmetric_matrices_equal_their_transpose() {
    let image = noisy_image(10, 10, 8, 3);
    for offset in Offset::ALL {
        let glcm = co_occurrence(&image, offset, Region::full(&image), true).unwrap();
        assert!(glcm.is_symmetric(1e-12), "offset {}", offset);
    }
    let mean = mean_co_occurrence(&image, &Offset::ALL, Region::full(&image), true).unwrap();
    assert!(mean.is_symmetric(1e-12));
}

#[test]
fn singleton_mean_equals_single() {
    let image = noisy_image(12, 12, 8, 5);
    for region in regions(&image) {
        for offset in Offset::ALL {
            for symmetric in [true, false] {
                let single = co_occurrence(&image, offset, region, symmetric).unwrap();
                let mean = mean_co_occurrence(&image, &[offset], region, symmetric).unwrap();
                assert_eq!(single.size(), mean.size());
                for (a, b) in single.as_slice().iter().zip(mean.as_slice()) {
                    assert_abs_diff_eq!(*a, *b, epsilon = 1e-15);
                }
            }
        }
    }
}

#[test]
fn descriptor_ranges() {
    for (levels, seed) in [(2, 1), (4, 2), (8, 3), (16, 4), (32, 5)] {
        let image = noisy_image(20, 20, levels, seed);
        let n = image.levels_amount() as f64;
        for region in regions(&image) {
            for offset in Offset::ALL {
                let glcm = co_occurrence(&image, offset, region, false).unwrap();
                let d = TextureDescriptors::from_matrix(&glcm);
                assert!(d.energy >= 1.0 / (n * n) - 1e-12 && d.energy <= 1.0 + 1e-12);
                assert!(d.homogeneity > 0.0 && d.homogeneity <= 1.0 + 1e-12);
                assert!(d.entropy >= 0.0);
                assert!(d.contrast >= 0.0);
            }
        }
    }
}

#[test]
fn uniform_image_descriptors() {
    let image = uniform_image(8, 8, 96);
    for offset in Offset::ALL {
        for symmetric in [true, false] {
            let glcm = co_occurrence(&image, offset, Region::full(&image), symmetric).unwrap();
            assert_eq!(glcm.size(), 1);
            assert_relative_eq!(glcm.get(0, 0), 1.0);

            let d = TextureDescriptors::from_matrix(&glcm);
            assert_relative_eq!(d.energy, 1.0);
            assert_abs_diff_eq!(d.entropy, 0.0);
            assert_abs_diff_eq!(d.contrast, 0.0);
            assert_relative_eq!(d.homogeneity, 1.0);
        }
    }
}

#[test]
fn uniform_image_feature_map() {
    let image = uniform_image(9, 9, 0);
    let map = extract_feature(
        &image,
        &ExtractParams {
            window_size: 3,
            offsets: Offset::ALL.to_vec(),
            feature: GlcmFeature::Energy,
            mode: ProcessingMode::Sequential,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(map.written(), 49);
    assert_relative_eq!(map.values().get(4, 4).unwrap(), 1.0);
}

#[test]
fn five_by_five_window_three_writes_nine_centers() {
    let image = noisy_image(5, 5, 2, 9);
    let map = extract_feature(
        &image,
        &ExtractParams {
            window_size: 3,
            offsets: vec![Offset::DEG_90],
            feature: GlcmFeature::Contrast,
            mode: ProcessingMode::Sequential,
            ..Default::default()
        },
    )
    .unwrap();

    let written: Vec<(usize, usize)> = (0..5)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .filter(|&(r, c)| !map.values().get(r, c).unwrap().is_nan())
        .collect();
    assert_eq!(written.len(), 9);
    assert!(written.iter().all(|&(r, c)| (1..=3).contains(&r) && (1..=3).contains(&c)));
}

#[test]
fn illegal_offset_rejected_everywhere() {
    let image = noisy_image(6, 6, 4, 2);
    let bad = Offset { dx: 2, dy: 0 };
    let region = Region::full(&image);

    assert!(matches!(
        co_occurrence(&image, bad, region, true),
        Err(Error::InvalidOffset { dx: 2, dy: 0 })
    ));
    assert!(matches!(
        mean_co_occurrence(&image, &[Offset::DEG_0, bad], region, true),
        Err(Error::InvalidOffset { dx: 2, dy: 0 })
    ));
    assert!(matches!(
        global_descriptors(&image, &[bad], true),
        Err(Error::InvalidOffset { dx: 2, dy: 0 })
    ));
    for offsets in [vec![bad], vec![Offset::DEG_0, bad]] {
        let result = extract_feature(
            &image,
            &ExtractParams {
                window_size: 3,
                offsets,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::InvalidOffset { dx: 2, dy: 0 })));
    }
}

#[test]
fn empty_offset_set_rejected() {
    let image = noisy_image(6, 6, 4, 2);
    assert!(matches!(
        mean_co_occurrence(&image, &[], Region::full(&image), false),
        Err(Error::EmptyOffsetSet)
    ));
    assert!(matches!(
        extract_feature(
            &image,
            &ExtractParams {
                offsets: vec![],
                ..Default::default()
            }
        ),
        Err(Error::EmptyOffsetSet)
    ));
}

#[test]
fn parallel_and_sequential_scans_agree() {
    let image = noisy_image(24, 19, 8, 21);
    for feature in GlcmFeature::ALL {
        let run = |mode| {
            extract_feature(
                &image,
                &ExtractParams {
                    window_size: 5,
                    offsets: Offset::ALL.to_vec(),
                    feature,
                    mode,
                    ..Default::default()
                },
            )
            .unwrap()
        };
        let seq = run(ProcessingMode::Sequential);
        let par = run(ProcessingMode::ParallelWith(4));
        assert_eq!(seq.image().data(), par.image().data());
        for (a, b) in seq.values().data().iter().zip(par.values().data().iter()) {
            assert!((a.is_nan() && b.is_nan()) || a == b);
        }
    }
}

#[test]
fn window_value_matches_direct_computation() {
    let image = noisy_image(11, 13, 8, 17);
    let map = extract_feature(
        &image,
        &ExtractParams {
            window_size: 5,
            offsets: vec![Offset::DEG_45, Offset::DEG_135],
            feature: GlcmFeature::Homogeneity,
            mode: ProcessingMode::Sequential,
            ..Default::default()
        },
    )
    .unwrap();

    let glcm = mean_co_occurrence(
        &image,
        &[Offset::DEG_45, Offset::DEG_135],
        Region::window(3, 6, 5),
        false,
    )
    .unwrap();
    let expected = GlcmFeature::Homogeneity.evaluate(&glcm);
    assert_relative_eq!(map.values().get(5, 8).unwrap(), expected, epsilon = 1e-12);
    assert_eq!(map.image().get(5, 8).unwrap(), image.levels().to_gray(expected));
}

#[test]
fn corrupted_raster_fails_level_lookup() {
    let mut raster = Raster::filled(6, 6, 64u8);
    raster.set(4, 4, 65).unwrap();
    let image = QuantizedImage::from_parts(raster, GrayLevels::uniform(4));
    let result = extract_feature(
        &image,
        &ExtractParams {
            window_size: 3,
            offsets: vec![Offset::DEG_0],
            mode: ProcessingMode::Parallel,
            ..Default::default()
        },
    );
    assert!(matches!(
        result,
        Err(Error::LevelLookupFailure { value: 65, .. })
    ));
}
