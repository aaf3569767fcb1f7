//! # Haralick Algorithms
//!
//! Texture analysis on quantized grayscale images.
//!
//! ## Available Algorithm Categories
//!
//! - **texture**: Gray-Level Co-occurrence Matrices (GLCM), Haralick
//!   descriptors (energy, entropy, contrast, homogeneity), global and
//!   sliding-window feature maps

pub mod texture;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::texture::{
        co_occurrence, extract_feature, global_descriptors, mean_co_occurrence, CoMatrix,
        ExtractParams, FeatureMap, GlcmFeature, Offset, Region, TextureDescriptors,
        TextureExtraction,
    };
    pub use haralick_core::prelude::*;
    pub use haralick_parallel::ProcessingMode;
}
