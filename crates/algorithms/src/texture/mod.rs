//! Texture and feature extraction algorithms
//!
//! - **Offset**: the four canonical co-occurrence directions
//! - **CoMatrix**: Gray-Level Co-occurrence Matrix storage and normalization
//! - **Engine**: single and mean GLCM over a whole image or a window
//! - **Features**: energy, entropy, contrast, homogeneity
//! - **Extract**: sliding-window feature maps

mod engine;
mod extract;
mod features;
mod global;
mod matrix;
mod offset;

pub use engine::{co_occurrence, co_occurrence_counts, mean_co_occurrence, Region};
pub use extract::{
    extract_feature, feature_map_name, resolve_window_size, ExtractParams, FeatureMap,
    TextureExtraction,
};
pub use features::{contrast, energy, entropy, homogeneity, GlcmFeature, TextureDescriptors};
pub use global::global_descriptors;
pub use matrix::CoMatrix;
pub use offset::Offset;
