//! Haralick texture descriptors
//!
//! Pure reductions of a normalized co-occurrence matrix `P` of size `N`,
//! with indices `i, j` in `0..N`.

use super::matrix::CoMatrix;
use haralick_core::Error;
use std::fmt;
use std::str::FromStr;

/// Available GLCM texture measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlcmFeature {
    /// Angular Second Moment, a uniformity measure
    Energy,
    /// Randomness/disorder
    Entropy,
    /// Local intensity variation
    Contrast,
    /// Inverse Difference Moment
    Homogeneity,
}

impl GlcmFeature {
    pub const ALL: [GlcmFeature; 4] = [
        GlcmFeature::Energy,
        GlcmFeature::Entropy,
        GlcmFeature::Contrast,
        GlcmFeature::Homogeneity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GlcmFeature::Energy => "energy",
            GlcmFeature::Entropy => "entropy",
            GlcmFeature::Contrast => "contrast",
            GlcmFeature::Homogeneity => "homogeneity",
        }
    }

    /// Reduce `glcm` to this feature
    pub fn evaluate(&self, glcm: &CoMatrix) -> f64 {
        match self {
            GlcmFeature::Energy => energy(glcm),
            GlcmFeature::Entropy => entropy(glcm),
            GlcmFeature::Contrast => contrast(glcm),
            GlcmFeature::Homogeneity => homogeneity(glcm),
        }
    }
}

impl fmt::Display for GlcmFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GlcmFeature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "energy" | "asm" => Ok(GlcmFeature::Energy),
            "entropy" => Ok(GlcmFeature::Entropy),
            "contrast" => Ok(GlcmFeature::Contrast),
            "homogeneity" | "idm" => Ok(GlcmFeature::Homogeneity),
            _ => Err(Error::InvalidParameter {
                name: "feature",
                value: s.to_string(),
                reason: "use energy, entropy, contrast or homogeneity".into(),
            }),
        }
    }
}

/// Σ P(i,j)²
pub fn energy(glcm: &CoMatrix) -> f64 {
    glcm.as_slice().iter().map(|p| p * p).sum()
}

/// −Σ P(i,j)·ln P(i,j), zero cells skipped
pub fn entropy(glcm: &CoMatrix) -> f64 {
    let mut val = 0.0;
    for &p in glcm.as_slice() {
        if p != 0.0 {
            val += p * p.ln();
        }
    }
    -val
}

/// Σ P(i,j)·(i−j)²
pub fn contrast(glcm: &CoMatrix) -> f64 {
    weighted_sum(glcm, |d| d * d)
}

/// Σ P(i,j) / (1 + (i−j)²)
pub fn homogeneity(glcm: &CoMatrix) -> f64 {
    weighted_sum(glcm, |d| 1.0 / (1.0 + d * d))
}

fn weighted_sum(glcm: &CoMatrix, weight: impl Fn(f64) -> f64) -> f64 {
    let n = glcm.size();
    let mut val = 0.0;
    for i in 0..n {
        for j in 0..n {
            val += glcm.get(i, j) * weight(i as f64 - j as f64);
        }
    }
    val
}

/// All four descriptors of one matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureDescriptors {
    pub energy: f64,
    pub entropy: f64,
    pub contrast: f64,
    pub homogeneity: f64,
}

impl TextureDescriptors {
    pub fn from_matrix(glcm: &CoMatrix) -> Self {
        Self {
            energy: energy(glcm),
            entropy: entropy(glcm),
            contrast: contrast(glcm),
            homogeneity: homogeneity(glcm),
        }
    }

    pub fn get(&self, feature: GlcmFeature) -> f64 {
        match feature {
            GlcmFeature::Energy => self.energy,
            GlcmFeature::Entropy => self.entropy,
            GlcmFeature::Contrast => self.contrast,
            GlcmFeature::Homogeneity => self.homogeneity,
        }
    }
}
