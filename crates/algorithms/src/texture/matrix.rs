//! Gray-Level Co-occurrence Matrix storage
//!
//! A `CoMatrix` is an `n x n` grid of non-negative reals in one contiguous
//! buffer indexed by `i * n + j`. It goes through accumulation, optional
//! symmetrization and normalization, in that order.

use haralick_core::{Error, Result};
use std::fmt;

/// Highest number of decimals used when printing a matrix
const MAX_PRINT_PRECISION: usize = 5;

/// Co-occurrence matrix keyed by (current level index, neighbor level index)
#[derive(Debug, Clone, PartialEq)]
pub struct CoMatrix {
    n: usize,
    cells: Vec<f64>,
    normalized: bool,
}

impl CoMatrix {
    /// Empty raw matrix for `n` gray levels
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0.0; n * n],
            normalized: false,
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }

    /// Row-major view of all cells
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Whether the matrix has been turned into probabilities
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Count one (i, j) pair
    pub fn accumulate(&mut self, i: usize, j: usize) {
        self.cells[i * self.n + j] += 1.0;
    }

    pub fn sum(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Replace `M` with `M + Mᵗ`.
    ///
    /// Only valid on raw counts; a normalized matrix is rejected.
    pub fn symmetrize(&mut self) -> Result<()> {
        if self.normalized {
            return Err(Error::Other(
                "cannot symmetrize a normalized co-occurrence matrix".into(),
            ));
        }
        let n = self.n;
        for i in 0..n {
            for j in (i + 1)..n {
                let total = self.cells[i * n + j] + self.cells[j * n + i];
                self.cells[i * n + j] = total;
                self.cells[j * n + i] = total;
            }
            self.cells[i * n + i] *= 2.0;
        }
        Ok(())
    }

    /// Divide every cell by the sum of all cells.
    ///
    /// When nothing was accumulated the matrix stays all-zero and
    /// [`Error::DegenerateNormalization`] is returned.
    pub fn try_normalize(&mut self) -> Result<()> {
        let total = self.sum();
        if total <= 0.0 {
            return Err(Error::DegenerateNormalization);
        }
        for v in &mut self.cells {
            *v /= total;
        }
        self.normalized = true;
        Ok(())
    }

    /// Elementwise average of matrices of identical size
    pub fn mean(matrices: &[CoMatrix]) -> Result<CoMatrix> {
        let first = matrices.first().ok_or(Error::EmptyOffsetSet)?;
        let n = first.n;
        let mut out = CoMatrix::zeros(n);

        for m in matrices {
            if m.n != n {
                return Err(Error::SizeMismatch {
                    er: n,
                    ec: n,
                    ar: m.n,
                    ac: m.n,
                });
            }
            for (acc, v) in out.cells.iter_mut().zip(&m.cells) {
                *acc += v;
            }
        }

        let count = matrices.len() as f64;
        for v in &mut out.cells {
            *v /= count;
        }
        out.normalized = matrices.iter().all(|m| m.normalized);
        Ok(out)
    }

    /// Whether `M == Mᵗ` within `tolerance`
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.n;
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance))
    }

    /// Render the matrix with `precision` decimals (capped at 5)
    pub fn format(&self, precision: usize) -> String {
        let precision = precision.min(MAX_PRINT_PRECISION);
        let mut out = String::new();
        for i in 0..self.n {
            let row: Vec<String> = (0..self.n)
                .map(|j| format!("{:.*}", precision, self.get(i, j)))
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for CoMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(f.precision().unwrap_or(MAX_PRINT_PRECISION)))
    }
}
