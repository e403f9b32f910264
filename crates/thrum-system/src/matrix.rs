//! Small dense square matrix over `f64`.
//!
//! The system has at most ten degrees of freedom, so a flat row-major
//! buffer is the whole story: no sparse storage, no external linear
//! algebra.

/// A dense `n x n` matrix stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Create an `n x n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Element at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Add `delta` to the element at `(row, col)`.
    pub fn add(&mut self, row: usize, col: usize, delta: f64) {
        self.data[row * self.n + col] += delta;
    }

    /// The `row`-th row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.n..(row + 1) * self.n]
    }

    /// Dot product of one row with a vector.
    pub fn row_dot(&self, row: usize, x: &[f64]) -> f64 {
        self.row(row).iter().zip(x).map(|(a, b)| a * b).sum()
    }

    /// Matrix-vector product into a caller-provided buffer.
    pub fn mul_vec(&self, x: &[f64], out: &mut [f64]) {
        debug_assert_eq!(x.len(), self.n);
        debug_assert_eq!(out.len(), self.n);
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.row_dot(row, x);
        }
    }

    /// Whether the matrix equals its transpose to within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if (self.at(i, j) - self.at(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
