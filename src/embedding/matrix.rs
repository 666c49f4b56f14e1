use serde::{Deserialize, Serialize};

/// Dense embedding weights, stored row-major:
/// row i is the vector for vocabulary index i.
/// Row 0 belongs to the padding index and stays all zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingMatrix {
    rows:    usize,
    dim:     usize,
    weights: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Allocate a zero-filled matrix of shape (rows, dim)
    pub fn zeros(rows: usize, dim: usize) -> Self {
        Self { rows, dim, weights: vec![0.0; rows * dim] }
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn dim(&self) -> usize { self.dim }

    /// Borrow row i as a slice of length dim
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.weights[start..start + self.dim]
    }

    /// Overwrite row i with `vector`.
    ///
    /// # Panics
    /// Panics if the vector length doesn't match the matrix dim —
    /// that is a programming error, not a data condition.
    pub fn set_row(&mut self, i: usize, vector: &[f32]) {
        assert_eq!(
            vector.len(),
            self.dim,
            "vector length {} does not match embedding dim {}",
            vector.len(),
            self.dim
        );
        let start = i * self.dim;
        self.weights[start..start + self.dim].copy_from_slice(vector);
    }

    /// The whole matrix as one flat row-major slice —
    /// exactly the layout Burn's Tensor::from_floats wants
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    /// True if row i contains only zeros (padding row, or a word
    /// the pre-trained source didn't know)
    pub fn row_is_zero(&self, i: usize) -> bool {
        self.row(i).iter().all(|&x| x == 0.0)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let m = EmbeddingMatrix::zeros(4, 3);
        assert_eq!(m.rows(), 4);
        assert_eq!(m.dim(),  3);
        assert_eq!(m.as_slice().len(), 12);
    }

    #[test]
    fn test_set_and_read_row() {
        let mut m = EmbeddingMatrix::zeros(3, 2);
        m.set_row(1, &[0.5, -0.5]);
        assert_eq!(m.row(1), &[0.5, -0.5]);
        assert!(m.row_is_zero(0));
        assert!(m.row_is_zero(2));
    }

    #[test]
    #[should_panic]
    fn test_wrong_length_row_panics() {
        let mut m = EmbeddingMatrix::zeros(2, 3);
        m.set_row(0, &[1.0]);
    }
}
