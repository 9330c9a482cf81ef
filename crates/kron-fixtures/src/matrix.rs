//! Dense row-major `f64` matrices.
//!
//! A [`Matrix`] is always rectangular, has at least one row and one
//! column, and holds only finite values. Every constructor checks this,
//! so code downstream (the Kronecker product, literal rendering, the C
//! template) never has to guard against malformed operands.

use rand::Rng;

use crate::error::FixtureError;

/// Upper bound on the number of entries in any matrix, the reference
/// product included.
pub const MAX_ELEMENTS: usize = 1 << 24;

/// `rows * cols`, if it fits under [`MAX_ELEMENTS`].
///
/// # Errors
///
/// Returns [`FixtureError::TooLarge`] on overflow or past the limit.
pub fn element_count(rows: usize, cols: usize) -> Result<usize, FixtureError> {
    rows.checked_mul(cols)
        .filter(|&n| n <= MAX_ELEMENTS)
        .ok_or(FixtureError::TooLarge {
            rows,
            cols,
            max: MAX_ELEMENTS,
        })
}

/// A dense, row-major matrix of finite `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::EmptyMatrix`] if there are no rows or the
    /// first row is empty, [`FixtureError::RaggedRows`] if any row length
    /// differs from the first, and [`FixtureError::NonFinite`] for `NaN`
    /// or infinite entries.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, FixtureError> {
        let Some(first) = rows.first() else {
            return Err(FixtureError::EmptyMatrix);
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(FixtureError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(element_count(rows.len(), cols)?);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(FixtureError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    /// Build a matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::EmptyMatrix`] for a zero dimension,
    /// [`FixtureError::TooLarge`] past [`MAX_ELEMENTS`],
    /// [`FixtureError::ShapeMismatch`] if `data.len() != rows * cols`, and
    /// [`FixtureError::NonFinite`] for `NaN` or infinite entries.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, FixtureError> {
        if rows == 0 || cols == 0 {
            return Err(FixtureError::EmptyMatrix);
        }
        if data.len() != element_count(rows, cols)? {
            return Err(FixtureError::ShapeMismatch {
                rows,
                cols,
                found: data.len(),
            });
        }
        if let Some(idx) = data.iter().position(|v| !v.is_finite()) {
            return Err(FixtureError::NonFinite {
                row: idx / cols,
                col: idx % cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build an `n x 1` column vector.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Matrix::from_vec`].
    pub fn column_vector(values: Vec<f64>) -> Result<Self, FixtureError> {
        let rows = values.len();
        Self::from_vec(rows, 1, values)
    }

    /// Draw a matrix with entries uniform in `[0, 1)`.
    ///
    /// Entries are drawn in row-major order, so a given RNG state always
    /// yields the same matrix.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::EmptyMatrix`] if either dimension is zero
    /// and [`FixtureError::TooLarge`] past [`MAX_ELEMENTS`].
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        rows: usize,
        cols: usize,
    ) -> Result<Self, FixtureError> {
        if rows == 0 || cols == 0 {
            return Err(FixtureError::EmptyMatrix);
        }
        let len = element_count(rows, cols)?;
        let data = (0..len).map(|_| rng.random::<f64>()).collect();
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.data[i * self.cols + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    /// Row-major backing storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Values identical bit-for-bit, so `0.0` and `-0.0` differ.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn from_rows_keeps_row_major_order() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn from_rows_rejects_empty() {
        let empty: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            Matrix::from_rows(&empty),
            Err(FixtureError::EmptyMatrix)
        ));
        assert!(matches!(
            Matrix::from_rows(&[Vec::<f64>::new()]),
            Err(FixtureError::EmptyMatrix)
        ));
    }

    #[test]
    fn element_count_rejects_overflow_and_oversize() {
        assert_eq!(element_count(4, 4).unwrap(), 16);
        assert_eq!(element_count(MAX_ELEMENTS, 1).unwrap(), MAX_ELEMENTS);
        assert!(matches!(
            element_count(1 << 32, 1 << 32),
            Err(FixtureError::TooLarge { .. })
        ));
        assert!(matches!(
            element_count(MAX_ELEMENTS, 2),
            Err(FixtureError::TooLarge { .. })
        ));
    }

    #[test]
    fn random_rejects_huge_shape_without_drawing() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = Matrix::random(&mut rng, 1 << 32, 1 << 32).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::TooLarge {
                rows: 4_294_967_296,
                cols: 4_294_967_296,
                ..
            }
        ));
    }

    #[test]
    fn from_vec_rejects_overflowing_shape() {
        let err = Matrix::from_vec(usize::MAX, 2, vec![1.0]).unwrap_err();
        assert!(matches!(err, FixtureError::TooLarge { .. }));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_non_finite() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![f64::NAN, 0.0]]).unwrap_err();
        assert!(matches!(err, FixtureError::NonFinite { row: 1, col: 0 }));
        assert!(Matrix::column_vector(vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn from_vec_checks_length() {
        let err = Matrix::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, FixtureError::ShapeMismatch { found: 3, .. }));
    }

    #[test]
    fn column_vector_shape() {
        let v = Matrix::column_vector(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(v.shape(), (4, 1));
        assert_eq!(v.iter_rows().count(), 4);
    }

    #[test]
    fn random_is_seed_deterministic_and_in_unit_interval() {
        let a = Matrix::random(&mut ChaCha8Rng::seed_from_u64(7), 4, 3).unwrap();
        let b = Matrix::random(&mut ChaCha8Rng::seed_from_u64(7), 4, 3).unwrap();
        assert!(a.bitwise_eq(&b));
        assert!(a.as_slice().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn random_rejects_zero_dimension() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(Matrix::random(&mut rng, 0, 3).is_err());
        assert!(Matrix::random(&mut rng, 3, 0).is_err());
    }

    #[test]
    fn bitwise_eq_distinguishes_signed_zero() {
        let pos = Matrix::column_vector(vec![0.0]).unwrap();
        let neg = Matrix::column_vector(vec![-0.0]).unwrap();
        assert_eq!(pos, neg);
        assert!(!pos.bitwise_eq(&neg));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let m = Matrix::column_vector(vec![1.0]).unwrap();
        let _ = m.get(0, 1);
    }
}
