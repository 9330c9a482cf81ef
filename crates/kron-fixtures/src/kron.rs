//! Reference Kronecker product.
//!
//! C\[i*p + k, j*q + l\] = A\[i, j\] * B\[k, l\]
//!
//! For A (m x n) and B (p x q) the result is (m*p) x (n*q); block
//! `(i, j)` of the result is `A[i, j] * B`. Each element is a single
//! multiplication, so the reference is exact in `f64`.

use crate::error::FixtureError;
use crate::matrix::{MAX_ELEMENTS, Matrix, element_count};

/// Kronecker product `A ⊗ B`.
///
/// # Errors
///
/// Returns [`FixtureError::TooLarge`] if the product would exceed
/// [`MAX_ELEMENTS`], and [`FixtureError::NonFinite`] if a product of two
/// finite entries overflows to infinity.
pub fn kron(a: &Matrix, b: &Matrix) -> Result<Matrix, FixtureError> {
    let (m, n) = a.shape();
    let (p, q) = b.shape();
    let (Some(rows), Some(cols)) = (m.checked_mul(p), n.checked_mul(q)) else {
        return Err(FixtureError::TooLarge {
            rows: m.saturating_mul(p),
            cols: n.saturating_mul(q),
            max: MAX_ELEMENTS,
        });
    };

    let mut data = vec![0.0f64; element_count(rows, cols)?];
    for i in 0..m {
        for j in 0..n {
            let alpha = a.get(i, j);
            for k in 0..p {
                let b_row = b.row(k);
                let base = (i * p + k) * cols + j * q;
                for (dst, &beta) in data[base..base + q].iter_mut().zip(b_row) {
                    *dst = alpha * beta;
                }
            }
        }
    }

    Matrix::from_vec(rows, cols, data)
}
