//! QR decomposition by Householder reflections. Needs a square root, so it is only
//! available for [`ScalarSqrt`] types.

use log::debug;

use crate::error::{LinSolveError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::{Scalar, ScalarSqrt};
use crate::solver::primitives::{back_substitution, divide_system};

/// `A = Q R` with `Q` orthogonal and `R` upper triangular.
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    pub q: Matrix<T>,
    pub r: Matrix<T>,
}

/// Factorizes a square matrix.
///
/// When the sub-column `R[i.., i]` already points along the first axis
/// (`x[0] == |x|`), the reflection would divide by zero and is skipped for that
/// step only; later columns are still reduced, so `R` stays upper triangular.
pub fn qr_decompose<T: ScalarSqrt>(input: &Matrix<T>) -> Result<QrDecomposition<T>> {
    if !input.is_square() {
        return Err(LinSolveError::NotSquare {
            rows: input.row_count(),
            cols: input.column_count(),
        });
    }

    let num_rows = input.row_count();
    let mut q: Matrix<T> = Matrix::identity(num_rows);
    let mut r: Matrix<T> = Matrix::default();
    r.copy_from(input);

    for i in 0..num_rows {
        let mut x = r.column(i)?.split_off(i);

        let norm = vector_norm(&x);
        if (x[0].clone() - norm.clone()).is_zero() {
            debug!("column {} already reduced, skipping its reflection", i);
            continue;
        }
        x[0] = x[0].clone() - norm;

        let h_x = householder_reflection(&x)?;
        let mut h: Matrix<T> = Matrix::identity(num_rows);
        for j in i..num_rows {
            for k in i..num_rows {
                h[(j, k)] = h_x[(j - i, k - i)].clone();
            }
        }

        r = (&h * &r)?;
        q = (&q * &h)?;
    }

    Ok(QrDecomposition { q, r })
}

/// Solves an augmented system `[A|b]`: `y = Qᵗ b`, then `R x = y` backward.
///
/// Columns that are already reduced get no reflection (see [`qr_decompose`]). A
/// zero column stays zero in `R`, and back substitution then reports the system
/// as singular.
pub fn solve_qr<T: ScalarSqrt>(system: &Matrix<T>) -> Result<Matrix<T>> {
    let (matrix, b) = divide_system(system)?;
    let qr = qr_decompose(&matrix)?;

    let y = (&qr.q.transpose() * &b)?;
    back_substitution(&qr.r, &y)
}

fn dot_product<T: Scalar>(x: &[T], y: &[T]) -> T {
    x.iter()
        .zip(y.iter())
        .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
}

fn vector_norm<T: ScalarSqrt>(x: &[T]) -> T {
    dot_product(x, x).sqrt()
}

// H = I - 2 x xᵗ / (xᵗ x)
fn householder_reflection<T: Scalar>(x: &[T]) -> Result<Matrix<T>> {
    let size = x.len();
    let x_matrix = Matrix::from_column(x.to_vec());
    let outer_product = (&x_matrix * &x_matrix.transpose())?;
    let factor = T::from_int(2).try_div(&dot_product(x, x))?;

    let mut householder: Matrix<T> = Matrix::identity(size);
    for i in 0..size {
        for j in 0..size {
            householder[(i, j)] =
                householder[(i, j)].clone() - outer_product[(i, j)].clone() * factor.clone();
        }
    }
    Ok(householder)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
