use crate::error::{LinSolveError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;
use crate::solver::primitives::{back_substitution, divide_system};

/// Solves an augmented system `[A|b]` by Gaussian elimination without pivoting.
///
/// Each row below the pivot is updated as `row_j = -a[j][i] * row_i + a[i][i] * row_j`.
/// The update needs no division, which keeps exact types exact, but magnitudes grow
/// with every step: floats may overflow or lose precision on larger systems, and a
/// zero pivot is only noticed by the final back substitution. Use
/// [`solve_lu`](crate::solver::lu::solve_lu) when stability matters.
pub fn solve_elimination<T: Scalar>(system: &Matrix<T>) -> Result<Matrix<T>> {
    let (mut matrix, mut b) = divide_system(system)?;
    if !matrix.is_square() {
        return Err(LinSolveError::NotSquare {
            rows: matrix.row_count(),
            cols: matrix.column_count(),
        });
    }

    let row_count = matrix.row_count();
    for i in 0..row_count {
        for j in i + 1..row_count {
            let val1 = -matrix[(j, i)].clone();
            let val2 = matrix[(i, i)].clone();
            matrix[(j, i)] = T::zero();
            for k in i + 1..row_count {
                matrix[(j, k)] =
                    val1.clone() * matrix[(i, k)].clone() + val2.clone() * matrix[(j, k)].clone();
            }
            b[(j, 0)] = val1 * b[(i, 0)].clone() + val2 * b[(j, 0)].clone();
        }
    }

    back_substitution(&matrix, &b)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
