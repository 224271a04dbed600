//! Building blocks shared by the direct solvers: splitting an augmented system,
//! partial pivoting and triangular substitution.

use log::debug;

use crate::error::{LinSolveError, Result, SingularCause};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;

/// Splits `[A|b]` into fresh copies of `A` (all columns but the last) and `b` (the last column).
pub fn divide_system<T: Scalar>(input: &Matrix<T>) -> Result<(Matrix<T>, Matrix<T>)> {
    let rows = input.row_count();
    let cols = input.column_count();
    if cols == 0 {
        return Err(LinSolveError::ColumnIndexOutOfRange { index: 0, cols });
    }

    let mut left: Matrix<T> = Matrix::new(rows, cols - 1);
    let mut right: Matrix<T> = Matrix::new(rows, 1);
    for i in 0..rows {
        let row = input.row(i)?;
        left.row_mut(i)?.clone_from_slice(&row[..cols - 1]);
        right[(i, 0)] = row[cols - 1].clone();
    }
    Ok((left, right))
}

/// Row at or below the diagonal holding the largest absolute value in `column_idx`.
/// Ties keep the topmost row.
pub fn get_row_to_switch<T: Scalar>(input: &Matrix<T>, column_idx: usize) -> Result<usize> {
    if column_idx >= input.row_count() {
        return Err(LinSolveError::RowIndexOutOfRange {
            index: column_idx,
            rows: input.row_count(),
        });
    }
    if column_idx >= input.column_count() {
        return Err(LinSolveError::ColumnIndexOutOfRange {
            index: column_idx,
            cols: input.column_count(),
        });
    }

    let mut max_value = input[(column_idx, column_idx)].abs();
    let mut max_row = column_idx;
    for row_idx in column_idx + 1..input.row_count() {
        let value = input[(row_idx, column_idx)].abs();
        if max_value.less_than(&value) {
            max_value = value;
            max_row = row_idx;
        }
    }
    Ok(max_row)
}

pub fn switch_rows<T: Scalar>(input: &mut Matrix<T>, idx1: usize, idx2: usize) -> Result<()> {
    debug!("switching rows {} and {}", idx1, idx2);
    input.swap_rows(idx1, idx2)
}

/// Solves `L x = b` for a lower triangular `L`, top to bottom.
pub fn forward_substitution<T: Scalar>(matrix: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    check_triangular_system(matrix, b)?;

    let row_count = matrix.row_count();
    let mut x: Matrix<T> = Matrix::new(row_count, 1);
    for i in 0..row_count {
        if matrix[(i, i)].is_zero() {
            return Err(SingularCause::ZeroDiagonalForward { row: i }.into());
        }
        let curr_sum = (0..i).fold(T::zero(), |acc, j| {
            acc + matrix[(i, j)].clone() * x[(j, 0)].clone()
        });
        x[(i, 0)] = (b[(i, 0)].clone() - curr_sum).try_div(&matrix[(i, i)])?;
    }
    Ok(x)
}

/// Solves `U x = b` for an upper triangular `U`, bottom to top.
///
/// A zero on the diagonal means the system has no unique solution. The error tells
/// the two cases apart by looking at the matching entry of `b`: zero gives
/// [`SingularCause::InfinitelyManySolutions`], anything else [`SingularCause::NoSolution`].
pub fn back_substitution<T: Scalar>(matrix: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    check_triangular_system(matrix, b)?;

    let row_count = matrix.row_count();
    let mut x: Matrix<T> = Matrix::new(row_count, 1);
    for i in (0..row_count).rev() {
        if matrix[(i, i)].is_zero() {
            let cause = if b[(i, 0)].is_zero() {
                SingularCause::InfinitelyManySolutions { row: i }
            } else {
                SingularCause::NoSolution { row: i }
            };
            return Err(cause.into());
        }
        let curr_sum = (i + 1..row_count).fold(T::zero(), |acc, j| {
            acc + matrix[(i, j)].clone() * x[(j, 0)].clone()
        });
        x[(i, 0)] = (b[(i, 0)].clone() - curr_sum).try_div(&matrix[(i, i)])?;
    }
    Ok(x)
}

/// Splits a combined LU matrix into unit lower `L` (multipliers below the diagonal)
/// and upper `U` (diagonal and above).
pub fn split_lu<T: Scalar>(input: &Matrix<T>) -> (Matrix<T>, Matrix<T>) {
    let row_count = input.row_count();
    let mut lower: Matrix<T> = Matrix::new(row_count, row_count);
    let mut upper: Matrix<T> = Matrix::new(row_count, row_count);

    for i in 0..row_count {
        lower[(i, i)] = T::one();
        upper[(i, i)] = input[(i, i)].clone();
        for j in i + 1..row_count {
            lower[(j, i)] = input[(j, i)].clone();
            upper[(i, j)] = input[(i, j)].clone();
        }
    }
    (lower, upper)
}

fn check_triangular_system<T: Scalar>(matrix: &Matrix<T>, b: &Matrix<T>) -> Result<()> {
    if !matrix.is_square() {
        return Err(LinSolveError::NotSquare {
            rows: matrix.row_count(),
            cols: matrix.column_count(),
        });
    }
    if b.row_count() != matrix.row_count() || b.column_count() != 1 {
        return Err(LinSolveError::DimensionMismatch {
            op: "substitution",
            left_rows: matrix.row_count(),
            left_cols: matrix.column_count(),
            right_rows: b.row_count(),
            right_cols: b.column_count(),
        });
    }
    Ok(())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
