//! LU decomposition with partial pivoting (Doolittle, unit diagonal on `L`).

use log::debug;

use crate::error::{LinSolveError, Result, SingularCause};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;
use crate::solver::primitives::{
    back_substitution, divide_system, forward_substitution, get_row_to_switch, split_lu,
    switch_rows,
};

/// `L` and `U` factors with `P A = L U`, `P` given by the row swaps applied to the companion.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    pub lower: Matrix<T>,
    pub upper: Matrix<T>,
}

/// Factorizes a square matrix.
///
/// `companion` must have one row per row of `input`, it receives the same row swaps.
/// Pass the right-hand side to get `P b` ready for forward substitution, or a
/// [`permutation_vector`] to record `P`.
pub fn lu_decompose<T: Scalar>(
    mut input: Matrix<T>,
    companion: &mut Matrix<T>,
) -> Result<LuDecomposition<T>> {
    if !input.is_square() {
        return Err(LinSolveError::NotSquare {
            rows: input.row_count(),
            cols: input.column_count(),
        });
    }
    let num_rows = input.row_count();
    if companion.row_count() != num_rows {
        return Err(LinSolveError::DimensionMismatch {
            op: "LU decomposition",
            left_rows: num_rows,
            left_cols: input.column_count(),
            right_rows: companion.row_count(),
            right_cols: companion.column_count(),
        });
    }

    for i in 0..num_rows {
        let max_row = get_row_to_switch(&input, i)?;
        if max_row != i {
            switch_rows(&mut input, i, max_row)?;
            switch_rows(companion, i, max_row)?;
        }

        // whole column is zero from the diagonal down
        if i + 1 < num_rows && input[(i, i)].is_zero() {
            debug!("zero pivot in column {}", i);
            return Err(SingularCause::ZeroPivot { column: i }.into());
        }

        for j in i + 1..num_rows {
            let multiplier = input[(j, i)].try_div(&input[(i, i)])?;
            for k in i + 1..num_rows {
                input[(j, k)] = input[(j, k)].clone() - multiplier.clone() * input[(i, k)].clone();
            }
            input[(j, i)] = multiplier;
        }
    }

    let (lower, upper) = split_lu(&input);
    Ok(LuDecomposition { lower, upper })
}

/// Solves an augmented system `[A|b]`: `L y = P b` forward, then `U x = y` backward.
pub fn solve_lu<T: Scalar>(system: &Matrix<T>) -> Result<Matrix<T>> {
    let (matrix, mut b) = divide_system(system)?;
    let lu = lu_decompose(matrix, &mut b)?;
    let y = forward_substitution(&lu.lower, &b)?;
    back_substitution(&lu.upper, &y)
}

/// Identity ordering `[0, 1, ..., size - 1]` as a `size x 1` matrix.
pub fn permutation_vector<T: Scalar>(size: usize) -> Matrix<T> {
    Matrix::from_column((0..size).map(|i| T::from_int(i as i64)).collect())
}

/// Expands a permutation vector into `P` with `P[i][p[i]] = 1`, so that `P A = L U`.
pub fn permutation_vector_to_matrix<T: Scalar>(p_vector: &Matrix<T>) -> Result<Matrix<T>> {
    let size = p_vector.row_count();
    if p_vector.column_count() != 1 {
        return Err(LinSolveError::DimensionMismatch {
            op: "permutation expansion",
            left_rows: size,
            left_cols: p_vector.column_count(),
            right_rows: size,
            right_cols: 1,
        });
    }

    let mut p_matrix: Matrix<T> = Matrix::new(size, size);
    for i in 0..size {
        let entry = &p_vector[(i, 0)];
        let col = (0..size).find(|&j| entry.eq_int(j as i64)).ok_or_else(|| {
            LinSolveError::NumberType(format!(
                "permutation entry {} at row {} is not an index below {}",
                entry, i, size
            ))
        })?;
        p_matrix[(i, col)] = T::one();
    }
    Ok(p_matrix)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
