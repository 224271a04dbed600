//! Error type shared by the matrix container, the scalar types and the solvers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinSolveError>;

/// Coarse classification of a [`LinSolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong dimensions, out of range index, ragged rows.
    Shape,
    /// The system has no unique solution, or the algorithm met a zero pivot.
    SingularSystem,
    /// A scalar operation is undefined (zero denominator, no modular inverse, no sqrt).
    NumberType,
    /// Malformed matrix text.
    Parse,
}

/// Why a solver gave up on a system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SingularCause {
    #[error("cannot LU decompose input matrix, zero pivot in column {column}")]
    ZeroPivot { column: usize },
    #[error("cannot compute forward substitution, zero on the diagonal at row {row}")]
    ZeroDiagonalForward { row: usize },
    #[error("cannot compute back substitution, no solution or unable to find solution (row {row})")]
    NoSolution { row: usize },
    #[error("cannot compute back substitution, infinitely many solutions or unable to find solution (row {row})")]
    InfinitelyManySolutions { row: usize },
    #[error("cannot run Gauss-Seidel, zero on the diagonal at row {row}")]
    ZeroDiagonalIterative { row: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinSolveError {
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
    #[error("incompatible dimensions for {op}: {left_rows}x{left_cols} and {right_rows}x{right_cols}")]
    DimensionMismatch {
        op: &'static str,
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },
    #[error("row index {index} out of range ({rows} rows)")]
    RowIndexOutOfRange { index: usize, rows: usize },
    #[error("column index {index} out of range ({cols} columns)")]
    ColumnIndexOutOfRange { index: usize, cols: usize },
    #[error("row has {got} elements, expected {expected}")]
    RowLengthMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Singular(#[from] SingularCause),
    #[error("number type error: {0}")]
    NumberType(String),
    #[error("cannot parse matrix: {0}")]
    Parse(String),
}

impl LinSolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinSolveError::NotSquare { .. }
            | LinSolveError::DimensionMismatch { .. }
            | LinSolveError::RowIndexOutOfRange { .. }
            | LinSolveError::ColumnIndexOutOfRange { .. }
            | LinSolveError::RowLengthMismatch { .. } => ErrorKind::Shape,
            LinSolveError::Singular(_) => ErrorKind::SingularSystem,
            LinSolveError::NumberType(_) => ErrorKind::NumberType,
            LinSolveError::Parse(_) => ErrorKind::Parse,
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(
            LinSolveError::NotSquare { rows: 2, cols: 3 }.kind(),
            ErrorKind::Shape
        );
        assert_eq!(
            LinSolveError::from(SingularCause::NoSolution { row: 1 }).kind(),
            ErrorKind::SingularSystem
        );
        assert_eq!(
            LinSolveError::NumberType("x".into()).kind(),
            ErrorKind::NumberType
        );
    }

    #[test]
    fn test_back_substitution_messages_are_distinct() {
        let none = LinSolveError::from(SingularCause::NoSolution { row: 0 }).to_string();
        let many = LinSolveError::from(SingularCause::InfinitelyManySolutions { row: 0 }).to_string();
        assert!(none.contains("no solution"));
        assert!(many.contains("infinitely many solutions"));
    }
}
