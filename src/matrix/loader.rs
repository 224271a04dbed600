//! Plain text matrix format.
//!
//! Dense:
//! ```text
//! row_count column_count
//! a11 a12 ... a1n
//! ...
//! am1 am2 ... amn
//! ```
//!
//! Compact, every cell not listed is zero:
//! ```text
//! row_count column_count to_read
//! row column value
//! ...
//! ```

use std::fmt::Display;
use std::io::Read;
use std::str::{FromStr, SplitWhitespace};

use crate::error::{LinSolveError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;

pub fn load_from_str<T>(input: &str) -> Result<Matrix<T>>
where
    T: Scalar + FromStr,
    T::Err: Display,
{
    let mut tokens = input.split_whitespace();
    let row_count = next_index(&mut tokens, "row count")?;
    let column_count = next_index(&mut tokens, "column count")?;

    let mut matrix: Matrix<T> = Matrix::new(row_count, column_count);
    for i in 0..row_count {
        for j in 0..column_count {
            matrix[(i, j)] = next_scalar(&mut tokens)?;
        }
    }

    expect_end(&mut tokens)?;
    Ok(matrix)
}

pub fn load_from_reader<T, R>(mut reader: R) -> Result<Matrix<T>>
where
    T: Scalar + FromStr,
    T::Err: Display,
    R: Read,
{
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| LinSolveError::Parse(e.to_string()))?;
    load_from_str(&input)
}

pub fn load_compact<T>(input: &str) -> Result<Matrix<T>>
where
    T: Scalar + FromStr,
    T::Err: Display,
{
    let mut tokens = input.split_whitespace();
    let row_count = next_index(&mut tokens, "row count")?;
    let column_count = next_index(&mut tokens, "column count")?;
    let to_read = next_index(&mut tokens, "entry count")?;

    let mut matrix: Matrix<T> = Matrix::new(row_count, column_count);
    for _ in 0..to_read {
        let row = next_index(&mut tokens, "row")?;
        let col = next_index(&mut tokens, "column")?;
        let value = next_scalar(&mut tokens)?;
        matrix
            .set(row, col, value)
            .map_err(|e| LinSolveError::Parse(e.to_string()))?;
    }

    expect_end(&mut tokens)?;
    Ok(matrix)
}

/// Dense text form, readable by [`load_from_str`].
pub fn to_text<T: Scalar>(matrix: &Matrix<T>) -> String {
    format!(
        "{} {}\n{}",
        matrix.row_count(),
        matrix.column_count(),
        matrix
    )
}

fn next_index(tokens: &mut SplitWhitespace, what: &str) -> Result<usize> {
    let token = tokens
        .next()
        .ok_or_else(|| LinSolveError::Parse(format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| LinSolveError::Parse(format!("invalid {} `{}`", what, token)))
}

fn next_scalar<T>(tokens: &mut SplitWhitespace) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let token = tokens
        .next()
        .ok_or_else(|| LinSolveError::Parse("not enough values".into()))?;
    token
        .parse()
        .map_err(|e| LinSolveError::Parse(format!("invalid value `{}`: {}", token, e)))
}

fn expect_end(tokens: &mut SplitWhitespace) -> Result<()> {
    match tokens.next() {
        Some(token) => Err(LinSolveError::Parse(format!(
            "unexpected trailing value `{}`",
            token
        ))),
        None => Ok(()),
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
