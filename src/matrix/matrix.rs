use itertools::Itertools;
use std::fmt;
use std::ops;

use crate::error::{LinSolveError, Result};
use crate::rings::scalar::Scalar;

/// Dense row-major matrix. Every row holds exactly `column_count` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Matrix {
            rows: 0,
            cols: 0,
            cells: vec![],
        }
    }
}

impl<T: Scalar> Matrix<T> {
    /// `rows x cols` matrix filled with zeros.
    pub fn new(rows: usize, cols: usize) -> Matrix<T> {
        Matrix {
            rows,
            cols,
            cells: (0..(rows * cols)).map(|_| T::zero()).collect(),
        }
    }

    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Matrix<T>> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);

        if let Some(line) = lines.iter().find(|l| l.len() != cols) {
            return Err(LinSolveError::RowLengthMismatch {
                expected: cols,
                got: line.len(),
            });
        }

        Ok(Matrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    /// `n x 1` matrix, the shape used for right-hand sides and solutions.
    pub fn from_column(values: Vec<T>) -> Matrix<T> {
        Matrix {
            rows: values.len(),
            cols: 1,
            cells: values,
        }
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![vec![]; self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn identity(size: usize) -> Matrix<T> {
        Matrix {
            rows: size,
            cols: size,
            cells: (0..size)
                .flat_map(|i| (0..size).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        self.check_cell(row, col)?;
        Ok(&self.cells[row * self.cols + col])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        self.check_cell(row, col)?;
        Ok(&mut self.cells[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    pub fn row(&self, idx: usize) -> Result<&[T]> {
        self.check_row(idx)?;
        Ok(&self.cells[idx * self.cols..(idx + 1) * self.cols])
    }

    pub fn row_mut(&mut self, idx: usize) -> Result<&mut [T]> {
        self.check_row(idx)?;
        Ok(&mut self.cells[idx * self.cols..(idx + 1) * self.cols])
    }

    /// Replaces a whole row, the new row must have `column_count` elements.
    pub fn set_row(&mut self, idx: usize, row: Vec<T>) -> Result<()> {
        if row.len() != self.cols {
            return Err(LinSolveError::RowLengthMismatch {
                expected: self.cols,
                got: row.len(),
            });
        }
        self.row_mut(idx)?.clone_from_slice(&row);
        Ok(())
    }

    pub fn column(&self, idx: usize) -> Result<Vec<T>> {
        if idx >= self.cols {
            return Err(LinSolveError::ColumnIndexOutOfRange {
                index: idx,
                cols: self.cols,
            });
        }
        Ok((0..self.rows).map(|r| self[(r, idx)].clone()).collect())
    }

    pub fn swap_rows(&mut self, idx1: usize, idx2: usize) -> Result<()> {
        self.check_row(idx1)?;
        self.check_row(idx2)?;
        if idx1 == idx2 {
            return Ok(());
        }
        for k in 0..self.cols {
            self.cells.swap(idx1 * self.cols + k, idx2 * self.cols + k);
        }
        Ok(())
    }

    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self[(r, c)].clone()))
                .collect(),
        }
    }

    /// Reshapes to `rows x cols`. Cells inside both the old and the new bounds keep
    /// their value, new cells are zero.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let mut resized: Matrix<T> = Matrix::new(rows, cols);
        let kept_cols = cols.min(self.cols);
        for r in 0..rows.min(self.rows) {
            resized.cells[r * cols..r * cols + kept_cols]
                .clone_from_slice(&self.cells[r * self.cols..r * self.cols + kept_cols]);
        }
        *self = resized;
    }

    /// Overwrites dimensions and contents with a deep copy of `source`.
    pub fn copy_from(&mut self, source: &Matrix<T>) {
        self.rows = source.rows;
        self.cols = source.cols;
        self.cells.clone_from(&source.cells);
    }

    fn check_row(&self, idx: usize) -> Result<()> {
        if idx >= self.rows {
            return Err(LinSolveError::RowIndexOutOfRange {
                index: idx,
                rows: self.rows,
            });
        }
        Ok(())
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<()> {
        self.check_row(row)?;
        if col >= self.cols {
            return Err(LinSolveError::ColumnIndexOutOfRange {
                index: col,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl<T> ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &self.cells[row * self.cols + col]
    }
}

impl<T> ops::IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &mut self.cells[row * self.cols + col]
    }
}

impl<T: Scalar> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.cols || self.rows != rhs.rows {
            return Err(dimension_mismatch("addition", self, rhs));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
        })
    }
}

// basic n^3 multiplication
impl<T: Scalar> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.rows {
            return Err(dimension_mismatch("multiplication", self, rhs));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            cells: (0..self.rows)
                .flat_map(|i| {
                    (0..rhs.cols).map(move |j| {
                        (0..self.cols).fold(T::zero(), |acc, k| {
                            acc + self[(i, k)].clone() * rhs[(k, j)].clone()
                        })
                    })
                })
                .collect(),
        })
    }
}

fn dimension_mismatch<T>(op: &'static str, lhs: &Matrix<T>, rhs: &Matrix<T>) -> LinSolveError {
    LinSolveError::DimensionMismatch {
        op,
        left_rows: lhs.rows,
        left_cols: lhs.cols,
        right_rows: rhs.rows,
        right_cols: rhs.cols,
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_list() {
            writeln!(f, "{}", line.iter().join(" "))?;
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::rings::fraction::Fraction;

    fn m(lines: Vec<Vec<f64>>) -> Matrix<f64> {
        Matrix::from_list(lines).unwrap()
    }

    #[test]
    fn test_matrix_new_and_identity() {
        let z = Matrix::<f64>::new(2, 3);
        assert_eq!(z.row_count(), 2);
        assert_eq!(z.column_count(), 3);
        assert!(!z.is_square());
        assert_eq!(z.to_list(), vec![vec![0.0; 3]; 2]);

        let i = Matrix::<f64>::identity(3);
        assert!(i.is_square());
        assert_eq!(
            i.to_list(),
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0]
            ]
        );
    }

    #[test]
    fn test_matrix_identity_product() {
        let a = m(vec![
            vec![2.0, -1.0, 3.0],
            vec![0.5, 4.0, 7.0],
            vec![1.0, 1.0, -2.0],
        ]);
        assert_eq!((&Matrix::identity(3) * &a).unwrap(), a);
        assert_eq!((&a * &Matrix::identity(3)).unwrap(), a);

        let f = Matrix::from_list(vec![
            vec![Fraction::from_ints(1, 2).unwrap(), Fraction::from_int(3)],
            vec![Fraction::from_int(-4), Fraction::from_ints(5, 7).unwrap()],
        ])
        .unwrap();
        assert_eq!((&Matrix::identity(2) * &f).unwrap(), f);
    }

    #[test]
    fn test_matrix_add_mul() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        assert_eq!(
            (&a + &b).unwrap().to_list(),
            vec![vec![6.0, 8.0], vec![10.0, 12.0]]
        );
        assert_eq!(
            (&a * &b).unwrap().to_list(),
            vec![vec![19.0, 22.0], vec![43.0, 50.0]]
        );

        let c = m(vec![vec![1.0, 2.0, 3.0]]);
        assert_eq!((&c * &c.transpose()).unwrap().to_list(), vec![vec![14.0]]);
    }

    #[test]
    fn test_matrix_dimension_errors() {
        let a = Matrix::<f64>::new(2, 3);
        let b = Matrix::<f64>::new(3, 2);
        assert_eq!((&a + &b).unwrap_err().kind(), ErrorKind::Shape);
        assert!(matches!(
            (&a * &a).unwrap_err(),
            LinSolveError::DimensionMismatch {
                op: "multiplication",
                ..
            }
        ));
        assert_eq!((&a * &b).unwrap().row_count(), 2);
        assert!(Matrix::from_list(vec![vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_matrix_access() {
        let mut a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(*a.get(1, 0).unwrap(), 3.0);
        assert_eq!(a[(0, 1)], 2.0);
        a.set(0, 0, 9.0).unwrap();
        assert_eq!(a.row(0).unwrap(), &[9.0, 2.0]);
        assert_eq!(a.column(1).unwrap(), vec![2.0, 4.0]);

        assert!(matches!(
            a.get(2, 0),
            Err(LinSolveError::RowIndexOutOfRange { index: 2, rows: 2 })
        ));
        assert!(matches!(
            a.get(0, 5),
            Err(LinSolveError::ColumnIndexOutOfRange { .. })
        ));
        assert!(a.row(3).is_err());
        assert!(a.column(2).is_err());

        a.set_row(1, vec![5.0, 6.0]).unwrap();
        assert_eq!(a.to_list(), vec![vec![9.0, 2.0], vec![5.0, 6.0]]);
        assert!(matches!(
            a.set_row(1, vec![1.0]),
            Err(LinSolveError::RowLengthMismatch {
                expected: 2,
                got: 1
            })
        ));
        assert!(a.set_row(4, vec![1.0, 1.0]).is_err());

        a.swap_rows(0, 1).unwrap();
        assert_eq!(a.to_list(), vec![vec![5.0, 6.0], vec![9.0, 2.0]]);
    }

    #[test]
    fn test_matrix_transpose_resize_copy() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(
            a.transpose().to_list(),
            vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
        );

        let mut b = a.clone();
        b.resize(3, 1);
        assert_eq!(b.to_list(), vec![vec![1.0], vec![4.0], vec![0.0]]);

        let mut c = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        c.resize(3, 3);
        assert_eq!(
            c.to_list(),
            vec![vec![1.0, 2.0, 0.0], vec![3.0, 4.0, 0.0], vec![0.0, 0.0, 0.0]]
        );
        c.resize(0, 2);
        assert_eq!(c.row_count(), 0);
        assert_eq!(c.column_count(), 2);

        b.copy_from(&a);
        assert_eq!(b, a);
        b.set(0, 0, 100.0).unwrap();
        assert_eq!(a[(0, 0)], 1.0);
    }

    #[test]
    fn test_matrix_move_leaves_empty() {
        let mut a = m(vec![vec![1.0, 2.0]]);
        let b = std::mem::take(&mut a);
        assert_eq!(a.row_count(), 0);
        assert_eq!(a.column_count(), 0);
        assert_eq!(b.to_list(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_matrix_display() {
        let a = m(vec![vec![1.0, 2.5], vec![-3.0, 4.0]]);
        assert_eq!(a.to_string(), "1 2.5\n-3 4\n");
    }
}
