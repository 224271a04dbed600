use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::error::LinSolveError;
use crate::harness::compare_methods;
use crate::matrix::matrix::Matrix;
use crate::solver::elimination::solve_elimination;
use crate::solver::gauss_seidel::{solve_gauss_seidel, GaussSeidelConfig};
use crate::solver::lu::{lu_decompose, permutation_vector, permutation_vector_to_matrix, solve_lu};
use crate::solver::qr::{qr_decompose, solve_qr};

impl From<LinSolveError> for PyErr {
    fn from(error: LinSolveError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

/// `f64` matrix exposed to Python.
#[derive(Debug, Clone)]
#[pyclass(frozen)]
pub struct MatrixFloat {
    pub inner: Matrix<f64>,
}

impl From<Matrix<f64>> for MatrixFloat {
    fn from(inner: Matrix<f64>) -> Self {
        MatrixFloat { inner }
    }
}

#[pymethods]
impl MatrixFloat {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(Matrix::from_list(lines)?.into())
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, size: usize) -> Self {
        Matrix::identity(size).into()
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    pub fn __add__(&self, rhs: &MatrixFloat) -> PyResult<MatrixFloat> {
        Ok((&self.inner + &rhs.inner)?.into())
    }

    pub fn __mul__(&self, rhs: &MatrixFloat) -> PyResult<MatrixFloat> {
        Ok((&self.inner * &rhs.inner)?.into())
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    #[getter(T)]
    pub fn transposed(&self) -> MatrixFloat {
        self.inner.transpose().into()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.row_count()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.column_count()
    }

    pub fn solve_elimination(&self) -> PyResult<MatrixFloat> {
        Ok(solve_elimination(&self.inner)?.into())
    }

    pub fn solve_lu(&self) -> PyResult<MatrixFloat> {
        Ok(solve_lu(&self.inner)?.into())
    }

    pub fn solve_qr(&self) -> PyResult<MatrixFloat> {
        Ok(solve_qr(&self.inner)?.into())
    }

    #[pyo3(signature = (max_steps=10000, accuracy=0.0))]
    pub fn solve_gauss_seidel(&self, max_steps: usize, accuracy: f64) -> PyResult<MatrixFloat> {
        let config = GaussSeidelConfig {
            max_steps,
            accuracy,
        };
        Ok(solve_gauss_seidel(&self.inner, &config)?.into())
    }

    /// Returns `(L, U, P)` with `P A = L U`.
    pub fn lu_decompose(&self) -> PyResult<(MatrixFloat, MatrixFloat, MatrixFloat)> {
        let mut perm = permutation_vector(self.inner.row_count());
        let lu = lu_decompose(self.inner.clone(), &mut perm)?;
        let p = permutation_vector_to_matrix(&perm)?;
        Ok((lu.lower.into(), lu.upper.into(), p.into()))
    }

    /// Returns `(Q, R)` with `A = Q R`.
    pub fn qr_decompose(&self) -> PyResult<(MatrixFloat, MatrixFloat)> {
        let qr = qr_decompose(&self.inner)?;
        Ok((qr.q.into(), qr.r.into()))
    }
}

/// Solves an augmented system with every method.
/// Returns one `(method, microseconds, solution, error)` tuple per method.
#[pyfunction]
#[pyo3(signature = (lines, max_steps=10000, accuracy=0.0))]
pub fn compare_solvers(
    lines: Vec<Vec<f64>>,
    max_steps: usize,
    accuracy: f64,
) -> PyResult<Vec<(String, u64, Option<Vec<f64>>, Option<String>)>> {
    let system = Matrix::from_list(lines)?;
    let config = GaussSeidelConfig {
        max_steps,
        accuracy,
    };

    Ok(compare_methods(&system, &config)
        .into_iter()
        .map(|report| {
            let micros = report.elapsed.as_micros() as u64;
            match report.result {
                Ok(x) => (report.method.to_string(), micros, x.column(0).ok(), None),
                Err(error) => (report.method.to_string(), micros, None, Some(error.to_string())),
            }
        })
        .collect())
}
