//! Dense linear system solvers generic over the scalar type: Gaussian elimination,
//! LU with partial pivoting, Householder QR and Gauss-Seidel, running on floats,
//! complex numbers, exact fractions or residues modulo `N`.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod harness;

pub mod matrix {
    pub mod loader;
    pub mod matrix;
}
pub mod rings {
    pub mod fraction;
    pub mod scalar;
    pub mod zmod;
}
pub mod solver {
    pub mod elimination;
    pub mod gauss_seidel;
    pub mod lu;
    pub mod primitives;
    pub mod qr;
}

#[cfg(feature = "python")]
pub mod python;

pub use error::{ErrorKind, LinSolveError, Result, SingularCause};
pub use matrix::matrix::Matrix;
pub use rings::scalar::{Scalar, ScalarSqrt};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn lin_solve(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::MatrixFloat>()?;
    m.add_function(wrap_pyfunction!(python::compare_solvers, m)?)?;
    Ok(())
}
