//! Drives the solvers side by side: timing comparison, random test systems and
//! batch solving of independent systems.

use itertools::Itertools;
use log::info;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use std::time::{Duration, Instant};

use crate::error::{LinSolveError, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::{Scalar, ScalarSqrt};
use crate::solver::elimination::solve_elimination;
use crate::solver::gauss_seidel::{solve_gauss_seidel, GaussSeidelConfig};
use crate::solver::lu::solve_lu;
use crate::solver::qr::solve_qr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Elimination,
    Lu,
    GaussSeidel,
    Qr,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::Lu,
        Method::Elimination,
        Method::GaussSeidel,
        Method::Qr,
    ];

    /// QR needs a square root: for plain [`Scalar`] types it fails with a number type error.
    pub fn solve<T: Scalar>(
        self,
        system: &Matrix<T>,
        gauss_seidel: &GaussSeidelConfig<T>,
    ) -> Result<Matrix<T>> {
        match self {
            Method::Elimination => solve_elimination(system),
            Method::Lu => solve_lu(system),
            Method::GaussSeidel => solve_gauss_seidel(system, gauss_seidel),
            Method::Qr => Err(LinSolveError::NumberType(
                "QR decomposition requires a square root".into(),
            )),
        }
    }

    pub fn solve_with_sqrt<T: ScalarSqrt>(
        self,
        system: &Matrix<T>,
        gauss_seidel: &GaussSeidelConfig<T>,
    ) -> Result<Matrix<T>> {
        match self {
            Method::Qr => solve_qr(system),
            other => other.solve(system, gauss_seidel),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Elimination => "Elimination",
            Method::Lu => "LU",
            Method::GaussSeidel => "Gauss-Seidel",
            Method::Qr => "QR",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub struct MethodReport<T> {
    pub method: Method,
    pub elapsed: Duration,
    pub result: Result<Matrix<T>>,
}

impl<T: Scalar> fmt::Display for MethodReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==== {} ====", self.method)?;
        match &self.result {
            Ok(x) => write!(f, "{}", x)?,
            Err(error) => writeln!(f, "{}", error)?,
        }
        write!(f, "Time: {} microseconds", self.elapsed.as_micros())
    }
}

fn timed<T: Scalar>(method: Method, run: impl FnOnce() -> Result<Matrix<T>>) -> MethodReport<T> {
    let start = Instant::now();
    let result = run();
    let elapsed = start.elapsed();

    match &result {
        Ok(_) => info!("{}: solved in {} us", method, elapsed.as_micros()),
        Err(error) => info!("{}: failed after {} us: {}", method, elapsed.as_micros(), error),
    }
    MethodReport {
        method,
        elapsed,
        result,
    }
}

/// Runs every method on the same system. A failing method does not stop the others.
pub fn compare_methods<T: ScalarSqrt>(
    system: &Matrix<T>,
    gauss_seidel: &GaussSeidelConfig<T>,
) -> Vec<MethodReport<T>> {
    Method::ALL
        .iter()
        .map(|&method| timed(method, || method.solve_with_sqrt(system, gauss_seidel)))
        .collect()
}

/// Same as [`compare_methods`] for types without a square root, QR reports an error.
pub fn compare_methods_exact<T: Scalar>(
    system: &Matrix<T>,
    gauss_seidel: &GaussSeidelConfig<T>,
) -> Vec<MethodReport<T>> {
    Method::ALL
        .iter()
        .map(|&method| timed(method, || method.solve(system, gauss_seidel)))
        .collect()
}

pub fn format_reports<T: Scalar>(reports: &[MethodReport<T>]) -> String {
    reports.iter().join("\n\n")
}

/// Random strictly diagonally dominant `n x (n+1)` augmented system.
/// Every method, Gauss-Seidel included, can solve it.
pub fn random_system<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Matrix<f64> {
    let mut system: Matrix<f64> = Matrix::new(n, n + 1);
    for i in 0..n {
        let mut off_diagonal = 0.0;
        for j in (0..n).filter(|&j| j != i) {
            let value: f64 = rng.gen_range(-1.0..1.0);
            off_diagonal += value.abs();
            system[(i, j)] = value;
        }
        system[(i, i)] = off_diagonal + rng.gen_range(1.0..2.0);
        system[(i, n)] = rng.gen_range(-10.0..10.0);
    }
    system
}

/// Solves independent systems on the rayon pool, one system per task.
/// Results keep the order of `systems`.
pub fn solve_batch<T, F>(systems: &[Matrix<T>], solver: F) -> Vec<Result<Matrix<T>>>
where
    T: Scalar + Send + Sync,
    F: Fn(&Matrix<T>) -> Result<Matrix<T>> + Sync,
{
    systems.par_iter().map(|system| solver(system)).collect()
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::matrix::loader::load_from_str;
    use crate::rings::fraction::Fraction;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn residual(system: &Matrix<f64>, x: &Matrix<f64>) -> f64 {
        let n = system.row_count();
        (0..n)
            .map(|i| {
                let ax: f64 = (0..n).map(|j| system[(i, j)] * x[(j, 0)]).sum();
                (ax - system[(i, n)]).abs()
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_methods_agree_on_random_systems() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GaussSeidelConfig {
            max_steps: 1000,
            accuracy: 1e-13,
        };

        for n in [1, 2, 5, 8] {
            let system = random_system(n, &mut rng);
            let reports = compare_methods(&system, &config);
            assert_eq!(reports.len(), 4);

            let reference = solve_lu(&system).unwrap();
            for report in &reports {
                let x = report.result.as_ref().unwrap();
                assert!(residual(&system, x) < 1e-9, "{} residual", report.method);
                for i in 0..n {
                    assert_relative_eq!(x[(i, 0)], reference[(i, 0)], epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_compare_methods_exact() {
        let system: Matrix<Fraction> = load_from_str("2 3\n2 1 5\n1 3 10").unwrap();
        let config = GaussSeidelConfig::<Fraction> {
            max_steps: 20,
            accuracy: "1/100".parse().unwrap(),
        };
        let reports = compare_methods_exact(&system, &config);

        let expected = vec![Fraction::from_int(1), Fraction::from_int(3)];
        for report in &reports {
            match report.method {
                Method::Lu | Method::Elimination => {
                    assert_eq!(report.result.as_ref().unwrap().column(0).unwrap(), expected)
                }
                Method::GaussSeidel => assert!(report.result.is_ok()),
                Method::Qr => assert_eq!(
                    report.result.as_ref().unwrap_err().kind(),
                    ErrorKind::NumberType
                ),
            }
        }

        let text = format_reports(&reports);
        assert!(text.starts_with("==== LU ====\n1\n3\nTime: "));
        assert!(text.contains("==== QR ====\nnumber type error"));
    }

    #[test]
    fn test_compare_methods_keeps_going_after_failure() {
        let singular = Matrix::from_list(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]).unwrap();
        let reports = compare_methods(&singular, &GaussSeidelConfig::default());
        assert_eq!(reports.len(), 4);
        // QR may end on a rounding residue instead of an exact zero pivot
        assert!(reports
            .iter()
            .filter(|r| matches!(r.method, Method::Lu | Method::Elimination))
            .all(|r| r.result.as_ref().unwrap_err().kind() == ErrorKind::SingularSystem));
    }

    #[test]
    fn test_random_system_is_diagonally_dominant() {
        let mut rng = StdRng::seed_from_u64(7);
        let system = random_system(6, &mut rng);
        assert_eq!(system.row_count(), 6);
        assert_eq!(system.column_count(), 7);
        for i in 0..6 {
            let off: f64 = (0..6).filter(|&j| j != i).map(|j| system[(i, j)].abs()).sum();
            assert!(system[(i, i)].abs() > off);
        }
    }

    #[test]
    fn test_solve_batch() {
        let mut rng = StdRng::seed_from_u64(3);
        let systems: Vec<Matrix<f64>> = (0..16).map(|n| random_system(n % 5 + 1, &mut rng)).collect();

        let results = solve_batch(&systems, solve_lu);
        assert_eq!(results.len(), systems.len());
        for (system, result) in systems.iter().zip(results.iter()) {
            let x = result.as_ref().unwrap();
            assert_eq!(x.row_count(), system.row_count());
            assert!(residual(system, x) < 1e-9);
        }

        let results = solve_batch(&systems, |s| solve_qr(s));
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_matrix_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matrix<f64>>();
        assert_send_sync::<Matrix<Fraction>>();
    }
}
