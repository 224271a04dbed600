use log::{debug, warn};

use crate::error::{LinSolveError, Result, SingularCause};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;
use crate::solver::primitives::divide_system;

/// Gauss-Seidel configuration
#[derive(Debug, Clone)]
pub struct GaussSeidelConfig<T> {
    /// Maximum number of sweeps
    pub max_steps: usize,
    /// Stop once no component moves by more than this between two sweeps
    pub accuracy: T,
}

impl<T: Scalar> Default for GaussSeidelConfig<T> {
    fn default() -> Self {
        Self {
            max_steps: 10000,
            accuracy: T::zero(),
        }
    }
}

/// Gauss-Seidel result
#[derive(Debug, Clone)]
pub struct GaussSeidelSolution<T> {
    /// Last estimate, `n x 1`
    pub x: Matrix<T>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Whether the accuracy was reached within `max_steps`
    pub converged: bool,
}

/// Solves an augmented system `[A|b]` by Gauss-Seidel iteration, starting from `x = 0`.
///
/// Running out of sweeps is not an error: the last estimate is returned as is.
/// Check the residual, or use [`solve_gauss_seidel_detailed`], to know whether it converged.
pub fn solve_gauss_seidel<T: Scalar>(
    system: &Matrix<T>,
    config: &GaussSeidelConfig<T>,
) -> Result<Matrix<T>> {
    solve_gauss_seidel_detailed(system, config).map(|solution| solution.x)
}

pub fn solve_gauss_seidel_detailed<T: Scalar>(
    system: &Matrix<T>,
    config: &GaussSeidelConfig<T>,
) -> Result<GaussSeidelSolution<T>> {
    let (matrix, b) = divide_system(system)?;
    if !matrix.is_square() {
        return Err(LinSolveError::NotSquare {
            rows: matrix.row_count(),
            cols: matrix.column_count(),
        });
    }
    if config.accuracy.less_than(&T::zero()) {
        return Err(LinSolveError::NumberType(format!(
            "Gauss-Seidel accuracy must be non-negative, got {}",
            config.accuracy
        )));
    }

    let row_count = matrix.row_count();
    if let Some(row) = (0..row_count).find(|&i| matrix[(i, i)].is_zero()) {
        return Err(SingularCause::ZeroDiagonalIterative { row }.into());
    }

    let mut x: Matrix<T> = Matrix::new(row_count, 1);
    for step in 0..config.max_steps {
        let old_x = x.clone();
        for i in 0..row_count {
            let dot = (0..row_count)
                .filter(|&j| j != i)
                .fold(T::zero(), |acc, j| {
                    acc + matrix[(i, j)].clone() * x[(j, 0)].clone()
                });
            x[(i, 0)] = (b[(i, 0)].clone() - dot).try_div(&matrix[(i, i)])?;
        }

        if gs_check_accuracy(&old_x, &x, &config.accuracy) {
            debug!("Gauss-Seidel converged after {} sweeps", step + 1);
            return Ok(GaussSeidelSolution {
                x,
                iterations: step + 1,
                converged: true,
            });
        }
    }

    warn!(
        "Gauss-Seidel did not reach accuracy {} within {} sweeps",
        config.accuracy, config.max_steps
    );
    Ok(GaussSeidelSolution {
        x,
        iterations: config.max_steps,
        converged: false,
    })
}

// every component moved by at most `accuracy`; incomparable values (NaN) never pass
fn gs_check_accuracy<T: Scalar>(old_x: &Matrix<T>, new_x: &Matrix<T>, accuracy: &T) -> bool {
    (0..old_x.row_count()).all(|i| {
        let diff = (old_x[(i, 0)].clone() - new_x[(i, 0)].clone()).abs();
        diff.compare(accuracy)
            .is_some_and(|ordering| ordering != std::cmp::Ordering::Greater)
    })
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Fraction;
    use approx::assert_relative_eq;

    fn m(lines: Vec<Vec<f64>>) -> Matrix<f64> {
        Matrix::from_list(lines).unwrap()
    }

    #[test]
    fn test_gauss_seidel_converges() {
        // 4x + y = 5, x + 3y = 7
        let system = m(vec![vec![4.0, 1.0, 5.0], vec![1.0, 3.0, 7.0]]);
        let config = GaussSeidelConfig {
            max_steps: 100,
            accuracy: 1e-6,
        };

        let solution = solve_gauss_seidel_detailed(&system, &config).unwrap();
        assert!(solution.converged);
        assert!(solution.iterations < 100);
        assert_relative_eq!(solution.x[(0, 0)], 8.0 / 11.0, epsilon = 1e-5);
        assert_relative_eq!(solution.x[(1, 0)], 23.0 / 11.0, epsilon = 1e-5);

        let x = solve_gauss_seidel(&system, &config).unwrap();
        assert_eq!(x, solution.x);
    }

    #[test]
    fn test_gauss_seidel_default_config() {
        let config = GaussSeidelConfig::<f64>::default();
        assert_eq!(config.max_steps, 10000);
        assert_eq!(config.accuracy, 0.0);

        // exact stationary point is reached in floating point
        let system = m(vec![vec![2.0, 0.0, 4.0], vec![0.0, 4.0, 2.0]]);
        let solution = solve_gauss_seidel_detailed(&system, &config).unwrap();
        assert!(solution.converged);
        assert_eq!(solution.x.to_list(), vec![vec![2.0], vec![0.5]]);
    }

    #[test]
    fn test_gauss_seidel_silent_non_convergence() {
        // not diagonally dominant, the iteration diverges
        let system = m(vec![vec![1.0, 2.0, 3.0], vec![3.0, 1.0, 4.0]]);
        let config = GaussSeidelConfig {
            max_steps: 5,
            accuracy: 1e-6,
        };
        let solution = solve_gauss_seidel_detailed(&system, &config).unwrap();
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 5);
        assert!(solve_gauss_seidel(&system, &config).is_ok());
    }

    #[test]
    fn test_gauss_seidel_errors() {
        let zero_diagonal = m(vec![vec![1.0, 2.0, 3.0], vec![3.0, 0.0, 4.0]]);
        assert_eq!(
            solve_gauss_seidel(&zero_diagonal, &GaussSeidelConfig::default()).unwrap_err(),
            LinSolveError::Singular(SingularCause::ZeroDiagonalIterative { row: 1 })
        );

        assert!(matches!(
            solve_gauss_seidel(&Matrix::<f64>::new(2, 2), &GaussSeidelConfig::default()),
            Err(LinSolveError::NotSquare { .. })
        ));

        let system = m(vec![vec![4.0, 1.0, 5.0], vec![1.0, 3.0, 7.0]]);
        let negative = GaussSeidelConfig {
            max_steps: 10,
            accuracy: -1.0,
        };
        assert!(solve_gauss_seidel(&system, &negative).is_err());
    }

    #[test]
    fn test_gauss_seidel_fractions() {
        let fr = |s: &str| s.parse::<Fraction>().unwrap();
        let system = Matrix::from_list(vec![
            vec![fr("4"), fr("1"), fr("5")],
            vec![fr("1"), fr("3"), fr("7")],
        ])
        .unwrap();
        let config = GaussSeidelConfig {
            max_steps: 50,
            accuracy: fr("1/1000"),
        };
        let x = solve_gauss_seidel(&system, &config).unwrap();
        assert!(Scalar::abs(&(x[(0, 0)].clone() - fr("8/11"))) < fr("1/100"));
        assert!(Scalar::abs(&(x[(1, 0)].clone() - fr("23/11"))) < fr("1/100"));
    }

    #[test]
    fn test_gauss_seidel_sweep_uses_updated_values() {
        let fr = |s: &str| s.parse::<Fraction>().unwrap();
        let system = Matrix::from_list(vec![
            vec![fr("4"), fr("1"), fr("5")],
            vec![fr("1"), fr("3"), fr("7")],
        ])
        .unwrap();
        let config = GaussSeidelConfig {
            max_steps: 1,
            accuracy: fr("0"),
        };
        let solution = solve_gauss_seidel_detailed(&system, &config).unwrap();
        // second entry sees x0 = 5/4 from the same sweep, not the starting 0
        assert_eq!(solution.x.column(0).unwrap(), vec![fr("5/4"), fr("23/12")]);
        assert_eq!(solution.iterations, 1);
        assert!(!solution.converged);
    }
}
