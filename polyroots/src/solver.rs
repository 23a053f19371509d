use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::config;
use crate::error::SolveError;
use crate::newton::NewtonApproximator;
use crate::polynomial::Polynomial;

/// Finds all roots of a polynomial by alternating [Newton approximation](NewtonApproximator) and
/// [deflation](Polynomial::deflate).
///
/// Every approximated root is accepted as is, even if it is not actually a root. Since the
/// subsequent deflation then leaves a non-zero remainder, the error propagates into all roots
/// found afterwards.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RootSolver {
    approximator: NewtonApproximator,
}

impl RootSolver {
    pub fn new(approximator: NewtonApproximator) -> Self {
        Self { approximator }
    }

    pub fn approximator(&self) -> NewtonApproximator {
        self.approximator
    }

    /// One root per degree of `polynomial`, in order of discovery.
    ///
    /// Once only a linear polynomial remains, its root is taken to be the negated constant
    /// term. This assumes the linear polynomial is monic, which holds if the input is monic and
    /// every extracted root was exact; the leading coefficient is not inspected.
    ///
    /// # Errors
    ///
    /// - [`SolveError::TooFewCoefficients`] if `polynomial` has fewer than 2 coefficients.
    /// - [`SolveError::RootFinding`] if any Newton approximation fails. No partial result is
    ///   returned.
    pub fn solve(&self, polynomial: &Polynomial) -> Result<Vec<f64>, SolveError> {
        const MIN_NUM_COEFFICIENTS: usize = 2;
        let len = polynomial.coefficients.len();
        if len < MIN_NUM_COEFFICIENTS {
            return Err(SolveError::TooFewCoefficients { len });
        }

        let mut remaining = polynomial.clone();
        let mut roots = Vec::with_capacity(len - 1);
        while remaining.coefficients.len() > MIN_NUM_COEFFICIENTS {
            let step = roots.len();
            let degree = remaining.coefficients.len() - 1;
            let root = self
                .approximator
                .approximate_root(&remaining)
                .map_err(|source| SolveError::RootFinding {
                    step,
                    degree,
                    source,
                })?;

            let (quotient, remainder) = remaining.deflate_with_remainder(root)?;
            debug!(step, degree, root, remainder, "extracted root");
            roots.push(root);
            remaining = quotient;
        }

        let &[_, constant_term] = remaining.coefficients.as_slice() else {
            unreachable!("deflation stops at exactly {MIN_NUM_COEFFICIENTS} coefficients");
        };

        // subtracting from +0.0 avoids a root of -0.0
        roots.push(0.0 - constant_term);
        info!(degree = len - 1, ?roots, "solved polynomial");

        Ok(roots)
    }

    pub fn solution(&self, polynomial: impl Into<Polynomial>) -> Result<Solution, SolveError> {
        let polynomial = polynomial.into();
        let roots = self.solve(&polynomial)?;

        Ok(Solution { polynomial, roots })
    }
}

/// Find all roots of the polynomial with the given coefficients, leading coefficient first,
/// using the [configured](crate::config) Newton approximator.
///
/// # Examples
///
/// ```
/// # use polyroots::prelude::*;
/// assert_eq!(vec![1.0, 2.0], solve([1, -3, 2])?);
/// assert_eq!(vec![-7.0], solve([1, 7])?);
/// # Ok::<(), SolveError>(())
/// ```
pub fn solve(coefficients: impl Into<Polynomial>) -> Result<Vec<f64>, SolveError> {
    RootSolver::new(config::newton_approximator()).solve(&coefficients.into())
}

/// A polynomial together with the roots found for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub polynomial: Polynomial,
    pub roots: Vec<f64>,
}

impl Solution {
    /// Residuals up to this magnitude are considered zero.
    pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1e-9;

    /// Solve `polynomial` using the [configured](crate::config) Newton approximator.
    pub fn new(polynomial: impl Into<Polynomial>) -> Result<Self, SolveError> {
        RootSolver::new(config::newton_approximator()).solution(polynomial)
    }

    /// The original polynomial evaluated in each root, in order.
    pub fn residuals(&self) -> Vec<f64> {
        self.polynomial.batch_evaluate(&self.roots)
    }

    /// The roots whose residual exceeds `tolerance` in magnitude, in order. These are
    /// approximations that did not converge to a true root, or roots corrupted by an earlier
    /// inexact deflation.
    pub fn spurious_roots(&self, tolerance: f64) -> Vec<f64> {
        self.roots
            .iter()
            .zip(self.residuals())
            .filter(|(_, residual)| residual.abs() > tolerance)
            .map(|(&root, _)| root)
            .collect()
    }
}
