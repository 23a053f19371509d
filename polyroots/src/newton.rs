//! Newton's method with a fixed iteration budget.
//!
//! The approximation is deliberately simple: a fixed number of iterations from
//! a fixed starting point, no convergence check and no safeguard against a
//! vanishing derivative. A derivative that is exactly zero aborts the
//! approximation with [`RootFindingError::DivisionByZero`]. The final iterate
//! is rounded to an integer according to a [`RoundingMode`].

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use arbitrary::Arbitrary;
use num_traits::Zero;
use serde::Deserialize;
use serde::Serialize;
use tracing::trace;

use crate::config;
use crate::error::ParseRoundingModeError;
use crate::error::RootFindingError;
use crate::polynomial::Polynomial;

/// How to round a Newton iterate to the nearest integer when it lies exactly
/// halfway between two integers.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// `2.5 → 2`, `3.5 → 4`, `-0.5 → 0`. Also known as banker's rounding.
    #[default]
    HalfToEven,

    /// `2.5 → 3`, `3.5 → 4`, `-0.5 → -1`.
    HalfAwayFromZero,
}

impl RoundingMode {
    /// Round `x` to an integer. Never returns negative zero.
    pub fn round(self, x: f64) -> f64 {
        let rounded = match self {
            Self::HalfToEven => x.round_ties_even(),
            Self::HalfAwayFromZero => x.round(),
        };

        // -0.0 + 0.0 == +0.0
        rounded + 0.0
    }
}

impl Display for RoundingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HalfToEven => write!(f, "half-to-even"),
            Self::HalfAwayFromZero => write!(f, "half-away-from-zero"),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = ParseRoundingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "half-to-even" => Ok(Self::HalfToEven),
            "half-away-from-zero" => Ok(Self::HalfAwayFromZero),
            other => Err(ParseRoundingModeError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtonApproximator {
    iterations: usize,
    initial_guess: f64,
    rounding: RoundingMode,
}

impl Default for NewtonApproximator {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            initial_guess: Self::DEFAULT_INITIAL_GUESS,
            rounding: RoundingMode::default(),
        }
    }
}

impl NewtonApproximator {
    pub const DEFAULT_ITERATIONS: usize = 10;
    pub const DEFAULT_INITIAL_GUESS: f64 = 1.0;

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Approximate one root of `polynomial` and round it to an integer.
    ///
    /// The result is not guaranteed to be a root at all: if the iteration did not converge
    /// within the budget, whatever integer is closest to the last iterate is returned.
    ///
    /// # Errors
    ///
    /// - [`RootFindingError::DivisionByZero`] if the derivative is exactly zero in any iterate.
    /// - [`RootFindingError::NonFiniteIterate`] if the last iterate is infinite or NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyroots::prelude::*;
    /// let approximator = NewtonApproximator::default();
    /// let f = Polynomial::from([1, -13, 20, 100]);
    /// assert_eq!(10.0, approximator.approximate_root(&f)?);
    /// # Ok::<(), RootFindingError>(())
    /// ```
    pub fn approximate_root(&self, polynomial: &Polynomial) -> Result<f64, RootFindingError> {
        let x = self.iterate(polynomial)?;
        if !x.is_finite() {
            return Err(RootFindingError::NonFiniteIterate { x });
        }

        Ok(self.rounding.round(x))
    }

    /// The last Newton iterate, before rounding.
    pub fn iterate(&self, polynomial: &Polynomial) -> Result<f64, RootFindingError> {
        let mut x = self.initial_guess;
        for iteration in 0..self.iterations {
            let value = polynomial.evaluate(x);
            let derivative = polynomial.derivative_evaluate(x);
            if derivative.is_zero() {
                return Err(RootFindingError::DivisionByZero { iteration, x });
            }

            x -= value / derivative;
            trace!(iteration, x, value, derivative, "Newton step");
        }

        Ok(x)
    }
}

/// Approximate one root of `polynomial` using the [configured](crate::config) approximator.
pub fn approximate_root(polynomial: &Polynomial) -> Result<f64, RootFindingError> {
    config::newton_approximator().approximate_root(polynomial)
}
