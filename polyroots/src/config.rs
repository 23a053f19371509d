//! This module contains the configuration options of the free functions
//! [`solve`](crate::solver::solve) and
//! [`approximate_root`](crate::newton::approximate_root). The default
//! configuration reproduces the classic behavior: 10 Newton iterations starting
//! in x = 1, rounding ties to even.
//!
//! All configuration options can also be set via environment variables.
//! The environment variables take precedence over the options set in this
//! module.

use std::cell::RefCell;

use arbitrary::Arbitrary;

use crate::newton::NewtonApproximator;
use crate::newton::RoundingMode;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::new());
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct Config {
    pub newton_iterations: NewtonIterations,
    pub rounding_mode: RoundingModeOption,
}

impl Config {
    fn new() -> Self {
        Self {
            newton_iterations: NewtonIterations::new(None),
            rounding_mode: RoundingModeOption::new(None),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct NewtonIterations(usize);

impl NewtonIterations {
    const ENV_VAR: &'static str = "POLYROOTS_NEWTON_ITERATIONS";
    const DEFAULT: usize = NewtonApproximator::DEFAULT_ITERATIONS;
    const MINIMUM: usize = 1;

    /// Creates a new `NewtonIterations` with the given value.
    /// Respects the precedence of the environment variable if set. Uses the
    /// default if no value is provided.
    fn new(config_value: Option<usize>) -> Self {
        let iterations = std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config_value)
            .unwrap_or(Self::DEFAULT)
            .max(Self::MINIMUM);

        Self(iterations)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct RoundingModeOption(RoundingMode);

impl RoundingModeOption {
    const ENV_VAR: &'static str = "POLYROOTS_ROUNDING";

    fn new(config_value: Option<RoundingMode>) -> Self {
        let mode = std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config_value)
            .unwrap_or_default();

        Self(mode)
    }
}

/// Sets the number of Newton iterations performed per root.
///
/// Can also be set via the environment variable
/// `POLYROOTS_NEWTON_ITERATIONS`. The environment variable has higher
/// precedence than this function.
///
/// The default is 10. The minimum is always 1.
pub fn set_newton_iterations(iterations: usize) {
    let iterations = NewtonIterations::new(Some(iterations));
    CONFIG.with(|c| c.borrow_mut().newton_iterations = iterations);
}

pub(crate) fn newton_iterations() -> usize {
    CONFIG.with(|c| c.borrow().newton_iterations).0
}

/// Sets how the final Newton iterate is rounded to an integer.
///
/// Can also be set via the environment variable `POLYROOTS_ROUNDING`, with
/// value `half-to-even` or `half-away-from-zero`. The environment variable has
/// higher precedence than this function.
///
/// The default is [`RoundingMode::HalfToEven`].
pub fn set_rounding_mode(mode: RoundingMode) {
    let mode = RoundingModeOption::new(Some(mode));
    CONFIG.with(|c| c.borrow_mut().rounding_mode = mode);
}

pub(crate) fn rounding_mode() -> RoundingMode {
    CONFIG.with(|c| c.borrow().rounding_mode).0
}

/// The approximator used by the free functions of this crate.
pub fn newton_approximator() -> NewtonApproximator {
    NewtonApproximator::default()
        .with_iterations(newton_iterations())
        .with_rounding(rounding_mode())
}

#[cfg(test)]
mod test_config {
    use super::*;

    fn env_var_is_set(name: &str) -> bool {
        std::env::var_os(name).is_some()
    }

    #[test]
    fn default_approximator_uses_ten_iterations() {
        if env_var_is_set(NewtonIterations::ENV_VAR) {
            return;
        }
        assert_eq!(10, newton_approximator().iterations());
    }

    #[test]
    fn iterations_can_be_set_and_are_clamped() {
        if env_var_is_set(NewtonIterations::ENV_VAR) {
            return;
        }

        set_newton_iterations(25);
        assert_eq!(25, newton_iterations());

        set_newton_iterations(0);
        assert_eq!(NewtonIterations::MINIMUM, newton_iterations());
    }

    #[test]
    fn rounding_mode_can_be_set() {
        if env_var_is_set(RoundingModeOption::ENV_VAR) {
            return;
        }

        assert_eq!(RoundingMode::HalfToEven, rounding_mode());
        set_rounding_mode(RoundingMode::HalfAwayFromZero);
        assert_eq!(RoundingMode::HalfAwayFromZero, newton_approximator().rounding());
    }
}
