use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum PolynomialError {
    #[error("expected at least {min} coefficients, but got {len}")]
    TooFewCoefficients { min: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RootFindingError {
    #[error("division by zero: derivative vanishes at x = {x} in Newton iteration {iteration}")]
    DivisionByZero { iteration: usize, x: f64 },

    #[error("Newton iterate {x} is not finite and cannot be rounded")]
    NonFiniteIterate { x: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SolveError {
    #[error("a polynomial needs at least 2 coefficients to have a root, but got {len}")]
    TooFewCoefficients { len: usize },

    #[error("root-finding step {step} (degree {degree}) failed")]
    RootFinding {
        step: usize,
        degree: usize,
        #[source]
        source: RootFindingError,
    },

    #[error("deflation failed")]
    Deflation(#[from] PolynomialError),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseCoefficientsError {
    #[error("no coefficients given")]
    Empty,

    #[error("coefficient {index} (`{field}`) is not an integer")]
    InvalidCoefficient {
        index: usize,
        field: String,
        #[source]
        source: ParseIntError,
    },

    #[error("coefficient {index} ({value}) exceeds ±2^53 and cannot be represented exactly")]
    InexactCoefficient { index: usize, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PlotError {
    #[error("need at least 2 samples to draw a curve, but got {0}")]
    TooFewSamples(usize),

    #[error("empty plot domain [{x_min}, {x_max}]")]
    EmptyDomain { x_min: f64, x_max: f64 },
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseRoundingModeError {
    #[error("unknown rounding mode `{0}`; expected `half-to-even` or `half-away-from-zero`")]
    UnknownMode(String),
}
