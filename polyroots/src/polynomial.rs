use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Mul;
use std::str::FromStr;

use arbitrary::Arbitrary;
use num_traits::One;
use num_traits::Zero;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ParseCoefficientsError;
use crate::error::PolynomialError;

impl One for Polynomial {
    fn one() -> Self {
        Self::new(vec![1.0])
    }
}

/// A univariate polynomial with real coefficients, in monomial form.
///
/// The degree of the polynomial is taken to be `coefficients.len() - 1`,
/// regardless of whether the leading coefficient is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Arbitrary)]
pub struct Polynomial {
    /// The polynomial's coefficients, in order of decreasing degree. That is, the polynomial's
    /// leading coefficient is the first element of the vector, and its constant term is the
    /// last.
    pub coefficients: Vec<f64>,
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let degree = self.coefficients.len() - 1;
        let mut is_first_term = true;
        for (i, &coeff) in self.coefficients.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }

            let pow = degree - i;
            match (is_first_term, coeff.is_sign_negative()) {
                (true, true) => write!(f, "-")?,
                (true, false) => (),
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            is_first_term = false;

            let magnitude = coeff.abs();
            if !magnitude.is_one() || pow == 0 {
                write!(f, "{magnitude}")?;
            }
            match pow {
                0 => (),
                1 => write!(f, "x")?,
                _ => write!(f, "x^{pow}")?,
            }
        }

        Ok(())
    }
}

impl FromStr for Polynomial {
    type Err = ParseCoefficientsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_coefficients(s)
    }
}

impl<const N: usize, E> From<[E; N]> for Polynomial
where
    E: Into<f64>,
{
    fn from(coefficients: [E; N]) -> Self {
        Self::new(coefficients.into_iter().map(|c| c.into()).collect())
    }
}

impl<E> From<&[E]> for Polynomial
where
    E: Into<f64> + Clone,
{
    fn from(coefficients: &[E]) -> Self {
        Self::from(coefficients.to_vec())
    }
}

impl<E> From<Vec<E>> for Polynomial
where
    E: Into<f64>,
{
    fn from(coefficients: Vec<E>) -> Self {
        Self::new(coefficients.into_iter().map(|c| c.into()).collect())
    }
}

impl<E> From<&Vec<E>> for Polynomial
where
    E: Into<f64> + Clone,
{
    fn from(coefficients: &Vec<E>) -> Self {
        Self::from(coefficients.to_vec())
    }
}

impl From<&Polynomial> for Polynomial {
    fn from(polynomial: &Polynomial) -> Self {
        polynomial.clone()
    }
}

impl Polynomial {
    pub const fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// The polynomial without coefficients.
    pub const fn zero() -> Self {
        Self::new(vec![])
    }

    /// Whether every coefficient is zero. True for the polynomial without coefficients.
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(Zero::is_zero)
    }

    /// The monic polynomial `(x - r_0)·(x - r_1)·…` vanishing in exactly the given roots.
    pub fn from_roots(roots: &[f64]) -> Self {
        roots
            .iter()
            .map(|&root| Self::new(vec![1.0, -root]))
            .fold(Self::one(), |acc, factor| acc * factor)
    }

    /// The nominal degree, `-1` for the polynomial without coefficients.
    ///
    /// Leading zeros are _not_ skipped: `[0, 1, 2]` has degree 2.
    pub fn degree(&self) -> isize {
        self.coefficients.len() as isize - 1
    }

    pub fn leading_coefficient(&self) -> Option<f64> {
        self.coefficients.first().copied()
    }

    pub fn constant_term(&self) -> Option<f64> {
        self.coefficients.last().copied()
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let mut acc = 0.0;
        for &c in &self.coefficients {
            acc = acc * x + c;
        }

        acc
    }

    /// Evaluate the first derivative in `x` without materializing the
    /// [formal derivative](Self::formal_derivative).
    pub fn derivative_evaluate(&self, x: f64) -> f64 {
        let Some((_, non_constant_coefficients)) = self.coefficients.split_last() else {
            return 0.0;
        };

        let degree = non_constant_coefficients.len();
        let mut acc = 0.0;
        for (i, &c) in non_constant_coefficients.iter().enumerate() {
            acc = acc * x + c * (degree - i) as f64;
        }

        acc
    }

    pub fn formal_derivative(&self) -> Self {
        let degree = self.coefficients.len().saturating_sub(1);
        let coefficients = self
            .coefficients
            .iter()
            .take(degree)
            .enumerate()
            .map(|(i, &c)| c * (degree - i) as f64)
            .collect();

        Self { coefficients }
    }

    pub fn batch_evaluate(&self, domain: &[f64]) -> Vec<f64> {
        domain.iter().map(|&x| self.evaluate(x)).collect()
    }

    pub fn par_batch_evaluate(&self, domain: &[f64]) -> Vec<f64> {
        domain.par_iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Divide out the linear factor `(x - root)` by synthetic division, discarding the
    /// remainder.
    ///
    /// The quotient has exactly one coefficient fewer than `self`. It is exact if and only if
    /// `root` is an exact root of `self`; otherwise the discarded remainder, which equals
    /// `self.evaluate(root)`, is silently lost.
    ///
    /// # Errors
    ///
    /// Fails if `self` has fewer than 2 coefficients.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyroots::prelude::*;
    /// let f = Polynomial::from([1, -3, 2]);
    /// assert_eq!(Polynomial::from([1, -2]), f.deflate(1.0)?);
    /// # Ok::<(), PolynomialError>(())
    /// ```
    pub fn deflate(&self, root: f64) -> Result<Self, PolynomialError> {
        let (quotient, _) = self.deflate_with_remainder(root)?;
        Ok(quotient)
    }

    /// Like [`deflate`](Self::deflate), but also returns the remainder.
    pub fn deflate_with_remainder(&self, root: f64) -> Result<(Self, f64), PolynomialError> {
        const MIN_NUM_COEFFICIENTS: usize = 2;
        let too_few_coefficients = || PolynomialError::TooFewCoefficients {
            min: MIN_NUM_COEFFICIENTS,
            len: self.coefficients.len(),
        };
        if self.coefficients.len() < MIN_NUM_COEFFICIENTS {
            return Err(too_few_coefficients());
        }

        let (&leading_coefficient, lower_coefficients) = self
            .coefficients
            .split_first()
            .ok_or_else(too_few_coefficients)?;

        let mut running_value = leading_coefficient;
        let mut quotient = Vec::with_capacity(self.coefficients.len());
        quotient.push(leading_coefficient);
        for &c in lower_coefficients {
            running_value = running_value * root + c;
            quotient.push(running_value);
        }
        let remainder = quotient.pop().ok_or_else(too_few_coefficients)?;

        Ok((Self::new(quotient), remainder))
    }

    pub fn naive_multiply(&self, other: &Self) -> Self {
        let Some(degree_lhs) = self.coefficients.len().checked_sub(1) else {
            return Self::zero();
        };
        let Some(degree_rhs) = other.coefficients.len().checked_sub(1) else {
            return Self::zero();
        };

        let mut product = vec![0.0; degree_lhs + degree_rhs + 1];
        for (i, &l) in self.coefficients.iter().enumerate() {
            for (j, &r) in other.coefficients.iter().enumerate() {
                product[i + j] += l * r;
            }
        }

        Self::new(product)
    }
}

impl Mul for Polynomial {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.naive_multiply(&other)
    }
}
