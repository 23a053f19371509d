//! Reading coefficients from text.

use crate::error::ParseCoefficientsError;
use crate::polynomial::Polynomial;

/// Coefficients up to this magnitude convert to `f64` without loss.
const MAX_EXACT_COEFFICIENT: u64 = 1 << f64::MANTISSA_DIGITS;

/// Parse a line of comma-separated integer coefficients, leading coefficient first, like
/// `"1, -14, 33, 80, -100"`. All whitespace is ignored.
///
/// Coefficients must lie within ±2^53, the range of integers `f64` represents exactly.
///
/// # Examples
///
/// ```
/// # use polyroots::prelude::*;
/// let polynomial = parse_coefficients("1,-3, 2\n")?;
/// assert_eq!(Polynomial::from([1, -3, 2]), polynomial);
/// # Ok::<(), ParseCoefficientsError>(())
/// ```
pub fn parse_coefficients(line: &str) -> Result<Polynomial, ParseCoefficientsError> {
    let line = line.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    if line.is_empty() {
        return Err(ParseCoefficientsError::Empty);
    }

    let coefficients = line
        .split(',')
        .enumerate()
        .map(|(index, field)| parse_coefficient(index, field))
        .collect::<Result<_, _>>()?;

    Ok(Polynomial::new(coefficients))
}

fn parse_coefficient(index: usize, field: &str) -> Result<f64, ParseCoefficientsError> {
    let value = field
        .parse::<i64>()
        .map_err(|source| ParseCoefficientsError::InvalidCoefficient {
            index,
            field: field.to_string(),
            source,
        })?;
    if value.unsigned_abs() > MAX_EXACT_COEFFICIENT {
        return Err(ParseCoefficientsError::InexactCoefficient { index, value });
    }

    Ok(value as f64)
}
