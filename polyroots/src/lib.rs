//! Real roots of univariate polynomials.
//!
//! Roots are peeled off one at a time: [Newton's method](newton) approximates
//! a root, which is rounded to an integer and then divided out of the
//! polynomial by [synthetic division](polynomial::Polynomial::deflate). Once the
//! polynomial is linear, its last root is read off directly.
//!
//! ```
//! # use polyroots::prelude::*;
//! let roots = solve([1, -14, 33, 80, -100])?;
//! assert_eq!(vec![1.0, 10.0, -2.0, 5.0], roots);
//! # Ok::<(), SolveError>(())
//! ```
#![deny(clippy::shadow_unrelated)]
pub mod config;
pub mod error;
pub mod newton;
pub mod parse;
pub mod plot;
pub mod polynomial;
pub mod prelude;
pub mod solver;

