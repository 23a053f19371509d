use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use polyroots::prelude::*;
use serde::Serialize;

/// Output format for results
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// One root per line, with spurious roots flagged
    Text,
    /// Polynomial, roots, and residuals as a JSON object
    Json,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    expression: String,
    coefficients: &'a [f64],
    roots: &'a [f64],
    residuals: Vec<f64>,
}

impl<'a> Report<'a> {
    fn new(solution: &'a Solution) -> Self {
        Self {
            expression: solution.polynomial.to_string(),
            coefficients: &solution.polynomial.coefficients,
            roots: &solution.roots,
            residuals: solution.residuals(),
        }
    }
}

pub(crate) fn write_solution(
    out: &mut impl Write,
    solution: &Solution,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, solution)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &Report::new(solution))?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_text(out: &mut impl Write, solution: &Solution) -> Result<()> {
    let spurious_roots = solution.spurious_roots(Solution::DEFAULT_RESIDUAL_TOLERANCE);
    writeln!(out, "p(x) = {}", solution.polynomial)?;
    for (i, (root, residual)) in solution.roots.iter().zip(solution.residuals()).enumerate() {
        write!(out, "x_{} = {root}", i + 1)?;
        if spurious_roots.contains(root) {
            write!(out, "  (not a root: p({root}) = {residual})")?;
        }
        writeln!(out)?;
    }

    Ok(())
}
