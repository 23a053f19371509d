//! polyroots CLI - find the real roots of a polynomial and plot them

mod input;
mod output;

use std::fs;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::ArgAction;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use polyroots::config;
use polyroots::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::filter::LevelFilter;

use output::OutputFormat;

/// Find the real roots of a polynomial using Newton's method and synthetic division
#[derive(Debug, Parser)]
#[command(name = "polyroots", version, about)]
struct Args {
    /// Comma-separated integer coefficients, leading coefficient first, e.g. `1,-14,33,80,-100`.
    /// Read from stdin if absent.
    #[arg(allow_hyphen_values = true)]
    coefficients: Option<String>,

    /// Newton iterations per root [default: `POLYROOTS_NEWTON_ITERATIONS`, else 10]
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    iterations: Option<usize>,

    /// Starting point of every Newton iteration
    #[arg(long, default_value_t = NewtonApproximator::DEFAULT_INITIAL_GUESS, allow_hyphen_values = true)]
    initial_guess: f64,

    /// How ties are rounded: `half-to-even` or `half-away-from-zero`
    /// [default: `POLYROOTS_ROUNDING`, else `half-to-even`]
    #[arg(long)]
    rounding: Option<RoundingMode>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write an SVG plot of the polynomial and its roots to this file
    #[arg(long, value_name = "PATH")]
    plot: Option<PathBuf>,

    /// More log output; repeat for more detail. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }

        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// The configured approximator, with every option given on the command line taking
    /// precedence.
    fn approximator(&self) -> NewtonApproximator {
        let mut approximator = config::newton_approximator().with_initial_guess(self.initial_guess);
        if let Some(iterations) = self.iterations {
            approximator = approximator.with_iterations(iterations);
        }
        if let Some(rounding) = self.rounding {
            approximator = approximator.with_rounding(rounding);
        }

        approximator
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::builder()
        .with_default_directive(args.log_level().into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }
}

fn run(
    args: &Args,
    stdin: impl BufRead,
    stderr: impl Write,
    out: &mut impl Write,
) -> Result<()> {
    let line = match &args.coefficients {
        Some(line) => line.clone(),
        None => input::prompt_line(stdin, stderr).context("failed to read coefficients")?,
    };
    let polynomial = parse_coefficients(&line)
        .with_context(|| format!("failed to parse coefficients `{}`", line.trim()))?;
    info!(%polynomial, "parsed polynomial");

    let solver = RootSolver::new(args.approximator());
    let solution = solver
        .solution(&polynomial)
        .with_context(|| format!("failed to solve {polynomial}"))?;

    output::write_solution(out, &solution, args.format)?;

    if let Some(path) = &args.plot {
        let plot = Plot::from_solution(&solution, PlotConfig::default())?;
        fs::write(path, plot.svg().to_string())
            .with_context(|| format!("failed to write plot to {}", path.display()))?;
        info!(path = %path.display(), "wrote plot");
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    run(
        &args,
        io::stdin().lock(),
        io::stderr(),
        &mut io::stdout().lock(),
    )
}


#[cfg(test)]
mod test_cli {
    use clap::CommandFactory;
    use tempfile::tempdir;

    use super::*;

    struct Outcome {
        result: Result<()>,
        prompt: String,
        stdout: String,
    }

    fn run_with<const N: usize>(args: [&str; N], stdin: &str) -> Outcome {
        let args = Args::parse_from(std::iter::once("polyroots").chain(args));
        let mut prompt = vec![];
        let mut stdout = vec![];
        let result = run(&args, stdin.as_bytes(), &mut prompt, &mut stdout);

        Outcome {
            result,
            prompt: String::from_utf8(prompt).unwrap(),
            stdout: String::from_utf8(stdout).unwrap(),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_defer_to_configuration() {
        let args = Args::parse_from(["polyroots", "1,-14,33,80,-100"]);
        assert_eq!(Some("1,-14,33,80,-100"), args.coefficients.as_deref());
        assert_eq!(None, args.iterations);
        assert_eq!(1.0, args.initial_guess);
        assert_eq!(None, args.rounding);
        assert_eq!(OutputFormat::Text, args.format);
        assert_eq!(LevelFilter::WARN, args.log_level());

        let configured = config::newton_approximator();
        let approximator = args.approximator();
        assert_eq!(configured.iterations(), approximator.iterations());
        assert_eq!(configured.rounding(), approximator.rounding());
    }

    #[test]
    fn coefficients_may_start_with_minus() {
        let args = Args::parse_from(["polyroots", "-1,3,-2"]);
        assert_eq!(Some("-1,3,-2"), args.coefficients.as_deref());
    }

    #[test]
    fn options_are_parsed() {
        let args = Args::parse_from([
            "polyroots",
            "--iterations",
            "20",
            "--initial-guess",
            "-4.5",
            "--rounding",
            "half-away-from-zero",
            "--format",
            "json",
            "--plot",
            "roots.svg",
            "-vv",
        ]);
        assert_eq!(None, args.coefficients);
        assert_eq!(Some(20), args.iterations);
        assert_eq!(-4.5, args.initial_guess);
        assert_eq!(Some(RoundingMode::HalfAwayFromZero), args.rounding);
        assert_eq!(OutputFormat::Json, args.format);
        assert_eq!(Some(PathBuf::from("roots.svg")), args.plot);
        assert_eq!(LevelFilter::DEBUG, args.log_level());
    }

    #[test]
    fn unknown_rounding_mode_is_rejected() {
        let result = Args::try_parse_from(["polyroots", "--rounding", "half-up"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let result = Args::try_parse_from(["polyroots", "--iterations", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["polyroots", "-q", "-v"]);
        assert!(result.is_err());

        let args = Args::parse_from(["polyroots", "-q"]);
        assert_eq!(LevelFilter::ERROR, args.log_level());
    }

    #[test]
    fn explicit_options_take_precedence_over_configuration() {
        config::set_newton_iterations(7);
        config::set_rounding_mode(RoundingMode::HalfToEven);

        let args = Args::parse_from([
            "polyroots",
            "--iterations",
            "3",
            "--rounding",
            "half-away-from-zero",
            "--initial-guess",
            "2",
        ]);
        let approximator = args.approximator();
        assert_eq!(3, approximator.iterations());
        assert_eq!(RoundingMode::HalfAwayFromZero, approximator.rounding());
        assert_eq!(2.0, approximator.initial_guess());
    }

    #[test]
    fn coefficients_from_argument_are_solved_without_prompt() {
        let outcome = run_with(["--iterations", "10", "1,-14,33,80,-100"], "");
        outcome.result.unwrap();

        let expected = "\
            p(x) = x^4 - 14x^3 + 33x^2 + 80x - 100\n\
            x_1 = 1\n\
            x_2 = 10\n\
            x_3 = -2\n\
            x_4 = 5\n";
        assert_eq!(expected, outcome.stdout);
        assert!(outcome.prompt.is_empty());
    }

    #[test]
    fn coefficients_are_read_from_stdin_after_prompt() {
        let outcome = run_with([], "1, -3, 2\n");
        outcome.result.unwrap();

        assert_eq!(format!("{} ", input::PROMPT), outcome.prompt);
        assert_eq!("p(x) = x^2 - 3x + 2\nx_1 = 1\nx_2 = 2\n", outcome.stdout);
    }

    #[test]
    fn iterations_flag_changes_the_roots() {
        // a single Newton step from 1 overshoots to 37 on x³ - 13x² + 20x + 100
        let outcome = run_with(["--iterations", "1", "1,-14,33,80,-100"], "");
        outcome.result.unwrap();
        assert!(outcome.stdout.contains("x_2 = 37"), "{}", outcome.stdout);
    }

    #[test]
    fn failed_solve_reports_the_full_error_chain() {
        let outcome = run_with(["1,-2,5"], "");
        let err = outcome.result.unwrap_err();
        let chain = format!("{err:#}");

        assert!(chain.starts_with("failed to solve x^2 - 2x + 5: "), "{chain}");
        assert!(chain.contains("root-finding step 0 (degree 2) failed"), "{chain}");
        assert!(chain.contains("division by zero"), "{chain}");
        assert!(outcome.stdout.is_empty());
    }

    #[test]
    fn malformed_coefficients_are_reported() {
        let outcome = run_with(["1,x,3"], "");
        let chain = format!("{:#}", outcome.result.unwrap_err());
        assert!(chain.starts_with("failed to parse coefficients `1,x,3`: "), "{chain}");
        assert!(chain.contains("coefficient 1 (`x`) is not an integer"), "{chain}");
    }

    #[test]
    fn plot_is_written_to_given_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roots.svg");
        let path_arg = path.to_str().unwrap();

        let outcome = run_with(["--plot", path_arg, "1,-14,33,80,-100"], "");
        outcome.result.unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(4, svg.matches("<circle").count());
    }

    #[test]
    fn unwritable_plot_path_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("roots.svg");
        let path_arg = path.to_str().unwrap();

        let outcome = run_with(["--plot", path_arg, "1,-3,2"], "");
        let chain = format!("{:#}", outcome.result.unwrap_err());
        assert!(chain.starts_with("failed to write plot to "), "{chain}");
    }
}
