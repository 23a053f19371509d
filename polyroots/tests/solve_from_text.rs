use polyroots::prelude::*;
use proptest::collection::vec;
use proptest::prelude::*;
use test_strategy::proptest;

#[test]
fn classic_quartic_is_solved_and_plotted() {
    let polynomial = parse_coefficients("1,-14,33,80,-100").unwrap();
    let solution = Solution::new(&polynomial).unwrap();

    assert_eq!(4, solution.roots.len());
    assert_eq!(vec![1.0, 10.0, -2.0, 5.0], solution.roots);
    for root in &solution.roots {
        assert_eq!(0.0, polynomial.evaluate(*root));
    }

    let plot = Plot::from_solution(&solution, PlotConfig::default()).unwrap();
    assert_eq!(100, plot.samples.len());
    assert_eq!(4, plot.roots.len());

    let svg = plot.svg().to_string();
    assert_eq!(4, svg.matches("<circle").count());
}

#[test]
fn quadratic_roots_are_a_permutation_of_true_roots() {
    let mut roots = solve("1, -3, 2".parse::<Polynomial>().unwrap()).unwrap();
    roots.sort_by(f64::total_cmp);
    assert_eq!(vec![1.0, 2.0], roots);
}

#[test]
fn division_by_zero_aborts_without_partial_result() {
    let polynomial = parse_coefficients("1, -3, 7, -5").unwrap();
    let err = solve(&polynomial).unwrap_err();

    let SolveError::RootFinding { step, source, .. } = &err else {
        panic!("expected root-finding error, got: {err}");
    };
    assert_eq!(1, *step);
    assert!(matches!(source, RootFindingError::DivisionByZero { .. }));
    assert_eq!("root-finding step 1 (degree 2) failed", err.to_string());
}

#[test]
fn malformed_input_is_rejected_before_solving() {
    assert_eq!(Err(ParseCoefficientsError::Empty), parse_coefficients(""));

    let single = parse_coefficients("3").unwrap();
    assert_eq!(Err(SolveError::TooFewCoefficients { len: 1 }), solve(single));
}

/// Newton starting in 1 finds the root 1 immediately, deflation is exact, and the remaining
/// monic binomial gives away the other root.
#[proptest]
fn quadratic_with_root_one_is_solved_exactly(#[strategy(-50i32..=50)] other_root: i32) {
    let other_root = f64::from(other_root);
    prop_assume!(other_root != 1.0);

    let polynomial = Polynomial::from_roots(&[1.0, other_root]);
    prop_assert_eq!(vec![1.0, other_root], solve(&polynomial)?);
}

#[proptest]
fn solving_never_panics(#[strategy(vec(-50i64..=50, 0..8))] coefficients: Vec<i64>) {
    let line = coefficients
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let Ok(polynomial) = parse_coefficients(&line) else {
        return Ok(());
    };
    if let Ok(roots) = solve(&polynomial) {
        prop_assert_eq!(polynomial.coefficients.len() - 1, roots.len());
    }
}
