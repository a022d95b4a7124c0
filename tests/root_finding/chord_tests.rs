use approx::assert_abs_diff_eq;
use rootbench::root_finding::chord::{chord, ChordCfg, ChordError};
use rootbench::root_finding::errors::{RootFindingError, ToleranceError};
use rootbench::root_finding::report::{Stencil, TerminationReason};

type TestResult = Result<(), ChordError>;

const CUBIC_ROOT: f64 = 2.094_551_481_542_326_5;

fn cubic(x: f64) -> f64 { x * x * x - 2.0 * x - 5.0 }
fn cubic_d2(x: f64) -> f64 { 6.0 * x }


#[test]
fn cubic_on_scanned_bracket_fixes_right_endpoint() -> TestResult {
    let cfg = ChordCfg::new().set_tolerance(1e-6)?;
    let res = chord(cubic, cubic_d2, 2.0, 2.1, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!(res.converged());
    assert_eq!(res.algorithm_name, "chord");

    let root = res.root.unwrap_or(f64::NAN);
    assert_abs_diff_eq!(root, CUBIC_ROOT, epsilon = 1e-6);
    assert!(res.f_root.unwrap_or(f64::NAN).abs() < 1e-6);
    assert!((1..=12).contains(&res.iterations));

    // f(2) * f''(2) < 0, so b stays fixed throughout
    match res.stencil {
        Stencil::Chord { fixed, .. } => assert_eq!(fixed, 2.1),
        other => panic!("unexpected stencil {other:?}"),
    }
    assert_eq!(res.stencil.points().len(), 2);
    Ok(())
}

#[test]
fn cubic_on_wide_bracket_converges() -> TestResult {
    let cfg = ChordCfg::new().set_tolerance(1e-6)?;
    let res = chord(cubic, cubic_d2, 2.0, 3.0, cfg)?;

    assert!(res.converged());
    assert_abs_diff_eq!(res.root.unwrap_or(f64::NAN), CUBIC_ROOT, epsilon = 1e-6);
    Ok(())
}

#[test]
fn left_endpoint_fixed_when_f_and_curvature_agree() -> TestResult {
    // f(-2) = 2, f''(-2) = 2 > 0
    let f = |x: f64| x * x - 2.0;
    let d2f = |_x: f64| 2.0;
    let cfg = ChordCfg::new().set_tolerance(1e-10)?;

    let res = chord(f, d2f, -2.0, -1.0, cfg)?;

    assert!(res.converged());
    assert_abs_diff_eq!(res.root.unwrap_or(f64::NAN), -(2.0_f64).sqrt(), epsilon = 1e-9);
    match res.stencil {
        Stencil::Chord { fixed, .. } => assert_eq!(fixed, -2.0),
        other => panic!("unexpected stencil {other:?}"),
    }
    Ok(())
}

#[test]
fn root_on_moving_endpoint_converges_in_one_step() -> TestResult {
    let f = |x: f64| x - 2.0;
    let d2f = |_x: f64| 0.0;

    let res = chord(f, d2f, 2.0, 3.0, ChordCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.root, Some(2.0));
    assert_eq!(res.f_root, Some(0.0));
    Ok(())
}

#[test]
fn collapsed_chord_is_reported_not_divided() {
    // first chord lands at -2/3 where f * f'' > 0, so fixed == moving
    let f = |x: f64| x * x * x;
    let d2f = |x: f64| 6.0 * x;

    let err = chord(f, d2f, -1.0, 2.0, ChordCfg::new()).unwrap_err();
    match err {
        ChordError::DegenerateDivision { fixed, moving, f_value, iteration } => {
            assert_eq!(iteration, 1);
            assert_eq!(fixed, moving);
            assert_abs_diff_eq!(fixed, -2.0 / 3.0, epsilon = 1e-12);
            assert_abs_diff_eq!(f_value, -8.0 / 27.0, epsilon = 1e-12);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn iteration_cap_returns_last_estimate() -> TestResult {
    let cfg = ChordCfg::new()
        .set_tolerance(1e-300)?
        .set_max_iter(3)?;

    let res = chord(cubic, cubic_d2, 2.0, 2.1, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::IterationLimit);
    assert!(!res.converged());
    assert_eq!(res.iterations, 3);
    assert_abs_diff_eq!(res.root.unwrap_or(f64::NAN), CUBIC_ROOT, epsilon = 1e-6);
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> TestResult {
    let cfg = ChordCfg::new().set_tolerance(1e-9)?;
    let first = chord(cubic, cubic_d2, 2.0, 2.1, cfg)?;
    let second = chord(cubic, cubic_d2, 2.0, 2.1, cfg)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn defaults() {
    let cfg = ChordCfg::default();
    assert_eq!(cfg.tolerance(), 1e-3);
    assert_eq!(cfg.max_iter(), None);
}

#[test]
fn invalid_tolerance_rejected() {
    for bad in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
        let res = ChordCfg::new().set_tolerance(bad);
        assert!(
            matches!(res, Err(ToleranceError::InvalidTolerance { .. })),
            "tolerance {bad} accepted"
        );
    }
}

#[test]
fn zero_max_iter_rejected() {
    assert_eq!(
        ChordCfg::new().set_max_iter(0),
        Err(RootFindingError::InvalidMaxIter { got: 0 })
    );
}

#[test]
fn non_finite_bounds_rejected() {
    let res = chord(cubic, cubic_d2, f64::NAN, 2.0, ChordCfg::new());
    assert!(matches!(
        res,
        Err(ChordError::RootFinding(RootFindingError::InvalidBounds { .. }))
    ));
}

#[test]
fn non_finite_evaluation_rejected() {
    let f = |x: f64| x.sqrt() - 1.0;
    let d2f = |x: f64| -0.25 * x.powf(-1.5);

    let res = chord(f, d2f, -1.0, 2.0, ChordCfg::new());
    assert!(matches!(
        res,
        Err(ChordError::RootFinding(RootFindingError::NonFiniteEvaluation { x, .. })) if x == -1.0
    ));
}

#[test]
fn non_finite_curvature_rejected() {
    let f = |x: f64| x - 0.5;
    let d2f = |_x: f64| f64::INFINITY;

    let res = chord(f, d2f, 0.0, 1.0, ChordCfg::new());
    assert!(matches!(res, Err(ChordError::SecondDerivativeNotFinite { .. })));
}
