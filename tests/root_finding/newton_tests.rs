use approx::assert_abs_diff_eq;
use rootbench::root_finding::chord::{chord, ChordCfg};
use rootbench::root_finding::errors::RootFindingError;
use rootbench::root_finding::newton::{newton, NewtonCfg, NewtonError};
use rootbench::root_finding::report::{Stencil, TerminationReason};

type TestResult = Result<(), NewtonError>;

const CUBIC_ROOT: f64 = 2.094_551_481_542_326_5;

fn cubic(x: f64) -> f64 { x * x * x - 2.0 * x - 5.0 }
fn cubic_d1(x: f64) -> f64 { 3.0 * x * x - 2.0 }


#[test]
fn cubic_from_lower_bound() -> TestResult {
    let cfg = NewtonCfg::new().set_tolerance(1e-6)?;
    let res = newton(cubic, cubic_d1, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_eq!(res.algorithm_name, "newton");
    // 2 -> 2.1 -> 2.09457 -> converged iterate
    assert_eq!(res.iterations, 4);
    assert_abs_diff_eq!(res.root.unwrap_or(f64::NAN), CUBIC_ROOT, epsilon = 1e-7);
    assert_eq!(res.stencil.points().len(), 1);
    Ok(())
}

#[test]
fn converged_guess_counts_one_iteration() -> TestResult {
    let f = |x: f64| 2.0 * x - 6.0;
    let df = |_x: f64| 2.0;

    let res = newton(f, df, 3.0, NewtonCfg::new())?;
    assert_eq!(res.iterations, 1);
    assert_eq!(res.root, Some(3.0));
    assert_eq!(res.stencil, Stencil::Tangent { x: 3.0 });
    Ok(())
}

#[test]
fn constant_function_has_zero_derivative() -> TestResult {
    let f = |_x: f64| 1.0;
    let df = |_x: f64| 0.0;

    for x0 in [-3.0, 0.0, 2.5] {
        let res = newton(f, df, x0, NewtonCfg::new())?;
        assert_eq!(res.root, None);
        assert_eq!(res.f_root, None);
        assert_eq!(res.iterations, 0);
        assert_eq!(res.termination_reason, TerminationReason::ZeroDerivative);
        assert!(!res.converged());
    }
    Ok(())
}

#[test]
fn zero_derivative_after_first_step() -> TestResult {
    // x^2 + 1 from 1: x1 = 1 - 2/2 = 0, where f'(0) = 0
    let f = |x: f64| x * x + 1.0;
    let df = |x: f64| 2.0 * x;

    let res = newton(f, df, 1.0, NewtonCfg::new())?;
    assert_eq!(res.root, None);
    assert_eq!(res.iterations, 1);
    assert_eq!(res.stencil, Stencil::Tangent { x: 0.0 });
    Ok(())
}

#[test]
fn iteration_cap_returns_last_iterate() -> TestResult {
    let f = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;
    let cfg = NewtonCfg::new()
        .set_tolerance(1e-300)?
        .set_max_iter(3)?;

    let res = newton(f, df, 1.0, cfg)?;
    assert_eq!(res.termination_reason, TerminationReason::IterationLimit);
    assert_eq!(res.iterations, 3);
    // 1 -> 3/2 -> 17/12 -> 577/408
    assert_abs_diff_eq!(res.root.unwrap_or(f64::NAN), 577.0 / 408.0, epsilon = 1e-15);
    Ok(())
}

#[test]
fn agrees_with_chord() -> TestResult {
    let tol = 1e-6;
    let d2 = |x: f64| 6.0 * x;

    let from_newton = newton(cubic, cubic_d1, 2.0, NewtonCfg::new().set_tolerance(tol)?)?;
    let from_chord = chord(cubic, d2, 2.0, 2.1, ChordCfg::new().set_tolerance(tol).unwrap())
        .unwrap();

    assert_abs_diff_eq!(
        from_newton.root.unwrap_or(f64::NAN),
        from_chord.root.unwrap_or(f64::NAN),
        epsilon = 1e-3
    );
    Ok(())
}

#[test]
fn non_finite_guess_rejected() {
    for x0 in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let res = newton(cubic, cubic_d1, x0, NewtonCfg::new());
        assert!(matches!(res, Err(NewtonError::InvalidGuess { .. })));
    }
}

#[test]
fn non_finite_derivative_rejected() {
    let f = |x: f64| x - 1.0;
    let df = |x: f64| 1.0 / x;

    let res = newton(f, df, 0.0, NewtonCfg::new());
    assert_eq!(
        res,
        Err(NewtonError::DerivativeNotFinite { x: 0.0, dfx: f64::INFINITY })
    );
}

#[test]
fn non_finite_derivative_ignored_once_converged() -> TestResult {
    let f = |x: f64| x;
    let df = |_x: f64| f64::NAN;

    let res = newton(f, df, 0.0, NewtonCfg::new())?;
    assert_eq!(res.root, Some(0.0));
    Ok(())
}

#[test]
fn non_finite_evaluation_rejected() {
    let f = |x: f64| x.ln();
    let df = |x: f64| 1.0 / x;

    let res = newton(f, df, -1.0, NewtonCfg::new());
    assert!(matches!(
        res,
        Err(NewtonError::RootFinding(RootFindingError::NonFiniteEvaluation { .. }))
    ));
}

#[test]
fn zero_max_iter_rejected() {
    assert_eq!(
        NewtonCfg::new().set_max_iter(0),
        Err(RootFindingError::InvalidMaxIter { got: 0 })
    );
}
