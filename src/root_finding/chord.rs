//! Chord method with re-selected fixed endpoint

use super::algorithms::Algorithm;
use super::report::{SolveReport, TerminationReason, Stencil};
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use thiserror::Error;
use tracing::{debug, trace};


#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChordError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("degenerate chord at iteration {iteration}: f(moving) == f(fixed) = {f_value} \
             with fixed={fixed}, moving={moving}")]
    DegenerateDivision { fixed: f64, moving: f64, f_value: f64, iteration: usize },

    #[error("second derivative non-finite at x={x}, f''(x)={d2fx}")]
    SecondDerivativeNotFinite { x: f64, d2fx: f64 },
}
impl ChordError {
    /// Iteration at which the chord collapsed, for [`ChordError::DegenerateDivision`].
    pub fn iteration(&self) -> Option<usize> {
        match *self {
            ChordError::DegenerateDivision { iteration, .. } => Some(iteration),
            _ => None,
        }
    }
}


/// Chord configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with `tolerance` and optional `max_iter`.
///
/// # Defaults
/// - `tolerance` : 1e-3
/// - If `max_iter` is `None`, [`chord`] uses [`Algorithm::default_max_iter`] (100).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChordCfg {
    common: CommonCfg,
}
impl ChordCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new() }
    }
}
impl Default for ChordCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(ChordCfg);


#[inline]
fn eval_fx_checked<F>(
    f: &mut F,
    x: f64,
    evals: &mut usize
) -> Result<f64, ChordError> where F: FnMut(f64) -> f64 {
    let fx = { *evals += 1; f(x) };
    if !fx.is_finite() {
        return Err(RootFindingError::NonFiniteEvaluation { x, fx }.into());
    }
    Ok(fx)
}
#[inline]
fn eval_d2fx_checked<G>(
    d2f: &mut G,
    x: f64,
    evals: &mut usize
) -> Result<f64, ChordError> where G: FnMut(f64) -> f64 {
    let d2fx = { *evals += 1; d2f(x) };
    if !d2fx.is_finite() {
        return Err(ChordError::SecondDerivativeNotFinite { x, d2fx });
    }
    Ok(d2fx)
}


/// Finds a root of `func` on `[a, b]` with the chord method, re-selecting
/// the fixed endpoint from the sign of `f * f''` on every step.
///
/// # Arguments
/// - `func`   : function whose root is sought
/// - `d2func` : second derivative of `func`
/// - `a`, `b` : finite starting endpoints
/// - `cfg`    : [`ChordCfg`] (tolerance, optional `max_iter`)
///
/// # Behavior
/// - Start: if `f(a) * f''(a) > 0` then `a` is fixed and `b` moves,
///   otherwise `b` is fixed and `a` moves.
/// - Step: `root = moving - f(moving) * (moving - fixed) / (f(moving) - f(fixed))`.
/// - Stop when `|f(root)| < tolerance`; `iterations` counts this step.
/// - Otherwise `root` becomes the fixed endpoint if `f(root) * f''(root) > 0`
///   (fixed unchanged if not) and always becomes the moving endpoint.
/// - On the cap, the last root is returned with `iterations = max_iter`
///   and [`TerminationReason::IterationLimit`].
///
/// Once `root` replaces both endpoints the next chord has zero height;
/// that step is reported as [`ChordError::DegenerateDivision`] rather
/// than producing NaN.
///
/// # Errors
/// - [`ChordError::DegenerateDivision`]        : `f(moving) == f(fixed)`
/// - [`ChordError::SecondDerivativeNotFinite`] : `f''` produced NaN/inf
///
/// * Propagated via [`ChordError::RootFinding`]:
/// - [`RootFindingError::InvalidBounds`]       : `a` or `b` non-finite
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
/// - [`RootFindingError::InvalidMaxIter`]      : `max_iter = 0`
pub fn chord<F, G>(
    mut func: F,
    mut d2func: G,
    a: f64,
    b: f64,
    cfg: ChordCfg,
) -> Result<SolveReport, ChordError>
where
    F: FnMut(f64) -> f64,
    G: FnMut(f64) -> f64
{
    if !(a.is_finite() && b.is_finite()) {
        return Err(RootFindingError::InvalidBounds { a, b }.into());
    }

    let algorithm = Algorithm::Chord;
    let algo_name = algorithm.algorithm_name();
    let tolerance = cfg.tolerance();
    let num_iter  = match cfg.max_iter() {
        Some(0) => return Err(RootFindingError::InvalidMaxIter { got: 0 }.into()),
        Some(v) => v,
        None    => algorithm.default_max_iter(),
    };

    let mut evals: usize = 0;

    // pick the fixed endpoint
    let fa  = eval_fx_checked(&mut func, a, &mut evals)?;
    let d2a = eval_d2fx_checked(&mut d2func, a, &mut evals)?;
    let fb  = eval_fx_checked(&mut func, b, &mut evals)?;

    let (mut fixed, mut f_fixed, mut moving, mut f_moving) = if fa * d2a > 0.0 {
        (a, fa, b, fb)
    } else {
        (b, fb, a, fa)
    };
    trace!(fixed, moving, "initial endpoints");

    let mut root   = moving;
    let mut f_root = f_moving;
    let mut stencil = Stencil::Chord { fixed, moving };

    for iteration in 0..num_iter {
        let denom = f_moving - f_fixed;
        if denom == 0.0 {
            return Err(ChordError::DegenerateDivision {
                fixed,
                moving,
                f_value: f_moving,
                iteration
            });
        }

        stencil = Stencil::Chord { fixed, moving };
        root   = moving - f_moving * (moving - fixed) / denom;
        f_root = eval_fx_checked(&mut func, root, &mut evals)?;
        trace!(iteration, root, f_root, "chord step");

        if f_root.abs() < tolerance {
            debug!(root, iterations = iteration + 1, "chord converged");
            return Ok(SolveReport {
                root                : Some(root),
                f_root              : Some(f_root),
                iterations          : iteration + 1,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                stencil,
                algorithm_name      : algo_name,
            });
        }

        // re-select the fixed endpoint
        let d2_root = eval_d2fx_checked(&mut d2func, root, &mut evals)?;
        if f_root * d2_root > 0.0 {
            fixed   = root;
            f_fixed = f_root;
        }
        moving   = root;
        f_moving = f_root;
    }

    debug!(root, iterations = num_iter, "chord hit iteration limit");
    Ok(SolveReport {
        root                : Some(root),
        f_root              : Some(f_root),
        iterations          : num_iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::IterationLimit,
        stencil,
        algorithm_name      : algo_name,
    })
}
