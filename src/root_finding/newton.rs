//! Newton-Raphson method

use super::algorithms::Algorithm;
use super::report::{SolveReport, TerminationReason, Stencil};
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use thiserror::Error;
use tracing::{debug, trace, warn};


#[derive(Debug, Clone, PartialEq, Error)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("derivative non-finite at x={x}, f'(x)={dfx}")]
    DerivativeNotFinite { x: f64, dfx: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with `tolerance` and optional `max_iter`.
///
/// # Defaults
/// - If `max_iter` is `None`, [`newton`] uses [`Algorithm::default_max_iter`] (100).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NewtonCfg {
    common: CommonCfg,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new() }
    }
}
impl Default for NewtonCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(NewtonCfg);


#[inline]
fn eval_fx_checked<F>(
    f: &mut F,
    x: f64,
    evals: &mut usize
) -> Result<f64, NewtonError> where F: FnMut(f64) -> f64 {
    let fx = { *evals += 1; f(x) };
    if !fx.is_finite() {
        return Err(RootFindingError::NonFiniteEvaluation { x, fx }.into());
    }
    Ok(fx)
}


/// Finds a root of `func` using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton_method).
///
/// # Arguments
/// - `func`  : function whose root is sought
/// - `dfunc` : analytic first derivative
/// - `x0`    : finite initial guess
/// - `cfg`   : [`NewtonCfg`] (tolerance, optional `max_iter`)
///
/// # Behavior
/// Each iteration evaluates `f(x)` and `f'(x)`, then in order:
/// - `|f(x)| < tolerance` : returns `x`, `iterations = iteration + 1`
/// - `f'(x) == 0`         : returns `root: None`, `iterations = iteration`,
///                          [`TerminationReason::ZeroDerivative`]
/// - otherwise            : `x = x - f(x) / f'(x)`
///
/// On the cap, the last iterate is returned with `iterations = max_iter`.
///
/// # Errors
/// - [`NewtonError::InvalidGuess`]        : `x0` non-finite
/// - [`NewtonError::DerivativeNotFinite`] : `f'(x)` produced NaN/inf
///
/// * Propagated via [`NewtonError::RootFinding`]:
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
/// - [`RootFindingError::InvalidMaxIter`]      : `max_iter = 0`
///
/// # Notes
/// - Convergence is local only; a poor `x0` can diverge or cycle until the cap.
pub fn newton<F, G>(
    mut func: F,
    mut dfunc: G,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<SolveReport, NewtonError>
where
    F: FnMut(f64) -> f64,
    G: FnMut(f64) -> f64
{
    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let algorithm = Algorithm::Newton;
    let algo_name = algorithm.algorithm_name();
    let tolerance = cfg.tolerance();
    let num_iter  = match cfg.max_iter() {
        Some(0) => return Err(RootFindingError::InvalidMaxIter { got: 0 }.into()),
        Some(v) => v,
        None    => algorithm.default_max_iter(),
    };

    let mut evals: usize = 0;
    let mut x = x0;
    let mut prev_x = x0;

    for iteration in 0..num_iter {
        let fx  = eval_fx_checked(&mut func, x, &mut evals)?;
        let dfx = { evals += 1; dfunc(x) };
        trace!(iteration, x, fx, dfx, "newton step");

        if fx.abs() < tolerance {
            debug!(root = x, iterations = iteration + 1, "newton converged");
            return Ok(SolveReport {
                root                : Some(x),
                f_root              : Some(fx),
                iterations          : iteration + 1,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                stencil             : Stencil::Tangent { x: prev_x },
                algorithm_name      : algo_name,
            });
        }

        // only checked once the tolerance test has failed
        if !dfx.is_finite() {
            return Err(NewtonError::DerivativeNotFinite { x, dfx });
        }

        if dfx == 0.0 {
            warn!(x, iteration, "derivative is zero, newton's method is not applicable");
            return Ok(SolveReport {
                root                : None,
                f_root              : None,
                iterations          : iteration,
                evaluations         : evals,
                termination_reason  : TerminationReason::ZeroDerivative,
                stencil             : Stencil::Tangent { x },
                algorithm_name      : algo_name,
            });
        }

        prev_x = x;
        x -= fx / dfx;
    }

    let fx = { evals += 1; func(x) };
    debug!(root = x, iterations = num_iter, "newton hit iteration limit");
    Ok(SolveReport {
        root                : Some(x),
        f_root              : Some(fx),
        iterations          : num_iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::IterationLimit,
        stencil             : Stencil::Tangent { x: prev_x },
        algorithm_name      : algo_name,
    })
}
