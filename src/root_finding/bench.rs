//! Convergence bench.
//!
//! Re-runs the solvers on one fixed bracket for a sequence of tolerances.
//! Rows come back in the caller's order; duplicates and unsorted input
//! are kept as given. A solver that stops with an error (e.g. a collapsed
//! chord) only marks its own row. With the `parallel` feature the
//! tolerance levels run on rayon, still collected in input order.

use super::chord::{chord, ChordCfg, ChordError};
use super::errors::RootFindingError;
use super::interval::Bracket;
use super::newton::{newton, NewtonCfg, NewtonError};
use super::report::{SolveReport, TerminationReason};
use super::algorithms::DEFAULT_MAX_ITER;
use thiserror::Error;
use tracing::{debug, warn};


/// Tolerances compared by default, loosest first.
pub const DEFAULT_TOLERANCE_LEVELS: [f64; 5] = [1e-3, 1e-5, 1e-7, 1e-9, 1e-11];


#[derive(Debug, Clone, PartialEq, Error)]
pub enum BenchError {
    #[error(transparent)]
    Chord(#[from] ChordError),

    #[error(transparent)]
    Newton(#[from] NewtonError),

    #[error(transparent)]
    RootFinding(#[from] RootFindingError),
}


/// One chord run at one tolerance.
///
/// [`ToleranceRun`]
/// - `root`       : `None` when the run stopped on an error  
/// - `iterations` : iterations performed; for a collapsed chord, the
///                  iteration at which it collapsed  
/// - `outcome`    : why the run stopped, or the solver error  
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceRun {
    pub tolerance  : f64,
    pub root       : Option<f64>,
    pub iterations : usize,
    pub outcome    : Result<TerminationReason, ChordError>,
}

impl ToleranceRun {
    pub fn from_result(tolerance: f64, result: Result<SolveReport, ChordError>) -> Self {
        match result {
            Ok(report) => Self {
                tolerance,
                root       : report.root,
                iterations : report.iterations,
                outcome    : Ok(report.termination_reason),
            },
            Err(err) => Self {
                tolerance,
                root       : None,
                iterations : err.iteration().unwrap_or(0),
                outcome    : Err(err),
            },
        }
    }

    pub fn converged(&self) -> bool {
        self.outcome == Ok(TerminationReason::ToleranceReached)
    }
}


/// Chord and Newton results at one tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodComparison {
    pub tolerance : f64,
    pub chord     : Result<SolveReport, ChordError>,
    pub newton    : Result<SolveReport, NewtonError>,
}


/// Bench configuration.
///
/// # Defaults
/// - `max_iter` : [`DEFAULT_MAX_ITER`] for every run
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BenchCfg {
    max_iter: usize,
}
impl BenchCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { max_iter: DEFAULT_MAX_ITER }
    }

    pub fn set_max_iter(mut self, v: usize) -> Result<Self, BenchError> {
        if v == 0 {
            return Err(RootFindingError::InvalidMaxIter { got: v }.into());
        }
        self.max_iter = v;
        Ok(self)
    }

    pub fn max_iter(&self) -> usize { self.max_iter }
}
impl Default for BenchCfg {
    fn default() -> Self { Self::new() }
}


fn chord_cfg(tolerance: f64, max_iter: usize) -> Result<ChordCfg, ChordError> {
    Ok(ChordCfg::new()
        .set_tolerance(tolerance)?
        .set_max_iter(max_iter)?)
}

fn newton_cfg(tolerance: f64, max_iter: usize) -> Result<NewtonCfg, NewtonError> {
    Ok(NewtonCfg::new()
        .set_tolerance(tolerance)?
        .set_max_iter(max_iter)?)
}


// maps each level in order; parallel under the `parallel` feature
fn map_levels<L, T, M>(levels: &[L], run: M) -> Vec<T>
where
    L: Copy + Sync,
    T: Send,
    M: Fn(L) -> T + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        levels.par_iter().map(|&level| run(level)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        levels.iter().map(|&level| run(level)).collect()
    }
}


/// Runs [`chord`] on `bracket` once per tolerance in `levels`.
///
/// Solver errors are kept in the row's `outcome`.
///
/// # Errors
/// - [`BenchError::Chord`] if a level is not a valid tolerance; nothing
///   is run in that case.
pub fn convergence_by_tolerance<F, G>(
    func: F,
    d2func: G,
    bracket: Bracket,
    levels: &[f64],
    cfg: BenchCfg,
) -> Result<Vec<ToleranceRun>, BenchError>
where
    F: Fn(f64) -> f64 + Sync,
    G: Fn(f64) -> f64 + Sync,
{
    let run_cfgs = levels
        .iter()
        .map(|&tolerance| chord_cfg(tolerance, cfg.max_iter()))
        .collect::<Result<Vec<_>, _>>()?;

    let runs = map_levels(&run_cfgs, |run_cfg| {
        let result = chord(&func, &d2func, bracket.lo(), bracket.hi(), run_cfg);
        if let Err(err) = &result {
            warn!(tolerance = run_cfg.tolerance(), %err, "chord run failed");
        }
        ToleranceRun::from_result(run_cfg.tolerance(), result)
    });

    let failed = runs.iter().filter(|r| r.outcome.is_err()).count();
    debug!(levels = levels.len(), failed, "convergence bench complete");
    Ok(runs)
}


/// Runs [`chord`] on `bracket` and [`newton`] from `bracket.lo()` once per
/// tolerance in `levels`. Solver errors are kept per row.
///
/// # Errors
/// - [`BenchError::Chord`] or [`BenchError::Newton`] if a level is not a
///   valid tolerance.
pub fn compare_methods<F, G, H>(
    func: F,
    dfunc: G,
    d2func: H,
    bracket: Bracket,
    levels: &[f64],
    cfg: BenchCfg,
) -> Result<Vec<MethodComparison>, BenchError>
where
    F: Fn(f64) -> f64 + Sync,
    G: Fn(f64) -> f64 + Sync,
    H: Fn(f64) -> f64 + Sync,
{
    let run_cfgs = levels
        .iter()
        .map(|&tolerance| -> Result<_, BenchError> {
            Ok((chord_cfg(tolerance, cfg.max_iter())?, newton_cfg(tolerance, cfg.max_iter())?))
        })
        .collect::<Result<Vec<_>, BenchError>>()?;

    Ok(map_levels(&run_cfgs, |(c_cfg, n_cfg)| MethodComparison {
        tolerance : c_cfg.tolerance(),
        chord     : chord(&func, &d2func, bracket.lo(), bracket.hi(), c_cfg),
        newton    : newton(&func, &dfunc, bracket.lo(), n_cfg),
    }))
}
