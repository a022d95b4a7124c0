//! Top-level workflow.
//!
//! expression ─ adapt ─▶ f, f', f'' ─ scan [a, b] ─▶ first bracket
//!   ├ chord on the bracket with `precision`         ─▶ summary
//!   ├ newton from the bracket's lower bound         ─▶ logged, returned
//!   ├ chord per tolerance level on the same bracket ─▶ table
//!   └ sampled curve with a, b and root markers      ─▶ plot
//!
//! With no bracket the plot is cleared and a "no root" summary is shown.
//! Solver errors on a found bracket (a collapsed chord, a zero Newton
//! derivative) stay in the summary; only invalid input aborts the study.

use thiserror::Error;
use tracing::{info, warn};

use crate::expression::engine::{Evaluable, MathEngine};
use crate::expression::errors::ExpressionError;
use crate::presentation::{PlotMarker, PlotSpec, PresentationError, Presenter, SummaryView, Viewport};
use crate::root_finding::algorithms::DEFAULT_MAX_ITER;
use crate::root_finding::bench::{convergence_by_tolerance, BenchCfg, BenchError, ToleranceRun, DEFAULT_TOLERANCE_LEVELS};
use crate::root_finding::chord::{chord, ChordCfg, ChordError};
use crate::root_finding::function::{adapt, NumericFunction};
use crate::root_finding::interval::{find_interval, Bracket, ScanCfg, ScanError, DEFAULT_STEP};
use crate::root_finding::newton::{newton, NewtonCfg, NewtonError};
use crate::root_finding::report::SolveReport;


/// Distance the plot extends past each side of the bracket.
pub const PLOT_MARGIN: f64 = 1.0;
pub const PLOT_BOTTOM: f64 = -10.0;
pub const PLOT_TOP: f64 = 10.0;
pub const PLOT_SAMPLES: usize = 241;


#[derive(Debug, Error)]
pub enum StudyError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Invalid precision or iteration cap.
    #[error(transparent)]
    Chord(#[from] ChordError),

    #[error(transparent)]
    Bench(#[from] BenchError),

    #[error(transparent)]
    Presentation(#[from] PresentationError),
}


/// Inputs of one study.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyRequest {
    pub expression: String,
    pub a: f64,
    pub b: f64,
    pub precision: f64,
    pub tolerance_levels: Vec<f64>,
    pub scan_step: f64,
    pub max_iter: usize,
}

impl StudyRequest {
    /// Request with default tolerance levels, scan step and iteration cap.
    pub fn new(expression: impl Into<String>, a: f64, b: f64, precision: f64) -> Self {
        Self {
            expression: expression.into(),
            a,
            b,
            precision,
            tolerance_levels: DEFAULT_TOLERANCE_LEVELS.to_vec(),
            scan_step: DEFAULT_STEP,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}


/// Result of a study on a found bracket.
///
/// `root` is `None` when the chord run on the bracket stopped on an
/// error; `iterations` is then the iteration at which it stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySummary {
    pub root: Option<f64>,
    pub iterations: usize,
    pub interval: Bracket,
    pub brackets_found: usize,
    pub chord: Result<SolveReport, ChordError>,
    pub newton: Result<SolveReport, NewtonError>,
    pub tolerance_runs: Vec<ToleranceRun>,
}

impl StudySummary {
    pub fn summary_view(&self) -> SummaryView {
        match self.root {
            Some(root) => SummaryView::Root { root, iterations: self.iterations, interval: self.interval },
            None => SummaryView::Unresolved { iterations: self.iterations, interval: self.interval },
        }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum StudyOutcome {
    Bracketed(StudySummary),
    NoBracket,
}


/// Runs the whole workflow and renders it through `presenter`.
///
/// # Errors
/// - [`StudyError::Expression`]   : expression does not parse or uses a
///                                  variable other than `x`
/// - [`StudyError::Scan`]         : invalid bounds or scan step
/// - [`StudyError::Chord`]        : invalid precision or iteration cap
/// - [`StudyError::Bench`]        : invalid tolerance level
/// - [`StudyError::Presentation`] : presenter failure
pub fn run_study<E, P>(
    engine: &E,
    request: &StudyRequest,
    presenter: &mut P,
) -> Result<StudyOutcome, StudyError>
where
    E: MathEngine,
    E::Compiled: Sync,
    P: Presenter + ?Sized,
{
    let functions = adapt(engine, &request.expression)?;
    let f = functions.f.as_fn();
    let d1f = functions.f_prime.as_fn();
    let d2f = functions.f_double_prime.as_fn();

    let scan_cfg = ScanCfg::new().set_step(request.scan_step)?;
    let Some(brackets) = find_interval(&f, request.a, request.b, scan_cfg)? else {
        info!(expression = %request.expression, a = request.a, b = request.b, "no root-containing interval found");
        presenter.clear_plot()?;
        presenter.render_summary(&SummaryView::NoRoot)?;
        return Ok(StudyOutcome::NoBracket);
    };
    let interval = brackets[0];

    let chord_cfg = ChordCfg::new()
        .set_tolerance(request.precision)
        .map_err(ChordError::from)?
        .set_max_iter(request.max_iter)
        .map_err(ChordError::from)?;
    let chord_result = chord(&f, &d2f, interval.lo(), interval.hi(), chord_cfg);
    let (root, iterations) = match &chord_result {
        Ok(report) => {
            info!(root = ?report.root, iterations = report.iterations, lo = interval.lo(), width = interval.width(), "chord method");
            (report.root, report.iterations)
        }
        Err(err) => {
            warn!(%err, lo = interval.lo(), width = interval.width(), "chord method failed");
            (None, err.iteration().unwrap_or(0))
        }
    };

    let newton_report = NewtonCfg::new()
        .set_tolerance(request.precision)
        .map_err(NewtonError::from)
        .and_then(|cfg| cfg.set_max_iter(request.max_iter).map_err(NewtonError::from))
        .and_then(|cfg| newton(&f, &d1f, interval.lo(), cfg));
    match &newton_report {
        Ok(report) => info!(root = ?report.root, iterations = report.iterations, "newton's method"),
        Err(err)   => warn!(%err, "newton's method failed"),
    }

    let bench_cfg = BenchCfg::new().set_max_iter(request.max_iter)?;
    let tolerance_runs = convergence_by_tolerance(&f, &d2f, interval, &request.tolerance_levels, bench_cfg)?;

    let summary = StudySummary {
        root,
        iterations,
        interval,
        brackets_found: brackets.len(),
        chord: chord_result,
        newton: newton_report,
        tolerance_runs,
    };

    presenter.render_summary(&summary.summary_view())?;
    presenter.render_table(&summary.tolerance_runs)?;
    presenter.render_plot(&plot_spec(&request.expression, &functions.f, interval, root))?;

    Ok(StudyOutcome::Bracketed(summary))
}


/// Curve over `[lo - 1, hi + 1]`, bracket markers and, when there is
/// one, the root marker; fixed y-range.
pub fn plot_spec<C: Evaluable>(
    expression: &str,
    f: &NumericFunction<C>,
    interval: Bracket,
    root: Option<f64>,
) -> PlotSpec {
    let viewport = Viewport {
        left: interval.lo() - PLOT_MARGIN,
        right: interval.hi() + PLOT_MARGIN,
        bottom: PLOT_BOTTOM,
        top: PLOT_TOP,
    };

    let span = viewport.right - viewport.left;
    let curve = (0..PLOT_SAMPLES)
        .map(|i| {
            let x = viewport.left + span * i as f64 / (PLOT_SAMPLES - 1) as f64;
            (x, f.eval(x))
        })
        .collect();

    let mut markers = vec![
        PlotMarker {
            id: "interval-a",
            x: interval.lo(),
            y: 0.0,
            label: format!("a = {:.3}", interval.lo()),
        },
        PlotMarker {
            id: "interval-b",
            x: interval.hi(),
            y: 0.0,
            label: format!("b = {:.3}", interval.hi()),
        },
    ];
    if let Some(root) = root {
        markers.push(PlotMarker {
            id: "root",
            x: root,
            y: 0.0,
            label: format!("Root ≈ {root:.3}"),
        });
    }

    PlotSpec { expression: expression.to_string(), curve, markers, viewport }
}
