//! Presentation port.
//!
//! The study pipeline never talks to a UI directly; it drives a
//! [`Presenter`] with plain data:
//!
//! ┌ [`Presenter::render_summary`] : root, iterations and interval, or "no root"  
//! ├ [`Presenter::render_table`]   : one row per tolerance run  
//! ├ [`Presenter::render_plot`]    : sampled curve, labelled markers, viewport  
//! └ [`Presenter::clear_plot`]     : blank plot for the no-root case  
//!
//! [`terminal::TerminalPresenter`] renders all four as text.

pub mod terminal;

use crate::root_finding::bench::ToleranceRun;
use crate::root_finding::interval::Bracket;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("presentation i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("presentation backend failed: {0}")]
    Backend(String),
}


/// Primary result shown to the user.
/// - [`SummaryView::Root`]       : chord converged or hit its cap  
/// - [`SummaryView::Unresolved`] : a bracket was found but the chord
///                                 stopped on a solver error  
/// - [`SummaryView::NoRoot`]     : no bracket in the search interval  
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SummaryView {
    Root { root: f64, iterations: usize, interval: Bracket },
    Unresolved { iterations: usize, interval: Bracket },
    NoRoot,
}


/// Labelled point on the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotMarker {
    pub id    : &'static str,
    pub x     : f64,
    pub y     : f64,
    pub label : String,
}


#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub left   : f64,
    pub right  : f64,
    pub bottom : f64,
    pub top    : f64,
}


/// Everything a plotting backend needs; the curve is pre-sampled so
/// backends need no access to the function itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub expression : String,
    pub curve      : Vec<(f64, f64)>,
    pub markers    : Vec<PlotMarker>,
    pub viewport   : Viewport,
}


pub trait Presenter {
    fn render_summary(&mut self, summary: &SummaryView) -> Result<(), PresentationError>;

    fn render_table(&mut self, rows: &[ToleranceRun]) -> Result<(), PresentationError>;

    fn render_plot(&mut self, plot: &PlotSpec) -> Result<(), PresentationError>;

    fn clear_plot(&mut self) -> Result<(), PresentationError>;
}


/// Root as shown in tables: fixed to six decimals, `n/a` when missing.
pub fn format_root(root: Option<f64>) -> String {
    match root {
        Some(root) => format!("{root:.6}"),
        None       => "n/a".to_string(),
    }
}
