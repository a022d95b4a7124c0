//! Text renderer for the presentation port.

use std::io::{self, Write};

use super::{format_root, PlotSpec, PresentationError, Presenter, SummaryView, Viewport};
use crate::root_finding::bench::ToleranceRun;


const DEFAULT_COLUMNS: usize = 61;
const DEFAULT_ROWS: usize = 21;


/// Writes summaries, tables and ASCII plots to any [`Write`].
pub struct TerminalPresenter<W: Write> {
    out: W,
    columns: usize,
    rows: usize,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, columns: DEFAULT_COLUMNS, rows: DEFAULT_ROWS }
    }

    /// Plot grid size; each dimension is at least 2 cells.
    pub fn with_size(out: W, columns: usize, rows: usize) -> Self {
        Self { out, columns: columns.max(2), rows: rows.max(2) }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell(&self, viewport: &Viewport, x: f64, y: f64) -> Option<(usize, usize)> {
        let width = viewport.right - viewport.left;
        let height = viewport.top - viewport.bottom;
        if !(x.is_finite() && y.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }

        let col = ((x - viewport.left) / width * (self.columns - 1) as f64).round();
        let row = ((viewport.top - y) / height * (self.rows - 1) as f64).round();
        let in_grid = (0.0..=(self.columns - 1) as f64).contains(&col)
            && (0.0..=(self.rows - 1) as f64).contains(&row);

        in_grid.then_some((row as usize, col as usize))
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_summary(&mut self, summary: &SummaryView) -> Result<(), PresentationError> {
        match summary {
            SummaryView::Root { root, iterations, interval } => {
                writeln!(self.out, "Root: {root}")?;
                writeln!(self.out, "Iterations: {iterations}")?;
                writeln!(self.out, "Interval: [{}, {}]", interval.lo(), interval.hi())?;
            }
            SummaryView::Unresolved { iterations, interval } => {
                writeln!(self.out, "Root: n/a (chord method stopped early)")?;
                writeln!(self.out, "Iterations: {iterations}")?;
                writeln!(self.out, "Interval: [{}, {}]", interval.lo(), interval.hi())?;
            }
            SummaryView::NoRoot => {
                writeln!(self.out, "No interval containing a root was found.")?;
            }
        }
        Ok(())
    }

    fn render_table(&mut self, rows: &[ToleranceRun]) -> Result<(), PresentationError> {
        writeln!(self.out, "{:>12}  {:>10}  {:>14}", "Tolerance", "Iterations", "Root")?;
        for run in rows {
            writeln!(
                self.out,
                "{:>12}  {:>10}  {:>14}",
                format!("{:e}", run.tolerance),
                run.iterations,
                format_root(run.root),
            )?;
        }
        Ok(())
    }

    fn render_plot(&mut self, plot: &PlotSpec) -> Result<(), PresentationError> {
        let vp = plot.viewport;
        let mut grid = vec![vec![' '; self.columns]; self.rows];

        // axes
        if let Some((row, _)) = self.cell(&vp, vp.left, 0.0) {
            grid[row].iter_mut().for_each(|c| *c = '-');
        }
        if let Some((_, col)) = self.cell(&vp, 0.0, vp.bottom) {
            grid.iter_mut().for_each(|line| line[col] = '|');
        }

        for &(x, y) in &plot.curve {
            if let Some((row, col)) = self.cell(&vp, x, y) {
                grid[row][col] = '*';
            }
        }
        for marker in &plot.markers {
            if let Some((row, col)) = self.cell(&vp, marker.x, marker.y) {
                grid[row][col] = marker.label.chars().next().unwrap_or('+');
            }
        }

        writeln!(self.out, "Plot: y = {}", plot.expression)?;
        writeln!(
            self.out,
            "x in [{}, {}], y in [{}, {}]",
            vp.left, vp.right, vp.bottom, vp.top
        )?;
        for line in &grid {
            writeln!(self.out, "{}", line.iter().collect::<String>().trim_end())?;
        }
        for marker in &plot.markers {
            writeln!(self.out, "  {}", marker.label)?;
        }
        Ok(())
    }

    fn clear_plot(&mut self) -> Result<(), PresentationError> {
        writeln!(self.out, "Plot: (blank)")?;
        Ok(())
    }
}
