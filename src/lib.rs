//! Root bracketing, chord and Newton solvers, and a convergence bench
//! comparing them across tolerance levels.
//!
//! ┌ [`expression`]   : math-engine seam over `symb_anafis`
//! ├ [`root_finding`] : function adapter, interval scan, solvers, bench
//! ├ [`presentation`] : presenter port and terminal renderer
//! ├ [`settings`]     : TOML study settings
//! └ [`study`]        : top-level workflow

pub mod expression;
pub mod root_finding;
pub mod presentation;
pub mod settings;
pub mod study;
