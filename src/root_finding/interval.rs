//! Fixed-step bracketing scan.

use thiserror::Error;
use tracing::{debug, trace};


pub const DEFAULT_STEP: f64 = 0.1;


#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },

    #[error("invalid step: must be finite and > 0. got {step}")]
    InvalidStep { step: f64 },

    #[error("step {step} does not advance x={x}; x + step == x")]
    StepUnrepresentable { x: f64, step: f64 },

    #[error("invalid bracket: bounds must be finite with lo < hi. got [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },
}


/// Sub-interval `[lo, hi]` where a sign change (or an exact zero at an
/// endpoint) was detected. Bounds are finite and `lo < hi`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bracket {
    lo: f64,
    hi: f64,
}

impl Bracket {
    pub fn new(lo: f64, hi: f64) -> Result<Self, ScanError> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(ScanError::InvalidBracket { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    #[inline] pub fn lo(&self) -> f64 { self.lo }
    #[inline] pub fn hi(&self) -> f64 { self.hi }
    #[inline] pub fn width(&self) -> f64 { self.hi - self.lo }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }
}


/// Scan configuration.
///
/// # Defaults
/// - `step` : [`DEFAULT_STEP`]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScanCfg {
    step: f64,
}
impl ScanCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { step: DEFAULT_STEP }
    }

    pub fn set_step(mut self, v: f64) -> Result<Self, ScanError> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ScanError::InvalidStep { step: v });
        }
        self.step = v;
        Ok(self)
    }

    pub fn step(&self) -> f64 { self.step }
}
impl Default for ScanCfg {
    fn default() -> Self { Self::new() }
}


/// Scans `[a, b]` for sub-intervals where `func` changes sign.
///
/// Starting at `x = a`, every pair `(x, x + step)` with `x < b` is checked;
/// it qualifies when both values are finite and `f(x) * f(x + step) <= 0`.
/// `x` then advances by `step` (accumulated, so the last pair may reach
/// past `b`). Pairs touching a non-finite value are skipped.
///
/// # Returns
/// - `Ok(Some(brackets))` : all qualifying pairs, in scan order
/// - `Ok(None)`           : nothing qualified (including `a >= b`)
///
/// # Errors
/// - [`ScanError::InvalidBounds`]       : `a` or `b` non-finite
/// - [`ScanError::StepUnrepresentable`] : `x + step == x` at some `x`
pub fn find_interval<F>(
    mut func: F,
    a: f64,
    b: f64,
    cfg: ScanCfg,
) -> Result<Option<Vec<Bracket>>, ScanError>
where
    F: FnMut(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite()) {
        return Err(ScanError::InvalidBounds { a, b });
    }

    let step = cfg.step();
    let mut brackets = Vec::new();
    let mut skipped: usize = 0;

    let mut x = a;
    let mut fx = func(x);
    while x < b {
        let x_next = x + step;
        if x_next == x {
            return Err(ScanError::StepUnrepresentable { x, step });
        }
        let fx_next = func(x_next);

        if fx.is_finite() && fx_next.is_finite() {
            if fx * fx_next <= 0.0 {
                trace!(lo = x, hi = x_next, "sign change");
                brackets.push(Bracket { lo: x, hi: x_next });
            }
        } else {
            skipped += 1;
            trace!(lo = x, hi = x_next, fx, fx_next, "skipping non-finite pair");
        }

        x = x_next;
        fx = fx_next;
    }

    debug!(a, b, step, found = brackets.len(), skipped, "interval scan complete");

    if brackets.is_empty() {
        Ok(None)
    } else {
        Ok(Some(brackets))
    }
}
