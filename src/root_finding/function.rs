//! Function adapter: expression text to numeric functions.
//!
//! [`adapt`] parses the expression once, differentiates it exactly twice
//! (f' from f, f'' from f') and compiles all three. Every call recomputes
//! the derivatives; nothing is cached across calls.
//!
//! Evaluation never fails. A domain error (e.g. `ln(-1)`, `1/0`) shows
//! up as a non-finite value from [`NumericFunction::eval`], or as
//! [`Evaluation::DomainError`] from [`NumericFunction::evaluate`].

use crate::expression::engine::{Evaluable, MathEngine};
use crate::expression::errors::ExpressionError;
use tracing::debug;


/// The free variable of adapted expressions.
pub const VARIABLE: &str = "x";


/// Tagged evaluation result.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Evaluation {
    Finite(f64),
    DomainError { x: f64, value: f64 },
}

impl Evaluation {
    pub fn from_value(x: f64, value: f64) -> Self {
        if value.is_finite() {
            Evaluation::Finite(value)
        } else {
            Evaluation::DomainError { x, value }
        }
    }

    pub fn finite(self) -> Option<f64> {
        match self {
            Evaluation::Finite(v) => Some(v),
            Evaluation::DomainError { .. } => None,
        }
    }

    /// Raw value, non-finite on domain error.
    pub fn value(self) -> f64 {
        match self {
            Evaluation::Finite(v) | Evaluation::DomainError { value: v, .. } => v,
        }
    }
}


/// One compiled function of `x` together with its rendered symbolic form.
#[derive(Debug, Clone)]
pub struct NumericFunction<C> {
    expr: String,
    compiled: C,
}

impl<C: Evaluable> NumericFunction<C> {
    pub fn new(expr: impl Into<String>, compiled: C) -> Self {
        Self { expr: expr.into(), compiled }
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.compiled.eval(x)
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> Evaluation {
        Evaluation::from_value(x, self.eval(x))
    }

    pub fn expr(&self) -> &str { &self.expr }

    /// Borrowing closure, for the solvers' `Fn(f64) -> f64` parameters.
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.eval(x)
    }
}


/// f, f' and f'' of one expression.
#[derive(Debug, Clone)]
pub struct FunctionSet<C> {
    pub f: NumericFunction<C>,
    pub f_prime: NumericFunction<C>,
    pub f_double_prime: NumericFunction<C>,
}


/// Builds [`FunctionSet`] for `source` using `engine`.
///
/// # Errors
/// - [`ExpressionError`] from parsing or differentiating, or from
///   compiling when the expression uses a variable other than [`VARIABLE`].
pub fn adapt<E: MathEngine>(
    engine: &E,
    source: &str,
) -> Result<FunctionSet<E::Compiled>, ExpressionError> {
    let expr = engine.parse(source)?;
    let first = engine.derivative(&expr, VARIABLE)?;
    let second = engine.derivative(&first, VARIABLE)?;

    debug!(%expr, f_prime = %first, f_double_prime = %second, "adapted expression");

    let f = engine.compile(&expr, VARIABLE)?;
    let f_prime = engine.compile(&first, VARIABLE)?;
    let f_double_prime = engine.compile(&second, VARIABLE)?;

    Ok(FunctionSet {
        f: NumericFunction::new(expr.to_string(), f),
        f_prime: NumericFunction::new(first.to_string(), f_prime),
        f_double_prime: NumericFunction::new(second.to_string(), f_double_prime),
    })
}
