//! Math-engine seam.
//!
//! The root-finding side only needs four capabilities from a math engine:
//! parse text, evaluate with bindings, differentiate symbolically and
//! compile for repeated evaluation. [`MathEngine`] names them;
//! [`SymbolicEngine`] implements them over `symb_anafis`.

use std::collections::HashSet;
use std::fmt;

use symb_anafis::{symb, CompiledEvaluator, Diff, Expr, Symbol};

use super::errors::ExpressionError;


/// A compiled single-variable function.
pub trait Evaluable {
    /// Value at `x`; domain errors are NaN or infinite.
    fn eval(&self, x: f64) -> f64;
}

impl Evaluable for CompiledEvaluator {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        self.evaluate(&[x])
    }
}


pub trait MathEngine {
    type Expr: fmt::Display;
    type Compiled: Evaluable;

    fn parse(&self, source: &str) -> Result<Self::Expr, ExpressionError>;

    fn evaluate(&self, expr: &Self::Expr, bindings: &[(&str, f64)]) -> Result<f64, ExpressionError>;

    fn derivative(&self, expr: &Self::Expr, wrt: &str) -> Result<Self::Expr, ExpressionError>;

    /// Compiles `expr` as a function of `wrt` alone.
    fn compile(&self, expr: &Self::Expr, wrt: &str) -> Result<Self::Compiled, ExpressionError>;
}


/// `symb_anafis` parser, differentiator (with its simplifier) and
/// bytecode evaluator.
#[derive(Debug, Default, Copy, Clone)]
pub struct SymbolicEngine;

impl SymbolicEngine {
    fn compile_over(&self, expr: &Expr, vars: &[&Symbol]) -> Result<CompiledEvaluator, ExpressionError> {
        CompiledEvaluator::compile(expr, vars, None).map_err(|e| ExpressionError::Compile {
            expr: expr.to_string(),
            reason: e.to_string(),
        })
    }
}

impl MathEngine for SymbolicEngine {
    type Expr = Expr;
    type Compiled = CompiledEvaluator;

    fn parse(&self, source: &str) -> Result<Expr, ExpressionError> {
        if source.trim().is_empty() {
            return Err(ExpressionError::Empty);
        }
        symb_anafis::parse(source, &HashSet::new(), &HashSet::new(), None).map_err(|e| {
            ExpressionError::Parse { text: source.to_string(), reason: e.to_string() }
        })
    }

    fn evaluate(&self, expr: &Expr, bindings: &[(&str, f64)]) -> Result<f64, ExpressionError> {
        let symbols: Vec<Symbol> = bindings.iter().map(|&(name, _)| symb(name)).collect();
        let vars: Vec<&Symbol> = symbols.iter().collect();
        let values: Vec<f64> = bindings.iter().map(|&(_, v)| v).collect();

        Ok(self.compile_over(expr, &vars)?.evaluate(&values))
    }

    fn derivative(&self, expr: &Expr, wrt: &str) -> Result<Expr, ExpressionError> {
        Diff::new().differentiate(expr, &symb(wrt)).map_err(|e| ExpressionError::Differentiate {
            expr: expr.to_string(),
            wrt: wrt.to_string(),
            reason: e.to_string(),
        })
    }

    fn compile(&self, expr: &Expr, wrt: &str) -> Result<CompiledEvaluator, ExpressionError> {
        let var = symb(wrt);
        self.compile_over(expr, &[&var])
    }
}
