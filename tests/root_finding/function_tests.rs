use std::cell::Cell;

use approx::assert_relative_eq;
use rootbench::expression::engine::{MathEngine, SymbolicEngine};
use rootbench::expression::errors::ExpressionError;
use rootbench::root_finding::function::{adapt, Evaluation};

type TestResult = Result<(), ExpressionError>;


/// Delegates to [`SymbolicEngine`] and counts derivative requests.
#[derive(Default)]
struct CountingEngine {
    inner: SymbolicEngine,
    derivatives: Cell<usize>,
}

type Expr = <SymbolicEngine as MathEngine>::Expr;
type Compiled = <SymbolicEngine as MathEngine>::Compiled;

impl MathEngine for CountingEngine {
    type Expr = Expr;
    type Compiled = Compiled;

    fn parse(&self, source: &str) -> Result<Expr, ExpressionError> {
        self.inner.parse(source)
    }

    fn evaluate(&self, expr: &Expr, bindings: &[(&str, f64)]) -> Result<f64, ExpressionError> {
        self.inner.evaluate(expr, bindings)
    }

    fn derivative(&self, expr: &Expr, wrt: &str) -> Result<Expr, ExpressionError> {
        self.derivatives.set(self.derivatives.get() + 1);
        self.inner.derivative(expr, wrt)
    }

    fn compile(&self, expr: &Expr, wrt: &str) -> Result<Compiled, ExpressionError> {
        self.inner.compile(expr, wrt)
    }
}


#[test]
fn cubic_and_its_derivatives() -> TestResult {
    let set = adapt(&SymbolicEngine, "x^3 - 2*x - 5")?;

    assert_relative_eq!(set.f.eval(2.0), -1.0, epsilon = 1e-12);
    assert_relative_eq!(set.f_prime.eval(2.0), 10.0, epsilon = 1e-12);
    assert_relative_eq!(set.f_double_prime.eval(2.0), 12.0, epsilon = 1e-12);
    assert_relative_eq!(set.f.eval(2.1), 0.061, epsilon = 1e-12);
    Ok(())
}

#[test]
fn derivatives_are_taken_exactly_twice_per_adapt() -> TestResult {
    let engine = CountingEngine::default();

    let set = adapt(&engine, "x^3 - 2*x - 5")?;
    assert_eq!(engine.derivatives.get(), 2);
    assert_relative_eq!(set.f_double_prime.eval(1.5), 9.0, epsilon = 1e-12);
    engine.derivatives.set(0);

    adapt(&engine, "sin(x) * x^2")?;
    assert_eq!(engine.derivatives.get(), 2);

    // nothing is cached between calls
    adapt(&engine, "sin(x) * x^2")?;
    assert_eq!(engine.derivatives.get(), 4);
    Ok(())
}

#[test]
fn symbolic_forms_are_kept() -> TestResult {
    let set = adapt(&SymbolicEngine, "x^2 + 3*x")?;
    assert!(set.f.expr().contains('x'));
    assert!(!set.f_double_prime.expr().contains('x'));
    assert_relative_eq!(set.f_double_prime.eval(123.0), 2.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn closures_borrow_the_compiled_form() -> TestResult {
    let set = adapt(&SymbolicEngine, "exp(x) - 2")?;
    let f = set.f.as_fn();
    assert_relative_eq!(f(2.0_f64.ln()), 0.0, epsilon = 1e-15);
    Ok(())
}

#[test]
fn domain_errors_are_tagged() -> TestResult {
    let set = adapt(&SymbolicEngine, "ln(x)")?;

    assert_eq!(set.f.evaluate(1.0), Evaluation::Finite(0.0));
    assert_eq!(set.f.evaluate(1.0).finite(), Some(0.0));

    let bad = set.f.evaluate(-1.0);
    assert!(matches!(bad, Evaluation::DomainError { x, value } if x == -1.0 && value.is_nan()));
    assert_eq!(bad.finite(), None);
    assert!(bad.value().is_nan());

    assert!(matches!(
        set.f_prime.evaluate(0.0),
        Evaluation::DomainError { value, .. } if value.is_infinite()
    ));
    Ok(())
}

#[test]
fn other_variables_are_rejected() {
    assert!(matches!(
        adapt(&SymbolicEngine, "x^2 * k"),
        Err(ExpressionError::Compile { .. })
    ));
}

#[test]
fn parse_errors_propagate() {
    assert!(matches!(adapt(&SymbolicEngine, ""), Err(ExpressionError::Empty)));
    assert!(matches!(adapt(&SymbolicEngine, "  "), Err(ExpressionError::Empty)));
    assert!(matches!(
        adapt(&SymbolicEngine, "x^3 - 2*"),
        Err(ExpressionError::Parse { .. })
    ));
}
