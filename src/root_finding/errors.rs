//! Root-finding error types.  
//! 
//! ┌ [`RootFindingError`] : common runtime errors  
//! │   ├ non-finite function evaluation  
//! │   ├ non-finite starting bounds  
//! │   └ invalid global parameters (e.g. max_iter) 
//! │
//! └ [`ToleranceError`]   : tolerance-related errors  
//!     └ tolerance not finite or not > 0  
//!
//! Numeric outcomes (iteration cap, vanishing Newton derivative, no
//! bracket found) are not errors; they are reported in the result values.


use thiserror::Error; 


/// Root-finding runtime errors.  
/// 
/// ┌ Non-finite function evaluation  
/// ├ Non-finite interval bounds  
/// └ Invalid global configuration (e.g. max_iter < 1)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootFindingError {
    #[error("function non-finite at x={x}, f(x)={fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },

    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")] 
    InvalidBounds { a: f64, b: f64 }, 

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter   { got: usize },
}


/// Tolerance configuration errors.  
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToleranceError { 
    #[error("invalid tolerance: must be finite and > 0. got {got}")]
    InvalidTolerance { got: f64 },
}
