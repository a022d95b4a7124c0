//! Expression engine error types.  
//! 
//! [`ExpressionError`]
//! ├ parsing         : empty input, syntax the engine rejects  
//! ├ differentiation : engine could not differentiate  
//! └ compiling       : variables other than the free one, engine limits  
//!
//! Engine errors are carried as their rendered message so the seam does
//! not leak the engine's own error type.


use thiserror::Error; 


#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError { 
    #[error("empty expression")]
    Empty, 

    #[error("failed to parse '{text}': {reason}")]
    Parse { text: String, reason: String }, 

    #[error("failed to differentiate '{expr}' with respect to {wrt}: {reason}")]
    Differentiate { expr: String, wrt: String, reason: String }, 

    #[error("failed to compile '{expr}': {reason}")]
    Compile { expr: String, reason: String }, 
}
