//! Defines the [`SolveReport`] struct returned by the chord and Newton 
//! solvers. 

/// Reasons a root-finding algorithm may terminate.
/// - [`TerminationReason::ToleranceReached`] : |f(root)| < tolerance 
/// - [`TerminationReason::IterationLimit`]   : `max_iter` hit, no convergence guarantee 
/// - [`TerminationReason::ZeroDerivative`]   : Newton only; f'(x) == 0, method not applicable 
#[derive(Debug, Clone, Copy, PartialEq, Eq)] 
pub enum TerminationReason { 
    ToleranceReached, 
    IterationLimit,
    ZeroDerivative, 
}


/// Points used in the last update formula. 
/// - [`Stencil::Chord`]   : fixed and moving endpoints of the last chord  
/// - [`Stencil::Tangent`] : point where the last tangent was taken  
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stencil { 
    Chord   { fixed: f64, moving: f64 },
    Tangent { x: f64 }, 
}
impl Stencil { 
    pub fn points(&self) -> Vec<f64> { 
        match *self { 
            Stencil::Chord { fixed, moving } => vec![fixed, moving],
            Stencil::Tangent { x }           => vec![x],
        }
    }
}


/// Final report returned by the solvers.  
/// 
/// [`SolveReport`]
/// - `root`                : best root estimate; `None` only when Newton 
///                           stops on a zero derivative  
/// - `f_root`              : function value at `root`  
/// - `iterations`          : iterations performed (see solver docs)  
/// - `evaluations`         : total evaluations of f and its derivatives  
/// - `termination_reason`  : why the solver stopped ([`TerminationReason`])  
/// - `stencil`             : last set of points used in the update formula    
/// - `algorithm_name`      : algorithm name (e.g. `"chord"`)  
#[derive(Debug, Copy, Clone, PartialEq)] 
pub struct SolveReport {
    pub root                : Option<f64>, 
    pub f_root              : Option<f64>, 
    pub iterations          : usize, 
    pub evaluations         : usize, 
    pub termination_reason  : TerminationReason, 
    pub stencil             : Stencil, 
    pub algorithm_name      : &'static str, 
}

impl SolveReport { 
    pub fn converged(&self) -> bool { 
        self.termination_reason == TerminationReason::ToleranceReached 
    }
}
