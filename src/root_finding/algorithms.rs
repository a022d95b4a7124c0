//! Root-finding algorithm definitions.  
//!
//! Provides the [`Algorithm`] enum, which enumerates the supported methods, 
//! along with the shared [`DEFAULT_MAX_ITER`] cap.  


/// Iteration cap applied when a config leaves `max_iter` unset. 
pub const DEFAULT_MAX_ITER: usize = 100; 


/// Root-finding algorithm variants. 
/// - [`Algorithm::Chord`]  : two-point chord method with re-selected fixed endpoint 
/// - [`Algorithm::Newton`] : one-point tangent method 
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm { 
    Chord, 
    Newton, 
}

impl Algorithm { 
    /// Default iteration count if `max_iter` is unset in config. 
    pub const fn default_max_iter(self) -> usize { 
        match self { 
            Algorithm::Chord  => DEFAULT_MAX_ITER, 
            Algorithm::Newton => DEFAULT_MAX_ITER, 
        }
    }

    pub const fn algorithm_name(self) -> &'static str { 
        match self { 
            Algorithm::Chord  => "chord", 
            Algorithm::Newton => "newton",
        }
    }
}
impl std::fmt::Display for Algorithm { 
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { 
        write!(f, "{}", self.algorithm_name())
    }
}
