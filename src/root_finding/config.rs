//! Shared configuration for root-finding algorithms.  
//! 
//! Provides [`CommonCfg`] with the default tolerance and iteration limit, 
//! used by all solver configs.
//!
//! [`CommonCfg`] : universal fields  
//! ├ `tolerance` : convergence threshold on |f(root)|  
//! └ `max_iter`  : iteration cap (optional) 
//!
//! Solvers stop as soon as `|f(root)| < tolerance` (strict).


pub const DEFAULT_TOLERANCE: f64 = 1e-3;


#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CommonCfg {
    tolerance: f64,
    max_iter:  Option<usize>,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self { 
            tolerance : DEFAULT_TOLERANCE, 
            max_iter  : None 
        }
    }

    // getters  
    pub fn tolerance(&self) -> f64 { self.tolerance }
    pub fn max_iter(&self)  -> Option<usize> { self.max_iter }

    // setters (internal) 
    pub(crate) fn with_tolerance(&mut self, v: f64)   { self.tolerance = v; }
    pub(crate) fn with_max_iter (&mut self, v: usize) { self.max_iter  = Some(v); }
}

impl Default for CommonCfg {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn set_tolerance(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                if !v.is_finite() || v <= 0.0 {
                    return Err(
                        $crate::root_finding::errors::ToleranceError::InvalidTolerance { got: v }
                    );
                }
                self.common.with_tolerance(v);
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if v == 0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }

            pub fn tolerance(&self) -> f64 { self.common.tolerance() }
            pub fn max_iter(&self)  -> Option<usize> { self.common.max_iter() }
        }
    };
}
pub(crate) use impl_common_cfg; 
