// math-engine seam
pub mod errors; 
pub mod engine; 
