// common helpers 
pub mod algorithms; 
pub mod report; 
pub mod errors; 
pub(crate) mod config;

// function adapter and bracketing 
pub mod function; 
pub mod interval; 

// algorithms 
pub mod chord;
pub mod newton;

// comparison harness 
pub mod bench; 
