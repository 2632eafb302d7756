//! Mathematical utilities: sweep ranges and the spectral growth estimate.

pub mod range;
pub mod spectral;

pub use range::*;
pub use spectral::*;
