//! Parameter sweep driver.
//!
//! Responsibilities:
//!
//! - generate the inclusive value range for a variable
//! - evaluate each value on an independent copy of the parameter set (parallel)
//! - collect flat records in increasing-value order

pub mod driver;

pub use driver::*;
