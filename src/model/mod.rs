//! The intervention model.
//!
//! - `suppression`: per-day infectiousness after testing / tracing isolation
//! - `growth`: effective R and asymptotic growth from that vector

pub mod growth;
pub mod suppression;

pub use growth::*;
pub use suppression::*;
