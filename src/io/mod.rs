//! Input helpers.
//!
//! - comma-separated day profiles (`profile`)
//! - JSON scenario files (`scenario`)

pub mod profile;
pub mod scenario;

pub use profile::*;
pub use scenario::*;
