//! Reporting: terminal tables and machine-readable renderings of results.

pub mod format;

pub use format::*;
