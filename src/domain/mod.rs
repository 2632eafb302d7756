//! Domain types used throughout the model.
//!
//! This module defines:
//!
//! - the parameter set (`Infection`) and its output types
//!   (`Evaluation`, `SweepRecord`, `SimulationRun`)
//! - the registry of sweepable variables with bilingual labels

pub mod types;
pub mod variables;

pub use types::*;
pub use variables::*;
