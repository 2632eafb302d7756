//! `npi-growth` library crate.
//!
//! Estimates how testing, contact tracing and isolation change the effective
//! reproduction number and the asymptotic daily growth of an epidemic.
//!
//! The binary (`npi`) is a thin wrapper around this library so that:
//!
//! - the model is testable without spawning processes
//! - sweeps and simulations are reusable from other front-ends

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod model;
pub mod plot;
pub mod report;
pub mod simulate;
pub mod sweep;
