//! Discrete-time forward simulation of daily case counts.
//!
//! The state is a window of the last `days` daily new-case counts, most recent
//! first. Each step computes `new = window · effective`, pushes it to the
//! front and drops the oldest day. Parameters are static during a run, so the
//! effective-infectiousness vector is computed once.

use log::{debug, info};

use crate::domain::{Infection, SimulationRun};
use crate::error::AppError;
use crate::model::compute_effective_infectiousness;

/// Number of steps used by the CLI when none is given.
pub const DEFAULT_STEPS: usize = 100;

/// Project case counts forward `steps` days.
///
/// `initial_cases` is zero-padded to `days` entries (first entry = most
/// recent day); a longer vector is rejected. The returned run has
/// `steps + 1` windows and an R series of the same length whose first entry
/// is `r0` and whose remaining entries are the effective R of each step.
pub fn simulate(
    params: &Infection,
    initial_cases: &[f64],
    steps: usize,
) -> Result<SimulationRun, AppError> {
    let days = params.days();
    if initial_cases.len() > days {
        return Err(AppError::domain(format!(
            "Initial cases cover {} days but the infection profile only {days}.",
            initial_cases.len()
        )));
    }

    let effective = compute_effective_infectiousness(params)?;
    let r: f64 = effective.iter().sum();

    let mut window = vec![0.0; days];
    window[..initial_cases.len()].copy_from_slice(initial_cases);

    let mut windows = Vec::with_capacity(steps + 1);
    let mut r_series = Vec::with_capacity(steps + 1);
    windows.push(window.clone());
    r_series.push(params.r0());

    for step in 0..steps {
        let new_cases: f64 = window.iter().zip(&effective).map(|(c, e)| c * e).sum();
        window.rotate_right(1);
        window[0] = new_cases;
        debug!("step {step}: new cases = {new_cases:.4}");

        windows.push(window.clone());
        r_series.push(r);
    }

    info!(
        "simulated {steps} steps over a {days}-day window, R = {r:.4}, final new cases = {:.4}",
        window[0]
    );
    Ok(SimulationRun { windows, r_series })
}
