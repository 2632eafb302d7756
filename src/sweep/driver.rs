//! Parameter sweeps.
//!
//! A sweep holds every parameter fixed except one, steps that one across a
//! range and evaluates R and daily growth at each value.
//!
//! Every swept value is applied to its own clone of the input parameter set,
//! so the caller's `Infection` is untouched and values are evaluated in
//! parallel (rayon). Output order is always increasing `x`.

use log::info;
use rayon::prelude::*;

use crate::domain::{Infection, SweepRecord, VariableId};
use crate::error::AppError;
use crate::math::linear_range;
use crate::model::evaluate;

/// Sweep `id` over its registry range.
pub fn sweep(params: &Infection, id: VariableId) -> Result<Vec<SweepRecord>, AppError> {
    let var = id.variable();
    sweep_range(params, id, var.min, var.max, var.step)
}

/// Sweep `id` over `[min, max]` (inclusive) in increments of `step`.
pub fn sweep_range(
    params: &Infection,
    id: VariableId,
    min: f64,
    max: f64,
    step: f64,
) -> Result<Vec<SweepRecord>, AppError> {
    let values = linear_range(min, max, step)?;

    let records = values
        .par_iter()
        .map(|&x| sweep_point(params, id, x))
        .collect::<Result<Vec<_>, AppError>>()?;

    info!(
        "sweep {id}: {} values in [{min}, {max}] step {step}",
        records.len()
    );
    Ok(records)
}

/// Sweep every registry variable, in registry order.
pub fn sweep_all(params: &Infection) -> Result<Vec<(VariableId, Vec<SweepRecord>)>, AppError> {
    VariableId::ALL
        .into_iter()
        .map(|id| Ok((id, sweep(params, id)?)))
        .collect()
}

/// Evaluate one swept value.
///
/// `r0` is applied via `set_rates` (profile shape kept, rescaled to the new
/// target); any other id is assigned directly.
fn sweep_point(params: &Infection, id: VariableId, x: f64) -> Result<SweepRecord, AppError> {
    let mut local = params.clone();
    local.set_variable(id, x)?;
    let eval = evaluate(&local)?;
    Ok(SweepRecord::new(&local, &eval))
}
