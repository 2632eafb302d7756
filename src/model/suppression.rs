//! Suppression of per-day infectiousness by testing, tracing and isolation.
//!
//! Two interventions reduce transmission on each day since infection:
//!
//! - **testing**: a symptomatic case is tested `testing_delay` days after
//!   symptom onset and isolated; by day `d` the share of cases caught grows
//!   with the cumulative symptom-onset share.
//! - **tracing**: contacts of a tested case are isolated a further
//!   `tracing_delay` days later; after that a constant fraction of transmission
//!   is removed.
//!
//! Sequences are built by index with a fixed target length (`days`), so the
//! delay boundaries never depend on concatenating possibly-empty pieces.
//!
//! Inputs are not clamped. Percentages outside `[0, 100]`, symptom shares
//! summing above 100 or negative delays run through the arithmetic as-is and
//! can yield multipliers outside `[0, 1]` or negative infectiousness; those
//! cases are logged at `warn` level.

use log::{debug, warn};

use crate::domain::Infection;
use crate::error::AppError;

/// Symptom onset share per day, reweighted against the asymptomatic remainder.
///
/// `share[d] = s[d] / ((100 - Σs) * asymptomatic_inf/100 + Σs)`
pub fn effective_symptom_share(params: &Infection) -> Result<Vec<f64>, AppError> {
    let symptoms = params.symptom_profile();
    if symptoms.is_empty() {
        return Err(AppError::domain("Symptom profile must not be empty."));
    }
    let total: f64 = symptoms.iter().sum();
    let denom = (100.0 - total) * (params.asymptomatic_inf / 100.0) + total;
    if denom == 0.0 || !denom.is_finite() {
        return Err(AppError::domain(format!(
            "Symptom share is undefined (normalizer = {denom}); symptom profile sums to {total} \
             with asymptomatic infectiousness {}%.",
            params.asymptomatic_inf
        )));
    }
    Ok(symptoms.iter().map(|s| s / denom).collect())
}

/// Per-day multiplier from isolating tested symptomatic cases.
///
/// `1` for the first `testing_delay` days, then
/// `1 - testing_rate * isolation_effectivity * cumsum(share)` over the symptom
/// days, then the last value held until `days` entries exist.
pub fn testing_suppression(params: &Infection, share: &[f64]) -> Vec<f64> {
    let days = params.days();
    let Some(last) = share.len().checked_sub(1) else {
        return vec![1.0; days];
    };

    let factor = (params.testing_rate / 100.0) * (params.isolation_effectivity / 100.0);
    let mut cumulative = 0.0;
    let per_symptom_day: Vec<f64> = share
        .iter()
        .map(|s| {
            cumulative += s;
            1.0 - factor * cumulative
        })
        .collect();

    (0..days as i64)
        .map(|day| {
            let k = day - params.testing_delay;
            if k < 0 {
                1.0
            } else {
                per_symptom_day[(k as usize).min(last)]
            }
        })
        .collect()
}

/// Scalar multiplier applied once traced contacts are isolated.
pub fn tracing_factor(params: &Infection, share: &[f64]) -> f64 {
    let total: f64 = share.iter().sum();
    1.0 - total
        * (params.testing_rate / 100.0)
        * (params.tracing_rate / 100.0)
        * (params.isolation_effectivity / 100.0)
}

/// Per-day multiplier from isolating traced contacts.
///
/// `1` for the first `testing_delay + tracing_delay` days, then
/// `tracing_factor` for the rest.
pub fn tracing_suppression(params: &Infection, share: &[f64]) -> Vec<f64> {
    let factor = tracing_factor(params, share);
    let onset = params.testing_delay + params.tracing_delay;
    (0..params.days() as i64)
        .map(|day| if day < onset { 1.0 } else { factor })
        .collect()
}

/// Daily effective infectiousness under the current parameter values.
///
/// Elementwise product of the normalized infection profile with the testing
/// and tracing multipliers. Always `params.days()` long.
pub fn compute_effective_infectiousness(params: &Infection) -> Result<Vec<f64>, AppError> {
    if params.days() == 0 {
        return Err(AppError::domain("Infection profile must not be empty."));
    }
    warn_out_of_range(params);

    let share = effective_symptom_share(params)?;
    let testing = testing_suppression(params, &share);
    let tracing = tracing_suppression(params, &share);

    let effective: Vec<f64> = params
        .infection_profile()
        .iter()
        .zip(&testing)
        .zip(&tracing)
        .map(|((base, t), c)| base * t * c)
        .collect();

    if effective.iter().any(|v| *v < 0.0) {
        warn!("Effective infectiousness has negative entries: {effective:?}");
    }
    debug!("effective infectiousness: {effective:?}");
    Ok(effective)
}

fn warn_out_of_range(params: &Infection) {
    let percentages = [
        ("testing_rate", params.testing_rate),
        ("isolation_effectivity", params.isolation_effectivity),
        ("tracing_rate", params.tracing_rate),
        ("asymptomatic_inf", params.asymptomatic_inf),
    ];
    for (name, value) in percentages {
        if !(0.0..=100.0).contains(&value) {
            warn!("{name}={value} is outside [0, 100]; suppression is not clamped.");
        }
    }
    if params.testing_delay < 0 || params.tracing_delay < 0 {
        warn!(
            "Negative delay (testing_delay={}, tracing_delay={}).",
            params.testing_delay, params.tracing_delay
        );
    }
    if params.testing_delay + params.tracing_delay >= params.days() as i64 {
        warn!(
            "testing_delay + tracing_delay = {} covers the whole {}-day profile; tracing has no effect.",
            params.testing_delay + params.tracing_delay,
            params.days()
        );
    }
    let total: f64 = params.symptom_profile().iter().sum();
    if total > 100.0 {
        warn!("Symptom profile sums to {total}% (> 100%).");
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn example() -> Infection {
        Infection::default()
    }

    #[test]
    fn share_reweights_asymptomatic_remainder() {
        let inf = example();
        let share = effective_symptom_share(&inf).unwrap();
        // Σs = 60, denom = 40 * 0.2 + 60 = 68
        assert_approx_eq!(share[4], 10.0 / 68.0, 1e-12);
        assert_approx_eq!(share.iter().sum::<f64>(), 60.0 / 68.0, 1e-12);
    }

    #[test]
    fn share_is_undefined_without_symptoms_or_asymptomatic_weight() {
        let mut inf = example();
        inf.set_rates(None, None, Some(&[0.0, 0.0])).unwrap();
        inf.asymptomatic_inf = 0.0;
        assert!(effective_symptom_share(&inf).unwrap_err().is_domain());
    }

    #[test]
    fn no_testing_returns_base_profile() {
        let mut inf = example();
        inf.testing_rate = 0.0;
        inf.tracing_rate = 80.0;
        let eff = compute_effective_infectiousness(&inf).unwrap();
        assert_eq!(eff, inf.infection_profile());
    }

    #[test]
    fn no_tracing_leaves_tracing_multiplier_at_one() {
        let mut inf = example();
        inf.tracing_rate = 0.0;
        let share = effective_symptom_share(&inf).unwrap();
        assert!(tracing_suppression(&inf, &share).iter().all(|m| *m == 1.0));
    }

    #[test]
    fn testing_sequence_respects_delay_and_padding() {
        let mut inf = example();
        inf.set_rates(None, Some(&[1.0; 10]), Some(&[50.0, 50.0])).unwrap();
        inf.testing_rate = 100.0;
        inf.isolation_effectivity = 100.0;
        inf.testing_delay = 3;
        let share = effective_symptom_share(&inf).unwrap();
        let t = testing_suppression(&inf, &share);
        assert_eq!(t.len(), 10);
        assert_eq!(&t[..3], &[1.0, 1.0, 1.0]);
        assert_approx_eq!(t[3], 0.5, 1e-12);
        assert_approx_eq!(t[4], 0.0, 1e-12);
        // held to the end
        assert!(t[5..].iter().all(|m| m.abs() < 1e-12));
    }

    #[test]
    fn testing_sequence_truncates_when_delay_is_long() {
        let mut inf = example();
        inf.testing_delay = 6;
        let share = effective_symptom_share(&inf).unwrap();
        let t = testing_suppression(&inf, &share);
        assert_eq!(t.len(), 8);
        assert_eq!(&t[..6], &[1.0; 6]);
        // day 6 and 7 map to the first two symptom days (zero share).
        assert_eq!(&t[6..], &[1.0, 1.0]);

        inf.testing_delay = 20;
        let t = testing_suppression(&inf, &share);
        assert_eq!(t, vec![1.0; 8]);
    }

    #[test]
    fn tracing_starts_after_both_delays() {
        let mut inf = example();
        inf.tracing_rate = 50.0;
        inf.testing_delay = 2;
        inf.tracing_delay = 3;
        let share = effective_symptom_share(&inf).unwrap();
        let c = tracing_suppression(&inf, &share);
        let factor = tracing_factor(&inf, &share);
        assert_eq!(c.len(), 8);
        assert_eq!(&c[..5], &[1.0; 5]);
        assert!(c[5..].iter().all(|m| *m == factor));
        assert!(factor < 1.0);

        inf.tracing_delay = 10;
        assert_eq!(tracing_suppression(&inf, &share), vec![1.0; 8]);
    }

    #[test]
    fn full_testing_is_non_increasing_and_bounded() {
        let mut inf = example();
        inf.testing_rate = 100.0;
        inf.isolation_effectivity = 100.0;
        inf.tracing_rate = 0.0;
        let share = effective_symptom_share(&inf).unwrap();
        let total: f64 = share.iter().sum();
        let t = testing_suppression(&inf, &share);
        for w in t.windows(2) {
            assert!(w[1] <= w[0]);
        }
        for m in &t {
            assert!(*m <= 1.0 && *m >= 1.0 - total - 1e-12);
        }
    }

    #[test]
    fn example_scenario_is_suppressed() {
        let inf = example();
        let eff = compute_effective_infectiousness(&inf).unwrap();
        assert_eq!(eff.len(), inf.days());
        assert!(eff.iter().sum::<f64>() < 3.0);
        assert!(eff.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn days_equal_to_one() {
        let mut inf = example();
        inf.set_rates(Some(1.5), Some(&[4.0]), Some(&[40.0])).unwrap();
        inf.testing_delay = 0;
        let eff = compute_effective_infectiousness(&inf).unwrap();
        assert_eq!(eff.len(), 1);
        // share = 40 / (60*0.2 + 40) = 40/52, multiplier = 1 - 0.5*0.9*share
        let expected = 1.5 * (1.0 - 0.45 * 40.0 / 52.0);
        assert_approx_eq!(eff[0], expected, 1e-12);
    }

    #[test]
    fn symptom_shares_above_hundred_are_not_clamped() {
        // Symptoms summing to 200% with asymptomatic weight 100% give a share
        // of 1.0 per day; full testing drives the multiplier to -1 on day 1.
        let mut inf = example();
        inf.set_rates(None, Some(&[1.0, 1.0, 1.0]), Some(&[100.0, 100.0])).unwrap();
        inf.asymptomatic_inf = 100.0;
        inf.testing_rate = 100.0;
        inf.isolation_effectivity = 100.0;
        inf.testing_delay = 0;
        let eff = compute_effective_infectiousness(&inf).unwrap();
        let base = inf.infection_profile()[2];
        assert_approx_eq!(eff[1], -base, 1e-12);
        assert!(eff.iter().any(|v| *v < 0.0));
    }
}
