//! Effective R and asymptotic daily growth.

use log::debug;

use crate::domain::{Evaluation, Infection};
use crate::error::AppError;
use crate::math::dominant_eigenvalue;
use crate::model::suppression::compute_effective_infectiousness;

/// Compute `(R, growth)` for an effective-infectiousness vector.
///
/// `R` is the vector sum. The growth factor is the dominant eigenvalue
/// magnitude of the companion matrix (see `math::spectral`), reported as a
/// percentage change per day.
pub fn growth_and_r(effective: &[f64]) -> Result<Evaluation, AppError> {
    if effective.is_empty() {
        return Err(AppError::domain("Effective infectiousness vector is empty."));
    }
    let r: f64 = effective.iter().sum();
    let growth_factor = dominant_eigenvalue(effective)?;
    debug!("R = {r:.6}, dominant eigenvalue = {growth_factor:.6}");

    Ok(Evaluation {
        r,
        growth_factor,
        growth_percent: (growth_factor - 1.0) * 100.0,
    })
}

/// Suppress the profile under the current parameters and evaluate it.
pub fn evaluate(params: &Infection) -> Result<Evaluation, AppError> {
    let effective = compute_effective_infectiousness(params)?;
    growth_and_r(&effective)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn example_scenario() {
        let eval = evaluate(&Infection::default()).unwrap();
        assert!(eval.r < 3.0);
        assert!(eval.r > 1.0);
        assert!(eval.growth_factor.is_finite());
        assert!(eval.growth_factor >= 0.0);
        // Supercritical R means positive growth.
        assert!(eval.growth_percent > 0.0);
    }

    #[test]
    fn no_intervention_keeps_r0() {
        let mut inf = Infection::default();
        inf.testing_rate = 0.0;
        let eval = evaluate(&inf).unwrap();
        assert_approx_eq!(eval.r, 3.0, 1e-12);
    }

    #[test]
    fn growth_sign_follows_r() {
        assert!(growth_and_r(&[0.3, 0.3, 0.3]).unwrap().growth_percent < 0.0);
        assert!(growth_and_r(&[0.4, 0.4, 0.4]).unwrap().growth_percent > 0.0);
        assert_approx_eq!(growth_and_r(&[0.5, 0.5]).unwrap().growth_percent, 0.0, 1e-8);
    }

    #[test]
    fn single_day_profile() {
        let eval = growth_and_r(&[1.2]).unwrap();
        assert_approx_eq!(eval.r, 1.2);
        assert_approx_eq!(eval.growth_factor, 1.2, 1e-12);
        assert_approx_eq!(eval.growth_percent, 20.0, 1e-9);
    }

    #[test]
    fn empty_vector_is_rejected() {
        assert!(growth_and_r(&[]).unwrap_err().is_domain());
    }

    #[test]
    fn full_suppression_evaluates_to_zero() {
        let mut inf = Infection::default();
        inf.set_rates(
            None,
            Some(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]),
            Some(&[0.0, 0.0, 0.0, 0.0, 100.0]),
        )
        .unwrap();
        inf.testing_rate = 100.0;
        inf.isolation_effectivity = 100.0;
        inf.testing_delay = 0;

        let eval = evaluate(&inf).unwrap();
        assert_eq!(eval.r, 0.0);
        assert_eq!(eval.growth_factor, 0.0);
        assert_approx_eq!(eval.growth_percent, -100.0);
    }

    #[test]
    fn weight_on_the_last_day_only() {
        // Cyclic kernel: growth factor is the 8th root of R.
        let eval = growth_and_r(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]).unwrap();
        assert_approx_eq!(eval.r, 2.0);
        assert_approx_eq!(eval.growth_factor, 2.0_f64.powf(0.125), 1e-9);
    }

    #[test]
    fn isolation_effectivity_never_increases_r() {
        let mut inf = Infection::default();
        inf.tracing_rate = 40.0;
        let mut last = f64::INFINITY;
        for step in 0..=20 {
            inf.isolation_effectivity = step as f64 * 5.0;
            let r = evaluate(&inf).unwrap().r;
            assert!(r <= last + 1e-12);
            last = r;
        }
    }
}
