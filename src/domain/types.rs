//! Shared domain types.
//!
//! `Infection` is the parameter set every model operation reads. It is cheap
//! to clone (two short vectors plus scalars) and is owned per evaluation:
//! sweeps clone it per swept value rather than sharing one instance.

use serde::{Deserialize, Serialize};

use crate::domain::variables::VariableId;
use crate::error::AppError;

/// Raw relative infectiousness per day since infection (normalized on load).
pub const DEFAULT_INFECTION_RATES: [f64; 8] = [0.0, 1.0, 3.0, 6.0, 8.0, 6.0, 3.0, 1.0];

/// Percentage of infected people developing symptoms on each day.
pub const DEFAULT_SYMPTOM_RATES: [f64; 8] = [0.0, 0.0, 0.0, 0.0, 10.0, 20.0, 20.0, 10.0];

/// Basic reproduction number of `Infection::default()`.
pub const DEFAULT_R0: f64 = 3.0;

/// The parameter set.
///
/// Invariants (upheld by `set_rates`, the only way to replace profiles):
/// - `infection_profile` sums to `r0`
/// - neither profile is empty
/// - `symptom_profile.len() <= infection_profile.len()`
///
/// Scalars are public and may be assigned freely; the model does not clamp
/// them (see `model::suppression`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Infection {
    r0: f64,
    infection_profile: Vec<f64>,
    symptom_profile: Vec<f64>,

    /// Percentage of symptomatic cases that get tested.
    pub testing_rate: f64,
    /// Days from symptom onset to test result.
    pub testing_delay: i64,
    /// Percentage reduction of transmission for isolated people.
    pub isolation_effectivity: f64,
    /// Percentage of contacts of a tested case that get traced.
    pub tracing_rate: f64,
    /// Days from test result to isolation of traced contacts.
    pub tracing_delay: i64,
    /// Infectiousness of asymptomatic carriers relative to symptomatic ones (%).
    pub asymptomatic_inf: f64,
}

impl Default for Infection {
    fn default() -> Self {
        let r0 = DEFAULT_R0;
        let sum: f64 = DEFAULT_INFECTION_RATES.iter().sum();
        Self {
            r0,
            infection_profile: DEFAULT_INFECTION_RATES.iter().map(|v| r0 * v / sum).collect(),
            symptom_profile: DEFAULT_SYMPTOM_RATES.to_vec(),
            testing_rate: VariableId::TestingRate.variable().default,
            testing_delay: VariableId::TestingDelay.variable().default as i64,
            isolation_effectivity: VariableId::IsolationEffectivity.variable().default,
            tracing_rate: VariableId::TracingRate.variable().default,
            tracing_delay: VariableId::TracingDelay.variable().default as i64,
            asymptomatic_inf: VariableId::AsymptomaticInf.variable().default,
        }
    }
}

impl Infection {
    /// Default profiles with every registry variable (including `r0`) at its
    /// registry default.
    pub fn from_registry_defaults() -> Result<Self, AppError> {
        let mut inf = Self::default();
        for id in VariableId::ALL {
            inf.set_variable(id, id.variable().default)?;
        }
        Ok(inf)
    }

    pub fn r0(&self) -> f64 {
        self.r0
    }

    /// Infectiousness per day, normalized to sum to `r0`.
    pub fn infection_profile(&self) -> &[f64] {
        &self.infection_profile
    }

    /// Symptom onset percentages per day (not normalized).
    pub fn symptom_profile(&self) -> &[f64] {
        &self.symptom_profile
    }

    /// Number of days covered by the infection profile.
    pub fn days(&self) -> usize {
        self.infection_profile.len()
    }

    /// Replace `r0` and/or the profiles.
    ///
    /// `None` keeps the current value; an `r0` of exactly `0.0` also keeps the
    /// current value. The raw infection vector is rescaled so its elements sum
    /// to `r0`; the symptom vector is stored as given. Validation happens
    /// before anything is mutated, so a rejected call leaves `self` unchanged.
    pub fn set_rates(
        &mut self,
        r0: Option<f64>,
        infection_rates: Option<&[f64]>,
        symptom_rates: Option<&[f64]>,
    ) -> Result<(), AppError> {
        let r0 = r0.filter(|v| *v != 0.0).unwrap_or(self.r0);
        if !r0.is_finite() {
            return Err(AppError::domain(format!("R0 must be finite, got {r0}.")));
        }

        let raw = infection_rates.unwrap_or(self.infection_profile.as_slice());
        if raw.is_empty() {
            return Err(AppError::domain("Infection profile must not be empty."));
        }
        let sum: f64 = raw.iter().sum();
        if sum == 0.0 || !sum.is_finite() {
            return Err(AppError::domain(format!(
                "Infection profile must have a finite, non-zero sum (got {sum})."
            )));
        }
        let profile: Vec<f64> = raw.iter().map(|v| r0 * v / sum).collect();

        let symptoms = symptom_rates.unwrap_or(self.symptom_profile.as_slice());
        if symptoms.is_empty() {
            return Err(AppError::domain("Symptom profile must not be empty."));
        }
        if symptoms.len() > profile.len() {
            return Err(AppError::domain(format!(
                "Symptom profile covers {} days but the infection profile only {}.",
                symptoms.len(),
                profile.len()
            )));
        }
        let symptoms = symptoms.to_vec();

        self.r0 = r0;
        self.infection_profile = profile;
        self.symptom_profile = symptoms;
        Ok(())
    }

    /// Current value of a registry variable.
    pub fn get(&self, id: VariableId) -> f64 {
        match id {
            VariableId::R0 => self.r0,
            VariableId::TestingRate => self.testing_rate,
            VariableId::TestingDelay => self.testing_delay as f64,
            VariableId::IsolationEffectivity => self.isolation_effectivity,
            VariableId::TracingRate => self.tracing_rate,
            VariableId::TracingDelay => self.tracing_delay as f64,
            VariableId::AsymptomaticInf => self.asymptomatic_inf,
        }
    }

    /// Set a registry variable.
    ///
    /// `r0` goes through `set_rates` so the profile is rescaled with its shape
    /// kept; everything else is a plain assignment. Delays are rounded to the
    /// nearest whole day.
    pub fn set_variable(&mut self, id: VariableId, value: f64) -> Result<(), AppError> {
        match id {
            VariableId::R0 => self.set_rates(Some(value), None, None)?,
            VariableId::TestingRate => self.testing_rate = value,
            VariableId::TestingDelay => self.testing_delay = whole_days(id, value)?,
            VariableId::IsolationEffectivity => self.isolation_effectivity = value,
            VariableId::TracingRate => self.tracing_rate = value,
            VariableId::TracingDelay => self.tracing_delay = whole_days(id, value)?,
            VariableId::AsymptomaticInf => self.asymptomatic_inf = value,
        }
        Ok(())
    }
}

fn whole_days(id: VariableId, value: f64) -> Result<i64, AppError> {
    if !value.is_finite() {
        return Err(AppError::input(format!("{id} must be finite, got {value}.")));
    }
    Ok(value.round() as i64)
}

/// Result of a point evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Effective reproduction number (sum of the effective infectiousness).
    pub r: f64,
    /// Asymptotic per-day multiplicative growth (dominant eigenvalue magnitude).
    pub growth_factor: f64,
    /// `(growth_factor - 1) * 100`.
    pub growth_percent: f64,
}

/// One row of a sweep: every parameter value plus the computed outputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub r0: f64,
    pub testing_rate: f64,
    pub testing_delay: f64,
    pub isolation_effectivity: f64,
    pub tracing_rate: f64,
    pub tracing_delay: f64,
    pub asymptomatic_inf: f64,
    pub r: f64,
    pub growth_percent: f64,
}

impl SweepRecord {
    /// Snapshot the parameter set together with its evaluation.
    pub fn new(params: &Infection, eval: &Evaluation) -> Self {
        Self {
            r0: params.get(VariableId::R0),
            testing_rate: params.get(VariableId::TestingRate),
            testing_delay: params.get(VariableId::TestingDelay),
            isolation_effectivity: params.get(VariableId::IsolationEffectivity),
            tracing_rate: params.get(VariableId::TracingRate),
            tracing_delay: params.get(VariableId::TracingDelay),
            asymptomatic_inf: params.get(VariableId::AsymptomaticInf),
            r: eval.r,
            growth_percent: eval.growth_percent,
        }
    }

    pub fn value(&self, id: VariableId) -> f64 {
        match id {
            VariableId::R0 => self.r0,
            VariableId::TestingRate => self.testing_rate,
            VariableId::TestingDelay => self.testing_delay,
            VariableId::IsolationEffectivity => self.isolation_effectivity,
            VariableId::TracingRate => self.tracing_rate,
            VariableId::TracingDelay => self.tracing_delay,
            VariableId::AsymptomaticInf => self.asymptomatic_inf,
        }
    }
}

/// Output of the forward simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// One window of `days` new-case counts per step, most recent day first.
    /// Row 0 is the initial state.
    pub windows: Vec<Vec<f64>>,
    /// `r0` followed by the effective R of every step.
    pub r_series: Vec<f64>,
}

impl SimulationRun {
    /// New cases of the most recent day, per step.
    pub fn new_cases(&self) -> Vec<f64> {
        self.windows
            .iter()
            .map(|w| w.first().copied().unwrap_or(0.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn default_profile_sums_to_r0() {
        let inf = Infection::default();
        assert_approx_eq!(inf.infection_profile().iter().sum::<f64>(), 3.0, 1e-12);
        assert_eq!(inf.days(), 8);
        assert_eq!(inf.testing_delay, 3);
        assert_eq!(inf.tracing_rate, 0.0);
    }

    #[test]
    fn registry_defaults_use_registry_r0() {
        let inf = Infection::from_registry_defaults().unwrap();
        assert_approx_eq!(inf.r0(), 2.0);
        assert_approx_eq!(inf.infection_profile().iter().sum::<f64>(), 2.0, 1e-12);
    }

    #[test]
    fn set_rates_normalizes_to_r0() {
        let mut inf = Infection::default();
        for &r0 in &[0.5, 1.0, 2.7, 9.0] {
            inf.set_rates(Some(r0), Some(&[1.0, 4.0, 2.0, 0.5]), Some(&[0.0, 50.0]))
                .unwrap();
            assert_approx_eq!(inf.infection_profile().iter().sum::<f64>(), r0, 1e-12);
            assert_eq!(inf.days(), 4);
        }
        // Shape is preserved.
        let p = inf.infection_profile();
        assert_approx_eq!(p[1] / p[0], 4.0, 1e-12);
    }

    #[test]
    fn set_rates_keeps_current_when_omitted() {
        let mut inf = Infection::default();
        inf.set_rates(None, Some(&[1.0, 1.0]), Some(&[50.0])).unwrap();
        assert_approx_eq!(inf.r0(), 3.0);
        inf.set_rates(Some(0.0), None, None).unwrap();
        assert_approx_eq!(inf.r0(), 3.0);
        assert_eq!(inf.infection_profile(), &[1.5, 1.5]);
        assert_eq!(inf.symptom_profile(), &[50.0]);
    }

    #[test]
    fn set_rates_rejects_zero_sum_profile() {
        let mut inf = Infection::default();
        let before = inf.clone();
        let err = inf.set_rates(Some(2.0), Some(&[0.0, 0.0, 0.0]), None).unwrap_err();
        assert!(err.is_domain());
        assert_eq!(inf, before);
    }

    #[test]
    fn set_rates_rejects_empty_profiles() {
        let mut inf = Infection::default();
        assert!(inf.set_rates(None, Some(&[]), None).unwrap_err().is_domain());
        assert!(inf.set_rates(None, None, Some(&[])).unwrap_err().is_domain());
    }

    #[test]
    fn set_rates_rejects_symptoms_longer_than_profile() {
        let mut inf = Infection::default();
        let err = inf
            .set_rates(None, Some(&[1.0, 2.0]), Some(&[10.0, 10.0, 10.0]))
            .unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn set_variable_routes_r0_through_set_rates() {
        let mut inf = Infection::default();
        inf.set_variable(VariableId::R0, 4.0).unwrap();
        assert_approx_eq!(inf.infection_profile().iter().sum::<f64>(), 4.0, 1e-12);

        inf.set_variable(VariableId::TracingDelay, 2.4).unwrap();
        assert_eq!(inf.tracing_delay, 2);
        inf.set_variable(VariableId::TestingRate, 120.0).unwrap();
        assert_eq!(inf.get(VariableId::TestingRate), 120.0);
    }

    #[test]
    fn new_cases_reads_most_recent_day() {
        let run = SimulationRun {
            windows: vec![vec![1.0, 0.0], vec![2.0, 1.0], vec![3.0, 2.0]],
            r_series: vec![2.0, 2.0, 2.0],
        };
        assert_eq!(run.new_cases(), vec![1.0, 2.0, 3.0]);
    }
}
