//! Scenario files (JSON).
//!
//! A scenario lists any subset of the model inputs; missing fields keep the
//! `Infection::default()` value. Example:
//!
//! ```json
//! {
//!   "r0": 2.5,
//!   "infection_profile": [0, 1, 3, 6, 8, 6, 3, 1],
//!   "testing_rate": 70,
//!   "tracing_rate": 40
//! }
//! ```

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Infection, VariableId};
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infection_profile: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_profile: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isolation_effectivity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asymptomatic_inf: Option<f64>,
}

impl Scenario {
    /// Scalar value for a non-`r0` registry id.
    fn scalar(&self, id: VariableId) -> Option<f64> {
        match id {
            VariableId::R0 => None,
            VariableId::TestingRate => self.testing_rate,
            VariableId::TestingDelay => self.testing_delay,
            VariableId::IsolationEffectivity => self.isolation_effectivity,
            VariableId::TracingRate => self.tracing_rate,
            VariableId::TracingDelay => self.tracing_delay,
            VariableId::AsymptomaticInf => self.asymptomatic_inf,
        }
    }

    /// Field-wise merge; values in `overrides` win.
    pub fn merge(self, overrides: Scenario) -> Scenario {
        Scenario {
            r0: overrides.r0.or(self.r0),
            infection_profile: overrides.infection_profile.or(self.infection_profile),
            symptom_profile: overrides.symptom_profile.or(self.symptom_profile),
            testing_rate: overrides.testing_rate.or(self.testing_rate),
            testing_delay: overrides.testing_delay.or(self.testing_delay),
            isolation_effectivity: overrides.isolation_effectivity.or(self.isolation_effectivity),
            tracing_rate: overrides.tracing_rate.or(self.tracing_rate),
            tracing_delay: overrides.tracing_delay.or(self.tracing_delay),
            asymptomatic_inf: overrides.asymptomatic_inf.or(self.asymptomatic_inf),
        }
    }

    /// Apply to an existing parameter set.
    ///
    /// `r0` and the profiles are replaced together through `set_rates`;
    /// scalars are assigned afterwards.
    pub fn apply(&self, inf: &mut Infection) -> Result<(), AppError> {
        if self.r0.is_some() || self.infection_profile.is_some() || self.symptom_profile.is_some() {
            inf.set_rates(
                self.r0,
                self.infection_profile.as_deref(),
                self.symptom_profile.as_deref(),
            )?;
        }
        for id in VariableId::ALL {
            if let Some(value) = self.scalar(id) {
                inf.set_variable(id, value)?;
            }
        }
        Ok(())
    }

    /// Build a parameter set from defaults plus this scenario.
    pub fn to_infection(&self) -> Result<Infection, AppError> {
        let mut inf = Infection::default();
        self.apply(&mut inf)?;
        Ok(inf)
    }
}

/// Parse a scenario from JSON text.
pub fn parse_scenario(text: &str) -> Result<Scenario, AppError> {
    serde_json::from_str(text).map_err(|e| AppError::input(format!("Invalid scenario JSON: {e}")))
}

/// Read a scenario JSON file.
pub fn read_scenario(path: &Path) -> Result<Scenario, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open scenario '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| {
        AppError::input(format!("Invalid scenario JSON in '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn empty_scenario_is_default() {
        let inf = parse_scenario("{}").unwrap().to_infection().unwrap();
        assert_eq!(inf, Infection::default());
    }

    #[test]
    fn applies_profiles_and_scalars() {
        let scenario = parse_scenario(
            r#"{"r0": 2.0, "infection_profile": [1, 1, 2], "symptom_profile": [0, 50],
                "testing_rate": 80, "tracing_delay": 2}"#,
        )
        .unwrap();
        let inf = scenario.to_infection().unwrap();
        assert_approx_eq!(inf.r0(), 2.0);
        assert_eq!(inf.infection_profile(), &[0.5, 0.5, 1.0]);
        assert_eq!(inf.symptom_profile(), &[0.0, 50.0]);
        assert_approx_eq!(inf.testing_rate, 80.0);
        assert_eq!(inf.tracing_delay, 2);
        assert_approx_eq!(inf.isolation_effectivity, 90.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse_scenario(r#"{"r_zero": 2.0}"#).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn degenerate_profile_is_a_domain_error() {
        let scenario = parse_scenario(r#"{"infection_profile": [0, 0, 0]}"#).unwrap();
        assert!(scenario.to_infection().unwrap_err().is_domain());
    }

    #[test]
    fn overrides_win_in_merge() {
        let base = Scenario {
            r0: Some(2.0),
            testing_rate: Some(10.0),
            ..Scenario::default()
        };
        let merged = base.merge(Scenario {
            testing_rate: Some(60.0),
            ..Scenario::default()
        });
        assert_eq!(merged.r0, Some(2.0));
        assert_eq!(merged.testing_rate, Some(60.0));
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_scenario(Path::new("/nonexistent/scenario.json")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
