//! Registry of the tunable model inputs.
//!
//! Each entry describes one scalar of the parameter set: its id, bilingual
//! display label, slider range and default. The sweep driver reads ranges
//! from here; reading and writing the actual value goes through
//! `Infection::get` / `Infection::set_variable`, which match on `VariableId`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifier of a sweepable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum VariableId {
    R0,
    TestingRate,
    TestingDelay,
    IsolationEffectivity,
    TracingRate,
    TracingDelay,
    AsymptomaticInf,
}

impl VariableId {
    /// All ids in registry order.
    pub const ALL: [VariableId; 7] = [
        VariableId::R0,
        VariableId::TestingRate,
        VariableId::TestingDelay,
        VariableId::IsolationEffectivity,
        VariableId::TracingRate,
        VariableId::TracingDelay,
        VariableId::AsymptomaticInf,
    ];

    pub fn id(self) -> &'static str {
        match self {
            VariableId::R0 => "r0",
            VariableId::TestingRate => "testing_rate",
            VariableId::TestingDelay => "testing_delay",
            VariableId::IsolationEffectivity => "isolation_effectivity",
            VariableId::TracingRate => "tracing_rate",
            VariableId::TracingDelay => "tracing_delay",
            VariableId::AsymptomaticInf => "asymptomatic_inf",
        }
    }

    /// Whether the value is a whole number of days.
    pub fn is_delay(self) -> bool {
        matches!(self, VariableId::TestingDelay | VariableId::TracingDelay)
    }

    /// Registry entry for this id.
    pub fn variable(self) -> &'static Variable {
        // Discriminants follow registry order.
        &VARIABLES[self as usize]
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Output language for labels and headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Cs,
}

impl Lang {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "cs" => Ok(Lang::Cs),
            other => Err(AppError::input(format!(
                "Unsupported language '{other}' (expected 'en' or 'cs')."
            ))),
        }
    }
}

/// A label in every supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub en: &'static str,
    pub cs: &'static str,
}

impl Label {
    pub const fn new(en: &'static str, cs: &'static str) -> Self {
        Self { en, cs }
    }

    pub fn get(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.en,
            Lang::Cs => self.cs,
        }
    }
}

/// Grouping used when listing variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Properties of the epidemic itself.
    Epidemic,
    /// Testing, tracing and isolation levers.
    Intervention,
    /// Assumptions about asymptomatic carriers.
    Asymptomatic,
}

impl Category {
    pub fn label(self) -> Label {
        match self {
            Category::Epidemic => Label::new("Epidemic", "Epidemie"),
            Category::Intervention => Label::new("Interventions", "Opatření"),
            Category::Asymptomatic => Label::new("Asymptomatic carriers", "Lidé bez příznaků"),
        }
    }
}

/// Registry entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub id: VariableId,
    pub label: Label,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub category: Category,
}

pub static VARIABLES: [Variable; 7] = [
    Variable {
        id: VariableId::R0,
        label: Label::new("Basic reproduction number (R0)", "Základní reprodukční číslo (R0)"),
        min: 1.0,
        max: 5.0,
        step: 0.1,
        default: 2.0,
        category: Category::Epidemic,
    },
    Variable {
        id: VariableId::TestingRate,
        label: Label::new("Symptomatics tested (%)", "Testováno lidí s příznaky (%)"),
        min: 0.0,
        max: 100.0,
        step: 5.0,
        default: 50.0,
        category: Category::Intervention,
    },
    Variable {
        id: VariableId::TestingDelay,
        label: Label::new("Testing delay (days)", "Prodleva testování (dny)"),
        min: 0.0,
        max: 10.0,
        step: 1.0,
        default: 3.0,
        category: Category::Intervention,
    },
    Variable {
        id: VariableId::IsolationEffectivity,
        label: Label::new("Isolation effectivity (%)", "Efektivita izolace"),
        min: 0.0,
        max: 100.0,
        step: 5.0,
        default: 90.0,
        category: Category::Intervention,
    },
    Variable {
        id: VariableId::TracingRate,
        label: Label::new("Contacts successfully traced (%)", "Úspěšně trasováno kontaktů (%)"),
        min: 0.0,
        max: 100.0,
        step: 5.0,
        default: 0.0,
        category: Category::Intervention,
    },
    Variable {
        id: VariableId::TracingDelay,
        label: Label::new("Contact tracing delay (days)", "Prodleva trasování"),
        min: 0.0,
        max: 10.0,
        step: 1.0,
        default: 1.0,
        category: Category::Intervention,
    },
    Variable {
        id: VariableId::AsymptomaticInf,
        label: Label::new(
            "Relative infectiousness of asymptomatics (%)",
            "Relativní infekčnost lidí bez příznaků (%)",
        ),
        min: 0.0,
        max: 100.0,
        step: 5.0,
        default: 20.0,
        category: Category::Asymptomatic,
    },
];

/// Labels for the computed columns and chart axes.
pub mod labels {
    use super::Label;

    pub const R: Label = Label::new("Effective reproduction number (R)", "Efektivní reprodukční číslo (R)");
    pub const GROWTH: Label = Label::new("Daily growth (%)", "Denní nárůst (%)");
    pub const GROWTH_FACTOR: Label = Label::new("Daily growth factor", "Denní koeficient růstu");
    pub const DAY: Label = Label::new("Day", "Den");
    pub const NEW_CASES: Label = Label::new("New cases", "Nové případy");
    pub const INFECTION_PROFILE: Label = Label::new(
        "Daily infection rates (will be scaled to sum up to R0)",
        "Relativní infekčnost po dnech (bude přepočteno na součet R0)",
    );
    pub const SYMPTOM_PROFILE: Label = Label::new(
        "Daily symptom onsets (%, the rest is considered asymptomatic)",
        "Začátek příznaků po dnech (%, zbytek je považován za bez příznaků)",
    );
    pub const TITLE: Label = Label::new("Epidemic control calculator", "Kalkulačka epidemických opatření");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_ids() {
        for (var, id) in VARIABLES.iter().zip(VariableId::ALL) {
            assert_eq!(var.id, id);
            assert_eq!(id.variable().id, id);
        }
    }

    #[test]
    fn ranges_are_well_formed() {
        for var in &VARIABLES {
            assert!(var.min < var.max, "{}", var.id);
            assert!(var.step > 0.0, "{}", var.id);
            assert!(var.default >= var.min && var.default <= var.max, "{}", var.id);
        }
    }

    #[test]
    fn ids_match_serde_and_clap_names() {
        for id in VariableId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.id()));
            assert_eq!(VariableId::from_str(id.id(), false).unwrap(), id);
        }
    }

    #[test]
    fn labels_are_bilingual() {
        let var = VariableId::TestingDelay.variable();
        assert_eq!(var.label.get(Lang::En), "Testing delay (days)");
        assert_eq!(var.label.get(Lang::Cs), "Prodleva testování (dny)");
        assert_eq!(Lang::parse("CS").unwrap(), Lang::Cs);
        assert!(Lang::parse("de").is_err());
    }
}
