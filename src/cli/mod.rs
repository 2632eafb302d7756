//! Command-line parsing for the intervention calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! model code. Profile text is parsed here, before the model is invoked.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Lang, VariableId};
use crate::error::AppError;
use crate::io::{parse_profile, Scenario};
use crate::report::OutputFormat;
use crate::simulate::DEFAULT_STEPS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "npi",
    version,
    about = "Effect of testing, tracing and isolation on R and epidemic growth"
)]
pub struct Cli {
    /// Output language (overrides NPI_LANG).
    #[arg(long, value_enum, global = true)]
    pub lang: Option<Lang>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate effective R and asymptotic daily growth for one scenario.
    Eval(EvalArgs),
    /// Vary one parameter over its range and evaluate each value.
    Sweep(SweepArgs),
    /// Project daily case counts forward in time.
    Simulate(SimulateArgs),
    /// List the tunable parameters with their ranges and defaults.
    Variables,
}

/// Model inputs shared by every command.
///
/// Flags override values read from `--scenario`; anything left unset keeps
/// the built-in default.
#[derive(Debug, Args, Clone, Default)]
pub struct ScenarioArgs {
    /// JSON scenario file.
    #[arg(long, value_name = "JSON")]
    pub scenario: Option<PathBuf>,

    /// Basic reproduction number.
    #[arg(long)]
    pub r0: Option<f64>,

    /// Relative infectiousness per day, comma separated (rescaled to sum to R0).
    #[arg(long, value_name = "LIST")]
    pub infection_profile: Option<String>,

    /// Symptom onsets per day in %, comma separated (the rest is asymptomatic).
    #[arg(long, value_name = "LIST")]
    pub symptom_profile: Option<String>,

    /// Symptomatic cases tested (%).
    #[arg(long)]
    pub testing_rate: Option<f64>,

    /// Days from symptom onset to test result.
    #[arg(long)]
    pub testing_delay: Option<f64>,

    /// Transmission reduction for isolated people (%).
    #[arg(long)]
    pub isolation_effectivity: Option<f64>,

    /// Contacts of tested cases successfully traced (%).
    #[arg(long)]
    pub tracing_rate: Option<f64>,

    /// Days from test result to isolation of traced contacts.
    #[arg(long)]
    pub tracing_delay: Option<f64>,

    /// Infectiousness of asymptomatic carriers relative to symptomatic ones (%).
    #[arg(long)]
    pub asymptomatic_inf: Option<f64>,
}

impl ScenarioArgs {
    /// Flag values as a scenario (profile text parsed here).
    pub fn overrides(&self) -> Result<Scenario, AppError> {
        Ok(Scenario {
            r0: self.r0,
            infection_profile: self.infection_profile.as_deref().map(parse_profile).transpose()?,
            symptom_profile: self.symptom_profile.as_deref().map(parse_profile).transpose()?,
            testing_rate: self.testing_rate,
            testing_delay: self.testing_delay,
            isolation_effectivity: self.isolation_effectivity,
            tracing_rate: self.tracing_rate,
            tracing_delay: self.tracing_delay,
            asymptomatic_inf: self.asymptomatic_inf,
        })
    }
}

#[derive(Debug, Parser, Clone, Default)]
pub struct EvalArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Output format (`csv` prints one row: parameters, R and growth).
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Parameter to vary.
    #[arg(long = "var", value_enum, default_value_t = VariableId::TracingRate)]
    pub variable: VariableId,

    /// Sweep every parameter in turn.
    #[arg(long, conflicts_with_all = ["min", "max", "step"])]
    pub all: bool,

    /// Range start (defaults to the parameter's registry minimum).
    #[arg(long)]
    pub min: Option<f64>,

    /// Range end, inclusive (defaults to the registry maximum).
    #[arg(long)]
    pub max: Option<f64>,

    /// Range increment (defaults to the registry step).
    #[arg(long)]
    pub step: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also draw R and daily growth charts.
    #[arg(long)]
    pub plot: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Initial daily cases, most recent day first, comma separated.
    #[arg(long, value_name = "LIST", default_value = "1")]
    pub initial: String,

    /// Number of days to simulate.
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also draw a chart of new cases.
    #[arg(long)]
    pub plot: bool,
}
