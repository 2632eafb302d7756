//! Formatted output: terminal tables plus CSV / JSON renderings.
//!
//! We keep formatting code in one place so:
//! - the model code stays free of presentation concerns
//! - output changes are localized (important for snapshot tests)
//!
//! Everything returns a `String`; the caller decides where it goes.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{
    labels, Category, Evaluation, Infection, Lang, SimulationRun, SweepRecord, VariableId, VARIABLES,
};
use crate::error::AppError;
use crate::io::format_profile;

/// How sweep / simulation results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Point evaluation summary.
pub fn format_evaluation(params: &Infection, eval: &Evaluation, lang: Lang) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", labels::TITLE.get(lang)));
    out.push_str(&format_parameters(params, lang));
    out.push('\n');
    out.push_str(&format!("{:<48} {:>10.4}\n", labels::R.get(lang), eval.r));
    out.push_str(&format!(
        "{:<48} {:>10.4}\n",
        labels::GROWTH_FACTOR.get(lang),
        eval.growth_factor
    ));
    out.push_str(&format!(
        "{:<48} {:>+10.2}\n",
        labels::GROWTH.get(lang),
        eval.growth_percent
    ));

    out
}

/// Parameter listing (scalars then profiles).
pub fn format_parameters(params: &Infection, lang: Lang) -> String {
    let mut out = String::new();
    for var in &VARIABLES {
        out.push_str(&format!(
            "{:<48} {:>10}\n",
            var.label.get(lang),
            fmt_value(var.id, params.get(var.id))
        ));
    }
    out.push_str(&format!(
        "{}:\n  [{}]\n",
        labels::INFECTION_PROFILE.get(lang),
        params
            .infection_profile()
            .iter()
            .map(|v| format!("{v:.4}"))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out.push_str(&format!(
        "{}:\n  [{}]\n",
        labels::SYMPTOM_PROFILE.get(lang),
        format_profile(params.symptom_profile())
    ));
    out
}

/// Sweep table: swept value, R, growth.
pub fn format_sweep_table(records: &[SweepRecord], id: VariableId, lang: Lang) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", id.variable().label.get(lang)));
    out.push_str(&format!("{:>12} {:>10} {:>12}\n", id.id(), "R", "growth_%"));
    out.push_str(&format!("{:-<12} {:-<10} {:-<12}\n", "", "", ""));
    for rec in records {
        out.push_str(&format!(
            "{:>12} {:>10.4} {:>+12.2}\n",
            fmt_value(id, rec.value(id)),
            rec.r,
            rec.growth_percent
        ));
    }
    out
}

/// Sweep records as CSV (header + one row per record).
pub fn sweep_csv(records: &[SweepRecord]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for rec in records {
        writer
            .serialize(rec)
            .map_err(|e| AppError::numeric(format!("Failed to write CSV row: {e}")))?;
    }
    finish_csv(writer)
}

/// Point evaluation as a one-row CSV: every parameter plus `r` and
/// `growth_percent` (the sweep record layout).
pub fn evaluation_csv(params: &Infection, eval: &Evaluation) -> Result<String, AppError> {
    sweep_csv(&[SweepRecord::new(params, eval)])
}

// csv cannot serialize flattened structs, so the row spells out every column.
#[derive(Serialize)]
struct SweepAllRow<'a> {
    variable: &'a str,
    r0: f64,
    testing_rate: f64,
    testing_delay: f64,
    isolation_effectivity: f64,
    tracing_rate: f64,
    tracing_delay: f64,
    asymptomatic_inf: f64,
    r: f64,
    growth_percent: f64,
}

/// Every sweep in one CSV, prefixed with the swept variable id.
pub fn sweep_all_csv(groups: &[(VariableId, Vec<SweepRecord>)]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (id, records) in groups {
        for record in records {
            let row = SweepAllRow {
                variable: id.id(),
                r0: record.r0,
                testing_rate: record.testing_rate,
                testing_delay: record.testing_delay,
                isolation_effectivity: record.isolation_effectivity,
                tracing_rate: record.tracing_rate,
                tracing_delay: record.tracing_delay,
                asymptomatic_inf: record.asymptomatic_inf,
                r: record.r,
                growth_percent: record.growth_percent,
            };
            writer
                .serialize(row)
                .map_err(|e| AppError::numeric(format!("Failed to write CSV row: {e}")))?;
        }
    }
    finish_csv(writer)
}

/// Simulation summary: step, R and new cases.
pub fn format_simulation_table(run: &SimulationRun, lang: Lang) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>6} {:>10} {:>16}\n",
        labels::DAY.get(lang),
        "R",
        labels::NEW_CASES.get(lang)
    ));
    out.push_str(&format!("{:-<6} {:-<10} {:-<16}\n", "", "", ""));
    for (step, (r, cases)) in run.r_series.iter().zip(run.new_cases()).enumerate() {
        out.push_str(&format!("{step:>6} {r:>10.4} {cases:>16.4}\n"));
    }
    out
}

/// Simulation as CSV: `step, r, day_0 … day_{n-1}` (day_0 is the most recent).
pub fn simulation_csv(run: &SimulationRun) -> Result<String, AppError> {
    let days = run.windows.first().map(Vec::len).unwrap_or(0);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["step".to_string(), "r".to_string()];
    header.extend((0..days).map(|d| format!("day_{d}")));
    writer
        .write_record(&header)
        .map_err(|e| AppError::numeric(format!("Failed to write CSV header: {e}")))?;

    for (step, (window, r)) in run.windows.iter().zip(&run.r_series).enumerate() {
        let mut row = vec![step.to_string(), r.to_string()];
        row.extend(window.iter().map(|c| c.to_string()));
        writer
            .write_record(&row)
            .map_err(|e| AppError::numeric(format!("Failed to write CSV row: {e}")))?;
    }
    finish_csv(writer)
}

/// Pretty JSON for any serializable output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::numeric(format!("Failed to serialize JSON: {e}")))
}

/// Registry listing, grouped by category.
pub fn format_variables(lang: Lang) -> String {
    let mut out = String::new();
    for category in [Category::Epidemic, Category::Intervention, Category::Asymptomatic] {
        out.push_str(&format!("{}:\n", category.label().get(lang)));
        for var in VARIABLES.iter().filter(|v| v.category == category) {
            out.push_str(&format!(
                "  {:<22} {:<46} [{} .. {}] step {} default {}\n",
                var.id.id(),
                var.label.get(lang),
                var.min,
                var.max,
                var.step,
                var.default
            ));
        }
    }
    out
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String, AppError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::numeric(format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::numeric(format!("CSV is not UTF-8: {e}")))
}

fn fmt_value(id: VariableId, value: f64) -> String {
    if id.is_delay() {
        format!("{value:.0}")
    } else if id == VariableId::R0 {
        format!("{value:.2}")
    } else {
        format!("{value:.1}")
    }
}
