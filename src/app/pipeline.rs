//! Shared command pipelines.
//!
//! Each `run_*` function goes from parsed arguments to the text printed on
//! stdout:
//! scenario file + flag overrides -> `Infection` -> model -> report / plot
//!
//! Returning the rendered `String` keeps the commands testable without
//! capturing stdout.

use serde::Serialize;

use crate::cli::{EvalArgs, ScenarioArgs, SimulateArgs, SweepArgs};
use crate::config::Settings;
use crate::domain::{Evaluation, Infection, SweepRecord, VariableId};
use crate::error::AppError;
use crate::io::{parse_profile, read_scenario, Scenario};
use crate::model::evaluate;
use crate::plot::{render_cases_chart, render_sweep_charts};
use crate::report::{self, OutputFormat};
use crate::simulate::simulate;
use crate::sweep::{sweep, sweep_all, sweep_range};

/// Build the parameter set: defaults, then the scenario file, then flags.
pub fn build_infection(args: &ScenarioArgs) -> Result<Infection, AppError> {
    let base = match &args.scenario {
        Some(path) => read_scenario(path)?,
        None => Scenario::default(),
    };
    base.merge(args.overrides()?).to_infection()
}

#[derive(Debug, Serialize)]
struct EvalOutput<'a> {
    parameters: &'a Infection,
    evaluation: Evaluation,
}

#[derive(Debug, Serialize)]
struct SweepGroup<'a> {
    variable: VariableId,
    records: &'a [SweepRecord],
}

/// `npi eval`
pub fn run_eval(args: &EvalArgs, settings: &Settings) -> Result<String, AppError> {
    let params = build_infection(&args.scenario)?;
    let evaluation = evaluate(&params)?;

    match args.format {
        OutputFormat::Table => Ok(report::format_evaluation(&params, &evaluation, settings.lang)),
        OutputFormat::Csv => report::evaluation_csv(&params, &evaluation),
        OutputFormat::Json => report::to_json(&EvalOutput {
            parameters: &params,
            evaluation,
        }),
    }
}

/// `npi sweep`
pub fn run_sweep(args: &SweepArgs, settings: &Settings) -> Result<String, AppError> {
    let params = build_infection(&args.scenario)?;

    if args.all {
        return render_sweep_all(&params, args, settings);
    }

    let id = args.variable;
    let records = if args.min.is_none() && args.max.is_none() && args.step.is_none() {
        sweep(&params, id)?
    } else {
        let var = id.variable();
        sweep_range(
            &params,
            id,
            args.min.unwrap_or(var.min),
            args.max.unwrap_or(var.max),
            args.step.unwrap_or(var.step),
        )?
    };

    let mut out = match args.format {
        OutputFormat::Table => report::format_sweep_table(&records, id, settings.lang),
        OutputFormat::Csv => report::sweep_csv(&records)?,
        OutputFormat::Json => report::to_json(&records)?,
    };
    if args.plot {
        out.push('\n');
        out.push_str(&render_sweep_charts(
            &records,
            id,
            settings.lang,
            settings.plot_width,
            settings.plot_height,
        ));
    }
    Ok(out)
}

fn render_sweep_all(
    params: &Infection,
    args: &SweepArgs,
    settings: &Settings,
) -> Result<String, AppError> {
    let groups = sweep_all(params)?;

    let mut out = match args.format {
        OutputFormat::Csv => return report::sweep_all_csv(&groups),
        OutputFormat::Json => {
            let view: Vec<SweepGroup> = groups
                .iter()
                .map(|(variable, records)| SweepGroup {
                    variable: *variable,
                    records,
                })
                .collect();
            return report::to_json(&view);
        }
        OutputFormat::Table => String::new(),
    };

    for (id, records) in &groups {
        out.push_str(&report::format_sweep_table(records, *id, settings.lang));
        if args.plot {
            out.push('\n');
            out.push_str(&render_sweep_charts(
                records,
                *id,
                settings.lang,
                settings.plot_width,
                settings.plot_height,
            ));
        }
        out.push('\n');
    }
    Ok(out)
}

/// `npi simulate`
pub fn run_simulate(args: &SimulateArgs, settings: &Settings) -> Result<String, AppError> {
    let params = build_infection(&args.scenario)?;
    let initial = parse_profile(&args.initial)?;
    let run = simulate(&params, &initial, args.steps)?;

    let mut out = match args.format {
        OutputFormat::Table => report::format_simulation_table(&run, settings.lang),
        OutputFormat::Csv => report::simulation_csv(&run)?,
        OutputFormat::Json => report::to_json(&run)?,
    };
    if args.plot {
        out.push('\n');
        out.push_str(&render_cases_chart(
            &run,
            settings.lang,
            settings.plot_width,
            settings.plot_height,
        ));
    }
    Ok(out)
}
