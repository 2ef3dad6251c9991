use anyhow::{Context, Result};
use arcflash_cli::cli::{EquipmentArgs, OutputFormat};
use arcflash_core::{evaluate, ArcingCurrentVariant, CompletedScenario, Cubicle, Current, Duration};
use arcflash_sweep::VariantResult;
use serde::Serialize;
use tracing::info;

use super::util::{print_json, print_table};

#[derive(Serialize)]
struct ScenarioOutput {
    variant: ArcingCurrentVariant,
    duration_ms: f64,
    #[serde(flatten)]
    result: VariantResult,
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    cubicle: &'a Cubicle,
    bolted_current_ka: f64,
    scenarios: Vec<ScenarioOutput>,
}

pub fn handle(
    equipment: &EquipmentArgs,
    current_ka: f64,
    duration_ms: f64,
    duration_reduced_ms: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let params = equipment.params(None)?;
    let cubicle = Cubicle::new(params).context("validating equipment")?;
    let i_bf = Current::from_kiloamperes(current_ka);

    let full = evaluate(
        &cubicle,
        i_bf,
        ArcingCurrentVariant::Full,
        Duration::from_milliseconds(duration_ms),
    )
    .context("full arcing current scenario")?;
    let reduced = evaluate(
        &cubicle,
        i_bf,
        ArcingCurrentVariant::Reduced,
        Duration::from_milliseconds(duration_reduced_ms.unwrap_or(duration_ms)),
    )
    .context("reduced arcing current scenario")?;
    info!(
        e_full = full.energy().joules_per_cm2(),
        e_reduced = reduced.energy().joules_per_cm2(),
        "calculation complete"
    );

    let scenarios = [full, reduced];
    match format {
        OutputFormat::Json => print_json(&CalcOutput {
            cubicle: &cubicle,
            bolted_current_ka: current_ka,
            scenarios: scenarios.iter().map(scenario_output).collect(),
        }),
        OutputFormat::Table => {
            println!("{cubicle}");
            let rows: Vec<String> = scenarios.iter().map(table_row).collect();
            print_table(
                "VARIANT\tI_ARC (kA)\tT (ms)\tE (J/cm²)\tE (cal/cm²)\tAFB (mm)",
                &rows,
            )
        }
    }
}

fn scenario_output(done: &CompletedScenario<'_>) -> ScenarioOutput {
    ScenarioOutput {
        variant: done.variant(),
        duration_ms: done.duration().milliseconds(),
        result: VariantResult::from(done),
    }
}

fn table_row(done: &CompletedScenario<'_>) -> String {
    format!(
        "{}\t{:.3}\t{:.1}\t{:.3}\t{:.3}\t{:.0}",
        done.variant(),
        done.arcing_current().kiloamperes(),
        done.duration().milliseconds(),
        done.energy().joules_per_cm2(),
        done.energy().calories_per_cm2(),
        done.boundary().millimetres(),
    )
}
