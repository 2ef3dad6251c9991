use anyhow::{bail, Context, Result};
use arcflash_cli::cli::{EquipmentArgs, OutputFormat};
use arcflash_core::{
    aggregate, evaluate, ArcingCurrentVariant, CompletedScenario, Cubicle, Current, Duration,
    MultistepResult,
};
use serde::Serialize;

use super::util::{print_json, print_table};

#[derive(Serialize)]
struct SegmentOutput {
    bolted_current_ka: f64,
    arcing_current_ka: f64,
    duration_ms: f64,
    energy_j_per_cm2: f64,
}

#[derive(Serialize)]
struct MultistepOutput {
    variant: ArcingCurrentVariant,
    segments: Vec<SegmentOutput>,
    total: MultistepResult,
}

pub fn handle(
    equipment: &EquipmentArgs,
    currents_ka: &[f64],
    segments_ms: &[f64],
    variant: ArcingCurrentVariant,
    format: OutputFormat,
) -> Result<()> {
    let currents = match currents_ka {
        [single] => vec![*single; segments_ms.len()],
        many if many.len() == segments_ms.len() => many.to_vec(),
        many => bail!(
            "got {} fault currents for {} segments; pass one current or one per segment",
            many.len(),
            segments_ms.len()
        ),
    };

    let cubicle = Cubicle::new(equipment.params(None)?).context("validating equipment")?;
    let steps = currents
        .iter()
        .zip(segments_ms)
        .enumerate()
        .map(|(i, (&ka, &ms))| {
            evaluate(
                &cubicle,
                Current::from_kiloamperes(ka),
                variant,
                Duration::from_milliseconds(ms),
            )
            .with_context(|| format!("segment {}", i + 1))
        })
        .collect::<Result<Vec<CompletedScenario>>>()?;
    let total = aggregate(&steps).context("aggregating segments")?;

    match format {
        OutputFormat::Json => print_json(&MultistepOutput {
            variant,
            segments: steps
                .iter()
                .map(|s| SegmentOutput {
                    bolted_current_ka: s.bolted_current().kiloamperes(),
                    arcing_current_ka: s.arcing_current().kiloamperes(),
                    duration_ms: s.duration().milliseconds(),
                    energy_j_per_cm2: s.energy().joules_per_cm2(),
                })
                .collect(),
            total,
        }),
        OutputFormat::Table => {
            let mut rows: Vec<String> = steps
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    format!(
                        "{}\t{:.3}\t{:.3}\t{:.1}\t{:.3}\t",
                        i + 1,
                        s.bolted_current().kiloamperes(),
                        s.arcing_current().kiloamperes(),
                        s.duration().milliseconds(),
                        s.energy().joules_per_cm2(),
                    )
                })
                .collect();
            rows.push(format!(
                "total\t\t\t{:.1}\t{:.3}\t{:.0}",
                total.duration.milliseconds(),
                total.energy.joules_per_cm2(),
                total.boundary.millimetres(),
            ));
            print_table("SEGMENT\tI_BF (kA)\tI_ARC (kA)\tT (ms)\tE (J/cm²)\tAFB (mm)", &rows)
        }
    }
}
