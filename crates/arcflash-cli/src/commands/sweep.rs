use anyhow::{bail, Result};
use arcflash_cli::cli::{Commands, OutputFormat};
use arcflash_sweep::{run_sweep, SweepConfig, SweepRecord, VoltageRange};
use tracing::info;

use super::util::{print_json, print_table};

pub fn handle(command: &Commands, format: OutputFormat) -> Result<()> {
    let Commands::Sweep {
        equipment,
        start_kv,
        stop_kv,
        step_kv,
        currents,
        duration,
        threads,
    } = command
    else {
        unreachable!();
    };

    if equipment.voltage.is_some() {
        bail!("sweep takes its voltages from --start-kv/--stop-kv/--step-kv, not --voltage");
    }

    let defaults = SweepConfig::default();
    let config = SweepConfig {
        base: equipment.params(Some(&defaults.base))?,
        voltage: VoltageRange {
            start_kv: *start_kv,
            stop_kv: *stop_kv,
            step_kv: *step_kv,
        },
        currents_ka: currents.clone(),
        duration_ms: *duration,
        threads: *threads,
    };
    let summary = run_sweep(&config)?;
    info!(
        success = summary.success,
        failure = summary.failure,
        "sweep complete"
    );

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Table => {
            let rows: Vec<String> = summary.records.iter().map(table_row).collect();
            print_table(
                "V (kV)\tI_BF (kA)\tI_ARC (kA)\tE (J/cm²)\tI_ARC,MIN (kA)\tE,MIN (J/cm²)\tSTATUS",
                &rows,
            )?;
            println!();
            println!("{} ok, {} failed", summary.success, summary.failure);
            Ok(())
        }
    }
}

fn table_row(record: &SweepRecord) -> String {
    match (&record.full, &record.reduced) {
        (Some(full), Some(reduced)) => format!(
            "{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{}",
            record.voltage_kv,
            record.bolted_current_ka,
            full.arcing_current_ka,
            full.energy_j_per_cm2,
            reduced.arcing_current_ka,
            reduced.energy_j_per_cm2,
            record.status,
        ),
        _ => format!(
            "{:.3}\t{:.3}\t\t\t\t\t{}: {}",
            record.voltage_kv,
            record.bolted_current_ka,
            record.status,
            record.error.as_deref().unwrap_or("unknown"),
        ),
    }
}
