use anyhow::Result;
use arcflash_cli::cli::OutputFormat;
use arcflash_core::{EquipmentClass, TypicalDimensions};
use serde::Serialize;

use super::util::{print_json, print_table};

#[derive(Serialize)]
struct PresetOutput {
    name: &'static str,
    description: &'static str,
    #[serde(flatten)]
    dimensions: TypicalDimensions,
}

pub fn handle(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let presets: Vec<PresetOutput> = EquipmentClass::ALL
                .iter()
                .map(|class| PresetOutput {
                    name: class.name(),
                    description: class.description(),
                    dimensions: class.dimensions(),
                })
                .collect();
            print_json(&presets)
        }
        OutputFormat::Table => {
            let rows: Vec<String> = EquipmentClass::ALL
                .iter()
                .map(|class| {
                    let d = class.dimensions();
                    format!(
                        "{}\t{:.1}\t{:.1}\t{:.1}\t{:.1}\t{:.1}\t{}",
                        class.name(),
                        d.gap.millimetres(),
                        d.height.millimetres(),
                        d.width.millimetres(),
                        d.depth.millimetres(),
                        d.working_distance.millimetres(),
                        class.description(),
                    )
                })
                .collect();
            print_table(
                "PRESET\tGAP (mm)\tHEIGHT (mm)\tWIDTH (mm)\tDEPTH (mm)\tDISTANCE (mm)\tDESCRIPTION",
                &rows,
            )
        }
    }
}
