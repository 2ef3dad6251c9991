use anyhow::{anyhow, Result};
use arcflash_core::{
    ArcingCurrentVariant, CubicleParams, ElectrodeConfiguration, EquipmentClass, Length, Voltage,
};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "arcflash",
    author,
    version,
    about = "IEEE 1584-2018 arc-flash calculations",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: tracing::Level,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Arcing current, incident energy and arc-flash boundary for one fault
    Calc {
        #[command(flatten)]
        equipment: EquipmentArgs,
        /// Bolted fault current (kA)
        #[arg(long)]
        current: f64,
        /// Arc duration for the full arcing current (ms)
        #[arg(long)]
        duration: f64,
        /// Arc duration for the reduced arcing current (ms); defaults to --duration
        #[arg(long)]
        duration_reduced: Option<f64>,
    },
    /// Incident energy of an event whose fault current changes over time
    Multistep {
        #[command(flatten)]
        equipment: EquipmentArgs,
        /// Bolted fault current per segment (kA); a single value applies to every segment
        #[arg(long, value_delimiter = ',', required = true)]
        current: Vec<f64>,
        /// Segment durations (ms), comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        segments: Vec<f64>,
        /// Arcing current variant (full or reduced)
        #[arg(long, default_value = "full")]
        variant: ArcingCurrentVariant,
    },
    /// Evaluate a voltage × fault current grid in parallel
    ///
    /// The grid supplies every voltage, so `--voltage` is rejected here. A
    /// preset or explicit flags still set the electrode and dimensions.
    Sweep {
        #[command(flatten)]
        equipment: EquipmentArgs,
        /// First voltage of the grid (kV)
        #[arg(long, default_value_t = 4.16)]
        start_kv: f64,
        /// Last voltage of the grid (kV)
        #[arg(long, default_value_t = 15.0)]
        stop_kv: f64,
        /// Voltage step (kV)
        #[arg(long, default_value_t = 0.01)]
        step_kv: f64,
        /// Bolted fault currents (kA), comma-separated
        #[arg(long, value_delimiter = ',', default_value = "15")]
        currents: Vec<f64>,
        /// Arc duration (ms)
        #[arg(long, default_value_t = 197.0)]
        duration: f64,
        /// Worker threads (0 = one per CPU)
        #[arg(long, default_value_t = 0)]
        threads: usize,
    },
    /// List typical equipment classes
    Presets,
}

/// Equipment description, either explicit or from a typical class.
///
/// Explicit dimensions override the preset's.
#[derive(Args, Debug, Clone)]
pub struct EquipmentArgs {
    /// Typical equipment class (see `arcflash presets`)
    #[arg(long)]
    pub preset: Option<EquipmentClass>,
    /// Nominal voltage (kV)
    #[arg(long)]
    pub voltage: Option<f64>,
    /// Electrode configuration: VCB, VCBB, HCB, VOA or HOA
    #[arg(long)]
    pub electrode: Option<ElectrodeConfiguration>,
    /// Busbar gap (mm)
    #[arg(long)]
    pub gap: Option<f64>,
    /// Working distance (mm)
    #[arg(long)]
    pub distance: Option<f64>,
    /// Enclosure height (mm)
    #[arg(long)]
    pub height: Option<f64>,
    /// Enclosure width (mm)
    #[arg(long)]
    pub width: Option<f64>,
    /// Enclosure depth (mm)
    #[arg(long)]
    pub depth: Option<f64>,
}

impl EquipmentArgs {
    /// Resolves each field from the explicit flag, then the preset, then
    /// `fallback`. Fails naming every field left unresolved.
    pub fn params(&self, fallback: Option<&CubicleParams>) -> Result<CubicleParams> {
        let preset = self.preset.map(|class| class.dimensions());
        let mut missing = Vec::new();

        let mut length = |flag: &'static str,
                          explicit: Option<f64>,
                          from_preset: Option<Length>,
                          from_fallback: Option<Length>| {
            explicit
                .map(Length::from_millimetres)
                .or(from_preset)
                .or(from_fallback)
                .unwrap_or_else(|| {
                    missing.push(flag);
                    Length::ZERO
                })
        };
        let gap = length(
            "--gap",
            self.gap,
            preset.map(|d| d.gap),
            fallback.map(|p| p.gap),
        );
        let working_distance = length(
            "--distance",
            self.distance,
            preset.map(|d| d.working_distance),
            fallback.map(|p| p.working_distance),
        );
        let height = length(
            "--height",
            self.height,
            preset.map(|d| d.height),
            fallback.map(|p| p.height),
        );
        let width = length(
            "--width",
            self.width,
            preset.map(|d| d.width),
            fallback.map(|p| p.width),
        );
        let depth = length(
            "--depth",
            self.depth,
            preset.map(|d| d.depth),
            fallback.map(|p| p.depth),
        );

        let voltage = self
            .voltage
            .map(Voltage::from_kilovolts)
            .or(fallback.map(|p| p.voltage));
        if voltage.is_none() {
            missing.push("--voltage");
        }

        match voltage {
            Some(voltage) if missing.is_empty() => Ok(CubicleParams {
                voltage,
                electrode: self
                    .electrode
                    .or(fallback.map(|p| p.electrode))
                    .unwrap_or(ElectrodeConfiguration::Vcb),
                gap,
                working_distance,
                height,
                width,
                depth,
            }),
            _ => Err(anyhow!(
                "missing equipment parameters: {} (or pass --preset)",
                missing.join(", ")
            )),
        }
    }
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
