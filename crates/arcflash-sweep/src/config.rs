use anyhow::{bail, Result};
use arcflash_core::{CubicleParams, ElectrodeConfiguration, Length, Voltage};
use serde::{Deserialize, Serialize};

/// Upper limit on the number of grid points a sweep may expand to.
pub const MAX_SWEEP_POINTS: usize = 1_000_000;

/// Sweep settings. Every field has a default, so a partial JSON document is
/// enough to describe a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Equipment held fixed across the sweep. Its voltage is replaced by each
    /// grid voltage. Quantities are in the stored units (V, mm).
    #[serde(default = "default_base")]
    pub base: CubicleParams,
    #[serde(default)]
    pub voltage: VoltageRange,
    #[serde(default = "default_currents")]
    pub currents_ka: Vec<f64>,
    #[serde(default = "default_duration")]
    pub duration_ms: f64,
    /// Worker threads; 0 means one per CPU.
    #[serde(default)]
    pub threads: usize,
}

/// Inclusive voltage range in kV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageRange {
    pub start_kv: f64,
    pub stop_kv: f64,
    pub step_kv: f64,
}

impl Default for VoltageRange {
    fn default() -> Self {
        Self {
            start_kv: 4.16,
            stop_kv: 15.0,
            step_kv: 0.01,
        }
    }
}

fn default_base() -> CubicleParams {
    CubicleParams {
        voltage: Voltage::from_kilovolts(4.16),
        electrode: ElectrodeConfiguration::Vcbb,
        gap: Length::from_millimetres(104.0),
        working_distance: Length::from_millimetres(914.4),
        height: Length::from_millimetres(1143.0),
        width: Length::from_millimetres(762.0),
        depth: Length::from_millimetres(508.0),
    }
}

fn default_currents() -> Vec<f64> {
    vec![15.0]
}

fn default_duration() -> f64 {
    197.0
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            voltage: VoltageRange::default(),
            currents_ka: default_currents(),
            duration_ms: default_duration(),
            threads: 0,
        }
    }
}

/// One grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub index: usize,
    pub voltage: Voltage,
    pub bolted_current_ka: f64,
}

impl VoltageRange {
    /// Grid voltages in kV, computed as `start + i * step` so that rounding
    /// does not accumulate.
    pub fn values(&self) -> Result<Vec<f64>> {
        if !(self.step_kv.is_finite() && self.step_kv > 0.0) {
            bail!("voltage step must be positive, got {} kV", self.step_kv);
        }
        if !(self.start_kv.is_finite() && self.stop_kv.is_finite())
            || self.stop_kv < self.start_kv
        {
            bail!(
                "voltage range {} kV .. {} kV is empty or not finite",
                self.start_kv,
                self.stop_kv
            );
        }
        // Small slack so that e.g. 4.16..15.0 by 0.01 includes 15.0.
        let span = (self.stop_kv - self.start_kv) / self.step_kv + 1e-9;
        if span.is_nan() || span >= MAX_SWEEP_POINTS as f64 {
            bail!(
                "sweep grid of {span:.0} voltages exceeds the limit of {MAX_SWEEP_POINTS} points"
            );
        }
        let steps = span.floor() as usize;
        Ok((0..=steps)
            .map(|i| self.start_kv + i as f64 * self.step_kv)
            .collect())
    }
}

/// Expands the grid: voltage-outer, current-inner.
pub fn sweep_points(config: &SweepConfig) -> Result<Vec<SweepPoint>> {
    if config.currents_ka.is_empty() {
        bail!("sweep needs at least one bolted fault current");
    }
    let voltages = config.voltage.values()?;
    match voltages.len().checked_mul(config.currents_ka.len()) {
        Some(n) if n <= MAX_SWEEP_POINTS => {}
        _ => bail!(
            "sweep grid of {} voltages by {} currents exceeds {MAX_SWEEP_POINTS} points",
            voltages.len(),
            config.currents_ka.len()
        ),
    }
    let points = voltages
        .iter()
        .flat_map(|&kv| config.currents_ka.iter().map(move |&ka| (kv, ka)))
        .enumerate()
        .map(|(index, (kv, ka))| SweepPoint {
            index,
            voltage: Voltage::from_kilovolts(kv),
            bolted_current_ka: ka,
        })
        .collect();
    Ok(points)
}
