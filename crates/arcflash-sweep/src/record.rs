use arcflash_core::CompletedScenario;
use serde::{Deserialize, Serialize};

/// Results for one arcing current variant at a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantResult {
    pub arcing_current_ka: f64,
    pub energy_j_per_cm2: f64,
    pub energy_cal_per_cm2: f64,
    pub boundary_mm: f64,
}

impl From<&CompletedScenario<'_>> for VariantResult {
    fn from(done: &CompletedScenario<'_>) -> Self {
        Self {
            arcing_current_ka: done.arcing_current().kiloamperes(),
            energy_j_per_cm2: done.energy().joules_per_cm2(),
            energy_cal_per_cm2: done.energy().calories_per_cm2(),
            boundary_mm: done.boundary().millimetres(),
        }
    }
}

/// Outcome of one grid point. `status` is "ok" or "error".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRecord {
    pub index: usize,
    pub voltage_kv: f64,
    pub bolted_current_ka: f64,
    pub status: String,
    pub error: Option<String>,
    pub full: Option<VariantResult>,
    pub reduced: Option<VariantResult>,
}

impl SweepRecord {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
