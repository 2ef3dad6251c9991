//! Multi-step arcing events.
//!
//! When the fault current changes during an event (an upstream breaker
//! opens, a motor contribution decays) each interval is evaluated as its own
//! scenario with its own duration. Energies add. The boundary is recomputed
//! from the summed energy, since boundaries themselves do not add.
//!
//! For high voltage the sums are taken per reference voltage and the
//! interpolation is redone on the sums. For low voltage the final energies
//! are summed directly.

use serde::Serialize;
use tracing::debug;

use crate::calculation::{CompletedScenario, EnergyBreakdown, ReferenceValues};
use crate::cubicle::{Cubicle, VoltageLevel};
use crate::equations;
use crate::error::{ArcFlashError, ArcFlashResult};
use crate::units::{Duration, EnergyDensity, Length};

/// Combined result of a multi-step event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MultistepResult {
    pub energy: EnergyDensity,
    pub boundary: Length,
    /// Sum of the step durations.
    pub duration: Duration,
    pub steps: usize,
}

/// Aggregates completed steps evaluated against the same cubicle.
pub fn aggregate(steps: &[CompletedScenario<'_>]) -> ArcFlashResult<MultistepResult> {
    let Some(first) = steps.first() else {
        return Err(ArcFlashError::Domain("multi-step aggregation needs at least one step".into()));
    };
    let c = first.cubicle();
    if steps
        .iter()
        .any(|s| !std::ptr::eq(s.cubicle(), c) && s.cubicle() != c)
    {
        return Err(ArcFlashError::GeometryMismatch);
    }

    let duration: Duration = steps.iter().map(|s| s.duration()).sum();
    let energy: EnergyDensity = steps.iter().map(|s| s.energy()).sum();
    let boundary = match c.voltage_level() {
        VoltageLevel::High => high_voltage_boundary(c, steps)?,
        VoltageLevel::Low => equations::boundary_from_energy(c, c.voltage(), energy)?,
    };

    debug!(
        steps = steps.len(),
        e_j_cm2 = energy.joules_per_cm2(),
        afb_mm = boundary.millimetres(),
        "multi-step aggregate"
    );
    Ok(MultistepResult {
        energy,
        boundary,
        duration,
        steps: steps.len(),
    })
}

/// Recovers a boundary per reference voltage from the summed reference
/// energies, then interpolates.
fn high_voltage_boundary(c: &Cubicle, steps: &[CompletedScenario<'_>]) -> ArcFlashResult<Length> {
    let mut total = ReferenceValues {
        v600: EnergyDensity::ZERO,
        v2700: EnergyDensity::ZERO,
        v14300: EnergyDensity::ZERO,
    };
    for step in steps {
        let EnergyBreakdown::HighVoltage { energy, .. } = *step.breakdown() else {
            return Err(ArcFlashError::Domain(
                "high-voltage step is missing its reference-voltage energies".into(),
            ));
        };
        total = total.zip_with(energy, |a, b| a + b);
    }

    let boundary = ReferenceValues::try_from_fn(|r| {
        equations::boundary_from_energy(c, r.voltage(), total.get(r))
    })?;
    boundary.interpolate(c)
}
