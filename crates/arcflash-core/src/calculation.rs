//! Per-scenario orchestration of the equations.
//!
//! A scenario is one bolted fault current evaluated against one cubicle with
//! either the full or the reduced arcing current. It moves through three
//! states, each its own type:
//!
//! ```text
//! Scenario ──calculate_arcing_current──▶ ArcingCurrentScenario
//!          ──calculate_energy_and_boundary(T)──▶ CompletedScenario
//! ```
//!
//! The arcing current is known before the clearing time, which usually comes
//! from a protection study fed with that current. Energy and boundary can only
//! be read from a [`CompletedScenario`]. For callers that keep scenarios in
//! collections, [`Calculation`] wraps the three states in one enum and checks
//! the ordering at runtime instead.
//!
//! # Example
//!
//! ```
//! use arcflash_core::*;
//!
//! let cubicle = Cubicle::new(CubicleParams {
//!     voltage: Voltage::from_kilovolts(4.16),
//!     electrode: ElectrodeConfiguration::Vcb,
//!     gap: Length::from_millimetres(104.0),
//!     working_distance: Length::from_millimetres(914.4),
//!     height: Length::from_millimetres(1143.0),
//!     width: Length::from_millimetres(762.0),
//!     depth: Length::from_millimetres(508.0),
//! })?;
//!
//! let i_bf = Current::from_kiloamperes(15.0);
//! let arcing = Scenario::new(&cubicle, i_bf, ArcingCurrentVariant::Full)?
//!     .calculate_arcing_current()?;
//! let done = arcing.calculate_energy_and_boundary(Duration::from_milliseconds(197.0))?;
//!
//! assert!((done.energy().joules_per_cm2() - 12.152).abs() < 1e-3);
//! # Ok::<(), ArcFlashError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::cubicle::{Cubicle, VoltageLevel};
use crate::equations::{self, EnergyMode, Interpolate};
use crate::error::{ArcFlashError, ArcFlashResult};
use crate::tables::ReferenceVoltage;
use crate::units::{Current, Duration, EnergyDensity, Length};

/// Selects the arcing current used for energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcingCurrentVariant {
    /// The arcing current as given by the model.
    Full,
    /// The arcing current lowered by the variation correction factor.
    Reduced,
}

impl ArcingCurrentVariant {
    pub const ALL: [ArcingCurrentVariant; 2] =
        [ArcingCurrentVariant::Full, ArcingCurrentVariant::Reduced];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArcingCurrentVariant::Full => "full",
            ArcingCurrentVariant::Reduced => "reduced",
        }
    }
}

impl fmt::Display for ArcingCurrentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArcingCurrentVariant {
    type Err = ArcFlashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ArcingCurrentVariant::Full),
            "reduced" => Ok(ArcingCurrentVariant::Reduced),
            other => Err(ArcFlashError::UndefinedConfiguration(format!(
                "unknown arcing current variant '{other}' (expected 'full' or 'reduced')"
            ))),
        }
    }
}

/// One value per reference voltage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceValues<T> {
    pub v600: T,
    pub v2700: T,
    pub v14300: T,
}

impl<T: Copy> ReferenceValues<T> {
    pub fn try_from_fn<F>(mut f: F) -> ArcFlashResult<Self>
    where
        F: FnMut(ReferenceVoltage) -> ArcFlashResult<T>,
    {
        Ok(Self {
            v600: f(ReferenceVoltage::V600)?,
            v2700: f(ReferenceVoltage::V2700)?,
            v14300: f(ReferenceVoltage::V14300)?,
        })
    }

    pub fn get(&self, reference: ReferenceVoltage) -> T {
        match reference {
            ReferenceVoltage::V600 => self.v600,
            ReferenceVoltage::V2700 => self.v2700,
            ReferenceVoltage::V14300 => self.v14300,
        }
    }

    /// Combines two sets value by value, pairing equal reference voltages.
    pub fn zip_with<F: FnMut(T, T) -> T>(self, other: Self, mut f: F) -> Self {
        Self {
            v600: f(self.v600, other.v600),
            v2700: f(self.v2700, other.v2700),
            v14300: f(self.v14300, other.v14300),
        }
    }
}

impl<T: Interpolate> ReferenceValues<T> {
    /// Interpolates to the cubicle's nominal voltage.
    pub fn interpolate(&self, c: &Cubicle) -> ArcFlashResult<T> {
        equations::interpolate(c, self.v600, self.v2700, self.v14300)
    }
}

/// Arcing currents produced by the first calculation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ArcingCurrents {
    HighVoltage {
        /// Per reference voltage, already reduced for the reduced variant.
        reference: ReferenceValues<Current>,
        /// Interpolated to the nominal voltage.
        arcing: Current,
    },
    LowVoltage {
        /// Full arcing current at the 600 V reference, for either variant.
        at_600: Current,
        /// Final arcing current, reduced for the reduced variant.
        arcing: Current,
    },
}

impl ArcingCurrents {
    pub fn arcing(&self) -> Current {
        match self {
            ArcingCurrents::HighVoltage { arcing, .. }
            | ArcingCurrents::LowVoltage { arcing, .. } => *arcing,
        }
    }
}

/// Intermediate energies and boundaries; only high voltage has any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EnergyBreakdown {
    HighVoltage {
        energy: ReferenceValues<EnergyDensity>,
        boundary: ReferenceValues<Length>,
    },
    LowVoltage,
}

/// Valid bolted fault current band for a voltage level, kA.
fn bolted_current_range(level: VoltageLevel) -> (f64, f64) {
    match level {
        VoltageLevel::Low => (0.5, 106.0),
        VoltageLevel::High => (0.2, 65.0),
    }
}

/// A scenario whose inputs have been validated. Nothing is computed yet.
#[derive(Debug, Clone, Copy)]
pub struct Scenario<'c> {
    cubicle: &'c Cubicle,
    bolted: Current,
    variant: ArcingCurrentVariant,
}

impl<'c> Scenario<'c> {
    pub fn new(
        cubicle: &'c Cubicle,
        bolted: Current,
        variant: ArcingCurrentVariant,
    ) -> ArcFlashResult<Self> {
        let (min, max) = bolted_current_range(cubicle.voltage_level());
        ArcFlashError::check_range("bolted fault current (kA)", bolted.kiloamperes(), min, max)?;
        Ok(Self {
            cubicle,
            bolted,
            variant,
        })
    }

    pub fn cubicle(&self) -> &'c Cubicle {
        self.cubicle
    }

    pub fn bolted_current(&self) -> Current {
        self.bolted
    }

    pub fn variant(&self) -> ArcingCurrentVariant {
        self.variant
    }

    pub fn calculate_arcing_current(self) -> ArcFlashResult<ArcingCurrentScenario<'c>> {
        let c = self.cubicle;
        let reduce = |i: Current| match self.variant {
            ArcingCurrentVariant::Full => i,
            ArcingCurrentVariant::Reduced => equations::reduced_arcing_current(c, i),
        };

        let currents = match c.voltage_level() {
            VoltageLevel::High => {
                // Reduction is applied per reference voltage, before interpolating.
                let reference = ReferenceValues::try_from_fn(|r| {
                    equations::reference_arcing_current(c, r, self.bolted).map(reduce)
                })?;
                ArcingCurrents::HighVoltage {
                    arcing: reference.interpolate(c)?,
                    reference,
                }
            }
            VoltageLevel::Low => {
                let at_600 =
                    equations::reference_arcing_current(c, ReferenceVoltage::V600, self.bolted)?;
                let full = equations::final_low_voltage_arcing_current(c, at_600, self.bolted)?;
                ArcingCurrents::LowVoltage {
                    at_600,
                    arcing: reduce(full),
                }
            }
        };

        debug!(
            i_bf_ka = self.bolted.kiloamperes(),
            variant = %self.variant,
            i_arc_ka = currents.arcing().kiloamperes(),
            "arcing current computed"
        );
        Ok(ArcingCurrentScenario {
            scenario: self,
            currents,
        })
    }
}

/// A scenario with its arcing current known.
#[derive(Debug, Clone, Copy)]
pub struct ArcingCurrentScenario<'c> {
    scenario: Scenario<'c>,
    currents: ArcingCurrents,
}

impl<'c> ArcingCurrentScenario<'c> {
    pub fn cubicle(&self) -> &'c Cubicle {
        self.scenario.cubicle
    }

    pub fn bolted_current(&self) -> Current {
        self.scenario.bolted
    }

    pub fn variant(&self) -> ArcingCurrentVariant {
        self.scenario.variant
    }

    pub fn arcing_current(&self) -> Current {
        self.currents.arcing()
    }

    pub fn currents(&self) -> &ArcingCurrents {
        &self.currents
    }

    pub fn calculate_energy_and_boundary(
        self,
        duration: Duration,
    ) -> ArcFlashResult<CompletedScenario<'c>> {
        ArcFlashError::check_range(
            "arc duration (ms)",
            duration.milliseconds(),
            f64::MIN_POSITIVE,
            f64::INFINITY,
        )?;
        let c = self.scenario.cubicle;
        let bolted = self.scenario.bolted;

        let (energy, boundary, breakdown) = match self.currents {
            ArcingCurrents::HighVoltage { reference, .. } => {
                let energy = ReferenceValues::try_from_fn(|r| {
                    equations::intermediate_energy(
                        c,
                        r.voltage(),
                        reference.get(r),
                        bolted,
                        duration,
                        EnergyMode::ReferenceOnly,
                    )
                })?;
                let boundary = ReferenceValues::try_from_fn(|r| {
                    equations::boundary_from_energy(c, r.voltage(), energy.get(r))
                })?;
                (
                    energy.interpolate(c)?,
                    boundary.interpolate(c)?,
                    EnergyBreakdown::HighVoltage { energy, boundary },
                )
            }
            ArcingCurrents::LowVoltage { at_600, arcing } => {
                // The ratio term takes the full 600 V current even for the
                // reduced variant.
                let energy = equations::intermediate_energy(
                    c,
                    c.voltage(),
                    arcing,
                    bolted,
                    duration,
                    EnergyMode::WithAuxiliaryCurrent(at_600),
                )?;
                let boundary = equations::boundary_from_energy(c, c.voltage(), energy)?;
                (energy, boundary, EnergyBreakdown::LowVoltage)
            }
        };

        debug!(
            t_ms = duration.milliseconds(),
            e_j_cm2 = energy.joules_per_cm2(),
            afb_mm = boundary.millimetres(),
            "energy and boundary computed"
        );
        Ok(CompletedScenario {
            scenario: self.scenario,
            currents: self.currents,
            duration,
            energy,
            boundary,
            breakdown,
        })
    }
}

/// A fully evaluated scenario.
#[derive(Debug, Clone, Copy)]
pub struct CompletedScenario<'c> {
    scenario: Scenario<'c>,
    currents: ArcingCurrents,
    duration: Duration,
    energy: EnergyDensity,
    boundary: Length,
    breakdown: EnergyBreakdown,
}

impl<'c> CompletedScenario<'c> {
    pub fn cubicle(&self) -> &'c Cubicle {
        self.scenario.cubicle
    }

    pub fn bolted_current(&self) -> Current {
        self.scenario.bolted
    }

    pub fn variant(&self) -> ArcingCurrentVariant {
        self.scenario.variant
    }

    pub fn arcing_current(&self) -> Current {
        self.currents.arcing()
    }

    pub fn currents(&self) -> &ArcingCurrents {
        &self.currents
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Incident energy at the working distance.
    pub fn energy(&self) -> EnergyDensity {
        self.energy
    }

    /// Arc-flash boundary.
    pub fn boundary(&self) -> Length {
        self.boundary
    }

    pub fn breakdown(&self) -> &EnergyBreakdown {
        &self.breakdown
    }

    /// Intermediate energies at the reference voltages (high voltage only).
    pub fn reference_energies(&self) -> Option<ReferenceValues<EnergyDensity>> {
        match self.breakdown {
            EnergyBreakdown::HighVoltage { energy, .. } => Some(energy),
            EnergyBreakdown::LowVoltage => None,
        }
    }

    /// Intermediate boundaries at the reference voltages (high voltage only).
    pub fn reference_boundaries(&self) -> Option<ReferenceValues<Length>> {
        match self.breakdown {
            EnergyBreakdown::HighVoltage { boundary, .. } => Some(boundary),
            EnergyBreakdown::LowVoltage => None,
        }
    }
}

impl fmt::Display for CompletedScenario<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Let I_bf = {:.3} ({} arcing current)", self.bolted_current(), self.variant())?;
        writeln!(f)?;
        writeln!(f, "I_arc = {:.3}", self.arcing_current())?;
        writeln!(f)?;
        writeln!(f, "Then, with T = {:.1}:", self.duration)?;
        writeln!(f)?;
        writeln!(
            f,
            "E = {:.3} or {:.3} cal/cm²",
            self.energy,
            self.energy.calories_per_cm2()
        )?;
        writeln!(f, "AFB = {:.0}", self.boundary)
    }
}

/// Both calculation steps in one call.
pub fn evaluate<'c>(
    cubicle: &'c Cubicle,
    bolted: Current,
    variant: ArcingCurrentVariant,
    duration: Duration,
) -> ArcFlashResult<CompletedScenario<'c>> {
    Scenario::new(cubicle, bolted, variant)?
        .calculate_arcing_current()?
        .calculate_energy_and_boundary(duration)
}

/// Runtime-checked scenario state.
#[derive(Debug, Clone, Copy)]
pub enum Calculation<'c> {
    Created(Scenario<'c>),
    ArcingCurrentComputed(ArcingCurrentScenario<'c>),
    Complete(CompletedScenario<'c>),
}

impl<'c> Calculation<'c> {
    pub fn new(
        cubicle: &'c Cubicle,
        bolted: Current,
        variant: ArcingCurrentVariant,
    ) -> ArcFlashResult<Self> {
        Scenario::new(cubicle, bolted, variant).map(Calculation::Created)
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Calculation::Created(_) => "created",
            Calculation::ArcingCurrentComputed(_) => "arcing current computed",
            Calculation::Complete(_) => "complete",
        }
    }

    pub fn calculate_arcing_current(&mut self) -> ArcFlashResult<()> {
        match *self {
            Calculation::Created(scenario) => {
                *self = Calculation::ArcingCurrentComputed(scenario.calculate_arcing_current()?);
                Ok(())
            }
            _ => Err(ArcFlashError::Sequencing(format!(
                "arcing current already computed (state: {})",
                self.state_name()
            ))),
        }
    }

    pub fn calculate_energy_and_boundary(&mut self, duration: Duration) -> ArcFlashResult<()> {
        match *self {
            Calculation::ArcingCurrentComputed(arcing) => {
                *self = Calculation::Complete(arcing.calculate_energy_and_boundary(duration)?);
                Ok(())
            }
            Calculation::Created(_) => Err(ArcFlashError::Sequencing(
                "energy and boundary requested before arcing current was computed".into(),
            )),
            Calculation::Complete(_) => Err(ArcFlashError::Sequencing(
                "energy and boundary already computed".into(),
            )),
        }
    }

    pub fn arcing_current(&self) -> ArcFlashResult<Current> {
        match self {
            Calculation::Created(_) => Err(ArcFlashError::Sequencing(
                "arcing current has not been computed".into(),
            )),
            Calculation::ArcingCurrentComputed(s) => Ok(s.arcing_current()),
            Calculation::Complete(s) => Ok(s.arcing_current()),
        }
    }

    pub fn completed(&self) -> ArcFlashResult<&CompletedScenario<'c>> {
        match self {
            Calculation::Complete(s) => Ok(s),
            _ => Err(ArcFlashError::Sequencing(format!(
                "energy and boundary have not been computed (state: {})",
                self.state_name()
            ))),
        }
    }

    pub fn energy(&self) -> ArcFlashResult<EnergyDensity> {
        self.completed().map(|s| s.energy())
    }

    pub fn boundary(&self) -> ArcFlashResult<Length> {
        self.completed().map(|s| s.boundary())
    }
}
