//! The numbered equations of IEEE 1584-2018.
//!
//! Every function here is pure: it reads the cubicle, the coefficient tables
//! and its arguments, and returns a quantity or the first violated
//! precondition. Magnitudes are read in the standard's units (kV, kA, mm, ms,
//! J/cm²) at the top of each function and wrapped back on return.

use tracing::trace;

use crate::cubicle::Cubicle;
use crate::error::{ArcFlashError, ArcFlashResult};
use crate::tables::{self, EnergyTable, ReferenceVoltage};
use crate::units::{Current, Duration, EnergyDensity, Length, Voltage};

/// Incident energy defining the arc-flash boundary: 1.2 cal/cm².
pub const ARC_FLASH_THRESHOLD: EnergyDensity = EnergyDensity::from_joules_per_cm2(5.0208);

/// The `12.552 / 50` time factor of equations 3-6.
const ENERGY_TIME_FACTOR: f64 = 12.552 / 50.0;

/// How the arcing-current ratio term of the energy equation is formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnergyMode {
    /// Equations 3-5: the ratio uses the arcing current at the reference voltage.
    ReferenceOnly,
    /// Equation 6: the ratio uses the 600 V arcing current supplied here.
    WithAuxiliaryCurrent(Current),
}

/// Equation 1: intermediate arcing current at a reference voltage.
pub fn reference_arcing_current(
    c: &Cubicle,
    reference: ReferenceVoltage,
    bolted: Current,
) -> ArcFlashResult<Current> {
    let k = tables::arcing_current_coefficients(c.electrode(), reference)?;
    let i_bf = bolted.kiloamperes();
    let g = c.gap().millimetres();

    let x1 = k.k1 + k.k2 * i_bf.log10() + k.k3 * g.log10();
    let x2 = k.k4 * i_bf.powi(6)
        + k.k5 * i_bf.powi(5)
        + k.k6 * i_bf.powi(4)
        + k.k7 * i_bf.powi(3)
        + k.k8 * i_bf.powi(2)
        + k.k9 * i_bf
        + k.k10;
    let i_arc =
        ArcFlashError::check_non_negative("intermediate arcing current", 10f64.powf(x1) * x2)?;

    trace!(?reference, i_bf, i_arc, "reference arcing current");
    Ok(Current::from_kiloamperes(i_arc))
}

/// Equation 2: arcing current reduced by the variation correction factor.
pub fn reduced_arcing_current(c: &Cubicle, full: Current) -> Current {
    full * (1.0 - 0.5 * c.variation_factor())
}

/// Equations 3-6: intermediate incident energy.
///
/// `voltage` selects the coefficient table: anything up to 0.6 kV uses
/// table 3, exactly 2.7 or 14.3 kV use tables 4 and 5.
pub fn intermediate_energy(
    c: &Cubicle,
    voltage: Voltage,
    arcing: Current,
    bolted: Current,
    duration: Duration,
    mode: EnergyMode,
) -> ArcFlashResult<EnergyDensity> {
    let k = tables::energy_coefficients(EnergyTable::for_voltage(voltage)?, c.electrode())?;
    let i_arc = arcing.kiloamperes();
    let i_bf = bolted.kiloamperes();
    let t = duration.milliseconds();
    let g = c.gap().millimetres();
    let d = c.working_distance().millimetres();

    let ratio_current = match mode {
        EnergyMode::ReferenceOnly => i_arc,
        EnergyMode::WithAuxiliaryCurrent(i_arc_600) => i_arc_600.kiloamperes(),
    };

    let x1 = ENERGY_TIME_FACTOR * t;
    let x2 = k.k1 + k.k2 * g.log10();
    let x3_den = k.k4 * i_bf.powi(7)
        + k.k5 * i_bf.powi(6)
        + k.k6 * i_bf.powi(5)
        + k.k7 * i_bf.powi(4)
        + k.k8 * i_bf.powi(3)
        + k.k9 * i_bf.powi(2)
        + k.k10 * i_bf;
    let x3 = k.k3 * ratio_current / x3_den;
    let x4 = k.k11 * i_bf.log10() + k.k13 * i_arc.log10() + (1.0 / c.correction_factor()).log10();
    let x5 = k.k12 * d.log10();

    let e = ArcFlashError::check_non_negative(
        "intermediate incident energy",
        x1 * 10f64.powf(x2 + x3 + x4 + x5),
    )?;

    trace!(voltage_kv = voltage.kilovolts(), i_arc, i_bf, t, e, "intermediate energy");
    Ok(EnergyDensity::from_joules_per_cm2(e))
}

/// Equations 7-10, recovered from an energy instead of recomputed.
///
/// Energy falls off with distance as `E = F · D^k12`. Knowing `E` at the
/// working distance gives `F`, and the boundary is the distance at which the
/// energy drops to [`ARC_FLASH_THRESHOLD`]. No time, current or enclosure
/// term is needed, so this also works on energies summed over several
/// time steps.
pub fn boundary_from_energy(
    c: &Cubicle,
    voltage: Voltage,
    energy: EnergyDensity,
) -> ArcFlashResult<Length> {
    let k = tables::energy_coefficients(EnergyTable::for_voltage(voltage)?, c.electrode())?;
    let e = energy.joules_per_cm2();
    if !(e.is_finite() && e > 0.0) {
        return Err(ArcFlashError::Domain(format!(
            "cannot recover a boundary from an incident energy of {e} J/cm²"
        )));
    }
    let d = c.working_distance().millimetres();

    let f = e / d.powf(k.k12);
    let afb = ArcFlashError::check_non_negative(
        "arc-flash boundary",
        (ARC_FLASH_THRESHOLD.joules_per_cm2() / f).powf(1.0 / k.k12),
    )?;

    trace!(voltage_kv = voltage.kilovolts(), e, afb, "boundary from energy");
    Ok(Length::from_millimetres(afb))
}

/// Equations 16-24: interpolation between the reference voltages.
///
/// Only meaningful for high-voltage equipment; below 0.6 kV the low-voltage
/// equations apply instead.
pub fn interpolate<T>(c: &Cubicle, at_600: T, at_2700: T, at_14300: T) -> ArcFlashResult<T>
where
    T: Interpolate,
{
    let v = c.voltage().kilovolts();
    let (x_600, x_2700, x_14300) = (at_600.magnitude(), at_2700.magnitude(), at_14300.magnitude());

    // Eq 16, 19, 22
    let x1 = (x_2700 - x_600) / 2.1 * (v - 2.7) + x_2700;
    // Eq 17, 20, 23
    let x2 = (x_14300 - x_2700) / 11.6 * (v - 14.3) + x_14300;
    // Eq 18, 21, 24
    let x3 = x1 * (2.7 - v) / 2.1 + x2 * (v - 0.6) / 2.1;

    if v <= 0.6 {
        Err(ArcFlashError::Domain(format!(
            "voltage interpolation requested for {v} kV; only defined above 0.6 kV"
        )))
    } else if v <= 2.7 {
        Ok(T::from_magnitude(x3))
    } else {
        Ok(T::from_magnitude(x2))
    }
}

/// Equation 25: final low-voltage arcing current.
pub fn final_low_voltage_arcing_current(
    c: &Cubicle,
    at_600: Current,
    bolted: Current,
) -> ArcFlashResult<Current> {
    let v = c.voltage().kilovolts();
    let i_600 = at_600.kiloamperes();
    let i_bf = bolted.kiloamperes();

    let x1 = (0.6 / v).powi(2);
    let x2 = 1.0 / i_600.powi(2);
    let x3 = (0.6f64.powi(2) - v.powi(2)) / (0.6f64.powi(2) * i_bf.powi(2));
    let radicand = x1 * (x2 - x3);
    if !(radicand > 0.0) {
        return Err(ArcFlashError::Domain(format!(
            "final LV arcing current radicand is {radicand}; \
             inputs V_oc={v} kV, I_arc_600={i_600} kA, I_bf={i_bf} kA"
        )));
    }
    let i_arc = 1.0 / radicand.sqrt();

    trace!(i_600, i_bf, i_arc, "final LV arcing current");
    Ok(Current::from_kiloamperes(i_arc))
}

/// Quantities that can be interpolated across the reference voltages.
///
/// Interpolation operates on magnitudes in the standard's units.
pub trait Interpolate: Copy {
    fn magnitude(self) -> f64;
    fn from_magnitude(value: f64) -> Self;
}

impl Interpolate for Current {
    fn magnitude(self) -> f64 {
        self.kiloamperes()
    }
    fn from_magnitude(value: f64) -> Self {
        Current::from_kiloamperes(value)
    }
}

impl Interpolate for EnergyDensity {
    fn magnitude(self) -> f64 {
        self.joules_per_cm2()
    }
    fn from_magnitude(value: f64) -> Self {
        EnergyDensity::from_joules_per_cm2(value)
    }
}

impl Interpolate for Length {
    fn magnitude(self) -> f64 {
        self.millimetres()
    }
    fn from_magnitude(value: f64) -> Self {
        Length::from_millimetres(value)
    }
}
