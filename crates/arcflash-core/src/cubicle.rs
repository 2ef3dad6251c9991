//! Equipment geometry and the enclosure correction model.
//!
//! A [`Cubicle`] holds everything about a piece of equipment that does not
//! change with fault current or arc duration. Construction validates the
//! inputs against the model's range and derives both correction factors once;
//! the value is immutable afterwards and shared by reference with every
//! scenario evaluated against it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{ArcFlashError, ArcFlashResult};
use crate::tables::{self, ElectrodeConfiguration, EnclosureType};
use crate::units::{Length, Voltage};

/// Inches per millimetre as printed in the standard.
///
/// Deliberately not `1 / 25.4`: the worked examples were produced with this
/// rounded factor.
const INCHES_PER_MM: f64 = 0.03937;

const SMALL_DIMENSION_MM: f64 = 508.0;
const MID_DIMENSION_MM: f64 = 660.4;
const LARGE_DIMENSION_MM: f64 = 1244.6;
const SHALLOW_DEPTH_MM: f64 = 203.2;

/// Fixed equivalent dimension for small typical enclosures.
const TYPICAL_MINIMUM_INCHES: f64 = 20.0;
/// Saturated height for VCB above 1244.6 mm.
const VCB_MAX_HEIGHT_INCHES: f64 = 49.0;
/// Slack on the EES floor, covering the rounded mm→in factor.
const EES_TOLERANCE_INCHES: f64 = 1e-3;

const MAX_CORRECTION_FACTOR: f64 = 3.0;

/// Low- or high-voltage branch of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoltageLevel {
    /// 0.208 kV up to and including 0.6 kV.
    Low,
    /// Above 0.6 kV up to 15 kV.
    High,
}

impl VoltageLevel {
    pub fn classify(voltage: Voltage) -> Self {
        if voltage.kilovolts() <= 0.6 {
            VoltageLevel::Low
        } else {
            VoltageLevel::High
        }
    }
}

impl fmt::Display for VoltageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoltageLevel::Low => f.write_str("LV"),
            VoltageLevel::High => f.write_str("HV"),
        }
    }
}

/// Raw equipment description, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicleParams {
    /// Nominal open-circuit voltage.
    pub voltage: Voltage,
    pub electrode: ElectrodeConfiguration,
    /// Busbar gap.
    pub gap: Length,
    pub working_distance: Length,
    pub height: Length,
    pub width: Length,
    pub depth: Length,
}

/// Validated equipment geometry with its derived correction factors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cubicle {
    params: CubicleParams,
    voltage_level: VoltageLevel,
    variation_factor: f64,
    enclosure: Option<EnclosureCorrection>,
    correction_factor: f64,
}

/// Intermediate values of the enclosure size correction (boxed configurations only).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnclosureCorrection {
    pub enclosure_type: EnclosureType,
    /// Equivalent height, inches.
    pub height_equivalent: f64,
    /// Equivalent width, inches.
    pub width_equivalent: f64,
    /// Equivalent enclosure size, inches.
    pub equivalent_enclosure_size: f64,
}

impl Cubicle {
    pub fn new(params: CubicleParams) -> ArcFlashResult<Self> {
        check_model_bounds(&params)?;

        let voltage_level = VoltageLevel::classify(params.voltage);
        let variation_factor = variation_factor(&params)?;
        let (enclosure, correction_factor) = if params.electrode.is_open_air() {
            (None, 1.0)
        } else {
            let correction = enclosure_correction(&params)?;
            let b = tables::enclosure_coefficients(correction.enclosure_type, params.electrode)?;
            let ees = correction.equivalent_enclosure_size;
            let x = b.b1 * ees.powi(2) + b.b2 * ees + b.b3;
            let cf = match correction.enclosure_type {
                EnclosureType::Typical => x,
                EnclosureType::Shallow => 1.0 / x,
            };
            (Some(correction), cf)
        };

        if !(correction_factor > 0.0 && correction_factor <= MAX_CORRECTION_FACTOR) {
            return Err(ArcFlashError::Domain(format!(
                "enclosure size correction factor {correction_factor} \
                 is outside (0, {MAX_CORRECTION_FACTOR}]"
            )));
        }

        debug!(
            electrode = %params.electrode,
            voltage_kv = params.voltage.kilovolts(),
            level = %voltage_level,
            variation_factor,
            correction_factor,
            "cubicle constructed"
        );

        Ok(Self {
            params,
            voltage_level,
            variation_factor,
            enclosure,
            correction_factor,
        })
    }

    pub fn params(&self) -> &CubicleParams {
        &self.params
    }

    pub fn voltage(&self) -> Voltage {
        self.params.voltage
    }

    pub fn electrode(&self) -> ElectrodeConfiguration {
        self.params.electrode
    }

    pub fn gap(&self) -> Length {
        self.params.gap
    }

    pub fn working_distance(&self) -> Length {
        self.params.working_distance
    }

    pub fn voltage_level(&self) -> VoltageLevel {
        self.voltage_level
    }

    /// Arcing current variation correction factor (VarCF).
    pub fn variation_factor(&self) -> f64 {
        self.variation_factor
    }

    /// Enclosure size correction factor (CF). Exactly 1 for open air.
    pub fn correction_factor(&self) -> f64 {
        self.correction_factor
    }

    /// Enclosure details, `None` for open-air configurations.
    pub fn enclosure(&self) -> Option<&EnclosureCorrection> {
        self.enclosure.as_ref()
    }

    pub fn enclosure_type(&self) -> Option<EnclosureType> {
        self.enclosure.map(|e| e.enclosure_type)
    }

    /// Equivalent height in inches.
    pub fn height_equivalent(&self) -> Option<f64> {
        self.enclosure.map(|e| e.height_equivalent)
    }

    /// Equivalent width in inches.
    pub fn width_equivalent(&self) -> Option<f64> {
        self.enclosure.map(|e| e.width_equivalent)
    }

    pub fn equivalent_enclosure_size(&self) -> Option<f64> {
        self.enclosure.map(|e| e.equivalent_enclosure_size)
    }
}

/// Range of model, IEEE 1584-2018 clause 4.2.
fn check_model_bounds(p: &CubicleParams) -> ArcFlashResult<()> {
    ArcFlashError::check_range("nominal voltage (kV)", p.voltage.kilovolts(), 0.208, 15.0)?;

    match VoltageLevel::classify(p.voltage) {
        VoltageLevel::Low => {
            ArcFlashError::check_range("busbar gap (mm)", p.gap.millimetres(), 6.35, 76.2)?
        }
        VoltageLevel::High => {
            ArcFlashError::check_range("busbar gap (mm)", p.gap.millimetres(), 19.05, 254.0)?
        }
    }

    ArcFlashError::check_range(
        "working distance (mm)",
        p.working_distance.millimetres(),
        305.0,
        f64::INFINITY,
    )?;

    // Only a lower bound; the upper bound just rejects NaN.
    let min_width = 4.0 * p.gap.millimetres();
    ArcFlashError::check_range(
        "enclosure width (mm)",
        p.width.millimetres(),
        min_width,
        f64::INFINITY,
    )?;

    for (name, dim) in [
        ("enclosure height (mm)", p.height),
        ("enclosure depth (mm)", p.depth),
    ] {
        ArcFlashError::check_range(name, dim.millimetres(), 0.0, f64::INFINITY)?;
    }
    Ok(())
}

/// Degree-6 polynomial in V_oc from table 2.
fn variation_factor(p: &CubicleParams) -> ArcFlashResult<f64> {
    let k = tables::variation_coefficients(p.electrode)?;
    let v = p.voltage.kilovolts();
    Ok(k.k1 * v.powi(6)
        + k.k2 * v.powi(5)
        + k.k3 * v.powi(4)
        + k.k4 * v.powi(3)
        + k.k5 * v.powi(2)
        + k.k6 * v
        + k.k7)
}

fn classify_enclosure(p: &CubicleParams) -> EnclosureType {
    if p.voltage.kilovolts() <= 0.6
        && p.height.millimetres() < SMALL_DIMENSION_MM
        && p.width.millimetres() < SMALL_DIMENSION_MM
        && p.depth.millimetres() <= SHALLOW_DEPTH_MM
    {
        EnclosureType::Shallow
    } else {
        EnclosureType::Typical
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Dimension {
    Height,
    Width,
}

/// Table 6 and equations 11-13.
fn enclosure_correction(p: &CubicleParams) -> ArcFlashResult<EnclosureCorrection> {
    let enclosure_type = classify_enclosure(p);
    let (a, b) = match p.electrode {
        ElectrodeConfiguration::Vcb => (4.0, 20.0),
        ElectrodeConfiguration::Vcbb => (10.0, 24.0),
        ElectrodeConfiguration::Hcb => (10.0, 22.0),
        ec => {
            return Err(ArcFlashError::UndefinedConfiguration(format!(
                "{ec} has no enclosure rescaling constants"
            )))
        }
    };
    let v = p.voltage.kilovolts();
    // Equations 11 and 12
    let rescale =
        |dim_mm: f64| (MID_DIMENSION_MM + (dim_mm - MID_DIMENSION_MM) * (v + a) / b) / 25.4;

    let equivalent = |dimension: Dimension, dim: Length| -> f64 {
        let mm = dim.millimetres();
        let direct_for_vcb_height =
            dimension == Dimension::Height && p.electrode == ElectrodeConfiguration::Vcb;
        if mm < SMALL_DIMENSION_MM {
            match enclosure_type {
                EnclosureType::Typical => TYPICAL_MINIMUM_INCHES,
                EnclosureType::Shallow => INCHES_PER_MM * mm,
            }
        } else if mm <= MID_DIMENSION_MM {
            INCHES_PER_MM * mm
        } else if mm <= LARGE_DIMENSION_MM {
            if direct_for_vcb_height {
                INCHES_PER_MM * mm
            } else {
                rescale(mm)
            }
        } else if direct_for_vcb_height {
            VCB_MAX_HEIGHT_INCHES
        } else {
            rescale(LARGE_DIMENSION_MM)
        }
    };

    let height_equivalent = equivalent(Dimension::Height, p.height);
    let width_equivalent = equivalent(Dimension::Width, p.width);
    // Equation 13
    let ees = (height_equivalent + width_equivalent) / 2.0;

    if enclosure_type == EnclosureType::Typical
        && ees < TYPICAL_MINIMUM_INCHES - EES_TOLERANCE_INCHES
    {
        return Err(ArcFlashError::Domain(format!(
            "equivalent enclosure size {ees:.3} in is below the \
             {TYPICAL_MINIMUM_INCHES} in minimum for typical enclosures"
        )));
    }

    Ok(EnclosureCorrection {
        enclosure_type,
        height_equivalent,
        width_equivalent,
        equivalent_enclosure_size: ees,
    })
}

impl fmt::Display for Cubicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        writeln!(f, "Cubicle parameters:")?;
        writeln!(f)?;
        writeln!(f, "V_oc (nominal voltage)          = {:.3}", p.voltage)?;
        writeln!(f, "D (working distance)            = {:.1}", p.working_distance)?;
        writeln!(f, "G (busbar gap)                  = {:.1}", p.gap)?;
        writeln!(f, "EC (electrode configuration)    = {}", p.electrode)?;
        writeln!(f)?;
        writeln!(f, "Box dimensions:")?;
        writeln!(f, "    height  = {:.1}", p.height)?;
        writeln!(f, "    width   = {:.1}", p.width)?;
        writeln!(f, "    depth   = {:.1}", p.depth)?;
        writeln!(f)?;
        writeln!(f, "Enclosure correction factor")?;
        if let Some(e) = &self.enclosure {
            writeln!(f, "    enclosure_type  = {}", e.enclosure_type)?;
            writeln!(f, "    height_1        = {:.1} inch", e.height_equivalent)?;
            writeln!(f, "    width_1         = {:.1} inch", e.width_equivalent)?;
            writeln!(f, "    EES             = {:.1} inch", e.equivalent_enclosure_size)?;
        } else {
            writeln!(f, "    enclosure_type  = open air")?;
        }
        writeln!(f, "    CF              = {:.3}", self.correction_factor)
    }
}
