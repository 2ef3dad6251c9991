//! Typical equipment classes.
//!
//! Gap, enclosure size and working distance for the equipment classes listed
//! in IEEE 1584-2018 tables 8 and 10. Handy when only the equipment type is
//! known.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cubicle::{Cubicle, CubicleParams};
use crate::error::{ArcFlashError, ArcFlashResult};
use crate::tables::ElectrodeConfiguration;
use crate::units::{Length, Voltage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentClass {
    Switchgear15kV,
    Mcc15kV,
    Switchgear5kV,
    /// Second 5 kV switchgear size listed in table 8.
    Switchgear5kVAlt,
    Mcc5kV,
    LvSwitchgear,
    LvMccShallow,
    LvMcc,
    LvPanelboardShallow,
    LvPanelboard,
    CableJunctionBoxShallow,
    CableJunctionBox,
}

/// Dimensions of a typical equipment class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypicalDimensions {
    pub gap: Length,
    pub height: Length,
    pub width: Length,
    pub depth: Length,
    pub working_distance: Length,
}

impl TypicalDimensions {
    const fn mm(gap: f64, height: f64, width: f64, depth: f64, working_distance: f64) -> Self {
        Self {
            gap: Length::from_millimetres(gap),
            height: Length::from_millimetres(height),
            width: Length::from_millimetres(width),
            depth: Length::from_millimetres(depth),
            working_distance: Length::from_millimetres(working_distance),
        }
    }
}

impl EquipmentClass {
    pub const ALL: [EquipmentClass; 12] = [
        EquipmentClass::Switchgear15kV,
        EquipmentClass::Mcc15kV,
        EquipmentClass::Switchgear5kV,
        EquipmentClass::Switchgear5kVAlt,
        EquipmentClass::Mcc5kV,
        EquipmentClass::LvSwitchgear,
        EquipmentClass::LvMccShallow,
        EquipmentClass::LvMcc,
        EquipmentClass::LvPanelboardShallow,
        EquipmentClass::LvPanelboard,
        EquipmentClass::CableJunctionBoxShallow,
        EquipmentClass::CableJunctionBox,
    ];

    /// Short identifier, also accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentClass::Switchgear15kV => "15kv-switchgear",
            EquipmentClass::Mcc15kV => "15kv-mcc",
            EquipmentClass::Switchgear5kV => "5kv-switchgear",
            EquipmentClass::Switchgear5kVAlt => "5kv-switchgear-2",
            EquipmentClass::Mcc5kV => "5kv-mcc",
            EquipmentClass::LvSwitchgear => "lv-switchgear",
            EquipmentClass::LvMccShallow => "lv-mcc-shallow",
            EquipmentClass::LvMcc => "lv-mcc",
            EquipmentClass::LvPanelboardShallow => "lv-panelboard-shallow",
            EquipmentClass::LvPanelboard => "lv-panelboard",
            EquipmentClass::CableJunctionBoxShallow => "cable-junction-box-shallow",
            EquipmentClass::CableJunctionBox => "cable-junction-box",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EquipmentClass::Switchgear15kV => "15 kV switchgear",
            EquipmentClass::Mcc15kV => "15 kV MCC",
            EquipmentClass::Switchgear5kV => "5 kV switchgear",
            EquipmentClass::Switchgear5kVAlt => "5 kV switchgear (alternate size)",
            EquipmentClass::Mcc5kV => "5 kV MCC",
            EquipmentClass::LvSwitchgear => "Low-voltage switchgear",
            EquipmentClass::LvMccShallow => "Low-voltage MCC (shallow)",
            EquipmentClass::LvMcc => "Low-voltage MCC",
            EquipmentClass::LvPanelboardShallow => "Low-voltage panelboard (shallow)",
            EquipmentClass::LvPanelboard => "Low-voltage panelboard",
            EquipmentClass::CableJunctionBoxShallow => "Cable junction box (shallow)",
            EquipmentClass::CableJunctionBox => "Cable junction box",
        }
    }

    #[rustfmt::skip]
    pub fn dimensions(&self) -> TypicalDimensions {
        //                                   G      height  width   depth   D
        match self {
            EquipmentClass::Switchgear15kV =>   TypicalDimensions::mm(152.0, 1143.0, 762.0,  762.0,  914.4),
            EquipmentClass::Mcc15kV =>          TypicalDimensions::mm(152.0, 914.4,  914.4,  914.4,  914.4),
            EquipmentClass::Switchgear5kV =>    TypicalDimensions::mm(104.0, 914.4,  914.4,  914.4,  914.4),
            EquipmentClass::Switchgear5kVAlt => TypicalDimensions::mm(104.0, 1143.0, 762.0,  762.0,  914.4),
            EquipmentClass::Mcc5kV =>           TypicalDimensions::mm(104.0, 660.4,  660.4,  660.4,  914.4),
            EquipmentClass::LvSwitchgear =>     TypicalDimensions::mm(32.0,  508.0,  508.0,  508.0,  609.6),
            EquipmentClass::LvMccShallow
            | EquipmentClass::LvPanelboardShallow =>
                                                TypicalDimensions::mm(25.0,  355.6,  304.8,  100.0,  457.2),
            EquipmentClass::LvMcc
            | EquipmentClass::LvPanelboard =>   TypicalDimensions::mm(25.0,  355.6,  304.8,  250.0,  457.2),
            EquipmentClass::CableJunctionBoxShallow =>
                                                TypicalDimensions::mm(13.0,  355.6,  304.8,  100.0,  457.2),
            EquipmentClass::CableJunctionBox => TypicalDimensions::mm(13.0,  355.6,  304.8,  250.0,  457.2),
        }
    }

    /// Cubicle parameters for this class at the given voltage and electrode configuration.
    pub fn params(&self, voltage: Voltage, electrode: ElectrodeConfiguration) -> CubicleParams {
        let d = self.dimensions();
        CubicleParams {
            voltage,
            electrode,
            gap: d.gap,
            working_distance: d.working_distance,
            height: d.height,
            width: d.width,
            depth: d.depth,
        }
    }

    /// Builds a validated cubicle. Fails like [`Cubicle::new`], e.g. for a
    /// 5 kV gap at a low-voltage rating.
    pub fn cubicle(
        &self,
        voltage: Voltage,
        electrode: ElectrodeConfiguration,
    ) -> ArcFlashResult<Cubicle> {
        Cubicle::new(self.params(voltage, electrode))
    }
}

impl fmt::Display for EquipmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentClass {
    type Err = ArcFlashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        EquipmentClass::ALL
            .into_iter()
            .find(|class| class.name() == wanted)
            .ok_or_else(|| {
                ArcFlashError::UndefinedConfiguration(format!("unknown equipment class '{s}'"))
            })
    }
}
