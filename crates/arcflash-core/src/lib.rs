//! # arcflash-core: IEEE 1584-2018 Arc-Flash Calculation Engine
//!
//! Computes arcing current, incident energy and arc-flash boundary for
//! three-phase AC equipment from 208 V to 15 kV, following the empirical
//! model of IEEE 1584-2018.
//!
//! ## Design Philosophy
//!
//! Calculation is split in two layers:
//! - **Equipment**: a [`Cubicle`] is validated once and carries the derived
//!   variation and enclosure correction factors.
//! - **Scenarios**: each bolted fault current / arc duration pair is a
//!   separate [`Scenario`] evaluated against a shared cubicle.
//!
//! Every physical quantity is a newtype from [`units`], so unit mistakes are
//! compile errors and results are independent of the units inputs were given
//! in. Coefficient tables are immutable statics; all types are `Send + Sync`
//! and scenarios can be evaluated in parallel.
//!
//! ## Quick Start
//!
//! ```rust
//! use arcflash_core::*;
//!
//! let cubicle = Cubicle::new(CubicleParams {
//!     voltage: Voltage::from_kilovolts(0.48),
//!     electrode: ElectrodeConfiguration::Vcb,
//!     gap: Length::from_millimetres(32.0),
//!     working_distance: Length::from_millimetres(609.6),
//!     height: Length::from_millimetres(610.0),
//!     width: Length::from_millimetres(610.0),
//!     depth: Length::from_millimetres(254.0),
//! })?;
//!
//! let result = evaluate(
//!     &cubicle,
//!     Current::from_kiloamperes(45.0),
//!     ArcingCurrentVariant::Full,
//!     Duration::from_milliseconds(61.3),
//! )?;
//! assert!((result.arcing_current().kiloamperes() - 28.793).abs() < 1e-3);
//! assert!((result.energy().calories_per_cm2() - 2.769).abs() < 1e-3);
//! # Ok::<(), ArcFlashError>(())
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Dimensioned quantities
//! - [`tables`] - Coefficient tables 1-5 and 7
//! - [`cubicle`] - Equipment validation and enclosure correction
//! - [`equations`] - Equations 1-25 as pure functions
//! - [`calculation`] - Scenario state machine
//! - [`multistep`] - Aggregation of multi-step events
//! - [`presets`] - Typical equipment classes

pub mod calculation;
pub mod cubicle;
pub mod equations;
pub mod error;
pub mod multistep;
pub mod presets;
pub mod tables;
pub mod units;

pub use calculation::{
    evaluate, ArcingCurrentScenario, ArcingCurrentVariant, ArcingCurrents, Calculation,
    CompletedScenario, EnergyBreakdown, ReferenceValues, Scenario,
};
pub use cubicle::{Cubicle, CubicleParams, EnclosureCorrection, VoltageLevel};
pub use equations::{EnergyMode, ARC_FLASH_THRESHOLD};
pub use error::{ArcFlashError, ArcFlashResult};
pub use multistep::{aggregate, MultistepResult};
pub use presets::{EquipmentClass, TypicalDimensions};
pub use tables::{ElectrodeConfiguration, EnclosureType, ReferenceVoltage};
pub use units::{Current, Duration, EnergyDensity, Length, Voltage};
