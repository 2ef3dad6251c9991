//! Parallel parameter sweeps over the arc-flash engine.
//!
//! A sweep holds the equipment fixed except for its nominal voltage and
//! evaluates every (voltage, bolted current) pair on the grid, for both the
//! full and the reduced arcing current. Useful for spotting discontinuities
//! across the interpolation breakpoints.

pub mod config;
pub mod record;
pub mod runner;

pub use config::{sweep_points, SweepConfig, SweepPoint, VoltageRange, MAX_SWEEP_POINTS};
pub use record::{SweepRecord, VariantResult};
pub use runner::{run_sweep, SweepSummary};
