use crate::config::{sweep_points, SweepConfig, SweepPoint};
use crate::record::{SweepRecord, VariantResult};
use anyhow::{Context, Result};
use arcflash_core::{evaluate, ArcFlashResult, ArcingCurrentVariant, Cubicle, Current, Duration};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use tracing::{info, warn};

/// Summary returned after the run so callers can report success/failure counts.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub created_at: DateTime<Utc>,
    pub num_points: usize,
    pub success: usize,
    pub failure: usize,
    pub records: Vec<SweepRecord>,
}

pub fn run_sweep(config: &SweepConfig) -> Result<SweepSummary> {
    let points = sweep_points(config).context("expanding sweep grid")?;

    let thread_count = if config.threads == 0 {
        num_cpus::get()
    } else {
        config.threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .context("building Rayon thread pool for sweep")?;

    info!(points = points.len(), threads = thread_count, "starting sweep");

    // Indexed parallel iterators collect in input order.
    let records: Vec<SweepRecord> =
        pool.install(|| points.par_iter().map(|point| run_point(point, config)).collect());

    let success = records.iter().filter(|record| record.is_ok()).count();
    let failure = records.len() - success;
    info!(success, failure, "sweep finished");

    Ok(SweepSummary {
        created_at: Utc::now(),
        num_points: records.len(),
        success,
        failure,
        records,
    })
}

/// Evaluates one grid point for both variants. Errors are recorded, not raised.
fn run_point(point: &SweepPoint, config: &SweepConfig) -> SweepRecord {
    let runner = || -> ArcFlashResult<(VariantResult, VariantResult)> {
        let mut params = config.base;
        params.voltage = point.voltage;
        let cubicle = Cubicle::new(params)?;
        let i_bf = Current::from_kiloamperes(point.bolted_current_ka);
        let t = Duration::from_milliseconds(config.duration_ms);

        let full = evaluate(&cubicle, i_bf, ArcingCurrentVariant::Full, t)?;
        let reduced = evaluate(&cubicle, i_bf, ArcingCurrentVariant::Reduced, t)?;
        Ok((VariantResult::from(&full), VariantResult::from(&reduced)))
    };

    let (status, error, full, reduced) = match runner() {
        Ok((full, reduced)) => ("ok".to_string(), None, Some(full), Some(reduced)),
        Err(err) => {
            warn!(
                index = point.index,
                voltage_kv = point.voltage.kilovolts(),
                i_bf_ka = point.bolted_current_ka,
                "sweep point failed: {err}"
            );
            ("error".to_string(), Some(err.to_string()), None, None)
        }
    };
    SweepRecord {
        index: point.index,
        voltage_kv: point.voltage.kilovolts(),
        bolted_current_ka: point.bolted_current_ka,
        status,
        error,
        full,
        reduced,
    }
}
