//! Sweep runner tests

use arcflash_core::ElectrodeConfiguration;
use arcflash_sweep::{run_sweep, SweepConfig, VoltageRange};

fn small_config() -> SweepConfig {
    let mut config = SweepConfig {
        voltage: VoltageRange {
            start_kv: 4.16,
            stop_kv: 4.20,
            step_kv: 0.02,
        },
        currents_ka: vec![15.0, 70.0],
        threads: 2,
        ..SweepConfig::default()
    };
    config.base.electrode = ElectrodeConfiguration::Vcb;
    config
}

#[test]
fn out_of_range_points_are_recorded_not_fatal() {
    let summary = run_sweep(&small_config()).unwrap();
    assert_eq!(summary.num_points, 6);
    assert_eq!(summary.success, 3);
    assert_eq!(summary.failure, 3);

    for record in &summary.records {
        if record.bolted_current_ka > 65.0 {
            assert_eq!(record.status, "error");
            assert!(record.error.as_deref().unwrap().contains("bolted fault current"));
            assert!(record.full.is_none());
        } else {
            assert_eq!(record.status, "ok");
            assert!(record.error.is_none());
        }
    }
}

#[test]
fn records_keep_grid_order() {
    let summary = run_sweep(&small_config()).unwrap();
    let indices: Vec<usize> = summary.records.iter().map(|r| r.index).collect();
    assert_eq!(indices, (0..6).collect::<Vec<_>>());
    assert!(summary
        .records
        .windows(2)
        .all(|w| w[0].voltage_kv <= w[1].voltage_kv));
}

#[test]
fn first_point_matches_single_calculation() {
    let summary = run_sweep(&small_config()).unwrap();
    let first = &summary.records[0];
    let full = first.full.unwrap();
    let reduced = first.reduced.unwrap();

    assert!((full.arcing_current_ka - 12.97947).abs() < 1e-4);
    assert!((full.energy_j_per_cm2 - 12.15173).abs() < 1e-4);
    assert!((full.boundary_mm - 1606.0008).abs() < 1e-2);
    assert!((reduced.arcing_current_ka - 12.67528).abs() < 1e-4);
    assert!(reduced.energy_j_per_cm2 < full.energy_j_per_cm2);
}

#[test]
fn invalid_grid_is_an_error() {
    let config = SweepConfig {
        voltage: VoltageRange {
            start_kv: 5.0,
            stop_kv: 4.0,
            step_kv: 0.1,
        },
        ..SweepConfig::default()
    };
    assert!(run_sweep(&config).is_err());
}

#[test]
fn summary_serializes_to_json() {
    let summary = run_sweep(&small_config()).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["success"], 3);
    assert_eq!(json["records"][1]["status"], "error");
}
