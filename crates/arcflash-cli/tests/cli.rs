use assert_cmd::Command;
use predicates::prelude::*;

fn arcflash() -> Command {
    Command::cargo_bin("arcflash").unwrap()
}

const D1_EQUIPMENT: [&str; 14] = [
    "--voltage", "4.16", "--electrode", "VCB", "--gap", "104", "--distance", "914.4", "--height",
    "1143", "--width", "762", "--depth", "508",
];

#[test]
fn calc_prints_table_for_both_variants() {
    let mut cmd = arcflash();
    cmd.arg("calc")
        .args(D1_EQUIPMENT)
        .args(["--current", "15", "--duration", "197", "--duration-reduced", "223"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CF              = 1.284"))
        .stdout(predicate::str::contains("12.979"))
        .stdout(predicate::str::contains("12.152"))
        .stdout(predicate::str::contains("13.343"));
}

#[test]
fn calc_json_output_parses() {
    let output = arcflash()
        .args(["--format", "json", "calc"])
        .args(D1_EQUIPMENT)
        .args(["--current", "15", "--duration", "197"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let full = &json["scenarios"][0];
    assert_eq!(full["variant"], "full");
    let e = full["energy_j_per_cm2"].as_f64().unwrap();
    assert!((e - 12.15173).abs() < 1e-4);
}

#[test]
fn calc_rejects_out_of_range_current() {
    arcflash()
        .arg("calc")
        .args(D1_EQUIPMENT)
        .args(["--current", "80", "--duration", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bolted fault current"));
}

#[test]
fn calc_reports_missing_dimensions() {
    arcflash()
        .args(["calc", "--voltage", "0.48", "--current", "20", "--duration", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--gap"));
}

#[test]
fn multistep_reproduces_single_step() {
    let output = arcflash()
        .args(["--format", "json", "multistep"])
        .args(D1_EQUIPMENT)
        .args(["--current", "15", "--segments", "170,27"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let e = json["total"]["energy"].as_f64().unwrap();
    assert!((e - 12.15173).abs() < 1e-4);
    assert_eq!(json["segments"].as_array().unwrap().len(), 2);
}

#[test]
fn multistep_rejects_mismatched_currents() {
    arcflash()
        .arg("multistep")
        .args(D1_EQUIPMENT)
        .args(["--current", "15,10,5", "--segments", "170,27"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 fault currents for 2 segments"));
}

#[test]
fn sweep_runs_small_grid() {
    arcflash()
        .args([
            "sweep", "--start-kv", "4.16", "--stop-kv", "4.20", "--step-kv", "0.02", "--currents",
            "15,70", "--threads", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 ok, 3 failed"));
}

#[test]
fn sweep_rejects_a_fixed_voltage() {
    arcflash()
        .args(["sweep", "--voltage", "4.16", "--stop-kv", "4.20", "--step-kv", "0.02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not --voltage"));
}

#[test]
fn sweep_rejects_a_step_too_small_to_expand() {
    arcflash()
        .args(["sweep", "--start-kv", "4.16", "--stop-kv", "15", "--step-kv", "1e-300"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the limit"));
}

#[test]
fn presets_lists_every_class() {
    arcflash()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("15kv-switchgear"))
        .stdout(predicate::str::contains("cable-junction-box-shallow"));
}

#[test]
fn preset_with_voltage_is_enough_for_calc() {
    arcflash()
        .args(["calc", "--preset", "lv-switchgear", "--voltage", "0.48"])
        .args(["--current", "45", "--duration", "61.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reduced"));
}
