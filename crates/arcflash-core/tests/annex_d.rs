//! Worked examples from IEEE 1584-2018 Annex D

use arcflash_core::*;

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected}, got {actual}"
    );
}

fn run(c: &Cubicle, ka: f64, variant: ArcingCurrentVariant, ms: f64) -> CompletedScenario<'_> {
    let i_bf = Current::from_kiloamperes(ka);
    evaluate(c, i_bf, variant, Duration::from_milliseconds(ms)).unwrap()
}

fn d1_params() -> CubicleParams {
    CubicleParams {
        voltage: Voltage::from_kilovolts(4.16),
        electrode: ElectrodeConfiguration::Vcb,
        gap: Length::from_millimetres(104.0),
        working_distance: Length::from_millimetres(914.4),
        height: Length::from_millimetres(1143.0),
        width: Length::from_millimetres(762.0),
        depth: Length::from_millimetres(508.0),
    }
}

fn d2_params() -> CubicleParams {
    CubicleParams {
        voltage: Voltage::from_kilovolts(0.48),
        electrode: ElectrodeConfiguration::Vcb,
        gap: Length::from_millimetres(32.0),
        working_distance: Length::from_millimetres(609.6),
        height: Length::from_millimetres(610.0),
        width: Length::from_millimetres(610.0),
        depth: Length::from_millimetres(254.0),
    }
}

#[test]
fn d1_cubicle_factors() {
    let c = Cubicle::new(d1_params()).unwrap();
    assert_eq!(c.voltage_level(), VoltageLevel::High);
    assert_eq!(c.enclosure_type(), Some(EnclosureType::Typical));
    assert_close(c.variation_factor(), 0.046872, 1e-5, "VarCF");
    assert_close(c.width_equivalent().unwrap(), 27.632, 1e-3, "width_1");
    assert_close(c.height_equivalent().unwrap(), 45.0, 1e-3, "height_1");
    assert_close(c.equivalent_enclosure_size().unwrap(), 36.316, 1e-3, "EES");
    assert_close(c.correction_factor(), 1.28384, 1e-4, "CF");
}

#[test]
fn d1_full_arcing_current() {
    let c = Cubicle::new(d1_params()).unwrap();
    let done = run(&c, 15.0, ArcingCurrentVariant::Full, 197.0);

    let ArcingCurrents::HighVoltage { reference, arcing } = *done.currents() else {
        panic!("4.16 kV must use the high-voltage path");
    };
    assert_close(reference.v600.kiloamperes(), 11.1167, 1e-3, "I_600");
    assert_close(reference.v2700.kiloamperes(), 12.8158, 1e-3, "I_2700");
    assert_close(reference.v14300.kiloamperes(), 14.1165, 1e-3, "I_14300");
    assert_close(arcing.kiloamperes(), 12.97947, 1e-4, "I_arc");

    let e = done.reference_energies().unwrap();
    assert_close(e.v600.joules_per_cm2(), 8.6524, 1e-3, "E_600");
    assert_close(e.v2700.joules_per_cm2(), 11.9768, 1e-3, "E_2700");
    assert_close(e.v14300.joules_per_cm2(), 13.3668, 1e-3, "E_14300");

    let afb = done.reference_boundaries().unwrap();
    assert_close(afb.v600.millimetres(), 1285.43, 0.05, "AFB_600");
    assert_close(afb.v2700.millimetres(), 1591.40, 0.05, "AFB_2700");
    assert_close(afb.v14300.millimetres(), 1707.44, 0.05, "AFB_14300");

    assert_close(done.energy().joules_per_cm2(), 12.15173, 1e-4, "E");
    assert_close(done.boundary().millimetres(), 1606.0008, 1e-2, "AFB");
}

#[test]
fn d1_reduced_arcing_current() {
    let c = Cubicle::new(d1_params()).unwrap();
    let done = run(&c, 15.0, ArcingCurrentVariant::Reduced, 223.0);

    let ArcingCurrents::HighVoltage { reference, .. } = *done.currents() else {
        panic!("4.16 kV must use the high-voltage path");
    };
    assert_close(reference.v600.kiloamperes(), 10.8562, 1e-3, "I_600,min");
    assert_close(reference.v2700.kiloamperes(), 12.5154, 1e-3, "I_2700,min");
    assert_close(reference.v14300.kiloamperes(), 13.7856, 1e-3, "I_14300,min");
    assert_close(done.arcing_current().kiloamperes(), 12.67528, 1e-4, "I_arc,min");

    let e = done.reference_energies().unwrap();
    assert_close(e.v600.joules_per_cm2(), 8.9803, 1e-3, "E_600,min");
    assert_close(e.v2700.joules_per_cm2(), 13.0182, 1e-3, "E_2700,min");
    assert_close(e.v14300.joules_per_cm2(), 15.6016, 1e-3, "E_14300,min");

    assert_close(done.energy().joules_per_cm2(), 13.34333, 1e-4, "E,min");
    assert_close(done.boundary().millimetres(), 1704.191, 1e-2, "AFB,min");
}

#[test]
fn d2_cubicle_factors() {
    let c = Cubicle::new(d2_params()).unwrap();
    assert_eq!(c.voltage_level(), VoltageLevel::Low);
    assert_close(c.variation_factor(), 0.24651, 1e-4, "VarCF");
    assert_close(c.equivalent_enclosure_size().unwrap(), 24.0157, 1e-3, "EES");
    assert_close(c.correction_factor(), 1.08470, 1e-4, "CF");
}

#[test]
fn d2_full_arcing_current() {
    let c = Cubicle::new(d2_params()).unwrap();
    let done = run(&c, 45.0, ArcingCurrentVariant::Full, 61.3);

    let ArcingCurrents::LowVoltage { at_600, arcing } = *done.currents() else {
        panic!("0.48 kV must use the low-voltage path");
    };
    assert_close(at_600.kiloamperes(), 32.44867, 1e-4, "I_600");
    assert_close(arcing.kiloamperes(), 28.79327, 1e-4, "I_arc");
    assert!(done.reference_energies().is_none());

    assert_close(done.energy().joules_per_cm2(), 11.58495, 1e-4, "E");
    assert_close(done.energy().calories_per_cm2(), 11.58495 / 4.184, 1e-4, "E (cal)");
    assert_close(done.boundary().millimetres(), 1028.679, 1e-2, "AFB");
}

#[test]
fn d2_reduced_arcing_current() {
    let c = Cubicle::new(d2_params()).unwrap();
    let done = run(&c, 45.0, ArcingCurrentVariant::Reduced, 319.0);

    assert_close(done.arcing_current().kiloamperes(), 25.24440, 1e-4, "I_arc,min");
    assert_close(done.energy().joules_per_cm2(), 53.15633, 1e-3, "E,min");
    assert_close(done.boundary().millimetres(), 2668.919, 1e-2, "AFB,min");
}

#[test]
fn results_do_not_depend_on_input_units() {
    let base = Cubicle::new(d1_params()).unwrap();
    let rescaled = Cubicle::new(CubicleParams {
        voltage: Voltage::from_millivolts(4_160_000.0),
        electrode: ElectrodeConfiguration::Vcb,
        gap: Length::from_metres(0.104),
        working_distance: Length::from_micrometres(914_400.0),
        height: Length::from_metres(1.143),
        width: Length::from_millimetres(762.0),
        depth: Length::from_metres(0.508),
    })
    .unwrap();

    let a = run(&base, 15.0, ArcingCurrentVariant::Full, 197.0);
    let b = evaluate(
        &rescaled,
        Current::from_amperes(15_000.0),
        ArcingCurrentVariant::Full,
        Duration::from_microseconds(197_000.0),
    )
    .unwrap();

    let rel = |x: f64, y: f64| ((x - y) / y).abs();
    assert!(rel(a.arcing_current().kiloamperes(), b.arcing_current().kiloamperes()) < 1e-9);
    assert!(rel(a.energy().joules_per_cm2(), b.energy().joules_per_cm2()) < 1e-9);
    assert!(rel(a.boundary().millimetres(), b.boundary().millimetres()) < 1e-9);
}

#[test]
fn summary_text_for_d2() {
    let c = Cubicle::new(d2_params()).unwrap();
    let done = run(&c, 45.0, ArcingCurrentVariant::Reduced, 319.0);
    let text = done.to_string();
    assert!(text.contains("reduced arcing current"));
    assert!(text.contains("I_arc = 25.244 kA"));
    assert!(text.contains("T = 319.0 ms"));
}
