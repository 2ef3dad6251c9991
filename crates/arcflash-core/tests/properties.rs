//! Monotonicity, range enforcement and threading properties of the engine

use arcflash_core::*;

fn params(kv: f64, gap_mm: f64, distance_mm: f64) -> CubicleParams {
    CubicleParams {
        voltage: Voltage::from_kilovolts(kv),
        electrode: ElectrodeConfiguration::Vcb,
        gap: Length::from_millimetres(gap_mm),
        working_distance: Length::from_millimetres(distance_mm),
        height: Length::from_millimetres(1143.0),
        width: Length::from_millimetres(762.0),
        depth: Length::from_millimetres(508.0),
    }
}

fn run(c: &Cubicle, ka: f64, variant: ArcingCurrentVariant, ms: f64) -> CompletedScenario<'_> {
    let i_bf = Current::from_kiloamperes(ka);
    evaluate(c, i_bf, variant, Duration::from_milliseconds(ms)).unwrap()
}

#[test]
fn energy_and_boundary_grow_with_duration() {
    for kv in [0.48, 4.16, 13.8] {
        let gap = if kv <= 0.6 { 32.0 } else { 104.0 };
        let c = Cubicle::new(params(kv, gap, 914.4)).unwrap();
        let at = |ms: f64| run(&c, 20.0, ArcingCurrentVariant::Full, ms);
        let (short, long) = (at(100.0), at(200.0));
        let ratio = long.energy() / short.energy();
        assert!((ratio - 2.0).abs() < 1e-9, "{kv} kV: ratio {ratio}");
        assert!(long.boundary() > short.boundary());
    }
}

#[test]
fn energy_falls_with_working_distance() {
    let mut previous = None;
    for distance in [457.2, 609.6, 914.4, 1219.2] {
        let c = Cubicle::new(params(4.16, 104.0, distance)).unwrap();
        let e = run(&c, 15.0, ArcingCurrentVariant::Full, 197.0).energy();
        if let Some(prev) = previous {
            assert!(e < prev, "E at {distance} mm should be below {prev}");
        }
        previous = Some(e);
    }
}

#[test]
fn boundary_does_not_depend_on_working_distance() {
    let near = Cubicle::new(params(0.48, 32.0, 457.2)).unwrap();
    let far = Cubicle::new(params(0.48, 32.0, 1219.2)).unwrap();
    let i_bf = Current::from_kiloamperes(45.0);
    let t = Duration::from_milliseconds(100.0);
    let a = evaluate(&near, i_bf, ArcingCurrentVariant::Full, t).unwrap().boundary();
    let b = evaluate(&far, i_bf, ArcingCurrentVariant::Full, t).unwrap().boundary();
    assert!((a - b).millimetres().abs() < 1e-6);
}

#[test]
fn energy_at_the_boundary_is_the_threshold() {
    let probe = Cubicle::new(params(0.48, 32.0, 609.6)).unwrap();
    let i_bf = Current::from_kiloamperes(45.0);
    let t = Duration::from_milliseconds(61.3);
    let afb = evaluate(&probe, i_bf, ArcingCurrentVariant::Full, t).unwrap().boundary();

    let mut at_boundary = params(0.48, 32.0, 609.6);
    at_boundary.working_distance = afb;
    let c = Cubicle::new(at_boundary).unwrap();
    let e = evaluate(&c, i_bf, ArcingCurrentVariant::Full, t).unwrap().energy();
    assert!((e - ARC_FLASH_THRESHOLD).joules_per_cm2().abs() < 1e-6);
}

#[test]
fn arcing_current_grows_with_bolted_current() {
    for (kv, gap, currents) in [
        (0.48, 32.0, [1.0, 10.0, 45.0, 100.0]),
        (4.16, 104.0, [0.5, 5.0, 15.0, 60.0]),
    ] {
        let c = Cubicle::new(params(kv, gap, 914.4)).unwrap();
        let arcing: Vec<Current> = currents
            .iter()
            .map(|&ka| {
                Scenario::new(&c, Current::from_kiloamperes(ka), ArcingCurrentVariant::Full)
                    .unwrap()
                    .calculate_arcing_current()
                    .unwrap()
                    .arcing_current()
            })
            .collect();
        for pair in arcing.windows(2) {
            assert!(pair[1] > pair[0], "{kv} kV: {} !> {}", pair[1], pair[0]);
        }
        for (i_arc, ka) in arcing.iter().zip(currents) {
            assert!(i_arc.kiloamperes() < ka);
        }
    }
}

#[test]
fn reduced_arcing_current_is_lower() {
    for (kv, gap, ka) in [
        (0.208, 10.0, 10.0),
        (0.48, 32.0, 45.0),
        (4.16, 104.0, 15.0),
        (14.3, 152.0, 30.0),
    ] {
        let c = Cubicle::new(params(kv, gap, 914.4)).unwrap();
        let i_arc = |variant| {
            Scenario::new(&c, Current::from_kiloamperes(ka), variant)
                .unwrap()
                .calculate_arcing_current()
                .unwrap()
                .arcing_current()
        };
        assert!(i_arc(ArcingCurrentVariant::Reduced) < i_arc(ArcingCurrentVariant::Full));
    }
}

#[test]
fn reference_voltages_reproduce_their_own_intermediate() {
    // Interpolating at exactly 2.7 kV returns the 2.7 kV intermediate.
    let c = Cubicle::new(params(2.7, 104.0, 914.4)).unwrap();
    let done = run(&c, 15.0, ArcingCurrentVariant::Full, 100.0);
    let ArcingCurrents::HighVoltage { reference, arcing } = *done.currents() else {
        panic!("2.7 kV is high voltage");
    };
    assert!((arcing - reference.v2700).kiloamperes().abs() < 1e-9);
    let e = done.reference_energies().unwrap();
    assert!((done.energy() - e.v2700).joules_per_cm2().abs() < 1e-9);
}

#[test]
fn model_range_is_enforced() {
    let cases = [
        (params(0.2, 32.0, 914.4), "nominal voltage (kV)"),
        (params(15.1, 104.0, 914.4), "nominal voltage (kV)"),
        (params(0.48, 5.0, 914.4), "busbar gap (mm)"),
        (params(4.16, 260.0, 914.4), "busbar gap (mm)"),
        (params(4.16, 104.0, 304.0), "working distance (mm)"),
    ];
    for (p, quantity) in cases {
        match Cubicle::new(p) {
            Err(ArcFlashError::RangeViolation { quantity: q, .. }) => assert_eq!(q, quantity),
            other => panic!("expected range violation on {quantity}, got {other:?}"),
        }
    }
}

#[test]
fn bolted_current_range_depends_on_voltage_level() {
    let lv = Cubicle::new(params(0.48, 32.0, 914.4)).unwrap();
    let hv = Cubicle::new(params(4.16, 104.0, 914.4)).unwrap();

    let accepts = |c: &Cubicle, ka: f64| {
        Scenario::new(c, Current::from_kiloamperes(ka), ArcingCurrentVariant::Full).is_ok()
    };
    assert!(!accepts(&lv, 0.3));
    assert!(accepts(&hv, 0.3));
    assert!(accepts(&lv, 100.0));
    assert!(!accepts(&hv, 100.0));
}

#[test]
fn open_air_configurations_skip_the_enclosure_correction() {
    let mut p = params(13.8, 152.0, 914.4);
    p.electrode = ElectrodeConfiguration::Hoa;
    let c = Cubicle::new(p).unwrap();
    assert_eq!(c.correction_factor(), 1.0);
    assert!(c.enclosure_type().is_none());
    let done = run(&c, 20.0, ArcingCurrentVariant::Full, 100.0);
    assert!(done.energy() > EnergyDensity::ZERO);
}

#[test]
fn core_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Cubicle>();
    assert_send_sync::<CompletedScenario<'static>>();
    assert_send_sync::<Calculation<'static>>();
    assert_send_sync::<ArcFlashError>();

    let c = Cubicle::new(params(4.16, 104.0, 914.4)).unwrap();
    let energies: Vec<EnergyDensity> = std::thread::scope(|s| {
        let handles: Vec<_> = [5.0, 10.0, 15.0]
            .into_iter()
            .map(|ka| {
                let c = &c;
                s.spawn(move || run(c, ka, ArcingCurrentVariant::Full, 100.0).energy())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(energies.windows(2).all(|w| w[1] > w[0]));
}
