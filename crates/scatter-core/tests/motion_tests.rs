// Eased fade, asymmetric scatter smoothing and ambient particle kinematics.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scatter_core::{
    smoothstep, AmbientConfig, AmbientField, FadeController, FadeTarget, ScatterSmoother,
    AMBIENT_SCATTER_TAU_IN_SEC, AMBIENT_SCATTER_TAU_OUT_SEC,
};

const DT: f32 = 1.0 / 60.0;

fn make_smoother() -> ScatterSmoother {
    ScatterSmoother::new(AMBIENT_SCATTER_TAU_OUT_SEC, AMBIENT_SCATTER_TAU_IN_SEC)
}

#[test]
fn smoothstep_endpoints_and_midpoint() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(smoothstep(-3.0), 0.0);
    assert_eq!(smoothstep(4.0), 1.0);
}

#[test]
fn zero_duration_fade_snaps_in_one_tick() {
    for dt in [0.0, 1e-4, DT, 0.5, 10.0] {
        let mut fade = FadeController::new(0.0);
        assert_eq!(fade.tick(0.0, dt), 0.0);
        assert_eq!(fade.tick(0.3, dt), 0.3);
        assert_eq!(fade.tick(1.0, dt), 1.0);
    }
}

#[test]
fn fade_completes_when_dt_covers_the_duration() {
    let mut fade = FadeController::new(0.05);
    assert_eq!(fade.current(), 1.0);
    assert_eq!(fade.tick(0.0, 0.05), 0.0);
    assert_eq!(fade.tick(1.0, 0.2), 1.0);
}

#[test]
fn fade_approaches_without_overshoot() {
    let mut fade = FadeController::new(0.05);
    let mut prev = fade.current();
    for _ in 0..60 {
        let v = fade.tick(0.0, DT);
        assert!(v <= prev && v >= 0.0, "fade went from {prev} to {v}");
        prev = v;
    }
    assert!(prev < 0.01);
}

#[test]
fn fade_target_modes() {
    let binary = FadeTarget::Binary { epsilon: 0.0 };
    assert_eq!(binary.target(0.0), 1.0);
    assert_eq!(binary.target(0.001), 0.0);
    assert_eq!(binary.target(1.0), 0.0);

    let tolerant = FadeTarget::Binary { epsilon: 0.1 };
    assert_eq!(tolerant.target(0.05), 1.0);
    assert_eq!(tolerant.target(0.2), 0.0);

    let continuous = FadeTarget::Continuous;
    assert_eq!(continuous.target(0.0), 1.0);
    assert!((continuous.target(0.25) - 0.75).abs() < 1e-6);
    assert_eq!(continuous.target(1.0), 0.0);
}

#[test]
fn scatter_explodes_faster_than_it_settles() {
    let mut s = make_smoother();
    for _ in 0..10 {
        s.step(1.0, DT);
    }
    let rise = s.amount();

    let mut s = make_smoother();
    for _ in 0..2000 {
        s.step(1.0, DT);
    }
    assert!(s.amount() > 0.999);
    for _ in 0..10 {
        s.step(0.0, DT);
    }
    let fall = 1.0 - s.amount();

    assert!(rise > 2.0 * fall, "rise {rise} vs fall {fall}");
}

#[test]
fn scatter_amount_stays_in_bounds_under_variable_dt() {
    let mut s = make_smoother();
    let dts = [0.0, 1e-5, DT, 0.1, 0.7, 3.0, 50.0, f32::INFINITY, -1.0];
    let targets = [1.0, 0.0, 0.4, 1.0, 0.9, 0.1, 0.0, 1.0];
    for (i, &target) in targets.iter().cycle().take(200).enumerate() {
        let before = s.amount();
        let dt = dts[i % dts.len()];
        let after = s.step(target, dt);
        assert!((0.0..=1.0).contains(&after), "amount {after}");
        // Never passes the target.
        if target >= before {
            assert!(after <= target && after >= before);
        } else {
            assert!(after >= target && after <= before);
        }
    }
}

#[test]
fn ambient_orbit_preserves_radius_and_spin_stays_unit() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut field = AmbientField::spawn(AmbientConfig::petals(), 0.15, 0.9, &mut rng);
    let radii: Vec<f32> = field
        .particles()
        .iter()
        .map(|p| p.base_position.length())
        .collect();
    let mut t = 0.0;
    for _ in 0..600 {
        t += DT;
        field.tick(0.0, t, DT);
    }
    for (p, r) in field.particles().iter().zip(&radii) {
        assert!((p.base_position.length() - r).abs() < 1e-3);
        assert!(p.spin.is_normalized());
    }
}

#[test]
fn ambient_hover_is_a_pure_function_of_time() {
    let mut config = AmbientConfig::bokeh();
    config.orbit_speed_max = 0.0;
    let mut rng = StdRng::seed_from_u64(8);
    let mut field = AmbientField::spawn(config, 0.15, 0.9, &mut rng);
    field.tick(0.0, 2.5, 0.0);
    let first = field.field().transforms().to_vec();
    field.tick(0.0, 7.0, 0.0);
    field.tick(0.0, 2.5, 0.0);
    assert_eq!(field.field().transforms(), first.as_slice());
}

#[test]
fn ambient_scatter_dims_and_stays_in_band() {
    let config = AmbientConfig::bokeh();
    let mut rng = StdRng::seed_from_u64(13);
    let mut field = AmbientField::spawn(config, 0.15, 0.9, &mut rng);
    let mut t = 0.0;
    for _ in 0..300 {
        t += DT;
        field.tick(1.0, t, DT);
        let s = field.scatter_amount();
        assert!((0.0..=1.0).contains(&s));
        let floor = config.twinkle_min * (1.0 - config.scatter_dim * s) - 1e-5;
        let ceil = config.twinkle_max * (1.0 - config.scatter_dim * s) + 1e-5;
        for &o in field.opacities() {
            assert!(o >= floor && o <= ceil, "opacity {o} outside [{floor}, {ceil}]");
        }
    }
    assert!(field.scatter_amount() > 0.99);
    assert!(field.field().is_dirty());
}

#[test]
fn ambient_positions_include_scatter_offset() {
    let mut config = AmbientConfig::petals();
    config.orbit_speed_max = 0.0;
    config.hover_amp_max = 0.0;
    let mut rng = StdRng::seed_from_u64(21);
    let mut field = AmbientField::spawn(config, 0.15, 0.9, &mut rng);
    for _ in 0..2000 {
        field.tick(1.0, 1.0, DT);
    }
    let s = field.scatter_amount();
    for (p, t) in field.particles().iter().zip(field.field().transforms()) {
        let want = p.base_position + p.scatter_direction * s;
        assert!((t.position - want).length() < 1e-4);
    }
}

#[test]
fn fade_ignores_non_finite_targets() {
    let mut fade = FadeController::new(0.05);
    assert_eq!(fade.tick(f32::NAN, DT), 1.0);
    assert_eq!(fade.tick(f32::INFINITY, DT), 1.0);
    assert_eq!(fade.tick(0.0, 1.0), 0.0);
    assert_eq!(fade.tick(f32::NAN, 1.0), 0.0);
    assert_eq!(fade.tick(1.0, 1.0), 1.0);
}
