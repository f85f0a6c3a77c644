// Tuning constants and their relationships.

use scatter_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn bead_constants_are_within_reasonable_bounds() {
    assert!(PARTICLE_COUNT > 0);
    assert!(SCATTER_RADIUS > 0.0);
    assert!(BEAD_SCALE > 0.0);
    // Bias only nudges beads under the surface; it must stay well below the scatter.
    assert!(INWARD_BIAS >= 0.0 && INWARD_BIAS < SCATTER_RADIUS);
    assert!((BEAD_FORWARD.length() - 1.0).abs() < 1e-6);
    assert!(AREA_EPSILON > 0.0 && AREA_EPSILON < 1e-3);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fade_and_smoothing_time_constants() {
    assert!(FADE_DURATION_SEC >= 0.0);
    assert!((0.0..1.0).contains(&FADE_SCROLL_EPSILON));
    assert!((0.0..=1.0).contains(&BEAD_OPACITY));

    // Explode fast, settle slow
    assert!(AMBIENT_SCATTER_TAU_OUT_SEC > 0.0);
    assert!(AMBIENT_SCATTER_TAU_IN_SEC > AMBIENT_SCATTER_TAU_OUT_SEC);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn starfield_shell_surrounds_the_ambient_groups() {
    assert!(STAR_RADIUS_MIN > 0.0 && STAR_RADIUS_SPAN >= 0.0);
    assert!(STAR_SCALE_MIN > 0.0 && STAR_SCALE_SPAN >= 0.0);
    assert!(STAR_RADIUS_MIN > BOKEH_SHELL_MAX + BOKEH_SCATTER_DISTANCE);
    assert!(STAR_RADIUS_MIN > PETAL_SHELL_MAX + PETAL_SCATTER_DISTANCE);
    // Stars turn slower than the hero
    assert!(STAR_SPIN_Y < GROUP_SPIN_Y);
    assert!(STAR_WOBBLE_AMP < GROUP_WOBBLE_AMP);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ambient_ranges_are_ordered() {
    assert!(BOKEH_SHELL_MIN <= BOKEH_SHELL_MAX);
    assert!(BOKEH_HOVER_FREQ_MIN <= BOKEH_HOVER_FREQ_MAX);
    assert!(BOKEH_SCALE_MIN <= BOKEH_SCALE_MAX);
    assert!(BOKEH_TWINKLE_MIN <= BOKEH_TWINKLE_MAX && BOKEH_TWINKLE_MAX <= 1.0);
    assert!((0.0..=1.0).contains(&BOKEH_SCATTER_DIM));

    assert!(PETAL_SHELL_MIN <= PETAL_SHELL_MAX);
    assert!(PETAL_HOVER_FREQ_MIN <= PETAL_HOVER_FREQ_MAX);
    assert!(PETAL_SCALE_MIN <= PETAL_SCALE_MAX);
    assert!(PETAL_TWINKLE_MIN <= PETAL_TWINKLE_MAX && PETAL_TWINKLE_MAX <= 1.0);
    assert!((0.0..=1.0).contains(&PETAL_SCATTER_DIM));
    assert!(PETAL_SPIN_SPEED_MAX >= 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fallback_geometry_is_usable() {
    assert!(FALLBACK_SPHERE_RADIUS > 0.0);
    assert!(FALLBACK_SPHERE_SEGMENTS >= 3);
    assert!(HERO_FALLBACK_RADIUS > 0.0);
}
