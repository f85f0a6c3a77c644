// World/local conversion, normal-aligned orientation and the transform hierarchy.

use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scatter_core::{
    from_normal, orientations_from_normals, random_unit_vector, to_local, to_world, GroupSpin,
    HeroRig, SceneError,
};
use std::f32::consts::PI;

fn reference() -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 0.5, 1.5),
        Quat::from_rotation_x(0.3) * Quat::from_rotation_y(-1.1) * Quat::from_rotation_z(0.7),
        Vec3::new(4.0, -2.0, 1.0),
    )
}

#[test]
fn from_normal_identity_when_aligned() {
    for f in [Vec3::Z, Vec3::X, Vec3::new(1.0, 2.0, -3.0).normalize()] {
        let q = from_normal(f, f);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6), "{q:?}");
    }
}

#[test]
fn from_normal_half_turn_when_opposite() {
    for f in [Vec3::Z, Vec3::Y, Vec3::new(-1.0, 0.5, 0.25).normalize()] {
        let q = from_normal(f, -f);
        assert!(q.is_finite());
        assert!(q.is_normalized());
        assert!((q * f + f).length() < 1e-5, "{f:?} -> {:?}", q * f);
        assert!((q.angle_between(Quat::IDENTITY) - PI).abs() < 1e-3);
        // Same input, same axis.
        assert_eq!(q, from_normal(f, -f));
    }
}

#[test]
fn from_normal_maps_forward_onto_normal() {
    let mut rng = StdRng::seed_from_u64(3);
    let normals: Vec<Vec3> = (0..500).map(|_| random_unit_vector(&mut rng)).collect();
    let quats = orientations_from_normals(Vec3::Z, &normals);
    for (q, n) in quats.iter().zip(&normals) {
        assert!(q.is_normalized());
        assert!((*q * Vec3::Z - *n).length() < 1e-4);
    }
}

#[test]
fn from_normal_zero_normal_is_identity() {
    assert_eq!(from_normal(Vec3::Z, Vec3::ZERO), Quat::IDENTITY);
    assert_eq!(from_normal(Vec3::ZERO, Vec3::X), Quat::IDENTITY);
}

#[test]
fn to_local_then_to_world_round_trips() {
    let mut rng = StdRng::seed_from_u64(11);
    let points: Vec<Vec3> = (0..64).map(|_| random_unit_vector(&mut rng) * 3.0).collect();
    let normals: Vec<Vec3> = (0..64).map(|_| random_unit_vector(&mut rng)).collect();
    let (lp, ln) = to_local(&points, &normals, reference()).unwrap();
    let (wp, wn) = to_world(&lp, &ln, reference()).unwrap();
    for (a, b) in points.iter().zip(&wp) {
        assert!((*a - *b).length() < 1e-4, "{a:?} vs {b:?}");
    }
    for (a, b) in normals.iter().zip(&wn) {
        assert!((*a - *b).length() < 1e-4, "{a:?} vs {b:?}");
    }
    for n in &ln {
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn normals_stay_perpendicular_under_non_uniform_scale() {
    // Tangent plane of a 45-degree surface; naive normal transform would skew it.
    let tangent = Vec3::new(1.0, -1.0, 0.0);
    let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
    let m = Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0));
    let (_, ln) = to_local(&[Vec3::ZERO], &[normal], m).unwrap();
    let local_tangent = m.inverse().transform_vector3(tangent);
    assert!(ln[0].dot(local_tangent).abs() < 1e-5);
}

#[test]
fn singular_reference_is_an_error() {
    let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
    let err = to_local(&[Vec3::ONE], &[Vec3::Y], flat).unwrap_err();
    assert!(matches!(err, SceneError::SingularTransform(_)));
}

#[test]
fn hero_rig_spins_from_elapsed_time_and_resets() {
    let placement = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
    let spin = GroupSpin {
        spin_y: 0.1,
        wobble_freq: 0.1,
        wobble_amp: 0.05,
    };
    let mut rig = HeroRig::new(placement, spin);
    assert!(rig.hero_world().abs_diff_eq(placement, 1e-6));

    rig.update(10.0);
    let expected = placement * Mat4::from_quat(spin.rotation_at(10.0));
    assert!(rig.hero_world().abs_diff_eq(expected, 1e-5));
    assert!(rig.beads_world().abs_diff_eq(rig.hero_world(), 1e-6));

    // Recomputed, not accumulated: revisiting a time gives the same matrix.
    rig.update(3.0);
    rig.update(10.0);
    assert!(rig.hero_world().abs_diff_eq(expected, 1e-5));

    rig.reset();
    rig.update(25.0);
    assert!(!rig.is_spinning());
    assert!(rig.hero_world().abs_diff_eq(placement, 1e-6));
    rig.resume();
    rig.update(25.0);
    assert!(!rig.hero_world().abs_diff_eq(placement, 1e-4));
}

#[test]
fn group_spin_matches_yaw_and_wobble() {
    let t = 7.0f32;
    let yaw_only = GroupSpin {
        spin_y: 0.1,
        wobble_freq: 0.0,
        wobble_amp: 0.0,
    };
    let yaw = t * 0.1;
    let x = yaw_only.rotation_at(t) * Vec3::X;
    assert!((x - Vec3::new(yaw.cos(), 0.0, -yaw.sin())).length() < 1e-5);

    let wobble_only = GroupSpin {
        spin_y: 0.0,
        wobble_freq: 0.1,
        wobble_amp: 0.05,
    };
    let pitch = (t * 0.1).sin() * 0.05;
    let y = wobble_only.rotation_at(t) * Vec3::Y;
    assert!((y - Vec3::new(0.0, pitch.cos(), pitch.sin())).length() < 1e-5);

    assert_eq!(GroupSpin::NONE.rotation_at(t), Quat::IDENTITY);
}
