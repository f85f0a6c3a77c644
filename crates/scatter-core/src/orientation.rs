use glam::{Quat, Vec3};
use std::f32::consts::PI;

// Dot products beyond these count as parallel / antiparallel.
const PARALLEL_EPS: f32 = 1e-6;

/// Minimal rotation taking `forward` onto `normal`.
///
/// Identity when they already agree (or `normal` has no length). For exactly
/// opposite vectors the half turn is about `forward.any_orthonormal_vector()`,
/// so the same input always yields the same rotation.
pub fn from_normal(forward: Vec3, normal: Vec3) -> Quat {
    let (Some(f), Some(n)) = (forward.try_normalize(), normal.try_normalize()) else {
        return Quat::IDENTITY;
    };
    let dot = f.dot(n);
    if dot >= 1.0 - PARALLEL_EPS {
        return Quat::IDENTITY;
    }
    if dot <= -1.0 + PARALLEL_EPS {
        return Quat::from_axis_angle(f.any_orthonormal_vector(), PI);
    }
    let axis = f.cross(n);
    Quat::from_xyzw(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
}

pub fn orientations_from_normals(forward: Vec3, normals: &[Vec3]) -> Vec<Quat> {
    normals.iter().map(|&n| from_normal(forward, n)).collect()
}
