//! World <-> local re-expression of sampled points and normals.
//!
//! Positions go through the inverse of the reference world matrix. Normals go
//! through the normal matrix of that inverse, i.e. the transpose of the
//! reference's upper 3x3, and are renormalized so non-uniform scale does not
//! skew them.

use crate::error::{Result, SceneError};
use glam::{Mat3, Mat4, Vec3};

const SINGULAR_DET: f32 = 1e-12;

fn checked_inverse(m: Mat4) -> Result<Mat4> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_DET {
        return Err(SceneError::SingularTransform(det));
    }
    Ok(m.inverse())
}

/// Map `points`/`normals` through `m`, using the normal matrix of `m` for normals.
pub fn transform_samples(points: &[Vec3], normals: &[Vec3], m: Mat4) -> (Vec<Vec3>, Vec<Vec3>) {
    let normal_matrix = Mat3::from_mat4(m).inverse().transpose();
    let points = points.iter().map(|&p| m.transform_point3(p)).collect();
    let normals = normals
        .iter()
        .map(|&n| (normal_matrix * n).try_normalize().unwrap_or(Vec3::Y))
        .collect();
    (points, normals)
}

/// Express world-space samples in the local frame of `reference_world`.
pub fn to_local(
    points: &[Vec3],
    normals: &[Vec3],
    reference_world: Mat4,
) -> Result<(Vec<Vec3>, Vec<Vec3>)> {
    let inverse = checked_inverse(reference_world)?;
    Ok(transform_samples(points, normals, inverse))
}

/// Inverse of [`to_local`].
pub fn to_world(
    points: &[Vec3],
    normals: &[Vec3],
    reference_world: Mat4,
) -> Result<(Vec<Vec3>, Vec<Vec3>)> {
    checked_inverse(reference_world)?;
    Ok(transform_samples(points, normals, reference_world))
}
