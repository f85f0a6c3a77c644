//! Triangle meshes handed to the core by the asset loader.
//!
//! A [`Mesh`] is a plain, read-only triangle list: positions, optional
//! per-vertex normals, optional indices and the world transform the loader
//! resolved for it. Indexed and sequential (every three positions form a
//! triangle) layouts are both supported.

use crate::constants::{FALLBACK_SPHERE_RADIUS, FALLBACK_SPHERE_SEGMENTS};
use crate::error::{Result, SceneError};
use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::PI;

#[derive(Clone, Debug)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
    pub indices: Option<Vec<u32>>,
    pub world: Mat4,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            normals: None,
            indices: None,
            world: Mat4::IDENTITY,
        }
    }
}

impl Mesh {
    /// Sequential triangle list in its own (identity) world frame.
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
            ..Self::default()
        }
    }

    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Build from the flat `xyz` buffers a loader typically hands over.
    pub fn from_flat(positions: &[f32], indices: Option<&[u32]>, world: Mat4) -> Result<Self> {
        if positions.is_empty() {
            return Err(SceneError::MissingPositions);
        }
        if positions.len() % 3 != 0 {
            return Err(SceneError::RaggedPositions(positions.len()));
        }
        let mesh = Self {
            positions: positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]))
                .collect(),
            normals: None,
            indices: indices.map(|i| i.to_vec()),
            world,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks the position attribute exists and every index is in range.
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(SceneError::MissingPositions);
        }
        if let Some(indices) = &self.indices {
            let vertex_count = self.positions.len();
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(SceneError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Vertex indices of triangle `t`. Callers must have validated the mesh.
    #[inline]
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        match &self.indices {
            Some(idx) => [
                idx[3 * t] as usize,
                idx[3 * t + 1] as usize,
                idx[3 * t + 2] as usize,
            ],
            None => [3 * t, 3 * t + 1, 3 * t + 2],
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (0..self.triangle_count()).map(move |t| self.triangle(t))
    }

    /// Surface area in the mesh's own coordinates; 0 for a mesh that fails [`Mesh::validate`].
    pub fn area(&self) -> f32 {
        if self.validate().is_err() {
            return 0.0;
        }
        self.triangles()
            .map(|[a, b, c]| triangle_area(self.positions[a], self.positions[b], self.positions[c]))
            .sum()
    }

    /// Copy with `world` applied to positions and normals; the copy's world is identity.
    pub fn baked(&self) -> Mesh {
        let positions = self
            .positions
            .iter()
            .map(|&p| self.world.transform_point3(p))
            .collect();
        let linear = Mat3::from_mat4(self.world);
        let normals = if linear.determinant().abs() > f32::EPSILON {
            let normal_matrix = linear.inverse().transpose();
            self.normals.as_ref().map(|ns| {
                ns.iter()
                    .map(|&n| (normal_matrix * n).normalize_or_zero())
                    .collect()
            })
        } else {
            // Flattened transform: vertex normals are meaningless, face normals take over.
            None
        };
        Mesh {
            positions,
            normals,
            indices: self.indices.clone(),
            world: Mat4::IDENTITY,
        }
    }

    /// Area-weighted vertex normals from the triangle winding.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for [a, b, c] in self.triangles() {
            if a.max(b).max(c) >= self.positions.len() {
                continue;
            }
            let face = face_cross(self.positions[a], self.positions[b], self.positions[c]);
            acc[a] += face;
            acc[b] += face;
            acc[c] += face;
        }
        self.normals = Some(
            acc.into_iter()
                .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
                .collect(),
        );
    }

    /// Latitude/longitude sphere with outward normals.
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
        let w = width_segments.max(3);
        let h = height_segments.max(2);
        let mut positions = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
        let mut normals = Vec::with_capacity(positions.capacity());
        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let n = Vec3::new(
                    -(u * 2.0 * PI).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * 2.0 * PI).sin() * (v * PI).sin(),
                );
                positions.push(n * radius);
                normals.push(n.try_normalize().unwrap_or(Vec3::Y));
            }
        }
        let row = w + 1;
        let mut indices = Vec::with_capacity((w * h * 6) as usize);
        for iy in 0..h {
            for ix in 0..w {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // Pole rows collapse to a single triangle per segment.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        Mesh::indexed(positions, indices).with_normals(normals)
    }

    /// Small sphere standing in for a bead or hero asset that failed to load.
    pub fn fallback_sphere() -> Mesh {
        Mesh::uv_sphere(
            FALLBACK_SPHERE_RADIUS,
            FALLBACK_SPHERE_SEGMENTS,
            FALLBACK_SPHERE_SEGMENTS,
        )
    }
}

/// Either the loaded mesh or the fallback sphere, with normals guaranteed.
pub fn mesh_or_fallback(loaded: std::result::Result<Mesh, SceneError>, label: &str) -> Mesh {
    let mut mesh = match loaded.and_then(|m| m.validate().map(|_| m)) {
        Ok(m) => m,
        Err(e) => {
            log::warn!("[mesh] {label}: {e}; using fallback sphere");
            Mesh::fallback_sphere()
        }
    };
    if mesh.normals.is_none() {
        mesh.compute_vertex_normals();
    }
    mesh
}

#[inline]
fn face_cross(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

#[inline]
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    face_cross(a, b, c).length() * 0.5
}

#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    face_cross(a, b, c).try_normalize().unwrap_or(Vec3::Y)
}
