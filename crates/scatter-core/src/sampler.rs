//! Area-weighted surface sampling across one or more meshes.
//!
//! Samples are split between meshes in proportion to their world-space
//! area, then placed on triangles chosen by area with a uniform barycentric
//! draw. The output always holds exactly `count` rows; anything the quotas
//! leave unwritten is padded with [`SurfaceSample::FALLBACK`].

use crate::constants::AREA_EPSILON;
use crate::mesh::{face_normal, triangle_area, Mesh};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    pub position: Vec3,
    /// Unit length, outward per the source triangle winding.
    pub normal: Vec3,
}

impl SurfaceSample {
    pub const FALLBACK: Self = Self {
        position: Vec3::ZERO,
        normal: Vec3::Y,
    };
}

pub type Quotas = SmallVec<[usize; 8]>;

#[derive(Clone, Debug, Default)]
pub struct SampleSet {
    pub samples: Vec<SurfaceSample>,
    /// Samples actually drawn from each input mesh, in input order.
    pub quotas: Quotas,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Rows drawn from meshes; the rest are fallback padding.
    pub fn written(&self) -> usize {
        self.quotas.iter().sum()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn normals(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.normal).collect()
    }
}

/// Per-mesh quota: `round(count * area / total)`, at least 1 for any mesh
/// with a positive area, never letting the running total pass `count`.
/// Meshes with `area <= 0` (nothing to sample) get 0.
pub fn allocate_quotas(areas: &[f32], count: usize) -> Quotas {
    let total: f32 = areas.iter().filter(|&&a| a > 0.0).sum();
    let mut remaining = count;
    areas
        .iter()
        .map(|&area| {
            if area <= 0.0 || total <= 0.0 {
                return 0;
            }
            let share = ((count as f32) * (area / total)).round() as usize;
            let quota = share.max(1).min(remaining);
            remaining -= quota;
            quota
        })
        .collect()
}

/// One mesh baked into world space with a cumulative triangle-area table.
struct MeshDistribution {
    mesh: Mesh,
    cumulative: Vec<f32>,
}

impl MeshDistribution {
    fn build(source: &Mesh, index: usize) -> Option<Self> {
        if let Err(e) = source.validate() {
            log::warn!("[sampler] mesh {index} skipped: {e}");
            return None;
        }
        if source.triangle_count() == 0 {
            log::warn!("[sampler] mesh {index} has no triangles; skipped");
            return None;
        }
        let mesh = source.baked();
        let mut running = 0.0f32;
        let cumulative = mesh
            .triangles()
            .map(|[a, b, c]| {
                running += triangle_area(mesh.positions[a], mesh.positions[b], mesh.positions[c]);
                running
            })
            .collect();
        Some(Self { mesh, cumulative })
    }

    fn area(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn pick_triangle<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let n = self.cumulative.len();
        let total = self.area();
        if total > 0.0 {
            let r = rng.gen::<f32>() * total;
            self.cumulative.partition_point(|&c| c <= r).min(n - 1)
        } else {
            rng.gen_range(0..n)
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SurfaceSample {
        let [ia, ib, ic] = self.mesh.triangle(self.pick_triangle(rng));
        let (a, b, c) = (
            self.mesh.positions[ia],
            self.mesh.positions[ib],
            self.mesh.positions[ic],
        );
        let s = rng.gen::<f32>().sqrt();
        let r2 = rng.gen::<f32>();
        let (u, v, w) = (1.0 - s, s * (1.0 - r2), s * r2);
        let position = a * u + b * v + c * w;

        let face = face_normal(a, b, c);
        let normal = match &self.mesh.normals {
            Some(ns) if ns.len() == self.mesh.positions.len() => {
                (ns[ia] * u + ns[ib] * v + ns[ic] * w)
                    .try_normalize()
                    .unwrap_or(face)
            }
            _ => face,
        };
        SurfaceSample { position, normal }
    }
}

/// Reusable sampler over a fixed set of meshes.
pub struct AreaWeightedSampler {
    distributions: Vec<Option<MeshDistribution>>,
}

impl AreaWeightedSampler {
    pub fn new(meshes: &[Mesh]) -> Self {
        Self {
            distributions: meshes
                .iter()
                .enumerate()
                .map(|(i, m)| MeshDistribution::build(m, i))
                .collect(),
        }
    }

    /// World-space area per mesh. Skipped meshes report 0; degenerate ones
    /// report [`AREA_EPSILON`] so they still get their one sample.
    pub fn areas(&self) -> Vec<f32> {
        self.distributions
            .iter()
            .map(|d| d.as_ref().map_or(0.0, |d| d.area().max(AREA_EPSILON)))
            .collect()
    }

    pub fn quotas(&self, count: usize) -> Quotas {
        allocate_quotas(&self.areas(), count)
    }

    pub fn sample<R: Rng + ?Sized>(&self, count: usize, inward_bias: f32, rng: &mut R) -> SampleSet {
        let quotas = self.quotas(count);
        let mut samples = Vec::with_capacity(count);
        for (dist, &quota) in self.distributions.iter().zip(quotas.iter()) {
            let Some(dist) = dist else { continue };
            for _ in 0..quota {
                let mut s = dist.sample(rng);
                s.position -= s.normal * inward_bias;
                samples.push(s);
            }
        }
        let written = samples.len();
        if written < count && !self.distributions.is_empty() {
            log::warn!(
                "[sampler] padded {} of {} samples with fallback rows",
                count - written,
                count
            );
        }
        samples.resize(count, SurfaceSample::FALLBACK);
        log::debug!(
            "[sampler] meshes={} count={} quotas={:?}",
            self.distributions.len(),
            count,
            quotas.as_slice()
        );
        SampleSet { samples, quotas }
    }
}

/// One-shot convenience over [`AreaWeightedSampler`].
pub fn sample<R: Rng + ?Sized>(
    meshes: &[Mesh],
    count: usize,
    inward_bias: f32,
    rng: &mut R,
) -> SampleSet {
    AreaWeightedSampler::new(meshes).sample(count, inward_bias, rng)
}
