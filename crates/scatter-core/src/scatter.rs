//! Linear scatter of surface-anchored instances along fixed random directions.
//!
//! `position[i] = base[i] + direction[i] * driver`, with no easing, so the
//! beads track the scroll driver exactly and return to their anchors at 0.

use crate::instances::InstanceField;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z = rng.gen_range(-1.0f32..=1.0);
    let phi = rng.gen::<f32>() * TAU;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Per-instance scatter directions, already scaled by the scatter radius.
/// Generated once and never mutated.
#[derive(Clone, Debug, Default)]
pub struct ScatterState {
    directions: Vec<Vec3>,
}

impl ScatterState {
    pub fn random<R: Rng + ?Sized>(count: usize, radius: f32, rng: &mut R) -> Self {
        Self {
            directions: (0..count)
                .map(|_| random_unit_vector(rng) * radius)
                .collect(),
        }
    }

    pub fn from_directions(directions: Vec<Vec3>) -> Self {
        Self { directions }
    }

    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

/// Static bead dataset: anchors, orientations and scatter directions share
/// one index space.
#[derive(Clone, Debug)]
pub struct ScatterDriver {
    base_positions: Vec<Vec3>,
    orientations: Vec<Quat>,
    state: ScatterState,
    scale: f32,
}

impl ScatterDriver {
    pub fn new(
        mut base_positions: Vec<Vec3>,
        mut orientations: Vec<Quat>,
        state: ScatterState,
        scale: f32,
    ) -> Self {
        let n = base_positions.len().min(orientations.len()).min(state.len());
        if n != base_positions.len() || n != orientations.len() || n != state.len() {
            log::warn!(
                "[scatter] mismatched lengths (base={} orient={} dirs={}); truncating to {}",
                base_positions.len(),
                orientations.len(),
                state.len(),
                n
            );
        }
        base_positions.truncate(n);
        orientations.truncate(n);
        let state = ScatterState::from_directions(state.directions[..n].to_vec());
        Self {
            base_positions,
            orientations,
            state,
            scale,
        }
    }

    pub fn len(&self) -> usize {
        self.base_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }

    pub fn base_positions(&self) -> &[Vec3] {
        &self.base_positions
    }

    pub fn orientations(&self) -> &[Quat] {
        &self.orientations
    }

    pub fn state(&self) -> &ScatterState {
        &self.state
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn position(&self, i: usize, driver: f32) -> Vec3 {
        self.base_positions[i] + self.state.directions[i] * driver
    }

    /// Field at rest (driver = 0), ready for the first upload.
    pub fn build_field(&self) -> InstanceField {
        let mut field = InstanceField::new(self.len());
        self.apply(0.0, &mut field);
        field
    }

    /// Write every instance for `driver` and flush the field.
    pub fn apply(&self, driver: f32, field: &mut InstanceField) {
        for i in 0..self.len() {
            field.write_transform(i, self.position(i, driver), self.orientations[i], self.scale);
        }
        field.flush();
    }
}
