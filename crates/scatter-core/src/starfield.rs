//! Background star shell: a fixed instance set on a thick spherical shell
//! whose only per-tick change is its group rotation.

use crate::constants::*;
use crate::hierarchy::{GroupSpin, TransformNode};
use crate::instances::{InstanceField, InstanceTransform};
use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldConfig {
    pub count: usize,
    pub radius_min: f32,
    pub radius_span: f32,
    pub scale_min: f32,
    pub scale_span: f32,
    pub spin: GroupSpin,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            radius_min: STAR_RADIUS_MIN,
            radius_span: STAR_RADIUS_SPAN,
            scale_min: STAR_SCALE_MIN,
            scale_span: STAR_SCALE_SPAN,
            spin: GroupSpin {
                spin_y: STAR_SPIN_Y,
                wobble_freq: STAR_WOBBLE_FREQ,
                wobble_amp: STAR_WOBBLE_AMP,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Starfield {
    field: InstanceField,
    node: TransformNode,
    spin: GroupSpin,
}

impl Starfield {
    pub fn generate<R: Rng + ?Sized>(config: &StarfieldConfig, rng: &mut R) -> Self {
        let transforms = (0..config.count)
            .map(|_| {
                let r = config.radius_min + rng.gen::<f32>() * config.radius_span;
                let theta = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
                let phi = TAU * rng.gen::<f32>();
                InstanceTransform {
                    position: Vec3::new(
                        r * theta.sin() * phi.cos(),
                        r * theta.cos(),
                        r * theta.sin() * phi.sin(),
                    ),
                    orientation: Quat::IDENTITY,
                    scale: config.scale_min + rng.gen::<f32>() * config.scale_span,
                }
            })
            .collect();
        Self {
            field: InstanceField::from_transforms(transforms),
            node: TransformNode::new(Mat4::IDENTITY),
            spin: config.spin,
        }
    }

    pub fn tick(&mut self, t_sec: f32) {
        self.node.local = Mat4::from_quat(self.spin.rotation_at(t_sec));
        self.node.update(Mat4::IDENTITY);
    }

    pub fn world(&self) -> Mat4 {
        self.node.world()
    }

    pub fn field(&self) -> &InstanceField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut InstanceField {
        &mut self.field
    }
}
