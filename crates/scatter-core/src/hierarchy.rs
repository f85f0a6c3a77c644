//! Explicit parent/child transforms for the hero, its attached beads and the
//! background groups. Every world matrix is recomputed top-down once per tick
//! from elapsed time, so nothing drifts and there are no dirty flags.

use glam::{Mat4, Quat};

/// Slow yaw plus a small pitch wobble, both functions of elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSpin {
    pub spin_y: f32,
    pub wobble_freq: f32,
    pub wobble_amp: f32,
}

impl GroupSpin {
    pub const NONE: Self = Self {
        spin_y: 0.0,
        wobble_freq: 0.0,
        wobble_amp: 0.0,
    };

    /// Pitch applied outside yaw (`Rx * Ry`).
    #[inline]
    pub fn rotation_at(&self, t_sec: f32) -> Quat {
        let pitch = (t_sec * self.wobble_freq).sin() * self.wobble_amp;
        Quat::from_rotation_x(pitch) * Quat::from_rotation_y(t_sec * self.spin_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformNode {
    pub local: Mat4,
    world: Mat4,
}

impl TransformNode {
    pub fn new(local: Mat4) -> Self {
        Self {
            local,
            world: local,
        }
    }

    pub fn world(&self) -> Mat4 {
        self.world
    }

    #[inline]
    pub fn update(&mut self, parent_world: Mat4) {
        self.world = parent_world * self.local;
    }
}

/// scene root -> placement -> spinning hero group -> attached beads.
#[derive(Clone, Copy, Debug)]
pub struct HeroRig {
    placement: TransformNode,
    group: TransformNode,
    beads: TransformNode,
    spin: GroupSpin,
    spinning: bool,
}

impl HeroRig {
    pub fn new(placement: Mat4, spin: GroupSpin) -> Self {
        let mut rig = Self {
            placement: TransformNode::new(placement),
            group: TransformNode::new(Mat4::IDENTITY),
            beads: TransformNode::new(Mat4::IDENTITY),
            spin,
            spinning: true,
        };
        rig.update(0.0);
        rig
    }

    pub fn update(&mut self, t_sec: f32) {
        self.placement.update(Mat4::IDENTITY);
        self.group.local = if self.spinning {
            Mat4::from_quat(self.spin.rotation_at(t_sec))
        } else {
            Mat4::IDENTITY
        };
        self.group.update(self.placement.world());
        self.beads.update(self.group.world());
    }

    /// Park the group at identity rotation until [`HeroRig::resume`].
    pub fn reset(&mut self) {
        self.spinning = false;
    }

    pub fn resume(&mut self) {
        self.spinning = true;
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn hero_world(&self) -> Mat4 {
        self.group.world()
    }

    pub fn beads_world(&self) -> Mat4 {
        self.beads.world()
    }
}
