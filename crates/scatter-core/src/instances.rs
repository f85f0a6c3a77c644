//! Per-instance rigid-body transforms and the renderer-facing buffer baked
//! from them.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl InstanceTransform {
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.orientation,
            self.position,
        )
    }
}

/// Column-major model matrix, laid out for a per-instance vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&InstanceTransform> for InstanceRaw {
    fn from(t: &InstanceTransform) -> Self {
        Self {
            model: t.matrix().to_cols_array_2d(),
        }
    }
}

/// N transforms, written individually during a tick and baked in bulk by
/// [`InstanceField::flush`]. The renderer only reads the baked buffer.
#[derive(Clone, Debug, Default)]
pub struct InstanceField {
    transforms: Vec<InstanceTransform>,
    raw: Vec<InstanceRaw>,
    dirty: bool,
}

impl InstanceField {
    pub fn new(count: usize) -> Self {
        Self::from_transforms(vec![InstanceTransform::default(); count])
    }

    /// Starts dirty so the first upload happens without a tick.
    pub fn from_transforms(transforms: Vec<InstanceTransform>) -> Self {
        let mut field = Self {
            raw: Vec::with_capacity(transforms.len()),
            transforms,
            dirty: false,
        };
        field.flush();
        field
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    /// Out-of-range indices are ignored.
    #[inline]
    pub fn write_transform(&mut self, i: usize, position: Vec3, orientation: Quat, scale: f32) {
        if let Some(t) = self.transforms.get_mut(i) {
            *t = InstanceTransform {
                position,
                orientation,
                scale,
            };
        }
    }

    /// Bake every transform into the instance buffer and mark it dirty.
    pub fn flush(&mut self) {
        self.raw.clear();
        self.raw.extend(self.transforms.iter().map(InstanceRaw::from));
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The baked buffer if it changed since the last call.
    pub fn take_dirty(&mut self) -> Option<&[InstanceRaw]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(&self.raw)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.raw)
    }

    /// Baked matrices flattened to `16 * len` floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.raw)
    }
}
