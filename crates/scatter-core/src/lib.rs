//! Platform-free core of the scatterfield scene: surface sampling, instance
//! transforms and the per-frame update driven by the scroll scalar.

pub mod ambient;
pub mod config;
pub mod constants;
pub mod error;
pub mod fade;
pub mod frame;
pub mod hierarchy;
pub mod instances;
pub mod mesh;
pub mod orientation;
pub mod sampler;
pub mod scatter;
pub mod scene;
pub mod space;
pub mod starfield;

pub use ambient::{AmbientConfig, AmbientField, AmbientParticle, ScatterSmoother};
pub use config::{FadeConfig, SceneConfig};
pub use constants::*;
pub use error::SceneError;
pub use fade::{smoothstep, FadeController, FadeTarget};
pub use frame::{scroll_driver, tick, Driver, FrameOutput};
pub use hierarchy::{GroupSpin, HeroRig, TransformNode};
pub use instances::{InstanceField, InstanceRaw, InstanceTransform};
pub use mesh::{mesh_or_fallback, Mesh};
pub use orientation::{from_normal, orientations_from_normals};
pub use sampler::{allocate_quotas, sample, AreaWeightedSampler, SampleSet, SurfaceSample};
pub use scatter::{random_unit_vector, ScatterDriver, ScatterState};
pub use scene::{build_scene, SceneAssets, SceneState};
pub use space::{to_local, to_world};
pub use starfield::{Starfield, StarfieldConfig};
