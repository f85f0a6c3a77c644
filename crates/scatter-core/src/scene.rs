//! One-time build phase: sample the hero (or its track), re-express the
//! samples in the hero group's frame, and assemble every per-frame dataset.
//!
//! A [`SceneState`] only exists once the build returns, so nothing can be
//! ticked half-built and an aborted build leaves nothing to tear down.

use crate::ambient::AmbientField;
use crate::config::SceneConfig;
use crate::constants::HERO_FALLBACK_RADIUS;
use crate::error::{Result, SceneError};
use crate::fade::FadeController;
use crate::frame::Driver;
use crate::hierarchy::HeroRig;
use crate::instances::InstanceField;
use crate::mesh::{mesh_or_fallback, Mesh};
use crate::orientation::orientations_from_normals;
use crate::sampler::{AreaWeightedSampler, Quotas};
use crate::scatter::{ScatterDriver, ScatterState};
use crate::space::to_local;
use crate::starfield::Starfield;
use glam::Mat4;
use rand::Rng;

/// Geometry handed over by the loader.
#[derive(Clone, Debug, Default)]
pub struct SceneAssets {
    /// Meshes making up the hero, each with its own world transform.
    pub hero: Vec<Mesh>,
    /// Optional static meshes to sample beads from instead of the hero.
    pub track: Vec<Mesh>,
    /// Bead geometry; `None` if the asset failed to load.
    pub bead: Option<Mesh>,
    /// Placement of the hero group in the scene.
    pub placement: Option<Mat4>,
}

pub struct SceneState {
    pub config: SceneConfig,
    pub driver: Driver,
    pub fade: FadeController,
    pub rig: HeroRig,
    pub scatter: ScatterDriver,
    pub beads: InstanceField,
    pub bead_mesh: Mesh,
    pub bokeh: AmbientField,
    pub petals: AmbientField,
    pub stars: Starfield,
    pub quotas: Quotas,
    pub elapsed_sec: f64,
}

pub fn build_scene<R: Rng + ?Sized>(
    assets: SceneAssets,
    config: SceneConfig,
    rng: &mut R,
) -> Result<SceneState> {
    config.validate()?;

    let rig = HeroRig::new(assets.placement.unwrap_or(Mat4::IDENTITY), config.hero_spin);

    let hero = if assets.hero.is_empty() {
        log::warn!("[scene] no hero meshes; sampling a fallback sphere");
        vec![Mesh::uv_sphere(HERO_FALLBACK_RADIUS, 32, 16)]
    } else {
        assets.hero
    };
    let source: &[Mesh] = if assets.track.is_empty() {
        &hero
    } else {
        &assets.track
    };

    let samples =
        AreaWeightedSampler::new(source).sample(config.particle_count, config.inward_bias, rng);
    let world_points = samples.positions();
    let world_normals = samples.normals();
    let local = to_local(&world_points, &world_normals, rig.beads_world());
    let (points, normals) = match local {
        Ok(local) => local,
        Err(e) => {
            log::warn!("[scene] {e}; beads stay in world space");
            (world_points, world_normals)
        }
    };
    let orientations = orientations_from_normals(config.bead_forward, &normals);
    let directions = ScatterState::random(points.len(), config.scatter_radius, rng);
    let scatter = ScatterDriver::new(points, orientations, directions, config.bead_scale);
    let beads = scatter.build_field();

    let bead_mesh = mesh_or_fallback(assets.bead.ok_or(SceneError::MissingPositions), "bead");

    let bokeh = AmbientField::spawn(
        config.bokeh,
        config.scatter_tau_out_sec,
        config.scatter_tau_in_sec,
        rng,
    );
    let petals = AmbientField::spawn(
        config.petals,
        config.scatter_tau_out_sec,
        config.scatter_tau_in_sec,
        rng,
    );
    let stars = Starfield::generate(&config.starfield, rng);

    log::info!(
        "[scene] beads={} sampled={} quotas={:?} bokeh={} petals={} stars={}",
        beads.len(),
        samples.written(),
        samples.quotas.as_slice(),
        bokeh.particles().len(),
        petals.particles().len(),
        stars.field().len()
    );

    Ok(SceneState {
        driver: Driver::default(),
        fade: FadeController::new(config.fade.duration_sec),
        rig,
        scatter,
        beads,
        bead_mesh,
        bokeh,
        petals,
        stars,
        quotas: samples.quotas,
        elapsed_sec: 0.0,
        config,
    })
}
