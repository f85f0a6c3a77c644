#![cfg(target_arch = "wasm32")]
//! Browser front-end. Geometry comes in from the JS loader as flat arrays,
//! the scroll position drives the scene, and baked instance matrices go back
//! out to whatever renderer the page uses.

mod dom;

use anyhow::Context;
use dom::PendingReading;
use glam::{Mat4, Vec3};
use instant::Instant;
use js_sys::Float32Array;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scatter_core::{
    build_scene, FadeTarget, FrameOutput, InstanceField, Mesh, SceneAssets, SceneConfig,
    SceneState,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scatter-web starting");
    Ok(())
}

fn mat4_from_slice(m: &[f32], what: &str) -> Mat4 {
    if m.len() == 16 {
        Mat4::from_cols_slice(m)
    } else {
        if !m.is_empty() {
            log::warn!("[loader] {what}: expected 16 floats, got {}; using identity", m.len());
        }
        Mat4::IDENTITY
    }
}

fn mesh_from_js(
    what: &str,
    positions: &[f32],
    normals: Option<Vec<f32>>,
    indices: Option<Vec<u32>>,
    world: &[f32],
) -> Option<Mesh> {
    let world = mat4_from_slice(world, what);
    match Mesh::from_flat(positions, indices.as_deref(), world) {
        Ok(mut mesh) => {
            if let Some(n) = normals {
                if n.len() == positions.len() {
                    mesh = mesh.with_normals(
                        n.chunks_exact(3)
                            .map(|c| Vec3::new(c[0], c[1], c[2]))
                            .collect(),
                    );
                } else {
                    log::warn!("[loader] {what}: normal count mismatch; computing from faces");
                }
            }
            Some(mesh)
        }
        Err(e) => {
            log::warn!("[loader] {what}: {e}; skipped");
            None
        }
    }
}

#[inline]
fn floats(field: &InstanceField) -> Float32Array {
    Float32Array::from(field.as_floats())
}

#[inline]
fn take_floats(field: &mut InstanceField) -> Option<Float32Array> {
    field
        .take_dirty()
        .map(|raw| Float32Array::from(bytemuck::cast_slice::<_, f32>(raw)))
}

/// Scene handle owned by the page. Call the `add_*`/`set_*` methods while
/// assets load, then `build`, then `frame` once per animation frame.
#[wasm_bindgen]
pub struct ScatterScene {
    assets: SceneAssets,
    config: SceneConfig,
    state: Option<SceneState>,
    pending: PendingReading,
    listening: bool,
    last_frame: Option<Instant>,
    last: Option<FrameOutput>,
}

impl Default for ScatterScene {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ScatterScene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ScatterScene {
        ScatterScene {
            assets: SceneAssets::default(),
            config: SceneConfig::default(),
            state: None,
            pending: Rc::new(Cell::new(None)),
            listening: false,
            last_frame: None,
            last: None,
        }
    }

    pub fn add_hero_mesh(
        &mut self,
        positions: &[f32],
        normals: Option<Vec<f32>>,
        indices: Option<Vec<u32>>,
        world: &[f32],
    ) {
        if let Some(mesh) = mesh_from_js("hero", positions, normals, indices, world) {
            self.assets.hero.push(mesh);
        }
    }

    pub fn add_track_mesh(
        &mut self,
        positions: &[f32],
        normals: Option<Vec<f32>>,
        indices: Option<Vec<u32>>,
        world: &[f32],
    ) {
        if let Some(mesh) = mesh_from_js("track", positions, normals, indices, world) {
            self.assets.track.push(mesh);
        }
    }

    /// A rejected bead mesh leaves the slot empty; `build` substitutes a small sphere.
    pub fn set_bead_mesh(
        &mut self,
        positions: &[f32],
        normals: Option<Vec<f32>>,
        indices: Option<Vec<u32>>,
    ) {
        self.assets.bead = mesh_from_js("bead", positions, normals, indices, &[]);
    }

    pub fn set_placement(&mut self, world: &[f32]) {
        self.assets.placement = Some(mat4_from_slice(world, "placement"));
    }

    pub fn set_particle_count(&mut self, count: u32) {
        self.config.particle_count = count as usize;
    }

    pub fn set_scatter_radius(&mut self, radius: f32) {
        self.config.scatter_radius = radius;
    }

    pub fn set_bead_scale(&mut self, scale: f32) {
        self.config.bead_scale = scale;
    }

    pub fn set_inward_bias(&mut self, bias: f32) {
        self.config.inward_bias = bias;
    }

    pub fn set_fade_duration(&mut self, seconds: f32) {
        self.config.fade.duration_sec = seconds;
    }

    /// Opacity tracks `1 - driver` instead of switching off once scrolled.
    pub fn set_continuous_fade(&mut self, continuous: bool) {
        self.config.fade.target = if continuous {
            FadeTarget::Continuous
        } else {
            FadeTarget::Binary {
                epsilon: scatter_core::FADE_SCROLL_EPSILON,
            }
        };
    }

    /// Sample the surfaces and allocate every instance set. Geometry is
    /// consumed; a second call rebuilds from the fallbacks only.
    pub fn build(&mut self, seed: Option<u32>) -> Result<(), JsValue> {
        self.try_build(seed)
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Drive from the window's scroll position.
    pub fn listen_to_scroll(&mut self) {
        if !self.listening {
            dom::install_scroll_listener(self.pending.clone());
            self.listening = true;
        }
    }

    /// Drive manually (e.g. from a scroll library); overrides any pending scroll reading.
    pub fn set_driver(&mut self, value: f32) {
        self.pending.set(Some(value));
    }

    /// Advance one tick using wall-clock time since the previous call.
    pub fn frame(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|t| now.duration_since(t))
            .unwrap_or_default();
        self.last_frame = Some(now);
        self.last = Some(state.tick(self.pending.take(), dt));
    }

    /// Park the hero and bead group at its placement until `resume_spin`.
    pub fn reset_spin(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.rig.reset();
        }
    }

    pub fn resume_spin(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.rig.resume();
        }
    }

    pub fn is_built(&self) -> bool {
        self.state.is_some()
    }

    pub fn driver(&self) -> f32 {
        self.last.map(|o| o.driver).unwrap_or(0.0)
    }

    pub fn hero_opacity(&self) -> f32 {
        self.last.map(|o| o.hero_opacity).unwrap_or(1.0)
    }

    pub fn bead_opacity(&self) -> f32 {
        self.last
            .map(|o| o.bead_opacity)
            .unwrap_or(self.config.fade.bead_opacity)
    }

    pub fn bokeh_scatter(&self) -> f32 {
        self.last.map(|o| o.bokeh_scatter).unwrap_or(0.0)
    }

    pub fn petal_scatter(&self) -> f32 {
        self.last.map(|o| o.petal_scatter).unwrap_or(0.0)
    }

    pub fn hero_world(&self) -> Float32Array {
        self.world(|o| o.hero_world)
    }

    pub fn beads_world(&self) -> Float32Array {
        self.world(|o| o.beads_world)
    }

    pub fn stars_world(&self) -> Float32Array {
        self.world(|o| o.stars_world)
    }

    pub fn bead_count(&self) -> u32 {
        self.state.as_ref().map(|s| s.beads.len() as u32).unwrap_or(0)
    }

    /// All bead matrices, 16 floats each, column-major.
    pub fn bead_matrices(&self) -> Option<Float32Array> {
        self.state.as_ref().map(|s| floats(&s.beads))
    }

    /// Bead matrices only if they changed since the last take.
    pub fn take_bead_matrices(&mut self) -> Option<Float32Array> {
        self.state.as_mut().and_then(|s| take_floats(&mut s.beads))
    }

    pub fn take_bokeh_matrices(&mut self) -> Option<Float32Array> {
        self.state
            .as_mut()
            .and_then(|s| take_floats(s.bokeh.field_mut()))
    }

    pub fn take_petal_matrices(&mut self) -> Option<Float32Array> {
        self.state
            .as_mut()
            .and_then(|s| take_floats(s.petals.field_mut()))
    }

    pub fn take_star_matrices(&mut self) -> Option<Float32Array> {
        self.state
            .as_mut()
            .and_then(|s| take_floats(s.stars.field_mut()))
    }

    pub fn bokeh_opacities(&self) -> Option<Float32Array> {
        self.state
            .as_ref()
            .map(|s| Float32Array::from(s.bokeh.opacities()))
    }

    pub fn petal_opacities(&self) -> Option<Float32Array> {
        self.state
            .as_ref()
            .map(|s| Float32Array::from(s.petals.opacities()))
    }

    /// Flattened bead geometry, so the page can render the fallback sphere too.
    pub fn bead_mesh_positions(&self) -> Option<Float32Array> {
        self.state
            .as_ref()
            .map(|s| Float32Array::from(bytemuck::cast_slice::<Vec3, f32>(&s.bead_mesh.positions)))
    }

    pub fn bead_mesh_normals(&self) -> Option<Float32Array> {
        let normals = self.state.as_ref()?.bead_mesh.normals.as_ref()?;
        Some(Float32Array::from(bytemuck::cast_slice::<Vec3, f32>(normals)))
    }

    pub fn bead_mesh_indices(&self) -> Option<Vec<u32>> {
        self.state.as_ref()?.bead_mesh.indices.clone()
    }
}

impl ScatterScene {
    fn try_build(&mut self, seed: Option<u32>) -> anyhow::Result<()> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s as u64),
            None => StdRng::from_entropy(),
        };
        let assets = std::mem::take(&mut self.assets);
        let state = build_scene(assets, self.config.clone(), &mut rng)
            .context("building scatter scene")?;
        log::info!(
            "[scene] built: beads={} bokeh={} petals={} stars={}",
            state.beads.len(),
            state.bokeh.particles().len(),
            state.petals.particles().len(),
            state.stars.field().len()
        );
        self.state = Some(state);
        self.last_frame = None;
        self.last = None;
        Ok(())
    }

    fn world(&self, pick: impl Fn(&FrameOutput) -> Mat4) -> Float32Array {
        let m = self.last.as_ref().map(pick).unwrap_or(Mat4::IDENTITY);
        Float32Array::from(&m.to_cols_array()[..])
    }
}
