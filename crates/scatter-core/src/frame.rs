//! Per-tick pipeline: snapshot the driver, then update fade, hierarchy,
//! beads, ambient groups and the starfield, in that order. A tick never
//! blocks and never fails.

use crate::scene::SceneState;
use glam::Mat4;
use std::time::Duration;

/// Last known driver value; a missing reading means "no change".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Driver {
    last: f32,
}

impl Driver {
    pub fn value(&self) -> f32 {
        self.last
    }

    /// Take this tick's reading, clamped to [0, 1].
    pub fn snapshot(&mut self, reading: Option<f32>) -> f32 {
        match reading {
            Some(v) if v.is_finite() => self.last = v.clamp(0.0, 1.0),
            Some(v) => log::debug!("[driver] ignoring non-finite reading {v}"),
            None => {}
        }
        self.last
    }
}

/// Scroll offset normalized by viewport height; `None` if the viewport has no height.
#[inline]
pub fn scroll_driver(scroll_y: f32, viewport_height: f32) -> Option<f32> {
    (viewport_height > 0.0).then(|| (scroll_y / viewport_height).clamp(0.0, 1.0))
}

/// Scalars and group matrices for the renderer. Instance buffers are read
/// from the state's fields after the tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    pub driver: f32,
    pub hero_opacity: f32,
    pub bead_opacity: f32,
    pub hero_world: Mat4,
    pub beads_world: Mat4,
    pub stars_world: Mat4,
    pub bokeh_scatter: f32,
    pub petal_scatter: f32,
}

pub fn tick(state: &mut SceneState, reading: Option<f32>, dt: Duration) -> FrameOutput {
    let dt_sec = dt.as_secs_f32();
    state.elapsed_sec += dt.as_secs_f64();
    let t = state.elapsed_sec as f32;

    let driver = state.driver.snapshot(reading);
    let hero_opacity = state
        .fade
        .tick(state.config.fade.target.target(driver), dt_sec);

    state.rig.update(t);
    state.scatter.apply(driver, &mut state.beads);
    state.bokeh.tick(driver, t, dt_sec);
    state.petals.tick(driver, t, dt_sec);
    state.stars.tick(t);

    FrameOutput {
        driver,
        hero_opacity,
        bead_opacity: state.config.fade.bead_opacity,
        hero_world: state.rig.hero_world(),
        beads_world: state.rig.beads_world(),
        stars_world: state.stars.world(),
        bokeh_scatter: state.bokeh.scatter_amount(),
        petal_scatter: state.petals.scatter_amount(),
    }
}

impl SceneState {
    pub fn tick(&mut self, reading: Option<f32>, dt: Duration) -> FrameOutput {
        tick(self, reading, dt)
    }
}
