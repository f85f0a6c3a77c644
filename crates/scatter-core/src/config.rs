//! Static scene configuration, supplied once at construction.

use crate::ambient::AmbientConfig;
use crate::constants::*;
use crate::error::{Result, SceneError};
use crate::fade::FadeTarget;
use crate::hierarchy::GroupSpin;
use crate::starfield::StarfieldConfig;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeConfig {
    /// Seconds; 0 snaps.
    pub duration_sec: f32,
    pub target: FadeTarget,
    pub bead_opacity: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration_sec: FADE_DURATION_SEC,
            target: FadeTarget::Binary {
                epsilon: FADE_SCROLL_EPSILON,
            },
            bead_opacity: BEAD_OPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub scatter_radius: f32,
    pub bead_scale: f32,
    pub inward_bias: f32,
    pub bead_forward: Vec3,
    pub fade: FadeConfig,
    pub hero_spin: GroupSpin,
    pub starfield: StarfieldConfig,
    pub bokeh: AmbientConfig,
    pub petals: AmbientConfig,
    pub scatter_tau_out_sec: f32,
    pub scatter_tau_in_sec: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            scatter_radius: SCATTER_RADIUS,
            bead_scale: BEAD_SCALE,
            inward_bias: INWARD_BIAS,
            bead_forward: BEAD_FORWARD,
            fade: FadeConfig::default(),
            hero_spin: GroupSpin {
                spin_y: GROUP_SPIN_Y,
                wobble_freq: GROUP_WOBBLE_FREQ,
                wobble_amp: GROUP_WOBBLE_AMP,
            },
            starfield: StarfieldConfig::default(),
            bokeh: AmbientConfig::bokeh(),
            petals: AmbientConfig::petals(),
            scatter_tau_out_sec: AMBIENT_SCATTER_TAU_OUT_SEC,
            scatter_tau_in_sec: AMBIENT_SCATTER_TAU_IN_SEC,
        }
    }
}

fn check(ok: bool, what: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(SceneError::InvalidConfig(what))
    }
}

fn check_ambient(a: &AmbientConfig, what: &'static str) -> Result<()> {
    check(
        a.shell_min >= 0.0
            && a.shell_max >= a.shell_min
            && a.scale_min >= 0.0
            && a.scale_max >= a.scale_min
            && a.twinkle_min >= 0.0
            && a.twinkle_max >= a.twinkle_min
            && a.hover_freq_max >= a.hover_freq_min
            && (0.0..=1.0).contains(&a.scatter_dim),
        what,
    )
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        check(
            self.scatter_radius.is_finite() && self.scatter_radius >= 0.0,
            "scatter_radius must be >= 0",
        )?;
        check(
            self.bead_scale.is_finite() && self.bead_scale > 0.0,
            "bead_scale must be > 0",
        )?;
        check(self.inward_bias.is_finite(), "inward_bias must be finite")?;
        check(
            self.bead_forward.length_squared() > 0.0,
            "bead_forward must be non-zero",
        )?;
        check(
            self.fade.duration_sec.is_finite() && self.fade.duration_sec >= 0.0,
            "fade duration must be >= 0",
        )?;
        check(
            (0.0..=1.0).contains(&self.fade.bead_opacity),
            "bead_opacity must be in [0, 1]",
        )?;
        check(
            self.scatter_tau_out_sec > 0.0 && self.scatter_tau_in_sec > 0.0,
            "scatter time constants must be > 0",
        )?;
        check(
            self.scatter_tau_out_sec < self.scatter_tau_in_sec,
            "scatter must explode faster than it settles (tau_out < tau_in)",
        )?;
        check(
            self.starfield.radius_min >= 0.0 && self.starfield.radius_span >= 0.0,
            "starfield radii must be >= 0",
        )?;
        check_ambient(&self.bokeh, "bokeh ranges are inverted or negative")?;
        check_ambient(&self.petals, "petal ranges are inverted or negative")?;
        Ok(())
    }
}
