//! Decorative particle sets (bokeh, petals) that orbit, hover, twinkle and
//! spin around the hero and blow outward with the scroll driver.
//!
//! Orbit and spin integrate every tick; hover and twinkle are pure functions
//! of elapsed time. The scatter amount chases the driver with asymmetric
//! exponential smoothing: fast on the way out, slow on the way back.

use crate::constants::*;
use crate::instances::InstanceField;
use crate::scatter::random_unit_vector;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientConfig {
    pub count: usize,
    pub shell_min: f32,
    pub shell_max: f32,
    pub orbit_speed_max: f32,
    pub hover_amp_max: f32,
    pub hover_freq_min: f32,
    pub hover_freq_max: f32,
    pub scatter_distance: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub twinkle_min: f32,
    pub twinkle_max: f32,
    pub twinkle_speed_max: f32,
    /// Fraction of opacity/scale lost at full scatter.
    pub scatter_dim: f32,
    /// 0 disables spin.
    pub spin_speed_max: f32,
}

impl AmbientConfig {
    pub fn bokeh() -> Self {
        Self {
            count: BOKEH_COUNT,
            shell_min: BOKEH_SHELL_MIN,
            shell_max: BOKEH_SHELL_MAX,
            orbit_speed_max: BOKEH_ORBIT_SPEED_MAX,
            hover_amp_max: BOKEH_HOVER_AMP_MAX,
            hover_freq_min: BOKEH_HOVER_FREQ_MIN,
            hover_freq_max: BOKEH_HOVER_FREQ_MAX,
            scatter_distance: BOKEH_SCATTER_DISTANCE,
            scale_min: BOKEH_SCALE_MIN,
            scale_max: BOKEH_SCALE_MAX,
            twinkle_min: BOKEH_TWINKLE_MIN,
            twinkle_max: BOKEH_TWINKLE_MAX,
            twinkle_speed_max: BOKEH_TWINKLE_SPEED_MAX,
            scatter_dim: BOKEH_SCATTER_DIM,
            spin_speed_max: 0.0,
        }
    }

    pub fn petals() -> Self {
        Self {
            count: PETAL_COUNT,
            shell_min: PETAL_SHELL_MIN,
            shell_max: PETAL_SHELL_MAX,
            orbit_speed_max: PETAL_ORBIT_SPEED_MAX,
            hover_amp_max: PETAL_HOVER_AMP_MAX,
            hover_freq_min: PETAL_HOVER_FREQ_MIN,
            hover_freq_max: PETAL_HOVER_FREQ_MAX,
            scatter_distance: PETAL_SCATTER_DISTANCE,
            scale_min: PETAL_SCALE_MIN,
            scale_max: PETAL_SCALE_MAX,
            twinkle_min: PETAL_TWINKLE_MIN,
            twinkle_max: PETAL_TWINKLE_MAX,
            twinkle_speed_max: PETAL_TWINKLE_SPEED_MAX,
            scatter_dim: PETAL_SCATTER_DIM,
            spin_speed_max: PETAL_SPIN_SPEED_MAX,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AmbientParticle {
    pub base_position: Vec3,
    pub orbit_axis: Vec3,
    pub angular_velocity: f32,
    pub phase: f32,
    pub hover_axis: Vec3,
    pub hover_amplitude: f32,
    pub hover_frequency: f32,
    /// Already scaled by the scatter distance.
    pub scatter_direction: Vec3,
    pub spin_axis: Vec3,
    pub spin_velocity: f32,
    pub spin: Quat,
    pub base_scale: f32,
    pub twinkle_speed: f32,
}

// gen_range panics on an empty range; collapsed ranges just return `lo`.
#[inline]
fn range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

impl AmbientParticle {
    pub fn random<R: Rng + ?Sized>(config: &AmbientConfig, rng: &mut R) -> Self {
        let spin_velocity = range(rng, -config.spin_speed_max, config.spin_speed_max);
        Self {
            base_position: random_unit_vector(rng) * range(rng, config.shell_min, config.shell_max),
            orbit_axis: random_unit_vector(rng),
            angular_velocity: range(rng, -config.orbit_speed_max, config.orbit_speed_max),
            phase: rng.gen::<f32>() * TAU,
            hover_axis: random_unit_vector(rng),
            hover_amplitude: range(rng, 0.0, config.hover_amp_max),
            hover_frequency: range(rng, config.hover_freq_min, config.hover_freq_max),
            scatter_direction: random_unit_vector(rng) * config.scatter_distance,
            spin_axis: random_unit_vector(rng),
            spin_velocity,
            spin: Quat::IDENTITY,
            base_scale: range(rng, config.scale_min, config.scale_max),
            twinkle_speed: range(rng, 0.0, config.twinkle_speed_max),
        }
    }
}

/// Exponential follower with separate time constants for rising and falling.
#[derive(Clone, Copy, Debug)]
pub struct ScatterSmoother {
    amount: f32,
    tau_out_sec: f32,
    tau_in_sec: f32,
}

impl ScatterSmoother {
    pub fn new(tau_out_sec: f32, tau_in_sec: f32) -> Self {
        Self {
            amount: 0.0,
            tau_out_sec,
            tau_in_sec,
        }
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// `alpha = 1 - exp(-dt / tau)` stays in [0, 1), so the amount moves toward
    /// the target without passing it for any `dt`.
    pub fn step(&mut self, target: f32, dt_sec: f32) -> f32 {
        let target = target.clamp(0.0, 1.0);
        if dt_sec <= 0.0 || !dt_sec.is_finite() {
            return self.amount;
        }
        let rising = target > self.amount;
        let tau = if rising {
            self.tau_out_sec
        } else {
            self.tau_in_sec
        };
        let alpha = if tau > 0.0 {
            1.0 - (-dt_sec / tau).exp()
        } else {
            1.0
        };
        let next = self.amount + (target - self.amount) * alpha;
        self.amount = if rising {
            next.min(target)
        } else {
            next.max(target)
        };
        self.amount
    }
}

/// One ambient group: particle records, the shared scatter smoother, the
/// instance buffer and per-particle opacity.
#[derive(Clone, Debug)]
pub struct AmbientField {
    config: AmbientConfig,
    particles: Vec<AmbientParticle>,
    smoother: ScatterSmoother,
    field: InstanceField,
    opacities: Vec<f32>,
}

impl AmbientField {
    pub fn spawn<R: Rng + ?Sized>(
        config: AmbientConfig,
        tau_out_sec: f32,
        tau_in_sec: f32,
        rng: &mut R,
    ) -> Self {
        let particles: Vec<AmbientParticle> = (0..config.count)
            .map(|_| AmbientParticle::random(&config, rng))
            .collect();
        let mut field = Self {
            field: InstanceField::new(particles.len()),
            opacities: vec![0.0; particles.len()],
            particles,
            smoother: ScatterSmoother::new(tau_out_sec, tau_in_sec),
            config,
        };
        field.write_instances(0.0);
        field
    }

    pub fn particles(&self) -> &[AmbientParticle] {
        &self.particles
    }

    pub fn scatter_amount(&self) -> f32 {
        self.smoother.amount()
    }

    pub fn field(&self) -> &InstanceField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut InstanceField {
        &mut self.field
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Advance by `dt_sec`; `t_sec` is total elapsed time.
    pub fn tick(&mut self, driver: f32, t_sec: f32, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        self.smoother.step(driver, dt);
        for p in &mut self.particles {
            if p.angular_velocity != 0.0 {
                p.base_position = Quat::from_axis_angle(p.orbit_axis, p.angular_velocity * dt)
                    * p.base_position;
            }
            if p.spin_velocity != 0.0 {
                p.spin = (Quat::from_axis_angle(p.spin_axis, p.spin_velocity * dt) * p.spin)
                    .normalize();
            }
        }
        self.write_instances(t_sec);
    }

    fn write_instances(&mut self, t_sec: f32) {
        let scatter = self.smoother.amount();
        let attenuation = (1.0 - self.config.scatter_dim * scatter).clamp(0.0, 1.0);
        let (lo, hi) = (self.config.twinkle_min, self.config.twinkle_max);
        for (i, p) in self.particles.iter().enumerate() {
            let hover = p.hover_axis
                * (t_sec * p.hover_frequency + p.phase).sin()
                * p.hover_amplitude;
            let position = p.base_position + hover + p.scatter_direction * scatter;
            let pulse = 0.5 + 0.5 * (t_sec * p.twinkle_speed + p.phase).sin();
            let level = (lo + (hi - lo) * pulse) * attenuation;
            self.opacities[i] = level;
            self.field
                .write_transform(i, position, p.spin, p.base_scale * level);
        }
        self.field.flush();
    }
}
