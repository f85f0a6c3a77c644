//! Eased approach of a scalar (hero opacity) toward a driver-derived target.

/// How the driver maps to the fade target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FadeTarget {
    /// Fully faded as soon as the driver exceeds `epsilon`, opaque otherwise.
    Binary { epsilon: f32 },
    /// Opacity follows `1 - driver`.
    Continuous,
}

impl FadeTarget {
    #[inline]
    pub fn target(&self, driver: f32) -> f32 {
        match *self {
            FadeTarget::Binary { epsilon } => {
                if driver > epsilon {
                    0.0
                } else {
                    1.0
                }
            }
            FadeTarget::Continuous => 1.0 - driver.clamp(0.0, 1.0),
        }
    }
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Copy, Debug)]
pub struct FadeController {
    current: f32,
    duration_sec: f32,
}

impl FadeController {
    /// Starts fully opaque.
    pub fn new(duration_sec: f32) -> Self {
        Self {
            current: 1.0,
            duration_sec: duration_sec.max(0.0),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// `step` is re-derived from `dt` each call, so speed does not depend on frame rate.
    /// A non-finite target leaves the value unchanged.
    pub fn tick(&mut self, target: f32, dt_sec: f32) -> f32 {
        if !target.is_finite() {
            return self.current;
        }
        let target = target.clamp(0.0, 1.0);
        if self.duration_sec <= 0.0 {
            self.current = target;
            return self.current;
        }
        let step = (dt_sec.max(0.0) / self.duration_sec).min(1.0);
        let eased = smoothstep(step);
        self.current = (self.current + (target - self.current) * eased).clamp(0.0, 1.0);
        self.current
    }
}
