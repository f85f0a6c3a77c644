use glam::Vec3;

// Shared tuning constants; `SceneConfig::default()` is assembled from these.

// Beads sampled from the hero surface
pub const PARTICLE_COUNT: usize = 1200; // number of beads
pub const SCATTER_RADIUS: f32 = 5.0; // outward scatter distance at driver = 1
pub const BEAD_SCALE: f32 = 0.03; // uniform bead size
pub const INWARD_BIAS: f32 = 0.075; // push beads slightly inside the shell along the normal
pub const BEAD_FORWARD: Vec3 = Vec3::Z; // bead mesh faces +Z

// Sampling
pub const AREA_EPSILON: f32 = 1e-6; // substitute area for degenerate meshes

// Fade
pub const FADE_DURATION_SEC: f32 = 0.05; // 0 for an instant dissolve
pub const FADE_SCROLL_EPSILON: f32 = 0.0; // driver above this counts as "scrolled"
pub const BEAD_OPACITY: f32 = 1.0;

// Hero + bead group spin (radians per second / Hz / radians)
pub const GROUP_SPIN_Y: f32 = 0.1;
pub const GROUP_WOBBLE_FREQ: f32 = 0.1;
pub const GROUP_WOBBLE_AMP: f32 = 0.05;

// Background starfield
pub const STAR_COUNT: usize = 1200;
pub const STAR_RADIUS_MIN: f32 = 18.0;
pub const STAR_RADIUS_SPAN: f32 = 12.0;
pub const STAR_SCALE_MIN: f32 = 0.6;
pub const STAR_SCALE_SPAN: f32 = 1.2;
pub const STAR_SPIN_Y: f32 = 0.02;
pub const STAR_WOBBLE_FREQ: f32 = 0.05;
pub const STAR_WOBBLE_AMP: f32 = 0.01;

// Fallback sphere used when the bead or hero asset is missing
pub const FALLBACK_SPHERE_RADIUS: f32 = 0.02;
pub const FALLBACK_SPHERE_SEGMENTS: u32 = 12;
pub const HERO_FALLBACK_RADIUS: f32 = 1.0; // hero stand-in when no hero mesh loaded

// Ambient scatter smoothing (seconds); out is the fast explode, in the slow settle
pub const AMBIENT_SCATTER_TAU_OUT_SEC: f32 = 0.15;
pub const AMBIENT_SCATTER_TAU_IN_SEC: f32 = 0.9;

// Bokeh (soft discs drifting around the hero)
pub const BOKEH_COUNT: usize = 80;
pub const BOKEH_SHELL_MIN: f32 = 1.6;
pub const BOKEH_SHELL_MAX: f32 = 3.2;
pub const BOKEH_ORBIT_SPEED_MAX: f32 = 0.12; // rad/s
pub const BOKEH_HOVER_AMP_MAX: f32 = 0.12;
pub const BOKEH_HOVER_FREQ_MIN: f32 = 0.3;
pub const BOKEH_HOVER_FREQ_MAX: f32 = 0.9;
pub const BOKEH_SCATTER_DISTANCE: f32 = 2.5;
pub const BOKEH_SCALE_MIN: f32 = 0.05;
pub const BOKEH_SCALE_MAX: f32 = 0.14;
pub const BOKEH_TWINKLE_MIN: f32 = 0.35;
pub const BOKEH_TWINKLE_MAX: f32 = 0.9;
pub const BOKEH_TWINKLE_SPEED_MAX: f32 = 1.5;
pub const BOKEH_SCATTER_DIM: f32 = 0.4;

// Petals (small spinning flakes)
pub const PETAL_COUNT: usize = 40;
pub const PETAL_SHELL_MIN: f32 = 1.2;
pub const PETAL_SHELL_MAX: f32 = 2.4;
pub const PETAL_ORBIT_SPEED_MAX: f32 = 0.25;
pub const PETAL_HOVER_AMP_MAX: f32 = 0.08;
pub const PETAL_HOVER_FREQ_MIN: f32 = 0.5;
pub const PETAL_HOVER_FREQ_MAX: f32 = 1.4;
pub const PETAL_SCATTER_DISTANCE: f32 = 3.5;
pub const PETAL_SCALE_MIN: f32 = 0.03;
pub const PETAL_SCALE_MAX: f32 = 0.07;
pub const PETAL_TWINKLE_MIN: f32 = 0.7;
pub const PETAL_TWINKLE_MAX: f32 = 1.0;
pub const PETAL_TWINKLE_SPEED_MAX: f32 = 2.5;
pub const PETAL_SCATTER_DIM: f32 = 0.25;
pub const PETAL_SPIN_SPEED_MAX: f32 = 1.8; // rad/s
