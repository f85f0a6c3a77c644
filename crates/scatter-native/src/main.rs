//! Headless preview: builds a scene from procedural meshes and sweeps the
//! driver out and back at 60 Hz, logging what each phase leaves behind.
//!
//! Usage: `scatter-native [seed]` (set `RUST_LOG=debug` for sampler detail).

use anyhow::{ensure, Context};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scatter_core::{build_scene, FrameOutput, Mesh, SceneAssets, SceneConfig, SceneState};
use std::time::Duration;

const FRAME: Duration = Duration::from_nanos(16_666_667);

struct Phase {
    name: &'static str,
    frames: u32,
    from: f32,
    to: f32,
}

const PHASES: [Phase; 5] = [
    Phase {
        name: "rest",
        frames: 30,
        from: 0.0,
        to: 0.0,
    },
    Phase {
        name: "scroll-out",
        frames: 90,
        from: 0.0,
        to: 1.0,
    },
    Phase {
        name: "hold",
        frames: 60,
        from: 1.0,
        to: 1.0,
    },
    Phase {
        name: "scroll-back",
        frames: 90,
        from: 1.0,
        to: 0.0,
    },
    Phase {
        name: "settle",
        frames: 120,
        from: 0.0,
        to: 0.0,
    },
];

/// A body sphere with a smaller head on top, the two meshes deliberately unequal in area.
fn procedural_hero() -> Vec<Mesh> {
    let body = Mesh::uv_sphere(1.0, 32, 16);
    let head_world = Mat4::from_translation(Vec3::new(0.0, 1.3, 0.0))
        * Mat4::from_scale(Vec3::new(1.0, 0.9, 1.0));
    let head = Mesh::uv_sphere(0.45, 24, 12).with_world(head_world);
    vec![body, head]
}

fn mean_displacement(scene: &SceneState) -> f32 {
    let n = scene.beads.len();
    if n == 0 {
        return 0.0;
    }
    let total: f32 = scene
        .beads
        .transforms()
        .iter()
        .zip(scene.scatter.base_positions())
        .map(|(t, base)| (t.position - *base).length())
        .sum();
    total / n as f32
}

fn log_phase(name: &str, scene: &SceneState, out: &FrameOutput) {
    log::info!(
        "[preview] {:<11} t={:>5.2}s driver={:.2} hero_opacity={:.3} bead_shift={:.3} bokeh={:.3} petals={:.3}",
        name,
        scene.elapsed_sec,
        out.driver,
        out.hero_opacity,
        mean_displacement(scene),
        out.bokeh_scatter,
        out.petal_scatter
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("seed must be an integer, got {arg:?}"))?,
        None => 42,
    };
    log::info!("[preview] seed={seed}");

    let config = SceneConfig::default();
    config.validate().context("default config")?;
    let count = config.particle_count;
    let placement = Mat4::from_translation(Vec3::new(0.0, -0.4, 0.0));
    let assets = SceneAssets {
        hero: procedural_hero(),
        // Exercise the fallback bead path.
        bead: None,
        placement: Some(placement),
        ..SceneAssets::default()
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = build_scene(assets, config, &mut rng).context("building scene")?;
    ensure!(
        scene.beads.len() == count,
        "expected {count} beads, got {}",
        scene.beads.len()
    );
    log::info!(
        "[preview] quotas={:?} bead_mesh_vertices={}",
        scene.quotas.as_slice(),
        scene.bead_mesh.positions.len()
    );

    for phase in &PHASES {
        let mut last = None;
        for f in 1..=phase.frames {
            let s = f as f32 / phase.frames as f32;
            let reading = phase.from + (phase.to - phase.from) * s;
            last = Some(scene.tick(Some(reading), FRAME));
        }
        if let Some(out) = last {
            log_phase(phase.name, &scene, &out);
        }
    }

    let rest = mean_displacement(&scene);
    ensure!(rest < 1e-4, "beads did not return to the surface: {rest}");

    scene.rig.reset();
    let out = scene.tick(None, FRAME);
    ensure!(
        out.hero_world.abs_diff_eq(placement, 1e-6),
        "reset group should sit at its placement"
    );
    scene.rig.resume();
    log::info!("[preview] spin reset/resume ok");
    log::info!("[preview] done");
    Ok(())
}
