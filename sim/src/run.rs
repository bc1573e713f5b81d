use anyhow::Result;
use bevy_math::{EulerRot, Quat, Vec3};
use hydro::{FlatWater, HeightFieldSampler, HullSimulation, PatchRefresh, RigidBody, TriangleMesh};
use tracing::{debug, info, warn};

use crate::config::{ScenarioConfig, WaterConfig};

/// Where the body ended up and how the run went.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub volume: f32,
    /// Displaced volume averaged over the second half of the run.
    pub mean_volume: f32,
    pub stale_steps: usize,
    pub rejected_forces: usize,
}

pub fn run(cfg: &ScenarioConfig) -> Result<RunSummary> {
    cfg.validate()?;
    match &cfg.water {
        WaterConfig::Flat { level } => simulate(cfg, FlatWater::new(*level), |_, _| {}),
        WaterConfig::Gerstner(waves) => simulate(cfg, waves.clone(), |w, dt| w.advance(dt)),
    }
}

fn simulate<S: HeightFieldSampler>(
    cfg: &ScenarioConfig,
    sampler: S,
    mut advance_water: impl FnMut(&mut S, f32),
) -> Result<RunSummary> {
    let b = &cfg.body;
    let mut body = RigidBody::cuboid(b.mass, b.half_extents).with_position(b.position);
    body.velocity = b.velocity;
    body.rotation = Quat::from_euler(EulerRot::XYZ, b.attitude.x, b.attitude.y, b.attitude.z);

    let mesh = TriangleMesh::cuboid(b.half_extents);
    let mut sim = HullSimulation::new(mesh, sampler, cfg.hydro.clone(), body.position)?;
    let gravity = cfg.hydro.water.gravity;

    let settle_from = cfg.steps / 2;
    let (mut volume, mut volume_sum, mut stale_steps, mut rejected_forces) = (0.0, 0.0, 0, 0);
    for tick in 0..cfg.steps {
        let report = sim.step(&body.state(), cfg.dt)?;
        if report.refresh == PatchRefresh::Stale {
            stale_steps += 1;
        }
        if report.forces.rejected_forces > 0 {
            warn!(tick, rejected = report.forces.rejected_forces, "non-finite forces dropped");
        }
        rejected_forces += report.forces.rejected_forces;
        report.forces.apply_to(&mut body);
        body.integrate(cfg.dt, gravity);
        advance_water(sim.patch_mut().sampler_mut(), cfg.dt);

        volume = report.volume;
        if tick >= settle_from {
            volume_sum += report.volume;
        }
        if cfg.log_every > 0 && tick % cfg.log_every == 0 {
            info!(
                tick,
                y = body.position.y,
                vy = body.velocity.y,
                volume = report.volume,
                wetted = report.wetted_area,
                "step"
            );
        }
        debug!(tick, force = ?report.forces.total_force(), centroid = ?report.centroid, "forces");
    }

    let averaged = cfg.steps - settle_from;
    Ok(RunSummary {
        steps: cfg.steps,
        position: body.position,
        velocity: body.velocity,
        rotation: body.rotation,
        volume,
        mean_volume: if averaged > 0 { volume_sum / averaged as f32 } else { 0.0 },
        stale_steps,
        rejected_forces,
    })
}
