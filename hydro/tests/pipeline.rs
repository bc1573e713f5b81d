use std::sync::atomic::{AtomicBool, Ordering};

use hydro::{
    presets, FlatWater, HeightFieldSampler, HeightSample, HullSimulation, PatchRefresh, Quat, RigidBodyState,
    TriangleMesh, Vec3,
};

/// Gently sloped surface that can be switched off mid-run.
struct Slope {
    online: AtomicBool,
}

impl HeightFieldSampler for Slope {
    type Context = ();

    fn fill_search_context(&self) -> Option<()> { self.online.load(Ordering::Relaxed).then_some(()) }

    fn project(&self, _ctx: &(), p: Vec3, _max_iterations: u32, _error_tolerance: f32) -> HeightSample {
        HeightSample::at(0.05 * p.x - 0.02 * p.z)
    }
}

fn cube() -> TriangleMesh { TriangleMesh::cuboid(Vec3::splat(0.5)) }

#[test]
fn hull_at_rest_on_slope_feels_only_buoyancy() {
    let slope = Slope { online: AtomicBool::new(true) };
    let start = Vec3::new(3.0, 0.0, -2.0);
    let mut sim = HullSimulation::new(cube(), slope, presets::damped_box(), start).expect("setup");
    let body = RigidBodyState::at_rest(start, Quat::from_rotation_y(0.4), 500.0);

    let report = sim.step(&body, 1.0 / 60.0).expect("step");
    assert_eq!(report.refresh, PatchRefresh::Sampled);
    assert!(report.volume > 0.0 && report.volume < 1.0);
    assert!(report.forces.viscous.is_empty());
    assert!(report.forces.pressure_drag.is_empty());
    assert_eq!(report.forces.skipped_faces, 2 * sim.geometry().faces.len());
    assert!(report.forces.total_force().y > 0.0);
}

#[test]
fn stale_sampler_keeps_previous_surface() {
    let slope = Slope { online: AtomicBool::new(true) };
    let mut sim = HullSimulation::new(cube(), slope, presets::damped_box(), Vec3::ZERO).expect("setup");
    let body = RigidBodyState::at_rest(Vec3::ZERO, Quat::IDENTITY, 500.0);
    let first = sim.step(&body, 1.0 / 60.0).expect("step");

    sim.patch().sampler().online.store(false, Ordering::Relaxed);
    let second = sim.step(&body, 1.0 / 60.0).expect("step");
    assert_eq!(second.refresh, PatchRefresh::Stale);
    assert!((first.volume - second.volume).abs() < 1e-6);
}

#[test]
fn patch_settings_can_change_between_steps() {
    let mut sim = HullSimulation::new(cube(), FlatWater::new(0.0), presets::damped_box(), Vec3::ZERO).expect("setup");
    let body = RigidBodyState::at_rest(Vec3::new(0.0, 0.2, 0.0), Quat::IDENTITY, 300.0);
    let before = sim.step(&body, 1.0 / 60.0).expect("step");

    sim.config_mut().patch.fidelity = 3;
    sim.config_mut().patch.side_length = 6.0;
    let after = sim.step(&body, 1.0 / 60.0).expect("step");
    assert_eq!(sim.patch().fidelity(), 3);
    assert_eq!(sim.patch().grid_points().len(), 16);
    assert!((before.volume - after.volume).abs() < 1e-5);

    sim.config_mut().patch.fidelity = 0;
    assert!(sim.step(&body, 1.0 / 60.0).is_err());
}

#[test]
fn water_entry_slams_upward() {
    let mut config = presets::damped_box();
    config.forces.slamming = true;
    let mut sim = HullSimulation::new(cube(), FlatWater::new(0.0), config, Vec3::ZERO).expect("setup");
    assert_eq!(sim.mesh().triangle_count(), 12);
    // Slamming normalises by the whole hull surface: six unit faces.
    assert!((sim.model().hull().surface_area - 6.0).abs() < 1e-5);

    let mut body = RigidBodyState::at_rest(Vec3::new(0.0, 0.6, 0.0), Quat::IDENTITY, 300.0);
    body.linear_velocity = Vec3::new(0.0, -3.0, 0.0);
    let dry = sim.step(&body, 1.0 / 60.0).expect("step");
    assert!(dry.forces.slamming.is_empty());
    assert_eq!(dry.volume, 0.0);

    body.position.y = 0.4;
    let wet = sim.step(&body, 1.0 / 60.0).expect("step");
    assert!(!wet.forces.slamming.is_empty());
    let slam: Vec3 = wet.forces.slamming.iter().map(|f| f.force).sum();
    assert!(slam.y > 0.0, "slam force {slam:?}");
}
