use hydro::{presets, BuoyancyPolicy, FlatWater, HullSimulation, HydroConfig, RigidBody, TriangleMesh, Vec3};

const DT: f32 = 1.0 / 60.0;

// 2 m x 0.5 m x 2 m slab: wide enough to float upright at any draft.
const HALF: Vec3 = Vec3::new(1.0, 0.25, 1.0);

/// Drops the slab just above the surface and lets it settle, returning the
/// final body and the last displaced volume.
fn settle(config: HydroConfig, mass: f32, steps: usize) -> (RigidBody, f32) {
    let gravity = config.water.gravity;
    let mut body = RigidBody::cuboid(mass, HALF).with_position(Vec3::new(0.0, 0.3, 0.0));
    let mut sim = HullSimulation::new(TriangleMesh::cuboid(HALF), FlatWater::new(0.0), config, body.position)
        .expect("valid setup");
    let mut volume = 0.0;
    for _ in 0..steps {
        let report = sim.step(&body.state(), DT).expect("step");
        assert_eq!(report.forces.rejected_forces, 0);
        report.forces.apply_to(&mut body);
        body.integrate(DT, gravity);
        volume = report.volume;
    }
    (body, volume)
}

#[test]
fn slab_settles_at_archimedes_volume() {
    let config = presets::damped_box();
    let density = config.water.density;
    let (body, volume) = settle(config, 600.0, 1200);
    let expected = 600.0 / density;
    assert!((volume - expected).abs() < 0.01, "volume={volume} expected={expected}");
    // 0.6 m³ over a 4 m² footprint is a 0.15 m draft.
    assert!((body.position.y - 0.1).abs() < 0.01, "y={}", body.position.y);
    assert!(body.velocity.length() < 0.05, "still moving: {:?}", body.velocity);
}

#[test]
fn per_face_buoyancy_settles_at_the_same_draft() {
    let mut config = presets::damped_box();
    config.forces.buoyancy_policy = BuoyancyPolicy::PerFace;
    let density = config.water.density;
    let (_, volume) = settle(config, 1000.0, 1200);
    let expected = 1000.0 / density;
    assert!((volume - expected).abs() < 0.01, "volume={volume} expected={expected}");
}

#[test]
fn slab_heavier_than_its_displacement_sinks() {
    let config = presets::damped_box();
    let (body, volume) = settle(config, 2500.0, 600);
    assert!(body.position.y < -0.5, "y={}", body.position.y);
    assert!((volume - 2.0).abs() < 1e-3, "volume={volume}");
}
