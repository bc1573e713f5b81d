use super::slamming::SlamInput;
use super::terms::*;
use super::types::{ForceReport, RigidBodyState};
use super::util::push_checked;
use crate::config::{BuoyancyPolicy, HydroConfig};
use crate::mesh::TriangleMesh;
use crate::submerged::SubmergedGeometry;

/// Hull measurements the force terms fall back on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullDimensions {
    /// Local Z extent, the default characteristic length.
    pub length: f32,
    /// Local z bounds, the default form-factor range.
    pub z_range: [f32; 2],
    pub surface_area: f32,
}

impl HullDimensions {
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        let (lo, hi) = mesh.bounds();
        Self { length: hi.z - lo.z, z_range: [lo.z, hi.z], surface_area: mesh.surface_area() }
    }
}

/// Turns a submerged-geometry snapshot plus kinematics into forces.
///
/// Stateless: every call is a pure function of its arguments and the
/// configuration passed in, so the configuration may change between steps.
#[derive(Debug, Clone)]
pub struct HydrodynamicForceModel {
    hull: HullDimensions,
}

impl HydrodynamicForceModel {
    pub fn new(hull: HullDimensions) -> Self { Self { hull } }

    pub fn for_mesh(mesh: &TriangleMesh) -> Self { Self::new(HullDimensions::from_mesh(mesh)) }

    pub fn hull(&self) -> &HullDimensions { &self.hull }

    pub fn compute(
        &self,
        config: &HydroConfig,
        geometry: &SubmergedGeometry,
        body: &RigidBodyState,
        slam: Option<SlamInput<'_>>,
    ) -> ForceReport {
        let mut report = ForceReport::default();
        let forces = &config.forces;
        let water = &config.water;

        if forces.buoyancy {
            self.add_buoyancy(config, geometry, &mut report);
        }

        if forces.viscous && !geometry.faces.is_empty() {
            let length = forces.characteristic_length.unwrap_or(self.hull.length);
            let re = reynolds_number(body.linear_velocity.length(), length, water.kinematic_viscosity);
            let k = form_factor(&geometry.faces, forces.form_z_range.unwrap_or(self.hull.z_range));
            let cfr = (1.0 + k) * friction_coefficient(re);
            for face in &geometry.faces {
                let v = body.point_velocity(face.center);
                match viscous_on_face(face, v, water.density, cfr) {
                    Some(f) => push_checked(&mut report.viscous, &mut report.rejected_forces, "viscous", f, face.center),
                    None => report.skipped_faces += 1,
                }
            }
        }

        if forces.pressure_drag {
            for face in &geometry.faces {
                let v = body.point_velocity(face.center);
                match pressure_drag_on_face(face.normal, face.area, v, &forces.drag) {
                    Some(f) => push_checked(&mut report.pressure_drag, &mut report.rejected_forces, "pressure_drag", f, face.center),
                    None => report.skipped_faces += 1,
                }
            }
        }

        if let (true, Some(slam)) = (forces.slamming, slam) {
            for face in &geometry.faces {
                let v = body.point_velocity(face.center);
                let area = geometry.source_areas[face.source];
                let Some(rate) = slam.history.swept_rate(face.source, area, v, self.hull.surface_area, slam.dt) else {
                    continue;
                };
                if let Some(f) = slamming_on_face(face, v, rate, body.mass, self.hull.surface_area, &forces.slam) {
                    push_checked(&mut report.slamming, &mut report.rejected_forces, "slamming", f, face.center);
                }
            }
        }

        if forces.air_resistance {
            for face in &geometry.emerged {
                let v = body.point_velocity(face.center);
                if let Some(f) = air_resistance_on_face(face, v, water.air_density, forces.air_drag_coefficient) {
                    push_checked(&mut report.air_resistance, &mut report.rejected_forces, "air_resistance", f, face.center);
                }
            }
        }

        report
    }

    fn add_buoyancy(&self, config: &HydroConfig, geometry: &SubmergedGeometry, report: &mut ForceReport) {
        let (rho, g) = (config.water.density, config.water.gravity);
        match config.forces.buoyancy_policy {
            BuoyancyPolicy::Volume => {
                if let Some((f, at)) = buoyancy_from_volume(geometry, rho, g) {
                    push_checked(&mut report.buoyancy, &mut report.rejected_forces, "buoyancy", f, at);
                }
            }
            BuoyancyPolicy::PerFace => {
                for face in &geometry.faces {
                    let Some(f) = buoyancy_on_face(face, rho, g) else { continue };
                    let at = if config.forces.apply_at_pressure_centers { face.pressure_center } else { face.center };
                    push_checked(&mut report.buoyancy, &mut report.rejected_forces, "buoyancy", f, at);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatchConfig;
    use crate::math::HullTransform;
    use crate::submerged::SubmergedGeometryBuilder;
    use crate::water::{FlatWater, WaterPatch};
    use crate::hydrodynamics::{net_force, SlammingTracker};
    use bevy_math::{Quat, Vec3};

    fn cube_geometry(y: f32) -> (HydrodynamicForceModel, SubmergedGeometry) {
        let mesh = TriangleMesh::cuboid(Vec3::splat(0.5));
        let model = HydrodynamicForceModel::for_mesh(&mesh);
        let cfg = PatchConfig { side_length: 4.0, fidelity: 4, ..PatchConfig::default() };
        let patch = WaterPatch::centered(FlatWater::new(0.0), &cfg, Vec3::ZERO).unwrap();
        let geo = SubmergedGeometryBuilder::new(mesh)
            .build(&patch, &HullTransform::from_translation(Vec3::new(0.0, y, 0.0)))
            .unwrap();
        (model, geo)
    }

    fn water_config(policy: BuoyancyPolicy) -> HydroConfig {
        let mut cfg = HydroConfig::default();
        cfg.water.density = 1000.0;
        cfg.water.gravity = 10.0;
        cfg.forces.buoyancy_policy = policy;
        cfg
    }

    #[test]
    fn drag_terms_vanish_at_rest() {
        let (model, geo) = cube_geometry(-2.0);
        let body = RigidBodyState::at_rest(Vec3::new(0.0, -2.0, 0.0), Quat::IDENTITY, 400.0);
        let report = model.compute(&water_config(BuoyancyPolicy::Volume), &geo, &body, None);
        assert!(report.viscous.is_empty());
        assert!(report.pressure_drag.is_empty());
        assert_eq!(net_force(&report.viscous), Vec3::ZERO);
        assert_eq!(net_force(&report.pressure_drag), Vec3::ZERO);
        assert_eq!(report.skipped_faces, 2 * geo.faces.len());
        assert_eq!(report.rejected_forces, 0);
    }

    #[test]
    fn volume_and_face_buoyancy_agree_when_floating() {
        let (model, geo) = cube_geometry(0.1);
        let body = RigidBodyState::at_rest(Vec3::new(0.0, 0.1, 0.0), Quat::IDENTITY, 400.0);
        let by_volume = model.compute(&water_config(BuoyancyPolicy::Volume), &geo, &body, None);
        let by_face = model.compute(&water_config(BuoyancyPolicy::PerFace), &geo, &body, None);
        let expected = 1000.0 * 10.0 * 0.4;
        assert_eq!(by_volume.buoyancy.len(), 1);
        assert!((net_force(&by_volume.buoyancy).y - expected).abs() < 1e-2);
        assert!((net_force(&by_face.buoyancy).y - expected).abs() < 1e-2);
        // Symmetric lift: no moment about the centre of mass either way.
        assert!(by_volume.total_torque(body.center_of_mass).length() < 1e-2);
        assert!(by_face.total_torque(body.center_of_mass).length() < 1e-2);
    }

    #[test]
    fn disabled_effects_produce_nothing() {
        let (model, geo) = cube_geometry(-2.0);
        let mut body = RigidBodyState::at_rest(Vec3::new(0.0, -2.0, 0.0), Quat::IDENTITY, 400.0);
        body.linear_velocity = Vec3::new(1.0, 0.0, 0.5);
        let mut cfg = water_config(BuoyancyPolicy::Volume);
        cfg.forces.buoyancy = false;
        cfg.forces.viscous = false;
        cfg.forces.pressure_drag = false;
        let report = model.compute(&cfg, &geo, &body, None);
        assert_eq!(report.iter().count(), 0);
    }

    #[test]
    fn moving_hull_is_resisted() {
        let (model, geo) = cube_geometry(-2.0);
        let mut body = RigidBodyState::at_rest(Vec3::new(0.0, -2.0, 0.0), Quat::IDENTITY, 400.0);
        body.linear_velocity = Vec3::new(0.0, 0.0, 2.0);
        let mut cfg = water_config(BuoyancyPolicy::Volume);
        cfg.forces.buoyancy = false;
        let report = model.compute(&cfg, &geo, &body, None);
        assert!(net_force(&report.viscous).z < 0.0);
        assert!(net_force(&report.pressure_drag).z < 0.0);
        assert!(report.total_force().x.abs() < 1e-3);
    }

    #[test]
    fn slamming_needs_history() {
        let (model, geo) = cube_geometry(0.3);
        let mut body = RigidBodyState::at_rest(Vec3::new(0.0, 0.3, 0.0), Quat::IDENTITY, 400.0);
        body.linear_velocity = Vec3::new(0.0, -3.0, 0.0);
        let mut cfg = water_config(BuoyancyPolicy::Volume);
        cfg.forces.slamming = true;

        let fresh = SlammingTracker::new(geo.source_areas.len());
        assert!(!fresh.is_primed());
        let report = model.compute(&cfg, &geo, &body, Some(SlamInput { history: &fresh, dt: 1.0 / 60.0 }));
        assert!(report.slamming.is_empty());

        // Last step the hull was clear of the water; now its bottom is in and still falling.
        let (_, dry) = cube_geometry(1.0);
        let mut history = SlammingTracker::new(dry.source_areas.len());
        history.record(&dry, &body);
        let report = model.compute(&cfg, &geo, &body, Some(SlamInput { history: &history, dt: 1.0 / 60.0 }));
        assert!(history.is_primed());
        assert!(!report.slamming.is_empty());
        assert!(net_force(&report.slamming).y > 0.0);

        history.reset();
        assert!(!history.is_primed());
        let report = model.compute(&cfg, &geo, &body, Some(SlamInput { history: &history, dt: 1.0 / 60.0 }));
        assert!(report.slamming.is_empty());
    }

    #[test]
    fn spinning_hull_feels_friction_against_the_spin() {
        let (model, geo) = cube_geometry(-2.0);
        let mut body = RigidBodyState::at_rest(Vec3::new(0.0, -2.0, 0.0), Quat::IDENTITY, 400.0);
        body.angular_velocity = Vec3::new(0.0, 2.0, 0.0);
        let mut cfg = water_config(BuoyancyPolicy::Volume);
        cfg.forces.buoyancy = false;
        cfg.forces.pressure_drag = false;

        let report = model.compute(&cfg, &geo, &body, None);
        // No piece centre sits on the spin axis, so every face is dragged.
        assert_eq!(report.viscous.len(), geo.faces.len());
        assert_eq!(report.skipped_faces, 0);
        for (f, face) in report.viscous.iter().zip(&geo.faces) {
            assert!(f.force.length() > 0.0);
            assert!(f.force.dot(face.normal).abs() < 1e-4 * f.force.length().max(1.0));
            assert_eq!(f.point, face.center);
        }
        let torque = report.total_torque(body.center_of_mass);
        assert!(torque.dot(body.angular_velocity) < 0.0, "torque {torque:?}");
    }
}
