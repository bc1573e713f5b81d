use bevy_math::{Quat, Vec3};

use crate::math::HullTransform;

/// Read-only kinematics of the hull for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyState {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    /// World frame, rad/s.
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// World-space centre of mass.
    pub center_of_mass: Vec3,
}

impl RigidBodyState {
    /// Body at rest with its centre of mass on the hull origin.
    pub fn at_rest(position: Vec3, rotation: Quat, mass: f32) -> Self {
        Self {
            position,
            rotation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            center_of_mass: position,
        }
    }

    pub fn transform(&self) -> HullTransform { HullTransform::new(self.position, self.rotation) }

    /// Velocity of the material point at world position `p`.
    #[inline]
    pub fn point_velocity(&self, p: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(p - self.center_of_mass)
    }
}

/// A force and the world point it acts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedForce {
    pub force: Vec3,
    pub point: Vec3,
}

/// Receiver for forces; integration happens elsewhere.
pub trait ForceSink {
    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3);
}

impl ForceSink for Vec<AppliedForce> {
    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.push(AppliedForce { force, point });
    }
}

/// Forces produced for one step, grouped by effect.
#[derive(Debug, Clone, Default)]
pub struct ForceReport {
    pub buoyancy: Vec<AppliedForce>,
    pub viscous: Vec<AppliedForce>,
    pub pressure_drag: Vec<AppliedForce>,
    pub slamming: Vec<AppliedForce>,
    pub air_resistance: Vec<AppliedForce>,
    /// Faces left out because their normal, tangential flow or speed vanished.
    pub skipped_faces: usize,
    /// Non-finite forces dropped before they could reach the body.
    pub rejected_forces: usize,
}

impl ForceReport {
    pub fn iter(&self) -> impl Iterator<Item = &AppliedForce> {
        self.buoyancy
            .iter()
            .chain(&self.viscous)
            .chain(&self.pressure_drag)
            .chain(&self.slamming)
            .chain(&self.air_resistance)
    }

    pub fn apply_to<K: ForceSink + ?Sized>(&self, sink: &mut K) {
        for f in self.iter() {
            sink.apply_force_at_point(f.force, f.point);
        }
    }

    pub fn total_force(&self) -> Vec3 { self.iter().map(|f| f.force).sum() }

    /// Net moment about `about` (world).
    pub fn total_torque(&self, about: Vec3) -> Vec3 {
        self.iter().map(|f| (f.point - about).cross(f.force)).sum()
    }
}

/// Sum of forces in one effect list.
pub fn net_force(forces: &[AppliedForce]) -> Vec3 { forces.iter().map(|f| f.force).sum() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_velocity_adds_spin_about_the_centre_of_mass() {
        let mut body = RigidBodyState::at_rest(Vec3::new(5.0, -2.0, 1.0), Quat::IDENTITY, 10.0);
        body.linear_velocity = Vec3::new(0.5, 0.0, 0.0);
        body.angular_velocity = Vec3::new(0.0, 0.0, 3.0);
        // 2 m along +X from the centre: ω × r = (0, 6, 0)
        let v = body.point_velocity(Vec3::new(7.0, -2.0, 1.0));
        assert!((v - Vec3::new(0.5, 6.0, 0.0)).length() < 1e-6);
        assert_eq!(body.point_velocity(body.center_of_mass), body.linear_velocity);
    }
}
