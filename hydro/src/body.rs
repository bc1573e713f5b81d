use bevy_math::{Quat, Vec3};

use crate::hydrodynamics::{ForceSink, RigidBodyState};

/// Minimal rigid body that accumulates hydro forces and integrates them.
///
/// The hull origin is the centre of mass. Angular momentum lives in the body
/// frame and is advanced with the Euler equation `L̇ = τ − ω × L`.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub mass: f32,
    /// Principal moments of inertia about the body axes (kg·m²).
    pub inertia: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    /// Body frame (kg·m²/s).
    pub ang_mom: Vec3,
    force: Vec3,
    torque: Vec3,
}

impl RigidBody {
    pub fn new(mass: f32, inertia: Vec3) -> Self {
        Self {
            mass,
            inertia,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            ang_mom: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }

    /// Solid box with the given half extents.
    pub fn cuboid(mass: f32, half_extents: Vec3) -> Self {
        let h2 = half_extents * half_extents;
        let inertia = Vec3::new(h2.y + h2.z, h2.x + h2.z, h2.x + h2.y) * (mass / 3.0);
        Self::new(mass, inertia)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    fn omega_body(&self) -> Vec3 {
        let inv = |i: f32| if i > 0.0 { i.recip() } else { 0.0 };
        self.ang_mom * Vec3::new(inv(self.inertia.x), inv(self.inertia.y), inv(self.inertia.z))
    }

    /// World-frame angular velocity.
    pub fn angular_velocity(&self) -> Vec3 { self.rotation * self.omega_body() }

    pub fn state(&self) -> RigidBodyState {
        RigidBodyState {
            position: self.position,
            rotation: self.rotation,
            linear_velocity: self.velocity,
            angular_velocity: self.angular_velocity(),
            mass: self.mass,
            center_of_mass: self.position,
        }
    }

    /// Semi-implicit Euler step under the accumulated loads plus gravity,
    /// then clears the accumulators.
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        if dt <= 0.0 {
            return;
        }
        let accel = self.force / self.mass.max(1e-6) - Vec3::new(0.0, gravity, 0.0);
        self.velocity += accel * dt;
        self.position += self.velocity * dt;

        let tau_b = self.rotation.inverse() * self.torque;
        let omega = self.omega_body();
        let ldot = tau_b - omega.cross(self.ang_mom);
        self.ang_mom += ldot * dt;
        // Post-multiply: the delta is a body-frame rotation.
        let delta = Quat::from_scaled_axis(self.omega_body() * dt);
        self.rotation = (self.rotation * delta).normalize();

        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }
}

impl ForceSink for RigidBody {
    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.force += force;
        self.torque += (point - self.position).cross(force);
    }
}
