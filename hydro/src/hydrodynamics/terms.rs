use bevy_math::Vec3;

use super::util::{FORM_FACTOR_MAX, FORM_FACTOR_MIN, MIN_REYNOLDS, VELOCITY_EPSILON};
use crate::config::{DragCoefficients, SlammingCoefficients};
use crate::math::triangle_centroid;
use crate::submerged::{EmergedFace, SubmergedFace, SubmergedGeometry};

// ----- Hydrostatics -----

/// Archimedes lift for the whole displaced volume, or `None` when nothing is displaced.
pub(super) fn buoyancy_from_volume(geometry: &SubmergedGeometry, density: f32, gravity: f32) -> Option<(Vec3, Vec3)> {
    if geometry.volume <= 0.0 {
        return None;
    }
    Some((Vec3::new(0.0, density * gravity * geometry.volume, 0.0), geometry.centroid))
}

/// Vertical column pressure on one face. Upward-facing faces return `None`
/// so the column above the hull is not counted twice.
pub(super) fn buoyancy_on_face(face: &SubmergedFace, density: f32, gravity: f32) -> Option<Vec3> {
    if !(face.normal.y <= 0.0) {
        return None;
    }
    let lift = density * gravity * face.height * face.normal.y * face.area;
    Some(Vec3::new(0.0, lift, 0.0))
}

// ----- Viscous resistance -----

#[inline]
pub(super) fn reynolds_number(speed: f32, length: f32, kinematic_viscosity: f32) -> f32 {
    speed * length / kinematic_viscosity
}

/// ITTC 1957 friction line, `0.075 / (log10 Re − 2)²`.
pub(super) fn friction_coefficient(reynolds: f32) -> f32 {
    let denom = reynolds.max(MIN_REYNOLDS).log10() - 2.0;
    0.075 / (denom * denom)
}

/// Area-weighted form factor `K` over the wetted faces.
///
/// Each face gets `K_i` interpolated linearly from 1.22 at `z_range[0]` to
/// 1.65 at `z_range[1]` by the hull-local z of its centre; the mean is clamped
/// to the same interval.
pub(super) fn form_factor(faces: &[SubmergedFace], z_range: [f32; 2]) -> f32 {
    let span = z_range[1] - z_range[0];
    let (mut weighted, mut total) = (0.0_f32, 0.0_f32);
    for f in faces {
        let z = triangle_centroid(f.local[0], f.local[1], f.local[2]).z;
        let t = if span.abs() > f32::EPSILON { ((z - z_range[0]) / span).clamp(0.0, 1.0) } else { 0.0 };
        weighted += f.area * (FORM_FACTOR_MIN + (FORM_FACTOR_MAX - FORM_FACTOR_MIN) * t);
        total += f.area;
    }
    if total <= 0.0 {
        return FORM_FACTOR_MIN;
    }
    (weighted / total).clamp(FORM_FACTOR_MIN, FORM_FACTOR_MAX)
}

/// Skin friction on one face moving at `velocity`; `None` when the flow
/// along the face vanishes.
pub(super) fn viscous_on_face(face: &SubmergedFace, velocity: Vec3, density: f32, cfr: f32) -> Option<Vec3> {
    let n = face.normal;
    let tangential = velocity - velocity.dot(n) * n;
    let t_len = tangential.length();
    if !(t_len > VELOCITY_EPSILON) {
        return None;
    }
    let speed = velocity.length();
    let flow_dir = -tangential / t_len;
    Some(0.5 * density * cfr * face.area * speed * (speed * flow_dir))
}

// ----- Pressure and suction drag -----

/// Empirical pressure drag on one face.
///
/// Faces whose normal opposes the motion (`cosθ <= 0`) take the pressure
/// terms along `+n`; the rest take the suction terms along `−n`.
pub(super) fn pressure_drag_on_face(normal: Vec3, area: f32, velocity: Vec3, c: &DragCoefficients) -> Option<Vec3> {
    let speed = velocity.length();
    if !(speed > VELOCITY_EPSILON) {
        return None;
    }
    let cos_theta = (velocity / speed).dot(normal);
    if !cos_theta.is_finite() {
        return None;
    }
    let r = speed / c.reference_speed;
    let f = if cos_theta <= 0.0 {
        (c.pressure_linear * r + c.pressure_quadratic * r * r) * area * cos_theta.abs().powf(c.pressure_falloff) * normal
    } else {
        -(c.suction_linear * r + c.suction_quadratic * r * r) * area * cos_theta.powf(c.suction_falloff) * normal
    };
    Some(f)
}

// ----- Above the water -----

/// Quadratic air drag on an emerged face that leads the motion.
pub(super) fn air_resistance_on_face(face: &EmergedFace, velocity: Vec3, air_density: f32, coefficient: f32) -> Option<Vec3> {
    let speed = velocity.length();
    if !(speed > VELOCITY_EPSILON) {
        return None;
    }
    let cos_theta = (velocity / speed).dot(face.normal);
    if !(cos_theta > 0.0) {
        return None;
    }
    Some(-0.5 * air_density * coefficient * face.area * cos_theta * speed * velocity)
}

// ----- Slamming -----

/// Impulsive load on a face that is punching into the water.
///
/// `rate` is the swept-volume growth `Γ` of its source triangle, normalised by
/// hull surface area. The stopping force `−m·v·2A/S` is ramped by
/// `clamp(Γ/Γmax)^p` and scaled by how squarely the face hits.
pub(super) fn slamming_on_face(
    face: &SubmergedFace,
    velocity: Vec3,
    rate: f32,
    mass: f32,
    hull_area: f32,
    c: &SlammingCoefficients,
) -> Option<Vec3> {
    let speed = velocity.length();
    if !(rate > 0.0) || !(speed > VELOCITY_EPSILON) || !(hull_area > 0.0) {
        return None;
    }
    let cos_theta = (velocity / speed).dot(face.normal);
    if !(cos_theta > 0.0) {
        return None;
    }
    let stopping = -mass * velocity * (2.0 * face.area / hull_area);
    let ramp = (rate / c.max_rate).clamp(0.0, 1.0).powf(c.ramp_power);
    Some(ramp * cos_theta * stopping)
}
