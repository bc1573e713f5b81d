use bevy_math::Vec3;
use tracing::warn;

use super::types::AppliedForce;

/// Below this a velocity component counts as zero.
pub(super) const VELOCITY_EPSILON: f32 = 1e-6;

/// Reynolds numbers under this are raised to it before the friction line;
/// the ITTC line is singular at Re = 100.
pub(super) const MIN_REYNOLDS: f32 = 1.0e3;

pub(super) const FORM_FACTOR_MIN: f32 = 1.22;
pub(super) const FORM_FACTOR_MAX: f32 = 1.65;

/// Pushes `force` unless it or its point is non-finite.
#[inline]
pub(super) fn push_checked(
    out: &mut Vec<AppliedForce>,
    rejected: &mut usize,
    effect: &'static str,
    force: Vec3,
    point: Vec3,
) {
    if force.is_finite() && point.is_finite() {
        out.push(AppliedForce { force, point });
    } else {
        warn!(effect, ?force, ?point, "dropping non-finite hydrodynamic force");
        *rejected += 1;
    }
}
