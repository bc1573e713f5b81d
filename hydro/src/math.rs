use bevy_math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::HydroError;

/// Placement of the hull in the world (local → world).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for HullTransform {
    fn default() -> Self { Self::IDENTITY }
}

impl HullTransform {
    pub const IDENTITY: Self = Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY };

    pub const fn new(translation: Vec3, rotation: Quat) -> Self { Self { translation, rotation } }

    pub const fn from_translation(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation * p + self.translation
    }

    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }

    #[inline]
    pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.inverse() * (p - self.translation)
    }
}

#[inline]
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    0.5 * (b - a).cross(c - a).length()
}

#[inline]
pub fn triangle_centroid(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (a + b + c) / 3.0
}

/// Area of the triangle's shadow on the horizontal (XZ) plane.
#[inline]
pub fn projected_area_xz(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    let e1 = (b - a).with_y(0.0);
    let e2 = (c - a).with_y(0.0);
    0.5 * e1.cross(e2).length()
}

/// Signed vertical distance from `p` to the plane through `tri` (negative = below).
///
/// With the unnormalized plane normal `(a, b, c)` and `d = n·tri[0]` this is
/// `p.y - (d - a·p.x - c·p.z) / b`. A vertical plane (`b == 0`) has no height
/// to offer and is reported as [`HydroError::DegenerateGeometry`].
pub fn height_above_plane(tri: [Vec3; 3], p: Vec3) -> Result<f32, HydroError> {
    let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
    if n.y == 0.0 || n.y.is_nan() {
        return Err(HydroError::DegenerateGeometry { normal: n });
    }
    let d = n.dot(tri[0]);
    Ok(p.y - (d - n.x * p.x - n.z * p.z) / n.y)
}

/// Centre of a pressure field that varies linearly over the triangle.
///
/// `∫p·x dA / ∫p dA` for vertex pressures `p_k` reduces to
/// `((Σp)(Σx) + Σ p_k x_k) / (4 Σp)`. Negative pressures are treated as zero;
/// with no load at all the centroid is returned.
pub fn pressure_center(vertices: [Vec3; 3], pressures: [f32; 3]) -> Vec3 {
    let p = pressures.map(|v| v.max(0.0));
    let sum_p = p[0] + p[1] + p[2];
    let sum_x = vertices[0] + vertices[1] + vertices[2];
    if sum_p <= 1e-9 {
        return sum_x / 3.0;
    }
    let weighted = vertices[0] * p[0] + vertices[1] * p[1] + vertices[2] * p[2];
    (sum_x * sum_p + weighted) / (4.0 * sum_p)
}
