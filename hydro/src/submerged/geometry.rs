use bevy_math::Vec3;

use crate::math::HullTransform;
use crate::mesh::TriangleMesh;

/// One submerged piece of a hull triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmergedFace {
    /// Index of the hull triangle this piece was cut from.
    pub source: usize,
    /// Hull-local corners.
    pub local: [Vec3; 3],
    /// Hull-local normal, pointing like the source's averaged vertex normals,
    /// with length equal to twice the piece's area.
    pub local_normal: Vec3,
    /// World-space unit normal. NaN when the source normals cancel out.
    pub normal: Vec3,
    /// World-space centroid.
    pub center: Vec3,
    /// Signed height of `center` above the water (negative = under).
    pub height: f32,
    pub area: f32,
    /// World-space point where the hydrostatic load of this piece acts.
    pub pressure_center: Vec3,
}

/// A piece of hull triangle above the water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmergedFace {
    pub source: usize,
    pub normal: Vec3,
    pub center: Vec3,
    pub area: f32,
}

/// Everything the force models need to know about the wetted hull for one step.
///
/// Built from scratch by [`SubmergedGeometryBuilder`](super::SubmergedGeometryBuilder)
/// every step and never edited afterwards.
#[derive(Debug, Clone, Default)]
pub struct SubmergedGeometry {
    pub transform: HullTransform,
    pub faces: Vec<SubmergedFace>,
    pub emerged: Vec<EmergedFace>,
    /// Submerged area per hull triangle, indexed like the hull mesh.
    pub source_areas: Vec<f32>,
    /// Displaced volume (m³).
    pub volume: f32,
    /// Centre of the displaced volume (world). Zero when `volume` is zero.
    ///
    /// Each column is centred half-way down from its piece's centroid, which is
    /// exact only for level pieces; on sloped faces this is an approximation
    /// whose error depends on how the hull is triangulated.
    pub centroid: Vec3,
}

impl SubmergedGeometry {
    pub fn is_empty(&self) -> bool { self.faces.is_empty() }

    pub fn wetted_area(&self) -> f32 { self.faces.iter().map(|f| f.area).sum() }

    /// Submerged pieces as a standalone hull-local mesh (unshared vertices).
    pub fn to_mesh(&self) -> TriangleMesh {
        let mut vertices = Vec::with_capacity(self.faces.len() * 3);
        let mut normals = Vec::with_capacity(self.faces.len() * 3);
        let mut triangles = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            let base = vertices.len() as u32;
            vertices.extend(face.local);
            normals.extend([face.local_normal.normalize_or_zero(); 3]);
            triangles.push([base, base + 1, base + 2]);
        }
        TriangleMesh::from_raw(vertices, triangles, Some(normals))
    }
}

/// Signed-volume integration over the submerged surface.
///
/// Each piece contributes the water column between it and the surface:
/// `v = A_xz · depth` centred half-way up the column. Columns under
/// downward-facing pieces add, those over upward-facing pieces subtract, which
/// leaves the enclosed volume for a watertight hull.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct VolumeAccumulator {
    down_volume: f32,
    down_moment: Vec3,
    up_volume: f32,
    up_moment: Vec3,
}

impl VolumeAccumulator {
    pub(crate) fn add(&mut self, projected_area: f32, center: Vec3, height: f32, normal_y: f32) {
        let depth = -height;
        let v = projected_area * depth;
        let c = center + Vec3::new(0.0, 0.5 * depth, 0.0);
        if normal_y < 0.0 {
            self.down_volume += v;
            self.down_moment += c * v;
        } else {
            self.up_volume += v;
            self.up_moment += c * v;
        }
    }

    /// `(volume, centroid)`.
    pub(crate) fn finish(self) -> (f32, Vec3) {
        let volume = self.down_volume - self.up_volume;
        if volume.abs() < 1e-9 {
            return (volume, Vec3::ZERO);
        }
        (volume, (self.down_moment - self.up_moment) / volume)
    }
}
