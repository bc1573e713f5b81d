use bevy_math::Vec3;

use super::clip::{clip_triangle, ClipVertex};
use super::geometry::{EmergedFace, SubmergedFace, SubmergedGeometry, VolumeAccumulator};
use crate::math::{pressure_center, projected_area_xz, triangle_area, triangle_centroid, HullTransform};
use crate::mesh::TriangleMesh;
use crate::water::{HeightFieldSampler, WaterPatch};
use crate::HydroError;

/// Cuts a hull mesh against a [`WaterPatch`] and integrates what lies below.
///
/// Precondition: the hull is watertight. Open or self-intersecting meshes
/// still produce a result, but the volume and centroid are meaningless.
#[derive(Debug, Clone)]
pub struct SubmergedGeometryBuilder {
    mesh: TriangleMesh,
}

impl SubmergedGeometryBuilder {
    pub fn new(mesh: TriangleMesh) -> Self { Self { mesh } }

    pub fn mesh(&self) -> &TriangleMesh { &self.mesh }

    /// Builds this step's snapshot for the hull placed at `transform`.
    ///
    /// The only error is a degenerate water triangle met during a height lookup.
    pub fn build<S: HeightFieldSampler>(
        &self,
        patch: &WaterPatch<S>,
        transform: &HullTransform,
    ) -> Result<SubmergedGeometry, HydroError> {
        let mesh = &self.mesh;

        // Heights once per hull vertex; triangles share corners.
        let mut heights = Vec::with_capacity(mesh.vertices().len());
        for &v in mesh.vertices() {
            heights.push(patch.height_above(transform.transform_point(v))?);
        }

        let mut geometry = SubmergedGeometry {
            transform: *transform,
            source_areas: vec![0.0; mesh.triangle_count()],
            ..SubmergedGeometry::default()
        };
        let mut volume = VolumeAccumulator::default();

        for (t, &idx) in mesh.triangles().iter().enumerate() {
            let corners = idx.map(|i| ClipVertex::new(mesh.vertices()[i as usize], heights[i as usize]));
            let direction = mesh.face_normal(t).normalize();
            let normal = transform.transform_vector(direction);
            let split = clip_triangle(corners);

            for piece in split.below.triangles() {
                let local = piece.map(|c| c.position);
                let world = local.map(|p| transform.transform_point(p));
                let area = triangle_area(world[0], world[1], world[2]);
                let center = triangle_centroid(world[0], world[1], world[2]);
                let height = patch.height_above(center)?;
                let depths = piece.map(|c| -c.height);

                volume.add(projected_area_xz(world[0], world[1], world[2]), center, height, normal.y);
                geometry.source_areas[t] += area;
                geometry.faces.push(SubmergedFace {
                    source: t,
                    local,
                    local_normal: direction * (2.0 * area),
                    normal,
                    center,
                    height,
                    area,
                    pressure_center: pressure_center(world, depths),
                });
            }

            for piece in split.above.triangles() {
                let world = piece.map(|c| transform.transform_point(c.position));
                geometry.emerged.push(EmergedFace {
                    source: t,
                    normal,
                    center: triangle_centroid(world[0], world[1], world[2]),
                    area: triangle_area(world[0], world[1], world[2]),
                });
            }
        }

        (geometry.volume, geometry.centroid) = volume.finish();
        Ok(geometry)
    }
}
