use bevy_math::Vec3;

use crate::math::triangle_area;
use crate::HydroError;

/// Immutable hull-local triangle mesh.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    normals: Option<Vec<Vec3>>,
}

impl TriangleMesh {
    /// Validates that every index references a vertex and that normals, when
    /// given, line up one-to-one with the vertices.
    pub fn new(
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        normals: Option<Vec<Vec3>>,
    ) -> Result<Self, HydroError> {
        let vertex_count = vertices.len();
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(HydroError::IndexOutOfRange { triangle, index, vertex_count });
            }
        }
        if let Some(n) = &normals {
            if n.len() != vertex_count {
                return Err(HydroError::NormalCountMismatch { normals: n.len(), vertices: vertex_count });
            }
        }
        Ok(Self { vertices, triangles, normals })
    }

    // Caller guarantees valid indices and matching normals.
    pub(crate) fn from_raw(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>, normals: Option<Vec<Vec3>>) -> Self {
        Self { vertices, triangles, normals }
    }

    /// Axis-aligned box centred on the origin with flat per-face normals
    /// (4 vertices per face, outward counter-clockwise winding).
    pub fn cuboid(half_extents: Vec3) -> Self {
        // (outward normal, u, v) with u × v = normal
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        let mut vertices = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);
        for (n, u, v) in FACES {
            let c = n * half_extents;
            let u = u * half_extents;
            let v = v * half_extents;
            let base = vertices.len() as u32;
            vertices.extend([c - u - v, c + u - v, c + u + v, c - u + v]);
            normals.extend([n; 4]);
            triangles.push([base, base + 1, base + 2]);
            triangles.push([base, base + 2, base + 3]);
        }
        Self { vertices, triangles, normals: Some(normals) }
    }

    pub fn vertices(&self) -> &[Vec3] { &self.vertices }

    pub fn triangles(&self) -> &[[u32; 3]] { &self.triangles }

    pub fn normals(&self) -> Option<&[Vec3]> { self.normals.as_deref() }

    pub fn triangle_count(&self) -> usize { self.triangles.len() }

    #[inline]
    pub fn triangle(&self, t: usize) -> [Vec3; 3] {
        self.triangles[t].map(|i| self.vertices[i as usize])
    }

    /// Unnormalized face direction: the mean of the vertex normals, or the
    /// winding normal when the mesh carries none.
    pub fn face_normal(&self, t: usize) -> Vec3 {
        let idx = self.triangles[t];
        match &self.normals {
            Some(n) => (n[idx[0] as usize] + n[idx[1] as usize] + n[idx[2] as usize]) / 3.0,
            None => {
                let [a, b, c] = self.triangle(t);
                (b - a).cross(c - a)
            }
        }
    }

    pub fn triangle_area(&self, t: usize) -> f32 {
        let [a, b, c] = self.triangle(t);
        triangle_area(a, b, c)
    }

    pub fn surface_area(&self) -> f32 {
        (0..self.triangles.len()).map(|t| self.triangle_area(t)).sum()
    }

    /// Local-space bounding box; `(ZERO, ZERO)` for an empty mesh.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let Some(&first) = self.vertices.first() else {
            return (Vec3::ZERO, Vec3::ZERO);
        };
        self.vertices
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}
