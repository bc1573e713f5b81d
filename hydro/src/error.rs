use bevy_math::Vec3;
use thiserror::Error;

/// Errors raised by the hydro core.
///
/// Sampler outages and numerically degenerate faces are recovered where they
/// happen and never show up here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydroError {
    /// A water triangle whose plane is vertical has no height to interpolate.
    #[error("degenerate water triangle: plane normal {normal:?} has no vertical component")]
    DegenerateGeometry { normal: Vec3 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange { triangle: usize, index: u32, vertex_count: usize },
    #[error("mesh has {normals} normals for {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },
}
