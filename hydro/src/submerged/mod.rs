//! Waterline clipping of the hull and integration of the displaced volume.

mod builder;
mod clip;
mod geometry;

pub use builder::SubmergedGeometryBuilder;
pub use clip::{clip_triangle, sort_by_height, submerged_count, ClipTriangle, ClipVertex, Clipped, Split};
pub use geometry::{EmergedFace, SubmergedFace, SubmergedGeometry};
