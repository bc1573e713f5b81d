//! Local approximation of the water surface around a hull.

mod patch;
mod sampler;

pub use patch::{PatchRefresh, WaterPatch};
pub use sampler::{FlatWater, HeightFieldSampler, HeightSample};
