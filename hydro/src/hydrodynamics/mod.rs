//! Forces on the wetted hull: buoyancy, skin friction, pressure drag and
//! the optional slamming and air terms.

mod model;
mod slamming;
mod terms;
mod types;
mod util;

pub use model::{HullDimensions, HydrodynamicForceModel};
pub use slamming::{SlamInput, SlammingTracker};
pub use types::{net_force, AppliedForce, ForceReport, ForceSink, RigidBodyState};
