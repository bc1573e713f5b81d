//! Hydrostatics and hydrodynamics for a floating hull.
//!
//! Each step the hull is cut against a small sampled patch of the water
//! surface, the wetted part is integrated into a displaced volume, and a set of
//! independent force models turns that snapshot plus the body's motion into
//! forces at points. Wave simulation and rigid-body integration stay outside;
//! [`HeightFieldSampler`] and [`ForceSink`] are the seams.

mod error;
pub use error::HydroError;

pub mod math;
pub use math::HullTransform;

mod mesh;
pub use mesh::TriangleMesh;

pub mod config;
pub use config::{presets, BuoyancyPolicy, HydroConfig};

pub mod water;
pub use water::{FlatWater, HeightFieldSampler, HeightSample, PatchRefresh, WaterPatch};

pub mod submerged;
pub use submerged::{SubmergedFace, SubmergedGeometry, SubmergedGeometryBuilder};

pub mod hydrodynamics;
pub use hydrodynamics::{AppliedForce, ForceReport, ForceSink, HydrodynamicForceModel, RigidBodyState};

mod body;
pub use body::RigidBody;

mod simulation;
pub use simulation::{HullSimulation, StepReport};

pub use bevy_math::{Quat, Vec3};
