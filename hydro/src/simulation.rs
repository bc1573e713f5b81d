use bevy_math::Vec3;

use crate::config::HydroConfig;
use crate::hydrodynamics::{ForceReport, HydrodynamicForceModel, RigidBodyState, SlamInput, SlammingTracker};
use crate::mesh::TriangleMesh;
use crate::submerged::{SubmergedGeometry, SubmergedGeometryBuilder};
use crate::water::{HeightFieldSampler, PatchRefresh, WaterPatch};
use crate::HydroError;

/// Per-step telemetry.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub refresh: PatchRefresh,
    pub forces: ForceReport,
    pub volume: f32,
    pub centroid: Vec3,
    pub wetted_area: f32,
}

/// One hull's full water pipeline: patch → submerged geometry → forces.
///
/// Steps must run one at a time; the geometry snapshot from the previous step
/// is replaced wholesale by the next.
pub struct HullSimulation<S: HeightFieldSampler> {
    config: HydroConfig,
    patch: WaterPatch<S>,
    builder: SubmergedGeometryBuilder,
    model: HydrodynamicForceModel,
    slamming: SlammingTracker,
    geometry: SubmergedGeometry,
}

impl<S: HeightFieldSampler> HullSimulation<S> {
    pub fn new(mesh: TriangleMesh, sampler: S, config: HydroConfig, hull_position: Vec3) -> Result<Self, HydroError> {
        config.validate()?;
        let patch = WaterPatch::centered(sampler, &config.patch, hull_position)?;
        let model = HydrodynamicForceModel::for_mesh(&mesh);
        let slamming = SlammingTracker::new(mesh.triangle_count());
        Ok(Self {
            config,
            patch,
            builder: SubmergedGeometryBuilder::new(mesh),
            model,
            slamming,
            geometry: SubmergedGeometry::default(),
        })
    }

    /// Runs the pipeline for `body` and returns the forces to apply.
    pub fn step(&mut self, body: &RigidBodyState, dt: f32) -> Result<StepReport, HydroError> {
        self.config.validate()?;
        self.patch.reconfigure(&self.config.patch)?;
        let refresh = self.patch.update(body.position);

        self.geometry = self.builder.build(&self.patch, &body.transform())?;

        let slam = self
            .config
            .forces
            .slamming
            .then_some(SlamInput { history: &self.slamming, dt });
        let forces = self.model.compute(&self.config, &self.geometry, body, slam);
        self.slamming.record(&self.geometry, body);

        Ok(StepReport {
            refresh,
            forces,
            volume: self.geometry.volume,
            centroid: self.geometry.centroid,
            wetted_area: self.geometry.wetted_area(),
        })
    }

    /// Snapshot from the latest step.
    pub fn geometry(&self) -> &SubmergedGeometry { &self.geometry }

    pub fn patch(&self) -> &WaterPatch<S> { &self.patch }

    pub fn patch_mut(&mut self) -> &mut WaterPatch<S> { &mut self.patch }

    pub fn mesh(&self) -> &TriangleMesh { self.builder.mesh() }

    pub fn model(&self) -> &HydrodynamicForceModel { &self.model }

    pub fn config(&self) -> &HydroConfig { &self.config }

    /// Edits apply from the next step on.
    pub fn config_mut(&mut self) -> &mut HydroConfig { &mut self.config }
}
