use bevy_math::Vec3;
use rayon::prelude::*;

/// Result of one height query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightSample {
    pub height: f32,
    /// False when the sampler could not produce a usable height for this point.
    pub valid: bool,
}

impl HeightSample {
    pub const INVALID: Self = Self { height: 0.0, valid: false };

    pub const fn at(height: f32) -> Self { Self { height, valid: true } }
}

impl Default for HeightSample {
    fn default() -> Self { Self::INVALID }
}

/// Source of water heights at world positions.
///
/// Implementations may need an iterative search (e.g. undoing the horizontal
/// displacement of a wave field). The search is bounded by `max_iterations`
/// and `error_tolerance`; running out of iterations should return the best
/// candidate rather than fail.
pub trait HeightFieldSampler: Sync {
    /// Snapshot of whatever the search needs (wave parameters, time, ...).
    type Context: Sync;

    /// `None` when the water state is not available this step.
    fn fill_search_context(&self) -> Option<Self::Context>;

    /// Water height under `position`. The y component of `position` is ignored.
    fn project(
        &self,
        ctx: &Self::Context,
        position: Vec3,
        max_iterations: u32,
        error_tolerance: f32,
    ) -> HeightSample;

    /// Answers every query in `positions` into the matching slot of `out`.
    ///
    /// Queries are independent, so the default fans them out across the rayon
    /// pool and returns once all of them are done.
    fn batch_project(
        &self,
        ctx: &Self::Context,
        positions: &[Vec3],
        max_iterations: u32,
        error_tolerance: f32,
        out: &mut [HeightSample],
    ) {
        debug_assert_eq!(positions.len(), out.len());
        positions
            .par_iter()
            .zip(out.par_iter_mut())
            .for_each(|(&p, slot)| *slot = self.project(ctx, p, max_iterations, error_tolerance));
    }
}

/// Still water at a fixed level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatWater {
    pub level: f32,
}

impl FlatWater {
    pub const fn new(level: f32) -> Self { Self { level } }
}

impl HeightFieldSampler for FlatWater {
    type Context = ();

    fn fill_search_context(&self) -> Option<()> { Some(()) }

    fn project(&self, _ctx: &(), _position: Vec3, _max_iterations: u32, _error_tolerance: f32) -> HeightSample {
        HeightSample::at(self.level)
    }
}
