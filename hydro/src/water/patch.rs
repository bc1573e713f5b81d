use bevy_math::Vec3;
use tracing::{debug, trace};

use super::sampler::{HeightFieldSampler, HeightSample};
use crate::config::PatchConfig;
use crate::math::height_above_plane;
use crate::HydroError;

/// Outcome of refreshing the patch heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchRefresh {
    Sampled,
    /// The sampler had no context this step; previous heights were kept.
    Stale,
}

/// Square grid of water-surface samples that follows the hull around.
///
/// The grid has `(N+1)²` points stored row-major. Row `i` runs along −Z from
/// the origin and column `j` along +X, so point `(i, j)` sits at
/// `origin + (j·cell, y, −i·cell)`. Each cell is split along the
/// `(i, j)`–`(i+1, j+1)` diagonal into two upward-facing triangles.
///
/// Points outside the grid are clamped to the nearest edge cell, and that
/// cell's plane is extrapolated.
pub struct WaterPatch<S: HeightFieldSampler> {
    sampler: S,
    origin: Vec3,
    side_length: f32,
    fidelity: u32,
    cell_size: f32,
    max_iterations: u32,
    tolerance: f32,
    points: Vec<Vec3>,
    samples: Vec<HeightSample>,
}

impl<S: HeightFieldSampler> WaterPatch<S> {
    /// Builds the grid at `origin` and takes an initial height sample.
    pub fn new(sampler: S, config: &PatchConfig, origin: Vec3) -> Result<Self, HydroError> {
        if !origin.is_finite() {
            return Err(HydroError::InvalidConfig(format!("patch origin {origin:?} is not finite")));
        }
        let mut patch = Self {
            sampler,
            origin,
            side_length: 0.0,
            fidelity: 0,
            cell_size: 0.0,
            max_iterations: config.max_search_iterations,
            tolerance: config.search_tolerance,
            points: Vec::new(),
            samples: Vec::new(),
        };
        patch.reconfigure(config)?;
        patch.resample();
        Ok(patch)
    }

    /// Builds a patch already centred under `hull_position`.
    pub fn centered(sampler: S, config: &PatchConfig, hull_position: Vec3) -> Result<Self, HydroError> {
        let half = 0.5 * config.side_length;
        Self::new(sampler, config, Vec3::new(hull_position.x - half, 0.0, hull_position.z + half))
    }

    /// Applies new search settings and rebuilds the grid if its size changed.
    ///
    /// A rebuilt grid is flat at the origin height until the next
    /// [`update`](Self::update) samples it.
    pub fn reconfigure(&mut self, config: &PatchConfig) -> Result<(), HydroError> {
        if !(config.side_length > 0.0) || !config.side_length.is_finite() {
            return Err(HydroError::InvalidConfig(format!(
                "patch side length {} must be positive",
                config.side_length
            )));
        }
        if config.fidelity == 0 {
            return Err(HydroError::InvalidConfig("patch fidelity must be at least 1".into()));
        }
        self.max_iterations = config.max_search_iterations;
        self.tolerance = config.search_tolerance;
        if config.side_length == self.side_length && config.fidelity == self.fidelity {
            return Ok(());
        }
        self.side_length = config.side_length;
        self.fidelity = config.fidelity;
        self.cell_size = config.side_length / config.fidelity as f32;
        let count = self.row_len() * self.row_len();
        self.points = vec![Vec3::new(0.0, self.origin.y, 0.0); count];
        self.samples = vec![HeightSample::INVALID; count];
        self.layout_grid();
        Ok(())
    }

    /// Recentres the patch under the hull and resamples every grid height.
    pub fn update(&mut self, hull_position: Vec3) -> PatchRefresh {
        let half = 0.5 * self.side_length;
        self.origin = Vec3::new(hull_position.x - half, 0.0, hull_position.z + half);
        self.layout_grid();
        self.resample()
    }

    /// Cell `(i, j)` containing `p`, unchecked: results outside `0..N` mean
    /// the point is off the patch.
    #[inline]
    pub fn point_to_cell(&self, p: Vec3) -> (i32, i32) {
        let d = p - self.origin;
        ((-d.z / self.cell_size).floor() as i32, (d.x / self.cell_size).floor() as i32)
    }

    /// Signed height of `p` above the patch surface (negative = submerged).
    pub fn height_above(&self, p: Vec3) -> Result<f32, HydroError> {
        let (i, j) = self.point_to_cell(p);
        let last = self.fidelity as i32 - 1;
        let (ci, cj) = (i.clamp(0, last), j.clamp(0, last));
        if (ci, cj) != (i, j) {
            trace!(?p, i, j, "height query outside water patch, clamping to edge cell");
        }
        let d = p - self.origin;
        let x_in = d.x - cj as f32 * self.cell_size;
        let z_in = d.z + ci as f32 * self.cell_size;

        let (ci, cj) = (ci as usize, cj as usize);
        let v00 = self.point(ci, cj);
        let v01 = self.point(ci, cj + 1);
        let v10 = self.point(ci + 1, cj);
        let v11 = self.point(ci + 1, cj + 1);
        let tri = if x_in >= -z_in { [v00, v01, v11] } else { [v00, v11, v10] };
        height_above_plane(tri, p)
    }

    /// True when `p` lies within the horizontal extent of the grid.
    pub fn contains(&self, p: Vec3) -> bool {
        let d = p - self.origin;
        (0.0..=self.side_length).contains(&d.x) && (0.0..=self.side_length).contains(&-d.z)
    }

    pub fn origin(&self) -> Vec3 { self.origin }

    pub fn side_length(&self) -> f32 { self.side_length }

    pub fn fidelity(&self) -> u32 { self.fidelity }

    pub fn cell_size(&self) -> f32 { self.cell_size }

    /// Row-major grid points, `(N+1)` per row.
    pub fn grid_points(&self) -> &[Vec3] { &self.points }

    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ { self.points.iter().map(|p| p.y) }

    pub fn sampler(&self) -> &S { &self.sampler }

    pub fn sampler_mut(&mut self) -> &mut S { &mut self.sampler }

    #[inline]
    fn row_len(&self) -> usize { self.fidelity as usize + 1 }

    #[inline]
    fn point(&self, i: usize, j: usize) -> Vec3 { self.points[i * self.row_len() + j] }

    // Horizontal coordinates are derived from the origin, never accumulated.
    fn layout_grid(&mut self) {
        let row = self.row_len();
        let (origin, cell) = (self.origin, self.cell_size);
        for (k, p) in self.points.iter_mut().enumerate() {
            let (i, j) = (k / row, k % row);
            p.x = origin.x + j as f32 * cell;
            p.z = origin.z - i as f32 * cell;
        }
    }

    fn resample(&mut self) -> PatchRefresh {
        let Some(ctx) = self.sampler.fill_search_context() else {
            debug!(origin = ?self.origin, "height sampler unavailable, keeping previous patch heights");
            return PatchRefresh::Stale;
        };
        self.sampler.batch_project(&ctx, &self.points, self.max_iterations, self.tolerance, &mut self.samples);
        for (p, s) in self.points.iter_mut().zip(&self.samples) {
            if s.valid && s.height.is_finite() {
                p.y = s.height;
            }
        }
        PatchRefresh::Sampled
    }
}
