use bevy_math::Vec3;

use super::types::RigidBodyState;
use crate::submerged::SubmergedGeometry;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ContactSample {
    area: f32,
    velocity: Vec3,
}

/// Per hull triangle memory of last step's wetted area and velocity.
///
/// This is the only state the force pipeline carries between steps. Call
/// [`record`](Self::record) once per step after the forces are computed.
#[derive(Debug, Clone, Default)]
pub struct SlammingTracker {
    previous: Vec<ContactSample>,
    primed: bool,
}

/// Slamming history paired with the step length it spans.
#[derive(Debug, Clone, Copy)]
pub struct SlamInput<'a> {
    pub history: &'a SlammingTracker,
    pub dt: f32,
}

impl SlammingTracker {
    pub fn new(triangle_count: usize) -> Self {
        Self { previous: vec![ContactSample::default(); triangle_count], primed: false }
    }

    /// True once at least one step has been recorded.
    pub fn is_primed(&self) -> bool { self.primed }

    pub fn reset(&mut self) {
        self.previous.fill(ContactSample::default());
        self.primed = false;
    }

    /// Stores this step's wetted area and area-weighted contact velocity per hull triangle.
    pub fn record(&mut self, geometry: &SubmergedGeometry, body: &RigidBodyState) {
        self.previous.clear();
        self.previous.resize(geometry.source_areas.len(), ContactSample::default());
        let mut centers = vec![Vec3::ZERO; geometry.source_areas.len()];
        for face in &geometry.faces {
            centers[face.source] += face.center * face.area;
        }
        for (t, sample) in self.previous.iter_mut().enumerate() {
            let area = geometry.source_areas[t];
            if area > 0.0 {
                *sample = ContactSample { area, velocity: body.point_velocity(centers[t] / area) };
            }
        }
        self.primed = true;
    }

    /// `Γ` for hull triangle `t`: growth of `A·|v|` since the last record,
    /// per unit hull area and time. `None` without usable history.
    pub(super) fn swept_rate(&self, t: usize, area: f32, velocity: Vec3, hull_area: f32, dt: f32) -> Option<f32> {
        if !self.primed || !(dt > 0.0) || !(hull_area > 0.0) {
            return None;
        }
        let prev = self.previous.get(t)?;
        Some((area * velocity.length() - prev.area * prev.velocity.length()) / (hull_area * dt))
    }
}
