use serde::{Deserialize, Serialize};

use crate::HydroError;

/// Tunable parameters for the whole pipeline.
///
/// Supplied at construction and safe to edit between steps; nothing here is
/// cached by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydroConfig {
    pub water: WaterProperties,
    pub patch: PatchConfig,
    pub forces: ForceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterProperties {
    /// kg/m³
    pub density: f32,
    /// Kinematic viscosity ν (m²/s).
    pub kinematic_viscosity: f32,
    /// m/s², positive down
    pub gravity: f32,
    pub air_density: f32,
}

impl Default for WaterProperties {
    fn default() -> Self {
        Self {
            density: 1025.0,
            kinematic_viscosity: 1.0e-6,
            gravity: 9.81,
            air_density: 1.225,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Edge length of the square patch (m). Should comfortably cover the hull footprint.
    pub side_length: f32,
    /// Cells per side.
    pub fidelity: u32,
    pub max_search_iterations: u32,
    pub search_tolerance: f32,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            side_length: 16.0,
            fidelity: 16,
            max_search_iterations: 8,
            search_tolerance: 0.01,
        }
    }
}

/// How hydrostatic lift is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuoyancyPolicy {
    /// One force of ρ·g·V at the volume centroid.
    #[default]
    Volume,
    /// Column pressure on every downward-facing submerged face.
    PerFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    pub buoyancy: bool,
    pub buoyancy_policy: BuoyancyPolicy,
    /// PerFace only: push at each face's pressure centre instead of its centroid.
    pub apply_at_pressure_centers: bool,

    pub viscous: bool,
    /// Waterline length used for the Reynolds number; hull Z extent when unset.
    pub characteristic_length: Option<f32>,
    /// Hull-local z range the form factor is interpolated across; hull bounds when unset.
    pub form_z_range: Option<[f32; 2]>,

    pub pressure_drag: bool,
    pub drag: DragCoefficients,

    pub slamming: bool,
    pub slam: SlammingCoefficients,

    pub air_resistance: bool,
    pub air_drag_coefficient: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            buoyancy: true,
            buoyancy_policy: BuoyancyPolicy::Volume,
            apply_at_pressure_centers: false,
            viscous: true,
            characteristic_length: None,
            form_z_range: None,
            pressure_drag: true,
            drag: DragCoefficients::default(),
            slamming: false,
            slam: SlammingCoefficients::default(),
            air_resistance: false,
            air_drag_coefficient: 1.28,
        }
    }
}

/// Empirical pressure/suction drag terms, `(C1·r + C2·r²)·A·|cosθ|^f` with `r = |v|/v_ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragCoefficients {
    pub reference_speed: f32,
    pub pressure_linear: f32,
    pub pressure_quadratic: f32,
    pub pressure_falloff: f32,
    pub suction_linear: f32,
    pub suction_quadratic: f32,
    pub suction_falloff: f32,
}

impl Default for DragCoefficients {
    fn default() -> Self {
        Self {
            reference_speed: 1.0,
            pressure_linear: 10.0,
            pressure_quadratic: 10.0,
            pressure_falloff: 0.5,
            suction_linear: 10.0,
            suction_quadratic: 10.0,
            suction_falloff: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlammingCoefficients {
    /// Swept-volume rate at which the full stopping force applies (1/s).
    pub max_rate: f32,
    /// Ramp exponent on `Γ / Γmax`.
    pub ramp_power: f32,
}

impl Default for SlammingCoefficients {
    fn default() -> Self {
        Self { max_rate: 1.0, ramp_power: 2.0 }
    }
}

impl HydroConfig {
    pub fn validate(&self) -> Result<(), HydroError> {
        let w = &self.water;
        if !(w.density > 0.0) || !(w.kinematic_viscosity > 0.0) || !(w.gravity >= 0.0) {
            return Err(HydroError::InvalidConfig(format!(
                "water density and viscosity must be positive, gravity non-negative (got {w:?})"
            )));
        }
        let p = &self.patch;
        if !(p.side_length > 0.0) || !p.side_length.is_finite() {
            return Err(HydroError::InvalidConfig(format!("patch side length {} must be positive", p.side_length)));
        }
        if p.fidelity == 0 {
            return Err(HydroError::InvalidConfig("patch fidelity must be at least 1".into()));
        }
        if !(self.forces.drag.reference_speed > 0.0) {
            return Err(HydroError::InvalidConfig("drag reference speed must be positive".into()));
        }
        if let Some(l) = self.forces.characteristic_length {
            if !(l > 0.0) {
                return Err(HydroError::InvalidConfig(format!("characteristic length {l} must be positive")));
            }
        }
        if !(self.forces.slam.max_rate > 0.0) {
            return Err(HydroError::InvalidConfig("slamming max rate must be positive".into()));
        }
        Ok(())
    }
}

pub mod presets {
    use super::*;

    /// Fresh water, heavy linear pressure damping: a box dropped in settles
    /// within a few seconds. Handy for regression runs.
    pub fn damped_box() -> HydroConfig {
        HydroConfig {
            water: WaterProperties { density: 1000.0, ..WaterProperties::default() },
            patch: PatchConfig { side_length: 4.0, fidelity: 8, ..PatchConfig::default() },
            forces: ForceConfig {
                drag: DragCoefficients {
                    pressure_linear: 2000.0,
                    pressure_quadratic: 200.0,
                    suction_linear: 2000.0,
                    suction_quadratic: 200.0,
                    ..DragCoefficients::default()
                },
                ..ForceConfig::default()
            },
        }
    }

    // Roughly a 10 m workboat in seawater
    pub fn small_boat() -> HydroConfig {
        HydroConfig {
            patch: PatchConfig { side_length: 24.0, fidelity: 24, ..PatchConfig::default() },
            forces: ForceConfig {
                buoyancy_policy: BuoyancyPolicy::PerFace,
                apply_at_pressure_centers: true,
                slamming: true,
                air_resistance: true,
                ..ForceConfig::default()
            },
            ..HydroConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_presets_validate() {
        assert!(HydroConfig::default().validate().is_ok());
        assert!(presets::damped_box().validate().is_ok());
        assert!(presets::small_boat().validate().is_ok());
    }

    #[test]
    fn zero_fidelity_is_rejected() {
        let mut cfg = HydroConfig::default();
        cfg.patch.fidelity = 0;
        assert!(matches!(cfg.validate(), Err(HydroError::InvalidConfig(_))));
    }

    #[test]
    fn nan_density_is_rejected() {
        let mut cfg = HydroConfig::default();
        cfg.water.density = f32::NAN;
        assert!(cfg.validate().is_err());
    }
}
