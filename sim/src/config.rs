use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bevy_math::Vec3;
use clap::Parser;
use hydro::HydroConfig;
use serde::{Deserialize, Serialize};

use crate::waves::GerstnerWaves;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Drop a hull into water and watch it settle", long_about = None)]
pub struct Args {
    /// Scenario file
    #[arg(long, default_value = "sim.toml")]
    pub config: PathBuf,

    /// Override the number of steps in the scenario
    #[arg(long)]
    pub steps: Option<usize>,

    /// Log a status line every N steps (0 disables)
    #[arg(long)]
    pub log_every: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub dt: f32,
    pub steps: usize,
    pub log_every: usize,
    pub body: BodyConfig,
    pub water: WaterConfig,
    pub hydro: HydroConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            steps: 1200,
            log_every: 60,
            body: BodyConfig::default(),
            water: WaterConfig::default(),
            hydro: HydroConfig::default(),
        }
    }
}

/// Box-shaped hull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub half_extents: Vec3,
    pub mass: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Initial roll, pitch and yaw in radians (XYZ order).
    pub attitude: Vec3,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec3::new(1.0, 0.25, 1.0),
            mass: 600.0,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            attitude: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WaterConfig {
    Flat { level: f32 },
    Gerstner(GerstnerWaves),
}

impl Default for WaterConfig {
    fn default() -> Self { WaterConfig::Flat { level: 0.0 } }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.dt > 0.0 && self.dt.is_finite(), "dt must be positive, got {}", self.dt);
        anyhow::ensure!(self.body.mass > 0.0, "body mass must be positive, got {}", self.body.mass);
        anyhow::ensure!(
            self.body.half_extents.min_element() > 0.0,
            "body half extents must be positive, got {:?}",
            self.body.half_extents
        );
        self.hydro.validate()?;
        Ok(())
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(steps) = args.steps {
            self.steps = steps;
        }
        if let Some(every) = args.log_every {
            self.log_every = every;
        }
    }
}

pub fn parse_config(text: &str) -> Result<ScenarioConfig> {
    let cfg: ScenarioConfig = toml::from_str(text).context("parsing scenario")?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: &Path) -> Result<ScenarioConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro::BuoyancyPolicy;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, ScenarioConfig::default());
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let cfg = parse_config(
            r#"
            steps = 10
            [body]
            mass = 450.0
            position = [1.0, 0.5, -2.0]
            [hydro.forces]
            buoyancy_policy = "PerFace"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.steps, 10);
        assert_eq!(cfg.body.mass, 450.0);
        assert_eq!(cfg.body.position, Vec3::new(1.0, 0.5, -2.0));
        assert_eq!(cfg.body.half_extents, BodyConfig::default().half_extents);
        assert_eq!(cfg.hydro.forces.buoyancy_policy, BuoyancyPolicy::PerFace);
        assert_eq!(cfg.hydro.water, HydroConfig::default().water);
    }

    #[test]
    fn gerstner_water_is_tagged() {
        let cfg = parse_config(
            r#"
            [water]
            kind = "gerstner"
            level = 0.2
            [[water.layers]]
            direction = [1.0, 0.0]
            amplitude = 0.1
            wavelength = 6.0
            steepness = 0.5
            "#,
        )
        .unwrap();
        let WaterConfig::Gerstner(waves) = cfg.water else { panic!("expected gerstner water") };
        assert_eq!(waves.level, 0.2);
        assert_eq!(waves.layers.len(), 1);
        assert_eq!(waves.layers[0].wavelength, 6.0);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(parse_config("dt = 0.0").is_err());
        assert!(parse_config("[body]\nmass = -1.0").is_err());
        assert!(parse_config("[hydro.patch]\nfidelity = 0").is_err());
    }

    #[test]
    fn args_override_scenario() {
        let mut cfg = ScenarioConfig::default();
        let args = Args::parse_from(["sim", "--steps", "5", "--log-every", "0"]);
        cfg.apply_args(&args);
        assert_eq!(cfg.steps, 5);
        assert_eq!(cfg.log_every, 0);
        assert_eq!(args.config, PathBuf::from("sim.toml"));
    }
}
