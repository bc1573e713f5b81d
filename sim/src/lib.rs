//! Headless scenario runner for the `hydro` pipeline.

pub mod config;
pub mod run;
pub mod waves;

pub use config::{load_config, Args, BodyConfig, ScenarioConfig, WaterConfig};
pub use run::{run, RunSummary};
pub use waves::{GerstnerWaves, WaveLayer};
