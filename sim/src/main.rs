use anyhow::Result;
use clap::Parser;
use tracing::info;

use sim::{load_config, run, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = load_config(&args.config)?;
    cfg.apply_args(&args);
    info!(?cfg, "Scenario loaded");

    let summary = run(&cfg)?;
    let expected = cfg.body.mass / cfg.hydro.water.density;
    info!(?summary, expected_volume = expected, "Run finished");
    Ok(())
}
