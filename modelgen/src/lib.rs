//! File-level wiring for the model generator: load a vehicle config, derive
//! the parameter set, resolve the template, write the output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vehicle::{substitute, Constants, ModelParams, PrimaryConfig, ThrusterHardware};

#[derive(Parser, Debug, Clone)]
#[command(name = "modelgen")]
#[command(about = "Generate an SDF model from a template and a vehicle config", long_about = None)]
pub struct Args {
    /// The SDF template containing @placeholders
    pub template: PathBuf,
    /// Where to write the resolved SDF
    pub output: PathBuf,
    /// The vehicle configuration file (TOML)
    pub config: PathBuf,
}

pub fn load_config(path: &Path) -> Result<PrimaryConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = PrimaryConfig::from_toml_str(&raw)
        .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config)
}

/// Run the whole generation pipeline. The output file is only written once
/// every placeholder in the template has resolved.
pub fn generate(args: &Args) -> Result<()> {
    let config = load_config(&args.config)?;
    let params = ModelParams::derive(
        &config,
        &Constants::default(),
        &ThrusterHardware::default(),
    )?;

    info!(
        model = %config.model_name,
        control = %config.control_method,
        thrusters = config.thrusters.len(),
        "Derived vehicle parameters"
    );

    let template = fs::read_to_string(&args.template)
        .with_context(|| format!("reading template {}", args.template.display()))?;
    let resolved = substitute(&template, &params.values())
        .with_context(|| format!("resolving template {}", args.template.display()))?;
    fs::write(&args.output, resolved)
        .with_context(|| format!("writing output {}", args.output.display()))?;

    info!(output = %args.output.display(), "Model file written");
    Ok(())
}
