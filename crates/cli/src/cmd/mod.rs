mod clean;
mod install;

use std::path::Path;

use anyhow::{Context, Result};

use assetkit_lib::config::PipelineConfig;

pub use clean::cmd_clean;
pub use install::cmd_install;

/// Load the pipeline for `root`, applying a `--dest` override.
fn load_config(root: &Path, config: Option<&Path>, dest: Option<&str>) -> Result<PipelineConfig> {
  let mut pipeline = PipelineConfig::load(root, config).context("Failed to load pipeline")?;
  if let Some(dest) = dest {
    pipeline.destination = dest.to_string();
  }
  Ok(pipeline)
}
