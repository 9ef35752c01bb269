//! Implementation of the `clean` target.
//!
//! A pipeline file that fails to load falls back to `--dest` or the default
//! destination.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use assetkit_lib::action::BuildContext;
use assetkit_lib::consts::DEFAULT_DESTINATION;
use assetkit_lib::pipeline::clean;

use crate::output::{OutputFormat, print_info, print_json, print_success};

pub fn cmd_clean(root: &Path, config: Option<&Path>, dest: Option<&str>, output: OutputFormat) -> Result<()> {
  let destination = match super::load_config(root, config, dest) {
    Ok(pipeline) => pipeline.destination,
    Err(e) => {
      let fallback = dest.unwrap_or(DEFAULT_DESTINATION);
      warn!(error = %e, destination = fallback, "pipeline not loaded, cleaning fallback destination");
      fallback.to_string()
    }
  };
  let ctx = BuildContext::new(root, &destination);
  let removed = clean(&ctx).context("Clean failed")?;

  if output.is_json() {
    return print_json(&serde_json::json!({
      "destination": ctx.destination(),
      "removed": removed,
    }));
  }

  if removed {
    print_success(&format!("Removed {}", ctx.destination().display()));
  } else {
    print_info("Nothing to clean");
  }
  Ok(())
}
