//! Implementation of the `install` target.
//!
//! Expands the pipeline and rebuilds every stale output, in declaration order.

use std::path::Path;

use anyhow::{Context, Result};

use assetkit_lib::pipeline::{BuildReport, build};

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success, symbols};

pub fn cmd_install(
  root: &Path,
  config: Option<&Path>,
  dest: Option<&str>,
  verbose: bool,
  output: OutputFormat,
) -> Result<()> {
  let pipeline = super::load_config(root, config, dest)?;
  let report = build(root, &pipeline).context("Build failed")?;

  if output.is_json() {
    return print_json(&report);
  }
  print_summary(root, &report, verbose);
  Ok(())
}

fn print_summary(root: &Path, report: &BuildReport, verbose: bool) {
  if report.is_noop() {
    print_info("Everything up to date");
  } else {
    print_success("Install complete");
  }
  print_stat("Built", &report.executed.len().to_string());
  print_stat("Up to date", &report.up_to_date.to_string());
  print_stat("Duration", &format_duration(report.duration));

  if verbose && !report.executed.is_empty() {
    println!();
    for path in &report.executed {
      let shown = path.strip_prefix(root).unwrap_or(path);
      println!("  {} {}", symbols::ARROW, shown.display());
    }
  }
}
