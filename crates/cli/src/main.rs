use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{cmd_clean, cmd_install};
use output::OutputFormat;

/// assetkit - incremental static asset builder
#[derive(Parser)]
#[command(name = assetkit_lib::consts::APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Targets to run, in order
  #[arg(value_enum, default_values_t = [Target::Install])]
  targets: Vec<Target>,

  /// Project root that all configured paths are relative to
  #[arg(short = 'C', long, default_value = ".")]
  root: PathBuf,

  /// Pipeline file (default: <root>/assetkit.toml, else the built-in pipeline)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Override the output directory
  #[arg(short, long)]
  dest: Option<String>,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
  /// Remove the output tree
  Clean,
  /// Build every stale output
  Install,
}

impl Target {
  fn name(self) -> &'static str {
    match self {
      Target::Clean => "clean",
      Target::Install => "install",
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let root =
    dunce::canonicalize(&cli.root).with_context(|| format!("Project root not found: {}", cli.root.display()))?;

  let announce = cli.targets.len() > 1;
  for target in &cli.targets {
    if announce {
      eprintln!("# {}:", target.name());
    }
    match target {
      Target::Clean => cmd_clean(&root, cli.config.as_deref(), cli.dest.as_deref(), cli.output)?,
      Target::Install => cmd_install(
        &root,
        cli.config.as_deref(),
        cli.dest.as_deref(),
        cli.verbose,
        cli.output,
      )?,
    }
  }

  Ok(())
}
