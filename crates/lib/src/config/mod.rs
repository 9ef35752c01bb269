//! Pipeline configuration.
//!
//! The pipeline is described in TOML. Lookup order:
//!
//! 1. An explicit path (resolved against the project root)
//! 2. `<root>/assetkit.toml`
//! 3. The built-in default pipeline
//!
//! # Example
//!
//! ```toml
//! destination = "assets"
//!
//! [tools]
//! sass = ["sass", "--style", "compact"]
//!
//! [[step]]
//! kind = "concat"
//! output = "static/js/app-vendor.js"
//! inputs = ["vendors/jquery.min.js", "vendors/lodash.min.js"]
//! ```

mod types;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::CONFIG_FILE_NAME;

pub use types::*;

const BUILTIN_CONFIG: &str = include_str!("default.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config {path}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

impl PipelineConfig {
  /// Parse a pipeline from TOML text. `origin` is only used in errors.
  pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::Parse {
      path: origin.to_path_buf(),
      source: e,
    })
  }

  /// Read and parse a pipeline file.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    Self::from_toml(&text, path)
  }

  /// The built-in pipeline for the `www-src/` layout.
  pub fn builtin() -> Result<Self, ConfigError> {
    Self::from_toml(BUILTIN_CONFIG, Path::new("<builtin>"))
  }

  /// Load the pipeline for the project at `root`.
  pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      let path = root.join(path);
      debug!(path = %path.display(), "loading config");
      return Self::from_file(&path);
    }

    let local = root.join(CONFIG_FILE_NAME);
    if local.is_file() {
      debug!(path = %local.display(), "loading config");
      return Self::from_file(&local);
    }

    debug!("no config file found, using built-in pipeline");
    Self::builtin()
  }
}
