//! Types shared by all build actions.
//!
//! This module defines the `Action` trait, the `BuildContext` every action
//! resolves paths against, and the errors an action can produce.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while executing an action.
#[derive(Debug, Error)]
pub enum ActionError {
  /// A source file could not be read.
  #[error("failed to read {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// An output file could not be written.
  #[error("failed to write {path}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// An external tool could not be started.
  #[error("failed to run {cmd}")]
  Spawn {
    cmd: String,
    #[source]
    source: io::Error,
  },

  /// An external tool exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },

  /// A tool was configured with an empty command line.
  #[error("no command configured for {tool}")]
  EmptyCommand { tool: String },

  /// A template file was found outside the template directory.
  #[error("unexpected file for template: {path} is not under {dir}")]
  TemplateOutsideDir { path: PathBuf, dir: PathBuf },

  /// A migration file name did not carry a usable version.
  #[error("invalid migration file name {filename}: {message}")]
  Migration { filename: String, message: String },

  /// JSON encoding of generated content failed.
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

impl ActionError {
  pub(crate) fn read(path: &Path, source: io::Error) -> Self {
    ActionError::Read {
      path: path.to_path_buf(),
      source,
    }
  }

  pub(crate) fn write(path: &Path, source: io::Error) -> Self {
    ActionError::Write {
      path: path.to_path_buf(),
      source,
    }
  }
}

/// Paths every action resolves against.
///
/// `root` is the project root; relative source paths are joined onto it.
/// `destination` is the target namespace all outputs live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
  root: PathBuf,
  destination: PathBuf,
}

impl BuildContext {
  /// Create a context. A relative `destination` is resolved against `root`.
  pub fn new(root: impl Into<PathBuf>, destination: impl AsRef<Path>) -> Self {
    let root = root.into();
    let destination = root.join(destination);
    Self { root, destination }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn destination(&self) -> &Path {
    &self.destination
  }

  /// Whether the destination is a directory strictly below the project root.
  ///
  /// Destinations such as `""`, `"."` or `"a/.."` name the root itself or
  /// one of its ancestors; nothing may be written to or removed from them.
  pub fn destination_is_contained(&self) -> bool {
    let Ok(rel) = self.destination.strip_prefix(&self.root) else {
      return false;
    };
    let mut below = false;
    for component in rel.components() {
      match component {
        Component::Normal(_) => below = true,
        Component::CurDir => {}
        _ => return false,
      }
    }
    below
  }

  /// Resolve a source path against the project root.
  pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
    self.root.join(path)
  }

  /// Resolve an output path inside the target namespace.
  pub fn target(&self, path: impl AsRef<Path>) -> PathBuf {
    self.destination.join(path)
  }
}

/// A single build operation producing one output file.
///
/// Actions carry everything they need except the output path and the
/// context, which the owning task supplies at execution time.
pub trait Action {
  /// Short label used in logs.
  fn name(&self) -> &'static str;

  /// Produce `output`.
  fn execute(&self, ctx: &BuildContext, output: &Path) -> Result<(), ActionError>;
}
