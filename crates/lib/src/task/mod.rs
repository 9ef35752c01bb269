//! Staleness-checked task runner.
//!
//! A task pairs an output file with the inputs it is built from and the
//! action that builds it. The action runs only when the output is stale:
//!
//! - the output does not exist, or
//! - any input is missing, or
//! - the newest input is strictly newer than the output.
//!
//! Staleness is decided from modification times alone. Each check is a
//! handful of `stat` calls followed by at most one action execution.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::action::{Action, ActionError, BuildContext};

/// Why a task does or does not need to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
  /// The output does not exist.
  MissingOutput,
  /// An input does not exist, so dependency information is incomplete.
  MissingInput(PathBuf),
  /// The named input is newer than the output.
  Newer(PathBuf),
  /// The output is at least as new as every input.
  UpToDate,
}

impl Staleness {
  pub fn is_stale(&self) -> bool {
    !matches!(self, Staleness::UpToDate)
  }
}

impl fmt::Display for Staleness {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Staleness::MissingOutput => write!(f, "output missing"),
      Staleness::MissingInput(path) => write!(f, "input missing: {}", path.display()),
      Staleness::Newer(path) => write!(f, "input changed: {}", path.display()),
      Staleness::UpToDate => write!(f, "up to date"),
    }
  }
}

/// Modification time of `path`, or `None` if it cannot be read.
pub fn modified(path: &Path) -> Option<SystemTime> {
  fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Decide whether `output` needs rebuilding from `inputs`.
///
/// An empty input list carries no dependency information: the output is
/// rebuilt only when it is missing.
pub fn check_staleness(output: &Path, inputs: &[PathBuf]) -> Staleness {
  let Some(output_mtime) = modified(output) else {
    return Staleness::MissingOutput;
  };

  let mut newest: Option<(&Path, SystemTime)> = None;
  for input in inputs {
    let Some(mtime) = modified(input) else {
      return Staleness::MissingInput(input.clone());
    };
    match newest {
      Some((_, t)) if t >= mtime => {}
      _ => newest = Some((input, mtime)),
    }
  }

  match newest {
    Some((path, mtime)) if mtime > output_mtime => Staleness::Newer(path.to_path_buf()),
    _ => Staleness::UpToDate,
  }
}

/// Run `action` if `output` is stale with respect to `inputs`.
///
/// Returns whether the action ran. Errors from the action propagate
/// unchanged; the check itself never fails.
pub fn run_if_stale<E, F>(output: &Path, inputs: &[PathBuf], action: F) -> Result<bool, E>
where
  F: FnOnce() -> Result<(), E>,
{
  let staleness = check_staleness(output, inputs);
  if !staleness.is_stale() {
    debug!(output = %output.display(), "up to date");
    return Ok(false);
  }

  debug!(output = %output.display(), reason = %staleness, "stale");
  action()?;
  Ok(true)
}

/// A declared output, its inputs, and the action that produces it.
pub struct Task {
  output: PathBuf,
  inputs: Vec<PathBuf>,
  action: Box<dyn Action>,
}

impl Task {
  pub fn new(output: impl Into<PathBuf>, inputs: Vec<PathBuf>, action: impl Action + 'static) -> Self {
    Self {
      output: output.into(),
      inputs,
      action: Box::new(action),
    }
  }

  pub fn output(&self) -> &Path {
    &self.output
  }

  pub fn inputs(&self) -> &[PathBuf] {
    &self.inputs
  }

  pub fn action(&self) -> &dyn Action {
    self.action.as_ref()
  }

  pub fn staleness(&self) -> Staleness {
    check_staleness(&self.output, &self.inputs)
  }

  /// Execute the task's action if its output is stale.
  ///
  /// Returns whether the action ran.
  pub fn run_if_stale(&self, ctx: &BuildContext) -> Result<bool, ActionError> {
    run_if_stale(&self.output, &self.inputs, || {
      info!(action = self.action.name(), output = %self.output.display(), "building");
      self.action.execute(ctx, &self.output)
    })
  }
}

impl fmt::Debug for Task {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Task")
      .field("output", &self.output)
      .field("inputs", &self.inputs)
      .field("action", &self.action.name())
      .finish()
  }
}
