//! Build pipeline.
//!
//! A [`Pipeline`] is the ordered list of tasks for one build invocation,
//! expanded from a [`PipelineConfig`]. Running it checks each task in
//! declaration order and executes the stale ones. A later task may list an
//! earlier task's output as an input; ordering is the only dependency
//! mechanism.
//!
//! # Submodules
//!
//! - [`expand`] - Turning configured steps into tasks

mod expand;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::action::{ActionError, BuildContext};
use crate::config::{ConfigError, PipelineConfig};
use crate::task::Task;

/// Errors that abort a build or clean.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A directory named by a step could not be listed.
  #[error("failed to list {dir}")]
  List {
    dir: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A task's action failed. The whole run stops here.
  #[error("failed to build {output}")]
  Task {
    output: PathBuf,
    #[source]
    source: ActionError,
  },

  /// The destination is not a directory below the project root.
  #[error("destination {path} must be a directory inside the project root")]
  Destination { path: PathBuf },

  /// The destination tree could not be removed.
  #[error("failed to remove {path}")]
  Clean {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Summary of one pipeline run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BuildReport {
  /// Outputs whose action ran, in execution order.
  pub executed: Vec<PathBuf>,
  /// Number of tasks that were already up to date.
  pub up_to_date: usize,
  /// Total number of tasks checked.
  pub total: usize,
  /// Wall-clock time spent running tasks.
  #[serde(serialize_with = "serialize_millis", rename = "duration_ms")]
  pub duration: Duration,
}

impl BuildReport {
  /// True when nothing had to be rebuilt.
  pub fn is_noop(&self) -> bool {
    self.executed.is_empty()
  }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u128(duration.as_millis())
}

/// The expanded task list for one build.
#[derive(Debug)]
pub struct Pipeline {
  ctx: BuildContext,
  tasks: Vec<Task>,
}

impl Pipeline {
  /// Build an empty pipeline around `ctx`.
  pub fn new(ctx: BuildContext) -> Self {
    Self { ctx, tasks: Vec::new() }
  }

  /// Expand every step of `config` for the project at `root`.
  pub fn from_config(root: &Path, config: &PipelineConfig) -> Result<Self, PipelineError> {
    let mut pipeline = Self::new(BuildContext::new(root, &config.destination));
    check_destination(&pipeline.ctx)?;
    for step in &config.steps {
      let before = pipeline.tasks.len();
      expand::expand_step(&pipeline.ctx, &config.tools, step, &mut pipeline.tasks)?;
      debug!(kind = step.kind(), tasks = pipeline.tasks.len() - before, "expanded step");
    }
    Ok(pipeline)
  }

  /// Append a task after the configured ones.
  pub fn push(&mut self, task: Task) {
    self.tasks.push(task);
  }

  pub fn context(&self) -> &BuildContext {
    &self.ctx
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  /// Run every task in order. The first failure aborts the run.
  pub fn run(&self) -> Result<BuildReport, PipelineError> {
    let start = Instant::now();
    let mut report = BuildReport::default();

    for task in &self.tasks {
      report.total += 1;
      let ran = task.run_if_stale(&self.ctx).map_err(|e| PipelineError::Task {
        output: task.output().to_path_buf(),
        source: e,
      })?;
      if ran {
        report.executed.push(task.output().to_path_buf());
      } else {
        report.up_to_date += 1;
      }
    }

    report.duration = start.elapsed();
    info!(
      total = report.total,
      executed = report.executed.len(),
      up_to_date = report.up_to_date,
      "build complete"
    );
    Ok(report)
  }
}

fn check_destination(ctx: &BuildContext) -> Result<(), PipelineError> {
  if ctx.destination_is_contained() {
    return Ok(());
  }
  Err(PipelineError::Destination {
    path: ctx.destination().to_path_buf(),
  })
}

/// Expand `config` for the project at `root` and run it.
pub fn build(root: &Path, config: &PipelineConfig) -> Result<BuildReport, PipelineError> {
  Pipeline::from_config(root, config)?.run()
}

/// Remove the destination tree.
///
/// Returns whether anything was removed; a missing tree is not an error.
/// A destination that is the project root or lies outside it is refused.
pub fn clean(ctx: &BuildContext) -> Result<bool, PipelineError> {
  check_destination(ctx)?;
  let path = ctx.destination();
  info!(path = %path.display(), "removing tree");
  match fs::remove_dir_all(path) {
    Ok(()) => Ok(true),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "nothing to remove");
      Ok(false)
    }
    Err(e) => Err(PipelineError::Clean {
      path: path.to_path_buf(),
      source: e,
    }),
  }
}
