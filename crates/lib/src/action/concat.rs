//! Concatenation of source files into one output.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::action::cmd::run_tool;
use crate::action::types::{Action, ActionError, BuildContext};
use crate::util::fs::{read_all, write_output};

/// Concatenate `sources`, in order, into the output.
///
/// With a single source this is a plain copy. When a lint command is set it
/// runs over all sources first, and a lint failure aborts before anything is
/// written.
#[derive(Debug, Clone)]
pub struct Concat {
  sources: Vec<PathBuf>,
  lint: Option<Vec<String>>,
}

impl Concat {
  pub fn new(sources: Vec<PathBuf>) -> Self {
    Self { sources, lint: None }
  }

  pub fn with_lint(mut self, command: Vec<String>) -> Self {
    self.lint = Some(command);
    self
  }
}

impl Action for Concat {
  fn name(&self) -> &'static str {
    if self.lint.is_some() { "lint+concat" } else { "concat" }
  }

  fn execute(&self, ctx: &BuildContext, output: &Path) -> Result<(), ActionError> {
    if let Some(lint) = &self.lint {
      let args: Vec<OsString> = self.sources.iter().map(|p| p.clone().into_os_string()).collect();
      run_tool(ctx, "lint", lint, &args)?;
    }

    let contents = read_all(&self.sources).map_err(|(path, e)| ActionError::read(&path, e))?;
    write_output(output, &contents).map_err(|e| ActionError::write(output, e))
  }
}
