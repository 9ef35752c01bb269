//! External tool invocation.
//!
//! Tools run with the project root as their working directory and inherit
//! stdout/stderr, so compiler and linter diagnostics reach the user directly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::action::types::{Action, ActionError, BuildContext};
use crate::util::fs::ensure_parent;

/// Run `command` (program followed by leading arguments) with `args` appended.
///
/// A non-zero exit status is an error.
pub fn run_tool(ctx: &BuildContext, tool: &str, command: &[String], args: &[OsString]) -> Result<(), ActionError> {
  let Some((program, leading)) = command.split_first() else {
    return Err(ActionError::EmptyCommand { tool: tool.to_string() });
  };

  let cmdline = command
    .iter()
    .cloned()
    .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
    .collect::<Vec<_>>()
    .join(" ");
  info!(cmd = %cmdline, "run");

  let mut process = Command::new(program);
  process.args(leading).args(args).current_dir(ctx.root());

  debug!(tool, working_dir = ?ctx.root(), "spawning process");

  let status = process.status().map_err(|e| ActionError::Spawn {
    cmd: cmdline.clone(),
    source: e,
  })?;

  if !status.success() {
    return Err(ActionError::CmdFailed {
      cmd: cmdline,
      code: status.code(),
    });
  }

  Ok(())
}

/// Compile a single entry file with an external compiler.
///
/// The compiler is invoked as `<command...> <main> <output>`.
#[derive(Debug, Clone)]
pub struct Compile {
  command: Vec<String>,
  main: PathBuf,
}

impl Compile {
  pub fn new(command: Vec<String>, main: impl Into<PathBuf>) -> Self {
    Self {
      command,
      main: main.into(),
    }
  }
}

impl Action for Compile {
  fn name(&self) -> &'static str {
    "compile"
  }

  fn execute(&self, ctx: &BuildContext, output: &Path) -> Result<(), ActionError> {
    ensure_parent(output).map_err(|e| ActionError::write(output, e))?;
    let args = [self.main.clone().into_os_string(), output.as_os_str().to_os_string()];
    run_tool(ctx, "compile", &self.command, &args)
  }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
  use super::*;
  use crate::util::testutil::{copy_cmd, fail_cmd, succeed_cmd, write_file};
  use tempfile::TempDir;
  use tracing_test::traced_test;

  #[test]
  fn run_tool_success() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp.path(), "assets");

    run_tool(&ctx, "lint", &succeed_cmd(), &[]).unwrap();
  }

  #[test]
  #[traced_test]
  fn run_tool_logs_command_line() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp.path(), "assets");

    run_tool(&ctx, "lint", &succeed_cmd(), &[OsString::from("app.js")]).unwrap();

    assert!(logs_contain("true app.js"));
  }

  #[test]
  fn run_tool_failure_reports_exit_code() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp.path(), "assets");

    let result = run_tool(&ctx, "lint", &fail_cmd(), &[]);

    assert!(matches!(result, Err(ActionError::CmdFailed { code: Some(1), .. })));
  }

  #[test]
  fn run_tool_missing_program() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp.path(), "assets");

    let result = run_tool(&ctx, "lint", &["/nonexistent/tool".to_string()], &[]);

    assert!(matches!(result, Err(ActionError::Spawn { .. })));
  }

  #[test]
  fn run_tool_empty_command() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp.path(), "assets");

    let result = run_tool(&ctx, "sass", &[], &[]);

    assert!(matches!(result, Err(ActionError::EmptyCommand { .. })));
  }

  #[test]
  fn compile_creates_output_directory() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp.path(), "assets");
    let main = write_file(temp.path(), "scss/app.scss", "body {}");
    let output = ctx.target("static/css/app.css");

    Compile::new(copy_cmd(), &main).execute(&ctx, &output).unwrap();

    assert_eq!(std::fs::read_to_string(output).unwrap(), "body {}");
  }

  #[test]
  fn compile_runs_in_project_root() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp.path(), "assets");
    write_file(temp.path(), "scss/app.scss", "relative");
    let output = ctx.target("app.css");

    Compile::new(copy_cmd(), "scss/app.scss").execute(&ctx, &output).unwrap();

    assert_eq!(std::fs::read_to_string(output).unwrap(), "relative");
  }
}
