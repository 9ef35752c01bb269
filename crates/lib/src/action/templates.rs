//! Packaging of HTML templates into a script.
//!
//! The generated script registers each template's raw text in the frontend's
//! template cache under a logical path, so the templating layer never fetches
//! them over the network.

use std::fs;
use std::path::{Path, PathBuf};

use crate::action::types::{Action, ActionError, BuildContext};
use crate::util::fs::{slash_relative, write_output};

#[derive(Debug, Clone)]
pub struct Templates {
  module: String,
  dir: PathBuf,
  prefix: String,
  files: Vec<PathBuf>,
}

impl Templates {
  /// `files` must live under `dir`; each is registered as `prefix` followed
  /// by its path relative to `dir`.
  pub fn new(module: impl Into<String>, dir: impl Into<PathBuf>, prefix: impl Into<String>, files: Vec<PathBuf>) -> Self {
    Self {
      module: module.into(),
      dir: dir.into(),
      prefix: prefix.into(),
      files,
    }
  }

  /// Render the registration script.
  pub fn render(&self) -> Result<String, ActionError> {
    let mut script = format!(
      "angular.module({}, []).run([\"$templateCache\", function($templateCache) {{\n",
      serde_json::to_string(&self.module)?
    );

    for file in &self.files {
      let rel = slash_relative(file, &self.dir).ok_or_else(|| ActionError::TemplateOutsideDir {
        path: file.clone(),
        dir: self.dir.clone(),
      })?;
      let logical = format!("{}{}", self.prefix, rel);
      let contents = fs::read_to_string(file).map_err(|e| ActionError::read(file, e))?;
      script.push_str(&format!(
        "$templateCache.put({},{});\n",
        serde_json::to_string(&logical)?,
        serde_json::to_string(&contents)?
      ));
    }

    script.push_str("}]);\n");
    Ok(script)
  }
}

impl Action for Templates {
  fn name(&self) -> &'static str {
    "templates"
  }

  fn execute(&self, _ctx: &BuildContext, output: &Path) -> Result<(), ActionError> {
    let script = self.render()?;
    write_output(output, script.as_bytes()).map_err(|e| ActionError::write(output, e))
  }
}
