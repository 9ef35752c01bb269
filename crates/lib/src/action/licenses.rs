//! Bundling of third-party license texts into a single document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::action::types::{Action, ActionError, BuildContext};
use crate::util::fs::write_output;

const HEADER: &str = "# Licenses for included software:\n\n";

/// One section of the bundle.
///
/// An entry with an empty name is titled after its first file, with any
/// leading `vendor/` removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseEntry {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub files: Vec<String>,
}

impl LicenseEntry {
  pub fn title(&self) -> &str {
    if !self.name.is_empty() {
      return &self.name;
    }
    match self.files.first() {
      Some(first) => first.strip_prefix("vendor/").unwrap_or(first),
      None => "",
    }
  }
}

#[derive(Debug, Clone)]
pub struct Licenses {
  entries: Vec<LicenseEntry>,
}

impl Licenses {
  pub fn new(entries: Vec<LicenseEntry>) -> Self {
    Self { entries }
  }

  /// Every file referenced by any entry, in order.
  pub fn files(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().flat_map(|e| e.files.iter().map(String::as_str))
  }

  /// Render the bundle, reading license files relative to `root`.
  pub fn render(&self, root: &Path) -> Result<String, ActionError> {
    let mut doc = String::from(HEADER);
    for entry in &self.entries {
      doc.push_str(&format!("## {}\n\n", entry.title()));
      for file in &entry.files {
        let path: PathBuf = root.join(file);
        let text = fs::read_to_string(&path).map_err(|e| ActionError::read(&path, e))?;
        doc.push_str(&text);
        doc.push('\n');
      }
      doc.push_str("\n\n");
    }
    Ok(doc)
  }
}

impl Action for Licenses {
  fn name(&self) -> &'static str {
    "licenses"
  }

  fn execute(&self, ctx: &BuildContext, output: &Path) -> Result<(), ActionError> {
    let doc = self.render(ctx.root())?;
    write_output(output, doc.as_bytes()).map_err(|e| ActionError::write(output, e))
  }
}
