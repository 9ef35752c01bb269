//! JSON manifest of versioned SQL migration files.
//!
//! Migration files are named `NNN-<description>.sql`. The manifest is a JSON
//! array of `{version, filename, sql}` objects ordered by filename, consumed
//! by the server at startup to bring its schema up to date.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::action::types::{Action, ActionError, BuildContext};
use crate::util::fs::{dir_list, write_output};

static MIGRATION_NAME: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[0-9]{3}-.*\.sql$").expect("valid migration pattern"));

/// A single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
  pub version: u32,
  pub filename: String,
  pub sql: String,
}

/// Parse the version from a migration file name.
///
/// The literal prefix `000` is version 0; any other prefix is base-10.
pub fn migration_version(filename: &str) -> Result<u32, ActionError> {
  let prefix = filename.split('-').next().unwrap_or_default();
  if prefix == "000" {
    return Ok(0);
  }
  prefix.parse::<u32>().map_err(|e| ActionError::Migration {
    filename: filename.to_string(),
    message: e.to_string(),
  })
}

/// The migration files in `dir`, sorted by name.
pub fn migration_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
  let files = dir_list(dir, ".sql", "")?
    .into_iter()
    .filter(|path| {
      path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| MIGRATION_NAME.is_match(n))
        .unwrap_or(false)
    })
    .collect();
  Ok(files)
}

#[derive(Debug, Clone)]
pub struct Migrations {
  files: Vec<PathBuf>,
}

impl Migrations {
  /// `files` should come from [`migration_files`].
  pub fn new(files: Vec<PathBuf>) -> Self {
    Self { files }
  }

  pub fn collect(&self) -> Result<Vec<Migration>, ActionError> {
    let mut migrations = Vec::with_capacity(self.files.len());
    for path in &self.files {
      let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
      let version = migration_version(&filename)?;
      let sql = fs::read_to_string(path).map_err(|e| ActionError::read(path, e))?;
      migrations.push(Migration { version, filename, sql });
    }
    Ok(migrations)
  }

  pub fn render(&self) -> Result<String, ActionError> {
    Ok(serde_json::to_string(&self.collect()?)?)
  }
}

impl Action for Migrations {
  fn name(&self) -> &'static str {
    "migrations"
  }

  fn execute(&self, _ctx: &BuildContext, output: &Path) -> Result<(), ActionError> {
    let json = self.render()?;
    write_output(output, json.as_bytes()).map_err(|e| ActionError::write(output, e))
  }
}
