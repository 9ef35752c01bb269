//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated project directory.
///
/// Each test gets its own temporary project root with the fixture pipeline
/// copied to `assetkit.toml`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create a project using the `site.toml` pipeline and a small source tree.
  pub fn site() -> Self {
    let env = Self::from_fixture("site.toml");
    env.write_file("src/html/home.html", "<p>home</p>");
    env.write_file("src/js/app.js", "var app = {};\n");
    env.write_file("src/js/lib/a.js", "a();\n");
    env.write_file("src/js/lib/b.js", "b();\n");
    env.write_file("src/js/lib/notes.txt", "not javascript");
    env.write_file("src/img/logo.png", "PNG");
    env.write_file(
      "src/index.html",
      "<script src=\"static/js/app.js?v=0\"></script>\n<script src=\"static/js/app-templates.js?v=0\"></script>\n",
    );
    env.write_file("LICENSE.md", "MIT");
    env.write_file("sql/000-init.sql", "create table t (id int);\n");
    env
  }

  /// Create from a fixture pipeline file.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("assetkit.toml"), fixture_content(name)).unwrap();
    Self { temp }
  }

  /// Project root.
  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Read a built file relative to the output directory.
  pub fn read_output(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.output_path(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read output {}: {}", relative_path, e))
  }

  pub fn output_path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join("assets").join(relative_path)
  }

  /// Get a Command for the assetkit binary rooted at this project.
  pub fn assetkit_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("assetkit");
    cmd.arg("-C").arg(self.root());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
