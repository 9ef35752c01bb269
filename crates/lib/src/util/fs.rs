//! Filesystem helpers shared by actions and pipeline expansion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

/// List the regular files directly inside `dir` whose names end with `suffix`
/// and start with `prefix`.
///
/// Entries are sorted by file name so that concatenation order is stable.
pub fn dir_list(dir: &Path, suffix: &str, prefix: &str) -> io::Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    if !entry.file_type()?.is_file() {
      continue;
    }
    let name = entry.file_name();
    let Some(name) = name.to_str() else {
      continue;
    };
    if name.ends_with(suffix) && name.starts_with(prefix) {
      files.push(entry.path());
    }
  }
  files.sort();
  Ok(files)
}

/// Recursively list the regular files under `dir` whose names end with `suffix`.
pub fn dir_tree(dir: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  for entry in WalkDir::new(dir).sort_by_file_name() {
    let entry = entry.map_err(io::Error::from)?;
    if !entry.file_type().is_file() {
      continue;
    }
    let matches = entry.file_name().to_str().map(|n| n.ends_with(suffix)).unwrap_or(false);
    if matches {
      files.push(entry.into_path());
    }
  }
  Ok(files)
}

/// Concatenate the contents of `paths`, in order.
///
/// On failure, returns the offending path along with the error.
pub fn read_all(paths: &[PathBuf]) -> Result<Vec<u8>, (PathBuf, io::Error)> {
  let mut contents = Vec::new();
  for path in paths {
    let bytes = fs::read(path).map_err(|e| (path.clone(), e))?;
    contents.extend_from_slice(&bytes);
  }
  Ok(contents)
}

/// Create the parent directory of `path`, if it has one.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
    _ => Ok(()),
  }
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &[u8]) -> io::Result<()> {
  ensure_parent(path)?;
  info!(path = %path.display(), "write");
  fs::write(path, contents)
}

/// Render `path` relative to `base` with `/` separators.
///
/// Returns `None` if `path` is not under `base`.
pub fn slash_relative(path: &Path, base: &Path) -> Option<String> {
  let rel = path.strip_prefix(base).ok()?;
  let parts: Vec<String> = rel
    .components()
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect();
  Some(parts.join("/"))
}
