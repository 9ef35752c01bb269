//! Test utilities for assetkit-lib.
//!
//! Helpers for laying out small project trees and pinning modification times
//! so staleness checks are deterministic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
  path
}

/// Time `secs` seconds after the Unix epoch.
pub fn at(secs: u64) -> SystemTime {
  UNIX_EPOCH + Duration::from_secs(secs)
}

/// Set the modification time of an existing file.
pub fn set_mtime(path: &Path, secs: u64) {
  let file = fs::File::options().write(true).open(path).unwrap();
  file.set_modified(at(secs)).unwrap();
}

/// Returns the command and args for a tool that always succeeds.
#[cfg(unix)]
pub fn succeed_cmd() -> Vec<String> {
  vec!["true".to_string()]
}

/// Returns the command and args for a tool that always fails.
#[cfg(unix)]
pub fn fail_cmd() -> Vec<String> {
  vec!["false".to_string()]
}

/// Returns a "compiler" that copies its first argument to its second.
#[cfg(unix)]
pub fn copy_cmd() -> Vec<String> {
  vec!["cp".to_string()]
}
