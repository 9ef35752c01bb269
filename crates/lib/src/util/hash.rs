//! Hashing utilities for revision tokens.
//!
//! This module provides:
//! - `ContentHash`: The 32-character MD5 digest of a file's contents
//! - `hash_file()`: Single file hashing
//! - `hash_bytes()`: Arbitrary byte hashing
//! - `rev_token()`: The truncated hash appended to asset URLs as `?v=<token>`
//!
//! Tokens are the first `REV_HASH_LEN` hex characters of the MD5 digest.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::REV_HASH_LEN;

/// The MD5 digest of some content.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (32 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
  /// The leading `REV_HASH_LEN` characters, used as a cache-busting token.
  pub fn short(&self) -> &str {
    let len = self.0.len().min(REV_HASH_LEN);
    &self.0[..len]
  }
}

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash a file's contents.
pub fn hash_file(path: &Path) -> io::Result<ContentHash> {
  let mut file = fs::File::open(path)?;

  let mut context = md5::Context::new();
  let mut buffer = [0u8; 8192];

  loop {
    let bytes_read = file.read(&mut buffer)?;
    if bytes_read == 0 {
      break;
    }
    context.consume(&buffer[..bytes_read]);
  }

  Ok(ContentHash(format!("{:x}", context.compute())))
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  ContentHash(format!("{:x}", md5::compute(data)))
}

/// Revision token for the file at `path`.
///
/// Returns `None` if the file cannot be read.
pub fn rev_token(path: &Path) -> Option<String> {
  hash_file(path).ok().map(|hash| hash.short().to_string())
}
