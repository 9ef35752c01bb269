//! Cache-busting revision tokens for the HTML entry point.
//!
//! Attributes of the form ` href="<path>?v=<token>"` and ` src="<path>?v=<token>"`
//! get their token replaced by the short content hash of `<destination>/<path>`.
//! If that file cannot be read, the `?v=` suffix is dropped. Nothing else in
//! the document is touched.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::warn;

use crate::action::types::{Action, ActionError, BuildContext};
use crate::util::fs::write_output;
use crate::util::hash::rev_token;

static VERSIONED_ATTR: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(\s)(href|src)="([^"]+)\?v=[a-zA-Z0-9]+""#).expect("valid revision pattern"));

/// `<path>?v=<token>` for a file under `destination`, or just `<path>` when
/// the file is absent.
fn versioned(path: &str, destination: &Path) -> String {
  match rev_token(&destination.join(path)) {
    Some(token) => format!("{}?v={}", path, token),
    None => {
      warn!(path, "referenced file not found, dropping revision token");
      path.to_string()
    }
  }
}

/// Rewrite every revision token in `contents`.
pub fn rewrite_revisions(contents: &str, destination: &Path) -> String {
  VERSIONED_ATTR
    .replace_all(contents, |caps: &Captures| {
      format!("{}{}=\"{}\"", &caps[1], &caps[2], versioned(&caps[3], destination))
    })
    .into_owned()
}

/// Write the entry point at `template` with its revision tokens refreshed.
#[derive(Debug, Clone)]
pub struct Revision {
  template: PathBuf,
}

impl Revision {
  pub fn new(template: impl Into<PathBuf>) -> Self {
    Self {
      template: template.into(),
    }
  }
}

impl Action for Revision {
  fn name(&self) -> &'static str {
    "revision"
  }

  fn execute(&self, ctx: &BuildContext, output: &Path) -> Result<(), ActionError> {
    let contents = fs::read_to_string(&self.template).map_err(|e| ActionError::read(&self.template, e))?;
    let rewritten = rewrite_revisions(&contents, ctx.destination());
    write_output(output, rewritten.as_bytes()).map_err(|e| ActionError::write(output, e))
  }
}
