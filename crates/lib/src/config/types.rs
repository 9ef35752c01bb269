use serde::{Deserialize, Serialize};

use crate::action::LicenseEntry;
use crate::consts::DEFAULT_DESTINATION;

/// The declarative pipeline: where outputs go, which tools to use, and the
/// ordered list of steps.
///
/// All paths are relative to the project root, except step outputs, which are
/// relative to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
  #[serde(default = "default_destination")]
  pub destination: String,
  #[serde(default)]
  pub tools: Tools,
  #[serde(default, rename = "step")]
  pub steps: Vec<Step>,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      destination: default_destination(),
      tools: Tools::default(),
      steps: Vec::new(),
    }
  }
}

/// Command lines for external tools. Arguments are appended at invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tools {
  #[serde(default = "default_lint")]
  pub lint: Vec<String>,
  #[serde(default = "default_sass")]
  pub sass: Vec<String>,
}

impl Default for Tools {
  fn default() -> Self {
    Self {
      lint: default_lint(),
      sass: default_sass(),
    }
  }
}

/// A directory whose matching files are used as inputs.
///
/// May be written as a bare path or as a table:
///
/// ```toml
/// dirs = ["www-src/img", { dir = "www-src/scss", suffix = ".scss", prefix = "_" }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawListing")]
pub struct Listing {
  pub dir: String,
  pub suffix: String,
  pub prefix: String,
  /// List nothing, rather than fail, when `dir` does not exist.
  pub optional: bool,
}

impl Listing {
  pub fn new(dir: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      ..Default::default()
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawListing {
  Dir(String),
  Table {
    dir: String,
    #[serde(default)]
    suffix: String,
    #[serde(default)]
    prefix: String,
    #[serde(default)]
    optional: bool,
  },
}

impl From<RawListing> for Listing {
  fn from(raw: RawListing) -> Self {
    match raw {
      RawListing::Dir(dir) => Listing::new(dir),
      RawListing::Table {
        dir,
        suffix,
        prefix,
        optional,
      } => Listing {
        dir,
        suffix,
        prefix,
        optional,
      },
    }
  }
}

/// One declared build step. Most steps produce a single task; `copy-each`
/// produces one per file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
  /// Package HTML templates under `dir` into a script.
  Templates {
    output: String,
    dir: String,
    #[serde(default = "default_template_suffix")]
    suffix: String,
    #[serde(default = "default_template_module")]
    module: String,
    #[serde(default = "default_template_prefix")]
    prefix: String,
  },
  /// Concatenate `inputs` then each listing into `output`, optionally linting first.
  Concat {
    output: String,
    #[serde(default)]
    inputs: Vec<String>,
    #[serde(default)]
    dirs: Vec<Listing>,
    #[serde(default)]
    lint: bool,
  },
  /// Copy every listed file to `target_dir/<file name>`.
  CopyEach { target_dir: String, dirs: Vec<Listing> },
  /// Compile `main` with the style-sheet compiler; `partials` are extra dependencies.
  Sass {
    output: String,
    main: String,
    #[serde(default)]
    partials: Vec<Listing>,
  },
  /// Write `template` with refreshed `?v=` tokens. `outputs` are the
  /// destination-relative artifacts it references.
  Revision {
    output: String,
    template: String,
    #[serde(default)]
    outputs: Vec<String>,
  },
  /// Bundle license texts. Each file found in `dirs` becomes an extra entry.
  Licenses {
    output: String,
    #[serde(default)]
    entries: Vec<LicenseEntry>,
    #[serde(default)]
    dirs: Vec<Listing>,
  },
  /// Generate the SQL migration manifest from `dir`.
  Migrations { output: String, dir: String },
}

impl Step {
  pub fn kind(&self) -> &'static str {
    match self {
      Step::Templates { .. } => "templates",
      Step::Concat { .. } => "concat",
      Step::CopyEach { .. } => "copy-each",
      Step::Sass { .. } => "sass",
      Step::Revision { .. } => "revision",
      Step::Licenses { .. } => "licenses",
      Step::Migrations { .. } => "migrations",
    }
  }
}

fn default_destination() -> String {
  DEFAULT_DESTINATION.to_string()
}

fn default_lint() -> Vec<String> {
  vec!["node_modules/.bin/jshint".to_string()]
}

fn default_sass() -> Vec<String> {
  ["sass", "--style", "compact"].iter().map(|s| s.to_string()).collect()
}

fn default_template_suffix() -> String {
  ".html".to_string()
}

fn default_template_module() -> String {
  "templates".to_string()
}

fn default_template_prefix() -> String {
  "static/html/".to_string()
}
