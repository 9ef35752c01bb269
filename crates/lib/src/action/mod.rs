//! Build actions.
//!
//! Each action knows how to produce one output file. Actions are attached to
//! a [`Task`](crate::task::Task), which decides whether they need to run.
//!
//! # Submodules
//!
//! - [`concat`] - Concatenation and plain copies, optionally linted first
//! - [`cmd`] - External tool invocation (style-sheet compiler, linter)
//! - [`templates`] - Packaging HTML templates into a script
//! - [`revision`] - Rewriting `?v=` cache-busting tokens in the entry point
//! - [`licenses`] - Bundling third-party license texts
//! - [`migrations`] - Generating the JSON manifest of SQL migration files

pub mod cmd;
pub mod concat;
pub mod licenses;
pub mod migrations;
pub mod revision;
pub mod templates;
mod types;

pub use cmd::Compile;
pub use concat::Concat;
pub use licenses::{LicenseEntry, Licenses};
pub use migrations::Migrations;
pub use revision::Revision;
pub use templates::Templates;
pub use types::*;
