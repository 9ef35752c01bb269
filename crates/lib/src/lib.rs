//! assetkit-lib: Core types and logic for assetkit
//!
//! This crate builds a deployable static-asset tree from a declarative list of
//! steps:
//! - `Task`: an output, its inputs, and the `Action` that produces it
//! - `Action`: a single build operation (concat, template packaging, revision rewrite, ...)
//! - `PipelineConfig`: the declarative step list, loaded from TOML
//! - `Pipeline`: the expanded, ordered task list for one build invocation

pub mod action;
pub mod config;
pub mod consts;
pub mod pipeline;
pub mod task;
pub mod util;
