//! Shared utilities.
//!
//! Common utilities used across the crate including hashing, directory
//! listing, and test helpers.

pub mod fs;
pub mod hash;

#[cfg(test)]
pub mod testutil;
