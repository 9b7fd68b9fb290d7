//! Core library for the logstrip source transform.
//!
//! This library strips logging statements from JavaScript sources: variable
//! declarations, assignments, bare calls, imports and returned values that
//! reference caller-configured names are removed from the text, and a
//! position map back to the original offsets is produced for tooling.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module wrapping the Tree-sitter JavaScript parser and the path-extraction
/// utility used by the matching rules.
pub mod cst;

/// Module defining the match criteria, node-kind vocabulary and the per-kind
/// decision rules.
pub mod rules;

/// Module containing the traversal driver and the public transform API.
pub mod strip;

/// Module implementing the splice buffer and the output position map.
pub mod splice;

/// Module defining the library error type.
pub mod error;

/// Module for loading configuration.
pub mod config;

/// Module containing utility functions (line index, path filtering).
pub mod utils;

/// Module containing shared constants.
pub mod constants;

/// Module defining the command-line interface arguments.
pub mod cli;

/// Module for handling CLI command execution logic.
pub mod commands;

/// Module for CLI output formatting with colored text and tables.
pub mod output;

/// Module defining the entry point shared by the binary shim.
pub mod entry_point;

pub use error::StripError;
pub use rules::MatchCriteria;
pub use strip::{StripOutput, Stripper};
