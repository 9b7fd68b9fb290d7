//! Command-line interface arguments.

use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.logstrip.toml):
  Create this file in your project root to set defaults.

  [logstrip]
  # Names to strip
  variables = [\"trace\", \"logger\"]    # declarations, assignments, calls, returns
  properties = [\"debug\", \"info\"]     # member assignments/calls on these properties
  packages = [\"trace-pkg\"]           # imports with these module specifiers

  # Path filters
  exclude_folders = [\"vendor\", \"fixtures\"]
  include_folders = [\"dist\"]         # Force-include these
  extensions = [\"js\", \"mjs\", \"cjs\"]

  The same table may live under a \"logstrip\" key in package.json.
";

/// Names to track. Command-line values take precedence over the
/// corresponding configuration-file lists.
#[derive(Args, Debug, Default, Clone)]
pub struct TrackArgs {
    /// Variable name to strip (declarations, assignments, calls, returns).
    /// May be repeated.
    #[arg(long = "var", value_name = "NAME")]
    pub variables: Vec<String>,

    /// Member property name to strip (assignments/calls on any receiver).
    /// May be repeated.
    #[arg(long = "prop", value_name = "NAME")]
    pub properties: Vec<String>,

    /// Import module specifier to strip (exact match). May be repeated.
    #[arg(long = "pkg", value_name = "NAME")]
    pub packages: Vec<String>,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (traces every removed or updated statement).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary line, no per-file table.
    #[arg(long)]
    pub quiet: bool,
}

/// Options for file selection.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterOptions {
    /// Exclude folders by name (in addition to the defaults).
    #[arg(long = "exclude-folder", value_name = "FOLDER")]
    pub exclude_folders: Vec<String>,

    /// Force-include folders the defaults would exclude.
    #[arg(long = "include-folder", value_name = "FOLDER")]
    pub include_folders: Vec<String>,

    /// Source file extensions to process (default: js, mjs, cjs).
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,
}

/// Strips logging statements from JavaScript sources.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "logstrip",
    version,
    about = "Strips logging statements from JavaScript sources",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Paths to process (files or directories).
    /// When no paths are provided, defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Tracked names.
    #[command(flatten)]
    pub track: TrackArgs,

    /// Rewrite changed files in place.
    #[arg(short, long)]
    pub write: bool,

    /// Exit with code 1 if any file would change; never writes.
    #[arg(long, conflicts_with = "write")]
    pub check: bool,

    /// Write a `<file>.map` position-map JSON next to each changed file.
    #[arg(long)]
    pub emit_map: bool,

    /// Output options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// File selection options.
    #[command(flatten)]
    pub filter: FilterOptions,
}
