//! CLI command execution logic.

use anyhow::Result;
use colored::Colorize;
use ignore::WalkBuilder;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Config;
use crate::constants::DEFAULT_EXTENSIONS;
use crate::error::StripError;
use crate::output;
use crate::rules::MatchCriteria;
use crate::strip::Stripper;
use crate::utils::{
    has_strippable_extension, is_excluded_path, normalize_display_path, parse_exclude_folders,
};

/// Per-file outcome for reporting.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// The file was transformed.
    Changed {
        /// Number of removed statements/expressions.
        removals: usize,
        /// Total bytes deleted from the original.
        bytes_removed: usize,
        /// Number of return statements whose argument was discarded.
        returns_nulled: usize,
    },
    /// Nothing matched; the file is untouched.
    Unchanged,
}

/// Report entry for one processed file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Display path of the file.
    pub file: String,
    /// What happened to it.
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Report entry for a file that failed to process.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    /// Display path of the file.
    pub file: String,
    /// Human-readable error message.
    pub error: String,
}

/// Aggregate counts for the run.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// Files considered after filtering.
    pub scanned: usize,
    /// Files with at least one removal or update.
    pub changed: usize,
    /// Files with no match.
    pub unchanged: usize,
    /// Files that failed to parse or could not be read/written.
    pub errors: usize,
}

/// Full machine-readable run report.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Per-file outcomes.
    pub files: Vec<FileReport>,
    /// Files that could not be processed.
    pub parse_errors: Vec<FailureReport>,
    /// Aggregate counts.
    pub summary: Summary,
}

enum Outcome {
    Done(FileReport),
    Failed(FailureReport),
}

/// Executes the strip run described by `cli`, writing the report to `writer`.
///
/// Returns the process exit code: 0 nominally, 1 when `--check` found
/// changes. Per-file failures are reported but do not change the exit code.
pub fn run_strip<W: Write>(cli: &Cli, mut writer: W) -> Result<i32> {
    let paths = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };

    let config = Config::load_from_path(&paths[0]);
    let criteria = build_criteria(cli, &config);

    if criteria.is_empty() && !cli.output.json && !cli.output.quiet {
        writeln!(
            writer,
            "{}",
            "warning: no tracked names configured; nothing will be stripped".yellow()
        )?;
    }

    let exclude_folders = build_exclude_folders(cli, &config);
    let extensions = build_extensions(cli, &config);
    let files = collect_files(&paths, &exclude_folders, &extensions);

    let stripper = if cli.output.verbose {
        Stripper::new(criteria).with_diagnostics(|msg| eprintln!("{}", msg.dimmed()))
    } else {
        Stripper::new(criteria)
    };

    let outcomes: Vec<Outcome> = files
        .par_iter()
        .map(|path| process_file(path, &stripper, cli))
        .collect();

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Done(report) => reports.push(report),
            Outcome::Failed(failure) => failures.push(failure),
        }
    }

    let changed = reports
        .iter()
        .filter(|r| matches!(r.status, FileStatus::Changed { .. }))
        .count();
    let report = RunReport {
        summary: Summary {
            scanned: reports.len() + failures.len(),
            changed,
            unchanged: reports.len() - changed,
            errors: failures.len(),
        },
        files: reports,
        parse_errors: failures,
    };

    if cli.output.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        output::print_report(&mut writer, &report, cli.output.quiet)?;
    }

    if cli.check && changed > 0 {
        return Ok(1);
    }
    Ok(0)
}

/// Command-line name lists take precedence per list; otherwise the
/// configuration file's lists apply.
fn build_criteria(cli: &Cli, config: &Config) -> MatchCriteria {
    let pick = |cli_names: &[String], config_names: &Option<Vec<String>>| -> Vec<String> {
        if cli_names.is_empty() {
            config_names.clone().unwrap_or_default()
        } else {
            cli_names.to_vec()
        }
    };
    MatchCriteria::from_names(
        pick(&cli.track.variables, &config.logstrip.variables),
        pick(&cli.track.properties, &config.logstrip.properties),
        pick(&cli.track.packages, &config.logstrip.packages),
    )
}

fn build_exclude_folders(cli: &Cli, config: &Config) -> FxHashSet<String> {
    let mut user_exclude: std::collections::HashSet<String> =
        cli.filter.exclude_folders.iter().cloned().collect();
    if let Some(folders) = &config.logstrip.exclude_folders {
        user_exclude.extend(folders.iter().cloned());
    }

    let mut include: std::collections::HashSet<String> =
        cli.filter.include_folders.iter().cloned().collect();
    if let Some(folders) = &config.logstrip.include_folders {
        include.extend(folders.iter().cloned());
    }

    parse_exclude_folders(Some(user_exclude), true, Some(include))
}

fn build_extensions(cli: &Cli, config: &Config) -> FxHashSet<String> {
    if !cli.filter.extensions.is_empty() {
        return cli.filter.extensions.iter().cloned().collect();
    }
    if let Some(extensions) = &config.logstrip.extensions {
        return extensions.iter().cloned().collect();
    }
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect()
}

/// Collects candidate files from the given paths, gitignore-aware for
/// directories. Explicit files still pass through the extension and
/// exclude-folder gates.
fn collect_files(
    paths: &[PathBuf],
    exclude_folders: &FxHashSet<String>,
    extensions: &FxHashSet<String>,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if has_strippable_extension(path, extensions)
                && !is_excluded_path(path, exclude_folders)
            {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            for entry in WalkBuilder::new(path).build().flatten() {
                let entry_path = entry.path();
                if entry.file_type().is_some_and(|t| t.is_file())
                    && has_strippable_extension(entry_path, extensions)
                    && !is_excluded_path(entry_path, exclude_folders)
                {
                    files.push(entry_path.to_path_buf());
                }
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

fn process_file(path: &Path, stripper: &Stripper, cli: &Cli) -> Outcome {
    let file = normalize_display_path(path);

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            return Outcome::Failed(FailureReport {
                file,
                error: format!("read failed: {err}"),
            })
        }
    };

    match stripper.strip(&source) {
        Ok(None) => Outcome::Done(FileReport {
            file,
            status: FileStatus::Unchanged,
        }),
        Ok(Some(output)) => {
            if cli.write {
                if let Err(err) = fs::write(path, &output.code) {
                    return Outcome::Failed(FailureReport {
                        file,
                        error: format!("write failed: {err}"),
                    });
                }
            }
            if cli.emit_map {
                if let Err(err) = write_map_file(path, &output.map) {
                    return Outcome::Failed(FailureReport {
                        file,
                        error: format!("map write failed: {err}"),
                    });
                }
            }
            Outcome::Done(FileReport {
                file,
                status: FileStatus::Changed {
                    removals: output.removed_spans.len(),
                    bytes_removed: source.len() - output.code.len(),
                    returns_nulled: output.suppressed_returns.len(),
                },
            })
        }
        Err(StripError::Parse(err)) => Outcome::Failed(FailureReport {
            file,
            error: err.to_string(),
        }),
        Err(StripError::Splice(err)) => Outcome::Failed(FailureReport {
            file,
            error: format!("internal splice error: {err}"),
        }),
    }
}

fn write_map_file(path: &Path, map: &crate::splice::PositionMap) -> Result<()> {
    let map_path = PathBuf::from(format!("{}.map", path.display()));
    fs::write(map_path, serde_json::to_string_pretty(map)?)?;
    Ok(())
}
