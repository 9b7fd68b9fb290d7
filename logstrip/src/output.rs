//! Human-readable CLI output formatting.

use colored::Colorize;
use comfy_table::Table;
use std::io::Write;

use crate::commands::{FileStatus, RunReport};

/// Prints the run report with colored status lines and a summary table.
pub fn print_report<W: Write>(writer: &mut W, report: &RunReport, quiet: bool) -> std::io::Result<()> {
    if !quiet {
        let changed: Vec<_> = report
            .files
            .iter()
            .filter_map(|entry| match entry.status {
                FileStatus::Changed {
                    removals,
                    bytes_removed,
                    returns_nulled,
                } => Some((entry.file.as_str(), removals, bytes_removed, returns_nulled)),
                FileStatus::Unchanged => None,
            })
            .collect();

        if !changed.is_empty() {
            let mut table = Table::new();
            table.set_header(vec!["File", "Removals", "Bytes removed", "Returns nulled"]);
            for (file, removals, bytes_removed, returns_nulled) in changed {
                table.add_row(vec![
                    file.to_owned(),
                    removals.to_string(),
                    bytes_removed.to_string(),
                    returns_nulled.to_string(),
                ]);
            }
            writeln!(writer, "{table}")?;
        }

        for failure in &report.parse_errors {
            writeln!(
                writer,
                "{} {}: {}",
                "error".red().bold(),
                failure.file,
                failure.error
            )?;
        }
    }

    let summary = &report.summary;
    let headline = format!(
        "{} of {} files changed, {} unchanged",
        summary.changed, summary.scanned, summary.unchanged
    );
    if summary.changed > 0 {
        writeln!(writer, "{}", headline.green().bold())?;
    } else {
        writeln!(writer, "{headline}")?;
    }
    if summary.errors > 0 {
        writeln!(
            writer,
            "{}",
            format!("{} files failed to process", summary.errors).red()
        )?;
    }
    Ok(())
}
