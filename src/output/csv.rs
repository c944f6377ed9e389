// CSV export of flagged clusters — one file per analysis run.
//
// Two columns: the representative comment text and the comma-joined
// distinct author names. UTF-8, header row included. Consumers are
// spreadsheet tools, so quoting/escaping is left to the csv crate.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::detect::DuplicateReport;

/// Header row for the export.
const HEADER: [&str; 2] = ["Comment", "Suspicious Users"];

/// Write the report to `path`, creating parent directories as needed.
/// Returns the path written.
pub fn write_report(report: &DuplicateReport, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    writer.write_record(HEADER)?;
    for (text, authors) in report {
        let joined = authors
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        writer.write_record([text.as_str(), joined.as_str()])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file {}", path.display()))?;

    Ok(path.to_path_buf())
}

/// Default export path for a run starting now: a timestamped file under
/// `output_dir`, so successive runs never clobber each other.
pub fn default_report_path(output_dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    output_dir.join(format!("copycatch-{stamp}.csv"))
}
