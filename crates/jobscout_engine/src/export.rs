use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use jobscout_core::{HarvestReport, JobRecord, CSV_HEADER};
use serde_json::json;

use crate::filename::export_filename;
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Distinguishes exports of the same term, e.g. `20261019_1430`.
    pub stamp: String,
    pub write_manifest: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            stamp: "latest".to_string(),
            write_manifest: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub record_count: usize,
    pub csv_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("manifest encoding failed: {0}")]
    Manifest(#[from] serde_json::Error),
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Header row plus one row per record, in record order.
pub fn write_csv<W: Write>(mut w: W, records: &[JobRecord]) -> io::Result<()> {
    write_row(&mut w, &CSV_HEADER)?;
    for record in records {
        write_row(&mut w, &record.csv_row())?;
    }
    w.flush()
}

/// Write the report's records as CSV (and optionally a JSON manifest) into
/// `output_dir`, creating it when missing.
pub fn export_report(
    output_dir: &Path,
    report: &HarvestReport,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let mut csv = Vec::new();
    write_csv(&mut csv, &report.records)?;

    let writer = AtomicFileWriter::new(output_dir);
    let csv_name = export_filename(&report.term, &options.stamp, "csv");
    let csv_path = writer.write(&csv_name, &csv)?;

    let manifest_path = if options.write_manifest {
        let manifest = json!({
            "term": report.term,
            "csv": csv_name,
            "record_count": report.records.len(),
            "synthetic_count": report.synthetic_count(),
            "outcomes": report.outcomes,
        });
        let name = export_filename(&report.term, &options.stamp, "json");
        let body = serde_json::to_vec_pretty(&manifest)?;
        Some(writer.write(&name, &body)?)
    } else {
        None
    };

    engine_info!(
        "Exported {} records to {:?}",
        report.records.len(),
        csv_path
    );
    Ok(ExportSummary {
        record_count: report.records.len(),
        csv_path,
        manifest_path,
    })
}
