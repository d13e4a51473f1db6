use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::catalog::DiskRecord;
use crate::error::Error;

pub const CSV_HEADER: [&str; 5] = ["Filename", "Size", "Format", "Path", "Scan_Date"];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    filename: &'a str,
    size: &'a str,
    format: &'a str,
    path: &'a str,
    scan_date: &'a str,
}

/// Suggested export file name, e.g. `qemu_disks_20240131_154502.csv`.
pub fn default_export_filename(now: DateTime<Local>) -> String {
    format!("qemu_disks_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write `records` to `destination`, stamping every row with the current time.
///
/// A failure part way through can leave a truncated file behind.
pub fn export_csv(records: &[DiskRecord], destination: &Path) -> Result<usize, Error> {
    let scan_date = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let file = File::create(destination)?;
    write_csv(records, file, &scan_date)?;
    info!("Exported {} disk(s) to {}", records.len(), destination.display());
    Ok(records.len())
}

/// Write the header and one row per record, in catalog order.
pub fn write_csv<W: Write>(records: &[DiskRecord], writer: W, scan_date: &str) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(ExportRow {
            filename: &record.filename,
            size: &record.size,
            format: &record.format,
            path: &record.full_path,
            scan_date,
        })?;
    }
    wtr.flush()?;

    Ok(())
}
