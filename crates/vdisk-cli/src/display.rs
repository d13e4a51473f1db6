use colored::*;
use vdisk_core::{DiskRecord, ScanReport};

const HEADERS: [&str; 4] = ["Filename", "Size", "Format", "Path"];

/// Print the disk list with 1-based row numbers.
pub fn print_table(records: &[DiskRecord]) {
    if records.is_empty() {
        println!("{}", "No disks in the list.".dimmed());
        return;
    }

    let rows: Vec<[&str; 4]> = records
        .iter()
        .map(|r| {
            [
                r.filename.as_str(),
                r.size.as_str(),
                r.format.as_str(),
                r.full_path.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let index_width = records.len().to_string().len().max(1);

    let header = format_row(&HEADERS, &widths);
    println!("{:>iw$}  {}", "#", header.bold(), iw = index_width);
    for (i, row) in rows.iter().enumerate() {
        println!("{:>iw$}  {}", i + 1, format_row(row, &widths), iw = index_width);
    }
}

fn format_row(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Warning,
    Error,
}

pub fn print_scan_summary(folder: &str, report: &ScanReport) {
    for (tone, line) in scan_summary(folder, report) {
        match tone {
            Tone::Plain => println!("{}", line),
            Tone::Warning => println!("{}", line.yellow()),
            Tone::Error => println!("{}", line.red()),
        }
    }
}

fn scan_summary(folder: &str, report: &ScanReport) -> Vec<(Tone, String)> {
    if report.total_found == 0 {
        return vec![(
            Tone::Warning,
            format!(
                "No virtual disk files (.qcow2 or .raw) found in:\n{}",
                folder
            ),
        )];
    }

    let mut lines = Vec::new();
    if report.added > 0 {
        lines.push((
            Tone::Plain,
            format!(
                "Found {} virtual disk file(s). Added {} to the list. Skipped {} duplicate(s).",
                report.total_found, report.added, report.duplicates
            ),
        ));
    } else {
        lines.push((
            Tone::Plain,
            format!(
                "No new virtual disks found. All {} file(s) were already in the list or were duplicates.",
                report.total_found
            ),
        ));
    }

    if report.path_conflicts > 0 {
        lines.push((
            Tone::Warning,
            format!(
                "{} file(s) already listed under the same path with different details.",
                report.path_conflicts
            ),
        ));
    }
    if report.failed > 0 {
        lines.push((
            Tone::Error,
            format!(
                "{} file(s) could not be read by qemu-img and were skipped.",
                report.failed
            ),
        ));
    }
    lines
}

pub fn print_created(record: &DiskRecord) {
    println!("{}", "Virtual disk created successfully!".green());
    println!("Path: {}", record.full_path);
    println!("Format: {}", record.format);
    println!("Size: {}", record.size);
}
