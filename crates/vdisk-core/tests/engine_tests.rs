mod common;

use serde::Deserialize;
use std::fs;
use tempfile::tempdir;

use common::{write_image, FileBackedTool};
use vdisk_core::{AddOutcome, AppConfig, DiskEngine, DiskFormat, Error, SilentReporter};

fn engine() -> DiskEngine<FileBackedTool> {
    DiskEngine::new(FileBackedTool::new(), AppConfig::default())
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Size")]
    size: String,
    #[serde(rename = "Format")]
    format: String,
    #[serde(rename = "Path")]
    path: String,
    #[serde(rename = "Scan_Date")]
    scan_date: String,
}

#[test]
fn test_create_disk_registers_record() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("web.qcow2");
    let mut engine = engine();

    let created = engine
        .create_disk(&target.to_string_lossy(), DiskFormat::Qcow2, "20g")
        .unwrap();

    assert_eq!(created.outcome, AddOutcome::Added);
    assert_eq!(created.record.filename, "web.qcow2");
    assert_eq!(created.record.size, "20G");
    assert_eq!(created.record.format, "qcow2");
    assert!(target.exists());
    assert_eq!(engine.catalog().len(), 1);
}

#[test]
fn test_create_appends_format_extension() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("scratch");
    let mut engine = engine();

    let created = engine
        .create_disk(&target.to_string_lossy(), DiskFormat::Raw, "1G")
        .unwrap();

    assert_eq!(created.record.filename, "scratch.raw");
    assert!(tmp.path().join("scratch.raw").exists());
}

#[test]
fn test_invalid_size_never_reaches_tool() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("web.qcow2");
    let mut engine = engine();

    for size in ["100", "G100", "", "12X"] {
        let result = engine.create_disk(&target.to_string_lossy(), DiskFormat::Qcow2, size);
        assert!(matches!(result, Err(Error::InvalidInput(_))), "size {:?}", size);
    }
    let result = engine.create_disk("  ", DiskFormat::Qcow2, "20G");
    assert!(matches!(result, Err(Error::InvalidInput(_))));

    assert!(!target.exists());
    assert!(engine.catalog().is_empty());
}

#[test]
fn test_create_without_tool_reports_not_found() {
    let tmp = tempdir().unwrap();
    let mut engine = DiskEngine::new(FileBackedTool::not_installed(), AppConfig::default());

    let err = engine
        .create_disk(&tmp.path().join("a.qcow2").to_string_lossy(), DiskFormat::Qcow2, "20G")
        .unwrap_err();

    assert!(err.is_tool_not_found());
    assert!(engine.catalog().is_empty());
}

#[test]
fn test_created_then_scanned_disk_is_duplicate() {
    let tmp = tempdir().unwrap();
    let mut engine = engine();
    engine
        .create_disk(&tmp.path().join("web.qcow2").to_string_lossy(), DiskFormat::Qcow2, "20G")
        .unwrap();

    let report = engine
        .scan_folder(&tmp.path().to_string_lossy(), &SilentReporter)
        .unwrap();

    assert_eq!(report.total_found, 1);
    assert_eq!(report.added, 0);
    assert_eq!(report.duplicates, 1);
}

#[test]
fn test_select_and_remove_by_row() {
    let tmp = tempdir().unwrap();
    write_image(&tmp.path().join("a.qcow2"), "qcow2", "20G");
    write_image(&tmp.path().join("b.raw"), "raw", "2G");

    let mut engine = engine();
    engine
        .scan_folder(&tmp.path().to_string_lossy(), &SilentReporter)
        .unwrap();

    assert!(matches!(engine.select(0), Err(Error::InvalidInput(_))));
    assert!(matches!(engine.select(3), Err(Error::InvalidInput(_))));
    assert!(engine.full_path(2).unwrap().ends_with("b.raw"));

    let removed = engine.remove(1).unwrap();
    assert_eq!(removed.filename, "a.qcow2");
    assert!(engine
        .catalog()
        .find(&removed.filename, &removed.full_path)
        .is_none());
    assert_eq!(engine.catalog().len(), 1);

    // Only the catalog entry goes away.
    assert!(tmp.path().join("a.qcow2").exists());
}

#[test]
fn test_disk_info_includes_tool_output() {
    let tmp = tempdir().unwrap();
    write_image(&tmp.path().join("a.qcow2"), "qcow2", "20G");

    let mut engine = engine();
    engine
        .scan_folder(&tmp.path().to_string_lossy(), &SilentReporter)
        .unwrap();

    let info = engine.disk_info(1).unwrap();
    assert_eq!(info.record.filename, "a.qcow2");
    assert!(info.details.contains("virtual size: 20G"));

    let text = info.to_string();
    assert!(text.starts_with("Disk: a.qcow2\n"));
    assert!(text.contains("Detailed Information:"));
}

#[test]
fn test_disk_info_on_deleted_file_is_reported() {
    let tmp = tempdir().unwrap();
    let image = tmp.path().join("a.qcow2");
    write_image(&image, "qcow2", "20G");

    let mut engine = engine();
    engine
        .scan_folder(&tmp.path().to_string_lossy(), &SilentReporter)
        .unwrap();
    fs::remove_file(&image).unwrap();

    assert!(engine.disk_info(1).is_err());
    assert_eq!(engine.catalog().len(), 1);
}

#[test]
fn test_export_round_trip() {
    let tmp = tempdir().unwrap();
    let disks = tmp.path().join("disks");
    write_image(&disks.join("a.qcow2"), "qcow2", "20G");
    write_image(&disks.join("nested/b.qcow2"), "qcow2", "40G");
    write_image(&disks.join("c,d.raw"), "raw", "1G");

    let mut engine = engine();
    engine
        .scan_folder(&disks.to_string_lossy(), &SilentReporter)
        .unwrap();
    let k = engine.catalog().len();
    assert_eq!(k, 3);

    let csv_path = tmp.path().join("export.csv");
    let written = engine.export(&csv_path).unwrap();
    assert_eq!(written, k);

    let text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), k + 1);
    assert_eq!(
        text.lines().next().unwrap(),
        "Filename,Size,Format,Path,Scan_Date"
    );

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<CsvRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), k);

    let scan_date = &rows[0].scan_date;
    for (row, record) in rows.iter().zip(engine.catalog().all()) {
        assert_eq!(row.filename, record.filename);
        assert_eq!(row.size, record.size);
        assert_eq!(row.format, record.format);
        assert_eq!(row.path, record.full_path);
        assert_eq!(&row.scan_date, scan_date);
    }
}

#[test]
fn test_export_empty_catalog_is_rejected() {
    let tmp = tempdir().unwrap();
    let csv_path = tmp.path().join("export.csv");

    let result = engine().export(&csv_path);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(!csv_path.exists());
}

#[test]
fn test_export_to_missing_directory_is_io_error() {
    let tmp = tempdir().unwrap();
    write_image(&tmp.path().join("a.qcow2"), "qcow2", "20G");

    let mut engine = engine();
    engine
        .scan_folder(&tmp.path().to_string_lossy(), &SilentReporter)
        .unwrap();

    let result = engine.export(&tmp.path().join("no/such/dir/out.csv"));
    assert!(matches!(result, Err(Error::Io(_))));
}
