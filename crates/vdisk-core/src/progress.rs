use crate::scanner::ScanReport;

/// Trait for reporting folder scan progress.
///
/// Calls arrive synchronously on the scanning thread. All methods have default
/// no-op implementations.
pub trait ScanReporter: Send + Sync {
    fn on_scan_start(&self, _root: &str) {}
    fn on_candidates_found(&self, _total: usize) {}
    fn on_file_processed(&self, _processed: usize, _total: usize, _current_path: &str) {}
    fn on_scan_complete(&self, _report: &ScanReport, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ScanReporter for SilentReporter {}
