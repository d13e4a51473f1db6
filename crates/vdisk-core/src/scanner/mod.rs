mod walk;

pub use walk::{find_disk_candidates, DISK_EXTENSIONS};

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::catalog::{AddOutcome, CatalogStore, DiskRecord};
use crate::error::Error;
use crate::metadata;
use crate::progress::ScanReporter;
use crate::tool::DiskTool;

/// Tally of one folder scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Candidate files found on disk.
    pub total_found: usize,
    pub added: usize,
    /// Rejected by the four-field duplicate rule.
    pub duplicates: usize,
    /// Rejected because the exact path was already cataloged with other metadata.
    pub path_conflicts: usize,
    /// Files qemu-img could not read; skipped without surfacing an error.
    pub failed: usize,
}

/// Walks a folder for `.qcow2` / `.raw` files and registers each readable one.
pub struct FolderScanner<'a> {
    tool: &'a dyn DiskTool,
    ignore_patterns: Vec<String>,
}

impl<'a> FolderScanner<'a> {
    pub fn new(tool: &'a dyn DiskTool) -> Self {
        Self {
            tool,
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns.to_vec();
        self
    }

    /// Scan `root` into `catalog`.
    ///
    /// Only a missing folder is an error. A file the tool rejects is counted in
    /// [`ScanReport::failed`] and the scan moves on.
    pub fn scan(
        &self,
        root: &str,
        catalog: &mut CatalogStore,
        reporter: &dyn ScanReporter,
    ) -> Result<ScanReport, Error> {
        let root_path = Path::new(root);
        if root.trim().is_empty() || !root_path.exists() {
            return Err(Error::InvalidFolder(format!(
                "Please select a valid folder first! ({})",
                root
            )));
        }

        info!("Scanning folder: {}", root);
        reporter.on_scan_start(root);
        let start = Instant::now();

        // An existing non-directory root is accepted and simply holds no disks.
        let candidates = if root_path.is_dir() {
            find_disk_candidates(root_path, &self.ignore_patterns)
        } else {
            Vec::new()
        };
        let total = candidates.len();
        reporter.on_candidates_found(total);
        debug!("{} candidate disk files under {}", total, root);

        let mut report = ScanReport {
            total_found: total,
            ..ScanReport::default()
        };

        for (index, path) in candidates.iter().enumerate() {
            let path_str = path.to_string_lossy();

            match self.read_record(path) {
                Ok(record) => match catalog.add(record) {
                    AddOutcome::Added => report.added += 1,
                    AddOutcome::Duplicate => report.duplicates += 1,
                    AddOutcome::PathExists => report.path_conflicts += 1,
                },
                Err(err) => {
                    debug!("Skipping {}: {}", path_str, err);
                    report.failed += 1;
                }
            }

            reporter.on_file_processed(index + 1, total, &path_str);
        }

        let duration = start.elapsed();
        info!(
            "Scan of {} completed in {:.2}s: {} found, {} added, {} duplicates",
            root,
            duration.as_secs_f64(),
            report.total_found,
            report.added,
            report.duplicates,
        );
        reporter.on_scan_complete(&report, duration.as_secs_f64());

        Ok(report)
    }

    /// The tool sees the path as found on disk; only the record holds the
    /// display string.
    fn read_record(&self, path: &Path) -> Result<DiskRecord, Error> {
        let output = self.tool.info(path)?;
        let meta = metadata::parse_info(&output);
        let path_str = path.to_string_lossy();
        let format = meta
            .format
            .unwrap_or_else(|| metadata::format_from_extension(&path_str).to_string());
        Ok(DiskRecord::new(&path_str, &format, &meta.virtual_size))
    }
}
