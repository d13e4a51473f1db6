use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::{AddOutcome, CatalogStore, DiskFormat, DiskRecord, DiskSize};
use crate::config::AppConfig;
use crate::error::Error;
use crate::export;
use crate::progress::ScanReporter;
use crate::scanner::{FolderScanner, ScanReport};
use crate::tool::{DiskTool, QemuImg};

/// One session's catalog together with the tool that fills it.
///
/// Rows are addressed by 1-based index in [`CatalogStore::all`] order, the same
/// numbering a front end shows in its table.
pub struct DiskEngine<T: DiskTool> {
    tool: T,
    config: AppConfig,
    catalog: CatalogStore,
}

#[derive(Debug)]
pub struct CreateResult {
    pub record: DiskRecord,
    pub outcome: AddOutcome,
}

/// Output of the info action for one cataloged disk.
#[derive(Debug)]
pub struct DiskInfo {
    pub record: DiskRecord,
    pub details: String,
}

impl fmt::Display for DiskInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Disk: {}", self.record.filename)?;
        writeln!(f, "Path: {}", self.record.full_path)?;
        writeln!(f, "Format: {}", self.record.format)?;
        writeln!(f, "Virtual Size: {}", self.record.size)?;
        writeln!(f)?;
        writeln!(f, "Detailed Information:")?;
        writeln!(f, "{}", "-".repeat(40))?;
        write!(f, "{}", self.details)
    }
}

impl DiskEngine<QemuImg> {
    pub fn from_config(config: AppConfig) -> Self {
        let tool = QemuImg::new(&config.qemu_img);
        Self::new(tool, config)
    }
}

impl<T: DiskTool> DiskEngine<T> {
    pub fn new(tool: T, config: AppConfig) -> Self {
        Self {
            tool,
            config,
            catalog: CatalogStore::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn scan_folder(
        &mut self,
        folder: &str,
        reporter: &dyn ScanReporter,
    ) -> Result<ScanReport, Error> {
        FolderScanner::new(&self.tool)
            .with_ignore_patterns(&self.config.ignore_patterns)
            .scan(folder, &mut self.catalog, reporter)
    }

    /// Create a new image and register it.
    ///
    /// The size is validated before qemu-img runs. A path without an extension
    /// gets `.<format>` appended. If the catalog rejects the record the image
    /// still exists on disk; the rejection is reported in the returned outcome.
    pub fn create_disk(
        &mut self,
        path: &str,
        format: DiskFormat,
        size: &str,
    ) -> Result<CreateResult, Error> {
        if path.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Please choose a file name for the new disk".to_string(),
            ));
        }
        let size = DiskSize::parse(size)?;
        let target = with_default_extension(path, format);

        info!("Creating {} {} disk at {}", size, format, target);
        self.tool.create(Path::new(&target), format, &size)?;

        let record = DiskRecord::new(&target, format.as_str(), size.as_str());
        let outcome = self.catalog.add(record.clone());
        Ok(CreateResult { record, outcome })
    }

    /// Look up a row by its 1-based table index.
    pub fn select(&self, index: usize) -> Result<&DiskRecord, Error> {
        index
            .checked_sub(1)
            .and_then(|i| self.catalog.get(i))
            .ok_or_else(|| {
                Error::InvalidInput("Please select a disk from the list first!".to_string())
            })
    }

    pub fn full_path(&self, index: usize) -> Result<&str, Error> {
        let record = self.select(index)?;
        if record.full_path.is_empty() {
            return Err(Error::InvalidInput(
                "No path information available for this disk.".to_string(),
            ));
        }
        Ok(&record.full_path)
    }

    pub fn disk_info(&self, index: usize) -> Result<DiskInfo, Error> {
        let path = self.full_path(index)?;
        let details = self.tool.info(Path::new(path))?;
        let record = self.select(index)?.clone();
        Ok(DiskInfo { record, details })
    }

    /// Drop a row from the catalog. The image file is not touched.
    pub fn remove(&mut self, index: usize) -> Result<DiskRecord, Error> {
        let record = self.select(index)?.clone();
        if !self.catalog.remove(&record.filename, &record.full_path) {
            return Err(Error::InvalidInput(format!(
                "'{}' is no longer in the list",
                record.filename
            )));
        }
        info!("Removed from list: {}", record.filename);
        Ok(record)
    }

    pub fn export(&self, destination: &Path) -> Result<usize, Error> {
        if self.catalog.is_empty() {
            return Err(Error::InvalidInput(
                "No disks in the list to export!".to_string(),
            ));
        }
        export::export_csv(self.catalog.all(), destination)
    }
}

fn with_default_extension(path: &str, format: DiskFormat) -> String {
    let path_buf = PathBuf::from(path);
    if path_buf.extension().is_some() {
        return path.to_string();
    }
    format!("{}.{}", path, format.extension())
}
