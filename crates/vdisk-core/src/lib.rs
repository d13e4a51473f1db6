pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod metadata;
pub mod progress;
pub mod scanner;
pub mod tool;

pub use catalog::{AddOutcome, CatalogStore, DiskFormat, DiskRecord, DiskSize};
pub use config::AppConfig;
pub use engine::{CreateResult, DiskEngine, DiskInfo};
pub use error::Error;
pub use progress::{ScanReporter, SilentReporter};
pub use scanner::{FolderScanner, ScanReport};
pub use tool::{DiskTool, QemuImg};
