mod qemu_img;

use std::path::Path;

pub use qemu_img::QemuImg;

use crate::catalog::{DiskFormat, DiskSize};
use crate::error::Error;

/// The external disk image tool.
///
/// `QemuImg` shells out to the real binary; tests substitute their own
/// implementation so scanning can be exercised without QEMU installed.
pub trait DiskTool {
    /// Run `create -f <format> <path> <size>`.
    fn create(&self, path: &Path, format: DiskFormat, size: &DiskSize) -> Result<(), Error>;

    /// Run `info <path>` and return its stdout.
    fn info(&self, path: &Path) -> Result<String, Error>;
}
