#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use vdisk_core::{DiskFormat, DiskSize, DiskTool, Error};

/// Stand-in for qemu-img that treats a file's own contents as its `info` output.
///
/// Files whose contents do not start with `image:` are rejected the way qemu-img
/// rejects foreign files. `create` writes a matching info block to the target.
#[derive(Default)]
pub struct FileBackedTool {
    pub calls: RefCell<Vec<String>>,
    pub missing: bool,
}

impl FileBackedTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_installed() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl DiskTool for FileBackedTool {
    fn create(&self, path: &Path, format: DiskFormat, size: &DiskSize) -> Result<(), Error> {
        self.calls
            .borrow_mut()
            .push(format!("create -f {} {} {}", format, path.display(), size));
        if self.missing {
            return Err(Error::ToolNotFound {
                program: "qemu-img".to_string(),
            });
        }
        fs::write(path, info_text(&path.to_string_lossy(), format.as_str(), size.as_str()))?;
        Ok(())
    }

    fn info(&self, path: &Path) -> Result<String, Error> {
        self.calls.borrow_mut().push(format!("info {}", path.display()));
        if self.missing {
            return Err(Error::ToolNotFound {
                program: "qemu-img".to_string(),
            });
        }
        let contents = fs::read_to_string(path)?;
        if !contents.starts_with("image:") {
            return Err(Error::ToolExecution {
                program: "qemu-img".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("qemu-img: Could not open '{}'", path.display()),
            });
        }
        Ok(contents)
    }
}

pub fn info_text(path: &str, format: &str, size: &str) -> String {
    let name = Path::new(path)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "image: {}\nfile format: {}\nvirtual size: {} (21474836480 bytes)\ndisk size: 196K\n",
        name, format, size
    )
}

/// Write a file qemu-img would accept.
pub fn write_image(path: &Path, format: &str, size: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, info_text(&path.to_string_lossy(), format, size)).unwrap();
}

/// Write a file qemu-img would reject.
pub fn write_garbage(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "not a disk image").unwrap();
}
