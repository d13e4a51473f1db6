use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use super::DiskTool;
use crate::catalog::{DiskFormat, DiskSize};
use crate::error::Error;

/// Blocking, one-shot wrapper around the `qemu-img` binary.
#[derive(Debug, Clone)]
pub struct QemuImg {
    program: String,
}

impl Default for QemuImg {
    fn default() -> Self {
        Self::new("qemu-img")
    }
}

impl QemuImg {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program with `args` and return stdout. A non-zero exit becomes
    /// [`Error::ToolExecution`] carrying stderr.
    pub(crate) fn run(&self, args: &[&OsStr]) -> Result<String, Error> {
        debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|err| self.spawn_error(err))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ToolExecution {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Any failure to start the process means the tool is unusable: missing,
    /// not executable, or built for another platform.
    fn spawn_error(&self, err: io::Error) -> Error {
        debug!("Could not start {}: {}", self.program, err);
        Error::ToolNotFound {
            program: self.program.clone(),
        }
    }
}

fn create_args<'a>(path: &'a Path, format: DiskFormat, size: &'a DiskSize) -> [&'a OsStr; 5] {
    [
        OsStr::new("create"),
        OsStr::new("-f"),
        OsStr::new(format.as_str()),
        path.as_os_str(),
        OsStr::new(size.as_str()),
    ]
}

impl DiskTool for QemuImg {
    fn create(&self, path: &Path, format: DiskFormat, size: &DiskSize) -> Result<(), Error> {
        self.run(&create_args(path, format, size))?;
        Ok(())
    }

    fn info(&self, path: &Path) -> Result<String, Error> {
        self.run(&[OsStr::new("info"), path.as_os_str()])
    }
}
