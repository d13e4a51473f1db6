use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// One cataloged disk image. Fields are fixed once the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskRecord {
    pub filename: String,
    pub full_path: String,
    /// Format tag as reported by qemu-img (`qcow2`, `raw`, or anything else it knows).
    pub format: String,
    /// Human readable virtual size such as `20G`, or `Unknown`.
    pub size: String,
}

pub const UNKNOWN_SIZE: &str = "Unknown";

impl DiskRecord {
    pub fn new(full_path: &str, format: &str, size: &str) -> Self {
        Self {
            filename: base_name(full_path),
            full_path: full_path.to_string(),
            format: format.to_string(),
            size: size.to_string(),
        }
    }
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Formats that can be created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskFormat {
    #[default]
    Qcow2,
    Raw,
}

impl DiskFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiskFormat::Qcow2 => "qcow2",
            DiskFormat::Raw => "raw",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for DiskFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiskFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qcow2" => Ok(DiskFormat::Qcow2),
            "raw" => Ok(DiskFormat::Raw),
            other => Err(Error::InvalidInput(format!(
                "Unsupported disk format '{}' (expected qcow2 or raw)",
                other
            ))),
        }
    }
}

/// A validated size argument for `qemu-img create`: digits followed by one of K, M, G, T.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskSize(String);

const SIZE_UNITS: [char; 4] = ['K', 'M', 'G', 'T'];

impl DiskSize {
    /// Trims and upper-cases the input before checking it, so `" 20g"` becomes `20G`.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let size = input.trim().to_uppercase();
        let invalid =
            || Error::InvalidInput("Invalid size format! Use format like: 20G, 100M, 1T".to_string());

        let unit = size.chars().last().ok_or_else(invalid)?;
        if !SIZE_UNITS.contains(&unit) {
            return Err(invalid());
        }
        let digits = &size[..size.len() - unit.len_utf8()];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        Ok(DiskSize(size))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiskSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DiskSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiskSize::parse(s)
    }
}
