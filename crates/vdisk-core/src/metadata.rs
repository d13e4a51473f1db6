//! Extraction of size and format from `qemu-img info` text output.
//!
//! The parser relies on qemu-img's human readable layout:
//!
//! ```text
//! image: debian.qcow2
//! file format: qcow2
//! virtual size: 20G (21474836480 bytes)
//! ```
//!
//! The size is taken positionally, as the third whitespace token before the `(`.
//! If qemu-img ever rewords that line, the size silently comes back as `Unknown`.

use crate::catalog::UNKNOWN_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskMetadata {
    /// Size token such as `20G`, or `Unknown`.
    pub virtual_size: String,
    pub format: Option<String>,
}

/// Parse `qemu-img info` output. Never fails; absent fields come back as
/// `Unknown` / `None`.
pub fn parse_info(output: &str) -> DiskMetadata {
    let mut virtual_size = None;
    let mut format = None;

    for line in output.lines() {
        let lower = line.to_lowercase();
        if lower.contains("virtual size") {
            let before_paren = line.split('(').next().unwrap_or_default();
            if let Some(token) = before_paren.split_whitespace().nth(2) {
                virtual_size = Some(token.to_string());
            }
        } else if lower.contains("file format") {
            let value = line.rsplit(':').next().unwrap_or_default().trim();
            if !value.is_empty() {
                format = Some(value.to_string());
            }
        }
    }

    DiskMetadata {
        virtual_size: virtual_size.unwrap_or_else(|| UNKNOWN_SIZE.to_string()),
        format,
    }
}

/// Fallback when qemu-img did not report a format.
pub fn format_from_extension(path: &str) -> &'static str {
    if path.to_lowercase().ends_with(".qcow2") {
        "qcow2"
    } else {
        "raw"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QCOW2_INFO: &str = "image: debian.qcow2\n\
file format: qcow2\n\
virtual size: 20G (21474836480 bytes)\n\
disk size: 196K\n\
cluster_size: 65536\n";

    #[test]
    fn test_parse_classic_output() {
        let meta = parse_info(QCOW2_INFO);
        assert_eq!(meta.virtual_size, "20G");
        assert_eq!(meta.format.as_deref(), Some("qcow2"));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let meta = parse_info("File Format: raw\nVirtual Size: 512M (536870912 bytes)\n");
        assert_eq!(meta.virtual_size, "512M");
        assert_eq!(meta.format.as_deref(), Some("raw"));
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let meta = parse_info("image: foo\ndisk size: 4K\n");
        assert_eq!(meta.virtual_size, "Unknown");
        assert_eq!(meta.format, None);

        let meta = parse_info("");
        assert_eq!(meta.virtual_size, "Unknown");
    }

    #[test]
    fn test_newer_size_wording_takes_third_token() {
        // qemu 5+ prints "20 GiB"; the positional token is then just "20".
        let meta = parse_info("virtual size: 20 GiB (21474836480 bytes)\n");
        assert_eq!(meta.virtual_size, "20");
    }

    #[test]
    fn test_short_virtual_size_line_is_unknown() {
        let meta = parse_info("virtual size:\n");
        assert_eq!(meta.virtual_size, "Unknown");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension("/vms/a.qcow2"), "qcow2");
        assert_eq!(format_from_extension("/vms/a.QCOW2"), "qcow2");
        assert_eq!(format_from_extension("/vms/a.raw"), "raw");
        assert_eq!(format_from_extension("/vms/a.img"), "raw");
    }
}
