use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

use crate::catalog::DiskFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Program used for `create` and `info`. Looked up on PATH unless absolute.
    #[serde(default = "default_qemu_img")]
    pub qemu_img: String,
    #[serde(default)]
    pub default_format: DiskFormat,
    #[serde(default = "default_size")]
    pub default_size: String,
    /// Glob patterns for paths the folder scanner skips.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            qemu_img: default_qemu_img(),
            default_format: DiskFormat::default(),
            default_size: default_size(),
            ignore_patterns: Vec::new(),
        }
    }
}

fn default_qemu_img() -> String {
    "qemu-img".to_string()
}

fn default_size() -> String {
    "20G".to_string()
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(environment_source())
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// `VDISK_*` variables, e.g. `VDISK_QEMU_IMG` or `VDISK_IGNORE_PATTERNS=a,b`.
fn environment_source() -> Environment {
    Environment::with_prefix("VDISK")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("ignore_patterns")
}
