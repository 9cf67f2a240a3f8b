use std::path::PathBuf;

use serde::Deserialize;

use crate::config::site::SiteConfig;
use crate::note::Vault;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub vaults: Vec<VaultEntry>,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct VaultEntry {
    pub name: String,
    /// Supports `~`, environment variables and `{{ws_root}}` (the directory
    /// holding the config file). Relative paths resolve against `ws_root`.
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory containing the config file.
    pub ws_root: PathBuf,
    /// Vaults in configured order.
    pub vaults: Vec<Vault>,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
}
