use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig, VaultEntry};
use crate::note::Vault;
use shellexpand::full;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("no vaults defined in config")]
    NoVaults,

    #[error("vault '{0}' is defined more than once")]
    DuplicateVault(String),

    #[error("duplicateNoteBehavior pins unknown vault '{0}'")]
    UnknownPinnedVault(String),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '{0}'")]
    NoHome(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.vaults.is_empty() {
            return Err(ConfigError::NoVaults);
        }

        let ws_root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let vaults = Self::resolve_vaults(&ws_root, &cf.vaults)?;

        if let Some(pinned) = cf.site.duplicate_vault()
            && !vaults.iter().any(|v| v.name == pinned)
        {
            return Err(ConfigError::UnknownPinnedVault(pinned.to_string()));
        }

        let logging = Self::resolve_logging(&ws_root, &cf.logging)?;

        Ok(ResolvedConfig { ws_root, vaults, site: cf.site, logging })
    }

    fn resolve_vaults(ws_root: &Path, entries: &[VaultEntry]) -> Result<Vec<Vault>, ConfigError> {
        let mut seen = HashSet::new();
        entries
            .iter()
            .map(|entry| {
                if !seen.insert(entry.name.as_str()) {
                    return Err(ConfigError::DuplicateVault(entry.name.clone()));
                }
                Ok(Vault::new(&entry.name, resolve_path(ws_root, &entry.path)?))
            })
            .collect()
    }

    fn resolve_logging(
        ws_root: &Path,
        log_cfg: &LoggingConfig,
    ) -> Result<LoggingConfig, ConfigError> {
        let file = match &log_cfg.file {
            Some(file) => Some(resolve_path(ws_root, &file.to_string_lossy())?),
            None => None,
        };
        Ok(LoggingConfig { file, ..log_cfg.clone() })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("notepub").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("notepub").join("config.toml")
}

/// Expand `{{ws_root}}`, `~` and environment variables; anchor relative
/// results at `ws_root`.
fn resolve_path(ws_root: &Path, input: &str) -> Result<PathBuf, ConfigError> {
    let substituted = input.replace("{{ws_root}}", &ws_root.to_string_lossy());
    let expanded =
        full(&substituted).map_err(|_| ConfigError::NoHome(input.to_string()))?.to_string();
    let path = PathBuf::from(expanded);
    Ok(if path.is_absolute() { path } else { ws_root.join(path) })
}
