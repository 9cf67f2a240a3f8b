//! Copy vault asset folders into the published site.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::note::Vault;

/// Asset folder name inside every vault.
pub const VAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Error)]
pub enum AssetCopyError {
    #[error("failed to walk assets in {0}: {1}")]
    Walk(String, #[source] walkdir::Error),

    #[error("failed to copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Copy `<vault>/assets` into `site_assets_dir`, merging with files already
/// there. Returns `false` when the vault has no assets folder.
pub fn copy_assets(vault: &Vault, site_assets_dir: &Path) -> Result<bool, AssetCopyError> {
    let source = vault.path.join(VAULT_ASSETS_DIR);
    if !source.is_dir() {
        debug!(vault = %vault.name, "no assets folder");
        return Ok(false);
    }

    let mut copied = 0usize;
    for entry in WalkDir::new(&source).follow_links(false) {
        let entry = entry.map_err(|e| AssetCopyError::Walk(source.display().to_string(), e))?;
        let rel = entry.path().strip_prefix(&source).unwrap_or(entry.path());
        let target = site_assets_dir.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|source| AssetCopyError::Io { path: target.clone(), source })?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)
                .map_err(|source| AssetCopyError::Io { path: target.clone(), source })?;
            copied += 1;
        }
    }

    debug!(vault = %vault.name, files = copied, target = %site_assets_dir.display(), "copied assets");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_nested_assets() {
        let vault_dir = TempDir::new().unwrap();
        fs::create_dir_all(vault_dir.path().join("assets/images")).unwrap();
        fs::write(vault_dir.path().join("assets/images/logo.png"), [1u8, 2, 3]).unwrap();
        fs::write(vault_dir.path().join("assets/site.css"), "body {}").unwrap();

        let site = TempDir::new().unwrap();
        let target = site.path().join("public/assets");
        let copied = copy_assets(&Vault::new("main", vault_dir.path()), &target).unwrap();

        assert!(copied);
        assert_eq!(fs::read(target.join("images/logo.png")).unwrap(), vec![1u8, 2, 3]);
        assert_eq!(fs::read_to_string(target.join("site.css")).unwrap(), "body {}");
    }

    #[test]
    fn vault_without_assets_is_a_no_op() {
        let vault_dir = TempDir::new().unwrap();
        let site = TempDir::new().unwrap();
        let target = site.path().join("assets");

        assert!(!copy_assets(&Vault::new("main", vault_dir.path()), &target).unwrap());
        assert!(!target.exists());
    }
}
