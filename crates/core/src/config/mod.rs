//! Workspace configuration: vaults, site publishing rules and logging.

pub mod loader;
pub mod site;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use site::{
    CustomFrontmatter, DuplicateNoteBehavior, DuplicateNotePayload, HierarchyConfig,
    ROOT_HIERARCHY, ResolvedHierarchyConfig, SiteConfig,
};
pub use types::{ConfigFile, LoggingConfig, ResolvedConfig, VaultEntry};
