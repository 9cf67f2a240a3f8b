//! Site publishing configuration and hierarchy rule resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Config map key every domain falls back to.
pub const ROOT_HIERARCHY: &str = "root";

/// Publishing rules for the whole site.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Domains to publish, in navigation order.
    #[serde(default = "default_site_hierarchies")]
    pub site_hierarchies: Vec<String>,
    /// Per-domain rules, with `root` as the fallback entry.
    #[serde(default)]
    pub config: HashMap<String, HierarchyConfig>,
    #[serde(default)]
    pub duplicate_note_behavior: Option<DuplicateNoteBehavior>,
    /// Domain published at permalink `/`.
    #[serde(default)]
    pub site_index: Option<String>,
    /// Clear the stub flag of published stubs and persist the change.
    #[serde(default)]
    pub write_stubs: bool,
    #[serde(default = "default_site_assets_dir")]
    pub site_assets_dir: String,
    #[serde(default = "default_copy_assets")]
    pub copy_assets: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_hierarchies: default_site_hierarchies(),
            config: HashMap::new(),
            duplicate_note_behavior: None,
            site_index: None,
            write_stubs: false,
            site_assets_dir: default_site_assets_dir(),
            copy_assets: default_copy_assets(),
        }
    }
}

fn default_site_hierarchies() -> Vec<String> {
    vec![ROOT_HIERARCHY.to_string()]
}

fn default_site_assets_dir() -> String {
    "assets".to_string()
}

fn default_copy_assets() -> bool {
    true
}

/// Rules for one hierarchy. Unset fields inherit from the `root` entry and
/// then from [`ResolvedHierarchyConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyConfig {
    pub publish_by_default: Option<bool>,
    pub noindex_by_default: Option<bool>,
    pub custom_frontmatter: Option<Vec<CustomFrontmatter>>,
    pub skip_levels: Option<usize>,
}

/// Frontmatter key injected into every published note of a hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CustomFrontmatter {
    pub key: String,
    pub value: Value,
}

/// How to pick a domain note when several vaults contain it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DuplicateNoteBehavior {
    pub payload: DuplicateNotePayload,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DuplicateNotePayload {
    /// Name of the vault whose note wins.
    pub vault: String,
}

/// Hierarchy rules with every field decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHierarchyConfig {
    pub publish_by_default: bool,
    pub noindex_by_default: bool,
    pub custom_frontmatter: Vec<CustomFrontmatter>,
    pub skip_levels: usize,
}

impl Default for ResolvedHierarchyConfig {
    fn default() -> Self {
        Self {
            publish_by_default: true,
            noindex_by_default: false,
            custom_frontmatter: Vec::new(),
            skip_levels: 0,
        }
    }
}

impl SiteConfig {
    /// Resolve rules for `domain`: its own entry, then `root`, then defaults,
    /// field by field.
    pub fn hierarchy_config(&self, domain: &str) -> ResolvedHierarchyConfig {
        let own = self.config.get(domain);
        let root = self.config.get(ROOT_HIERARCHY);
        let pick = |field: fn(&HierarchyConfig) -> Option<bool>| {
            own.and_then(field).or_else(|| root.and_then(field))
        };
        let defaults = ResolvedHierarchyConfig::default();

        ResolvedHierarchyConfig {
            publish_by_default: pick(|c| c.publish_by_default)
                .unwrap_or(defaults.publish_by_default),
            noindex_by_default: pick(|c| c.noindex_by_default)
                .unwrap_or(defaults.noindex_by_default),
            custom_frontmatter: own
                .and_then(|c| c.custom_frontmatter.clone())
                .or_else(|| root.and_then(|c| c.custom_frontmatter.clone()))
                .unwrap_or(defaults.custom_frontmatter),
            skip_levels: own
                .and_then(|c| c.skip_levels)
                .or_else(|| root.and_then(|c| c.skip_levels))
                .unwrap_or(defaults.skip_levels),
        }
    }

    /// Vault pinned for duplicate domain notes.
    pub fn duplicate_vault(&self) -> Option<&str> {
        self.duplicate_note_behavior.as_ref().map(|d| d.payload.vault.as_str())
    }
}
