//! Publish-time hierarchy filtering.
//!
//! [`PublishFilter`] derives, from the full note graph, the pruned set of
//! notes a site should contain: one subtree per configured domain, with
//! visibility rules, duplicate-domain resolution, frontmatter injection and
//! level skipping applied. [`get_domains`] orders the result for navigation.

pub mod assets;
pub mod domains;
pub mod filter;
pub mod site_notes;
pub mod strip;
pub mod types;
pub mod visibility;

pub use assets::{AssetCopyError, VAULT_ASSETS_DIR, copy_assets};
pub use domains::get_domains;
pub use filter::{
    NAV_ORDER_KEY, NOINDEX_KEY, PERMALINK_KEY, PublishFilter, SKIP_LEVELS_KEY, capitalize,
    filter_note,
};
pub use site_notes::site_only_notes;
pub use strip::{LOCAL_ONLY_MARKER, strip_local_only_tags};
pub use types::{HierarchyOutcome, PublishError, PublishOutput, PublishWarning};
pub use visibility::{PUBLISHED_KEY, can_publish, can_publish_filtered};
