//! Per-note publish visibility.

use crate::config::{ROOT_HIERARCHY, ResolvedHierarchyConfig, SiteConfig};
use crate::note::Note;

/// Frontmatter key a note uses to opt in or out of publishing.
pub const PUBLISHED_KEY: &str = "published";

/// Visibility under already-resolved hierarchy rules: not explicitly
/// unpublished, and either published by default or explicitly opted in.
pub fn can_publish_filtered(note: &Note, config: &ResolvedHierarchyConfig) -> bool {
    match note.custom_bool(PUBLISHED_KEY) {
        Some(false) => false,
        Some(true) => true,
        None => config.publish_by_default,
    }
}

/// Full visibility check: the note's domain must be one of the site
/// hierarchies (a lone `root` hierarchy covers every domain), and the
/// note must pass the rules of its domain.
pub fn can_publish(note: &Note, site: &SiteConfig) -> bool {
    let domain = note.domain_name();
    let in_scope = matches!(site.site_hierarchies.as_slice(), [only] if only == ROOT_HIERARCHY)
        || site.site_hierarchies.iter().any(|h| h == domain);

    in_scope && can_publish_filtered(note, &site.hierarchy_config(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(publish_by_default: bool) -> ResolvedHierarchyConfig {
        ResolvedHierarchyConfig { publish_by_default, ..Default::default() }
    }

    #[test]
    fn explicit_opt_out_always_wins() {
        let note = Note::new("a", "a", "main").with_custom(PUBLISHED_KEY, false);
        assert!(!can_publish_filtered(&note, &rules(true)));
    }

    #[test]
    fn opt_in_required_when_not_published_by_default() {
        let plain = Note::new("a", "a", "main");
        let opted = plain.clone().with_custom(PUBLISHED_KEY, true);
        assert!(!can_publish_filtered(&plain, &rules(false)));
        assert!(can_publish_filtered(&opted, &rules(false)));
        assert!(can_publish_filtered(&plain, &rules(true)));
    }

    #[test]
    fn domain_must_be_configured() {
        let site = SiteConfig { site_hierarchies: vec!["blog".into()], ..Default::default() };
        assert!(can_publish(&Note::new("p", "blog.post", "main"), &site));
        assert!(!can_publish(&Note::new("d", "diary.day", "main"), &site));
        assert!(can_publish(&Note::new("d", "diary.day", "main"), &SiteConfig::default()));
    }
}
