//! Hierarchy publish filter.
//!
//! Each configured domain is filtered on its own: the domain note is picked
//! (resolving duplicates across vaults), normalized into a tree root, and
//! its subtree is walked with a worklist. The input graph is only read;
//! every kept note is a fresh copy in the output map.

use std::collections::{BTreeMap, HashSet};

use serde_yaml::Value;
use tracing::{debug, warn};

use super::domains::get_domains;
use super::strip::strip_local_only_tags;
use super::types::{HierarchyOutcome, PublishError, PublishOutput, PublishWarning};
use super::visibility::can_publish_filtered;
use crate::config::{ResolvedHierarchyConfig, SiteConfig};
use crate::note::{Note, NoteLookup, NoteStore};

pub const NAV_ORDER_KEY: &str = "nav_order";
pub const PERMALINK_KEY: &str = "permalink";
pub const NOINDEX_KEY: &str = "noindex";
/// Per-note frontmatter override for level skipping.
pub const SKIP_LEVELS_KEY: &str = "skipLevels";

pub struct PublishFilter<'a> {
    lookup: &'a dyn NoteLookup,
    store: &'a dyn NoteStore,
    site: &'a SiteConfig,
}

impl<'a> PublishFilter<'a> {
    pub fn new(lookup: &'a dyn NoteLookup, store: &'a dyn NoteStore, site: &'a SiteConfig) -> Self {
        Self { lookup, store, site }
    }

    /// Filter every domain in `siteHierarchies` and merge the results.
    ///
    /// Later domains overwrite earlier ones when ids collide. With a single
    /// configured hierarchy the domain list also carries the domain note's
    /// published children.
    pub fn filter_by_config(&self) -> Result<PublishOutput, PublishError> {
        let mut output = PublishOutput::default();
        let mut persisted = HashSet::new();
        let mut domain_count = 0;

        for (nav_order, domain) in self.site.site_hierarchies.iter().enumerate() {
            let Some(outcome) =
                self.filter_by_hierarchy(domain, nav_order, &mut persisted, &mut output.warnings)?
            else {
                continue;
            };
            domain_count += 1;
            output.notes.extend(outcome.notes);
        }

        if domain_count > 0 {
            output.domains = get_domains(&output.notes, self.site).into_iter().cloned().collect();
        }
        debug!(
            notes = output.notes.len(),
            domains = output.domains.len(),
            warnings = output.warnings.len(),
            "publish filter finished"
        );
        Ok(output)
    }

    /// Filter one domain. Returns `Ok(None)` when the domain is skipped; the
    /// reason is pushed onto `warnings`.
    ///
    /// `persisted` holds ids of stubs already written during this pass and is
    /// shared across domains, so a stub reachable from several domains is
    /// written once.
    pub fn filter_by_hierarchy(
        &self,
        domain: &str,
        nav_order: usize,
        persisted: &mut HashSet<String>,
        warnings: &mut Vec<PublishWarning>,
    ) -> Result<Option<HierarchyOutcome>, PublishError> {
        let hconfig = self.site.hierarchy_config(domain);

        let Some(domain_note) = self.pick_domain_note(domain, &hconfig, warnings)? else {
            return Ok(None);
        };
        let domain_note = self.normalize_domain(domain_note, nav_order);
        let domain_id = domain_note.id.clone();

        let mut out: BTreeMap<String, Note> = BTreeMap::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut worklist = vec![domain_note];

        while let Some(note) = worklist.pop() {
            if !visited.insert(note.id.clone()) {
                continue;
            }
            if !can_publish_filtered(&note, &hconfig) {
                debug!(note = %note.id, "not published");
                continue;
            }

            let mut kept = filter_note(&note, &hconfig);
            if self.site.write_stubs && kept.stub {
                kept.stub = false;
                if persisted.insert(note.id.clone()) {
                    self.persist_cleared_stub(&note, warnings);
                }
            }

            let skip = skip_levels(&note, &hconfig);
            let children: Vec<Note> = self
                .descendants(&note, skip)
                .into_iter()
                .filter(|child| can_publish_filtered(child, &hconfig))
                .map(|child| {
                    let mut child = child.clone();
                    if skip > 0 {
                        child.parent = Some(note.id.clone());
                    }
                    child
                })
                .collect();

            kept.children = children.iter().map(|c| c.id.clone()).collect();
            worklist.extend(children);
            out.insert(kept.id.clone(), kept);
        }

        let Some(domain) = out.get(&domain_id).cloned() else {
            return Ok(None);
        };
        debug!(domain = %domain.fname, notes = out.len(), "filtered hierarchy");
        Ok(Some(HierarchyOutcome { notes: out, domain }))
    }

    fn pick_domain_note(
        &self,
        domain: &str,
        hconfig: &ResolvedHierarchyConfig,
        warnings: &mut Vec<PublishWarning>,
    ) -> Result<Option<&'a Note>, PublishError> {
        let candidates: Vec<&Note> = self
            .lookup
            .notes_by_fname(domain, None)
            .into_iter()
            .filter(|n| can_publish_filtered(n, hconfig))
            .collect();

        match candidates.as_slice() {
            [] => {
                warn!(domain, "no publishable domain note; skipping");
                warnings.push(PublishWarning::MissingDomain { domain: domain.to_string() });
                Ok(None)
            }
            [only] => Ok(Some(*only)),
            many => {
                let Some(vault) = self.site.duplicate_vault() else {
                    return Err(PublishError::AmbiguousDomain {
                        domain: domain.to_string(),
                        count: many.len(),
                    });
                };
                match many.iter().find(|n| n.vault == vault) {
                    Some(note) => Ok(Some(*note)),
                    None => {
                        warn!(domain, vault, "pinned vault has no domain note; skipping");
                        warnings.push(PublishWarning::PinnedVaultMissing {
                            domain: domain.to_string(),
                            vault: vault.to_string(),
                        });
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Turn the picked note into a tree root with navigation metadata.
    fn normalize_domain(&self, note: &Note, nav_order: usize) -> Note {
        let mut domain = note.clone();
        domain.parent = None;
        domain.title = capitalize(&domain.title);
        domain.custom.insert(NAV_ORDER_KEY.to_string(), Value::from(nav_order as u64));
        if self.site.site_index.as_deref() == Some(domain.fname.as_str()) {
            domain.custom.insert(PERMALINK_KEY.to_string(), Value::from("/"));
        }
        domain
    }

    /// Children of `note`, or its descendants `skip` generations further
    /// down. Ids missing from the graph are ignored.
    fn descendants(&self, note: &Note, skip: usize) -> Vec<&'a Note> {
        let mut generation: Vec<&Note> = self.children_of(note);
        for _ in 0..skip {
            generation = generation.into_iter().flat_map(|n| self.children_of(n)).collect();
        }
        generation
    }

    fn children_of(&self, note: &Note) -> Vec<&'a Note> {
        note.children.iter().filter_map(|id| self.lookup.note(id)).collect()
    }

    /// Persist `note` with its stub flag cleared. Failures are reported but
    /// never stop the pass.
    fn persist_cleared_stub(&self, note: &Note, warnings: &mut Vec<PublishWarning>) {
        let mut materialized = note.clone();
        materialized.stub = false;
        if let Err(err) = self.store.write_note(&materialized) {
            warn!(note = %note.id, error = %err, "failed to persist cleared stub");
            warnings.push(PublishWarning::StubPersistFailed {
                id: note.id.clone(),
                message: err.to_string(),
            });
        }
    }
}

/// Published copy of a single note: hierarchy frontmatter injected, noindex
/// stamped when the hierarchy asks for it, local-only lines removed.
pub fn filter_note(note: &Note, hconfig: &ResolvedHierarchyConfig) -> Note {
    let mut out = note.clone();
    for fm in &hconfig.custom_frontmatter {
        out.custom.insert(fm.key.clone(), fm.value.clone());
    }
    if hconfig.noindex_by_default && !out.custom.contains_key(NOINDEX_KEY) {
        out.custom.insert(NOINDEX_KEY.to_string(), Value::Bool(true));
    }
    out.body = strip_local_only_tags(&note.body);
    out
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Levels to skip below `note`: its own `skipLevels` frontmatter, else the
/// hierarchy setting.
fn skip_levels(note: &Note, hconfig: &ResolvedHierarchyConfig) -> usize {
    match note.custom.get(SKIP_LEVELS_KEY).and_then(Value::as_u64) {
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        None => hconfig.skip_levels,
    }
}
