//! Upgrade catalog
//!
//! Fixed mapping from a totem's type id to the next tier, plus the test
//! for whether two items form an upgradeable pair. The mapping is exact
//! match only — no numeric-range or fuzzy inference.

use std::collections::HashMap;

use crate::data::chains::ChainLink;
use crate::items::{Item, TypeId, TOTEM_TAG};

/// Name substrings recognized as totem markers when the tag is absent.
/// Some item definitions predate the tag and are only identifiable by
/// their localized display names.
pub const DEFAULT_TOTEM_MARKERS: &[&str] = &["Totem", "图腾"];

/// Immutable upgrade-chain lookup, injected into the resolver
#[derive(Debug, Clone)]
pub struct UpgradeCatalog {
    chain: HashMap<TypeId, TypeId>,
    totem_markers: Vec<String>,
}

impl UpgradeCatalog {
    /// Build a catalog from chain links. Duplicate sources are a data
    /// error; the loader validates, so here it is a debug assertion.
    pub fn new(links: impl IntoIterator<Item = ChainLink>) -> Self {
        let mut chain = HashMap::new();
        for link in links {
            let prev = chain.insert(link.source, link.upgraded);
            debug_assert!(prev.is_none(), "duplicate chain source {}", link.source);
        }
        Self {
            chain,
            totem_markers: DEFAULT_TOTEM_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// The built-in totem chains
    pub fn default_chains() -> Self {
        Self::new(crate::data::chains::default_chain_links())
    }

    /// Replace the marker substring set
    pub fn with_markers(mut self, markers: impl IntoIterator<Item = String>) -> Self {
        self.totem_markers = markers.into_iter().collect();
        self
    }

    /// Next-tier type id for a source type, if one exists
    pub fn lookup(&self, source: TypeId) -> Option<TypeId> {
        self.chain.get(&source).copied()
    }

    /// Whether two items form a tier-combinable pair: both carry the totem
    /// tag, or both display names contain a recognized marker. Either
    /// condition suffices.
    pub fn is_upgradeable_pair(&self, a: &Item, b: &Item) -> bool {
        if a.has_tag(TOTEM_TAG) && b.has_tag(TOTEM_TAG) {
            return true;
        }
        self.name_marked(a) && self.name_marked(b)
    }

    fn name_marked(&self, item: &Item) -> bool {
        self.totem_markers.iter().any(|m| item.name.contains(m))
    }
}
