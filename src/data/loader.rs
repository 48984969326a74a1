//! RON data loader
//!
//! Loads the upgrade-chain table from an external RON file, with fallback
//! to the built-in defaults when the file is absent or malformed.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::chains::{default_chain_links, ChainLink};

/// Errors from loading external chain data
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read chain file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse chain file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("duplicate chain source type id {0}")]
    DuplicateSource(u32),
}

/// Load chain links from a RON file
pub fn load_chain_links(path: &Path) -> Result<Vec<ChainLink>, LoadError> {
    let text = fs::read_to_string(path)?;
    let links: Vec<ChainLink> = ron::from_str(&text)?;
    validate(&links)?;
    Ok(links)
}

/// Load chain links, falling back to the built-in table on any failure
pub fn chain_links_or_default(path: &Path) -> Vec<ChainLink> {
    match load_chain_links(path) {
        Ok(links) => {
            log::info!("loaded {} chain links from {}", links.len(), path.display());
            links
        }
        Err(e) => {
            log::warn!(
                "could not load chains from {}: {}. Using defaults.",
                path.display(),
                e
            );
            default_chain_links()
        }
    }
}

fn validate(links: &[ChainLink]) -> Result<(), LoadError> {
    let mut seen = std::collections::HashSet::new();
    for link in links {
        if !seen.insert(link.source) {
            return Err(LoadError::DuplicateSource(link.source));
        }
    }
    Ok(())
}
