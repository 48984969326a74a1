//! External game data

pub mod chains;
pub mod loader;

pub use chains::{default_chain_links, totem_name, ChainLink, FAMILIES};
pub use loader::{chain_links_or_default, load_chain_links, LoadError};
