//! Drop resolution and tiered combination

pub mod catalog;
pub mod context;
pub mod pipeline;
pub mod resolver;

pub use catalog::{UpgradeCatalog, DEFAULT_TOTEM_MARKERS};
pub use context::DropContext;
pub use pipeline::CombinePipeline;
pub use resolver::{DropResolver, Outcome, RejectReason};
