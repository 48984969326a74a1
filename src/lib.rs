//! Totemforge - inventory drop resolution and tiered totem combination
//!
//! Resolves what happens when one inventory item is dropped onto another
//! slot (move, stack, split, swap, upgrade) and runs the asynchronous
//! pipeline that combines two matching totems into the next tier.

pub mod assets;
pub mod data;
pub mod dragdrop;
pub mod items;
pub mod localization;
pub mod notify;

// Re-export commonly used types
pub use dragdrop::{CombinePipeline, DropContext, DropResolver, Outcome, RejectReason, UpgradeCatalog};
pub use items::{Container, ContainerError, ContainerId, Item, ItemId, ItemWorld, TypeId};
pub use localization::{Language, Localization};
