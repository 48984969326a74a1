//! Item definitions
//!
//! Core item type and identifiers. An item knows what kind of thing it is
//! (its type id), how it displays, and how it may be handled (stackable,
//! sticky), but not where it lives — placement is owned by [`ItemWorld`].
//!
//! [`ItemWorld`]: super::world::ItemWorld

use serde::{Deserialize, Serialize};

/// Unique item instance ID for tracking
pub type ItemId = u64;

/// Item type identifier (identifies kind and tier)
pub type TypeId = u32;

/// Tag carried by items eligible for tiered combination
pub const TOTEM_TAG: &str = "Totem";

/// The main Item struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique instance ID
    pub id: ItemId,
    /// Type identifier (kind/tier)
    pub type_id: TypeId,
    /// Display name
    pub name: String,
    /// Whether this item stacks with others of the same type
    pub stackable: bool,
    /// Current stack count
    pub stack_count: u32,
    /// Max stack size
    pub max_stack: u32,
    /// Sticky items cannot enter containers that refuse them
    pub sticky: bool,
    /// Category tags (may include the totem tag)
    pub tags: Vec<String>,
    /// Attached sub-items, torn down recursively with their parent
    #[serde(default)]
    pub attachments: Vec<ItemId>,
}

impl Item {
    /// Create a new item with a unique ID
    pub fn new(id: ItemId, type_id: TypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            type_id,
            name: name.into(),
            stackable: false,
            stack_count: 1,
            max_stack: 1,
            sticky: false,
            tags: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Check if item carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check if item can stack
    pub fn is_stackable(&self) -> bool {
        self.stackable && self.max_stack > 1
    }

    /// Remaining capacity in this stack
    pub fn stack_space(&self) -> u32 {
        self.max_stack.saturating_sub(self.stack_count)
    }
}

/// Item templates for common items
pub mod templates {
    use super::*;

    /// A totem: tagged, unstackable, one per slot
    pub fn totem(id: ItemId, type_id: TypeId, name: impl Into<String>) -> Item {
        let mut item = Item::new(id, type_id, name);
        item.tags = vec![TOTEM_TAG.to_string()];
        item
    }

    /// A stackable supply item (ammo, rations)
    pub fn supply(id: ItemId, type_id: TypeId, name: impl Into<String>, count: u32) -> Item {
        let mut item = Item::new(id, type_id, name);
        item.stackable = true;
        item.stack_count = count;
        item.max_stack = 99;
        item
    }
}
