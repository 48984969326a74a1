//! Drop context
//!
//! Ephemeral description of one completed drag-and-drop gesture. The
//! resolver marks the context consumed itself rather than mutating a
//! shared event object.

use crate::items::{ContainerId, ItemId};

/// One user drop gesture
#[derive(Debug, Clone)]
pub struct DropContext {
    /// The dragged item
    pub dragged: ItemId,
    /// Target container
    pub target: ContainerId,
    /// Target slot index within the container
    pub slot: usize,
    /// Whether the gesture used the primary input button
    pub primary_button: bool,
    /// Split intent (modifier key held)
    pub split_modifier: bool,
    /// Whether the drag source allows the item to be taken
    pub source_editable: bool,
    /// Set once the resolver has acted on the gesture
    pub consumed: bool,
}

impl DropContext {
    /// A plain primary-button drop with no modifier
    pub fn new(dragged: ItemId, target: ContainerId, slot: usize) -> Self {
        Self {
            dragged,
            target,
            slot,
            primary_button: true,
            split_modifier: false,
            source_editable: true,
            consumed: false,
        }
    }

    /// Same gesture with the split modifier held
    pub fn with_split(mut self) -> Self {
        self.split_modifier = true;
        self
    }
}
