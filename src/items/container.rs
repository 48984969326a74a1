//! Slot containers
//!
//! An ordered collection of item slots indexed by position. Containers
//! store item ids only; the items themselves live in the [`ItemWorld`].
//! Every mutating operation signals failure explicitly — there are no
//! silent no-ops.
//!
//! [`ItemWorld`]: super::world::ItemWorld

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::ItemId;

/// Unique container ID
pub type ContainerId = u32;

/// Errors from container and placement operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("slot {0} is already occupied")]
    SlotOccupied(usize),
    #[error("slot {0} is out of bounds")]
    OutOfBounds(usize),
    #[error("container does not accept sticky items")]
    StickyRefused,
    #[error("container has no free slot")]
    Full,
    #[error("unknown container {0}")]
    UnknownContainer(ContainerId),
    #[error("unknown item {0}")]
    UnknownItem(ItemId),
    #[error("slot {0} is empty")]
    EmptySlot(usize),
    #[error("cannot combine item {0} with itself")]
    SelfStack(ItemId),
    #[error("item {0} is still placed in a container")]
    ItemAttached(ItemId),
}

/// An ordered slot container (inventory, stash, equipment rack)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    /// At most one item id per slot
    slots: Vec<Option<ItemId>>,
    /// Policy: whether sticky items may be placed here
    pub accepts_sticky: bool,
    /// Policy: whether drops may modify this container
    pub editable: bool,
}

impl Container {
    /// Create a container with `size` empty slots
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            accepts_sticky: true,
            editable: true,
        }
    }

    /// Create a container that refuses sticky items
    pub fn no_sticky(size: usize) -> Self {
        let mut c = Self::new(size);
        c.accepts_sticky = false;
        c
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Item occupying a slot, if any
    pub fn get(&self, index: usize) -> Option<ItemId> {
        self.slots.get(index).copied().flatten()
    }

    /// Slot index holding an item
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(id))
    }

    /// First unoccupied slot index
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    /// Iterate over occupied slots as (index, item id)
    pub fn occupied(&self) -> impl Iterator<Item = (usize, ItemId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|id| (i, id)))
    }

    /// Place an item id into a specific slot
    pub fn place_at(&mut self, id: ItemId, index: usize) -> Result<(), ContainerError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ContainerError::OutOfBounds(index))?;
        if slot.is_some() {
            return Err(ContainerError::SlotOccupied(index));
        }
        *slot = Some(id);
        Ok(())
    }

    /// Remove and return the item id in a slot
    pub fn take_at(&mut self, index: usize) -> Result<ItemId, ContainerError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ContainerError::OutOfBounds(index))?;
        slot.take().ok_or(ContainerError::EmptySlot(index))
    }

    /// Remove an item id wherever it sits, returning its old index
    pub fn remove(&mut self, id: ItemId) -> Option<usize> {
        let index = self.index_of(id)?;
        self.slots[index] = None;
        Some(index)
    }
}
