//! Item world
//!
//! Single owner of all items and containers. Placement lives here as a
//! registry rather than as back-pointers on items, which keeps the
//! invariant "an item occupies at most one slot" enforceable in one place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::container::{Container, ContainerError, ContainerId};
use super::item::{Item, ItemId};

/// Owns every item and container in play
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemWorld {
    items: HashMap<ItemId, Item>,
    containers: HashMap<ContainerId, Container>,
    next_item_id: ItemId,
    next_container_id: ContainerId,
}

impl ItemWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh item instance id
    pub fn alloc_id(&mut self) -> ItemId {
        self.next_item_id += 1;
        self.next_item_id
    }

    /// Take ownership of an item, re-keying it with a fresh instance id.
    /// The item starts loose (not placed in any container).
    pub fn adopt(&mut self, mut item: Item) -> ItemId {
        let id = self.alloc_id();
        item.id = id;
        self.items.insert(id, item);
        id
    }

    /// Register a container
    pub fn add_container(&mut self, container: Container) -> ContainerId {
        self.next_container_id += 1;
        let id = self.next_container_id;
        self.containers.insert(id, container);
        id
    }

    /// Item by id
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Mutable item by id
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Container by id
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id)
    }

    /// Mutable container by id
    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(&id)
    }

    /// Total number of live items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Where an item currently sits, if placed
    pub fn locate(&self, id: ItemId) -> Option<(ContainerId, usize)> {
        self.containers
            .iter()
            .find_map(|(cid, c)| c.index_of(id).map(|index| (*cid, index)))
    }

    /// Remove an item from whatever slot holds it, returning the old
    /// location. Loose items detach trivially.
    pub fn detach(&mut self, id: ItemId) -> Option<(ContainerId, usize)> {
        let (cid, index) = self.locate(id)?;
        if let Some(c) = self.containers.get_mut(&cid) {
            c.remove(id);
        }
        Some((cid, index))
    }

    /// Whether a container's policy admits an item (sticky check)
    pub fn can_place(&self, container: ContainerId, id: ItemId) -> bool {
        match (self.containers.get(&container), self.items.get(&id)) {
            (Some(c), Some(item)) => !item.sticky || c.accepts_sticky,
            _ => false,
        }
    }

    /// Place a loose item into a specific slot
    pub fn add_at(
        &mut self,
        container: ContainerId,
        index: usize,
        id: ItemId,
    ) -> Result<(), ContainerError> {
        let item = self.items.get(&id).ok_or(ContainerError::UnknownItem(id))?;
        if self.locate(id).is_some() {
            return Err(ContainerError::ItemAttached(id));
        }
        let sticky = item.sticky;
        let c = self
            .containers
            .get_mut(&container)
            .ok_or(ContainerError::UnknownContainer(container))?;
        if sticky && !c.accepts_sticky {
            return Err(ContainerError::StickyRefused);
        }
        c.place_at(id, index)
    }

    /// Place a loose item into the first free slot, returning the index
    pub fn add(&mut self, container: ContainerId, id: ItemId) -> Result<usize, ContainerError> {
        let index = self
            .containers
            .get(&container)
            .ok_or(ContainerError::UnknownContainer(container))?
            .first_free()
            .ok_or(ContainerError::Full)?;
        self.add_at(container, index, id)?;
        Ok(index)
    }

    /// Merge `source` into the `target` stack. Counts are summed up to the
    /// target's max stack; a fully absorbed source is destroyed, otherwise
    /// the remainder stays in the source stack.
    pub fn combine_stack(
        &mut self,
        target: ItemId,
        source: ItemId,
    ) -> Result<(), ContainerError> {
        if target == source {
            return Err(ContainerError::SelfStack(target));
        }
        let (space, source_count) = {
            let t = self
                .items
                .get(&target)
                .ok_or(ContainerError::UnknownItem(target))?;
            let s = self
                .items
                .get(&source)
                .ok_or(ContainerError::UnknownItem(source))?;
            (t.stack_space(), s.stack_count)
        };
        let moved = source_count.min(space);
        if let Some(t) = self.items.get_mut(&target) {
            t.stack_count += moved;
        }
        if moved >= source_count {
            self.destroy_tree(source);
        } else if let Some(s) = self.items.get_mut(&source) {
            s.stack_count -= moved;
        }
        Ok(())
    }

    /// Detach and destroy an item together with its attachment tree.
    /// Unknown ids are tolerated (the item may already be gone).
    pub fn destroy_tree(&mut self, id: ItemId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            self.detach(id);
            if let Some(item) = self.items.remove(&id) {
                log::debug!("destroyed item {} ({})", id, item.name);
                pending.extend(item.attachments);
            }
        }
    }
}
