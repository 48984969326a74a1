//! Asset instantiation boundary
//!
//! Manufacturing an item from a type id is asynchronous: callers receive a
//! ticket and poll it. This is the one suspension point of the combination
//! pipeline, so the interface is deliberately small — request, then poll
//! until the ticket leaves `Pending`.

use std::collections::HashMap;

use crate::data::chains::totem_name;
use crate::items::item::templates;
use crate::items::{Item, ItemId, TypeId};

/// Handle for one pending instantiation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetTicket(u64);

/// State of a polled ticket
#[derive(Debug)]
pub enum AssetPoll {
    /// Still being produced; poll again next tick
    Pending,
    /// Done; the item is handed over exactly once
    Ready(Item),
    /// The request failed or produced nothing
    Failed,
}

/// Asset-instantiation service
pub trait ItemAssets {
    /// Begin manufacturing an item of the given type
    fn request(&mut self, type_id: TypeId) -> AssetTicket;

    /// Poll a ticket. Once a ticket has reported `Ready` or `Failed` it is
    /// spent; polling it again reports `Failed`.
    fn poll(&mut self, ticket: AssetTicket) -> AssetPoll;
}

/// Template-backed asset service. Knows how to build every totem in the
/// default chain table and completes each request after a fixed number of
/// polls, which stands in for real asset streaming latency.
#[derive(Debug)]
pub struct TemplateAssets {
    delay_polls: u32,
    next_ticket: u64,
    next_item_id: ItemId,
    pending: HashMap<AssetTicket, PendingRequest>,
}

#[derive(Debug)]
struct PendingRequest {
    type_id: TypeId,
    remaining: u32,
}

impl TemplateAssets {
    /// `delay_polls` of zero completes requests on the first poll
    pub fn new(delay_polls: u32) -> Self {
        Self {
            delay_polls,
            next_ticket: 0,
            next_item_id: 0,
            pending: HashMap::new(),
        }
    }

    fn build(&mut self, type_id: TypeId) -> Option<Item> {
        let name = totem_name(type_id)?;
        self.next_item_id += 1;
        Some(templates::totem(self.next_item_id, type_id, name))
    }
}

impl ItemAssets for TemplateAssets {
    fn request(&mut self, type_id: TypeId) -> AssetTicket {
        self.next_ticket += 1;
        let ticket = AssetTicket(self.next_ticket);
        self.pending.insert(
            ticket,
            PendingRequest {
                type_id,
                remaining: self.delay_polls,
            },
        );
        log::debug!("asset request {:?} for type {}", ticket, type_id);
        ticket
    }

    fn poll(&mut self, ticket: AssetTicket) -> AssetPoll {
        let Some(request) = self.pending.get_mut(&ticket) else {
            return AssetPoll::Failed;
        };
        if request.remaining > 0 {
            request.remaining -= 1;
            return AssetPoll::Pending;
        }
        let type_id = request.type_id;
        self.pending.remove(&ticket);
        match self.build(type_id) {
            Some(item) => AssetPoll::Ready(item),
            None => {
                log::warn!("no template for type {}", type_id);
                AssetPoll::Failed
            }
        }
    }
}
