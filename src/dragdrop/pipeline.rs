//! Combination pipeline
//!
//! Turns two source totems into one upgraded totem. The asset request is
//! the single suspension point: a started task holds only a snapshot of
//! the source ids plus the target slot, and resumes inside [`tick`] when
//! its ticket completes. Between start and resume the player keeps
//! playing, so the slot contents may have changed — the task never trusts
//! live slot state, and at most one task may be in flight per slot.
//!
//! Failures never leave this module: asset failure aborts before anything
//! is destroyed, insertion failure after destruction is an accepted lossy
//! outcome (logged and surfaced as a toast).
//!
//! [`tick`]: CombinePipeline::tick

use crate::assets::{AssetPoll, AssetTicket, ItemAssets};
use crate::items::{ContainerId, Item, ItemId, ItemWorld, TypeId};
use crate::localization::{keys, Localization};
use crate::notify::UiEvents;

/// One in-flight combination, keyed by its target slot
#[derive(Debug)]
struct CombineTask {
    /// Snapshot of the slot occupant at drop time
    base: ItemId,
    /// Snapshot of the dragged item at drop time
    incoming: ItemId,
    upgraded_type: TypeId,
    target: ContainerId,
    slot: usize,
    ticket: AssetTicket,
}

/// Tracked fire-and-forget combination tasks
#[derive(Debug, Default)]
pub struct CombinePipeline {
    tasks: Vec<CombineTask>,
}

impl CombinePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a task is already in flight for a slot
    pub fn in_flight(&self, container: ContainerId, slot: usize) -> bool {
        self.tasks
            .iter()
            .any(|t| t.target == container && t.slot == slot)
    }

    /// Whether an item is already committed as a source of a pending
    /// task. Such an item must not feed a second combination: its task
    /// will destroy it on resume.
    pub fn item_in_flight(&self, id: ItemId) -> bool {
        self.tasks.iter().any(|t| t.base == id || t.incoming == id)
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Issue the asset request and enqueue the task. Nothing is destroyed
    /// here; sources stay in place until the upgraded item exists.
    pub fn start(
        &mut self,
        assets: &mut dyn ItemAssets,
        base: ItemId,
        incoming: ItemId,
        upgraded_type: TypeId,
        target: ContainerId,
        slot: usize,
    ) {
        let ticket = assets.request(upgraded_type);
        log::info!(
            "combining items {} + {} into type {} (container {}, slot {})",
            base,
            incoming,
            upgraded_type,
            target,
            slot
        );
        self.tasks.push(CombineTask {
            base,
            incoming,
            upgraded_type,
            target,
            slot,
            ticket,
        });
    }

    /// Poll every task once. Completed and failed tasks are removed; a
    /// task always runs to completion or failure, there is no cancel.
    pub fn tick(
        &mut self,
        world: &mut ItemWorld,
        assets: &mut dyn ItemAssets,
        ui: &mut dyn UiEvents,
        messages: &Localization,
    ) {
        let tasks = std::mem::take(&mut self.tasks);
        for task in tasks {
            match assets.poll(task.ticket) {
                AssetPoll::Pending => self.tasks.push(task),
                AssetPoll::Failed => {
                    // Nothing was destroyed yet; the drop simply fizzles.
                    log::error!(
                        "failed to instantiate upgraded item for type {}",
                        task.upgraded_type
                    );
                }
                AssetPoll::Ready(item) => complete(world, ui, messages, task, item),
            }
        }
    }
}

/// Resume after the suspension point: destroy the snapshot sources, then
/// insert the upgraded item. Runs without further suspension.
fn complete(
    world: &mut ItemWorld,
    ui: &mut dyn UiEvents,
    messages: &Localization,
    task: CombineTask,
    item: Item,
) {
    // Snapshot ids, not live slot state: either source may have been
    // moved or already destroyed while the request was pending.
    world.destroy_tree(task.base);
    world.destroy_tree(task.incoming);

    let id = world.adopt(item);
    let placed = world
        .add_at(task.target, task.slot, id)
        .map(|_| task.slot)
        .or_else(|_| world.add(task.target, id));

    match placed {
        Ok(index) => {
            if let Some(item) = world.item(id) {
                log::info!(
                    "upgraded to {} (type {}) at slot {}",
                    item.name,
                    item.type_id,
                    index
                );
                ui.item_placed(item);
                let name = item.name.clone();
                ui.toast(messages.format(keys::TOTEM_UPGRADED, &[&name]));
            }
        }
        Err(e) => {
            // Sources are already gone; the upgraded item is not retried
            // elsewhere. Accepted lossy outcome, but the player is told.
            log::warn!("insert of upgraded item failed: {}", e);
            ui.toast(messages.text(keys::COMBINE_ITEMS_LOST));
            world.destroy_tree(id);
        }
    }
}
