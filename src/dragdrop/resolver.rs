//! Drop resolver
//!
//! Classifies one drop gesture and applies its outcome. The rules form an
//! ordered chain — first match wins, exactly one outcome per drop:
//! guards, split intent, move into empty, stack-combine, tiered upgrade,
//! swap. Everything here is synchronous; the upgrade path only starts a
//! pipeline task and returns.

use crate::assets::ItemAssets;
use crate::items::{ContainerId, ItemId, ItemWorld};
use crate::localization::{keys, Localization};
use crate::notify::UiEvents;

use super::catalog::UpgradeCatalog;
use super::context::DropContext;
use super::pipeline::CombinePipeline;

/// How a drop was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No mutation happened
    Rejected(RejectReason),
    /// Split intent on an empty slot; an external dialog takes over
    SplitRequested,
    /// Dragged item moved into an empty slot
    Moved,
    /// Stacks merged
    Combined,
    /// A combination task was spawned; the container mutates later
    UpgradeStarted,
    /// Items exchanged slots (or a loose-item swap was safely skipped)
    Swapped,
}

/// Why a drop was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    // Guard rejections: disallowed before any rule is evaluated
    EventConsumed,
    UnknownTarget,
    TargetNotEditable,
    NotPrimaryButton,
    InvalidSlot,
    MissingDragged,
    SourceNotEditable,
    StickyRefused,
    // Rule rejections: valid gesture, disallowed by domain rules
    OccupiedSplitTarget,
    SelfCombine,
    CombineInFlight,
    ChainExhausted,
    ContainerRefused,
}

impl RejectReason {
    /// Guard rejections happen before the gesture is considered at all;
    /// they are silent and leave the context unconsumed.
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            RejectReason::EventConsumed
                | RejectReason::UnknownTarget
                | RejectReason::TargetNotEditable
                | RejectReason::NotPrimaryButton
                | RejectReason::InvalidSlot
                | RejectReason::MissingDragged
                | RejectReason::SourceNotEditable
                | RejectReason::StickyRefused
        )
    }
}

/// Resolves drop gestures against an injected upgrade catalog
#[derive(Debug)]
pub struct DropResolver {
    catalog: UpgradeCatalog,
}

impl DropResolver {
    pub fn new(catalog: UpgradeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    /// Resolve one drop. First matching rule wins; all side effects go
    /// through the world, the pipeline, and the UI boundary.
    pub fn resolve(
        &self,
        world: &mut ItemWorld,
        pipeline: &mut CombinePipeline,
        assets: &mut dyn ItemAssets,
        ui: &mut dyn UiEvents,
        messages: &Localization,
        ctx: &mut DropContext,
    ) -> Outcome {
        // 1. Guards: no mutation, no notification, context stays unconsumed.
        if ctx.consumed {
            return Outcome::Rejected(RejectReason::EventConsumed);
        }
        let Some(target) = world.container(ctx.target) else {
            return Outcome::Rejected(RejectReason::UnknownTarget);
        };
        if !target.editable {
            return Outcome::Rejected(RejectReason::TargetNotEditable);
        }
        if !ctx.primary_button {
            return Outcome::Rejected(RejectReason::NotPrimaryButton);
        }
        if ctx.slot >= target.len() {
            return Outcome::Rejected(RejectReason::InvalidSlot);
        }
        let occupant_id = target.get(ctx.slot);
        let accepts_sticky = target.accepts_sticky;
        let Some(dragged) = world.item(ctx.dragged) else {
            return Outcome::Rejected(RejectReason::MissingDragged);
        };
        if !ctx.source_editable {
            return Outcome::Rejected(RejectReason::SourceNotEditable);
        }
        if dragged.sticky && !accepts_sticky {
            return Outcome::Rejected(RejectReason::StickyRefused);
        }
        let dragged_type = dragged.type_id;

        // 2. Split intent: never mutates here, the dialog is external.
        if ctx.split_modifier {
            ctx.consumed = true;
            if occupant_id.is_some() {
                ui.toast(messages.text(keys::TARGET_OCCUPIED_CANNOT_SPLIT));
                return Outcome::Rejected(RejectReason::OccupiedSplitTarget);
            }
            return Outcome::SplitRequested;
        }

        ctx.consumed = true;
        if let Some(item) = world.item(ctx.dragged) {
            ui.item_taken(item);
        }

        // 3. Move into empty slot.
        let Some(occupant_id) = occupant_id else {
            world.detach(ctx.dragged);
            return match world.add_at(ctx.target, ctx.slot, ctx.dragged) {
                Ok(()) => Outcome::Moved,
                Err(e) => {
                    log::warn!("move into empty slot failed: {}", e);
                    Outcome::Rejected(RejectReason::ContainerRefused)
                }
            };
        };
        let Some(occupant) = world.item(occupant_id) else {
            log::warn!("slot {} holds dead item id {}", ctx.slot, occupant_id);
            return Outcome::Rejected(RejectReason::ContainerRefused);
        };
        let occupant_type = occupant.type_id;
        let occupant_stackable = occupant.stackable;

        // An item dropped onto its own slot never mutates, stackable or
        // not; without this a stack would merge into itself and vanish.
        if occupant_id == ctx.dragged {
            ui.toast(messages.text(keys::SAME_TOTEM_CANNOT_COMBINE));
            return Outcome::Rejected(RejectReason::SelfCombine);
        }

        // 4. Stack-combine. A full stack keeps the remainder in place.
        if occupant_type == dragged_type && occupant_stackable {
            return match world.combine_stack(occupant_id, ctx.dragged) {
                Ok(()) => Outcome::Combined,
                Err(e) => {
                    log::warn!("stack combine failed: {}", e);
                    Outcome::Rejected(RejectReason::ContainerRefused)
                }
            };
        }

        // 5. Tiered upgrade.
        if occupant_type == dragged_type {
            let pair = match (world.item(occupant_id), world.item(ctx.dragged)) {
                (Some(a), Some(b)) => self.catalog.is_upgradeable_pair(a, b),
                _ => false,
            };
            if pair {
                if pipeline.in_flight(ctx.target, ctx.slot)
                    || pipeline.item_in_flight(occupant_id)
                    || pipeline.item_in_flight(ctx.dragged)
                {
                    ui.toast(messages.text(keys::COMBINE_IN_PROGRESS));
                    return Outcome::Rejected(RejectReason::CombineInFlight);
                }
                return match self.catalog.lookup(dragged_type) {
                    None => {
                        log::warn!("no upgrade mapping for type {}", dragged_type);
                        ui.toast(messages.text(keys::TOTEM_CANNOT_UPGRADE));
                        Outcome::Rejected(RejectReason::ChainExhausted)
                    }
                    Some(upgraded) => {
                        pipeline.start(
                            assets,
                            occupant_id,
                            ctx.dragged,
                            upgraded,
                            ctx.target,
                            ctx.slot,
                        );
                        Outcome::UpgradeStarted
                    }
                };
            }
        }

        // 6. Swap, all-or-nothing: either both items land in their new
        // slots or both are restored to their old ones. A loose dragged
        // item (no originating slot) skips safely.
        let Some((src_container, src_index)) = world.locate(ctx.dragged) else {
            return Outcome::Swapped;
        };
        if !world.can_place(src_container, occupant_id) {
            log::warn!("swap refused: occupant cannot enter source container");
            return Outcome::Rejected(RejectReason::ContainerRefused);
        }
        world.detach(ctx.dragged);
        world.detach(occupant_id);
        if let Err(e) = world.add_at(src_container, src_index, occupant_id) {
            log::warn!("swap could not move occupant, restoring slots: {}", e);
            restore_swap(
                world,
                ctx.dragged,
                src_container,
                src_index,
                occupant_id,
                ctx.target,
                ctx.slot,
            );
            return Outcome::Rejected(RejectReason::ContainerRefused);
        }
        if let Err(e) = world.add_at(ctx.target, ctx.slot, ctx.dragged) {
            log::warn!("swap could not move dragged item, restoring slots: {}", e);
            world.detach(occupant_id);
            restore_swap(
                world,
                ctx.dragged,
                src_container,
                src_index,
                occupant_id,
                ctx.target,
                ctx.slot,
            );
            return Outcome::Rejected(RejectReason::ContainerRefused);
        }
        Outcome::Swapped
    }
}

/// Put both parties of a failed swap back where they started. The slots
/// were only just vacated, so restoration cannot collide.
fn restore_swap(
    world: &mut ItemWorld,
    dragged: ItemId,
    src_container: ContainerId,
    src_index: usize,
    occupant: ItemId,
    target: ContainerId,
    slot: usize,
) {
    if let Err(e) = world.add_at(src_container, src_index, dragged) {
        log::error!("could not restore dragged item {}: {}", dragged, e);
    }
    if let Err(e) = world.add_at(target, slot, occupant) {
        log::error!("could not restore occupant {}: {}", occupant, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TemplateAssets;
    use crate::items::item::templates;
    use crate::items::{Container, ContainerId, ItemId, ItemWorld, TypeId};
    use crate::notify::NotificationLog;

    struct Fixture {
        world: ItemWorld,
        pipeline: CombinePipeline,
        assets: TemplateAssets,
        ui: NotificationLog,
        messages: Localization,
        resolver: DropResolver,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                world: ItemWorld::new(),
                pipeline: CombinePipeline::new(),
                assets: TemplateAssets::new(1),
                ui: NotificationLog::new(),
                messages: Localization::default(),
                resolver: DropResolver::new(UpgradeCatalog::default_chains()),
            }
        }

        fn container(&mut self, size: usize) -> ContainerId {
            self.world.add_container(Container::new(size))
        }

        fn totem(&mut self, c: ContainerId, slot: usize, type_id: TypeId) -> ItemId {
            let name = crate::data::totem_name(type_id).unwrap();
            let id = self.world.adopt(templates::totem(0, type_id, name));
            self.world.add_at(c, slot, id).unwrap();
            id
        }

        fn supply(&mut self, c: ContainerId, slot: usize, count: u32) -> ItemId {
            let id = self.world.adopt(templates::supply(0, 50, "Rations", count));
            self.world.add_at(c, slot, id).unwrap();
            id
        }

        fn resolve(&mut self, ctx: &mut DropContext) -> Outcome {
            self.resolver.resolve(
                &mut self.world,
                &mut self.pipeline,
                &mut self.assets,
                &mut self.ui,
                &self.messages,
                ctx,
            )
        }

        fn run_pipeline(&mut self) {
            for _ in 0..8 {
                self.pipeline.tick(
                    &mut self.world,
                    &mut self.assets,
                    &mut self.ui,
                    &self.messages,
                );
                if self.pipeline.is_idle() {
                    break;
                }
            }
        }
    }

    #[test]
    fn move_into_empty_slot_conserves_items() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let item = f.totem(c, 1, 319);

        let mut ctx = DropContext::new(item, c, 3);
        assert_eq!(f.resolve(&mut ctx), Outcome::Moved);
        assert_eq!(f.world.locate(item), Some((c, 3)));
        assert_eq!(f.world.container(c).unwrap().count(), 1);
        assert!(ctx.consumed);
        assert_eq!(f.ui.taken, vec![item]);
    }

    #[test]
    fn stack_combine_sums_and_removes_dragged() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let target = f.supply(c, 0, 3);
        let dragged = f.supply(c, 2, 4);

        let mut ctx = DropContext::new(dragged, c, 0);
        assert_eq!(f.resolve(&mut ctx), Outcome::Combined);
        assert_eq!(f.world.item(target).unwrap().stack_count, 7);
        assert!(f.world.item(dragged).is_none());
        assert_eq!(f.world.container(c).unwrap().count(), 1);
    }

    #[test]
    fn self_drop_rejects_with_single_toast() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let item = f.totem(c, 2, 319);

        let mut ctx = DropContext::new(item, c, 2);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::SelfCombine)
        );
        assert_eq!(f.world.locate(item), Some((c, 2)));
        assert_eq!(f.ui.toast_count("Cannot combine the same item"), 1);
        assert_eq!(f.ui.toasts.len(), 1);
    }

    #[test]
    fn stackable_self_drop_rejects_without_mutation() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let stack = f.supply(c, 1, 5);

        let mut ctx = DropContext::new(stack, c, 1);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::SelfCombine)
        );
        assert_eq!(f.world.item(stack).unwrap().stack_count, 5);
        assert_eq!(f.world.locate(stack), Some((c, 1)));
        assert_eq!(f.ui.toast_count("Cannot combine the same item"), 1);
    }

    #[test]
    fn upgrade_resolves_next_tier_end_to_end() {
        let mut f = Fixture::new();
        let c = f.container(6);
        let base = f.totem(c, 0, 319);
        let incoming = f.totem(c, 3, 319);

        let mut ctx = DropContext::new(incoming, c, 0);
        assert_eq!(f.resolve(&mut ctx), Outcome::UpgradeStarted);
        // The drop itself mutates nothing.
        assert_eq!(f.world.locate(base), Some((c, 0)));
        assert_eq!(f.world.locate(incoming), Some((c, 3)));

        f.run_pipeline();
        assert!(f.world.item(base).is_none());
        assert!(f.world.item(incoming).is_none());
        let container = f.world.container(c).unwrap();
        assert_eq!(container.count(), 1);
        let upgraded = container.get(0).unwrap();
        assert_eq!(f.world.item(upgraded).unwrap().type_id, 318);
        assert_eq!(f.ui.toast_count("Upgraded Totem -> Aegis Totem II"), 1);
    }

    #[test]
    fn terminal_tier_rejects_without_destruction() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let base = f.totem(c, 0, 947);
        let incoming = f.totem(c, 2, 947);

        let mut ctx = DropContext::new(incoming, c, 0);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::ChainExhausted)
        );
        assert_eq!(f.ui.toast_count("cannot be upgraded further"), 1);
        assert_eq!(f.world.locate(base), Some((c, 0)));
        assert_eq!(f.world.locate(incoming), Some((c, 2)));
        assert!(f.pipeline.is_idle());
    }

    #[test]
    fn swap_exchanges_slots_across_containers() {
        let mut f = Fixture::new();
        let a = f.container(4);
        let b = f.container(8);
        let x = f.totem(a, 2, 319);
        let y = f.totem(b, 5, 321); // different type, non-stackable

        let mut ctx = DropContext::new(x, b, 5);
        assert_eq!(f.resolve(&mut ctx), Outcome::Swapped);
        assert_eq!(f.world.locate(x), Some((b, 5)));
        assert_eq!(f.world.locate(y), Some((a, 2)));
        assert_eq!(f.world.item_count(), 2);
    }

    #[test]
    fn loose_dragged_item_skips_swap_safely() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let occupant = f.totem(c, 0, 319);
        let name = crate::data::totem_name(321).unwrap();
        let loose = f.world.adopt(templates::totem(0, 321, name));

        let mut ctx = DropContext::new(loose, c, 0);
        assert_eq!(f.resolve(&mut ctx), Outcome::Swapped);
        assert_eq!(f.world.locate(occupant), Some((c, 0)));
        assert!(f.world.locate(loose).is_none());
    }

    #[test]
    fn split_onto_occupied_slot_rejects_with_toast() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let occupant = f.supply(c, 0, 5);
        let dragged = f.supply(c, 2, 5);

        let mut ctx = DropContext::new(dragged, c, 0).with_split();
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::OccupiedSplitTarget)
        );
        assert_eq!(f.ui.toast_count("cannot split"), 1);
        assert!(f.ui.taken.is_empty());
        assert_eq!(f.world.item(occupant).unwrap().stack_count, 5);
        assert_eq!(f.world.item(dragged).unwrap().stack_count, 5);
    }

    #[test]
    fn split_onto_empty_slot_defers_to_dialog() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let dragged = f.supply(c, 2, 5);

        let mut ctx = DropContext::new(dragged, c, 0).with_split();
        assert_eq!(f.resolve(&mut ctx), Outcome::SplitRequested);
        assert!(ctx.consumed);
        // No mutation and no pickup notification on the split path.
        assert_eq!(f.world.locate(dragged), Some((c, 2)));
        assert!(f.ui.taken.is_empty());
    }

    #[test]
    fn guard_rejections_are_silent_and_unconsumed() {
        let mut f = Fixture::new();
        let c = f.container(4);
        let item = f.totem(c, 0, 319);

        let mut ctx = DropContext::new(item, c, 1);
        ctx.primary_button = false;
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::NotPrimaryButton)
        );
        assert!(!ctx.consumed);

        let mut ctx = DropContext::new(item, c, 1);
        ctx.consumed = true;
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::EventConsumed)
        );

        let mut ctx = DropContext::new(item, c, 1);
        ctx.source_editable = false;
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::SourceNotEditable)
        );

        assert!(f.ui.toasts.is_empty());
        assert!(f.ui.taken.is_empty());
        assert_eq!(f.world.locate(item), Some((c, 0)));
    }

    #[test]
    fn sticky_item_rejected_by_container_policy() {
        let mut f = Fixture::new();
        let src = f.container(2);
        let dst = f.world.add_container(Container::no_sticky(2));
        let mut item = templates::totem(0, 319, "Aegis Totem I");
        item.sticky = true;
        let id = f.world.adopt(item);
        f.world.add_at(src, 0, id).unwrap();

        let mut ctx = DropContext::new(id, dst, 0);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::StickyRefused)
        );
        assert_eq!(f.world.locate(id), Some((src, 0)));
    }

    #[test]
    fn non_editable_target_rejects() {
        let mut f = Fixture::new();
        let src = f.container(2);
        let mut locked = Container::new(2);
        locked.editable = false;
        let dst = f.world.add_container(locked);
        let item = f.totem(src, 0, 319);

        let mut ctx = DropContext::new(item, dst, 0);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::TargetNotEditable)
        );
    }

    #[test]
    fn second_upgrade_on_inflight_slot_rejects() {
        let mut f = Fixture::new();
        let c = f.container(8);
        let base = f.totem(c, 0, 319);
        let first = f.totem(c, 3, 319);
        let second = f.totem(c, 5, 319);

        let mut ctx = DropContext::new(first, c, 0);
        assert_eq!(f.resolve(&mut ctx), Outcome::UpgradeStarted);

        // The first task has not resumed yet; the slot is guarded.
        let mut ctx = DropContext::new(second, c, 0);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::CombineInFlight)
        );
        assert_eq!(f.ui.toast_count("already in progress"), 1);

        f.run_pipeline();
        // Only the first pair was consumed.
        assert!(f.world.item(base).is_none());
        assert!(f.world.item(first).is_none());
        assert_eq!(f.world.locate(second), Some((c, 5)));
        let container = f.world.container(c).unwrap();
        assert_eq!(container.count(), 2);
        assert_eq!(f.world.item(container.get(0).unwrap()).unwrap().type_id, 318);
    }

    #[test]
    fn dragged_item_cannot_feed_two_combinations() {
        let mut f = Fixture::new();
        let c = f.container(8);
        let base_a = f.totem(c, 0, 319);
        let base_b = f.totem(c, 1, 319);
        let incoming = f.totem(c, 3, 319);

        let mut ctx = DropContext::new(incoming, c, 0);
        assert_eq!(f.resolve(&mut ctx), Outcome::UpgradeStarted);

        // The same dragged totem dropped onto a second base before the
        // first task resumes: its task will destroy it, so it cannot be
        // committed again.
        let mut ctx = DropContext::new(incoming, c, 1);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::CombineInFlight)
        );
        assert_eq!(f.ui.toast_count("already in progress"), 1);

        f.run_pipeline();
        // Exactly one upgrade from the pair; the second base survives.
        let container = f.world.container(c).unwrap();
        let upgraded: Vec<_> = container
            .occupied()
            .filter(|(_, id)| f.world.item(*id).map(|i| i.type_id) == Some(318))
            .collect();
        assert_eq!(upgraded.len(), 1);
        assert!(f.world.item(base_a).is_none());
        assert!(f.world.item(incoming).is_none());
        assert_eq!(f.world.locate(base_b), Some((c, 1)));
    }

    #[test]
    fn inflight_source_cannot_become_a_combination_target() {
        let mut f = Fixture::new();
        let c = f.container(8);
        let base = f.totem(c, 0, 319);
        let incoming = f.totem(c, 3, 319);
        let other = f.totem(c, 5, 319);

        let mut ctx = DropContext::new(incoming, c, 0);
        assert_eq!(f.resolve(&mut ctx), Outcome::UpgradeStarted);

        // The pending incoming totem still sits at slot 3; dropping a
        // third totem onto it must not commit it to a second task.
        let mut ctx = DropContext::new(other, c, 3);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::CombineInFlight)
        );

        f.run_pipeline();
        assert!(f.world.item(base).is_none());
        assert!(f.world.item(incoming).is_none());
        assert_eq!(f.world.locate(other), Some((c, 5)));
    }

    #[test]
    fn refused_swap_leaves_both_items_in_place() {
        let mut f = Fixture::new();
        let src = f.world.add_container(Container::no_sticky(2));
        let dst = f.container(2);
        let dragged = f.totem(src, 0, 319);
        let mut sticky = templates::totem(0, 321, "Assault Totem I");
        sticky.sticky = true;
        let occupant = f.world.adopt(sticky);
        f.world.add_at(dst, 0, occupant).unwrap();

        // The occupant cannot enter the no-sticky source container, so
        // the swap must not move either item or leave one loose.
        let mut ctx = DropContext::new(dragged, dst, 0);
        assert_eq!(
            f.resolve(&mut ctx),
            Outcome::Rejected(RejectReason::ContainerRefused)
        );
        assert_eq!(f.world.locate(dragged), Some((src, 0)));
        assert_eq!(f.world.locate(occupant), Some((dst, 0)));
    }

    #[test]
    fn non_totem_same_type_pair_falls_through_to_swap() {
        let mut f = Fixture::new();
        let c = f.container(4);
        // Same type id, not stackable, no totem tag or marker.
        let a = f.world.adopt(crate::items::Item::new(0, 70, "Iron Key"));
        let b = f.world.adopt(crate::items::Item::new(0, 70, "Iron Key"));
        f.world.add_at(c, 0, a).unwrap();
        f.world.add_at(c, 1, b).unwrap();

        let mut ctx = DropContext::new(b, c, 0);
        assert_eq!(f.resolve(&mut ctx), Outcome::Swapped);
        assert_eq!(f.world.locate(a), Some((c, 1)));
        assert_eq!(f.world.locate(b), Some((c, 0)));
    }
}
