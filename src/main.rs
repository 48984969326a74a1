//! Totemforge - Demo entry point
//!
//! Builds a small stash, performs a few drops, and ticks the combination
//! pipeline until it settles, printing the notification log at the end.

use anyhow::Result;

use totemforge::assets::TemplateAssets;
use totemforge::data::totem_name;
use totemforge::items::item::templates;
use totemforge::items::{Container, ContainerId, ItemId, ItemWorld, TypeId};
use totemforge::notify::NotificationLog;
use totemforge::{
    CombinePipeline, DropContext, DropResolver, Language, Localization, Outcome, UpgradeCatalog,
};

fn spawn_totem(
    world: &mut ItemWorld,
    c: ContainerId,
    slot: usize,
    type_id: TypeId,
) -> Result<ItemId> {
    let name = totem_name(type_id).unwrap_or_else(|| format!("Unknown Totem {}", type_id));
    let id = world.adopt(templates::totem(0, type_id, name));
    world.add_at(c, slot, id)?;
    Ok(id)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Totemforge demo v{}", env!("CARGO_PKG_VERSION"));

    let mut world = ItemWorld::new();
    let stash = world.add_container(Container::new(8));

    // Two Aegis I totems and a pair of terminal-tier totems.
    spawn_totem(&mut world, stash, 0, 319)?;
    let incoming = spawn_totem(&mut world, stash, 3, 319)?;
    spawn_totem(&mut world, stash, 1, 947)?;
    let terminal = spawn_totem(&mut world, stash, 4, 947)?;

    let resolver = DropResolver::new(UpgradeCatalog::default_chains());
    let mut pipeline = CombinePipeline::new();
    let mut assets = TemplateAssets::new(2);
    let mut ui = NotificationLog::new();
    let messages = Localization::new(Language::English);

    // Drop an Aegis I onto its twin: starts a combination.
    let mut ctx = DropContext::new(incoming, stash, 0);
    let outcome = resolver.resolve(&mut world, &mut pipeline, &mut assets, &mut ui, &messages, &mut ctx);
    log::info!("drop of Aegis I onto Aegis I resolved to {:?}", outcome);
    anyhow::ensure!(outcome == Outcome::UpgradeStarted, "expected an upgrade, got {:?}", outcome);

    // Drop a terminal-tier totem onto its twin: rejected, chain exhausted.
    let mut ctx = DropContext::new(terminal, stash, 1);
    let outcome = resolver.resolve(&mut world, &mut pipeline, &mut assets, &mut ui, &messages, &mut ctx);
    log::info!("drop of Aegis III onto Aegis III resolved to {:?}", outcome);

    // Let the pending combination resume.
    while !pipeline.is_idle() {
        pipeline.tick(&mut world, &mut assets, &mut ui, &messages);
    }

    println!("Stash contents:");
    if let Some(stash) = world.container(stash) {
        for (slot, id) in stash.occupied() {
            if let Some(item) = world.item(id) {
                println!("  slot {}: {} (type {})", slot, item.name, item.type_id);
            }
        }
    }
    println!("Notifications:");
    for toast in &ui.toasts {
        println!("  {}", toast);
    }

    log::info!("Totemforge demo finished");
    Ok(())
}
