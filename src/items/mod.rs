//! Item system

pub mod container;
pub mod item;
pub mod world;

pub use container::{Container, ContainerError, ContainerId};
pub use item::{Item, ItemId, TypeId, TOTEM_TAG};
pub use world::ItemWorld;
