//! Inventory module - item stacks and slot containers.

mod container;
mod item;

pub use container::StorageContainer;
pub use item::Item;
