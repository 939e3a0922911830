//! Stackable items.

use crate::world::ItemDefinition;

/// A stack of one kind of item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u32,
    pub name: String,
    /// Largest stack this item forms; `None` stacks without limit.
    pub max_stack: Option<u32>,
    pub equip_slot: u32,
    count: u32,
}

impl Item {
    pub fn new(id: u32, def: &ItemDefinition, count: u32) -> Self {
        Self {
            id,
            name: def.name.clone(),
            max_stack: def.max_stack,
            equip_slot: def.equip_slot,
            count,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Room left in this stack.
    pub fn space(&self) -> u32 {
        match self.max_stack {
            Some(max) => max.saturating_sub(self.count),
            None => u32::MAX - self.count,
        }
    }

    /// Add up to `amount` to the stack. Returns what did not fit.
    pub fn add(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.space());
        self.count += accepted;
        amount - accepted
    }

    /// Split up to `amount` off into a new stack.
    pub fn take(&mut self, amount: u32) -> Option<Item> {
        let taken = amount.min(self.count);
        if taken == 0 {
            return None;
        }
        self.count -= taken;
        Some(Item {
            count: taken,
            ..self.clone()
        })
    }
}
