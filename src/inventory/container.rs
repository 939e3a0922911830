//! Fixed-capacity slot storage with stacking.

use super::item::Item;

/// Slot array; empty slots are `None`.
#[derive(Debug, Clone, Default)]
pub struct StorageContainer {
    slots: Vec<Option<Item>>,
}

impl StorageContainer {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Total units held of item `id`.
    pub fn count_of(&self, id: u32) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|item| item.id == id)
            .map(Item::count)
            .sum()
    }

    pub fn next_open_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Put `item` into `slot`, merging with a stack of the same id.
    ///
    /// Hands back whatever could not be placed.
    pub fn add_to_slot(&mut self, mut item: Item, slot: usize) -> Result<(), Item> {
        let Some(entry) = self.slots.get_mut(slot) else {
            return Err(item);
        };
        match entry {
            None => {
                *entry = Some(item);
                Ok(())
            }
            Some(existing) if existing.id == item.id => {
                let left = existing.add(item.count());
                if left == 0 {
                    Ok(())
                } else {
                    item.take(item.count() - left);
                    Err(item)
                }
            }
            Some(_) => Err(item),
        }
    }

    /// Merge `item` into existing stacks, then into the first open slot.
    ///
    /// Returns the remainder that did not fit anywhere.
    pub fn add(&mut self, mut item: Item) -> Option<Item> {
        for existing in self.slots.iter_mut().flatten() {
            if existing.id != item.id || existing.space() == 0 {
                continue;
            }
            let left = existing.add(item.count());
            item.take(item.count() - left);
            if item.is_empty() {
                return None;
            }
        }

        match self.next_open_slot() {
            Some(slot) => self.add_to_slot(item, slot).err(),
            None => Some(item),
        }
    }

    /// Take a single unit out of `slot`, clearing it once the stack runs out.
    pub fn remove(&mut self, slot: usize) -> Option<Item> {
        let entry = self.slots.get_mut(slot)?;
        let stack = entry.as_mut()?;
        let taken = stack.take(1);
        if stack.is_empty() {
            *entry = None;
        }
        taken
    }
}
