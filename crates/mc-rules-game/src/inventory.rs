//! Inventory and miner collaborators.
//!
//! The rules engine never owns item storage. It talks to an [`Inventory`]
//! through four calls and to the mining player through [`Miner`].
//! [`PlayerInventory`] is the 36-slot in-memory implementation used by the
//! rules host and the tests.

use tracing::debug;

use crate::item::{max_durability, max_stack_size, ItemId, ItemStack};

/// Number of main inventory slots.
pub const INVENTORY_SLOTS: usize = 36;

/// Item storage as seen by crafting and smelting.
pub trait Inventory {
    fn num_items(&self) -> usize;

    /// Stack in slot `index`, `None` for an empty or missing slot.
    fn item(&self, index: usize) -> Option<ItemStack>;

    /// Replace slot `index`. `None` (or an empty stack) clears it.
    fn set_item(&mut self, index: usize, stack: Option<ItemStack>);

    /// Insert a whole stack. Returns `false`, leaving the inventory untouched,
    /// if it does not fit.
    fn add_item(&mut self, stack: ItemStack) -> bool;

    /// Total count of `id` across every slot.
    fn count_of(&self, id: ItemId) -> u32 {
        (0..self.num_items())
            .filter_map(|i| self.item(i))
            .filter(|s| s.id == id && !s.is_empty())
            .map(|s| s.count as u32)
            .sum()
    }
}

/// The player doing the mining.
pub trait Miner {
    /// Item in the selected slot.
    fn held_item(&self) -> Option<ItemStack>;

    /// Ability gate for destroying `tile` (adventure-style restrictions).
    fn can_destroy(&self, _tile: ItemId) -> bool {
        true
    }

    /// Add damage to the held tool, breaking it once damage exceeds its
    /// durability.
    fn hurt_held_item(&mut self, amount: u16);
}

/// Main inventory of one player.
#[derive(Debug, Clone)]
pub struct PlayerInventory {
    slots: Vec<Option<ItemStack>>,
    /// Selected slot.
    pub held_slot: usize,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInventory {
    pub fn new() -> Self {
        Self::with_slots(INVENTORY_SLOTS)
    }

    /// Inventory with a custom slot count (tests use tiny inventories to
    /// exercise the full case).
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
            held_slot: 0,
        }
    }

    /// Select the held slot. Out-of-range slots are refused.
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= self.slots.len() {
            return false;
        }
        self.held_slot = slot;
        true
    }

    /// Non-empty slots with their indices.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, ItemStack)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|s| (i, s)))
    }

    /// How many more items of `stack`'s kind fit.
    fn free_room(&self, stack: &ItemStack) -> u32 {
        let max = max_stack_size(stack.id) as u32;
        self.slots
            .iter()
            .map(|slot| match slot {
                None => max,
                Some(s) if s.stacks_with(stack) => max.saturating_sub(s.count as u32),
                Some(_) => 0,
            })
            .sum()
    }
}

impl Inventory for PlayerInventory {
    fn num_items(&self) -> usize {
        self.slots.len()
    }

    fn item(&self, index: usize) -> Option<ItemStack> {
        self.slots.get(index).copied().flatten()
    }

    fn set_item(&mut self, index: usize, stack: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = stack.filter(|s| !s.is_empty());
        }
    }

    fn add_item(&mut self, stack: ItemStack) -> bool {
        if stack.is_empty() {
            return true;
        }
        if self.free_room(&stack) < stack.count as u32 {
            debug!("Inventory full, cannot add {}x{}", stack.count, stack.id);
            return false;
        }

        let max = max_stack_size(stack.id);
        let mut remaining = stack.count;

        // Top up matching stacks first, then fill empty slots.
        for slot in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if slot.stacks_with(&stack) && slot.count < max {
                let moved = remaining.min(max - slot.count);
                slot.count += moved;
                remaining -= moved;
            }
        }
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(max);
                *slot = Some(ItemStack::with_aux(stack.id, moved, stack.aux));
                remaining -= moved;
            }
        }
        true
    }
}

impl Miner for PlayerInventory {
    fn held_item(&self) -> Option<ItemStack> {
        self.item(self.held_slot)
    }

    fn hurt_held_item(&mut self, amount: u16) {
        let slot = self.held_slot;
        let Some(mut stack) = self.item(slot) else {
            return;
        };
        let Some(durability) = max_durability(stack.id) else {
            return;
        };
        stack.aux = stack.aux.saturating_add(amount);
        if stack.aux > durability {
            debug!("Tool {} broke", stack.id);
            self.set_item(slot, None);
        } else {
            self.set_item(slot, Some(stack));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{items, tile};

    #[test]
    fn add_merges_then_fills() {
        let mut inv = PlayerInventory::new();
        assert!(inv.add_item(ItemStack::new(tile::WOOD, 60)));
        assert!(inv.add_item(ItemStack::new(tile::WOOD, 10)));
        assert_eq!(inv.item(0), Some(ItemStack::new(tile::WOOD, 64)));
        assert_eq!(inv.item(1), Some(ItemStack::new(tile::WOOD, 6)));
        assert_eq!(inv.count_of(tile::WOOD), 70);
    }

    #[test]
    fn add_is_all_or_nothing() {
        let mut inv = PlayerInventory::with_slots(1);
        inv.set_item(0, Some(ItemStack::new(tile::DIRT, 60)));
        assert!(!inv.add_item(ItemStack::new(tile::DIRT, 5)));
        assert_eq!(inv.count_of(tile::DIRT), 60);
        assert!(inv.add_item(ItemStack::new(tile::DIRT, 4)));
        assert!(!inv.add_item(ItemStack::new(tile::STONE, 1)));
    }

    #[test]
    fn tools_take_their_own_slots() {
        let mut inv = PlayerInventory::with_slots(2);
        assert!(inv.add_item(ItemStack::new(items::PICKAXE_WOOD, 1)));
        assert!(inv.add_item(ItemStack::new(items::PICKAXE_WOOD, 1)));
        assert!(!inv.add_item(ItemStack::new(items::PICKAXE_WOOD, 1)));
    }

    #[test]
    fn set_empty_stack_clears() {
        let mut inv = PlayerInventory::new();
        inv.set_item(3, Some(ItemStack::new(tile::SAND, 0)));
        assert_eq!(inv.item(3), None);
        inv.set_item(99, Some(ItemStack::new(tile::SAND, 1)));
        assert_eq!(inv.occupied().count(), 0);
    }

    #[test]
    fn tool_breaks_past_durability() {
        let mut inv = PlayerInventory::new();
        inv.set_item(0, Some(ItemStack::with_aux(items::PICKAXE_WOOD, 1, 58)));
        inv.hurt_held_item(1);
        assert_eq!(inv.held_item().map(|s| s.aux), Some(59));
        inv.hurt_held_item(1);
        assert_eq!(inv.held_item(), None);
    }

    #[test]
    fn hurting_non_tool_is_ignored() {
        let mut inv = PlayerInventory::new();
        inv.set_item(0, Some(ItemStack::new(items::STICK, 3)));
        inv.hurt_held_item(1);
        assert_eq!(inv.held_item(), Some(ItemStack::new(items::STICK, 3)));
    }

    #[test]
    fn select_bounds() {
        let mut inv = PlayerInventory::new();
        assert!(inv.select(8));
        assert!(!inv.select(INVENTORY_SLOTS));
        assert_eq!(inv.held_slot, 8);
    }
}
