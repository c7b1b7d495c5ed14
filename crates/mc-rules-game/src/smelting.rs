//! Furnace smelting: ore results, fuel, and the per-session job scheduler.
//!
//! A furnace session lists every inventory slot holding a smeltable ore.
//! Starting a job on a slot burns one fuel unit up front; the job then
//! advances a fixed amount per tick and yields one refined item.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::inventory::Inventory;
use crate::item::{item_name, items, tile, ItemId, ItemStack};
use crate::level::TilePos;

/// Job length recorded on every job, in ticks.
pub const SMELT_DURATION_TICKS: u32 = 200;

/// Progress added to each active job per tick.
pub const DEFAULT_PROGRESS_PER_TICK: f32 = 0.05;

/// Refined item produced from a smeltable ore.
pub fn smelt_result(id: ItemId) -> Option<ItemId> {
    match id {
        tile::ORE_IRON => Some(items::INGOT_IRON),
        tile::ORE_GOLD => Some(items::INGOT_GOLD),
        tile::ORE_COAL => Some(items::COAL),
        tile::ORE_EMERALD => Some(items::EMERALD),
        _ => None,
    }
}

pub fn is_smeltable(id: ItemId) -> bool {
    smelt_result(id).is_some()
}

/// Coal, planks and saplings burn.
pub fn is_fuel(id: ItemId) -> bool {
    matches!(id, items::COAL | tile::WOOD | tile::SAPLING)
}

/// Fuel units held across the whole inventory.
pub fn fuel_count(inventory: &impl Inventory) -> u32 {
    (0..inventory.num_items())
        .filter_map(|i| inventory.item(i))
        .filter(|s| !s.is_empty() && is_fuel(s.id))
        .map(|s| s.count as u32)
        .sum()
}

/// Burn one fuel unit from the first slot holding any fuel.
/// Returns the burnt identity.
pub fn consume_fuel(inventory: &mut impl Inventory) -> Option<ItemId> {
    for slot in 0..inventory.num_items() {
        let Some(mut stack) = inventory.item(slot) else {
            continue;
        };
        if stack.is_empty() || !is_fuel(stack.id) {
            continue;
        }
        stack.count -= 1;
        inventory.set_item(slot, (stack.count > 0).then_some(stack));
        return Some(stack.id);
    }
    None
}

/// One row of the smeltable listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmeltableEntry {
    pub slot: usize,
    pub source: ItemId,
    pub count: u16,
}

/// What the furnace UI shows for a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Smelting,
    Ready,
    NoFuel,
}

impl EntryState {
    pub fn label(self) -> &'static str {
        match self {
            EntryState::Smelting => "Smelting...",
            EntryState::Ready => "Smelt",
            EntryState::NoFuel => "No Fuel",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmeltingJob {
    pub source: ItemId,
    pub slot: usize,
    pub progress: f32,
    pub active: bool,
    /// Stored for reporting. Pacing uses the scheduler's per-tick increment.
    pub duration: u32,
}

/// Jobs of one open furnace.
#[derive(Debug, Clone)]
pub struct SmeltingScheduler {
    furnace: TilePos,
    listing: Vec<SmeltableEntry>,
    fuel: u32,
    active: BTreeMap<usize, SmeltingJob>,
    progress_per_tick: f32,
}

impl SmeltingScheduler {
    /// Open a furnace session and build its listing from `inventory`.
    pub fn open(furnace: TilePos, inventory: &impl Inventory, progress_per_tick: f32) -> Self {
        let mut scheduler = Self {
            furnace,
            listing: Vec::new(),
            fuel: 0,
            active: BTreeMap::new(),
            progress_per_tick,
        };
        scheduler.refresh(inventory);
        scheduler
    }

    pub fn furnace(&self) -> TilePos {
        self.furnace
    }

    pub fn listing(&self) -> &[SmeltableEntry] {
        &self.listing
    }

    /// Fuel units seen at the last refresh, minus units burnt since.
    pub fn fuel(&self) -> u32 {
        self.fuel
    }

    pub fn job(&self, slot: usize) -> Option<&SmeltingJob> {
        self.active.get(&slot)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &SmeltingJob> {
        self.active.values()
    }

    /// The furnace burns while any job runs.
    pub fn is_lit(&self) -> bool {
        !self.active.is_empty()
    }

    /// Rebuild the listing and fuel count from scratch.
    pub fn refresh(&mut self, inventory: &impl Inventory) {
        self.listing = (0..inventory.num_items())
            .filter_map(|slot| inventory.item(slot).map(|s| (slot, s)))
            .filter(|(_, s)| !s.is_empty() && is_smeltable(s.id))
            .map(|(slot, s)| SmeltableEntry {
                slot,
                source: s.id,
                count: s.count,
            })
            .collect();
        self.fuel = fuel_count(inventory);
        debug!(
            "Furnace at {} lists {} smeltable slots, {} fuel",
            self.furnace,
            self.listing.len(),
            self.fuel
        );
    }

    pub fn entry_state(&self, index: usize) -> Option<EntryState> {
        let entry = self.listing.get(index)?;
        Some(if self.active.contains_key(&entry.slot) {
            EntryState::Smelting
        } else if self.fuel > 0 {
            EntryState::Ready
        } else {
            EntryState::NoFuel
        })
    }

    /// Start smelting the ore in inventory slot `slot`, burning one fuel.
    pub fn start_job(&mut self, inventory: &mut impl Inventory, slot: usize) -> bool {
        let Some(stack) = inventory.item(slot).filter(|s| !s.is_empty()) else {
            return false;
        };
        if !is_smeltable(stack.id) || self.active.contains_key(&slot) {
            return false;
        }
        let Some(burnt) = consume_fuel(inventory) else {
            debug!("No fuel to smelt slot {slot}");
            return false;
        };
        self.fuel = self.fuel.saturating_sub(1);
        debug!("Burnt {} to smelt {} in slot {slot}", item_name(burnt), item_name(stack.id));

        self.active.insert(
            slot,
            SmeltingJob {
                source: stack.id,
                slot,
                progress: 0.0,
                active: true,
                duration: SMELT_DURATION_TICKS,
            },
        );
        true
    }

    /// Advance every job. Returns the items produced this tick.
    pub fn tick(&mut self, inventory: &mut impl Inventory) -> Vec<ItemStack> {
        let mut produced = Vec::new();
        let mut rebuild = false;

        let slots: Vec<usize> = self.active.keys().copied().collect();
        for slot in slots {
            let Some(job) = self.active.get_mut(&slot) else {
                continue;
            };
            job.progress += self.progress_per_tick;
            if job.progress < 1.0 {
                continue;
            }
            let source = job.source;

            let stack = inventory.item(slot).filter(|s| s.id == source && !s.is_empty());
            let (Some(mut stack), Some(result)) = (stack, smelt_result(source)) else {
                debug!("Smelting slot {slot} no longer holds {}, job cancelled", item_name(source));
                self.active.remove(&slot);
                rebuild = true;
                continue;
            };

            let original = stack;
            stack.count -= 1;
            inventory.set_item(slot, (stack.count > 0).then_some(stack));

            let output = ItemStack::new(result, 1);
            if !inventory.add_item(output) {
                debug!("No room for {}, slot {slot} waits", item_name(result));
                inventory.set_item(slot, Some(original));
                job.progress = 1.0;
                continue;
            }
            self.active.remove(&slot);
            info!("Furnace at {} smelted {}", self.furnace, item_name(result));
            produced.push(output);

            if stack.count == 0 {
                rebuild = true;
            } else if let Some(entry) = self.listing.iter_mut().find(|e| e.slot == slot) {
                entry.count = stack.count;
            }
        }

        if rebuild {
            self.refresh(inventory);
        } else if !produced.is_empty() {
            self.fuel = fuel_count(inventory);
        }
        produced
    }

    /// Drop every job without producing anything.
    pub fn close(&mut self) {
        self.active.clear();
    }
}
