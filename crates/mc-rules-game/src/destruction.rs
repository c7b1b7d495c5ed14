//! Per-player block destruction state machine.
//!
//! Progress accumulates once per `continue_destroy` call while the player
//! keeps attacking the same tile. Switching to another tile throws all
//! progress away. A completed break is followed by a five-attempt cooldown.

use tracing::debug;

use crate::block::{is_unbreakable, resource, sound_type};
use crate::inventory::Miner;
use crate::item::{items, tile, ItemId};
use crate::level::{Level, TilePos};
use crate::tool::{can_harvest_block, efficiency, should_take_durability};

/// Attempts rejected after a completed break.
pub const DESTROY_COOLDOWN: u32 = 5;

/// Default per-tick destroy scalar for survival play.
pub const DEFAULT_DESTROY_MODIFIER: f32 = 0.05;

/// Observable phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyPhase {
    Idle,
    Destroying,
    Cooldown,
}

/// Mining progress of one player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestructionState {
    pub target: Option<TilePos>,
    pub progress: f32,
    /// Progress at the previous tick, for interpolated rendering.
    pub last_progress: f32,
    pub ticks: u32,
    pub cooldown: u32,
    active: bool,
}

impl DestructionState {
    fn retarget(&mut self, pos: TilePos) {
        self.progress = 0.0;
        self.last_progress = 0.0;
        self.ticks = 0;
        self.target = Some(pos);
        self.active = true;
    }
}

pub struct BlockDestructionController {
    state: DestructionState,
    destroy_modifier: f32,
}

impl Default for BlockDestructionController {
    fn default() -> Self {
        Self::new(DEFAULT_DESTROY_MODIFIER)
    }
}

fn holds_bow(miner: &impl Miner) -> bool {
    miner.held_item().is_some_and(|s| s.id == items::BOW)
}

fn held_id(miner: &impl Miner) -> Option<ItemId> {
    miner.held_item().filter(|s| !s.is_empty()).map(|s| s.id)
}

impl BlockDestructionController {
    pub fn new(destroy_modifier: f32) -> Self {
        Self {
            state: DestructionState::default(),
            destroy_modifier,
        }
    }

    pub fn state(&self) -> &DestructionState {
        &self.state
    }

    pub fn destroy_modifier(&self) -> f32 {
        self.destroy_modifier
    }

    pub fn phase(&self) -> DestroyPhase {
        if self.state.cooldown > 0 {
            DestroyPhase::Cooldown
        } else if self.state.active {
            DestroyPhase::Destroying
        } else {
            DestroyPhase::Idle
        }
    }

    /// Progress clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.state.progress.clamp(0.0, 1.0)
    }

    /// Progress added per attack tick against `block` with the held item.
    pub fn progress_per_tick(&self, held: Option<ItemId>, block: ItemId) -> f32 {
        efficiency(held, block) * self.destroy_modifier
    }

    /// First hit on a tile.
    ///
    /// Returns `true` if the interaction was consumed: the tile broke
    /// instantly, or a bow is held and the hit is reserved for shooting.
    /// Hits during the cooldown are rejected and leave the state alone.
    pub fn start_destroy(
        &mut self,
        level: &mut impl Level,
        miner: &mut impl Miner,
        pos: TilePos,
    ) -> bool {
        if holds_bow(&*miner) {
            return true;
        }
        if self.state.cooldown > 0 {
            debug!("Destroy at {pos} rejected, cooling down");
            return false;
        }

        let tile = level.get_tile(pos);
        if tile <= 0 || is_unbreakable(tile) {
            debug!("Rejected destroy of tile {tile} at {pos}");
            return false;
        }

        if self.state.target != Some(pos) || !self.state.active {
            self.state.retarget(pos);
        }

        if self.progress_per_tick(held_id(&*miner), tile) >= 1.0 {
            return self.destroy_block(level, miner, pos);
        }
        false
    }

    /// Keep attacking a tile. Call once per tick while the attack is held.
    ///
    /// Returns `true` when the tile broke on this call.
    pub fn continue_destroy(
        &mut self,
        level: &mut impl Level,
        miner: &mut impl Miner,
        pos: TilePos,
    ) -> bool {
        if holds_bow(&*miner) {
            return true;
        }

        if self.state.cooldown > 0 {
            self.state.cooldown -= 1;
            return false;
        }

        if self.state.target != Some(pos) || !self.state.active {
            if self.state.progress > 0.0 {
                debug!("Destroy target moved to {pos}, progress reset");
            }
            self.state.retarget(pos);
            return false;
        }

        let tile = level.get_tile(pos);
        if tile <= 0 || is_unbreakable(tile) {
            return false;
        }

        self.state.progress += self.progress_per_tick(held_id(&*miner), tile);
        self.state.ticks += 1;

        if self.state.ticks & 3 == 1 {
            let sound = sound_type(tile);
            level.play_sound(pos, &sound.step_event(), sound.dig_volume(), sound.dig_pitch());
        }

        if self.state.progress >= 1.0 {
            self.state.ticks = 0;
            self.state.cooldown = DESTROY_COOLDOWN;
            self.state.progress = 0.0;
            self.state.last_progress = 0.0;
            self.state.active = false;
            return self.destroy_block(level, miner, pos);
        }
        false
    }

    /// Player let go of the attack.
    pub fn stop_destroy(&mut self) {
        self.state.progress = 0.0;
        self.state.cooldown = 0;
        self.state.active = false;
    }

    /// Game tick: remember progress for interpolation.
    pub fn tick(&mut self) {
        self.state.last_progress = self.state.progress;
    }

    /// Progress blended between the last two ticks, `alpha` in `[0, 1]`.
    pub fn interpolated_progress(&self, alpha: f32) -> f32 {
        let cur = self.progress();
        if cur <= 0.0 {
            return 0.0;
        }
        let last = self.state.last_progress.clamp(0.0, 1.0);
        last + (cur - last) * alpha
    }

    /// Remove the tile at `pos`, dropping its resource and wearing the held
    /// tool only when the player may destroy it and can harvest it.
    pub fn destroy_block(
        &mut self,
        level: &mut impl Level,
        miner: &mut impl Miner,
        pos: TilePos,
    ) -> bool {
        let tile = level.get_tile(pos);
        if tile <= 0 {
            return false;
        }
        let held = held_id(&*miner);

        if !level.set_tile(pos, tile::AIR) {
            return false;
        }

        let can_destroy = miner.can_destroy(tile);
        let can_harvest = can_harvest_block(held, tile);

        if can_destroy && can_harvest {
            if let Some(drop) = resource(tile) {
                level.spawn_item(pos, drop);
            }
            if should_take_durability(held) {
                miner.hurt_held_item(1);
            }
            debug!("Tile {tile} harvested at {pos}");
        } else {
            debug!("Tile {tile} broken at {pos} without harvest");
        }
        true
    }
}
