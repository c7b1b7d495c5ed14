//! World collaborator used by the rules engine.
//!
//! The engine only reads and writes tiles, spawns dropped items and cues
//! sounds; storage, lighting and networking live behind [`Level`].

use std::collections::HashMap;

pub use mc_rules_proto::types::TilePos;

use crate::item::{tile, ItemId, ItemStack};

/// Tile storage as seen by the rules engine.
pub trait Level {
    fn get_tile(&self, pos: TilePos) -> ItemId;

    /// Replace the tile at `pos`. Returns `false` if nothing changed.
    fn set_tile(&mut self, pos: TilePos, id: ItemId) -> bool;

    fn get_data(&self, pos: TilePos) -> u8;

    fn set_data(&mut self, pos: TilePos, data: u8);

    /// Drop an item entity at a tile.
    fn spawn_item(&mut self, pos: TilePos, stack: ItemStack);

    /// Cue a positional sound. Levels without audio ignore it.
    fn play_sound(&mut self, _pos: TilePos, _event: &str, _volume: f32, _pitch: f32) {}
}

/// A sound cue recorded by [`FlatLevel`].
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub pos: TilePos,
    pub event: String,
    pub volume: f32,
    pub pitch: f32,
}

/// Infinite flat world held in memory.
///
/// Layers: Y = 0 bedrock, Y = 1-2 dirt, Y = 3 grass, air above. Edits are
/// kept in a sparse map on top of the layers. Spawned items and sound cues
/// are recorded so callers can collect or inspect them.
#[derive(Debug, Default)]
pub struct FlatLevel {
    edits: HashMap<TilePos, (ItemId, u8)>,
    pub dropped: Vec<(TilePos, ItemStack)>,
    pub sounds: Vec<SoundCue>,
}

impl FlatLevel {
    pub fn new() -> Self {
        Self::default()
    }

    fn generated_tile(pos: TilePos) -> ItemId {
        match pos.y {
            0 => tile::BEDROCK,
            1 | 2 => tile::DIRT,
            3 => tile::GRASS,
            _ => tile::AIR,
        }
    }

    /// Take every dropped item spawned so far.
    pub fn take_dropped(&mut self) -> Vec<(TilePos, ItemStack)> {
        std::mem::take(&mut self.dropped)
    }
}

impl Level for FlatLevel {
    fn get_tile(&self, pos: TilePos) -> ItemId {
        match self.edits.get(&pos) {
            Some((id, _)) => *id,
            None => Self::generated_tile(pos),
        }
    }

    fn set_tile(&mut self, pos: TilePos, id: ItemId) -> bool {
        if self.get_tile(pos) == id {
            return false;
        }
        self.edits.insert(pos, (id, 0));
        true
    }

    fn get_data(&self, pos: TilePos) -> u8 {
        self.edits.get(&pos).map(|(_, data)| *data).unwrap_or(0)
    }

    fn set_data(&mut self, pos: TilePos, data: u8) {
        let id = self.get_tile(pos);
        self.edits.insert(pos, (id, data));
    }

    fn spawn_item(&mut self, pos: TilePos, stack: ItemStack) {
        self.dropped.push((pos, stack));
    }

    fn play_sound(&mut self, pos: TilePos, event: &str, volume: f32, pitch: f32) {
        self.sounds.push(SoundCue {
            pos,
            event: event.to_string(),
            volume,
            pitch,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_layers() {
        let level = FlatLevel::new();
        assert_eq!(level.get_tile(TilePos::new(5, 0, -9)), tile::BEDROCK);
        assert_eq!(level.get_tile(TilePos::new(5, 2, -9)), tile::DIRT);
        assert_eq!(level.get_tile(TilePos::new(5, 3, -9)), tile::GRASS);
        assert_eq!(level.get_tile(TilePos::new(5, 4, -9)), tile::AIR);
    }

    #[test]
    fn set_tile_reports_change() {
        let mut level = FlatLevel::new();
        let pos = TilePos::new(0, 4, 0);
        assert!(level.set_tile(pos, tile::STONE));
        assert!(!level.set_tile(pos, tile::STONE));
        assert_eq!(level.get_tile(pos), tile::STONE);
    }

    #[test]
    fn data_survives_and_resets_with_tile() {
        let mut level = FlatLevel::new();
        let pos = TilePos::new(1, 4, 1);
        level.set_tile(pos, tile::FURNACE);
        level.set_data(pos, 3);
        assert_eq!(level.get_data(pos), 3);
        level.set_tile(pos, tile::FURNACE_LIT);
        assert_eq!(level.get_data(pos), 0);
    }

    #[test]
    fn drops_are_collected() {
        let mut level = FlatLevel::new();
        level.spawn_item(TilePos::new(0, 3, 0), ItemStack::new(tile::DIRT, 1));
        assert_eq!(level.take_dropped().len(), 1);
        assert!(level.dropped.is_empty());
    }
}
