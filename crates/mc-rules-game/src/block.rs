//! Per-tile data: block class, drops and step sounds.

use crate::item::{items, tile, ItemId, ItemStack};
use crate::tool::ToolClass;

/// Grouping of tiles by the tool that harvests them efficiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockClass {
    StoneLike,
    DirtLike,
    WoodLike,
    Other,
}

impl BlockClass {
    /// Tool class this block calls for. [`BlockClass::Other`] calls for none.
    pub fn required_tool(self) -> ToolClass {
        match self {
            BlockClass::StoneLike => ToolClass::Pickaxe,
            BlockClass::DirtLike => ToolClass::Shovel,
            BlockClass::WoodLike => ToolClass::Axe,
            BlockClass::Other => ToolClass::None,
        }
    }
}

pub fn block_class(id: ItemId) -> BlockClass {
    match id {
        tile::STONE
        | tile::STONEBRICK
        | tile::ORE_COAL
        | tile::ORE_IRON
        | tile::ORE_GOLD
        | tile::ORE_EMERALD
        | tile::BLOCK_IRON
        | tile::BLOCK_GOLD
        | tile::BLOCK_EMERALD
        | tile::OBSIDIAN
        | tile::BRICKS
        | tile::FURNACE
        | tile::FURNACE_LIT => BlockClass::StoneLike,
        tile::DIRT | tile::GRASS | tile::SAND | tile::GRAVEL | tile::CLAY => BlockClass::DirtLike,
        tile::TREE_TRUNK | tile::WOOD | tile::CHEST | tile::WORKBENCH | tile::BOOKSHELF => {
            BlockClass::WoodLike
        }
        _ => BlockClass::Other,
    }
}

/// Tiles that survival players can never break.
pub fn is_unbreakable(id: ItemId) -> bool {
    id == tile::BEDROCK
}

/// Item dropped when a tile is harvested, if any.
pub fn resource(id: ItemId) -> Option<ItemStack> {
    let drop = match id {
        tile::AIR
        | tile::LEAVES
        | tile::GLASS
        | tile::TALLGRASS
        | tile::DEAD_BUSH
        | tile::BEDROCK => return None,
        tile::STONE => tile::STONEBRICK,
        tile::GRASS | tile::FARMLAND => tile::DIRT,
        tile::ORE_COAL => items::COAL,
        tile::ORE_EMERALD => items::EMERALD,
        tile::FURNACE_LIT => tile::FURNACE,
        tile::SIGN => items::SIGN,
        tile::DOOR_WOOD => items::DOOR_WOOD,
        tile::REEDS => items::REEDS,
        other if other < 0 => return None,
        other => other,
    };
    Some(ItemStack::new(drop, 1))
}

/// Footstep/dig sound of a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundType {
    pub name: &'static str,
    pub volume: f32,
    pub pitch: f32,
}

impl SoundType {
    const fn new(name: &'static str, volume: f32, pitch: f32) -> Self {
        Self {
            name,
            volume,
            pitch,
        }
    }

    /// Event name for the dig cue, e.g. `step.stone`.
    pub fn step_event(&self) -> String {
        format!("step.{}", self.name)
    }

    /// Volume of the dig cue played while a block is being broken.
    pub fn dig_volume(&self) -> f32 {
        0.125 * (1.0 + self.volume)
    }

    /// Pitch of the dig cue played while a block is being broken.
    pub fn dig_pitch(&self) -> f32 {
        0.5 * self.pitch
    }
}

const SOUND_STONE: SoundType = SoundType::new("stone", 1.0, 1.0);
const SOUND_METAL: SoundType = SoundType::new("stone", 1.0, 1.5);
const SOUND_WOOD: SoundType = SoundType::new("wood", 1.0, 1.0);
const SOUND_GRAVEL: SoundType = SoundType::new("gravel", 1.0, 1.0);
const SOUND_GRASS: SoundType = SoundType::new("grass", 1.0, 1.0);

pub fn sound_type(id: ItemId) -> SoundType {
    match id {
        tile::BLOCK_IRON | tile::BLOCK_GOLD | tile::BLOCK_EMERALD => SOUND_METAL,
        tile::GRAVEL | tile::SAND => SOUND_GRAVEL,
        tile::GLASS => SOUND_STONE,
        _ => match block_class(id) {
            BlockClass::StoneLike => SOUND_STONE,
            BlockClass::WoodLike => SOUND_WOOD,
            BlockClass::DirtLike | BlockClass::Other => SOUND_GRASS,
        },
    }
}
