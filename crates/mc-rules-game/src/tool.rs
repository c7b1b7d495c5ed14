//! Tool classification and the rules that depend on it.
//!
//! Every held-item identity is mapped to a [`ToolKind`] in exactly one place
//! ([`classify`]); the rest of the crate reasons about classes and tiers.
//! `None` as the held item means bare hands.

use crate::block::{block_class, BlockClass};
use crate::efficiency::{self, AXE_EFFICIENCY, PICKAXE_EFFICIENCY, WRONG_TOOL_EFFICIENCY};
use crate::item::{items, tile, ItemId};

/// Category of tool, deciding which blocks it is correct for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolClass {
    None,
    Pickaxe,
    Shovel,
    Axe,
    Sword,
    Hoe,
}

/// Material grade of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialTier {
    Hand,
    Wood,
    Stone,
    Iron,
    Gold,
    Diamond,
}

impl MaterialTier {
    /// Mining level used for tier-gated harvesting. Gold is as weak as wood.
    pub fn harvest_level(self) -> u8 {
        match self {
            MaterialTier::Hand | MaterialTier::Wood | MaterialTier::Gold => 0,
            MaterialTier::Stone => 1,
            MaterialTier::Iron => 2,
            MaterialTier::Diamond => 3,
        }
    }
}

/// Class and tier of whatever the player is holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolKind {
    pub class: ToolClass,
    pub tier: MaterialTier,
}

impl ToolKind {
    pub const HAND: ToolKind = ToolKind {
        class: ToolClass::None,
        tier: MaterialTier::Hand,
    };

    const fn new(class: ToolClass, tier: MaterialTier) -> Self {
        Self { class, tier }
    }

    pub fn is_hand(&self) -> bool {
        self.class == ToolClass::None
    }
}

/// Classify a held item. Anything that is not one of the 25 tools counts
/// as bare hands.
pub fn classify(held: Option<ItemId>) -> ToolKind {
    use MaterialTier::*;
    use ToolClass::*;

    let Some(id) = held else {
        return ToolKind::HAND;
    };
    match id {
        items::PICKAXE_WOOD => ToolKind::new(Pickaxe, Wood),
        items::PICKAXE_STONE => ToolKind::new(Pickaxe, Stone),
        items::PICKAXE_IRON => ToolKind::new(Pickaxe, Iron),
        items::PICKAXE_GOLD => ToolKind::new(Pickaxe, Gold),
        items::PICKAXE_EMERALD => ToolKind::new(Pickaxe, Diamond),
        items::SHOVEL_WOOD => ToolKind::new(Shovel, Wood),
        items::SHOVEL_STONE => ToolKind::new(Shovel, Stone),
        items::SHOVEL_IRON => ToolKind::new(Shovel, Iron),
        items::SHOVEL_GOLD => ToolKind::new(Shovel, Gold),
        items::SHOVEL_EMERALD => ToolKind::new(Shovel, Diamond),
        items::HATCHET_WOOD => ToolKind::new(Axe, Wood),
        items::HATCHET_STONE => ToolKind::new(Axe, Stone),
        items::HATCHET_IRON => ToolKind::new(Axe, Iron),
        items::HATCHET_GOLD => ToolKind::new(Axe, Gold),
        items::HATCHET_EMERALD => ToolKind::new(Axe, Diamond),
        items::SWORD_WOOD => ToolKind::new(Sword, Wood),
        items::SWORD_STONE => ToolKind::new(Sword, Stone),
        items::SWORD_IRON => ToolKind::new(Sword, Iron),
        items::SWORD_GOLD => ToolKind::new(Sword, Gold),
        items::SWORD_EMERALD => ToolKind::new(Sword, Diamond),
        items::HOE_WOOD => ToolKind::new(Hoe, Wood),
        items::HOE_STONE => ToolKind::new(Hoe, Stone),
        items::HOE_IRON => ToolKind::new(Hoe, Iron),
        items::HOE_GOLD => ToolKind::new(Hoe, Gold),
        items::HOE_EMERALD => ToolKind::new(Hoe, Diamond),
        _ => ToolKind::HAND,
    }
}

pub fn tool_class(held: Option<ItemId>) -> ToolClass {
    classify(held).class
}

pub fn tier(held: Option<ItemId>) -> MaterialTier {
    classify(held).tier
}

/// Whether the held item is the tool a block calls for. Blocks of class
/// [`BlockClass::Other`] call for no tool, so only bare hands are correct.
pub fn is_correct_tool(held: Option<ItemId>, block: ItemId) -> bool {
    block_class(block).required_tool() == tool_class(held)
}

/// Breaking-speed multiplier for the held item against a block.
pub fn efficiency(held: Option<ItemId>, block: ItemId) -> f32 {
    let kind = classify(held);
    let class = block_class(block);

    if kind.is_hand() {
        return match class {
            BlockClass::StoneLike => PICKAXE_EFFICIENCY.hand,
            BlockClass::WoodLike => AXE_EFFICIENCY.hand,
            BlockClass::DirtLike | BlockClass::Other => 1.0,
        };
    }

    if is_correct_tool(held, block) {
        if let Some(row) = efficiency::row_for(class.required_tool()) {
            return row.get(kind.tier);
        }
    }
    WRONG_TOOL_EFFICIENCY.get(kind.tier)
}

/// Whether finishing a block with the held item costs durability. Every
/// real tool pays one point per break, correct for the block or not.
pub fn should_take_durability(held: Option<ItemId>) -> bool {
    !classify(held).is_hand()
}

/// Whether breaking `block` with the held item yields its drop.
///
/// Stone-like blocks need a pickaxe; diamond ore and diamond blocks
/// additionally need iron tier or better. Everything else can be
/// harvested by hand.
pub fn can_harvest_block(held: Option<ItemId>, block: ItemId) -> bool {
    let kind = classify(held);
    match block_class(block) {
        BlockClass::StoneLike => {
            if kind.class != ToolClass::Pickaxe {
                return false;
            }
            match block {
                tile::ORE_EMERALD | tile::BLOCK_EMERALD => {
                    kind.tier.harvest_level() >= MaterialTier::Iron.harvest_level()
                }
                _ => true,
            }
        }
        BlockClass::WoodLike | BlockClass::DirtLike | BlockClass::Other => true,
    }
}
