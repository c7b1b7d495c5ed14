//! Tile and item identities, item stacks and per-item properties.
//!
//! Identities use the classic pocket-edition numbering: tiles occupy
//! `1..256`, items start at 256. `0` is air.

/// Numeric identity of a tile or item.
pub type ItemId = i32;

/// Tile identities.
pub mod tile {
    use super::ItemId;

    pub const AIR: ItemId = 0;
    pub const STONE: ItemId = 1;
    pub const GRASS: ItemId = 2;
    pub const DIRT: ItemId = 3;
    pub const STONEBRICK: ItemId = 4;
    pub const WOOD: ItemId = 5;
    pub const SAPLING: ItemId = 6;
    pub const BEDROCK: ItemId = 7;
    pub const SAND: ItemId = 12;
    pub const GRAVEL: ItemId = 13;
    pub const ORE_GOLD: ItemId = 14;
    pub const ORE_IRON: ItemId = 15;
    pub const ORE_COAL: ItemId = 16;
    pub const TREE_TRUNK: ItemId = 17;
    pub const LEAVES: ItemId = 18;
    pub const SPONGE: ItemId = 19;
    pub const GLASS: ItemId = 20;
    pub const TALLGRASS: ItemId = 31;
    pub const DEAD_BUSH: ItemId = 32;
    pub const FLOWER: ItemId = 37;
    pub const ROSE: ItemId = 38;
    pub const MUSHROOM_1: ItemId = 39;
    pub const MUSHROOM_2: ItemId = 40;
    pub const BLOCK_GOLD: ItemId = 41;
    pub const BLOCK_IRON: ItemId = 42;
    pub const BRICKS: ItemId = 45;
    pub const TNT: ItemId = 46;
    pub const BOOKSHELF: ItemId = 47;
    pub const OBSIDIAN: ItemId = 49;
    pub const TORCH: ItemId = 50;
    pub const CHEST: ItemId = 54;
    /// Diamond ore (called "emerald" in the tile tables).
    pub const ORE_EMERALD: ItemId = 56;
    pub const BLOCK_EMERALD: ItemId = 57;
    pub const WORKBENCH: ItemId = 58;
    pub const WHEAT: ItemId = 59;
    pub const FARMLAND: ItemId = 60;
    pub const FURNACE: ItemId = 61;
    pub const FURNACE_LIT: ItemId = 62;
    pub const SIGN: ItemId = 63;
    pub const DOOR_WOOD: ItemId = 64;
    pub const LADDER: ItemId = 65;
    pub const CACTUS: ItemId = 81;
    pub const CLAY: ItemId = 82;
    pub const REEDS: ItemId = 83;
}

/// Item identities.
pub mod items {
    use super::ItemId;

    pub const SHOVEL_IRON: ItemId = 256;
    pub const PICKAXE_IRON: ItemId = 257;
    pub const HATCHET_IRON: ItemId = 258;
    pub const BOW: ItemId = 261;
    pub const ARROW: ItemId = 262;
    pub const COAL: ItemId = 263;
    /// Diamond (called "emerald" in the item tables).
    pub const EMERALD: ItemId = 264;
    pub const INGOT_IRON: ItemId = 265;
    pub const INGOT_GOLD: ItemId = 266;
    pub const SWORD_IRON: ItemId = 267;
    pub const SWORD_WOOD: ItemId = 268;
    pub const SHOVEL_WOOD: ItemId = 269;
    pub const PICKAXE_WOOD: ItemId = 270;
    pub const HATCHET_WOOD: ItemId = 271;
    pub const SWORD_STONE: ItemId = 272;
    pub const SHOVEL_STONE: ItemId = 273;
    pub const PICKAXE_STONE: ItemId = 274;
    pub const HATCHET_STONE: ItemId = 275;
    pub const SWORD_EMERALD: ItemId = 276;
    pub const SHOVEL_EMERALD: ItemId = 277;
    pub const PICKAXE_EMERALD: ItemId = 278;
    pub const HATCHET_EMERALD: ItemId = 279;
    pub const STICK: ItemId = 280;
    pub const BOWL: ItemId = 281;
    pub const SWORD_GOLD: ItemId = 283;
    pub const SHOVEL_GOLD: ItemId = 284;
    pub const PICKAXE_GOLD: ItemId = 285;
    pub const HATCHET_GOLD: ItemId = 286;
    pub const STRING: ItemId = 287;
    pub const FEATHER: ItemId = 288;
    pub const HOE_WOOD: ItemId = 290;
    pub const HOE_STONE: ItemId = 291;
    pub const HOE_IRON: ItemId = 292;
    pub const HOE_EMERALD: ItemId = 293;
    pub const HOE_GOLD: ItemId = 294;
    pub const WHEAT: ItemId = 296;
    pub const BREAD: ItemId = 297;
    pub const FLINT: ItemId = 318;
    pub const SIGN: ItemId = 323;
    pub const DOOR_WOOD: ItemId = 324;
    pub const REEDS: ItemId = 338;
    pub const PAPER: ItemId = 339;
    pub const BOOK: ItemId = 340;
    /// Dye powder; aux 15 is bone meal, used as fertilizer.
    pub const FERTILIZER: ItemId = 351;
}

/// A stack of identical items.
///
/// `aux` is the damage value for tools and the variant for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStack {
    pub id: ItemId,
    pub count: u16,
    pub aux: u16,
}

impl ItemStack {
    pub fn new(id: ItemId, count: u16) -> Self {
        Self { id, count, aux: 0 }
    }

    pub fn with_aux(id: ItemId, count: u16, aux: u16) -> Self {
        Self { id, count, aux }
    }

    /// Whether this stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.id <= 0 || self.count == 0
    }

    /// Whether `other` can merge into this stack.
    pub fn stacks_with(&self, other: &ItemStack) -> bool {
        self.id == other.id && self.aux == other.aux && max_stack_size(self.id) > 1
    }
}

/// Maximum number of items a single slot may hold.
pub fn max_stack_size(id: ItemId) -> u16 {
    if max_durability(id).is_some() || id == items::DOOR_WOOD {
        return 1;
    }
    64
}

/// Uses a tool survives before breaking, or `None` for non-tools.
pub fn max_durability(id: ItemId) -> Option<u16> {
    use crate::tool::{classify, MaterialTier, ToolClass};

    let kind = classify(Some(id));
    if kind.class == ToolClass::None {
        return if id == items::BOW { Some(384) } else { None };
    }
    match kind.tier {
        MaterialTier::Hand => None,
        MaterialTier::Wood => Some(59),
        MaterialTier::Stone => Some(131),
        MaterialTier::Iron => Some(250),
        MaterialTier::Gold => Some(32),
        MaterialTier::Diamond => Some(1561),
    }
}

/// Human-readable name used in logs and recipe listings.
pub fn item_name(id: ItemId) -> &'static str {
    match id {
        tile::STONE => "Stone",
        tile::GRASS => "Grass",
        tile::DIRT => "Dirt",
        tile::STONEBRICK => "Cobblestone",
        tile::WOOD => "Wood Planks",
        tile::SAPLING => "Sapling",
        tile::SAND => "Sand",
        tile::GRAVEL => "Gravel",
        tile::ORE_GOLD => "Gold Ore",
        tile::ORE_IRON => "Iron Ore",
        tile::ORE_COAL => "Coal Ore",
        tile::TREE_TRUNK => "Wood",
        tile::LEAVES => "Leaves",
        tile::GLASS => "Glass",
        tile::BLOCK_GOLD => "Gold Block",
        tile::BLOCK_IRON => "Iron Block",
        tile::BRICKS => "Bricks",
        tile::BOOKSHELF => "Bookshelf",
        tile::OBSIDIAN => "Obsidian",
        tile::TORCH => "Torch",
        tile::CHEST => "Chest",
        tile::ORE_EMERALD => "Diamond Ore",
        tile::BLOCK_EMERALD => "Diamond Block",
        tile::WORKBENCH => "Crafting Table",
        tile::FURNACE | tile::FURNACE_LIT => "Furnace",
        tile::LADDER => "Ladder",
        tile::CLAY => "Clay",
        items::SHOVEL_IRON => "Iron Shovel",
        items::PICKAXE_IRON => "Iron Pickaxe",
        items::HATCHET_IRON => "Iron Axe",
        items::BOW => "Bow",
        items::ARROW => "Arrow",
        items::COAL => "Coal",
        items::EMERALD => "Diamond",
        items::INGOT_IRON => "Iron Ingot",
        items::INGOT_GOLD => "Gold Ingot",
        items::SWORD_IRON => "Iron Sword",
        items::SWORD_WOOD => "Wooden Sword",
        items::SHOVEL_WOOD => "Wooden Shovel",
        items::PICKAXE_WOOD => "Wooden Pickaxe",
        items::HATCHET_WOOD => "Wooden Axe",
        items::SWORD_STONE => "Stone Sword",
        items::SHOVEL_STONE => "Stone Shovel",
        items::PICKAXE_STONE => "Stone Pickaxe",
        items::HATCHET_STONE => "Stone Axe",
        items::SWORD_EMERALD => "Diamond Sword",
        items::SHOVEL_EMERALD => "Diamond Shovel",
        items::PICKAXE_EMERALD => "Diamond Pickaxe",
        items::HATCHET_EMERALD => "Diamond Axe",
        items::STICK => "Stick",
        items::BOWL => "Bowl",
        items::SWORD_GOLD => "Gold Sword",
        items::SHOVEL_GOLD => "Gold Shovel",
        items::PICKAXE_GOLD => "Gold Pickaxe",
        items::HATCHET_GOLD => "Gold Axe",
        items::STRING => "String",
        items::FEATHER => "Feather",
        items::HOE_WOOD => "Wooden Hoe",
        items::HOE_STONE => "Stone Hoe",
        items::HOE_IRON => "Iron Hoe",
        items::HOE_EMERALD => "Diamond Hoe",
        items::HOE_GOLD => "Gold Hoe",
        items::WHEAT => "Wheat",
        items::BREAD => "Bread",
        items::FLINT => "Flint",
        items::SIGN => "Sign",
        items::DOOR_WOOD => "Wooden Door",
        items::REEDS => "Sugar Cane",
        items::PAPER => "Paper",
        items::BOOK => "Book",
        items::FERTILIZER => "Bone Meal",
        _ => "Unknown Item",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stacks() {
        assert!(ItemStack::new(tile::AIR, 5).is_empty());
        assert!(ItemStack::new(tile::STONE, 0).is_empty());
        assert!(ItemStack::new(-1, 1).is_empty());
        assert!(!ItemStack::new(tile::STONE, 1).is_empty());
    }

    #[test]
    fn tools_do_not_stack() {
        assert_eq!(max_stack_size(items::PICKAXE_WOOD), 1);
        assert_eq!(max_stack_size(items::BOW), 1);
        assert_eq!(max_stack_size(tile::STONEBRICK), 64);
        let a = ItemStack::new(items::PICKAXE_WOOD, 1);
        assert!(!a.stacks_with(&a));
        let b = ItemStack::new(items::STICK, 3);
        assert!(b.stacks_with(&ItemStack::new(items::STICK, 10)));
        assert!(!b.stacks_with(&ItemStack::with_aux(items::STICK, 1, 2)));
    }

    #[test]
    fn durability_by_tier() {
        assert_eq!(max_durability(items::PICKAXE_WOOD), Some(59));
        assert_eq!(max_durability(items::SHOVEL_STONE), Some(131));
        assert_eq!(max_durability(items::HATCHET_IRON), Some(250));
        assert_eq!(max_durability(items::HOE_GOLD), Some(32));
        assert_eq!(max_durability(items::SWORD_EMERALD), Some(1561));
        assert_eq!(max_durability(items::STICK), None);
        assert_eq!(max_durability(tile::STONE), None);
    }

    #[test]
    fn names() {
        assert_eq!(item_name(tile::ORE_EMERALD), "Diamond Ore");
        assert_eq!(item_name(items::EMERALD), "Diamond");
        assert_eq!(item_name(tile::FURNACE_LIT), "Furnace");
        assert_eq!(item_name(9999), "Unknown Item");
    }
}
