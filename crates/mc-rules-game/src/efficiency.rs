//! Tool efficiency table.
//!
//! One row of breaking-speed multipliers per tool class, indexed by the
//! tool's material tier, plus a wrong-tool penalty row. Higher values break
//! faster. All values are non-negative and fixed at compile time.

use crate::tool::{MaterialTier, ToolClass};

/// Breaking-speed multipliers for one tool class, one per material tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyRow {
    pub hand: f32,
    pub wood: f32,
    pub stone: f32,
    pub iron: f32,
    pub gold: f32,
    pub diamond: f32,
}

impl EfficiencyRow {
    /// Multiplier for a material tier.
    pub fn get(&self, tier: MaterialTier) -> f32 {
        match tier {
            MaterialTier::Hand => self.hand,
            MaterialTier::Wood => self.wood,
            MaterialTier::Stone => self.stone,
            MaterialTier::Iron => self.iron,
            MaterialTier::Gold => self.gold,
            MaterialTier::Diamond => self.diamond,
        }
    }
}

/// Stone, ores, cobblestone and other stone-like blocks.
pub const PICKAXE_EFFICIENCY: EfficiencyRow = EfficiencyRow {
    hand: 0.3,
    wood: 2.0,
    stone: 4.0,
    iron: 6.0,
    gold: 12.0,
    diamond: 8.0,
};

/// Dirt, sand, gravel and other dirt-like blocks.
pub const SHOVEL_EFFICIENCY: EfficiencyRow = EfficiencyRow {
    hand: 1.0,
    wood: 2.0,
    stone: 4.0,
    iron: 6.0,
    gold: 12.0,
    diamond: 8.0,
};

/// Logs, planks and other wood-like blocks.
pub const AXE_EFFICIENCY: EfficiencyRow = EfficiencyRow {
    hand: 0.8,
    wood: 2.0,
    stone: 4.0,
    iron: 6.0,
    gold: 12.0,
    diamond: 8.0,
};

pub const SWORD_EFFICIENCY: EfficiencyRow = EfficiencyRow {
    hand: 1.0,
    wood: 1.5,
    stone: 1.5,
    iron: 1.5,
    gold: 1.5,
    diamond: 1.5,
};

pub const HOE_EFFICIENCY: EfficiencyRow = EfficiencyRow {
    hand: 1.0,
    wood: 2.0,
    stone: 4.0,
    iron: 6.0,
    gold: 12.0,
    diamond: 8.0,
};

/// Applied when a real tool is used on a block it is not meant for.
pub const WRONG_TOOL_EFFICIENCY: EfficiencyRow = EfficiencyRow {
    hand: 1.0,
    wood: 0.5,
    stone: 0.5,
    iron: 0.5,
    gold: 0.5,
    diamond: 0.5,
};

/// Row used when `class` is the correct tool for a block, or `None` for
/// bare hands, which have no row of their own.
pub fn row_for(class: ToolClass) -> Option<&'static EfficiencyRow> {
    match class {
        ToolClass::None => None,
        ToolClass::Pickaxe => Some(&PICKAXE_EFFICIENCY),
        ToolClass::Shovel => Some(&SHOVEL_EFFICIENCY),
        ToolClass::Axe => Some(&AXE_EFFICIENCY),
        ToolClass::Sword => Some(&SWORD_EFFICIENCY),
        ToolClass::Hoe => Some(&HOE_EFFICIENCY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROWS: [&EfficiencyRow; 6] = [
        &PICKAXE_EFFICIENCY,
        &SHOVEL_EFFICIENCY,
        &AXE_EFFICIENCY,
        &SWORD_EFFICIENCY,
        &HOE_EFFICIENCY,
        &WRONG_TOOL_EFFICIENCY,
    ];

    #[test]
    fn all_values_non_negative() {
        for row in ALL_ROWS {
            let values = [row.hand, row.wood, row.stone, row.iron, row.gold, row.diamond];
            assert!(values.iter().all(|v| *v >= 0.0), "{row:?}");
        }
    }

    #[test]
    fn tier_lookup() {
        assert_eq!(PICKAXE_EFFICIENCY.get(MaterialTier::Stone), 4.0);
        assert_eq!(PICKAXE_EFFICIENCY.get(MaterialTier::Gold), 12.0);
        assert_eq!(AXE_EFFICIENCY.get(MaterialTier::Hand), 0.8);
        assert_eq!(WRONG_TOOL_EFFICIENCY.get(MaterialTier::Hand), 1.0);
        assert_eq!(WRONG_TOOL_EFFICIENCY.get(MaterialTier::Diamond), 0.5);
    }

    #[test]
    fn rows_by_class() {
        assert!(row_for(ToolClass::None).is_none());
        assert_eq!(row_for(ToolClass::Shovel), Some(&SHOVEL_EFFICIENCY));
        assert_eq!(row_for(ToolClass::Sword).map(|r| r.iron), Some(1.5));
    }
}
