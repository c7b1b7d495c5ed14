//! Shaped crafting recipes and the ordered recipe book.
//!
//! The book is append-only: recipes keep their registration index for
//! their whole life, and lookups scan them in that order.

use tracing::debug;

use crate::item::{item_name, items, tile, ItemId};

pub use mc_rules_proto::packets::crafting::EMPTY_CELL;

/// A shaped recipe. Cells hold an item identity or [`EMPTY_CELL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingRecipe {
    pub pattern: Vec<Vec<ItemId>>,
    pub result: ItemId,
    pub count: u16,
}

impl CraftingRecipe {
    pub fn new(pattern: Vec<Vec<ItemId>>, result: ItemId, count: u16) -> Self {
        Self {
            pattern,
            result,
            count,
        }
    }

    pub fn rows(&self) -> usize {
        self.pattern.len()
    }

    /// Width of the widest row.
    pub fn cols(&self) -> usize {
        self.pattern.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Non-empty cells in row-major order.
    pub fn ingredients(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.pattern
            .iter()
            .flatten()
            .copied()
            .filter(|&id| id != EMPTY_CELL)
    }

    /// One-line description, e.g. `4x Wood Planks`.
    pub fn describe(&self) -> String {
        format!("{}x {}", self.count, item_name(self.result))
    }
}

/// Ordered registry of crafting recipes.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<CraftingRecipe>,
}

impl RecipeBook {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recipe, returning its index.
    pub fn register(&mut self, recipe: CraftingRecipe) -> usize {
        debug!("Registered recipe #{} -> {}", self.recipes.len(), recipe.describe());
        self.recipes.push(recipe);
        self.recipes.len() - 1
    }

    pub fn recipes(&self) -> &[CraftingRecipe] {
        &self.recipes
    }

    pub fn get(&self, index: usize) -> Option<&CraftingRecipe> {
        self.recipes.get(index)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// The standard recipe set.
    pub fn standard() -> Self {
        const E: ItemId = EMPTY_CELL;
        let mut book = Self::new();

        macro_rules! shaped {
            ([$($row:expr),+ $(,)?], $result:expr, $count:expr) => {
                book.register(CraftingRecipe::new(vec![$($row.to_vec()),+], $result, $count));
            };
        }

        // ---- Basic materials ----
        shaped!([[tile::TREE_TRUNK]], tile::WOOD, 4);
        shaped!([[tile::WOOD], [tile::WOOD]], items::STICK, 4);

        // ---- Tools, one set per material ----
        let s = items::STICK;
        for (m, pickaxe, sword, shovel, axe, hoe) in [
            (
                tile::WOOD,
                items::PICKAXE_WOOD,
                items::SWORD_WOOD,
                items::SHOVEL_WOOD,
                items::HATCHET_WOOD,
                items::HOE_WOOD,
            ),
            (
                tile::STONEBRICK,
                items::PICKAXE_STONE,
                items::SWORD_STONE,
                items::SHOVEL_STONE,
                items::HATCHET_STONE,
                items::HOE_STONE,
            ),
            (
                items::INGOT_IRON,
                items::PICKAXE_IRON,
                items::SWORD_IRON,
                items::SHOVEL_IRON,
                items::HATCHET_IRON,
                items::HOE_IRON,
            ),
            (
                items::INGOT_GOLD,
                items::PICKAXE_GOLD,
                items::SWORD_GOLD,
                items::SHOVEL_GOLD,
                items::HATCHET_GOLD,
                items::HOE_GOLD,
            ),
            (
                items::EMERALD,
                items::PICKAXE_EMERALD,
                items::SWORD_EMERALD,
                items::SHOVEL_EMERALD,
                items::HATCHET_EMERALD,
                items::HOE_EMERALD,
            ),
        ] {
            shaped!([[m, m, m], [E, s, E], [E, s, E]], pickaxe, 1);
            shaped!([[m], [m], [s]], sword, 1);
            shaped!([[m], [s], [s]], shovel, 1);
            shaped!([[m, m], [m, s], [E, s]], axe, 1);
            shaped!([[m, m], [E, s], [E, s]], hoe, 1);
        }

        // ---- Building blocks ----
        shaped!([[s, E, s], [s, s, s], [s, E, s]], tile::LADDER, 3);
        shaped!([[items::COAL], [s]], tile::TORCH, 4);
        let w = tile::WOOD;
        shaped!([[w, w], [w, w]], tile::WORKBENCH, 1);
        let c = tile::STONEBRICK;
        shaped!([[c, c, c], [c, E, c], [c, c, c]], tile::FURNACE, 1);
        shaped!([[w, w, w], [w, E, w], [w, w, w]], tile::CHEST, 1);

        // ---- Utility items ----
        let st = items::STRING;
        shaped!([[E, s, st], [s, E, st], [E, s, st]], items::BOW, 1);
        shaped!([[items::FLINT], [s], [items::FEATHER]], items::ARROW, 4);
        shaped!([[w, E, w], [E, w, E]], items::BOWL, 4);
        let wh = items::WHEAT;
        shaped!([[wh, wh, wh]], items::BREAD, 1);
        let r = items::REEDS;
        shaped!([[r, r, r]], items::PAPER, 3);
        let p = items::PAPER;
        shaped!([[p], [p], [p]], items::BOOK, 1);
        shaped!([[w, w, w], [w, w, w], [E, s, E]], items::SIGN, 3);
        shaped!([[w, w], [w, w], [w, w]], items::DOOR_WOOD, 1);
        let (t, d) = (tile::TREE_TRUNK, tile::DIRT);
        shaped!([[t, d, t], [d, t, d]], items::FERTILIZER, 6);

        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_book_order() {
        let book = RecipeBook::standard();
        assert_eq!(book.len(), 2 + 25 + 5 + 9);
        assert_eq!(book.recipes()[0].result, tile::WOOD);
        assert_eq!(book.recipes()[0].count, 4);
        assert_eq!(book.recipes()[1].result, items::STICK);
        assert_eq!(book.recipes()[2].result, items::PICKAXE_WOOD);
        assert_eq!(book.recipes()[book.len() - 1].result, items::FERTILIZER);
    }

    #[test]
    fn register_appends() {
        let mut book = RecipeBook::new();
        assert!(book.is_empty());
        let idx = book.register(CraftingRecipe::new(vec![vec![tile::DIRT]], tile::GRASS, 1));
        assert_eq!(idx, 0);
        assert_eq!(book.get(0).map(|r| r.result), Some(tile::GRASS));
        assert!(book.get(1).is_none());
    }

    #[test]
    fn dimensions_and_ingredients() {
        let book = RecipeBook::standard();
        let axe = book
            .recipes()
            .iter()
            .find(|r| r.result == items::HATCHET_STONE)
            .unwrap();
        assert_eq!((axe.rows(), axe.cols()), (3, 2));
        assert_eq!(axe.ingredients().count(), 5);
        assert_eq!(axe.describe(), "1x Stone Axe");
    }

    #[test]
    fn every_recipe_is_non_empty() {
        for recipe in RecipeBook::standard().recipes() {
            assert!(recipe.ingredients().count() > 0);
            assert!(recipe.count > 0);
        }
    }
}
