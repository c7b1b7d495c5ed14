//! Crafting grid matching, recipe-list crafting and per-player sessions.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use mc_rules_proto::packets::crafting::CraftingPacket;

use crate::inventory::Inventory;
use crate::item::{ItemId, ItemStack};
use crate::recipe::{CraftingRecipe, RecipeBook, EMPTY_CELL};

/// Side length of a crafting table grid.
pub const TABLE_GRID_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// CraftingGrid
// ---------------------------------------------------------------------------

/// A `rows` x `cols` grid of optional stacks, addressed by `(x, y)` =
/// `(column, row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<ItemStack>>,
}

impl CraftingGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a grid from rows of identities. Cells `<= 0` stay empty.
    ///
    /// Ragged input is padded to the widest row.
    pub fn from_ids(ids: &[Vec<ItemId>]) -> Self {
        let cols = ids.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(ids.len(), cols);
        for (y, row) in ids.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                if id > 0 {
                    grid.set(x, y, Some(ItemStack::new(id, 1)));
                }
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, stack: Option<ItemStack>) {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x] = stack.filter(|s| !s.is_empty());
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<ItemStack> {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x]
        } else {
            None
        }
    }

    /// Identity at a cell, [`EMPTY_CELL`] when nothing is there.
    pub fn cell_id(&self, x: usize, y: usize) -> ItemId {
        self.get(x, y).map(|s| s.id).unwrap_or(EMPTY_CELL)
    }

    /// Row-major identities.
    pub fn ids(&self) -> Vec<ItemId> {
        (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| (x, y)))
            .map(|(x, y)| self.cell_id(x, y))
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

// ---------------------------------------------------------------------------
// CraftingMatcher
// ---------------------------------------------------------------------------

/// Resolves grids against a recipe book. Matching is positional and exact;
/// the first recipe in registration order wins.
#[derive(Debug, Clone, Copy)]
pub struct CraftingMatcher<'a> {
    book: &'a RecipeBook,
}

impl<'a> CraftingMatcher<'a> {
    pub fn new(book: &'a RecipeBook) -> Self {
        Self { book }
    }

    /// Index and recipe of the first match.
    pub fn find(&self, grid: &CraftingGrid) -> Option<(usize, &'a CraftingRecipe)> {
        self.book
            .recipes()
            .iter()
            .enumerate()
            .find(|(_, recipe)| Self::pattern_matches(recipe, grid))
    }

    pub fn matches(&self, grid: &CraftingGrid) -> Option<&'a CraftingRecipe> {
        self.find(grid).map(|(_, recipe)| recipe)
    }

    fn pattern_matches(recipe: &CraftingRecipe, grid: &CraftingGrid) -> bool {
        if recipe.pattern.len() != grid.rows() {
            return false;
        }
        recipe.pattern.iter().enumerate().all(|(y, row)| {
            row.len() == grid.cols()
                && row
                    .iter()
                    .enumerate()
                    .all(|(x, &want)| grid.cell_id(x, y) == want)
        })
    }
}

// ---------------------------------------------------------------------------
// Recipe-list crafting
// ---------------------------------------------------------------------------

/// Ingredient identity -> count needed for one craft.
pub fn requirements(recipe: &CraftingRecipe) -> BTreeMap<ItemId, u32> {
    let mut needed = BTreeMap::new();
    for id in recipe.ingredients().filter(|&id| id > 0) {
        *needed.entry(id).or_insert(0) += 1;
    }
    needed
}

/// Whether the whole inventory holds every ingredient of `recipe`.
pub fn can_craft(recipe: &CraftingRecipe, inventory: &impl Inventory) -> bool {
    requirements(recipe)
        .into_iter()
        .all(|(id, count)| inventory.count_of(id) >= count)
}

/// Indices of every recipe in `book` the inventory can afford.
pub fn craftable_recipes(book: &RecipeBook, inventory: &impl Inventory) -> Vec<usize> {
    book.recipes()
        .iter()
        .enumerate()
        .filter(|(_, recipe)| can_craft(recipe, inventory))
        .map(|(i, _)| i)
        .collect()
}

/// Take `count` of `id` from the inventory in slot order, recording each
/// touched slot's previous contents in `undo`.
fn remove_items(
    inventory: &mut impl Inventory,
    id: ItemId,
    mut count: u32,
    undo: &mut Vec<(usize, Option<ItemStack>)>,
) {
    for slot in 0..inventory.num_items() {
        if count == 0 {
            break;
        }
        let Some(mut stack) = inventory.item(slot) else {
            continue;
        };
        if stack.id != id || stack.is_empty() {
            continue;
        }
        undo.push((slot, Some(stack)));
        let taken = count.min(stack.count as u32);
        stack.count -= taken as u16;
        count -= taken;
        inventory.set_item(slot, (stack.count > 0).then_some(stack));
    }
}

/// Craft `recipe` from ingredients anywhere in the inventory.
///
/// With `atomic` set, ingredients are put back if the result does not fit
/// and the call fails. Without it the ingredients are spent regardless.
pub fn craft_recipe(recipe: &CraftingRecipe, inventory: &mut impl Inventory, atomic: bool) -> bool {
    if !can_craft(recipe, &*inventory) {
        debug!("Not enough ingredients for {}", recipe.describe());
        return false;
    }

    let mut undo = Vec::new();
    for (id, count) in requirements(recipe) {
        remove_items(inventory, id, count, &mut undo);
    }

    let result = ItemStack::new(recipe.result, recipe.count);
    if inventory.add_item(result) {
        debug!("Crafted {}", recipe.describe());
        return true;
    }

    if atomic {
        // Restore in reverse so a slot touched twice ends at its oldest state.
        for (slot, stack) in undo.into_iter().rev() {
            inventory.set_item(slot, stack);
        }
        warn!("No room for {}, craft rolled back", recipe.describe());
    } else {
        warn!("No room for {}, ingredients lost", recipe.describe());
    }
    false
}

// ---------------------------------------------------------------------------
// CraftingSession
// ---------------------------------------------------------------------------

/// One player's crafting table.
#[derive(Debug, Clone)]
pub struct CraftingSession {
    player_id: i32,
    book: Arc<RecipeBook>,
    grid: CraftingGrid,
    open: bool,
    atomic: bool,
}

impl CraftingSession {
    pub fn new(player_id: i32, book: Arc<RecipeBook>) -> Self {
        Self::with_size(player_id, book, TABLE_GRID_SIZE, TABLE_GRID_SIZE)
    }

    pub fn with_size(player_id: i32, book: Arc<RecipeBook>, rows: usize, cols: usize) -> Self {
        Self {
            player_id,
            book,
            grid: CraftingGrid::new(rows, cols),
            open: false,
            atomic: true,
        }
    }

    /// Choose between transactional and lossy crafting.
    pub fn set_atomic(&mut self, atomic: bool) {
        self.atomic = atomic;
    }

    pub fn player_id(&self) -> i32 {
        self.player_id
    }

    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the table. The grid is always cleared.
    pub fn close(&mut self) {
        self.open = false;
        self.clear_grid();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn grid(&self) -> &CraftingGrid {
        &self.grid
    }

    pub fn set_grid_item(&mut self, x: usize, y: usize, stack: Option<ItemStack>) {
        self.grid.set(x, y, stack);
    }

    pub fn grid_item(&self, x: usize, y: usize) -> Option<ItemStack> {
        self.grid.get(x, y)
    }

    pub fn clear_grid(&mut self) {
        self.grid.clear();
    }

    /// Recipe the current grid resolves to.
    pub fn current_recipe(&self) -> Option<&CraftingRecipe> {
        CraftingMatcher::new(&self.book).matches(&self.grid)
    }

    /// Craft whatever the grid resolves to, paying from the inventory.
    pub fn attempt_craft(&self, inventory: &mut impl Inventory) -> bool {
        if !self.open {
            return false;
        }
        let Some(recipe) = CraftingMatcher::new(&self.book).matches(&self.grid) else {
            debug!("Player {} grid matches no recipe", self.player_id);
            return false;
        };
        let crafted = craft_recipe(recipe, inventory, self.atomic);
        if crafted {
            info!("Player {} crafted {}", self.player_id, recipe.describe());
        }
        crafted
    }

    /// Snapshot the grid and `recipe` as a network message.
    pub fn to_packet(&self, recipe: &CraftingRecipe) -> CraftingPacket {
        CraftingPacket::new(
            self.player_id,
            self.grid.rows(),
            self.grid.cols(),
            self.grid.ids(),
            recipe.result,
            recipe.count as i32,
        )
    }
}

// ---------------------------------------------------------------------------
// Packet validation
// ---------------------------------------------------------------------------

/// Why a received crafting packet was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CraftRejection {
    #[error("packet from player {got}, session belongs to {expected}")]
    WrongPlayer { expected: i32, got: i32 },

    #[error("grid matches no recipe")]
    NoMatch,

    #[error("claimed {claimed_count}x{claimed_id}, recipe gives {expected_count}x{expected_id}")]
    ResultMismatch {
        claimed_id: ItemId,
        claimed_count: i32,
        expected_id: ItemId,
        expected_count: i32,
    },
}

/// Re-resolve a client's crafting claim against `book`.
pub fn verify_crafting_packet<'a>(
    book: &'a RecipeBook,
    packet: &CraftingPacket,
    expected_player: i32,
) -> Result<&'a CraftingRecipe, CraftRejection> {
    if packet.player_id != expected_player {
        return Err(CraftRejection::WrongPlayer {
            expected: expected_player,
            got: packet.player_id,
        });
    }

    let grid = CraftingGrid::from_ids(&packet.grid());
    let recipe = CraftingMatcher::new(book)
        .matches(&grid)
        .ok_or(CraftRejection::NoMatch)?;

    if recipe.result != packet.result_id || recipe.count as i32 != packet.result_count {
        return Err(CraftRejection::ResultMismatch {
            claimed_id: packet.result_id,
            claimed_count: packet.result_count,
            expected_id: recipe.result,
            expected_count: recipe.count as i32,
        });
    }
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::PlayerInventory;
    use crate::item::{items, tile};

    const E: ItemId = EMPTY_CELL;

    fn pickaxe_grid() -> CraftingGrid {
        let (w, s) = (tile::WOOD, items::STICK);
        CraftingGrid::from_ids(&[vec![w, w, w], vec![E, s, E], vec![E, s, E]])
    }

    #[test]
    fn log_makes_planks() {
        let book = RecipeBook::standard();
        let grid = CraftingGrid::from_ids(&[vec![tile::TREE_TRUNK]]);
        let recipe = CraftingMatcher::new(&book).matches(&grid).unwrap();
        assert_eq!(recipe.result, tile::WOOD);
        assert_eq!(recipe.count, 4);
    }

    #[test]
    fn pickaxe_pattern() {
        let book = RecipeBook::standard();
        let recipe = CraftingMatcher::new(&book).matches(&pickaxe_grid()).unwrap();
        assert_eq!(recipe.result, items::PICKAXE_WOOD);
        assert_eq!(recipe.count, 1);
    }

    #[test]
    fn wrong_dimensions_never_match() {
        let book = RecipeBook::standard();
        let matcher = CraftingMatcher::new(&book);

        // Log in the corner of a 3x3 grid: no offset matching.
        let mut grid = CraftingGrid::new(3, 3);
        grid.set(0, 0, Some(ItemStack::new(tile::TREE_TRUNK, 1)));
        assert!(matcher.matches(&grid).is_none());

        // Pickaxe top row in a 2x3 grid.
        let (w, s) = (tile::WOOD, items::STICK);
        let grid = CraftingGrid::from_ids(&[vec![w, w, w], vec![E, s, E]]);
        assert!(matcher.matches(&grid).is_none());
    }

    #[test]
    fn first_registered_wins() {
        let mut book = RecipeBook::new();
        book.register(CraftingRecipe::new(vec![vec![tile::DIRT]], tile::GRASS, 1));
        book.register(CraftingRecipe::new(vec![vec![tile::DIRT]], tile::SAND, 2));
        let grid = CraftingGrid::from_ids(&[vec![tile::DIRT]]);
        let (idx, recipe) = CraftingMatcher::new(&book).find(&grid).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(recipe.result, tile::GRASS);
    }

    #[test]
    fn requirements_count_cells() {
        let book = RecipeBook::standard();
        let recipe = CraftingMatcher::new(&book).matches(&pickaxe_grid()).unwrap();
        let needed = requirements(recipe);
        assert_eq!(needed.get(&tile::WOOD), Some(&3));
        assert_eq!(needed.get(&items::STICK), Some(&2));
        assert_eq!(needed.len(), 2);
    }

    #[test]
    fn craft_pulls_from_whole_inventory() {
        let book = RecipeBook::standard();
        let recipe = CraftingMatcher::new(&book).matches(&pickaxe_grid()).unwrap();
        let mut inv = PlayerInventory::new();
        inv.set_item(0, Some(ItemStack::new(tile::WOOD, 2)));
        inv.set_item(20, Some(ItemStack::new(tile::WOOD, 2)));
        inv.set_item(35, Some(ItemStack::new(items::STICK, 2)));

        assert!(can_craft(recipe, &inv));
        assert!(craft_recipe(recipe, &mut inv, true));
        assert_eq!(inv.count_of(tile::WOOD), 1);
        assert_eq!(inv.count_of(items::STICK), 0);
        assert_eq!(inv.count_of(items::PICKAXE_WOOD), 1);
        assert!(!can_craft(recipe, &inv));
        assert!(!craft_recipe(recipe, &mut inv, true));
    }

    #[test]
    fn full_inventory_rolls_back() {
        let recipe = CraftingRecipe::new(vec![vec![tile::DIRT]], items::PICKAXE_WOOD, 1);
        let mut inv = PlayerInventory::with_slots(2);
        inv.set_item(0, Some(ItemStack::new(tile::DIRT, 3)));
        inv.set_item(1, Some(ItemStack::new(tile::STONE, 64)));

        assert!(!craft_recipe(&recipe, &mut inv, true));
        assert_eq!(inv.item(0), Some(ItemStack::new(tile::DIRT, 3)));
        assert_eq!(inv.count_of(items::PICKAXE_WOOD), 0);
    }

    #[test]
    fn lossy_mode_spends_ingredients() {
        let recipe = CraftingRecipe::new(vec![vec![tile::DIRT]], items::PICKAXE_WOOD, 1);
        let mut inv = PlayerInventory::with_slots(2);
        inv.set_item(0, Some(ItemStack::new(tile::DIRT, 3)));
        inv.set_item(1, Some(ItemStack::new(tile::STONE, 64)));

        assert!(!craft_recipe(&recipe, &mut inv, false));
        assert_eq!(inv.count_of(tile::DIRT), 2);
    }

    #[test]
    fn emptied_slot_makes_room() {
        let recipe = CraftingRecipe::new(vec![vec![tile::DIRT]], items::PICKAXE_WOOD, 1);
        let mut inv = PlayerInventory::with_slots(1);
        inv.set_item(0, Some(ItemStack::new(tile::DIRT, 1)));
        assert!(craft_recipe(&recipe, &mut inv, true));
        assert_eq!(inv.item(0), Some(ItemStack::new(items::PICKAXE_WOOD, 1)));
    }

    #[test]
    fn craftable_listing() {
        let book = RecipeBook::standard();
        let mut inv = PlayerInventory::new();
        assert!(craftable_recipes(&book, &inv).is_empty());
        inv.add_item(ItemStack::new(tile::TREE_TRUNK, 1));
        assert_eq!(craftable_recipes(&book, &inv), vec![0]);
    }

    #[test]
    fn session_lifecycle() {
        let book = Arc::new(RecipeBook::standard());
        let mut session = CraftingSession::new(7, book);
        let mut inv = PlayerInventory::new();
        inv.add_item(ItemStack::new(tile::WOOD, 3));
        inv.add_item(ItemStack::new(items::STICK, 2));

        for (x, y, id) in [
            (0, 0, tile::WOOD),
            (1, 0, tile::WOOD),
            (2, 0, tile::WOOD),
            (1, 1, items::STICK),
            (1, 2, items::STICK),
        ] {
            session.set_grid_item(x, y, Some(ItemStack::new(id, 1)));
        }
        assert!(!session.attempt_craft(&mut inv), "closed session crafts nothing");

        session.open();
        assert!(session.is_open());
        assert_eq!(session.current_recipe().map(|r| r.result), Some(items::PICKAXE_WOOD));
        assert!(session.attempt_craft(&mut inv));
        assert_eq!(inv.count_of(items::PICKAXE_WOOD), 1);

        session.close();
        assert!(!session.is_open());
        assert!(session.grid().is_empty());
        assert_eq!(session.grid_item(1, 1), None);
    }

    #[test]
    fn packet_roundtrip_through_verification() {
        let book = Arc::new(RecipeBook::standard());
        let mut session = CraftingSession::new(3, Arc::clone(&book));
        session.set_grid_item(0, 0, Some(ItemStack::new(tile::WOOD, 1)));
        let mut grid_book = RecipeBook::new();
        grid_book.register(CraftingRecipe::new(
            vec![vec![tile::WOOD, E, E], vec![E, E, E], vec![E, E, E]],
            tile::SAPLING,
            2,
        ));
        let recipe = CraftingMatcher::new(&grid_book).matches(session.grid()).unwrap();
        let packet = session.to_packet(recipe);
        assert_eq!(packet.rows(), 3);
        assert_eq!(packet.cell(0, 0), Some(tile::WOOD));
        assert_eq!(packet.cell(2, 2), Some(E));

        assert!(verify_crafting_packet(&grid_book, &packet, 3).is_ok());
        assert_eq!(
            verify_crafting_packet(&grid_book, &packet, 4),
            Err(CraftRejection::WrongPlayer {
                expected: 4,
                got: 3
            })
        );
        assert_eq!(
            verify_crafting_packet(&book, &packet, 3),
            Err(CraftRejection::NoMatch)
        );
    }

    #[test]
    fn session_packet_survives_the_wire() {
        use bytes::BytesMut;
        use mc_rules_proto::codec::{ProtoDecode, ProtoEncode};

        let mut book = RecipeBook::new();
        book.register(CraftingRecipe::new(
            vec![vec![E, tile::SAND, E], vec![E, E, E], vec![E, E, E]],
            tile::GLASS,
            1,
        ));
        let book = Arc::new(book);
        let mut session = CraftingSession::new(5, Arc::clone(&book));
        session.set_grid_item(1, 0, Some(ItemStack::new(tile::SAND, 1)));
        let recipe = session.current_recipe().unwrap().clone();

        let mut buf = BytesMut::new();
        session.to_packet(&recipe).proto_encode(&mut buf);
        let decoded = CraftingPacket::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(verify_crafting_packet(&book, &decoded, 5), Ok(&recipe));
    }

    #[test]
    fn inflated_result_is_rejected() {
        let book = RecipeBook::standard();
        let packet = CraftingPacket::new(1, 1, 1, vec![tile::TREE_TRUNK], tile::WOOD, 64);
        assert!(matches!(
            verify_crafting_packet(&book, &packet, 1),
            Err(CraftRejection::ResultMismatch { claimed_count: 64, expected_count: 4, .. })
        ));
    }
}
