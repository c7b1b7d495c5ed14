//! Furnace tile interaction and lit state.

use tracing::debug;

use crate::item::{tile, ItemId};
use crate::level::{Level, TilePos};
use crate::smelting::SmeltingScheduler;

/// What the interacting party is able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionCaps {
    /// Whether it can show interactive screens (a local player with a UI).
    pub can_open_screens: bool,
}

impl InteractionCaps {
    pub const LOCAL_PLAYER: InteractionCaps = InteractionCaps {
        can_open_screens: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Open a furnace session at this position.
    OpenFurnace(TilePos),
    /// Nothing to do; let the caller fall through to its default action.
    Pass,
}

pub fn is_furnace(id: ItemId) -> bool {
    matches!(id, tile::FURNACE | tile::FURNACE_LIT)
}

/// Use the tile at `pos`.
pub fn interact(level: &impl Level, pos: TilePos, caps: InteractionCaps) -> Interaction {
    if !is_furnace(level.get_tile(pos)) {
        return Interaction::Pass;
    }
    if !caps.can_open_screens {
        debug!("Furnace at {pos} used by a party without screens");
        return Interaction::Pass;
    }
    Interaction::OpenFurnace(pos)
}

/// Swap between the furnace and lit furnace tiles. Block data is kept.
/// Returns `false` if `pos` holds no furnace or is already in that state.
pub fn set_lit_state(level: &mut impl Level, pos: TilePos, lit: bool) -> bool {
    if !is_furnace(level.get_tile(pos)) {
        return false;
    }
    let data = level.get_data(pos);
    let id = if lit { tile::FURNACE_LIT } else { tile::FURNACE };
    if !level.set_tile(pos, id) {
        return false;
    }
    level.set_data(pos, data);
    true
}

/// Light or douse the session's furnace to match its running jobs.
pub fn sync_lit_state(level: &mut impl Level, session: &SmeltingScheduler) -> bool {
    set_lit_state(level, session.furnace(), session.is_lit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::FlatLevel;

    #[test]
    fn only_screen_capable_parties_open() {
        let mut level = FlatLevel::new();
        let pos = TilePos::new(2, 4, 2);
        level.set_tile(pos, tile::FURNACE);

        assert_eq!(
            interact(&level, pos, InteractionCaps::LOCAL_PLAYER),
            Interaction::OpenFurnace(pos)
        );
        assert_eq!(
            interact(&level, pos, InteractionCaps::default()),
            Interaction::Pass
        );
        assert_eq!(
            interact(&level, TilePos::new(0, 3, 0), InteractionCaps::LOCAL_PLAYER),
            Interaction::Pass
        );
    }

    #[test]
    fn lit_state_swaps_tiles() {
        let mut level = FlatLevel::new();
        let pos = TilePos::new(2, 4, 2);
        level.set_tile(pos, tile::FURNACE);
        level.set_data(pos, 3);

        assert!(set_lit_state(&mut level, pos, true));
        assert_eq!(level.get_tile(pos), tile::FURNACE_LIT);
        assert_eq!(level.get_data(pos), 3);
        assert!(!set_lit_state(&mut level, pos, true));
        assert!(set_lit_state(&mut level, pos, false));
        assert_eq!(level.get_tile(pos), tile::FURNACE);

        assert!(!set_lit_state(&mut level, TilePos::new(0, 3, 0), true));
        assert_eq!(level.get_tile(TilePos::new(0, 3, 0)), tile::GRASS);
    }
}
