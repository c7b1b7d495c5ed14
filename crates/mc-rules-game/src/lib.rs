//! Work rules: tool efficiency, block destruction, crafting and smelting.

pub mod block;
pub mod crafting;
pub mod destruction;
pub mod efficiency;
pub mod furnace;
pub mod inventory;
pub mod item;
pub mod level;
pub mod recipe;
pub mod smelting;
pub mod tool;
