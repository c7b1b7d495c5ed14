//! Headless rules host: one local player in a flat world, driven by console
//! commands and a fixed-rate tick.

use std::fmt::Write as _;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use tracing::{debug, info, warn};

use mc_rules_game::block::is_unbreakable;
use mc_rules_game::crafting::{
    craft_recipe, craftable_recipes, verify_crafting_packet, CraftingSession,
};
use mc_rules_game::destruction::BlockDestructionController;
use mc_rules_game::furnace::{interact, sync_lit_state, Interaction, InteractionCaps};
use mc_rules_game::inventory::{Inventory, PlayerInventory};
use mc_rules_game::item::{item_name, ItemStack};
use mc_rules_game::level::{FlatLevel, Level, TilePos};
use mc_rules_game::recipe::RecipeBook;
use mc_rules_game::smelting::SmeltingScheduler;
use mc_rules_proto::codec::write_packet;
use mc_rules_proto::packets::{self, GamePacket, RemoveBlock};

use crate::config::RulesConfig;

const HELP: &str = "commands: mine x y z | stop | setblock x y z id | hold slot | give id count | \
inv | grid x y id count | craft | recipes | craftlist n | open x y z | smelt slot | close | \
packet hex | quit";

pub struct RulesHost {
    player_id: i32,
    level: FlatLevel,
    inventory: PlayerInventory,
    destruction: BlockDestructionController,
    mining: Option<TilePos>,
    book: Arc<RecipeBook>,
    crafting: CraftingSession,
    furnace: Option<SmeltingScheduler>,
    caps: InteractionCaps,
    atomic_crafting: bool,
    progress_per_tick: f32,
    outbox: Vec<Bytes>,
    tick: u64,
}

fn parse_args<T: std::str::FromStr>(args: &[&str], n: usize) -> Option<Vec<T>> {
    if args.len() != n {
        return None;
    }
    args.iter().map(|a| a.parse().ok()).collect()
}

fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks(2)
        .map(|pair| {
            let s: String = pair.iter().collect();
            u8::from_str_radix(&s, 16).ok()
        })
        .collect()
}

impl RulesHost {
    pub fn new(config: &RulesConfig) -> Self {
        let book = Arc::new(config.recipe_book());
        let player_id = config.server.player_id;
        let mut crafting = CraftingSession::new(player_id, Arc::clone(&book));
        crafting.set_atomic(config.gameplay.atomic_crafting);
        if !config.gameplay.atomic_crafting {
            warn!("Atomic crafting disabled: ingredients are lost when the result does not fit");
        }
        info!("Loaded {} recipes", book.len());

        Self {
            player_id,
            level: FlatLevel::new(),
            inventory: PlayerInventory::new(),
            destruction: BlockDestructionController::new(config.gameplay.destroy_modifier),
            mining: None,
            book,
            crafting,
            furnace: None,
            caps: InteractionCaps {
                can_open_screens: config.gameplay.can_open_screens,
            },
            atomic_crafting: config.gameplay.atomic_crafting,
            progress_per_tick: config.smelting.progress_per_tick,
            outbox: Vec::new(),
            tick: 0,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Encoded packets produced since the last call.
    pub fn take_outbox(&mut self) -> Vec<Bytes> {
        std::mem::take(&mut self.outbox)
    }

    fn send(&mut self, id: u8, packet: &impl mc_rules_proto::codec::ProtoEncode) {
        let mut buf = BytesMut::new();
        write_packet(&mut buf, id, packet);
        self.outbox.push(buf.freeze());
    }

    /// Advance one game tick.
    pub fn game_tick(&mut self) {
        self.tick += 1;

        if let Some(pos) = self.mining {
            let broke =
                self.destruction
                    .continue_destroy(&mut self.level, &mut self.inventory, pos);
            if broke {
                self.on_block_broken(pos);
            }
        }
        self.destruction.tick();

        if let Some(furnace) = self.furnace.as_mut() {
            for stack in furnace.tick(&mut self.inventory) {
                debug!("Smelted {} x{}", item_name(stack.id), stack.count);
            }
            sync_lit_state(&mut self.level, furnace);
        }
    }

    fn on_block_broken(&mut self, pos: TilePos) {
        self.mining = None;
        self.send(
            packets::id::REMOVE_BLOCK,
            &RemoveBlock {
                entity_id: self.player_id,
                position: pos,
            },
        );
        for (_, stack) in self.level.take_dropped() {
            if !self.inventory.add_item(stack) {
                warn!("Inventory full, {} lost", item_name(stack.id));
            }
        }
        info!("Block at {pos} broken");
    }

    /// Handle one console line and return the reply.
    pub fn handle_console_command(&mut self, line: &str) -> String {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match cmd {
            "mine" => self.cmd_mine(&args),
            "stop" => {
                self.destruction.stop_destroy();
                self.mining = None;
                "Stopped mining".into()
            }
            "setblock" => self.cmd_setblock(&args),
            "hold" => self.cmd_hold(&args),
            "give" => self.cmd_give(&args),
            "inv" => self.cmd_inv(),
            "grid" => self.cmd_grid(&args),
            "craft" => self.cmd_craft(),
            "recipes" => self.cmd_recipes(),
            "craftlist" => self.cmd_craftlist(&args),
            "open" => self.cmd_open(&args),
            "smelt" => self.cmd_smelt(&args),
            "close" => {
                self.crafting.close();
                if let Some(mut furnace) = self.furnace.take() {
                    furnace.close();
                    sync_lit_state(&mut self.level, &furnace);
                }
                "Closed".into()
            }
            "packet" => match parse_hex(&args.concat()) {
                Some(data) => self.handle_packet(&data),
                None => "Usage: packet <hex bytes>".into(),
            },
            "help" => HELP.into(),
            "" => String::new(),
            other => format!("Unknown command: {other}. {HELP}"),
        }
    }

    fn cmd_mine(&mut self, args: &[&str]) -> String {
        let Some(v) = parse_args::<i32>(args, 3) else {
            return "Usage: mine <x> <y> <z>".into();
        };
        let pos = TilePos::new(v[0], v[1], v[2]);
        let tile = self.level.get_tile(pos);
        if tile <= 0 || is_unbreakable(tile) {
            return format!("Cannot mine {} at {pos}", item_name(tile));
        }
        if self
            .destruction
            .start_destroy(&mut self.level, &mut self.inventory, pos)
        {
            if self.level.get_tile(pos) != tile {
                self.on_block_broken(pos);
                return format!("Broke {} at {pos} instantly", item_name(tile));
            }
            return "Held item reserves this action".into();
        }
        self.mining = Some(pos);
        let held = self
            .inventory
            .item(self.inventory.held_slot)
            .map(|s| s.id);
        format!(
            "Mining {} at {pos} ({:.3} per tick)",
            item_name(tile),
            self.destruction.progress_per_tick(held, tile)
        )
    }

    fn cmd_setblock(&mut self, args: &[&str]) -> String {
        let Some(v) = parse_args::<i32>(args, 4) else {
            return "Usage: setblock <x> <y> <z> <id>".into();
        };
        let pos = TilePos::new(v[0], v[1], v[2]);
        self.level.set_tile(pos, v[3]);
        format!("Set {pos} to {}", item_name(v[3]))
    }

    fn cmd_hold(&mut self, args: &[&str]) -> String {
        match parse_args::<usize>(args, 1) {
            Some(v) if self.inventory.select(v[0]) => format!("Holding slot {}", v[0]),
            _ => "Usage: hold <slot 0-35>".into(),
        }
    }

    fn cmd_give(&mut self, args: &[&str]) -> String {
        let Some(v) = parse_args::<i32>(args, 2) else {
            return "Usage: give <id> <count>".into();
        };
        let Ok(count) = u16::try_from(v[1]) else {
            return "Count out of range".into();
        };
        if self.inventory.add_item(ItemStack::new(v[0], count)) {
            format!("Gave {count}x {}", item_name(v[0]))
        } else {
            "Inventory full".into()
        }
    }

    fn cmd_inv(&self) -> String {
        let mut out = String::new();
        for (slot, stack) in self.inventory.occupied() {
            let marker = if slot == self.inventory.held_slot { "*" } else { " " };
            let _ = writeln!(
                out,
                "{marker}{slot:>2}: {}x {} (id {}, aux {})",
                stack.count,
                item_name(stack.id),
                stack.id,
                stack.aux
            );
        }
        if out.is_empty() {
            out.push_str("Inventory empty");
        }
        out
    }

    fn cmd_grid(&mut self, args: &[&str]) -> String {
        let Some(v) = parse_args::<i32>(args, 4) else {
            return "Usage: grid <x> <y> <id> <count>".into();
        };
        let (Ok(x), Ok(y)) = (usize::try_from(v[0]), usize::try_from(v[1])) else {
            return "Grid position out of range".into();
        };
        if !self.crafting.is_open() {
            self.crafting.open();
        }
        let stack = u16::try_from(v[3]).ok().map(|c| ItemStack::new(v[2], c));
        self.crafting.set_grid_item(x, y, stack);
        match self.crafting.current_recipe() {
            Some(recipe) => format!("Grid matches {}", recipe.describe()),
            None => "Grid matches nothing".into(),
        }
    }

    fn cmd_craft(&mut self) -> String {
        let Some(recipe) = self.crafting.current_recipe().cloned() else {
            return "Grid matches nothing".into();
        };
        if !self.crafting.attempt_craft(&mut self.inventory) {
            return format!("Cannot craft {}", recipe.describe());
        }
        let packet = self.crafting.to_packet(&recipe);
        self.send(packets::id::CRAFTING, &packet);
        format!("Crafted {}", recipe.describe())
    }

    fn cmd_recipes(&self) -> String {
        let craftable = craftable_recipes(&self.book, &self.inventory);
        if craftable.is_empty() {
            return "Nothing craftable".into();
        }
        let mut out = String::new();
        for idx in craftable {
            if let Some(recipe) = self.book.get(idx) {
                let _ = writeln!(out, "{idx:>3}: {}", recipe.describe());
            }
        }
        out
    }

    fn cmd_craftlist(&mut self, args: &[&str]) -> String {
        let Some(recipe) = parse_args::<usize>(args, 1).and_then(|v| self.book.get(v[0]).cloned())
        else {
            return "Usage: craftlist <recipe index>".into();
        };
        if craft_recipe(&recipe, &mut self.inventory, self.atomic_crafting) {
            format!("Crafted {}", recipe.describe())
        } else {
            format!("Cannot craft {}", recipe.describe())
        }
    }

    fn cmd_open(&mut self, args: &[&str]) -> String {
        let Some(v) = parse_args::<i32>(args, 3) else {
            return "Usage: open <x> <y> <z>".into();
        };
        let pos = TilePos::new(v[0], v[1], v[2]);
        match interact(&self.level, pos, self.caps) {
            Interaction::OpenFurnace(pos) => {
                let furnace = SmeltingScheduler::open(pos, &self.inventory, self.progress_per_tick);
                let mut out = format!("Furnace at {pos}, fuel available: {}\n", furnace.fuel());
                for (i, entry) in furnace.listing().iter().enumerate() {
                    let state = furnace.entry_state(i).map(|s| s.label()).unwrap_or("");
                    let result = mc_rules_game::smelting::smelt_result(entry.source)
                        .map(item_name)
                        .unwrap_or("Unknown");
                    let _ = writeln!(
                        out,
                        "slot {:>2}: {} (x{}) -> {result} [{state}]",
                        entry.slot,
                        item_name(entry.source),
                        entry.count
                    );
                }
                self.furnace = Some(furnace);
                out
            }
            Interaction::Pass => format!("Nothing to open at {pos}"),
        }
    }

    fn cmd_smelt(&mut self, args: &[&str]) -> String {
        let Some(v) = parse_args::<usize>(args, 1) else {
            return "Usage: smelt <slot>".into();
        };
        let Some(furnace) = self.furnace.as_mut() else {
            return "No furnace open".into();
        };
        if furnace.start_job(&mut self.inventory, v[0]) {
            sync_lit_state(&mut self.level, furnace);
            format!("Smelting slot {}", v[0])
        } else {
            format!("Cannot smelt slot {}", v[0])
        }
    }

    /// Decode and apply one inbound packet.
    pub fn handle_packet(&mut self, mut data: &[u8]) -> String {
        let packet = match GamePacket::decode(&mut data) {
            Ok(p) => p,
            Err(e) => {
                warn!("Bad packet: {e}");
                return format!("Rejected: {e}");
            }
        };
        match packet {
            GamePacket::Crafting(pkt) => {
                let recipe = match verify_crafting_packet(&self.book, &pkt, self.player_id) {
                    Ok(r) => r.clone(),
                    Err(e) => {
                        warn!("Crafting packet rejected: {e}");
                        return format!("Rejected: {e}");
                    }
                };
                if craft_recipe(&recipe, &mut self.inventory, self.atomic_crafting) {
                    format!("Crafted {}", recipe.describe())
                } else {
                    format!("Cannot craft {}", recipe.describe())
                }
            }
            GamePacket::RemoveBlock(pkt) => {
                debug!("Ignoring inbound RemoveBlock for {}", pkt.position);
                "Ignored".into()
            }
        }
    }
}
