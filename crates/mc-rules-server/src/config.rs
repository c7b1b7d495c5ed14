use serde::Deserialize;
use std::path::Path;

use mc_rules_game::recipe::{CraftingRecipe, RecipeBook};

#[derive(Debug, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub gameplay: GameplaySection,
    #[serde(default)]
    pub smelting: SmeltingSection,
    pub logging: LoggingSection,
    /// Extra shaped recipes, appended after the standard set.
    #[serde(default)]
    pub recipes: Vec<RecipeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Game tick period in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Entity id of the local player.
    #[serde(default = "default_player_id")]
    pub player_id: i32,
}

fn default_tick_millis() -> u64 {
    50
}

fn default_player_id() -> i32 {
    1
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            player_id: default_player_id(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GameplaySection {
    #[serde(default = "default_destroy_modifier")]
    pub destroy_modifier: f32,
    #[serde(default = "default_true")]
    pub can_open_screens: bool,
    /// Roll back a craft whose result does not fit.
    #[serde(default = "default_true")]
    pub atomic_crafting: bool,
}

fn default_destroy_modifier() -> f32 {
    mc_rules_game::destruction::DEFAULT_DESTROY_MODIFIER
}

fn default_true() -> bool {
    true
}

impl Default for GameplaySection {
    fn default() -> Self {
        Self {
            destroy_modifier: default_destroy_modifier(),
            can_open_screens: true,
            atomic_crafting: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SmeltingSection {
    #[serde(default = "default_progress_per_tick")]
    pub progress_per_tick: f32,
}

fn default_progress_per_tick() -> f32 {
    mc_rules_game::smelting::DEFAULT_PROGRESS_PER_TICK
}

impl Default for SmeltingSection {
    fn default() -> Self {
        Self {
            progress_per_tick: default_progress_per_tick(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeEntry {
    /// Rows of item ids, -1 for an empty cell.
    pub pattern: Vec<Vec<i32>>,
    pub result: i32,
    #[serde(default = "default_recipe_count")]
    pub count: u16,
}

fn default_recipe_count() -> u16 {
    1
}

impl RulesConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Standard recipes followed by the configured extras.
    pub fn recipe_book(&self) -> RecipeBook {
        let mut book = RecipeBook::standard();
        for entry in &self.recipes {
            book.register(CraftingRecipe::new(
                entry.pattern.clone(),
                entry.result,
                entry.count,
            ));
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml_str = r#"
            [logging]
            level = "info"
        "#;
        let config: RulesConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "info");
        // every other section defaults when absent
        assert_eq!(config.server.tick_millis, 50);
        assert_eq!(config.server.player_id, 1);
        assert_eq!(config.gameplay.destroy_modifier, 0.05);
        assert!(config.gameplay.can_open_screens);
        assert!(config.gameplay.atomic_crafting);
        assert_eq!(config.smelting.progress_per_tick, 0.05);
        assert!(config.recipes.is_empty());
        assert_eq!(config.recipe_book().len(), RecipeBook::standard().len());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            [server]
            tick_millis = 100
            player_id = 42

            [gameplay]
            destroy_modifier = 0.25
            can_open_screens = false
            atomic_crafting = false

            [smelting]
            progress_per_tick = 0.1

            [logging]
            level = "debug"

            [[recipes]]
            pattern = [[3, 3], [3, 3]]
            result = 2
            count = 4

            [[recipes]]
            pattern = [[-1, 12], [12, -1]]
            result = 20
        "#;
        let config: RulesConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.tick_millis, 100);
        assert_eq!(config.server.player_id, 42);
        assert_eq!(config.gameplay.destroy_modifier, 0.25);
        assert!(!config.gameplay.can_open_screens);
        assert!(!config.gameplay.atomic_crafting);
        assert_eq!(config.smelting.progress_per_tick, 0.1);
        assert_eq!(config.recipes.len(), 2);
        assert_eq!(config.recipes[1].count, 1);

        let book = config.recipe_book();
        let extra = book.get(book.len() - 2).unwrap();
        assert_eq!(extra.pattern, vec![vec![3, 3], vec![3, 3]]);
        assert_eq!(extra.result, 2);
        assert_eq!(extra.count, 4);
    }

    #[test]
    fn logging_section_is_required() {
        let toml_str = r#"
            [server]
            tick_millis = 50
        "#;
        assert!(toml::from_str::<RulesConfig>(toml_str).is_err());
    }
}
