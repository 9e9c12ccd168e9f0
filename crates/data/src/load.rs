use crate::schema::{BattleConfig, HandRule, Roster};
use anyhow::{bail, Context};
use cardstrike_core::{HandCategory, MAX_HAND_CARDS};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BATTLE_FILE: &str = "battle.json";
const HANDS_FILE: &str = "hands.json";
const ROSTER_FILE: &str = "roster.json";

const BUILTIN_BATTLE: &[u8] = include_bytes!("../assets/battle.json");
const BUILTIN_HANDS: &[u8] = include_bytes!("../assets/hands.json");
const BUILTIN_ROSTER: &[u8] = include_bytes!("../assets/roster.json");

/// The configuration shipped with the game.
pub fn builtin_battle_config() -> BattleConfig {
    parse_battle_config(BUILTIN_BATTLE, BUILTIN_HANDS, Some(BUILTIN_ROSTER))
        .expect("built-in battle config must be valid")
}

/// Load `battle.json` and `hands.json` from `dir`, plus `roster.json` when
/// present. A missing roster falls back to the built-in one.
pub fn load_battle_config(dir: &Path) -> anyhow::Result<BattleConfig> {
    let battle = read_bytes(&dir.join(BATTLE_FILE))?;
    let hands = read_bytes(&dir.join(HANDS_FILE))?;
    let roster_path = dir.join(ROSTER_FILE);
    let roster = if roster_path.exists() {
        read_bytes(&roster_path)?
    } else {
        log::info!("no {} in {}, using built-in roster", ROSTER_FILE, dir.display());
        BUILTIN_ROSTER.to_vec()
    };
    parse_battle_config(&battle, &hands, Some(&roster))
        .with_context(|| format!("load battle config from {}", dir.display()))
}

pub fn parse_battle_config(
    battle: &[u8],
    hands: &[u8],
    roster: Option<&[u8]>,
) -> anyhow::Result<BattleConfig> {
    let mut config: BattleConfig = parse_json(battle, BATTLE_FILE)?;
    config.damage.hands = parse_json::<Vec<HandRule>>(hands, HANDS_FILE)?;
    if let Some(raw) = roster {
        let roster: Roster = parse_json(raw, ROSTER_FILE)?;
        config.heroes = roster.heroes;
        config.enemies = roster.enemies;
    }
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &BattleConfig) -> anyhow::Result<()> {
    if config.max_selection == 0 || config.max_selection > MAX_HAND_CARDS {
        bail!(
            "max_selection must be between 1 and {MAX_HAND_CARDS}, got {}",
            config.max_selection
        );
    }
    if config.hand_size < config.max_selection {
        bail!(
            "hand_size {} is smaller than max_selection {}",
            config.hand_size,
            config.max_selection
        );
    }
    if config.chain.max_links == 0 {
        bail!("chain.max_links must be at least 1");
    }
    let damage = &config.damage;
    if !damage.primary_weight.is_finite() || !damage.kicker_weight.is_finite() {
        bail!("damage weights must be finite");
    }
    if damage.min_damage < 0 {
        bail!("damage.min_damage must not be negative");
    }

    let mut seen = HashSet::new();
    for rule in &damage.hands {
        if HandCategory::from_id(&rule.id).is_none() {
            bail!("unknown hand id '{}'", rule.id);
        }
        if !seen.insert(rule.id.as_str()) {
            bail!("duplicate hand id '{}'", rule.id);
        }
        if rule.base_damage < 0 {
            bail!("hand '{}' has negative base damage", rule.id);
        }
    }
    for category in HandCategory::ALL {
        if !seen.contains(category.id()) {
            log::warn!("no damage rule for {}, using default", category.id());
        }
    }

    for combatant in config.heroes.iter().chain(&config.enemies) {
        if combatant.health <= 0 {
            bail!("combatant '{}' must start with positive health", combatant.name);
        }
    }
    Ok(())
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn parse_json<T: DeserializeOwned>(raw: &[u8], name: &str) -> anyhow::Result<T> {
    serde_json::from_slice(raw).with_context(|| format!("parse {name}"))
}
