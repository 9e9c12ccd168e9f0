use serde::{Deserialize, Serialize};

pub use cardstrike_core::{BattleConfig, ChainRules, CombatantRule, DamageRules, HandRule};

/// Heroes and enemies for a battle, kept apart from the balance numbers so
/// encounters can be swapped without touching damage tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub heroes: Vec<CombatantRule>,
    #[serde(default)]
    pub enemies: Vec<CombatantRule>,
}
