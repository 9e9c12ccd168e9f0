use crate::HandCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRule {
    pub id: String,
    pub display_name: String,
    pub base_damage: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageRules {
    #[serde(default)]
    pub hands: Vec<HandRule>,
    #[serde(default = "default_primary_weight")]
    pub primary_weight: f64,
    #[serde(default = "default_kicker_weight")]
    pub kicker_weight: f64,
    #[serde(default = "default_kicker_count")]
    pub kicker_count: usize,
    #[serde(default = "default_min_damage")]
    pub min_damage: i64,
}

impl Default for DamageRules {
    fn default() -> Self {
        Self {
            hands: Vec::new(),
            primary_weight: default_primary_weight(),
            kicker_weight: default_kicker_weight(),
            kicker_count: default_kicker_count(),
            min_damage: default_min_damage(),
        }
    }
}

fn default_primary_weight() -> f64 {
    0.75
}

fn default_kicker_weight() -> f64 {
    0.25
}

fn default_kicker_count() -> usize {
    2
}

fn default_min_damage() -> i64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRules {
    #[serde(default = "default_max_links")]
    pub max_links: usize,
    /// Weakest category the extension search will still turn into a link.
    #[serde(default = "default_extension_min")]
    pub extension_min_category: HandCategory,
}

impl Default for ChainRules {
    fn default() -> Self {
        Self {
            max_links: default_max_links(),
            extension_min_category: default_extension_min(),
        }
    }
}

fn default_max_links() -> usize {
    5
}

fn default_extension_min() -> HandCategory {
    HandCategory::HighCard
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantRule {
    pub name: String,
    pub health: i64,
    pub attack: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    pub hand_size: usize,
    pub max_selection: usize,
    pub discards_per_turn: u8,
    #[serde(default)]
    pub jokers_in_deck: usize,
    #[serde(default)]
    pub damage: DamageRules,
    #[serde(default)]
    pub chain: ChainRules,
    #[serde(default)]
    pub heroes: Vec<CombatantRule>,
    #[serde(default)]
    pub enemies: Vec<CombatantRule>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            hand_size: 8,
            max_selection: crate::MAX_HAND_CARDS,
            discards_per_turn: 2,
            jokers_in_deck: 0,
            damage: DamageRules::default(),
            chain: ChainRules::default(),
            heroes: Vec::new(),
            enemies: Vec::new(),
        }
    }
}

impl BattleConfig {
    pub fn hand_rule(&self, category: HandCategory) -> Option<&HandRule> {
        self.damage.hands.iter().find(|rule| rule.id == category.id())
    }
}
