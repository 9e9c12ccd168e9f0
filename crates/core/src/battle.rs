use crate::{
    BattleConfig, Card, ChainDecomposer, ChainError, CombatantRule, DamageCalculator,
    DamageResolver, DamageTables, Deck, Event, EventBus, HandError, RngState,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod attack;
mod counter;

pub use attack::{AttackOutcome, AttackPlan};
pub use counter::CounterStrike;

#[derive(Debug, Error)]
pub enum BattleError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(BattlePhase),
    #[error("invalid card selection")]
    InvalidSelection,
    #[error("selection already holds {0} cards")]
    SelectionFull(usize),
    #[error("no cards selected")]
    EmptySelection,
    #[error("invalid target {0}")]
    InvalidTarget(usize),
    #[error("no living enemy to target")]
    NoLivingTarget,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("hand error: {0}")]
    Hand(#[from] HandError),
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    Resolving,
    EnemyTurn,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Combatant {
    pub name: String,
    pub health: i64,
    pub max_health: i64,
    pub attack: i64,
}

impl Combatant {
    pub fn new(name: impl Into<String>, health: i64, attack: i64) -> Self {
        Self {
            name: name.into(),
            health,
            max_health: health,
            attack,
        }
    }

    pub fn from_rule(rule: &CombatantRule) -> Self {
        Self::new(rule.name.clone(), rule.health, rule.attack)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Returns the health actually removed.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let dealt = amount.clamp(0, self.health.max(0));
        self.health -= dealt;
        dealt
    }
}

#[derive(Debug)]
pub struct BattleRound {
    pub config: BattleConfig,
    pub deck: Deck,
    pub rng: RngState,
    pub hand: Vec<Card>,
    pub heroes: Vec<Combatant>,
    pub enemies: Vec<Combatant>,
    pub turn: u32,
    pub discards_left: u8,
    selected: Vec<usize>,
    phase: BattlePhase,
    calculator: DamageCalculator,
    resolver: Box<dyn DamageResolver>,
    chain: ChainDecomposer,
}

impl BattleRound {
    pub fn new(config: BattleConfig, seed: u64) -> Self {
        let deck = Deck::standard52().with_jokers(config.jokers_in_deck);
        let heroes = config.heroes.iter().map(Combatant::from_rule).collect();
        let enemies = config.enemies.iter().map(Combatant::from_rule).collect();
        Self::with_parts(config, deck, heroes, enemies, seed)
    }

    pub fn with_parts(
        config: BattleConfig,
        mut deck: Deck,
        heroes: Vec<Combatant>,
        enemies: Vec<Combatant>,
        seed: u64,
    ) -> Self {
        let mut rng = RngState::from_seed(seed);
        deck.shuffle(&mut rng);
        let calculator = DamageCalculator::new(DamageTables::from_config(&config));
        let chain = ChainDecomposer::new(config.chain.clone());
        Self {
            discards_left: config.discards_per_turn,
            config,
            deck,
            rng,
            hand: Vec::new(),
            heroes,
            enemies,
            turn: 0,
            selected: Vec::new(),
            phase: BattlePhase::PlayerTurn,
            resolver: Box::new(calculator.clone()),
            calculator,
            chain,
        }
    }

    pub fn start(&mut self, events: &mut EventBus) -> Result<(), BattleError> {
        if self.turn != 0 || self.phase != BattlePhase::PlayerTurn {
            return Err(BattleError::InvalidPhase(self.phase));
        }
        self.turn = 1;
        events.push(Event::TurnStarted { turn: self.turn });
        self.deal(events);
        Ok(())
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Victory | BattlePhase::Defeat)
    }

    pub fn calculator(&self) -> &DamageCalculator {
        &self.calculator
    }

    pub fn set_resolver(&mut self, resolver: Box<dyn DamageResolver>) {
        self.resolver = resolver;
    }

    pub fn selection(&self) -> &[usize] {
        &self.selected
    }

    /// Returns whether `index` is selected after the toggle.
    pub fn toggle_select(&mut self, index: usize) -> Result<bool, BattleError> {
        if index >= self.hand.len() {
            return Err(BattleError::InvalidSelection);
        }
        if let Some(pos) = self.selected.iter().position(|&idx| idx == index) {
            self.selected.remove(pos);
            return Ok(false);
        }
        if self.selected.len() >= self.config.max_selection {
            return Err(BattleError::SelectionFull(self.selected.len()));
        }
        self.selected.push(index);
        Ok(true)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected cards in the order they were picked.
    pub fn selected_cards(&self) -> Vec<Card> {
        self.selected.iter().map(|&idx| self.hand[idx].clone()).collect()
    }

    pub fn unselected_cards(&self) -> Vec<Card> {
        self.hand
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.selected.contains(idx))
            .map(|(_, card)| card.clone())
            .collect()
    }

    pub fn deal(&mut self, events: &mut EventBus) {
        let needed = self.config.hand_size.saturating_sub(self.hand.len());
        if needed == 0 {
            return;
        }
        self.selected.clear();
        let mut count = needed;
        let mut total_drawn = 0;
        while count > 0 {
            if self.deck.draw.is_empty() {
                self.deck.reshuffle_discard(&mut self.rng);
                if self.deck.draw.is_empty() {
                    break;
                }
            }
            let mut drawn = self.deck.draw_cards(count);
            if drawn.is_empty() {
                break;
            }
            count = count.saturating_sub(drawn.len());
            total_drawn += drawn.len();
            self.hand.append(&mut drawn);
        }
        if total_drawn > 0 {
            events.push(Event::HandDealt { count: total_drawn });
        }
    }

    fn require_phase(&self, phase: BattlePhase) -> Result<(), BattleError> {
        if self.phase != phase {
            return Err(BattleError::InvalidPhase(self.phase));
        }
        Ok(())
    }
}
