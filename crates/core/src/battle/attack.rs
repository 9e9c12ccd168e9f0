use super::*;
use crate::{evaluate_hand, remove_matching, ChainResult, DamageBreakdown, PokerHandResult};

#[derive(Debug, Clone, Serialize)]
pub enum AttackPlan {
    Hand {
        hand: PokerHandResult,
        breakdown: DamageBreakdown,
        damage: i64,
    },
    Chain(ChainResult),
}

impl AttackPlan {
    pub fn total_damage(&self) -> i64 {
        match self {
            AttackPlan::Hand { damage, .. } => *damage,
            AttackPlan::Chain(chain) => chain.total_damage,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttackOutcome {
    pub target: usize,
    pub plan: AttackPlan,
    pub damage_dealt: i64,
    pub target_defeated: bool,
    pub cards_used: Vec<Card>,
}

impl BattleRound {
    /// Living enemy to hit: `requested` when it is alive, otherwise the
    /// first living enemy.
    pub fn pick_target(&self, requested: Option<usize>) -> Result<usize, BattleError> {
        if let Some(idx) = requested {
            return match self.enemies.get(idx) {
                Some(enemy) if enemy.is_alive() => Ok(idx),
                _ => Err(BattleError::InvalidTarget(idx)),
            };
        }
        self.enemies
            .iter()
            .position(Combatant::is_alive)
            .ok_or(BattleError::NoLivingTarget)
    }

    pub fn preview(&self, target: Option<usize>) -> Result<AttackPlan, BattleError> {
        if self.selected.is_empty() {
            return Err(BattleError::EmptySelection);
        }
        let target = self.pick_target(target)?;
        self.plan_attack(target)
    }

    fn plan_attack(&self, target: usize) -> Result<AttackPlan, BattleError> {
        let selected = self.selected_cards();
        let enemy = &self.enemies[target];
        if selected.iter().any(Card::is_chain) {
            let remaining = self.unselected_cards();
            let resolver = self.resolver.as_ref();
            let chain = self.chain.decompose(&selected, &remaining, resolver, enemy)?;
            return Ok(AttackPlan::Chain(chain));
        }
        let hand = evaluate_hand(&selected)?;
        let breakdown = self.calculator.breakdown(&hand, &selected);
        let damage = self.resolver.resolve(&hand, &selected, enemy);
        Ok(AttackPlan::Hand {
            hand,
            breakdown,
            damage,
        })
    }

    pub fn commit_attack(
        &mut self,
        target: Option<usize>,
        events: &mut EventBus,
    ) -> Result<AttackOutcome, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        if self.selected.is_empty() {
            return Err(BattleError::EmptySelection);
        }
        let target = self.pick_target(target)?;
        let plan = self.plan_attack(target)?;
        self.phase = BattlePhase::Resolving;

        let mut used = self.selected_cards();
        let damage_dealt = match &plan {
            AttackPlan::Hand { hand, damage, .. } => {
                let dealt = self.enemies[target].take_damage(*damage);
                events.push(Event::AttackResolved {
                    category: hand.category,
                    target,
                    damage: dealt,
                });
                dealt
            }
            AttackPlan::Chain(chain) => {
                let extension: Vec<Card> = chain.extension_cards(&used).cloned().collect();
                let mut dealt = 0;
                for (index, link) in chain.links.iter().enumerate() {
                    let applied = self.enemies[target].take_damage(link.damage);
                    dealt += applied;
                    events.push(Event::ChainLinkResolved {
                        index,
                        label: link.label.clone(),
                        target,
                        damage: applied,
                    });
                }
                used.extend(extension);
                dealt
            }
        };

        let target_defeated = !self.enemies[target].is_alive();
        if target_defeated {
            events.push(Event::EnemyDefeated { enemy: target });
        }

        let spent = remove_matching(&mut self.hand, &used);
        self.deck.discard(spent);
        self.selected.clear();

        if self.enemies.iter().all(|enemy| !enemy.is_alive()) {
            self.phase = BattlePhase::Victory;
            events.push(Event::Victory);
        } else {
            self.deal(events);
            self.phase = BattlePhase::PlayerTurn;
        }

        Ok(AttackOutcome {
            target,
            plan,
            damage_dealt,
            target_defeated,
            cards_used: used,
        })
    }

    pub fn discard_selected(&mut self, events: &mut EventBus) -> Result<(), BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        if self.discards_left == 0 {
            return Err(BattleError::NoDiscardsLeft);
        }
        if self.selected.is_empty() {
            return Err(BattleError::EmptySelection);
        }
        let picked = self.selected_cards();
        let discarded = remove_matching(&mut self.hand, &picked);
        self.selected.clear();
        self.discards_left -= 1;
        events.push(Event::CardsDiscarded {
            count: discarded.len(),
            discards_left: self.discards_left,
        });
        self.deck.discard(discarded);
        self.deal(events);
        Ok(())
    }
}
