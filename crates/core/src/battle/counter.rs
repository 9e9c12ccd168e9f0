use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterStrike {
    pub enemy: usize,
    pub hero: usize,
    pub damage: i64,
}

impl BattleRound {
    /// Living hero with the lowest health; the earliest wins ties.
    fn counter_target(&self) -> Option<usize> {
        self.heroes
            .iter()
            .enumerate()
            .filter(|(_, hero)| hero.is_alive())
            .min_by_key(|(idx, hero)| (hero.health, *idx))
            .map(|(idx, _)| idx)
    }

    pub fn end_turn(&mut self, events: &mut EventBus) -> Result<Vec<CounterStrike>, BattleError> {
        self.require_phase(BattlePhase::PlayerTurn)?;
        self.selected.clear();
        self.phase = BattlePhase::EnemyTurn;
        let mut strikes = Vec::new();
        for enemy in 0..self.enemies.len() {
            if !self.enemies[enemy].is_alive() {
                continue;
            }
            let Some(hero) = self.counter_target() else {
                break;
            };
            let damage = self.heroes[hero].take_damage(self.enemies[enemy].attack);
            events.push(Event::CounterAttack {
                enemy,
                hero,
                damage,
            });
            if !self.heroes[hero].is_alive() {
                events.push(Event::HeroDefeated { hero });
            }
            strikes.push(CounterStrike {
                enemy,
                hero,
                damage,
            });
        }

        if self.heroes.iter().all(|hero| !hero.is_alive()) {
            self.phase = BattlePhase::Defeat;
            events.push(Event::Defeat);
            return Ok(strikes);
        }

        self.turn += 1;
        self.discards_left = self.config.discards_per_turn;
        self.phase = BattlePhase::PlayerTurn;
        events.push(Event::TurnStarted { turn: self.turn });
        self.deal(events);
        Ok(strikes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(heroes: Vec<Combatant>, enemies: Vec<Combatant>) -> BattleRound {
        let config = BattleConfig::default();
        let mut round = BattleRound::with_parts(config, Deck::standard52(), heroes, enemies, 3);
        let mut events = EventBus::default();
        round.start(&mut events).expect("start");
        round
    }

    #[test]
    fn enemies_strike_the_weakest_hero() {
        let mut round = round(
            vec![Combatant::new("knight", 30, 4), Combatant::new("mage", 12, 7)],
            vec![Combatant::new("slime", 40, 5), Combatant::new("bat", 0, 9)],
        );
        round.discards_left = 0;
        let mut events = EventBus::default();
        let strikes = round.end_turn(&mut events).expect("end turn");
        assert_eq!(
            strikes,
            vec![CounterStrike {
                enemy: 0,
                hero: 1,
                damage: 5,
            }]
        );
        assert_eq!(round.heroes[1].health, 7);
        assert_eq!(round.turn, 2);
        assert_eq!(round.discards_left, 2);
        assert_eq!(round.phase(), BattlePhase::PlayerTurn);
        assert!(events.drain().any(|e| e == Event::TurnStarted { turn: 2 }));
    }

    #[test]
    fn losing_every_hero_is_defeat() {
        let mut round = round(
            vec![Combatant::new("knight", 4, 4)],
            vec![Combatant::new("ogre", 40, 10), Combatant::new("imp", 40, 2)],
        );
        let mut events = EventBus::default();
        let strikes = round.end_turn(&mut events).expect("end turn");
        assert_eq!(strikes.len(), 1);
        assert_eq!(round.phase(), BattlePhase::Defeat);
        let drained: Vec<Event> = events.drain().collect();
        assert!(drained.contains(&Event::HeroDefeated { hero: 0 }));
        assert_eq!(drained.last(), Some(&Event::Defeat));
        assert!(matches!(
            round.end_turn(&mut events),
            Err(BattleError::InvalidPhase(BattlePhase::Defeat))
        ));
    }
}
