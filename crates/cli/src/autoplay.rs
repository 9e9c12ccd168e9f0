use cardstrike_core::{
    combinations, AttackOutcome, BattleError, BattlePhase, BattleRound, CounterStrike, EventBus,
};
use serde::Serialize;

/// One player turn as the greedy driver played it.
#[derive(Debug, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub attack: Option<AttackOutcome>,
    pub counters: Vec<CounterStrike>,
}

/// Pick the selection with the highest previewed damage. Ties keep the
/// earlier, smaller selection.
pub fn best_selection(round: &mut BattleRound) -> Result<Option<Vec<usize>>, BattleError> {
    let indices: Vec<usize> = (0..round.hand.len()).collect();
    let max = round.config.max_selection.min(indices.len());
    let mut best: Option<(i64, Vec<usize>)> = None;
    for size in 1..=max {
        for pick in combinations(&indices, size) {
            round.clear_selection();
            for &idx in &pick {
                round.toggle_select(idx)?;
            }
            let damage = match round.preview(None) {
                Ok(plan) => plan.total_damage(),
                Err(BattleError::Chain(err)) => {
                    log::debug!("skipping selection {pick:?}: {err}");
                    continue;
                }
                Err(err) => return Err(err),
            };
            if best.as_ref().map_or(true, |(top, _)| damage > *top) {
                best = Some((damage, pick));
            }
        }
    }
    round.clear_selection();
    Ok(best.map(|(_, pick)| pick))
}

/// Attack with the best selection, then let the enemies answer. Returns
/// `None` once the battle is over.
pub fn play_turn(
    round: &mut BattleRound,
    events: &mut EventBus,
) -> Result<Option<TurnRecord>, BattleError> {
    if round.is_over() {
        return Ok(None);
    }
    let turn = round.turn;
    let mut attack = None;
    if let Some(pick) = best_selection(round)? {
        for idx in pick {
            round.toggle_select(idx)?;
        }
        let outcome = round.commit_attack(None, events)?;
        log::info!(
            "turn {turn}: {} damage to enemy {}",
            outcome.damage_dealt,
            outcome.target
        );
        attack = Some(outcome);
    }
    let counters = if round.phase() == BattlePhase::PlayerTurn {
        round.end_turn(events)?
    } else {
        Vec::new()
    };
    Ok(Some(TurnRecord {
        turn,
        attack,
        counters,
    }))
}

/// Play until the battle ends or `max_turns` have passed.
pub fn play_battle(
    round: &mut BattleRound,
    events: &mut EventBus,
    max_turns: u32,
) -> Result<Vec<TurnRecord>, BattleError> {
    if round.turn == 0 {
        round.start(events)?;
    }
    let mut turns = Vec::new();
    while round.turn <= max_turns {
        match play_turn(round, events)? {
            Some(record) => turns.push(record),
            None => break,
        }
    }
    if !round.is_over() {
        log::warn!("battle still running after {max_turns} turns");
    }
    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstrike_core::{BattleConfig, Card, Combatant, Deck, Rank, Suit};

    fn round_with_hand(hand: Vec<Card>) -> BattleRound {
        let config = BattleConfig {
            hand_size: 0,
            ..BattleConfig::default()
        };
        let heroes = vec![Combatant::new("knight", 100, 0)];
        let enemies = vec![Combatant::new("slime", 500, 4)];
        let mut round = BattleRound::with_parts(config, Deck::default(), heroes, enemies, 1);
        let mut events = EventBus::default();
        round.start(&mut events).expect("start");
        round.hand = hand;
        round
    }

    fn trips_of_nines_with(low: Rank, high: Rank) -> Vec<Card> {
        vec![
            Card::standard(Suit::Hearts, low).with_id(1),
            Card::standard(Suit::Hearts, Rank::Nine).with_id(2),
            Card::standard(Suit::Clubs, Rank::Nine).with_id(3),
            Card::standard(Suit::Spades, high).with_id(4),
            Card::standard(Suit::Spades, Rank::Nine).with_id(5),
        ]
    }

    #[test]
    fn greedy_pick_keeps_smaller_selection_on_equal_damage() {
        // 55 + 5.25 floors to 60 with or without the 4 and 2 kickers.
        let mut round = round_with_hand(trips_of_nines_with(Rank::Two, Rank::Four));
        let pick = best_selection(&mut round).expect("preview").expect("some pick");
        assert_eq!(pick, vec![1, 2, 4]);
        assert!(round.selection().is_empty());
    }

    #[test]
    fn greedy_pick_takes_kickers_that_add_damage() {
        // Kickers K and A add 5.75: 66 against 60 for the bare trips.
        let mut round = round_with_hand(trips_of_nines_with(Rank::King, Rank::Ace));
        let pick = best_selection(&mut round).expect("preview").expect("some pick");
        assert_eq!(pick, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_hand_skips_the_attack() {
        let mut round = round_with_hand(Vec::new());
        let mut events = EventBus::default();
        let record = play_turn(&mut round, &mut events)
            .expect("turn")
            .expect("battle running");
        assert!(record.attack.is_none());
        assert_eq!(record.counters.len(), 1);
        assert_eq!(round.heroes[0].health, 96);
        assert_eq!(round.turn, 2);
    }

    #[test]
    fn battle_against_weak_enemy_ends_in_victory() {
        let config = BattleConfig::default();
        let heroes = vec![Combatant::new("knight", 100, 0)];
        let enemies = vec![Combatant::new("rat", 10, 1)];
        let mut round = BattleRound::with_parts(config, Deck::standard52(), heroes, enemies, 9);
        let mut events = EventBus::default();
        let turns = play_battle(&mut round, &mut events, 10).expect("battle");
        assert_eq!(round.phase(), BattlePhase::Victory);
        assert_eq!(turns.len(), 1);
        assert!(turns[0].counters.is_empty());
    }
}
