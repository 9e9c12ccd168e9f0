use crate::{BattleConfig, Card, Combatant, DamageRules, HandCategory, PokerHandResult};
use serde::Serialize;
use std::collections::HashMap;

const MIN_TIE_VALUE: u8 = 2;
const MAX_TIE_VALUE: u8 = 14;

#[derive(Debug, Clone)]
pub struct DamageTables {
    base: HashMap<HandCategory, i64>,
    primary_weight: f64,
    kicker_weight: f64,
    kicker_count: usize,
    min_damage: i64,
}

impl Default for DamageTables {
    fn default() -> Self {
        Self::from_rules(&DamageRules::default())
    }
}

impl DamageTables {
    pub fn from_config(config: &BattleConfig) -> Self {
        Self::from_rules(&config.damage)
    }

    pub fn from_rules(rules: &DamageRules) -> Self {
        let mut base = HashMap::new();
        for rule in &rules.hands {
            if let Some(category) = HandCategory::from_id(&rule.id) {
                base.insert(category, rule.base_damage);
            } else {
                log::warn!("ignoring damage rule for unknown hand '{}'", rule.id);
            }
        }
        Self {
            base,
            primary_weight: rules.primary_weight,
            kicker_weight: rules.kicker_weight,
            kicker_count: rules.kicker_count,
            min_damage: rules.min_damage,
        }
    }

    pub fn base_damage(&self, category: HandCategory) -> i64 {
        self.base
            .get(&category)
            .copied()
            .unwrap_or_else(|| default_base_damage(category))
    }

    pub fn min_damage(&self) -> i64 {
        self.min_damage
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageBreakdown {
    pub category: HandCategory,
    pub base: i64,
    pub value_bonus: f64,
    pub modifier_bonus: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default)]
pub struct DamageCalculator {
    tables: DamageTables,
}

impl DamageCalculator {
    pub fn new(tables: DamageTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &DamageTables {
        &self.tables
    }

    pub fn damage(&self, hand: &PokerHandResult, cards: &[Card]) -> i64 {
        self.breakdown(hand, cards).total
    }

    /// Terms are accumulated as floating point and floored once at the end.
    pub fn breakdown(&self, hand: &PokerHandResult, cards: &[Card]) -> DamageBreakdown {
        let base = self.tables.base_damage(hand.category);
        let value_bonus = self.value_bonus(hand);
        let modifier_bonus: i64 = cards.iter().map(|card| card.damage_bonus).sum();
        let raw = base as f64 + value_bonus + modifier_bonus as f64;
        DamageBreakdown {
            category: hand.category,
            base,
            value_bonus,
            modifier_bonus,
            total: self.finish(raw),
        }
    }

    fn value_bonus(&self, hand: &PokerHandResult) -> f64 {
        let valid: Vec<u8> = hand
            .tie_breakers
            .iter()
            .copied()
            .filter(|v| (MIN_TIE_VALUE..=MAX_TIE_VALUE).contains(v))
            .collect();
        if valid.len() != hand.tie_breakers.len() {
            log::debug!(
                "dropped out-of-range tie-breakers from {:?}",
                hand.tie_breakers
            );
        }
        let weigh = |value: u8, weight: f64| value.saturating_sub(MIN_TIE_VALUE) as f64 * weight;

        if hand.category == HandCategory::HighCard {
            return valid
                .iter()
                .copied()
                .max()
                .map(|highest| weigh(highest, self.tables.primary_weight))
                .unwrap_or(0.0);
        }
        let Some((primary, rest)) = valid.split_first() else {
            return 0.0;
        };
        let kickers: f64 = rest
            .iter()
            .take(self.tables.kicker_count)
            .map(|value| weigh(*value, self.tables.kicker_weight))
            .sum();
        weigh(*primary, self.tables.primary_weight) + kickers
    }

    /// Floor a raw damage figure, clamping non-finite input to the minimum.
    pub fn finish(&self, raw: f64) -> i64 {
        if !raw.is_finite() {
            log::warn!(
                "non-finite damage {raw}, using minimum {}",
                self.tables.min_damage
            );
            return self.tables.min_damage;
        }
        raw.floor() as i64
    }
}

pub trait DamageResolver: std::fmt::Debug + Send + Sync {
    fn resolve(&self, hand: &PokerHandResult, cards: &[Card], target: &Combatant) -> i64;
}

impl DamageResolver for DamageCalculator {
    fn resolve(&self, hand: &PokerHandResult, cards: &[Card], _target: &Combatant) -> i64 {
        self.damage(hand, cards)
    }
}

#[derive(Debug, Clone)]
pub struct ScaledResolver {
    pub calculator: DamageCalculator,
    pub multiplier: f64,
}

impl DamageResolver for ScaledResolver {
    fn resolve(&self, hand: &PokerHandResult, cards: &[Card], _target: &Combatant) -> i64 {
        let breakdown = self.calculator.breakdown(hand, cards);
        let raw = breakdown.base as f64 + breakdown.value_bonus + breakdown.modifier_bonus as f64;
        self.calculator.finish(raw * self.multiplier)
    }
}

fn default_base_damage(category: HandCategory) -> i64 {
    match category {
        HandCategory::HighCard => 3,
        HandCategory::OnePair => 20,
        HandCategory::TwoPair => 35,
        HandCategory::ThreeOfAKind => 55,
        HandCategory::Straight => 75,
        HandCategory::Flush => 90,
        HandCategory::FullHouse => 125,
        HandCategory::FourOfAKind => 160,
        HandCategory::StraightFlush => 250,
        HandCategory::RoyalFlush => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate_hand, HandRule, Modifier, Rank, Suit};

    fn hand(tie_breakers: Vec<u8>, category: HandCategory) -> PokerHandResult {
        PokerHandResult {
            category,
            tie_breakers,
            cards: Vec::new(),
        }
    }

    #[test]
    fn high_card_uses_highest_value_only() {
        let calc = DamageCalculator::default();
        let result = hand(vec![14, 9, 4], HandCategory::HighCard);
        assert_eq!(calc.damage(&result, &[]), 12);
    }

    #[test]
    fn pair_of_aces_with_kickers() {
        let calc = DamageCalculator::default();
        let result = hand(vec![14, 13, 12, 11], HandCategory::OnePair);
        let breakdown = calc.breakdown(&result, &[]);
        assert!((breakdown.value_bonus - 14.25).abs() < 1e-9);
        assert_eq!(breakdown.total, 34);
    }

    #[test]
    fn out_of_range_tie_breakers_are_dropped() {
        let calc = DamageCalculator::default();
        let result = hand(vec![0, 200, 15], HandCategory::OnePair);
        assert_eq!(calc.damage(&result, &[]), 20);
        let result = hand(vec![15, 10], HandCategory::OnePair);
        assert_eq!(calc.damage(&result, &[]), 26);
    }

    #[test]
    fn card_bonuses_are_flat() {
        let calc = DamageCalculator::default();
        let cards = vec![
            Card::standard(Suit::Hearts, Rank::Two).with_modifier(Modifier::DamageBonus(4)),
            Card::standard(Suit::Clubs, Rank::Two).with_modifier(Modifier::Heal(9)),
        ];
        let result = evaluate_hand(&cards).expect("valid hand");
        assert_eq!(calc.damage(&result, &cards), 24);
    }

    #[test]
    fn non_finite_damage_falls_back_to_minimum() {
        let resolver = ScaledResolver {
            calculator: DamageCalculator::default(),
            multiplier: f64::NAN,
        };
        let target = Combatant::new("dummy", 10, 0);
        let result = hand(vec![14], HandCategory::HighCard);
        assert_eq!(resolver.resolve(&result, &[], &target), 5);
        assert_eq!(DamageCalculator::default().finish(f64::INFINITY), 5);
    }

    #[test]
    fn scaled_resolver_floors_after_multiplying() {
        let resolver = ScaledResolver {
            calculator: DamageCalculator::default(),
            multiplier: 1.5,
        };
        let target = Combatant::new("dummy", 10, 0);
        let result = hand(vec![14, 13, 12, 11], HandCategory::OnePair);
        assert_eq!(resolver.resolve(&result, &[], &target), 51);
    }

    #[test]
    fn configured_base_overrides_default() {
        let rules = DamageRules {
            hands: vec![HandRule {
                id: "one_pair".to_string(),
                display_name: "One Pair".to_string(),
                base_damage: 40,
            }],
            ..DamageRules::default()
        };
        let tables = DamageTables::from_rules(&rules);
        assert_eq!(tables.base_damage(HandCategory::OnePair), 40);
        assert_eq!(tables.base_damage(HandCategory::FullHouse), 125);
    }
}
