use crate::Card;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

pub const MAX_HAND_CARDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn id(self) -> &'static str {
        match self {
            HandCategory::HighCard => "high_card",
            HandCategory::OnePair => "one_pair",
            HandCategory::TwoPair => "two_pair",
            HandCategory::ThreeOfAKind => "three_of_a_kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full_house",
            HandCategory::FourOfAKind => "four_of_a_kind",
            HandCategory::StraightFlush => "straight_flush",
            HandCategory::RoyalFlush => "royal_flush",
        }
    }

    pub fn from_id(id: &str) -> Option<HandCategory> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    #[error("a hand holds 1 to {MAX_HAND_CARDS} cards, got {0}")]
    InvalidSize(usize),
}

/// A classified hand. `cards` are the input sorted by descending value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerHandResult {
    pub category: HandCategory,
    pub tie_breakers: Vec<u8>,
    pub cards: Vec<Card>,
}

impl PokerHandResult {
    pub fn strength_cmp(&self, other: &PokerHandResult) -> Ordering {
        compare_hands(self, other)
    }
}

/// Category first, then tie-breakers lexicographically with missing
/// positions read as 0.
pub fn compare_hands(a: &PokerHandResult, b: &PokerHandResult) -> Ordering {
    let by_category = a.category.cmp(&b.category);
    if by_category != Ordering::Equal {
        return by_category;
    }
    let len = a.tie_breakers.len().max(b.tie_breakers.len());
    for idx in 0..len {
        let left = a.tie_breakers.get(idx).copied().unwrap_or(0);
        let right = b.tie_breakers.get(idx).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

pub fn evaluate_hand(cards: &[Card]) -> Result<PokerHandResult, HandError> {
    if cards.is_empty() || cards.len() > MAX_HAND_CARDS {
        return Err(HandError::InvalidSize(cards.len()));
    }

    let mut sorted = cards.to_vec();
    // Stable, so equal values keep their input order.
    sorted.sort_by(|a, b| b.value().cmp(&a.value()));
    let values: Vec<u8> = sorted.iter().map(Card::value).collect();

    let mut counts: HashMap<u8, usize> = HashMap::new();
    for value in &values {
        *counts.entry(*value).or_insert(0) += 1;
    }
    let groups = value_groups(&counts);

    let is_flush =
        sorted.len() == MAX_HAND_CARDS && sorted.iter().all(|c| c.suit == sorted[0].suit);
    let straight_high = straight_high(&values);

    let (category, tie_breakers) = classify(&values, &groups, is_flush, straight_high);
    Ok(PokerHandResult {
        category,
        tie_breakers,
        cards: sorted,
    })
}

fn classify(
    values: &[u8],
    groups: &[(u8, usize)],
    is_flush: bool,
    straight_high: Option<u8>,
) -> (HandCategory, Vec<u8>) {
    if let (true, Some(high)) = (is_flush, straight_high) {
        let low = values.iter().copied().min().unwrap_or(0);
        if high == 14 && low == 10 {
            return (HandCategory::RoyalFlush, vec![14]);
        }
        return (HandCategory::StraightFlush, vec![high]);
    }

    let (top_value, top_count) = groups[0];
    if top_count >= 4 {
        let mut tie = with_kickers(&[top_value], values);
        if top_count > 4 {
            // Five of one value: the fifth copy stands in as the kicker.
            tie.push(top_value);
        }
        return (HandCategory::FourOfAKind, tie);
    }

    let shape: Vec<usize> = groups.iter().map(|(_, count)| *count).collect();
    if shape == [3, 2] {
        return (HandCategory::FullHouse, vec![groups[0].0, groups[1].0]);
    }
    if is_flush {
        return (HandCategory::Flush, values.to_vec());
    }
    if let Some(high) = straight_high {
        return (HandCategory::Straight, vec![high]);
    }
    if top_count == 3 {
        return (HandCategory::ThreeOfAKind, with_kickers(&[top_value], values));
    }
    let pairs: Vec<u8> = groups
        .iter()
        .filter(|(_, count)| *count == 2)
        .map(|(value, _)| *value)
        .collect();
    if pairs.len() >= 2 {
        return (HandCategory::TwoPair, with_kickers(&pairs[..2], values));
    }
    if let Some(pair) = pairs.first() {
        return (HandCategory::OnePair, with_kickers(&[*pair], values));
    }
    (HandCategory::HighCard, values.to_vec())
}

fn value_groups(counts: &HashMap<u8, usize>) -> Vec<(u8, usize)> {
    let mut groups: Vec<(u8, usize)> = counts.iter().map(|(v, c)| (*v, *c)).collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    groups
}

fn with_kickers(leading: &[u8], values: &[u8]) -> Vec<u8> {
    let mut tie = leading.to_vec();
    tie.extend(values.iter().copied().filter(|v| !leading.contains(v)));
    tie
}

/// High card of a five-value straight, with the wheel scored as 5. Jokers
/// never complete a straight.
fn straight_high(values: &[u8]) -> Option<u8> {
    let mut unique = values.to_vec();
    unique.dedup();
    if unique.len() != MAX_HAND_CARDS || unique[0] > 14 {
        return None;
    }
    if unique == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    if unique[0] - unique[4] == 4 {
        return Some(unique[0]);
    }
    None
}
