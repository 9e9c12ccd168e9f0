use crate::{
    combinations, evaluate_hand, Card, ChainRules, Combatant, DamageResolver, HandCategory,
    HandError, PokerHandResult, MAX_HAND_CARDS,
};
use serde::Serialize;
use thiserror::Error;

pub const CHAIN_LINK_LABEL: &str = "Wild Chain";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("selection has no chain card")]
    NoChainCard,
    #[error("selection has {0} chain cards, expected one")]
    MultipleChainCards(usize),
    #[error(transparent)]
    Hand(#[from] HandError),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainLink {
    pub label: String,
    pub category: HandCategory,
    pub damage: i64,
    pub cards: Vec<Card>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainResult {
    pub links: Vec<ChainLink>,
    pub total_damage: i64,
}

impl ChainResult {
    pub fn extension_cards<'a>(
        &'a self,
        selected: &'a [Card],
    ) -> impl Iterator<Item = &'a Card> {
        self.links
            .iter()
            .flat_map(|link| link.cards.iter())
            .filter(move |card| !selected.iter().any(|s| s.matches(card)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChainDecomposer {
    pub rules: ChainRules,
}

impl ChainDecomposer {
    pub fn new(rules: ChainRules) -> Self {
        Self { rules }
    }

    pub fn decompose(
        &self,
        selected: &[Card],
        remaining: &[Card],
        resolver: &dyn DamageResolver,
        target: &Combatant,
    ) -> Result<ChainResult, ChainError> {
        let chain_positions: Vec<usize> = selected
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_chain())
            .map(|(idx, _)| idx)
            .collect();
        let chain_idx = match chain_positions.as_slice() {
            [] => return Err(ChainError::NoChainCard),
            [idx] => *idx,
            many => return Err(ChainError::MultipleChainCards(many.len())),
        };
        let chain_card = selected[chain_idx].clone();
        let core: Vec<Card> = selected
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != chain_idx)
            .map(|(_, card)| card.clone())
            .collect();

        let link_for = |hand: PokerHandResult, cards: Vec<Card>, label: String, primary: bool| {
            ChainLink {
                label,
                category: hand.category,
                damage: resolver.resolve(&hand, &cards, target),
                cards,
                is_primary: primary,
            }
        };

        let mut links = Vec::new();
        if let Some(strong) = strong_core(&core)? {
            log::debug!("chain core holds {:?}", strong.category);
            let label = strong.category.display_name().to_string();
            links.push(link_for(strong, core.clone(), label, true));
        } else {
            for (idx, card) in core.iter().enumerate() {
                let single = vec![card.clone()];
                let hand = evaluate_hand(&single)?;
                links.push(link_for(hand, single, card.label(), idx == 0));
            }
        }

        // The chain card's own link is always last and counts against the
        // link budget.
        let mut pool = remaining.to_vec();
        pool.sort_by(|a, b| b.value().cmp(&a.value()));
        while links.len() + 1 < self.rules.max_links && !pool.is_empty() {
            let Some((picked, hand)) = best_subset(&pool)? else {
                break;
            };
            if hand.category < self.rules.extension_min_category {
                log::debug!("chain extension stops at {:?}", hand.category);
                break;
            }
            let cards: Vec<Card> = picked.iter().map(|&idx| pool[idx].clone()).collect();
            for idx in picked.iter().rev() {
                pool.remove(*idx);
            }
            log::debug!("chain extended with {:?} of {} cards", hand.category, cards.len());
            let label = hand.category.display_name().to_string();
            links.push(link_for(hand, cards, label, false));
        }

        let chain_hand = evaluate_hand(std::slice::from_ref(&chain_card))?;
        links.push(link_for(
            chain_hand,
            vec![chain_card],
            CHAIN_LINK_LABEL.to_string(),
            false,
        ));
        if !links.iter().any(|link| link.is_primary) {
            links[0].is_primary = true;
        }

        let total_damage = links.iter().map(|link| link.damage).sum();
        Ok(ChainResult {
            links,
            total_damage,
        })
    }
}

fn strong_core(core: &[Card]) -> Result<Option<PokerHandResult>, HandError> {
    if core.len() < 3 || core.len() > MAX_HAND_CARDS {
        return Ok(None);
    }
    let hand = evaluate_hand(core)?;
    Ok((hand.category >= HandCategory::ThreeOfAKind).then_some(hand))
}

// Highest category wins, then the larger subset, then the first found.
fn best_subset(pool: &[Card]) -> Result<Option<(Vec<usize>, PokerHandResult)>, HandError> {
    let indices: Vec<usize> = (0..pool.len()).collect();
    let mut best: Option<(Vec<usize>, PokerHandResult)> = None;
    for k in 1..=pool.len().min(MAX_HAND_CARDS) {
        for picked in combinations(&indices, k) {
            let cards: Vec<Card> = picked.iter().map(|&idx| pool[idx].clone()).collect();
            let hand = evaluate_hand(&cards)?;
            let better = match &best {
                None => true,
                Some((best_picked, best_hand)) => {
                    hand.category > best_hand.category
                        || (hand.category == best_hand.category && k > best_picked.len())
                }
            };
            if better {
                best = Some((picked, hand));
            }
        }
    }
    Ok(best)
}
