use crate::{Card, Rank, RngState, Suit};

#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
    next_id: u32,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut deck = Self::default();
        for suit in Suit::NATURAL {
            for rank in Rank::NATURAL {
                deck.push(Card::standard(suit, rank));
            }
        }
        deck
    }

    pub fn with_jokers(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.push(Card::joker());
        }
        self
    }

    pub fn push(&mut self, card: Card) {
        self.next_id += 1;
        self.draw.push(card.with_id(self.next_id));
    }

    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle_cards(&mut self.draw);
    }

    pub fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let split = self.draw.len().saturating_sub(count);
        let mut drawn = self.draw.split_off(split);
        drawn.reverse();
        drawn
    }

    pub fn discard(&mut self, cards: Vec<Card>) {
        self.discard.extend(cards);
    }

    pub fn reshuffle_discard(&mut self, rng: &mut RngState) {
        if self.discard.is_empty() {
            return;
        }
        log::debug!("recycling {} discarded cards", self.discard.len());
        self.draw.extend(self.discard.drain(..));
        rng.shuffle_cards(&mut self.draw);
    }
}
