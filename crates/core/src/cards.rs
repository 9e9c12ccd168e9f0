use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    Wild,
}

impl Suit {
    pub const NATURAL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
            Suit::Wild => "Wild",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Joker,
}

impl Rank {
    pub const NATURAL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            Rank::Joker => 15,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "Joker",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    DamageBonus,
    Chain,
    Heal,
    Shield,
}

/// Gameplay modifiers attached to a card. Only `DamageBonus` feeds the
/// damage pass; the rest are read by other subsystems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Modifier {
    DamageBonus(i64),
    Chain,
    Heal(i64),
    Shield(i64),
}

impl Modifier {
    pub fn kind(&self) -> ModifierKind {
        match self {
            Modifier::DamageBonus(_) => ModifierKind::DamageBonus,
            Modifier::Chain => ModifierKind::Chain,
            Modifier::Heal(_) => ModifierKind::Heal,
            Modifier::Shield(_) => ModifierKind::Shield,
        }
    }

    fn apply(&self, card: &mut Card) {
        match self {
            Modifier::DamageBonus(value) => card.damage_bonus += value,
            Modifier::Chain | Modifier::Heal(_) | Modifier::Shield(_) => {}
        }
    }

    fn unapply(&self, card: &mut Card) {
        match self {
            Modifier::DamageBonus(value) => card.damage_bonus -= value,
            Modifier::Chain | Modifier::Heal(_) | Modifier::Shield(_) => {}
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("card already carries a {0:?} modifier")]
    DuplicateModifier(ModifierKind),
}

/// Structural identity of a card. Hand mutation matches on this, never on
/// position or reference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub rank: Rank,
    pub suit: Suit,
    pub id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    modifiers: Vec<Modifier>,
    #[serde(default)]
    pub damage_bonus: i64,
}

impl Card {
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        Self {
            rank,
            suit,
            id: 0,
            rarity: Rarity::Common,
            modifiers: Vec::new(),
            damage_bonus: 0,
        }
    }

    pub fn joker() -> Self {
        Self::standard(Suit::Wild, Rank::Joker)
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Builder form of [`Card::add_modifier`] for cards known not to carry
    /// the kind yet.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        debug_assert!(
            !self.has_modifier(modifier.kind()),
            "card already carries a {:?} modifier",
            modifier.kind()
        );
        if let Err(err) = self.add_modifier(modifier) {
            log::warn!("{}: {err}", self.label());
        }
        self
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn key(&self) -> CardKey {
        CardKey {
            rank: self.rank,
            suit: self.suit,
            id: self.id,
        }
    }

    pub fn matches(&self, other: &Card) -> bool {
        self.key() == other.key()
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers.iter().any(|m| m.kind() == kind)
    }

    pub fn is_chain(&self) -> bool {
        self.has_modifier(ModifierKind::Chain)
    }

    pub fn add_modifier(&mut self, modifier: Modifier) -> Result<(), CardError> {
        let kind = modifier.kind();
        if self.has_modifier(kind) {
            return Err(CardError::DuplicateModifier(kind));
        }
        modifier.apply(self);
        self.modifiers.push(modifier);
        Ok(())
    }

    pub fn remove_modifier(&mut self, kind: ModifierKind) -> Option<Modifier> {
        let idx = self.modifiers.iter().position(|m| m.kind() == kind)?;
        let modifier = self.modifiers.remove(idx);
        modifier.unapply(self);
        Some(modifier)
    }

    pub fn label(&self) -> String {
        format!("{} of {}", self.rank.symbol(), self.suit.name())
    }
}

/// Remove one hand card per entry of `used`, matched by [`CardKey`].
/// Returns the removed cards in `used` order; entries with no match are
/// skipped.
pub fn remove_matching(hand: &mut Vec<Card>, used: &[Card]) -> Vec<Card> {
    let mut removed = Vec::with_capacity(used.len());
    for card in used {
        if let Some(idx) = hand.iter().position(|held| held.matches(card)) {
            removed.push(hand.remove(idx));
        }
    }
    removed
}
