use crate::HandCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    TurnStarted {
        turn: u32,
    },
    HandDealt {
        count: usize,
    },
    CardsDiscarded {
        count: usize,
        discards_left: u8,
    },
    AttackResolved {
        category: HandCategory,
        target: usize,
        damage: i64,
    },
    ChainLinkResolved {
        index: usize,
        label: String,
        target: usize,
        damage: i64,
    },
    EnemyDefeated {
        enemy: usize,
    },
    CounterAttack {
        enemy: usize,
        hero: usize,
        damage: i64,
    },
    HeroDefeated {
        hero: usize,
    },
    Victory,
    Defeat,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
