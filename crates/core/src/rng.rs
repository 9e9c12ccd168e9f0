use crate::Card;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    shuffles: u32,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            shuffles: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    pub fn shuffle_cards(&mut self, cards: &mut [Card]) {
        self.shuffles += 1;
        log::debug!(
            "shuffle #{} of {} cards (seed {})",
            self.shuffles,
            cards.len(),
            self.seed
        );
        cards.shuffle(&mut self.rng);
    }
}
