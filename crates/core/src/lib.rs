//! Hand evaluation and damage resolution for the card battler. Keep this
//! crate free of IO and platform concerns.

pub mod battle;
pub mod cards;
pub mod chain;
pub mod combo;
pub mod config;
pub mod deck;
pub mod events;
pub mod hand;
pub mod rng;
pub mod scoring;

pub use battle::*;
pub use cards::*;
pub use chain::*;
pub use combo::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use hand::*;
pub use rng::*;
pub use scoring::*;
