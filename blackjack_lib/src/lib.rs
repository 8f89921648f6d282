//! Rules engine for a single player game of blackjack against an automated dealer.
//!
//! The crate covers the shoe, hand evaluation, the hit/stand advisor, the state machine of a single round,
//! settlement, and a driver that plays a whole session through any `PlayerInterface`.

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod rules;
pub mod session;
pub mod shoe;

pub mod prelude {
    pub use super::card::{Card, Rank, Suit};
    pub use super::error::BlackjackGameError;
    pub use super::game::prelude::*;
    pub use super::hand::{can_split, hand_value, is_bust, is_natural, is_soft, Hand};
    pub use super::rules::{PayoutRatio, TableRules, TableRulesBuilder, MAX_CHIPS};
    pub use super::session::{Session, SessionEnd, SessionSummary};
    pub use super::shoe::{build_shoe, Shoe, DECK_SIZE};
}

pub use prelude::*;
