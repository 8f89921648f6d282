//! Module that focuses on playing a session of blackjack. In otherwords,
//!  this module provides the round state machine, the decision strategy, settlement, and the driver that ties them to a player.

pub mod round;
pub mod settle;
pub mod strategy;
pub mod prelude {
    pub use super::round::{HandResult, Phase, PlayerHand, PlayerInput, Prompt, Round, RoundEvent};
    pub use super::settle::{determine_winner, payout, Outcome};
    pub use super::strategy::{advise, Advice, AdviceRule, DecisionStrategy, HeuristicStrategy};
    pub use super::{BlackjackGame, PlayerInterface, RoundEnd};
}

use crate::error::BlackjackGameError;
use crate::rules::TableRules;
use crate::session::{Session, SessionEnd, SessionSummary};
use crate::shoe::Shoe;
use log::{debug, info};
use prelude::*;
use rand::Rng;
use std::io;

/// Trait for whatever sits between the game and the person playing it. The game asks it for raw tokens
/// and tells it what happened, it never parses or decides anything itself.
pub trait PlayerInterface {
    /// Reads one token in answer to `prompt`. Returns `Ok(None)` once input has closed.
    fn read_token(&mut self, prompt: &Prompt) -> io::Result<Option<String>>;

    /// Called for every event of a round, after the transition that produced it.
    fn show_event(&mut self, event: &RoundEvent, round: &Round) -> io::Result<()>;

    /// Called when the player's answer was rejected, the same prompt follows.
    fn show_error(&mut self, error: &BlackjackGameError) -> io::Result<()>;

    /// Called after every round with the running session totals.
    fn show_session(&mut self, session: &Session) -> io::Result<()>;
}

/// How a call to `BlackjackGame::play_round()` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Complete,
    /// Input closed before a bet was placed, no round was played.
    NotStarted,
    /// Input closed after the bet, the round was finished by standing on every remaining decision.
    InputClosed,
}

/// Struct that provides the functionality to play a session of blackjack against the dealer.
/// The game owns the shoe and the session, a round only borrows them while it is being played.
pub struct BlackjackGame<I: PlayerInterface, R: Rng> {
    rules: TableRules,
    session: Session,
    shoe: Shoe<R>,
    interface: I,
}

impl<I: PlayerInterface, R: Rng> BlackjackGame<I, R> {
    /// Associated method for building a new game. `rng` is used for every shuffle and deal of the session.
    pub fn new(rules: TableRules, rng: R, interface: I) -> BlackjackGame<I, R> {
        let shoe = Shoe::new(rules.num_decks, rng);
        BlackjackGame::with_shoe(rules, shoe, interface)
    }

    /// Builds a game around an existing shoe.
    pub fn with_shoe(rules: TableRules, shoe: Shoe<R>, interface: I) -> BlackjackGame<I, R> {
        BlackjackGame {
            rules,
            session: Session::new(rules.starting_bankroll),
            shoe,
            interface,
        }
    }

    /// Plays rounds until the bankroll can no longer cover the table minimum, the player declines
    /// to play again, or input closes. Returns a summary of the session.
    pub fn run(&mut self) -> Result<SessionSummary, BlackjackGameError> {
        let end = loop {
            if !self.session.can_continue(&self.rules) {
                break SessionEnd::BankrollExhausted;
            }

            match self.play_round()? {
                RoundEnd::NotStarted => break SessionEnd::InputClosed,
                RoundEnd::InputClosed => {
                    self.interface.show_session(&self.session)?;
                    break SessionEnd::InputClosed;
                }
                RoundEnd::Complete => self.interface.show_session(&self.session)?,
            }

            if !self.session.can_continue(&self.rules) {
                break SessionEnd::BankrollExhausted;
            }

            // Anything but an explicit yes ends the session
            match self.interface.read_token(&Prompt::PlayAgain)? {
                Some(token) if matches!(token.trim(), "y" | "Y") => continue,
                Some(_) => break SessionEnd::PlayerQuit,
                None => break SessionEnd::InputClosed,
            }
        };

        info!("session ended: {}", end);
        Ok(self.session.summary(self.rules.starting_bankroll, end))
    }

    /// Plays a single round to completion, prompting through the interface whenever the round
    /// waits on the player. Rejected answers are reported and asked again.
    pub fn play_round(&mut self) -> Result<RoundEnd, BlackjackGameError> {
        let mut round = Round::new(self.rules);
        let mut input_closed = false;

        while !round.is_complete() {
            let input = match round.prompt() {
                Some(prompt) if input_closed => prompt.fallback(),
                Some(prompt) => match self.interface.read_token(&prompt)? {
                    Some(token) => match PlayerInput::parse(&token, &prompt) {
                        Ok(input) => Some(input),
                        Err(e) => {
                            self.interface.show_error(&e)?;
                            continue;
                        }
                    },
                    None => {
                        debug!("input closed while waiting for {:?}", prompt);
                        input_closed = true;
                        match prompt.fallback() {
                            Some(input) => Some(input),
                            None => return Ok(RoundEnd::NotStarted),
                        }
                    }
                },
                None => None,
            };

            match round.advance(&mut self.session, &mut self.shoe, input) {
                Ok(_) => {}
                Err(e) if e.is_recoverable() => self.interface.show_error(&e)?,
                Err(e) => return Err(e),
            }

            for event in round.take_events() {
                self.interface.show_event(&event, &round)?;
            }
        }

        if input_closed {
            Ok(RoundEnd::InputClosed)
        } else {
            Ok(RoundEnd::Complete)
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn shoe(&self) -> &Shoe<R> {
        &self.shoe
    }

    pub fn interface(&self) -> &I {
        &self.interface
    }

    pub fn into_interface(self) -> I {
        self.interface
    }
}
