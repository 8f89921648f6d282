//! Table rules, i.e. every constant of the table that a session is played under.

use crate::error::BlackjackGameError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest starting bankroll or bet a table accepts. Keeps a doubled bet paid at even money within `u32`.
pub const MAX_CHIPS: u32 = 1_000_000_000;

/// Ratio paid on a winning natural, as numerator and denominator. The default is the usual 3:2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u32,
    pub denominator: u32,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: PayoutRatio = PayoutRatio {
        numerator: 3,
        denominator: 2,
    };

    /// Profit paid on `stake`, fractions of a unit are dropped.
    pub fn profit(&self, stake: u32) -> u32 {
        let profit = (stake as u64 * self.numerator as u64) / self.denominator as u64;
        u32::try_from(profit).unwrap_or(u32::MAX)
    }
}

impl Default for PayoutRatio {
    fn default() -> Self {
        PayoutRatio::THREE_TO_TWO
    }
}

/// Struct for configuring a table. Meant to be built with `TableRules::new()` or deserialized from JSON,
/// fields missing from the JSON take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRules {
    pub num_decks: usize,
    pub starting_bankroll: u32,
    pub min_bet: u32,
    pub max_bet: u32,
    /// The dealer keeps drawing while their total is at or below this value.
    pub dealer_draw_limit: u8,
    pub blackjack_payout: PayoutRatio,
}

impl TableRules {
    /// Associated method for returning a new `TableRulesBuilder` object.
    pub fn new() -> TableRulesBuilder {
        TableRulesBuilder::default()
    }

    /// Reads rules from a JSON file and validates them.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<TableRules, BlackjackGameError> {
        let contents = std::fs::read_to_string(path)?;
        TableRules::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<TableRules, BlackjackGameError> {
        let rules: TableRules = serde_json::from_str(json)
            .map_err(|e| BlackjackGameError::InvalidRules(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), BlackjackGameError> {
        if self.num_decks == 0 {
            return Err(BlackjackGameError::InvalidRules(
                "the shoe needs at least one deck".to_string(),
            ));
        }
        if self.min_bet == 0 {
            return Err(BlackjackGameError::InvalidRules(
                "minimum bet must be positive".to_string(),
            ));
        }
        if self.min_bet > self.max_bet {
            return Err(BlackjackGameError::InvalidRules(format!(
                "minimum bet {} is larger than maximum bet {}",
                self.min_bet, self.max_bet
            )));
        }
        if self.starting_bankroll > MAX_CHIPS || self.max_bet > MAX_CHIPS {
            return Err(BlackjackGameError::InvalidRules(format!(
                "bankroll and bets may not exceed {}", MAX_CHIPS
            )));
        }
        if self.blackjack_payout.denominator == 0 {
            return Err(BlackjackGameError::InvalidRules(
                "blackjack payout denominator must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if `bet` lies within the table limits.
    pub fn bet_in_limits(&self, bet: u32) -> bool {
        self.min_bet <= bet && bet <= self.max_bet
    }
}

impl Default for TableRules {
    /// Returns the standard rules: seven decks, a bankroll of 100 and bets between 1 and 500.
    fn default() -> Self {
        TableRules::new().build()
    }
}

/// Struct to implement builder pattern for `TableRules`
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRulesBuilder {
    num_decks: Option<usize>,
    starting_bankroll: Option<u32>,
    min_bet: Option<u32>,
    max_bet: Option<u32>,
    dealer_draw_limit: Option<u8>,
    blackjack_payout: Option<PayoutRatio>,
}

impl TableRulesBuilder {
    /// Starts the builder from existing rules, so individual values can be overridden.
    pub fn from_rules(rules: TableRules) -> Self {
        TableRulesBuilder {
            num_decks: Some(rules.num_decks),
            starting_bankroll: Some(rules.starting_bankroll),
            min_bet: Some(rules.min_bet),
            max_bet: Some(rules.max_bet),
            dealer_draw_limit: Some(rules.dealer_draw_limit),
            blackjack_payout: Some(rules.blackjack_payout),
        }
    }

    /// Method for choosing the number of decks in the shoe
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for changing the starting bankroll of the player.
    pub fn starting_bankroll(&mut self, bankroll: u32) -> &mut Self {
        self.starting_bankroll = Some(bankroll);
        self
    }

    /// Method for setting the minimum bet for the table
    pub fn min_bet(&mut self, bet: u32) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    /// Method for setting the maximum bet for the table
    pub fn max_bet(&mut self, bet: u32) -> &mut Self {
        self.max_bet = Some(bet);
        self
    }

    /// Method for setting the total the dealer keeps drawing at or below.
    pub fn dealer_draw_limit(&mut self, limit: u8) -> &mut Self {
        self.dealer_draw_limit = Some(limit);
        self
    }

    pub fn blackjack_payout(&mut self, numerator: u32, denominator: u32) -> &mut Self {
        self.blackjack_payout = Some(PayoutRatio {
            numerator,
            denominator,
        });
        self
    }

    /// Method for building a `TableRules` object from the given `TableRulesBuilder` object.
    pub fn build(&mut self) -> TableRules {
        TableRules {
            num_decks: self.num_decks.unwrap_or(7),
            starting_bankroll: self.starting_bankroll.unwrap_or(100),
            min_bet: self.min_bet.unwrap_or(1),
            max_bet: self.max_bet.unwrap_or(500),
            dealer_draw_limit: self.dealer_draw_limit.unwrap_or(17),
            blackjack_payout: self.blackjack_payout.unwrap_or_default(),
        }
    }
}
