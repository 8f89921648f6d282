use crate::game::settle::Outcome;
use crate::rules::TableRules;
use serde::Serialize;
use std::fmt::Display;

/// The running state of a session that survives from round to round: the bankroll and the
/// cumulative outcome counters. It is handed to each round explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    bankroll: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub rounds_played: u32,
    pub player_blackjacks: u32,
}

impl Session {
    pub fn new(starting_bankroll: u32) -> Session {
        Session {
            bankroll: starting_bankroll,
            wins: 0,
            losses: 0,
            ties: 0,
            rounds_played: 0,
            player_blackjacks: 0,
        }
    }

    pub fn bankroll(&self) -> u32 {
        self.bankroll
    }

    /// Returns true if another round can be started under `rules`.
    pub fn can_continue(&self, rules: &TableRules) -> bool {
        self.bankroll > 0 && self.bankroll >= rules.min_bet
    }

    /// Takes `amount` out of the bankroll. Assumes the caller has already checked that the bankroll
    /// covers the amount.
    pub(crate) fn debit(&mut self, amount: u32) {
        debug_assert!(amount <= self.bankroll);
        self.bankroll -= amount;
    }

    /// Pays `amount` into the bankroll, the bankroll saturates at `u32::MAX`.
    pub(crate) fn credit(&mut self, amount: u32) {
        self.bankroll = self.bankroll.saturating_add(amount);
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWins => self.wins += 1,
            Outcome::DealerWins => self.losses += 1,
            Outcome::Push => self.ties += 1,
        }
    }

    pub fn summary(&self, starting_bankroll: u32, end: SessionEnd) -> SessionSummary {
        SessionSummary {
            starting_bankroll,
            final_bankroll: self.bankroll,
            net: self.bankroll as i64 - starting_bankroll as i64,
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
            rounds_played: self.rounds_played,
            player_blackjacks: self.player_blackjacks,
            end,
        }
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wins: {} Losses: {} Ties: {} Bankroll: {}",
            self.wins, self.losses, self.ties, self.bankroll
        )
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    BankrollExhausted,
    PlayerQuit,
    InputClosed,
}

impl Display for SessionEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEnd::BankrollExhausted => write!(f, "out of funds"),
            SessionEnd::PlayerQuit => write!(f, "player left the table"),
            SessionEnd::InputClosed => write!(f, "input closed"),
        }
    }
}

/// Simple struct for recording the interesting data points of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub starting_bankroll: u32,
    pub final_bankroll: u32,
    pub net: i64,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub rounds_played: u32,
    pub player_blackjacks: u32,
    pub end: SessionEnd,
}

impl Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 60;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 8;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "{:-^WIDTH$}", " session summary ")?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played", self.rounds_played)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands won", self.wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands lost", self.losses)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands pushed", self.ties)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks", self.player_blackjacks
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "starting bankroll", self.starting_bankroll
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "final bankroll", self.final_bankroll)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "net", self.net)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "ended", self.end.to_string())?;
        write!(f, "{}", "-".repeat(WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_credit_and_record() {
        let mut session = Session::new(100);
        session.debit(10);
        assert_eq!(session.bankroll(), 90);
        session.credit(20);
        assert_eq!(session.bankroll(), 110);

        session.record(Outcome::PlayerWins);
        session.record(Outcome::DealerWins);
        session.record(Outcome::DealerWins);
        session.record(Outcome::Push);
        assert_eq!((session.wins, session.losses, session.ties), (1, 2, 1));
        assert_eq!(
            session.to_string(),
            "Wins: 1 Losses: 2 Ties: 1 Bankroll: 110"
        );
    }

    #[test]
    fn test_credit_saturates() {
        let mut session = Session::new(u32::MAX - 5);
        session.credit(1000);
        assert_eq!(session.bankroll(), u32::MAX);
    }

    #[test]
    fn test_can_continue() {
        let rules = TableRules::new().min_bet(5).build();
        assert!(Session::new(5).can_continue(&rules));
        assert!(!Session::new(4).can_continue(&rules));
        assert!(!Session::new(0).can_continue(&TableRules::default()));
    }

    #[test]
    fn test_summary_serializes() {
        let mut session = Session::new(100);
        session.debit(30);
        session.rounds_played = 3;
        let summary = session.summary(100, SessionEnd::PlayerQuit);
        assert_eq!(summary.net, -30);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["final_bankroll"], 70);
        assert_eq!(json["end"], "player_quit");
    }
}
