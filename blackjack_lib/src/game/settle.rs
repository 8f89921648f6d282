//! Deciding who won a hand and what the player is paid for it.

use crate::rules::TableRules;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    DealerWins,
    Push,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::PlayerWins => write!(f, "You win!"),
            Outcome::DealerWins => write!(f, "Dealer wins."),
            Outcome::Push => write!(f, "Push."),
        }
    }
}

/// A busted player loses even if the dealer busts as well. Otherwise a busted dealer loses, and if
/// neither busted the higher total wins.
pub fn determine_winner(player_total: u8, dealer_total: u8) -> Outcome {
    if player_total > 21 {
        Outcome::DealerWins
    } else if dealer_total > 21 || player_total > dealer_total {
        Outcome::PlayerWins
    } else if player_total == dealer_total {
        Outcome::Push
    } else {
        Outcome::DealerWins
    }
}

/// Amount credited back to the bankroll for a hand. `stake` is everything wagered on the hand and
/// has already been taken out of the bankroll, so a doubled hand carries twice the bet.
pub fn payout(outcome: Outcome, stake: u32, natural: bool, rules: &TableRules) -> u32 {
    match outcome {
        Outcome::PlayerWins if natural => {
            stake.saturating_add(rules.blackjack_payout.profit(stake))
        }
        Outcome::PlayerWins => stake.saturating_mul(2),
        Outcome::Push => stake,
        Outcome::DealerWins => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_winner() {
        assert_eq!(determine_winner(20, 19), Outcome::PlayerWins);
        assert_eq!(determine_winner(19, 20), Outcome::DealerWins);
        assert_eq!(determine_winner(18, 18), Outcome::Push);
        for dealer in 2..=21 {
            assert_eq!(determine_winner(22, dealer), Outcome::DealerWins);
        }
        assert_eq!(determine_winner(22, 24), Outcome::DealerWins);
        assert_eq!(determine_winner(12, 22), Outcome::PlayerWins);
    }

    #[test]
    fn test_payouts() {
        let rules = TableRules::default();
        assert_eq!(payout(Outcome::PlayerWins, 10, false, &rules), 20);
        assert_eq!(payout(Outcome::Push, 10, false, &rules), 10);
        assert_eq!(payout(Outcome::DealerWins, 10, false, &rules), 0);
        // doubled stake
        assert_eq!(payout(Outcome::PlayerWins, 20, false, &rules), 40);
        assert_eq!(payout(Outcome::Push, 20, false, &rules), 20);
    }

    #[test]
    fn test_natural_pays_three_to_two_rounded_down() {
        let rules = TableRules::default();
        assert_eq!(payout(Outcome::PlayerWins, 10, true, &rules), 25);
        assert_eq!(payout(Outcome::PlayerWins, 5, true, &rules), 12);
        assert_eq!(payout(Outcome::Push, 10, true, &rules), 10);
    }

    #[test]
    fn test_payouts_saturate() {
        let rules = TableRules::default();
        assert_eq!(payout(Outcome::PlayerWins, u32::MAX, false, &rules), u32::MAX);
        assert_eq!(payout(Outcome::PlayerWins, u32::MAX, true, &rules), u32::MAX);
    }
}
