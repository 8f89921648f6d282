use crate::card::Card;
use crate::hand::Hand;
use lazy_static::lazy_static;
use std::fmt::Display;
use std::ops::RangeInclusive;

/// The hint shown to the player when they are asked to hit or stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    Hit,
    Stand,
}

impl Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advice::Hit => write!(f, "hit"),
            Advice::Stand => write!(f, "stand"),
        }
    }
}

/// One row of a decision table. A rule applies when the player's total and the value of the dealer's
/// face up card both fall in its ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRule {
    pub player_total: RangeInclusive<u8>,
    pub dealer_up: RangeInclusive<u8>,
    pub advice: Advice,
}

impl AdviceRule {
    pub fn new(
        player_total: RangeInclusive<u8>,
        dealer_up: RangeInclusive<u8>,
        advice: Advice,
    ) -> AdviceRule {
        AdviceRule {
            player_total,
            dealer_up,
            advice,
        }
    }

    fn applies(&self, player_total: u8, dealer_up: u8) -> bool {
        self.player_total.contains(&player_total) && self.dealer_up.contains(&dealer_up)
    }
}

lazy_static! {
    /// Stand on 17 or more, hit on 11 or less, and in between hit only against a dealer showing 7 or
    /// better. An ace showing counts 11.
    static ref HEURISTIC_RULES: Vec<AdviceRule> = vec![
        AdviceRule::new(17..=u8::MAX, 0..=u8::MAX, Advice::Stand),
        AdviceRule::new(0..=11, 0..=u8::MAX, Advice::Hit),
        AdviceRule::new(12..=16, 7..=u8::MAX, Advice::Hit),
        AdviceRule::new(12..=16, 0..=6, Advice::Stand),
    ];
}

/// Trait for a decision strategy, the single required method takes the player's current hand and the
/// dealer's face up card and returns the advised play.
pub trait DecisionStrategy {
    fn advise(&self, hand: &Hand, dealers_up_card: Card) -> Advice;
}

/// A decision strategy backed by a table of `AdviceRule`s, the first matching rule wins.
pub struct HeuristicStrategy {
    rules: &'static [AdviceRule],
}

impl HeuristicStrategy {
    pub fn new() -> HeuristicStrategy {
        HeuristicStrategy {
            rules: HEURISTIC_RULES.as_slice(),
        }
    }

    pub fn rules(&self) -> &[AdviceRule] {
        self.rules
    }

    /// Looks up the advice for a player total against a dealer up card value.
    pub fn lookup(&self, player_total: u8, dealer_up: u8) -> Advice {
        self.rules
            .iter()
            .find(|rule| rule.applies(player_total, dealer_up))
            .map(|rule| rule.advice)
            .unwrap_or(Advice::Stand)
    }
}

impl Default for HeuristicStrategy {
    fn default() -> Self {
        HeuristicStrategy::new()
    }
}

impl DecisionStrategy for HeuristicStrategy {
    fn advise(&self, hand: &Hand, dealers_up_card: Card) -> Advice {
        self.lookup(hand.value(), dealers_up_card.value())
    }
}

/// Convenience wrapper around the fixed heuristic.
pub fn advise(hand: &Hand, dealers_up_card: Card) -> Advice {
    HeuristicStrategy::new().advise(hand, dealers_up_card)
}
