use crate::card::Card;
use std::fmt::Display;

/// Computes the blackjack total of `cards`. Aces start at 11 and are re-valued to 1, one at a time,
/// while the total exceeds 21. The result is the highest total not above 21 when one exists,
/// otherwise the lowest possible (busted) total.
pub fn hand_value(cards: &[Card]) -> u8 {
    let (total, _) = total_and_soft_aces(cards);
    total
}

fn total_and_soft_aces(cards: &[Card]) -> (u8, u8) {
    let mut total: u8 = 0;
    let mut aces_as_eleven: u8 = 0;
    for card in cards {
        total += card.value();
        if card.is_ace() {
            aces_as_eleven += 1;
        }
    }

    while total > 21 && aces_as_eleven > 0 {
        total -= 10;
        aces_as_eleven -= 1;
    }

    (total, aces_as_eleven)
}

/// Returns true if the final total of `cards` still counts an ace as 11.
pub fn is_soft(cards: &[Card]) -> bool {
    let (_, aces_as_eleven) = total_and_soft_aces(cards);
    aces_as_eleven > 0
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards) > 21
}

/// A natural is 21 on exactly two cards.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == 21
}

/// Two cards may be split when they share a rank. Value alone is not enough, a King and a Queen
/// do not form a pair.
pub fn can_split(cards: &[Card]) -> bool {
    cards.len() == 2 && cards[0].rank == cards[1].rank
}

/// An ordered collection of cards held by the player, a split sub-hand, or the dealer.
/// The value is always derived from the cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Hand {
        Hand { cards }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    pub fn can_split(&self) -> bool {
        can_split(&self.cards)
    }

    /// Removes and returns the second card of a two card hand, used when splitting.
    pub(crate) fn take_second(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{}", cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|r| Card::new(*r, Suit::Hearts)).collect()
    }

    #[test]
    fn test_face_cards() {
        assert_eq!(hand_value(&cards(&[Rank::King, Rank::Queen])), 20);
    }

    #[test]
    fn test_ace_king_is_natural() {
        let hand = cards(&[Rank::Ace, Rank::King]);
        assert_eq!(hand_value(&hand), 21);
        assert!(is_natural(&hand));
        assert!(is_soft(&hand));
    }

    #[test]
    fn test_two_aces_and_nine() {
        let hand = cards(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(hand_value(&hand), 21);
        assert!(is_soft(&hand));
        assert!(!is_natural(&hand));
    }

    #[test]
    fn test_soft_ace_becomes_hard() {
        let soft = cards(&[Rank::Ace, Rank::Six]);
        assert_eq!(hand_value(&soft), 17);
        assert!(is_soft(&soft));

        let hard = cards(&[Rank::Ace, Rank::Six, Rank::Nine]);
        assert_eq!(hand_value(&hard), 16);
        assert!(!is_soft(&hard));
    }

    #[test]
    fn test_bust_returns_minimal_total() {
        let hand = cards(&[
            Rank::Ace,
            Rank::Ace,
            Rank::Ace,
            Rank::Ace,
            Rank::King,
            Rank::Nine,
        ]);
        assert_eq!(hand_value(&hand), 23);
        assert!(is_bust(&hand));

        let hand = cards(&[Rank::King, Rank::Queen, Rank::Two]);
        assert_eq!(hand_value(&hand), 22);
        assert!(is_bust(&hand));
    }

    #[test]
    fn test_value_never_exceeds_21_when_aces_can_save_it() {
        for n in 1..=11 {
            let hand = cards(&vec![Rank::Ace; n]);
            let value = hand_value(&hand);
            assert!(value <= 21, "{} aces valued at {}", n, value);
            assert_eq!(value, n as u8 + 10);
        }
    }

    #[test]
    fn test_can_split_requires_equal_rank() {
        assert!(can_split(&cards(&[Rank::Eight, Rank::Eight])));
        assert!(!can_split(&cards(&[Rank::King, Rank::Queen])));
        assert!(!can_split(&cards(&[Rank::Eight, Rank::Eight, Rank::Two])));
    }

    #[test]
    fn test_hand_value_tracks_cards() {
        let mut hand = Hand::new();
        hand.receive_card(Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(hand.value(), 11);
        hand.receive_card(Card::new(Rank::Five, Suit::Clubs));
        assert_eq!(hand.value(), 16);
        hand.receive_card(Card::new(Rank::Nine, Suit::Clubs));
        assert_eq!(hand.value(), 15);
        assert_eq!(hand.to_string(), "Ace of Clubs, 5 of Clubs, 9 of Clubs");
    }
}
