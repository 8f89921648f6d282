use crate::card::{Card, Rank, Suit};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of cards in a single standard deck.
pub const DECK_SIZE: usize = 52;

/// Builds `num_decks` standard decks and applies a uniformly random permutation to them.
pub fn build_shoe<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Vec<Card> {
    let mut cards = Vec::with_capacity(num_decks * DECK_SIZE);
    for _ in 0..num_decks {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
    }
    cards.shuffle(rng);
    cards
}

/// The working set of cards available to be dealt. The shoe owns the random generator used for
/// shuffling and dealing, so the generator is seeded once for the lifetime of the shoe.
pub struct Shoe<R: Rng> {
    cards: Vec<Card>,
    num_decks: usize,
    reshuffles: u32,
    rng: R,
}

impl<R: Rng> Shoe<R> {
    /// Associated method for building a new shuffled shoe of `num_decks` decks.
    pub fn new(num_decks: usize, mut rng: R) -> Shoe<R> {
        let cards = build_shoe(num_decks, &mut rng);
        Shoe {
            cards,
            num_decks,
            reshuffles: 0,
            rng,
        }
    }

    /// Builds a shoe from `cards` as given, without shuffling them. When the cards run out the shoe
    /// is refilled with `num_decks` freshly shuffled decks like any other shoe.
    pub fn stacked(cards: Vec<Card>, num_decks: usize, rng: R) -> Shoe<R> {
        Shoe {
            cards,
            num_decks,
            reshuffles: 0,
            rng,
        }
    }

    /// Deals a card from a uniformly random position among the remaining cards.
    /// If the shoe is empty it is replaced in place by a freshly built shoe before dealing.
    pub fn deal_one(&mut self) -> Card {
        if self.cards.is_empty() {
            self.reshuffle();
        }
        let idx = self.rng.gen_range(0..self.cards.len());
        let card = self.cards.remove(idx);
        debug!("dealt {} ({} cards remain)", card, self.cards.len());
        card
    }

    fn reshuffle(&mut self) {
        info!("shoe is empty, reshuffling {} decks", self.num_decks);
        self.cards = build_shoe(self.num_decks, &mut self.rng);
        self.reshuffles += 1;
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Number of times the shoe has been refilled since it was created.
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn count_of(&self, card: &Card) -> usize {
        self.cards.iter().filter(|c| *c == card).count()
    }
}
