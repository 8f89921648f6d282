//! Terminal front end: renders rounds as text and reads the player's answers one line at a time.

use blackjack_lib::prelude::*;
use std::io::{self, BufRead, Write};

/// A `PlayerInterface` over any line based reader and writer, normally stdin and stdout.
pub struct ConsoleInterface<In: BufRead, Out: Write> {
    input: In,
    output: Out,
}

impl<In: BufRead, Out: Write> ConsoleInterface<In, Out> {
    pub fn new(input: In, output: Out) -> Self {
        ConsoleInterface { input, output }
    }

    pub fn into_output(self) -> Out {
        self.output
    }

    fn write_player_hands(&mut self, round: &Round) -> io::Result<()> {
        let hands = round.player_hands();
        for (i, player) in hands.iter().enumerate() {
            let label = if hands.len() > 1 {
                format!("Your Hand {}", i + 1)
            } else {
                "Your Hand".to_string()
            };
            writeln!(
                self.output,
                "{}: {}, Total: {}",
                label,
                player.hand(),
                player.hand().value()
            )?;
        }
        Ok(())
    }

    fn write_dealers_hand(&mut self, round: &Round) -> io::Result<()> {
        let dealer = round.dealers_hand();
        if round.dealer_revealed() {
            writeln!(self.output, "Dealer's Hand: {}, Total: {}", dealer, dealer.value())
        } else {
            match round.dealers_up_card() {
                Some(card) => writeln!(
                    self.output,
                    "Dealer's Hand: {}, [Hidden Card], Total: ??",
                    card
                ),
                None => Ok(()),
            }
        }
    }

    /// Writes the first `cards` cards of the dealer's hand, i.e. the hand as it stood when an
    /// event of the dealer's turn happened.
    fn write_dealers_cards(&mut self, round: &Round, cards: usize) -> io::Result<()> {
        let dealt = round.dealers_hand().cards();
        let shown = Hand::from_cards(dealt[..cards.min(dealt.len())].to_vec());
        writeln!(self.output, "Dealer's Hand: {}, Total: {}", shown, shown.value())
    }

    fn write_table(&mut self, round: &Round) -> io::Result<()> {
        writeln!(self.output)?;
        self.write_player_hands(round)?;
        self.write_dealers_hand(round)
    }

    fn write_results(&mut self, round: &Round) -> io::Result<()> {
        let split = round.player_hands().len() > 1;
        for (i, result) in round.results().iter().enumerate() {
            let net = result.credited as i64 - result.stake as i64;
            if split {
                write!(self.output, "Hand {}: ", i + 1)?;
            }
            match result.outcome {
                Outcome::PlayerWins if result.natural => {
                    writeln!(self.output, "Blackjack pays! (+{})", net)?
                }
                Outcome::PlayerWins if result.dealer_total > 21 => {
                    writeln!(self.output, "Dealer busts. You win! (+{})", net)?
                }
                Outcome::PlayerWins => writeln!(self.output, "{} (+{})", result.outcome, net)?,
                Outcome::Push => {
                    writeln!(self.output, "{} Your stake is returned.", result.outcome)?
                }
                Outcome::DealerWins => writeln!(self.output, "{} ({})", result.outcome, net)?,
            }
        }
        Ok(())
    }
}

impl<In: BufRead, Out: Write> PlayerInterface for ConsoleInterface<In, Out> {
    fn read_token(&mut self, prompt: &Prompt) -> io::Result<Option<String>> {
        write!(self.output, "\n{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn show_event(&mut self, event: &RoundEvent, round: &Round) -> io::Result<()> {
        match event {
            RoundEvent::Reshuffled => writeln!(self.output, "\n\nDeck is empty. Reshuffling...\n"),
            RoundEvent::BetPlaced { amount } => writeln!(self.output, "Bet placed: {}", amount),
            RoundEvent::InitialDeal => self.write_table(round),
            RoundEvent::PlayerBlackjack => writeln!(self.output, "\nBlack Jack!\n"),
            RoundEvent::DealerTwentyOne => writeln!(self.output, "\nDealer has 21!\n"),
            RoundEvent::Split => {
                writeln!(self.output, "\nHand split into two hands.")?;
                self.write_table(round)
            }
            RoundEvent::DoubledDown => {
                writeln!(self.output, "\nDoubled down, one more card.")?;
                self.write_player_hands(round)
            }
            RoundEvent::PlayerDrew { .. } => self.write_table(round),
            RoundEvent::PlayerBust { hand } => {
                if round.player_hands().len() > 1 {
                    writeln!(self.output, "\nHand {} busts!\n", hand + 1)
                } else {
                    writeln!(self.output, "\nYou bust!\n")
                }
            }
            RoundEvent::DealerRevealed { cards } => {
                writeln!(self.output, "\nDealer reveals the hidden card.")?;
                self.write_dealers_cards(round, *cards)
            }
            RoundEvent::DealerDrew { cards } => {
                writeln!(self.output, "Dealer draws.")?;
                self.write_dealers_cards(round, *cards)
            }
            RoundEvent::Settled => {
                writeln!(self.output)?;
                self.write_dealers_hand(round)?;
                self.write_results(round)
            }
        }
    }

    fn show_error(&mut self, error: &BlackjackGameError) -> io::Result<()> {
        writeln!(self.output, "{}", error)
    }

    fn show_session(&mut self, session: &Session) -> io::Result<()> {
        writeln!(self.output, "\n{}", session)
    }
}
