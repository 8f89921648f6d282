//! A single round of blackjack expressed as a state machine. Each call to `Round::advance` performs exactly one
//! transition, so every step of a round can be driven and inspected without a terminal attached.

use crate::card::Card;
use crate::error::BlackjackGameError;
use crate::game::settle::{determine_winner, payout, Outcome};
use crate::game::strategy::{Advice, DecisionStrategy, HeuristicStrategy};
use crate::hand::Hand;
use crate::rules::TableRules;
use crate::session::Session;
use crate::shoe::Shoe;
use log::{debug, info};
use rand::Rng;
use std::fmt::Display;

/// The phases of a round, in the order they are normally visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bet,
    Deal,
    BlackjackCheck,
    SplitDecision,
    DoubleDownDecision,
    PlayerTurn,
    DealerPlay,
    Settle,
    Complete,
}

/// The input a phase is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Bet { min: u32, max: u32 },
    Split,
    DoubleDown,
    HitOrStand { hand: usize, advice: Advice },
    PlayAgain,
}

impl Prompt {
    /// The input used in place of a player's answer once input has closed. Betting has no fallback,
    /// the round is simply never started.
    pub fn fallback(&self) -> Option<PlayerInput> {
        match self {
            Prompt::Bet { .. } | Prompt::PlayAgain => None,
            Prompt::Split | Prompt::DoubleDown => Some(PlayerInput::No),
            Prompt::HitOrStand { .. } => Some(PlayerInput::Stand),
        }
    }
}

impl Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prompt::Bet { min, max } => write!(f, "Place your bet ({}-{}): ", min, max),
            Prompt::Split => write!(f, "Would you like to split your hand? (y/n): "),
            Prompt::DoubleDown => write!(f, "Would you like to double down? (y/n): "),
            Prompt::HitOrStand { advice, .. } => write!(f, "Player should {} (s/h): ", advice),
            Prompt::PlayAgain => write!(f, "Play again? (y/n): "),
        }
    }
}

/// A parsed answer to a `Prompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Bet(u32),
    Yes,
    No,
    Hit,
    Stand,
}

impl PlayerInput {
    /// Parses a raw token read for `prompt`. Letters are single characters in either case, bets are whole numbers.
    pub fn parse(token: &str, prompt: &Prompt) -> Result<PlayerInput, BlackjackGameError> {
        let token = token.trim();
        match prompt {
            Prompt::Bet { .. } => token.parse::<u32>().map(PlayerInput::Bet).map_err(|_| {
                BlackjackGameError::UnexpectedInput(format!(
                    "'{}' is not a valid bet, please enter a whole number",
                    token
                ))
            }),
            Prompt::Split | Prompt::DoubleDown | Prompt::PlayAgain => match token {
                "y" | "Y" => Ok(PlayerInput::Yes),
                "n" | "N" => Ok(PlayerInput::No),
                _ => Err(BlackjackGameError::UnexpectedInput(
                    "please enter 'y' for yes or 'n' for no".to_string(),
                )),
            },
            Prompt::HitOrStand { .. } => match token {
                "h" | "H" => Ok(PlayerInput::Hit),
                "s" | "S" => Ok(PlayerInput::Stand),
                _ => Err(BlackjackGameError::UnexpectedInput(
                    "please enter 's' to stand or 'h' to hit".to_string(),
                )),
            },
        }
    }
}

/// Things that happened during a transition, in order. The terminal renders these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    Reshuffled,
    BetPlaced { amount: u32 },
    InitialDeal,
    PlayerBlackjack,
    DealerTwentyOne,
    Split,
    DoubledDown,
    PlayerDrew { hand: usize },
    PlayerBust { hand: usize },
    /// `cards` is the number of dealer cards face up once the event happened.
    DealerRevealed { cards: usize },
    DealerDrew { cards: usize },
    Settled,
}

/// One of the player's hands together with what is wagered on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHand {
    hand: Hand,
    stake: u32,
    doubled: bool,
    finished: bool,
}

impl PlayerHand {
    fn new(hand: Hand, stake: u32) -> PlayerHand {
        PlayerHand {
            hand,
            stake,
            doubled: false,
            finished: false,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn stake(&self) -> u32 {
        self.stake
    }

    pub fn doubled(&self) -> bool {
        self.doubled
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// How a single player hand was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    pub outcome: Outcome,
    pub player_total: u8,
    pub dealer_total: u8,
    pub stake: u32,
    pub credited: u32,
    pub natural: bool,
}

pub struct Round {
    phase: Phase,
    rules: TableRules,
    strategy: HeuristicStrategy,
    bet: u32,
    player_hands: Vec<PlayerHand>,
    active: usize,
    dealers_hand: Hand,
    can_double_down: bool,
    is_blackjack: bool,
    dealer_has_21: bool,
    did_double_down: bool,
    did_split: bool,
    results: Vec<HandResult>,
    events: Vec<RoundEvent>,
}

impl Round {
    pub fn new(rules: TableRules) -> Round {
        Round {
            phase: Phase::Bet,
            rules,
            strategy: HeuristicStrategy::new(),
            bet: 0,
            player_hands: vec![PlayerHand::new(Hand::new(), 0)],
            active: 0,
            dealers_hand: Hand::new(),
            can_double_down: true,
            is_blackjack: false,
            dealer_has_21: false,
            did_double_down: false,
            did_split: false,
            results: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Returns the input the current phase needs, or `None` if the phase advances on its own.
    pub fn prompt(&self) -> Option<Prompt> {
        match self.phase {
            Phase::Bet => Some(Prompt::Bet {
                min: self.rules.min_bet,
                max: self.rules.max_bet,
            }),
            Phase::SplitDecision => Some(Prompt::Split),
            Phase::DoubleDownDecision => Some(Prompt::DoubleDown),
            Phase::PlayerTurn => Some(Prompt::HitOrStand {
                hand: self.active,
                advice: self.advice(),
            }),
            _ => None,
        }
    }

    fn advice(&self) -> Advice {
        match self.dealers_up_card() {
            Some(up_card) => self
                .strategy
                .advise(&self.player_hands[self.active].hand, up_card),
            None => Advice::Stand,
        }
    }

    /// Performs one transition. Phases that wait on the player require `input`, all others require `None`.
    /// A returned error leaves the round and `session` untouched.
    pub fn advance<R: Rng>(
        &mut self,
        session: &mut Session,
        shoe: &mut Shoe<R>,
        input: Option<PlayerInput>,
    ) -> Result<Phase, BlackjackGameError> {
        let next = match (self.phase, input) {
            (Phase::Complete, _) => return Err(BlackjackGameError::RoundComplete),
            (Phase::Bet, Some(PlayerInput::Bet(amount))) => self.place_bet(session, amount)?,
            (Phase::SplitDecision, Some(PlayerInput::Yes)) => self.split(session, shoe),
            (Phase::SplitDecision, Some(PlayerInput::No)) => {
                if self.can_double_down {
                    Phase::DoubleDownDecision
                } else {
                    self.next_open_hand()
                }
            }
            (Phase::DoubleDownDecision, Some(PlayerInput::Yes)) => self.double_down(session, shoe),
            (Phase::DoubleDownDecision, Some(PlayerInput::No)) => self.next_open_hand(),
            (Phase::PlayerTurn, Some(PlayerInput::Hit)) => self.hit(shoe),
            (Phase::PlayerTurn, Some(PlayerInput::Stand)) => self.stand(),
            (
                Phase::Bet | Phase::SplitDecision | Phase::DoubleDownDecision | Phase::PlayerTurn,
                None,
            ) => return Err(BlackjackGameError::InputRequired),
            (Phase::Deal, None) => self.deal(shoe),
            (Phase::BlackjackCheck, None) => self.check_blackjack(session),
            (Phase::DealerPlay, None) => self.dealer_play(shoe),
            (Phase::Settle, None) => self.settle(session),
            (phase, Some(input)) => {
                return Err(BlackjackGameError::UnexpectedInput(format!(
                    "{:?} is not accepted during {:?}",
                    input, phase
                )))
            }
        };

        debug!("round moved from {:?} to {:?}", self.phase, next);
        self.phase = next;
        Ok(next)
    }

    fn draw<R: Rng>(&mut self, shoe: &mut Shoe<R>) -> Card {
        if shoe.is_empty() {
            self.events.push(RoundEvent::Reshuffled);
        }
        shoe.deal_one()
    }

    fn place_bet(
        &mut self,
        session: &mut Session,
        amount: u32,
    ) -> Result<Phase, BlackjackGameError> {
        if !self.rules.bet_in_limits(amount) {
            return Err(BlackjackGameError::InvalidBet {
                amount,
                min: self.rules.min_bet,
                max: self.rules.max_bet,
            });
        }
        if amount > session.bankroll() {
            return Err(BlackjackGameError::InsufficientFunds {
                amount,
                bankroll: session.bankroll(),
            });
        }

        session.debit(amount);
        self.bet = amount;
        self.player_hands[0].stake = amount;
        self.events.push(RoundEvent::BetPlaced { amount });
        Ok(Phase::Deal)
    }

    /// Player, dealer, player, dealer.
    fn deal<R: Rng>(&mut self, shoe: &mut Shoe<R>) -> Phase {
        for _ in 0..2 {
            let card = self.draw(shoe);
            self.player_hands[0].hand.receive_card(card);
            let card = self.draw(shoe);
            self.dealers_hand.receive_card(card);
        }
        self.events.push(RoundEvent::InitialDeal);
        Phase::BlackjackCheck
    }

    fn check_blackjack(&mut self, session: &mut Session) -> Phase {
        if self.player_hands[0].hand.value() == 21 {
            self.is_blackjack = true;
            self.can_double_down = false;
            self.player_hands[0].finished = true;
            session.player_blackjacks += 1;
            self.events.push(RoundEvent::PlayerBlackjack);
            return Phase::DealerPlay;
        }
        if self.dealers_hand.value() == 21 {
            self.dealer_has_21 = true;
            self.can_double_down = false;
            self.player_hands[0].finished = true;
            self.events.push(RoundEvent::DealerTwentyOne);
            return Phase::DealerPlay;
        }

        let covers_another_bet = session.bankroll() >= self.bet;
        self.can_double_down = covers_another_bet;
        if covers_another_bet && self.player_hands[0].hand.can_split() {
            Phase::SplitDecision
        } else if self.can_double_down {
            Phase::DoubleDownDecision
        } else {
            self.next_open_hand()
        }
    }

    fn split<R: Rng>(&mut self, session: &mut Session, shoe: &mut Shoe<R>) -> Phase {
        let second = match self.player_hands[0].hand.take_second() {
            Some(card) => card,
            None => return self.next_open_hand(),
        };
        session.debit(self.bet);

        let card = self.draw(shoe);
        self.player_hands[0].hand.receive_card(card);
        let card = self.draw(shoe);
        let split_hand = Hand::from_cards(vec![second, card]);
        self.player_hands.push(PlayerHand::new(split_hand, self.bet));

        self.did_split = true;
        self.can_double_down = false;
        self.active = 0;
        self.events.push(RoundEvent::Split);
        self.next_open_hand()
    }

    fn double_down<R: Rng>(&mut self, session: &mut Session, shoe: &mut Shoe<R>) -> Phase {
        session.debit(self.bet);
        let card = self.draw(shoe);

        let player = &mut self.player_hands[self.active];
        player.stake += self.bet;
        player.doubled = true;
        player.finished = true;
        player.hand.receive_card(card);
        let busted = player.hand.is_bust();

        self.did_double_down = true;
        self.can_double_down = false;
        self.events.push(RoundEvent::DoubledDown);
        if busted {
            self.events.push(RoundEvent::PlayerBust { hand: self.active });
        }
        self.next_open_hand()
    }

    fn hit<R: Rng>(&mut self, shoe: &mut Shoe<R>) -> Phase {
        let card = self.draw(shoe);
        let idx = self.active;
        self.player_hands[idx].hand.receive_card(card);
        self.events.push(RoundEvent::PlayerDrew { hand: idx });
        if self.player_hands[idx].hand.is_bust() {
            self.events.push(RoundEvent::PlayerBust { hand: idx });
        }
        self.next_open_hand()
    }

    fn stand(&mut self) -> Phase {
        self.player_hands[self.active].finished = true;
        self.next_open_hand()
    }

    /// Moves to the first hand that still needs decisions. A hand at 21 or more is finished without
    /// asking. Once every hand is finished the dealer plays.
    fn next_open_hand(&mut self) -> Phase {
        while self.active < self.player_hands.len() {
            let player = &mut self.player_hands[self.active];
            if player.hand.value() >= 21 {
                player.finished = true;
            }
            if !player.finished {
                return Phase::PlayerTurn;
            }
            self.active += 1;
        }
        Phase::DealerPlay
    }

    fn dealer_play<R: Rng>(&mut self, shoe: &mut Shoe<R>) -> Phase {
        if self.dealer_has_21 || self.is_blackjack {
            debug!("dealer does not draw, the round was decided on the deal");
            return Phase::Settle;
        }

        self.events.push(RoundEvent::DealerRevealed {
            cards: self.dealers_hand.len(),
        });
        while self.dealers_hand.value() <= self.rules.dealer_draw_limit {
            let card = self.draw(shoe);
            self.dealers_hand.receive_card(card);
            self.events.push(RoundEvent::DealerDrew {
                cards: self.dealers_hand.len(),
            });
        }
        Phase::Settle
    }

    fn settle(&mut self, session: &mut Session) -> Phase {
        let dealer_total = self.dealers_hand.value();
        for player in self.player_hands.iter() {
            let player_total = player.hand.value();
            let outcome = determine_winner(player_total, dealer_total);
            let natural = self.is_blackjack && !self.did_split;
            let credited = payout(outcome, player.stake, natural, &self.rules);
            session.credit(credited);
            session.record(outcome);
            info!(
                "settled hand: player {} dealer {} -> {:?}, stake {} credited {}",
                player_total, dealer_total, outcome, player.stake, credited
            );
            self.results.push(HandResult {
                outcome,
                player_total,
                dealer_total,
                stake: player.stake,
                credited,
                natural,
            });
        }
        session.rounds_played += 1;
        self.events.push(RoundEvent::Settled);
        Phase::Complete
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn player_hands(&self) -> &[PlayerHand] {
        &self.player_hands
    }

    pub fn active_hand(&self) -> usize {
        self.active
    }

    pub fn dealers_hand(&self) -> &Hand {
        &self.dealers_hand
    }

    /// The dealer's first card, the only one shown before settlement.
    pub fn dealers_up_card(&self) -> Option<Card> {
        self.dealers_hand.cards().first().copied()
    }

    /// True once the dealer's hole card may be shown, i.e. after the dealer has played.
    pub fn dealer_revealed(&self) -> bool {
        matches!(self.phase, Phase::Settle | Phase::Complete)
    }

    pub fn can_double_down(&self) -> bool {
        self.can_double_down
    }

    pub fn is_blackjack(&self) -> bool {
        self.is_blackjack
    }

    pub fn dealer_has_21(&self) -> bool {
        self.dealer_has_21
    }

    pub fn did_double_down(&self) -> bool {
        self.did_double_down
    }

    pub fn did_split(&self) -> bool {
        self.did_split
    }

    pub fn results(&self) -> &[HandResult] {
        &self.results
    }
}
