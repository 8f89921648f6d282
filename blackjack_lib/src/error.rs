use thiserror::Error;

/// Errors produced while configuring or playing a game of blackjack.
#[derive(Debug, Error)]
pub enum BlackjackGameError {
    #[error("bet of {amount} is outside the table limits of {min} to {max}")]
    InvalidBet { amount: u32, min: u32, max: u32 },
    #[error("bet of {amount} exceeds the bankroll of {bankroll}")]
    InsufficientFunds { amount: u32, bankroll: u32 },
    #[error("invalid input: {0}")]
    UnexpectedInput(String),
    #[error("the current phase requires player input")]
    InputRequired,
    #[error("the round is already complete")]
    RoundComplete,
    #[error("invalid table rules: {0}")]
    InvalidRules(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BlackjackGameError {
    /// Returns true if the error only means the player has to be prompted again. Nothing about the
    /// round or the session has changed when such an error is returned.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BlackjackGameError::InvalidBet { .. }
                | BlackjackGameError::InsufficientFunds { .. }
                | BlackjackGameError::UnexpectedInput(_)
        )
    }
}
