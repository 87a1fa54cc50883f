use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Bet must be greater than zero")]
    ZeroBet,
    #[error("Insufficient coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },
    #[error("Bet too large: the limit is {max} coins")]
    BetTooLarge { max: u64 },
    #[error("Cannot {action} while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: &'static str,
    },
    #[error("Double down is only allowed on the first two cards")]
    DoubleDownUnavailable,
    #[error("Deck is exhausted")]
    DeckExhausted,
    #[error("Hand evaluation needs 1 to 7 cards, got {0}")]
    InvalidHandSize(usize),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
