//! Error type shared by every command handler.

use std::fmt;

use casino_engine::errors::{GameError, StoreError};

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    Config(String),

    /// A game action the engine rejected
    Game(GameError),

    /// Balance store could not be written
    Store(StoreError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Game(e) => write!(f, "{}", e),
            CliError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Game(e) => Some(e),
            CliError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Game(error)
    }
}

impl From<StoreError> for CliError {
    fn from(error: StoreError) -> Self {
        CliError::Store(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_errors_display_without_prefix() {
        let e: CliError = GameError::ZeroBet.into();
        assert_eq!(e.to_string(), "Bet must be greater than zero");
    }

    #[test]
    fn config_errors_keep_their_message() {
        let e: CliError = ConfigError::Invalid("bad bot".into()).into();
        assert_eq!(e.to_string(), "Configuration error: bad bot");
    }

    #[test]
    fn io_errors_expose_source() {
        use std::error::Error;
        let e: CliError = std::io::Error::other("disk").into();
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("I/O error"));
    }
}
