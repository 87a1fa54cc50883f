use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Starting balance for a fresh session.
pub const STARTING_COINS: u64 = 1000;

/// Largest single wager. Pots and payouts are small multiples of a wager, so
/// capping it keeps all coin arithmetic far from `u64` overflow.
pub const MAX_BET: u64 = 1_000_000_000_000;

/// The single coin balance shared by every game in a session.
///
/// Debits check the balance at the moment they happen, so the balance can
/// never drop below zero no matter how actions are sequenced.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bankroll {
    balance: u64,
}

impl Default for Bankroll {
    fn default() -> Self {
        Self::new(STARTING_COINS)
    }
}

impl Bankroll {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Fails unless `amount` is a positive wager the balance can cover.
    pub fn check_wager(&self, amount: u64) -> Result<(), GameError> {
        if amount == 0 {
            return Err(GameError::ZeroBet);
        }
        if amount > MAX_BET {
            return Err(GameError::BetTooLarge { max: MAX_BET });
        }
        if amount > self.balance {
            return Err(GameError::InsufficientCoins {
                needed: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> Result<(), GameError> {
        self.check_wager(amount)?;
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }
}
