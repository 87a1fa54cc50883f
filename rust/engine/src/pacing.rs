//! Pacing strategies for step-driven game sequences.
//!
//! Game logic never sleeps. Drivers such as
//! [`Blackjack::play_dealer`](crate::blackjack::Blackjack::play_dealer) call
//! [`Pacer::pause`] between visible steps; a terminal front end uses
//! [`FixedDelay`] and tests use [`NoDelay`].

use std::time::Duration;

pub trait Pacer {
    fn pause(&mut self);
}

/// Runs every step back to back.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self) {}
}

/// Sleeps the current thread for a fixed duration per step.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl Pacer for FixedDelay {
    fn pause(&mut self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// Counts pauses instead of sleeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingPacer {
    pub pauses: usize,
}

impl Pacer for CountingPacer {
    fn pause(&mut self) {
        self.pauses += 1;
    }
}
