//! Bot that ignores its cards and calls with a fixed probability.

use crate::BotOpponent;
use casino_engine::poker::{BotAction, BotView};
use rand::{Rng, RngCore};

/// Calls seven times out of ten.
pub const DEFAULT_CALL_PROBABILITY: f64 = 0.7;

#[derive(Debug, Clone, Copy)]
pub struct RandomBot {
    call_probability: f64,
}

impl RandomBot {
    /// `p` is clamped to `0.0..=1.0`; NaN falls back to the default.
    pub fn new(p: f64) -> Self {
        let p = if p.is_nan() { DEFAULT_CALL_PROBABILITY } else { p };
        Self {
            call_probability: p.clamp(0.0, 1.0),
        }
    }

    pub fn call_probability(&self) -> f64 {
        self.call_probability
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_PROBABILITY)
    }
}

impl BotOpponent for RandomBot {
    fn decide(&self, _view: &BotView<'_>, rng: &mut dyn RngCore) -> BotAction {
        if rng.random_bool(self.call_probability) {
            BotAction::Call
        } else {
            BotAction::Fold
        }
    }

    fn name(&self) -> &str {
        "RandomBot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casino_engine::cards::parse_cards;
    use casino_engine::poker::{Seat, Street};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn count_calls(bot: &RandomBot, n: usize) -> usize {
        let hole = parse_cards("2c 7d").unwrap();
        let view = BotView {
            seat: Seat::Bot1,
            hole: &hole,
            board: &[],
            street: Street::Preflop,
            pot: 30,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        (0..n)
            .filter(|_| bot.decide(&view, &mut rng) == BotAction::Call)
            .count()
    }

    #[test]
    fn calls_roughly_seventy_percent() {
        let calls = count_calls(&RandomBot::default(), 10_000);
        assert!((6_600..=7_400).contains(&calls), "calls = {calls}");
    }

    #[test]
    fn extreme_probabilities_are_deterministic() {
        assert_eq!(count_calls(&RandomBot::new(1.0), 200), 200);
        assert_eq!(count_calls(&RandomBot::new(0.0), 200), 0);
        assert_eq!(RandomBot::new(3.0).call_probability(), 1.0);
    }
}
