//! # casino-ai: Poker bots
//!
//! Decision makers for the two bot seats at the Hold'em table. A bot only
//! ever chooses between calling and folding; all coin movement stays in the
//! engine.
//!
//! ## Core Components
//!
//! - [`BotOpponent`] - Trait every bot strategy implements
//! - [`random`] - Coin-flip bot that calls most of the time
//! - [`baseline`] - Rule-based bot that folds weak holdings
//! - [`create_bot`] - Factory by kind name
//! - [`Bots`] - Two opponents plus a seeded RNG, plugged into the engine
//!
//! ## Quick Start
//!
//! ```rust
//! use casino_ai::Bots;
//! use casino_engine::bankroll::Bankroll;
//! use casino_engine::poker::{Phase, PokerTable};
//!
//! let mut bots = Bots::new("baseline", 42).unwrap();
//! let mut bank = Bankroll::new(1000);
//! let mut table = PokerTable::new(42);
//! table.set_bet(10, &bank).unwrap();
//! table.deal(&mut bank).unwrap();
//! while table.phase() != Phase::Settled {
//!     table.call(&mut bank, &mut bots).unwrap();
//! }
//! ```

use casino_engine::poker::{BotAction, BotDecider, BotView, Seat};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub mod baseline;
pub mod random;

/// Bot kinds accepted by [`create_bot`].
pub const BOT_KINDS: [&str; 2] = ["random", "baseline"];

/// Interface for a bot seat's decision making.
///
/// # Example Implementation
///
/// ```rust
/// use casino_ai::BotOpponent;
/// use casino_engine::poker::{BotAction, BotView};
/// use rand::RngCore;
///
/// struct Stubborn;
///
/// impl BotOpponent for Stubborn {
///     fn decide(&self, _view: &BotView<'_>, _rng: &mut dyn RngCore) -> BotAction {
///         BotAction::Call
///     }
///
///     fn name(&self) -> &str {
///         "Stubborn"
///     }
/// }
/// ```
pub trait BotOpponent: Send + Sync {
    /// Chooses to stay in or fold, given what the seat can see.
    ///
    /// Randomness comes only from `rng` so that a seeded session replays.
    fn decide(&self, view: &BotView<'_>, rng: &mut dyn RngCore) -> BotAction;

    fn name(&self) -> &str;
}

/// Creates a bot by kind name.
///
/// ```rust
/// use casino_ai::create_bot;
///
/// assert_eq!(create_bot("random").unwrap().name(), "RandomBot");
/// assert!(create_bot("shark").is_err());
/// ```
pub fn create_bot(kind: &str) -> Result<Box<dyn BotOpponent>, String> {
    match kind {
        "random" => Ok(Box::new(random::RandomBot::default())),
        "baseline" => Ok(Box::new(baseline::BaselineBot::new())),
        other => Err(format!(
            "Unknown bot kind: {} (expected one of: {})",
            other,
            BOT_KINDS.join(", ")
        )),
    }
}

/// The two bot seats of a table, sharing one seeded RNG.
pub struct Bots {
    seats: [Box<dyn BotOpponent>; 2],
    rng: ChaCha20Rng,
}

impl Bots {
    /// Both seats play the same strategy.
    pub fn new(kind: &str, seed: u64) -> Result<Self, String> {
        Ok(Self::with_opponents(
            [create_bot(kind)?, create_bot(kind)?],
            seed,
        ))
    }

    pub fn with_opponents(seats: [Box<dyn BotOpponent>; 2], seed: u64) -> Self {
        Self {
            seats,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn name_of(&self, seat: Seat) -> Option<&str> {
        match seat {
            Seat::Player => None,
            Seat::Bot1 => Some(self.seats[0].name()),
            Seat::Bot2 => Some(self.seats[1].name()),
        }
    }
}

impl BotDecider for Bots {
    fn decide(&mut self, view: &BotView<'_>) -> BotAction {
        let bot = match view.seat {
            Seat::Bot2 => &self.seats[1],
            // the player seat is never asked; treat it like the first bot
            Seat::Bot1 | Seat::Player => &self.seats[0],
        };
        bot.decide(view, &mut self.rng)
    }
}
