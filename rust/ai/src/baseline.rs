//! Rule-based bot for the bot seats.
//!
//! Rates its holding on a 0-10 scale and folds when the rating falls under
//! the threshold for the current street. Calls are free at this table, so
//! there are no pot odds to weigh: the only question is whether the hand is
//! worth showing down.

use crate::BotOpponent;
use casino_engine::cards::Card;
use casino_engine::hand::{Category, best_hand};
use casino_engine::poker::{BotAction, BotView, Street};
use rand::RngCore;

/// Deterministic bot: the same cards always get the same answer.
///
/// # Strategy
///
/// **Preflop:** pairs, broadway cards, suited aces and suited connectors
/// continue; weak offsuit holdings (rating 2 or less) fold.
///
/// **Postflop:** the best made hand with the visible board is rated. On the
/// flop anything but a low unpaired hand continues; from the turn on the bot
/// needs at least a pair.
///
/// # Example
///
/// ```rust
/// use casino_ai::baseline::BaselineBot;
/// use casino_ai::BotOpponent;
///
/// let bot = BaselineBot::new();
/// assert_eq!(bot.name(), "BaselineBot");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    /// Preflop rating on a scale of 0-10.
    ///
    /// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
    /// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
    /// - 5-6: Medium hands (88-77, AJ, suited connectors)
    /// - 3-4: Marginal hands (66-22, Ax, broadway)
    /// - 0-2: Weak hands (offsuit low cards)
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let r1 = hole[0].rank.value();
        let r2 = hole[1].rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Postflop rating on a scale of 0-10 from the best made hand.
    fn postflop_strength(hole: &[Card], board: &[Card]) -> Option<u8> {
        let hand = best_hand(hole, board).ok()?;
        let base = match hand.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker_boost = u8::from(hand.kickers[0] >= 12);
        Some((base + kicker_boost).min(10))
    }

    fn threshold(street: Street) -> u8 {
        match street {
            Street::Preflop => 3,
            Street::Flop => 2,
            Street::Turn | Street::River => 3,
        }
    }

    fn strength(view: &BotView<'_>) -> u8 {
        let preflop = match view.hole {
            [a, b] => Self::preflop_strength([*a, *b]),
            _ => 0,
        };
        if view.street == Street::Preflop {
            return preflop;
        }
        Self::postflop_strength(view.hole, view.board).unwrap_or(preflop)
    }
}

impl BotOpponent for BaselineBot {
    fn decide(&self, view: &BotView<'_>, _rng: &mut dyn RngCore) -> BotAction {
        if Self::strength(view) >= Self::threshold(view.street) {
            BotAction::Call
        } else {
            BotAction::Fold
        }
    }

    fn name(&self) -> &str {
        "BaselineBot"
    }
}
