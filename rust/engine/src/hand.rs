use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::errors::GameError;

/// Poker hand categories, weakest first. The discriminant is the category rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandRank {
    pub fn rank(&self) -> u8 {
        self.category.rank()
    }

    pub fn name(&self) -> &'static str {
        self.category.name()
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best hand made from hole cards plus whatever part of the board is out.
pub fn best_hand(hole: &[Card], board: &[Card]) -> Result<HandRank, GameError> {
    let mut cards = Vec::with_capacity(hole.len() + board.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    evaluate_cards(&cards)
}

/// Evaluates the best five-card hand available in 1 to 7 cards.
///
/// With fewer than five cards only pair-based categories and high card are
/// reachable; straights and flushes always need five cards. Aces play high
/// and also low in the A-2-3-4-5 straight.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandRank, GameError> {
    if cards.is_empty() || cards.len() > 7 {
        return Err(GameError::InvalidHandSize(cards.len()));
    }

    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    let mut by_suit_mask = [0u16; 4];
    for &c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s].push(r);
        by_suit_mask[s] |= 1 << r;
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    // Straight flush
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            return Ok(HandRank {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            });
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return Ok(HandRank {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        });
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return Ok(HandRank {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        });
    }

    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return Ok(HandRank {
            category: Category::Flush,
            kickers: k,
        });
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return Ok(HandRank {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        });
    }

    // Three / Two pair / One pair / High card
    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        // trips + two highest kickers
        let rest: Vec<u8> = pairs.iter().chain(singles.iter()).copied().collect();
        return Ok(HandRank {
            category: Category::ThreeOfAKind,
            kickers: fill_kickers(&[t], rest, 2),
        });
    }
    if pairs.len() >= 2 {
        // a third pair can still play as the kicker
        let rest: Vec<u8> = pairs[2..].iter().chain(singles.iter()).copied().collect();
        return Ok(HandRank {
            category: Category::TwoPair,
            kickers: fill_kickers(&pairs[..2], rest, 1),
        });
    }
    if let Some(&p) = pairs.first() {
        return Ok(HandRank {
            category: Category::OnePair,
            kickers: fill_kickers(&[p], singles, 3),
        });
    }

    Ok(HandRank {
        category: Category::HighCard,
        kickers: fill_kickers(&[], singles, 5),
    })
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    }
}

// `lead` keeps its order; the `kept` highest of `rest` follow it.
fn fill_kickers(lead: &[u8], mut rest: Vec<u8>, kept: usize) -> [u8; 5] {
    rest.sort_unstable_by(|a, b| b.cmp(a));
    let mut k = [0u8; 5];
    for (slot, v) in k.iter_mut().zip(lead.iter().chain(rest.iter().take(kept))) {
        *slot = *v;
    }
    k
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // add Ace-low if Ace present
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let &t = trips.first()?;
    if trips.len() >= 2 {
        return Some((t, trips[1]));
    }
    pairs.first().map(|&p| (t, p))
}

// Each list is ordered high -> low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
