//! # casino-engine: Blackjack and Hold'em core
//!
//! Card model, seeded deck, blackjack scoring and table, poker hand
//! evaluation, a three-handed poker table, and the bankroll/session state
//! that ties them together. No I/O happens here except the optional
//! key-value [`store`] and the JSONL round [`logger`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), parsing and deck order
//! - [`deck`] - Seeded Fisher–Yates shuffling with ChaCha20, draws from the end
//! - [`blackjack`] - Scoring with soft aces and the blackjack state machine
//! - [`hand`] - Poker hand evaluation over 1 to 7 cards, kicker tie-breaks
//! - [`poker`] - Player vs two bots, streets, folds and showdown
//! - [`bankroll`] - Checked coin balance
//! - [`session`] - One context object owning bankroll and both tables
//! - [`pacing`] - Pluggable delays for step-driven sequences
//! - [`store`] - Persisted balance and daily bonus
//! - [`logger`] - RoundRecord JSONL history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use casino_engine::cards::parse_cards;
//! use casino_engine::hand::{evaluate_cards, Category};
//!
//! let cards = parse_cards("5s 6s 7s 8s 9s").unwrap();
//! let rank = evaluate_cards(&cards).unwrap();
//! assert_eq!(rank.category, Category::StraightFlush);
//! assert_eq!(rank.rank(), 8);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Every shuffle is reproducible from a seed:
//!
//! ```rust
//! use casino_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.cards(), b.cards());
//! ```

pub mod bankroll;
pub mod blackjack;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod pacing;
pub mod poker;
pub mod session;
pub mod store;
