//! Card and hand formatting for terminal display.
//!
//! Unicode suit symbols are used where the terminal supports them, with an
//! ASCII fallback (`As`, `Td`) otherwise.
//!
//! ```rust
//! use casino_engine::cards::{Card, Rank, Suit};
//! use casino_cli::formatters::{format_card, format_cards};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert!(format_cards(&[ace]).starts_with("[A"));
//! ```

use casino_engine::cards::{Card, Suit};
use casino_engine::hand::HandRank;
use casino_engine::poker::BotAction;

/// Windows consoles only get symbols inside modern terminals; Unix always does.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Spades => "s",
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
        }
        .to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(card.suit))
}

/// `[A♠ K♦]`, or `[]` for no cards.
pub fn format_cards(cards: &[Card]) -> String {
    let parts: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", parts.join(" "))
}

/// Blackjack hand with its total; a hidden hole card shows as `??`.
pub fn format_blackjack_hand(cards: &[Card], total: u32, hole_hidden: bool) -> String {
    let mut parts: Vec<String> = cards.iter().map(format_card).collect();
    if hole_hidden && parts.len() > 1 {
        parts.truncate(1);
        parts.push("??".to_string());
    }
    format!("[{}] ({})", parts.join(" "), total)
}

pub fn format_hand_rank(hand: &HandRank) -> String {
    format!("{} (rank {})", hand.name(), hand.rank())
}

pub fn format_bot_action(action: BotAction) -> &'static str {
    match action {
        BotAction::Call => "calls",
        BotAction::Fold => "folds",
    }
}
