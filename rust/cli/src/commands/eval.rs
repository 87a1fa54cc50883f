//! Hand evaluation command: `casino eval As Kd 10h`.

use std::collections::HashSet;
use std::io::Write;

use casino_engine::blackjack::score;
use casino_engine::cards::parse_cards;
use casino_engine::hand::evaluate_cards;

use crate::error::CliError;
use crate::formatters::{format_cards, format_hand_rank};

/// Evaluates 1 to 7 cards as a poker hand and as a blackjack total.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" "))?;
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("Duplicate card: {}", dup)));
    }
    let hand = evaluate_cards(&cards)?;

    writeln!(out, "Cards: {}", format_cards(&cards))?;
    writeln!(out, "Hand: {}", format_hand_rank(&hand))?;
    writeln!(out, "Blackjack total: {}", score(&cards))?;
    Ok(())
}
