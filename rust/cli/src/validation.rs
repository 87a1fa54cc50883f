//! Parsing of the commands typed at the blackjack and poker prompts.
//!
//! Input is case-insensitive and surrounding whitespace is ignored. Both
//! tables understand `q`/`quit`, `bet N`, a bare number as a bet, `balance`
//! and `help`. Amounts are passed through unchecked so the engine can reject
//! a zero or unaffordable bet with its own message.

/// Outcome of parsing one line of input.
#[derive(Debug, PartialEq)]
pub enum ParseResult<T> {
    Action(T),
    /// User entered quit command (q or quit)
    Quit,
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackjackCommand {
    Bet(u64),
    Deal,
    Hit,
    Stand,
    Double,
    Balance,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PokerCommand {
    Bet(u64),
    Deal,
    Fold,
    Call,
    Raise,
    Balance,
    Help,
}

/// Parses a blackjack command. An empty line deals, like the space bar.
///
/// ```rust
/// # use casino_cli::validation::{parse_blackjack_command, BlackjackCommand, ParseResult};
/// assert_eq!(parse_blackjack_command("h"), ParseResult::Action(BlackjackCommand::Hit));
/// assert_eq!(parse_blackjack_command("bet 50"), ParseResult::Action(BlackjackCommand::Bet(50)));
/// assert_eq!(parse_blackjack_command(""), ParseResult::Action(BlackjackCommand::Deal));
/// assert_eq!(parse_blackjack_command("quit"), ParseResult::Quit);
/// ```
pub fn parse_blackjack_command(input: &str) -> ParseResult<BlackjackCommand> {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Action(BlackjackCommand::Deal);
    };
    match head {
        "q" | "quit" => ParseResult::Quit,
        "deal" | "space" => ParseResult::Action(BlackjackCommand::Deal),
        "hit" | "h" => ParseResult::Action(BlackjackCommand::Hit),
        "stand" | "s" => ParseResult::Action(BlackjackCommand::Stand),
        "double" | "d" => ParseResult::Action(BlackjackCommand::Double),
        "balance" | "b" => ParseResult::Action(BlackjackCommand::Balance),
        "help" | "?" => ParseResult::Action(BlackjackCommand::Help),
        "bet" => parse_amount(parts.get(1).copied()).map(BlackjackCommand::Bet),
        other => match other.parse::<u64>() {
            Ok(amount) => ParseResult::Action(BlackjackCommand::Bet(amount)),
            Err(_) => unrecognized(other),
        },
    }
}

/// Parses a poker command. An empty line is rejected: folding or calling by
/// accident is too costly.
///
/// ```rust
/// # use casino_cli::validation::{parse_poker_command, PokerCommand, ParseResult};
/// assert_eq!(parse_poker_command("c"), ParseResult::Action(PokerCommand::Call));
/// assert_eq!(parse_poker_command("25"), ParseResult::Action(PokerCommand::Bet(25)));
/// assert!(matches!(parse_poker_command(""), ParseResult::Invalid(_)));
/// ```
pub fn parse_poker_command(input: &str) -> ParseResult<PokerCommand> {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    match head {
        "q" | "quit" => ParseResult::Quit,
        "deal" => ParseResult::Action(PokerCommand::Deal),
        "fold" | "f" => ParseResult::Action(PokerCommand::Fold),
        "call" | "c" | "check" => ParseResult::Action(PokerCommand::Call),
        "raise" | "r" => ParseResult::Action(PokerCommand::Raise),
        "balance" | "b" => ParseResult::Action(PokerCommand::Balance),
        "help" | "?" => ParseResult::Action(PokerCommand::Help),
        "bet" => parse_amount(parts.get(1).copied()).map(PokerCommand::Bet),
        other => match other.parse::<u64>() {
            Ok(amount) => ParseResult::Action(PokerCommand::Bet(amount)),
            Err(_) => unrecognized(other),
        },
    }
}

impl<T> ParseResult<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Action(t) => ParseResult::Action(f(t)),
            ParseResult::Quit => ParseResult::Quit,
            ParseResult::Invalid(msg) => ParseResult::Invalid(msg),
        }
    }
}

fn parse_amount(raw: Option<&str>) -> ParseResult<u64> {
    match raw {
        None => ParseResult::Invalid("Bet requires an amount (e.g., 'bet 100')".to_string()),
        Some(s) => match s.parse::<u64>() {
            Ok(amount) => ParseResult::Action(amount),
            Err(_) => ParseResult::Invalid(format!("Invalid bet amount: {}", s)),
        },
    }
}

fn unrecognized<T>(word: &str) -> ParseResult<T> {
    ParseResult::Invalid(format!(
        "Unrecognized command: {} (type 'help' for the list)",
        word
    ))
}
