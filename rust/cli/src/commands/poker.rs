//! # Poker Command
//!
//! Three-handed Texas Hold'em against two bots on stdin/stdout.
//!
//! `bet N` sets the per-player bet and funds the pot with three antes; `deal`
//! takes the player's bet and deals the hole cards. Each `call` or `raise`
//! lets the bots act and then turns the next street; the river closes with a
//! showdown. `fold` hands the pot to the bots still in.

use std::io::{BufRead, Write};

use casino_ai::Bots;
use casino_engine::pacing::Pacer;
use casino_engine::poker::{Phase, PokerReport, PokerSettlement, Seat, SettleReason};

use super::table::{Table, TableOptions};
use crate::cli::BotKind;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_bot_action, format_cards, format_hand_rank};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, PokerCommand, parse_poker_command};

/// Keeps the bot RNG stream apart from the deck shuffles.
const BOT_SEED_SALT: u64 = 0xB075_5EED_0000_0001;

const HELP: &str = "\
Commands:
  bet N        set the bet; every seat antes N into the pot
  deal         deal a hand, repeating the last bet
  call, c      stay in and see the next street
  raise, r     put your bet in again, then see the next street
  fold, f      give up the hand
  balance      show your coins
  q            save and leave";

pub fn handle_poker_command(
    opts: TableOptions,
    bot: Option<BotKind>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let config = config::load()?;
    let kind = bot.map_or(config.bot.as_str(), |b| b.as_str());
    let mut table = Table::open(&opts, &config, out, err)?;
    let mut bots =
        Bots::new(kind, table.session.seed() ^ BOT_SEED_SALT).map_err(CliError::Config)?;
    writeln!(
        out,
        "Opponents: {} ({}), {} ({}). Type 'help' for commands.",
        Seat::Bot1.name(),
        bots.name_of(Seat::Bot1).unwrap_or("bot"),
        Seat::Bot2.name(),
        bots.name_of(Seat::Bot2).unwrap_or("bot"),
    )?;

    let mut last_bet: Option<u64> = None;
    loop {
        table.tick(err)?;
        write!(out, "{}", prompt(&table))?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        let command = match parse_poker_command(&line) {
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
            ParseResult::Action(c) => c,
        };
        match apply(&mut table, &mut bots, command, &mut last_bet, out, err) {
            Ok(()) => {}
            Err(CliError::Game(e)) => ui::write_error(err, &e.to_string())?,
            Err(CliError::InvalidInput(msg)) => ui::write_error(err, &msg)?,
            Err(other) => return Err(other),
        }
    }
    table.close(out)
}

fn prompt(table: &Table) -> String {
    let poker = table.session.poker();
    match poker.phase() {
        Phase::Betting(street) => format!(
            "{} | pot {} | [f]old, [c]all, [r]aise > ",
            street.name(),
            poker.pot()
        ),
        Phase::Ante => "deal > ".to_string(),
        Phase::Idle | Phase::Settled => "bet N, deal, q > ".to_string(),
    }
}

fn apply(
    table: &mut Table,
    bots: &mut Bots,
    command: PokerCommand,
    last_bet: &mut Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        PokerCommand::Bet(amount) => {
            table.session.set_poker_bet(amount)?;
            *last_bet = Some(amount);
            writeln!(out, "Bet: {} (pot {})", amount, table.session.poker().pot())?;
        }
        PokerCommand::Deal => {
            if matches!(table.session.poker().phase(), Phase::Idle | Phase::Settled) {
                let Some(amount) = *last_bet else {
                    return Err(CliError::InvalidInput(
                        "Place a bet first (e.g., 'bet 50')".to_string(),
                    ));
                };
                table.session.set_poker_bet(amount)?;
            }
            table.session.deal_poker()?;
            let poker = table.session.poker();
            writeln!(out, "Your cards: {}", format_cards(poker.hole(Seat::Player)))?;
            writeln!(out, "Pot: {}", poker.pot())?;
        }
        PokerCommand::Call => {
            let report = table.session.call(bots)?;
            writeln!(out, "You call.")?;
            show_report(table, report, out, err)?;
        }
        PokerCommand::Raise => {
            let report = table.session.raise(bots)?;
            writeln!(out, "You raise. Pot: {}", table.session.poker().pot())?;
            show_report(table, report, out, err)?;
        }
        PokerCommand::Fold => {
            let settlement = table.session.fold()?;
            writeln!(out, "You fold.")?;
            finish(table, &settlement, out, err)?;
        }
        PokerCommand::Balance => writeln!(out, "Balance: {} coins", table.session.balance())?,
        PokerCommand::Help => writeln!(out, "{}", HELP)?,
    }
    Ok(())
}

fn show_report(
    table: &mut Table,
    report: PokerReport,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    for (seat, action) in &report.bot_actions {
        writeln!(out, "{} {}.", seat.name(), format_bot_action(*action))?;
    }
    if let Some(street) = report.street {
        table.pacer.pause();
        let poker = table.session.poker();
        writeln!(
            out,
            "{}: {} (board {})",
            street.name(),
            format_cards(&report.revealed),
            format_cards(poker.board())
        )?;
        if let Some(hand) = poker.player_hand() {
            writeln!(out, "Your hand: {}", format_hand_rank(&hand))?;
        }
    }
    if let Some(settlement) = &report.settlement {
        finish(table, settlement, out, err)?;
    }
    Ok(())
}

fn finish(
    table: &mut Table,
    settlement: &PokerSettlement,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match settlement.reason {
        SettleReason::Showdown => {
            table.pacer.pause();
            writeln!(out, "Showdown:")?;
            let poker = table.session.poker();
            for (seat, hand) in &settlement.hands {
                writeln!(
                    out,
                    "  {:<6} {} {}",
                    seat.name(),
                    format_cards(poker.hole(*seat)),
                    format_hand_rank(hand)
                )?;
            }
        }
        SettleReason::BotsFolded => writeln!(out, "Both bots folded.")?,
        SettleReason::PlayerFolded => {}
    }

    let names: Vec<&str> = settlement.winners.iter().map(|s| s.name()).collect();
    match names.len() {
        0 => writeln!(out, "Nobody contests the pot.")?,
        1 => writeln!(out, "Winner: {}", names[0])?,
        _ => writeln!(out, "Split pot: {}", names.join(", "))?,
    }
    writeln!(
        out,
        "Pot: {}. You receive: {}",
        settlement.pot, settlement.player_payout
    )?;
    writeln!(out, "Balance: {} coins", table.session.balance())?;
    table.record_poker(settlement, err)
}
