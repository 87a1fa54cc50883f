//! # Blackjack Command
//!
//! Interactive blackjack against the dealer on stdin/stdout.
//!
//! A round is `bet N`, then `deal` (or an empty line), then hit, stand or
//! double. After the first round `deal` re-places the previous bet. Rejected
//! actions print a message and the table keeps going; `q` or end of input
//! saves the balance and leaves.

use std::io::{BufRead, Write};

use casino_engine::blackjack::{DealerStep, Phase, Settlement};
use casino_engine::pacing::Pacer;

use super::table::{Table, TableOptions};
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_blackjack_hand, format_card};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{BlackjackCommand, ParseResult, parse_blackjack_command};

const HELP: &str = "\
Commands:
  bet N        wager N coins (a bare number works too)
  deal         deal a round; empty line also deals, repeating the last bet
  hit, h       take a card
  stand, s     let the dealer play
  double, d    double the bet, take one card, then stand
  balance      show your coins
  q            save and leave";

/// Runs the blackjack table until the player quits or input ends.
pub fn handle_blackjack_command(
    opts: TableOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let config = config::load()?;
    let mut table = Table::open(&opts, &config, out, err)?;
    writeln!(out, "Blackjack pays 3:2. Dealer stands on 17. Type 'help' for commands.")?;

    let mut last_bet: Option<u64> = None;
    loop {
        table.tick(err)?;
        write!(out, "{}", prompt(&table))?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        let command = match parse_blackjack_command(&line) {
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
            ParseResult::Action(c) => c,
        };
        match apply(&mut table, command, &mut last_bet, out, err) {
            Ok(()) => {}
            Err(CliError::Game(e)) => ui::write_error(err, &e.to_string())?,
            Err(CliError::InvalidInput(msg)) => ui::write_error(err, &msg)?,
            Err(other) => return Err(other),
        }
    }
    table.close(out)
}

fn prompt(table: &Table) -> &'static str {
    let bj = table.session.blackjack();
    match bj.phase() {
        Phase::PlayerTurn if bj.can_double_down(table.session.bankroll()) => {
            "[h]it, [s]tand, [d]ouble > "
        }
        Phase::PlayerTurn => "[h]it, [s]tand > ",
        Phase::BetPlaced => "deal > ",
        _ => "bet N, deal, q > ",
    }
}

fn apply(
    table: &mut Table,
    command: BlackjackCommand,
    last_bet: &mut Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        BlackjackCommand::Bet(amount) => {
            table.session.place_bet(amount)?;
            *last_bet = Some(amount);
            writeln!(out, "Bet: {}", amount)?;
        }
        BlackjackCommand::Deal => {
            if matches!(
                table.session.blackjack().phase(),
                Phase::Idle | Phase::Settled
            ) {
                let Some(amount) = *last_bet else {
                    return Err(CliError::InvalidInput(
                        "Place a bet first (e.g., 'bet 100')".to_string(),
                    ));
                };
                table.session.place_bet(amount)?;
            }
            let settled = table.session.deal()?;
            writeln!(out, "Bet: {}", table.session.blackjack().bet())?;
            show_hands(table, out)?;
            after_player_action(table, settled, out, err)?;
        }
        BlackjackCommand::Hit => {
            let settled = table.session.hit()?;
            if let Some(card) = table.session.blackjack().player_hand().last() {
                writeln!(out, "You draw {}", format_card(card))?;
            }
            show_hands(table, out)?;
            after_player_action(table, settled, out, err)?;
        }
        BlackjackCommand::Stand => {
            table.session.stand()?;
            run_dealer(table, out, err)?;
        }
        BlackjackCommand::Double => {
            let settled = table.session.double_down()?;
            writeln!(out, "Doubled to {}", table.session.blackjack().bet())?;
            show_hands(table, out)?;
            after_player_action(table, settled, out, err)?;
        }
        BlackjackCommand::Balance => writeln!(out, "Balance: {} coins", table.session.balance())?,
        BlackjackCommand::Help => writeln!(out, "{}", HELP)?,
    }
    Ok(())
}

fn after_player_action(
    table: &mut Table,
    settled: Option<Settlement>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match settled {
        Some(settlement) => finish(table, settlement, out, err),
        None if table.session.blackjack().phase() == Phase::DealerTurn => {
            run_dealer(table, out, err)
        }
        None => Ok(()),
    }
}

/// Reveals the hole card, then draws one card per pause until settled.
fn run_dealer(table: &mut Table, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let bj = table.session.blackjack();
    writeln!(
        out,
        "Dealer reveals: {}",
        format_blackjack_hand(bj.dealer_hand(), bj.dealer_score(), false)
    )?;
    loop {
        table.pacer.pause();
        match table.session.dealer_step()? {
            DealerStep::Draw(card) => writeln!(
                out,
                "Dealer draws {} ({})",
                format_card(&card),
                table.session.blackjack().dealer_score()
            )?,
            DealerStep::Settled(settlement) => return finish(table, settlement, out, err),
        }
    }
}

fn finish(
    table: &mut Table,
    settlement: Settlement,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(out, "{}", settlement.outcome.message())?;
    writeln!(
        out,
        "You {} vs dealer {}. Payout: {}",
        settlement.player_score, settlement.dealer_score, settlement.payout
    )?;
    writeln!(out, "Balance: {} coins", table.session.balance())?;
    if table.session.balance() == 0 {
        writeln!(out, "Out of coins. Run `casino bonus` tomorrow for more.")?;
    }
    table.record_blackjack(&settlement, err)
}

fn show_hands(table: &Table, out: &mut dyn Write) -> Result<(), CliError> {
    let bj = table.session.blackjack();
    writeln!(
        out,
        "Dealer: {}",
        format_blackjack_hand(
            bj.dealer_hand(),
            bj.dealer_visible_score(),
            bj.dealer_hole_hidden()
        )
    )?;
    writeln!(
        out,
        "You:    {}",
        format_blackjack_hand(bj.player_hand(), bj.player_score(), false)
    )?;
    Ok(())
}
