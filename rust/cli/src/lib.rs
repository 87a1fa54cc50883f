//! # Casino CLI Library
//!
//! Command-line front end for the casino: blackjack against the dealer and
//! three-handed Hold'em against two bots, sharing one persisted coin balance.
//!
//! The entry point is [`run`], which parses arguments and dispatches to the
//! subcommand handlers with injected output streams.
//!
//! ## Available Subcommands
//!
//! - `blackjack`: Interactive blackjack table
//! - `poker`: Interactive Hold'em table against two bots
//! - `eval`: Evaluate 1 to 7 cards
//! - `balance`: Show the stored balance
//! - `bonus`: Claim the daily bonus (or a random one with `--random`)
//! - `cfg`: Display the resolved configuration
//! - `stats`: Summarize round history files

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{CasinoCli, Commands};
use commands::table::TableOptions;
use commands::{
    handle_balance_command, handle_blackjack_command, handle_bonus_command, handle_cfg_command,
    handle_eval_command, handle_poker_command, handle_stats_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &[
    "blackjack", "poker", "eval", "balance", "bonus", "cfg", "stats",
];

/// Parses `args` and runs the chosen subcommand.
///
/// Returns [`exit_code::SUCCESS`] on success (including `--help` and
/// `--version`) and [`exit_code::ERROR`] for usage errors and failed commands.
///
/// ```
/// use std::io;
/// let args = vec!["casino", "eval", "As", "Ks", "Qs", "Js", "10s"];
/// let code = casino_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CasinoCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Casino CLI");
            write_or_exit!(err, "Usage: casino <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: casino --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Blackjack {
            seed,
            delay_ms,
            history,
            store,
        } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            let opts = TableOptions {
                seed,
                delay_ms,
                history,
                store,
            };
            handle_blackjack_command(opts, out, err, &mut stdin_lock)
        }
        Commands::Poker {
            seed,
            bot,
            delay_ms,
            history,
            store,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            let opts = TableOptions {
                seed,
                delay_ms,
                history,
                store,
            };
            handle_poker_command(opts, bot, out, err, &mut stdin_lock)
        }
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Balance { store } => handle_balance_command(store, out),
        Commands::Bonus {
            store,
            random,
            seed,
        } => handle_bonus_command(store, random, seed, out),
        Commands::Cfg => handle_cfg_command(out),
        Commands::Stats { input } => handle_stats_command(input, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
