//! Command handlers, one module per subcommand.
//!
//! Every handler follows the same shape: `handle_X_command(..., out, err)
//! -> Result<(), CliError>` with the output streams injected, so `run` can
//! map the result to an exit code and tests can capture the text. The two
//! interactive tables also take their input stream and share [`table`].

mod balance;
mod blackjack;
mod bonus;
mod cfg;
mod eval;
mod poker;
mod stats;
pub mod table;

pub use balance::handle_balance_command;
pub use blackjack::handle_blackjack_command;
pub use bonus::handle_bonus_command;
pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use poker::handle_poker_command;
pub use stats::handle_stats_command;
