//! Shared helpers for the integration suites.
//!
//! `CliRunner` spawns the `casino` binary inside a private temporary
//! directory, so the default `casino-store.json` never leaks between tests.
//!
//! ```rust,ignore
//! use crate::helpers::cli_runner::CliRunner;
//!
//! let cli = CliRunner::new();
//! let res = cli.run_with_input(&["blackjack", "--seed", "1", "--delay-ms", "0"], "bet 10\nq\n");
//! assert_eq!(res.exit_code, 0);
//! ```
pub mod cli_runner;
