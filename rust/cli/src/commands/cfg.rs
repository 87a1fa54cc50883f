//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value with its source
//! (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "bot": {
//!     "source": "default",
//!     "value": "random"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &config::ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_balance": {
            "value": config.starting_balance,
            "source": sources.starting_balance,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "store_path": {
            "value": config.store_path,
            "source": sources.store_path,
        },
        "dealer_delay_ms": {
            "value": config.dealer_delay_ms,
            "source": sources.dealer_delay_ms,
        },
        "autosave_secs": {
            "value": config.autosave_secs,
            "source": sources.autosave_secs,
        },
        "bot": {
            "value": config.bot,
            "source": sources.bot,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
