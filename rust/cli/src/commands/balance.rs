use std::io::Write;

use casino_engine::store::{FileStore, load_balance};

use crate::config;
use crate::error::CliError;

/// Prints the stored balance without claiming any bonus.
pub fn handle_balance_command(store: Option<String>, out: &mut dyn Write) -> Result<(), CliError> {
    let config = config::load()?;
    let path = store.unwrap_or(config.store_path);
    let store = FileStore::open(&path);
    writeln!(
        out,
        "Balance: {} coins",
        load_balance(&store, config.starting_balance)
    )?;
    Ok(())
}
