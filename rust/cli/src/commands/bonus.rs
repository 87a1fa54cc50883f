//! Bonus command: the once-a-day 200 coins, or with `--random` a one-off
//! 50 to 149 coin gift.

use std::io::Write;

use casino_engine::bankroll::Bankroll;
use casino_engine::store::{
    DAILY_BONUS, FileStore, claim_daily_bonus, grant_random_bonus, load_balance, save_balance,
};
use chrono::Local;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config;
use crate::error::CliError;

pub fn handle_bonus_command(
    store: Option<String>,
    random: bool,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let config = config::load()?;
    let mut store = FileStore::open(store.unwrap_or(config.store_path));
    let mut bankroll = Bankroll::new(load_balance(&store, config.starting_balance));

    if random {
        let seed = seed.or(config.seed).unwrap_or_else(rand::random);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let bonus = grant_random_bonus(&mut bankroll, &mut rng);
        save_balance(&mut store, bankroll.balance())?;
        writeln!(out, "Bonus: +{} coins!", bonus)?;
    } else {
        match claim_daily_bonus(&mut store, &mut bankroll, Local::now().date_naive())? {
            Some(bonus) => writeln!(out, "Daily bonus: +{} coins!", bonus)?,
            None => writeln!(
                out,
                "Today's {} coin bonus is already claimed. Come back tomorrow.",
                DAILY_BONUS
            )?,
        }
    }
    writeln!(out, "Balance: {} coins", bankroll.balance())?;
    Ok(())
}
