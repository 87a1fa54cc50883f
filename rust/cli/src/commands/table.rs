//! Shared plumbing for the interactive tables: the session, its balance
//! store, autosave, optional round history and the dealer pacing.

use std::io::Write;
use std::time::{Duration, Instant};

use casino_engine::blackjack::Settlement;
use casino_engine::logger::{RoundLogger, RoundRecord};
use casino_engine::pacing::FixedDelay;
use casino_engine::poker::PokerSettlement;
use casino_engine::session::Session;
use casino_engine::store::{FileStore, claim_daily_bonus, load_balance, save_balance};
use chrono::Local;

use crate::config::Config;
use crate::error::CliError;
use crate::ui;

/// Flags shared by `casino blackjack` and `casino poker`.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub seed: Option<u64>,
    pub delay_ms: Option<u64>,
    pub history: Option<String>,
    pub store: Option<String>,
}

#[derive(Debug)]
struct Autosave {
    interval: Duration,
    last: Instant,
}

impl Autosave {
    fn due(&self) -> bool {
        self.last.elapsed() >= self.interval
    }

    fn mark(&mut self) {
        self.last = Instant::now();
    }
}

pub struct Table {
    pub session: Session,
    pub pacer: FixedDelay,
    store: FileStore,
    autosave: Autosave,
    history: Option<RoundLogger>,
}

impl Table {
    /// Loads the stored balance, claims today's bonus and seeds the session.
    ///
    /// Flags take precedence over configuration; without any seed a random
    /// one is drawn and printed so the session can be replayed.
    pub fn open(
        opts: &TableOptions,
        config: &Config,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Self, CliError> {
        let store_path = opts.store.as_deref().unwrap_or(&config.store_path);
        let mut store = FileStore::open(store_path);
        let balance = load_balance(&store, config.starting_balance);
        let seed = opts.seed.or(config.seed).unwrap_or_else(rand::random);
        let mut session = Session::new(balance, seed);

        let history = match &opts.history {
            Some(path) => Some(RoundLogger::create(path)?),
            None => None,
        };

        writeln!(out, "Seed: {}", seed)?;
        match claim_daily_bonus(&mut store, session.bankroll_mut(), Local::now().date_naive()) {
            Ok(Some(bonus)) => writeln!(out, "Daily bonus: +{} coins!", bonus)?,
            Ok(None) => {}
            Err(e) => ui::display_warning(err, &format!("Could not record daily bonus: {}", e))?,
        }
        writeln!(out, "Balance: {} coins", session.balance())?;

        Ok(Self {
            session,
            pacer: FixedDelay::from_millis(opts.delay_ms.unwrap_or(config.dealer_delay_ms)),
            store,
            autosave: Autosave {
                interval: Duration::from_secs(config.autosave_secs),
                last: Instant::now(),
            },
            history,
        })
    }

    /// Saves once the autosave interval has elapsed.
    pub fn tick(&mut self, err: &mut dyn Write) -> Result<(), CliError> {
        if self.autosave.due() {
            self.save_or_warn(err)?;
        }
        Ok(())
    }

    pub fn record_blackjack(
        &mut self,
        settlement: &Settlement,
        err: &mut dyn Write,
    ) -> Result<(), CliError> {
        if let Some(logger) = &mut self.history {
            let record = RoundRecord::blackjack(
                logger.next_id(),
                Some(self.session.seed()),
                self.session.blackjack(),
                settlement,
                self.session.balance(),
            );
            if let Err(e) = logger.write(&record) {
                ui::display_warning(err, &format!("Could not write history: {}", e))?;
            }
        }
        self.save_or_warn(err)
    }

    pub fn record_poker(
        &mut self,
        settlement: &PokerSettlement,
        err: &mut dyn Write,
    ) -> Result<(), CliError> {
        if let Some(logger) = &mut self.history {
            let record = RoundRecord::poker(
                logger.next_id(),
                Some(self.session.seed()),
                self.session.poker(),
                settlement,
                self.session.balance(),
            );
            if let Err(e) = logger.write(&record) {
                ui::display_warning(err, &format!("Could not write history: {}", e))?;
            }
        }
        self.save_or_warn(err)
    }

    /// Final save. Unlike the saves during play, a failure here is an error.
    pub fn close(mut self, out: &mut dyn Write) -> Result<(), CliError> {
        save_balance(&mut self.store, self.session.balance())?;
        writeln!(
            out,
            "Saved {} coins after {} round(s).",
            self.session.balance(),
            self.session.rounds_played()
        )?;
        Ok(())
    }

    fn save_or_warn(&mut self, err: &mut dyn Write) -> Result<(), CliError> {
        match save_balance(&mut self.store, self.session.balance()) {
            Ok(()) => self.autosave.mark(),
            Err(e) => ui::display_warning(err, &format!("Could not save balance: {}", e))?,
        }
        Ok(())
    }
}
