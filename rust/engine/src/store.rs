//! Local key-value persistence for the coin balance and the daily bonus.
//!
//! Two keys are used: [`COINS_KEY`] holds the balance as a decimal string and
//! [`LAST_BONUS_KEY`] holds the ISO date (`YYYY-MM-DD`) of the last daily
//! bonus. Reads never fail: a missing or corrupt value falls back to the
//! default and is logged at `warn`.

use std::collections::BTreeMap;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rand::Rng;
use tracing::{info, warn};

use crate::bankroll::Bankroll;
use crate::errors::StoreError;

pub const COINS_KEY: &str = "casinoCoins";
pub const LAST_BONUS_KEY: &str = "lastBonus";

pub const DAILY_BONUS: u64 = 200;
pub const RANDOM_BONUS_MIN: u64 = 50;
pub const RANDOM_BONUS_MAX: u64 = 149;

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk, rewritten in full on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "store is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

pub fn load_balance(store: &dyn KvStore, default: u64) -> u64 {
    match store.get(COINS_KEY) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(value = %raw, "stored balance is not a number, using default");
            default
        }),
    }
}

pub fn save_balance(store: &mut dyn KvStore, balance: u64) -> Result<(), StoreError> {
    store.set(COINS_KEY, &balance.to_string())
}

/// Grants [`DAILY_BONUS`] once per calendar day and returns the amount granted.
pub fn claim_daily_bonus(
    store: &mut dyn KvStore,
    bankroll: &mut Bankroll,
    today: NaiveDate,
) -> Result<Option<u64>, StoreError> {
    let today_str = today.format("%Y-%m-%d").to_string();
    if store.get(LAST_BONUS_KEY).as_deref() == Some(today_str.as_str()) {
        return Ok(None);
    }
    bankroll.credit(DAILY_BONUS);
    store.set(LAST_BONUS_KEY, &today_str)?;
    save_balance(store, bankroll.balance())?;
    info!(bonus = DAILY_BONUS, date = %today_str, "daily bonus granted");
    Ok(Some(DAILY_BONUS))
}

/// Grants a random bonus between 50 and 149 coins.
pub fn grant_random_bonus<R: Rng + ?Sized>(bankroll: &mut Bankroll, rng: &mut R) -> u64 {
    let bonus = rng.random_range(RANDOM_BONUS_MIN..=RANDOM_BONUS_MAX);
    bankroll.credit(bonus);
    bonus
}
