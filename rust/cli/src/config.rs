use serde::{Deserialize, Serialize};
use std::fs;

use casino_ai::BOT_KINDS;
use casino_engine::bankroll::STARTING_COINS;

pub const CONFIG_ENV: &str = "CASINO_CONFIG";
pub const SEED_ENV: &str = "CASINO_SEED";
pub const STORE_ENV: &str = "CASINO_STORE";
pub const DELAY_ENV: &str = "CASINO_DEALER_DELAY_MS";
pub const AUTOSAVE_ENV: &str = "CASINO_AUTOSAVE_SECS";
pub const BOT_ENV: &str = "CASINO_BOT";
pub const BALANCE_ENV: &str = "CASINO_STARTING_BALANCE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Balance for a store that has none yet
    pub starting_balance: u64,
    pub seed: Option<u64>,
    pub store_path: String,
    pub dealer_delay_ms: u64,
    pub autosave_secs: u64,
    pub bot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_balance: ValueSource,
    pub seed: ValueSource,
    pub store_path: ValueSource,
    pub dealer_delay_ms: ValueSource,
    pub autosave_secs: ValueSource,
    pub bot: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_balance: ValueSource::Default,
            seed: ValueSource::Default,
            store_path: ValueSource::Default,
            dealer_delay_ms: ValueSource::Default,
            autosave_secs: ValueSource::Default,
            bot: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_COINS,
            seed: None,
            store_path: "casino-store.json".into(),
            dealer_delay_ms: 1000,
            autosave_secs: 30,
            bot: "random".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Defaults, then the TOML file named by `CASINO_CONFIG`, then `CASINO_*` variables.
///
/// `lookup` stands in for the process environment.
pub fn resolve<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let env = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(path) = env(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        apply_file(&mut cfg, &mut sources, toml::from_str(&s)?);
    }

    if let Some(seed) = env(SEED_ENV) {
        cfg.seed = Some(parse_number(&seed, "seed")?);
        sources.seed = ValueSource::Env;
    }
    if let Some(path) = env(STORE_ENV) {
        cfg.store_path = path;
        sources.store_path = ValueSource::Env;
    }
    if let Some(ms) = env(DELAY_ENV) {
        cfg.dealer_delay_ms = parse_number(&ms, "dealer_delay_ms")?;
        sources.dealer_delay_ms = ValueSource::Env;
    }
    if let Some(secs) = env(AUTOSAVE_ENV) {
        cfg.autosave_secs = parse_number(&secs, "autosave_secs")?;
        sources.autosave_secs = ValueSource::Env;
    }
    if let Some(bot) = env(BOT_ENV) {
        cfg.bot = bot.to_ascii_lowercase();
        sources.bot = ValueSource::Env;
    }
    if let Some(balance) = env(BALANCE_ENV) {
        cfg.starting_balance = parse_number(&balance, "starting_balance")?;
        sources.starting_balance = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_balance: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    store_path: Option<String>,
    #[serde(default)]
    dealer_delay_ms: Option<u64>,
    #[serde(default)]
    autosave_secs: Option<u64>,
    #[serde(default)]
    bot: Option<String>,
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.starting_balance {
        cfg.starting_balance = v;
        sources.starting_balance = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.store_path {
        cfg.store_path = v;
        sources.store_path = ValueSource::File;
    }
    if let Some(v) = f.dealer_delay_ms {
        cfg.dealer_delay_ms = v;
        sources.dealer_delay_ms = ValueSource::File;
    }
    if let Some(v) = f.autosave_secs {
        cfg.autosave_secs = v;
        sources.autosave_secs = ValueSource::File;
    }
    if let Some(v) = f.bot {
        cfg.bot = v.to_ascii_lowercase();
        sources.bot = ValueSource::File;
    }
}

fn parse_number(raw: &str, name: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", name, raw)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_balance == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_balance must be >0".into(),
        ));
    }
    if cfg.autosave_secs == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: autosave_secs must be >0".into(),
        ));
    }
    if cfg.store_path.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: store_path must not be empty".into(),
        ));
    }
    if !BOT_KINDS.contains(&cfg.bot.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bot must be one of {}",
            BOT_KINDS.join(", ")
        )));
    }
    Ok(())
}
