use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "casino",
    version,
    about = "Blackjack and three-handed Hold'em in the terminal"
)]
pub struct CasinoCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play blackjack against the dealer
    Blackjack {
        #[arg(long)]
        seed: Option<u64>,
        /// Pause between dealer draws, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Append settled rounds to this JSONL file
        #[arg(long)]
        history: Option<String>,
        /// Balance store file (overrides configuration)
        #[arg(long)]
        store: Option<String>,
    },
    /// Play Hold'em against two bots
    Poker {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        bot: Option<BotKind>,
        /// Pause before each street is revealed, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        #[arg(long)]
        history: Option<String>,
        #[arg(long)]
        store: Option<String>,
    },
    /// Evaluate 1 to 7 cards, e.g. `casino eval As Kd 10h`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Show the stored balance
    Balance {
        #[arg(long)]
        store: Option<String>,
    },
    /// Claim the daily bonus, or a random one with --random
    Bonus {
        #[arg(long)]
        store: Option<String>,
        #[arg(long)]
        random: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Summarize a round history file or directory
    Stats {
        #[arg(long)]
        input: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BotKind {
    /// Calls seven times out of ten regardless of cards
    Random,
    /// Folds weak hands
    Baseline,
}

impl BotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotKind::Random => "random",
            BotKind::Baseline => "baseline",
        }
    }
}
