use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::blackjack::{Blackjack, Settlement};
use crate::cards::Card;
use crate::poker::{PokerSettlement, PokerTable, Seat};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Blackjack,
    Poker,
}

/// Complete record of one settled round, written as a JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    pub game: GameKind,
    /// Session seed (enables deterministic replay of the whole session)
    pub seed: Option<u64>,
    /// Coins the player committed this round
    pub bet: u64,
    /// Coins credited back at settlement
    pub payout: u64,
    pub balance_after: u64,
    /// Outcome summary, e.g. "PlayerWins" or "Showdown: You"
    pub outcome: String,
    pub player_cards: Vec<Card>,
    /// Dealer hand in blackjack; both bots' hole cards in poker
    #[serde(default)]
    pub opponent_cards: Vec<Card>,
    #[serde(default)]
    pub board: Vec<Card>,
    /// Timestamp when the round was settled (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn net(&self) -> i64 {
        self.payout as i64 - self.bet as i64
    }

    pub fn blackjack(
        round_id: String,
        seed: Option<u64>,
        table: &Blackjack,
        settlement: &Settlement,
        balance_after: u64,
    ) -> Self {
        Self {
            round_id,
            game: GameKind::Blackjack,
            seed,
            bet: settlement.bet,
            payout: settlement.payout,
            balance_after,
            outcome: format!("{:?}", settlement.outcome),
            player_cards: table.player_hand().to_vec(),
            opponent_cards: table.dealer_hand().to_vec(),
            board: Vec::new(),
            ts: None,
        }
    }

    pub fn poker(
        round_id: String,
        seed: Option<u64>,
        table: &PokerTable,
        settlement: &PokerSettlement,
        balance_after: u64,
    ) -> Self {
        let winners: Vec<&str> = settlement.winners.iter().map(|s| s.name()).collect();
        Self {
            round_id,
            game: GameKind::Poker,
            seed,
            bet: table.committed(),
            payout: settlement.player_payout,
            balance_after,
            outcome: format!("{:?}: {}", settlement.reason, winners.join(", ")),
            player_cards: table.hole(Seat::Player).to_vec(),
            opponent_cards: Seat::BOTS
                .iter()
                .flat_map(|s| table.hole(*s).iter().copied())
                .collect(),
            board: table.board().to_vec(),
            ts: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

#[derive(Deserialize)]
struct LoggedId {
    round_id: String,
}

/// Highest sequence number logged under `date` in `path`; 0 if none.
fn last_seq(path: &Path, date: &str) -> std::io::Result<u32> {
    let f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };
    let prefix = format!("{}-", date);
    let mut max = 0;
    for line in BufReader::new(f).lines() {
        let line = line?;
        // unreadable lines are left to `casino stats` to report
        let Ok(logged) = serde_json::from_str::<LoggedId>(&line) else {
            continue;
        };
        if let Some(seq) = logged
            .round_id
            .strip_prefix(&prefix)
            .and_then(|n| n.parse::<u32>().ok())
        {
            max = max.max(seq);
        }
    }
    Ok(max)
}

pub struct RoundLogger {
    writer: Option<BufWriter<std::fs::File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    ///
    /// Ids continue after the highest sequence already logged for today.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Self::create_on(path, &Utc::now().format("%Y%m%d").to_string())
    }

    /// Like [`RoundLogger::create`] with an explicit `YYYYMMDD` date.
    pub fn create_on<P: AsRef<Path>>(path: P, date: &str) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let seq = last_seq(path, date)?;
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: date.to_string(),
            seq,
        })
    }

    /// A logger that only hands out ids; `write` is a no-op.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
