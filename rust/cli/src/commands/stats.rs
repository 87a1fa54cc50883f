//! Statistics over round history files written with `--history`.
//!
//! Reads one JSONL file or every `.jsonl` file under a directory and prints
//! per-game totals. Blackjack payouts are checked against the payout table.

use crate::error::CliError;
use crate::io_utils::read_text;
use crate::ui;
use casino_engine::logger::{GameKind, RoundRecord};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Serialize)]
struct GameTotals {
    rounds: u64,
    wagered: u64,
    paid: u64,
    net: i64,
    wins: u64,
    losses: u64,
    pushes: u64,
}

impl GameTotals {
    fn add(&mut self, rec: &RoundRecord) {
        self.rounds += 1;
        self.wagered += rec.bet;
        self.paid += rec.payout;
        self.net += rec.net();
        match rec.payout.cmp(&rec.bet) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.pushes += 1,
        }
    }
}

#[derive(Debug, Default)]
struct StatsState {
    blackjack: GameTotals,
    poker: GameTotals,
    last_balance: Option<u64>,
    skipped: u64,
    corrupted: u64,
    stats_ok: bool,
}

/// Aggregates round history and prints a JSON summary.
///
/// Fails with exit code 2 when a blackjack payout is impossible for its bet,
/// or when a single file holds nothing but unreadable lines.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    let mut state = StatsState {
        stats_ok: true,
        ..StatsState::default()
    };

    if path.is_dir() {
        let mut files = Vec::new();
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let Ok(rd) = std::fs::read_dir(&d) else {
                continue;
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if p.extension().is_some_and(|ext| ext == "jsonl") {
                    files.push(p);
                }
            }
        }
        // stable order so final_balance does not depend on read_dir
        files.sort();
        for p in files {
            match read_text(&p) {
                Ok(content) => consume(&content, &mut state, err)?,
                Err(_) => state.corrupted += 1,
            }
        }
    } else {
        match read_text(path) {
            Ok(s) => consume(&s, &mut state, err)?,
            Err(e) => {
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    let rounds = state.blackjack.rounds + state.poker.rounds;
    if !path.is_dir() && rounds == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let net = state.blackjack.net + state.poker.net;
    let summary = serde_json::json!({
        "rounds": rounds,
        "blackjack": state.blackjack,
        "poker": state.poker,
        "net": net,
        "final_balance": state.last_balance,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    if state.stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}

fn consume(content: &str, state: &mut StatsState, err: &mut dyn Write) -> Result<(), CliError> {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    for (i, line) in lines.iter().enumerate() {
        let rec: RoundRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(_) => {
                if i == lines.len() - 1 && !has_trailing_nl {
                    state.skipped += 1;
                } else {
                    state.corrupted += 1;
                }
                continue;
            }
        };

        match rec.game {
            GameKind::Blackjack => {
                if !valid_blackjack_payout(rec.bet, rec.payout) {
                    state.stats_ok = false;
                    ui::write_error(
                        err,
                        &format!(
                            "Impossible payout {} for bet {} at round {}",
                            rec.payout, rec.bet, rec.round_id
                        ),
                    )?;
                    continue;
                }
                state.blackjack.add(&rec);
            }
            GameKind::Poker => state.poker.add(&rec),
        }
        state.last_balance = Some(rec.balance_after);
    }
    Ok(())
}

/// Lose, push, even money, or 3:2 on a natural.
fn valid_blackjack_payout(bet: u64, payout: u64) -> bool {
    payout == 0 || payout == bet || payout == bet * 2 || payout == bet * 5 / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(game: &str, bet: u64, payout: u64, balance: u64) -> String {
        format!(
            r#"{{"round_id":"20261018-000001","game":"{game}","seed":1,"bet":{bet},"payout":{payout},"balance_after":{balance},"outcome":"x","player_cards":[]}}"#
        )
    }

    fn stats(content: &str) -> (Result<(), CliError>, String, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        std::fs::write(&path, content).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let res = handle_stats_command(path.to_string_lossy().into_owned(), &mut out, &mut err);
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn totals_per_game() {
        let content = [
            line("blackjack", 100, 200, 1100),
            line("blackjack", 100, 0, 1000),
            line("blackjack", 10, 25, 1015),
            line("poker", 20, 90, 1085),
        ]
        .join("\n")
            + "\n";
        let (res, out, _) = stats(&content);
        assert!(res.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["rounds"], 4);
        assert_eq!(json["blackjack"]["wins"], 2);
        assert_eq!(json["blackjack"]["losses"], 1);
        assert_eq!(json["blackjack"]["net"], 15);
        assert_eq!(json["poker"]["net"], 70);
        assert_eq!(json["net"], 85);
        assert_eq!(json["final_balance"], 1085);
    }

    #[test]
    fn incomplete_last_line_is_discarded() {
        let content = format!("{}\n{{\"round_id\":", line("poker", 10, 0, 990));
        let (res, out, err) = stats(&content);
        assert!(res.is_ok());
        assert!(out.contains("\"rounds\": 1"));
        assert!(err.contains("Discarded 1 incomplete"));
    }

    #[test]
    fn corrupted_middle_line_is_counted() {
        let content = format!(
            "{}\nnot json\n{}\n",
            line("poker", 10, 0, 990),
            line("poker", 10, 30, 1010)
        );
        let (res, _out, err) = stats(&content);
        assert!(res.is_ok());
        assert!(err.contains("Skipped 1 corrupted"));
    }

    #[test]
    fn only_garbage_is_an_error() {
        let (res, _out, err) = stats("garbage\n");
        assert!(res.is_err());
        assert!(err.contains("Invalid record"));
    }

    #[test]
    fn impossible_blackjack_payout_fails_validation() {
        let (res, _out, err) = stats(&(line("blackjack", 100, 170, 1070) + "\n"));
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(err.contains("Impossible payout 170"));
    }

    #[test]
    fn directory_input_reads_all_jsonl_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jsonl"), line("poker", 5, 15, 1010) + "\n").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(
            dir.path().join("nested").join("b.jsonl"),
            line("blackjack", 5, 10, 1015) + "\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        handle_stats_command(dir.path().to_string_lossy().into_owned(), &mut out, &mut err)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["rounds"], 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let res = handle_stats_command("/no/such/file.jsonl".into(), &mut out, &mut err);
        match res {
            Err(CliError::InvalidInput(msg)) => assert!(msg.contains("Failed to read")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(err.is_empty());
    }
}
