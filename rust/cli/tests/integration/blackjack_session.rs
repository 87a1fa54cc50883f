use crate::helpers::cli_runner::CliRunner;
use std::fs;

const TABLE: &[&str] = &["blackjack", "--seed", "42", "--delay-ms", "0"];

fn last_number_after(text: &str, prefix: &str) -> u64 {
    let line = text
        .lines()
        .rev()
        .find_map(|l| l.find(prefix).map(|i| &l[i + prefix.len()..]))
        .unwrap_or_else(|| panic!("no `{prefix}` in output:\n{text}"));
    line.split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("no number after `{prefix}`"))
}

#[test]
fn round_settles_and_balance_follows_payout() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(TABLE, "bet 100\ndeal\ns\nq\n");
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Daily bonus: +200 coins!"));
    assert!(res.stdout.contains("Dealer: ["));

    let payout = last_number_after(&res.stdout, "Payout: ");
    assert!([0, 100, 200, 250].contains(&payout), "payout {payout}");
    let balance = last_number_after(&res.stdout, "Saved ");
    assert_eq!(balance, 1200 - 100 + payout);

    let stored = fs::read_to_string(cli.dir().join("casino-store.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(json["casinoCoins"], balance.to_string());
    assert!(json["lastBonus"].is_string());
}

#[test]
fn same_seed_plays_the_same_table() {
    let input = "bet 25\ndeal\nh\ns\ndeal\ns\nq\n";
    let a = CliRunner::new().run_with_input(TABLE, input);
    let b = CliRunner::new().run_with_input(TABLE, input);
    assert_eq!(a.exit_code, 0);
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn balance_carries_over_to_the_next_visit() {
    let cli = CliRunner::new();
    let first = cli.run_with_input(TABLE, "bet 50\ndeal\ns\nq\n");
    let saved = last_number_after(&first.stdout, "Saved ");

    let second = cli.run_with_input(TABLE, "q\n");
    assert!(!second.stdout.contains("Daily bonus"));
    assert_eq!(last_number_after(&second.stdout, "Balance: "), saved);

    let balance = cli.run(&["balance"]);
    assert_eq!(balance.stdout.trim(), format!("Balance: {} coins", saved));
}

#[test]
fn history_records_every_round() {
    let cli = CliRunner::new();
    let history = cli.path_str("history/rounds.jsonl");
    let mut args = TABLE.to_vec();
    args.extend(["--history", history.as_str()]);
    let res = cli.run_with_input(&args, "bet 10\ndeal\ns\ndeal\ns\ndeal\ns\nq\n");
    assert_eq!(res.exit_code, 0);

    let content = fs::read_to_string(&history).unwrap();
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 3);
    for rec in &records {
        assert_eq!(rec["game"], "blackjack");
        assert_eq!(rec["bet"], 10);
        assert_eq!(rec["seed"], 42);
        assert!(rec["ts"].is_string());
    }
    assert!(records[0]["round_id"].as_str().unwrap().ends_with("-000001"));

    let stats = cli.run(&["stats", "--input", history.as_str()]);
    assert_eq!(stats.exit_code, 0, "stderr={}", stats.stderr);
    let json: serde_json::Value = serde_json::from_str(&stats.stdout).unwrap();
    assert_eq!(json["blackjack"]["rounds"], 3);
    assert_eq!(json["final_balance"], records[2]["balance_after"]);
}

#[test]
fn rejected_actions_do_not_end_the_session() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(TABLE, "stand\nbet 5000\nbet 0\nfoo\ndouble\nq\n");
    assert_eq!(res.exit_code, 0);
    assert!(res.stderr.contains("Error: Cannot stand while idle"));
    assert!(res.stderr.contains("Insufficient coins: need 5000, have 1200"));
    assert!(res.stderr.contains("Bet must be greater than zero"));
    assert!(res.stderr.contains("Unrecognized command: foo"));
    assert!(res.stdout.contains("Saved 1200 coins after 0 round(s)."));
}

#[test]
fn empty_line_repeats_the_last_bet() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(TABLE, "bet 30\n\ns\n\ns\nq\n");
    assert_eq!(res.exit_code, 0);
    assert_eq!(res.stdout.matches("Bet: 30").count(), 3);
    assert!(res.stdout.contains("after 2 round(s)"));
}
