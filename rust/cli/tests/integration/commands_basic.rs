use crate::helpers::cli_runner::CliRunner;
use std::fs;

#[test]
fn eval_prints_category_and_rank() {
    let cli = CliRunner::new();
    let res = cli.run(&["eval", "2s", "7h", "9d", "Jc", "As", "2h", "2d"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Hand: Three of a Kind (rank 3)"));

    let res = cli.run(&["eval", "3s", "7h", "9d", "Jc", "As", "2h", "2d"]);
    assert!(res.stdout.contains("Hand: One Pair (rank 1)"));
}

#[test]
fn eval_rejects_bad_cards_with_exit_two() {
    let cli = CliRunner::new();
    let res = cli.run(&["eval", "As", "1x"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Error: Invalid card"));

    let res = cli.run(&["eval"]);
    assert_eq!(res.exit_code, 2);
}

#[test]
fn bonus_is_granted_once_per_day() {
    let cli = CliRunner::new();
    assert_eq!(cli.run(&["balance"]).stdout.trim(), "Balance: 1000 coins");

    let first = cli.run(&["bonus"]);
    assert_eq!(first.exit_code, 0);
    assert!(first.stdout.contains("Daily bonus: +200 coins!"));

    let second = cli.run(&["bonus"]);
    assert!(second.stdout.contains("already claimed"));
    assert_eq!(cli.run(&["balance"]).stdout.trim(), "Balance: 1200 coins");
}

#[test]
fn random_bonus_adds_between_50_and_149() {
    let cli = CliRunner::new();
    let res = cli.run(&["bonus", "--random", "--seed", "5"]);
    assert_eq!(res.exit_code, 0);
    let balance: u64 = cli
        .run(&["balance"])
        .stdout
        .trim()
        .trim_start_matches("Balance: ")
        .trim_end_matches(" coins")
        .parse()
        .unwrap();
    assert!((1050..=1149).contains(&balance), "balance = {balance}");
}

#[test]
fn corrupt_store_warns_and_falls_back() {
    let cli = CliRunner::new();
    fs::write(cli.dir().join("casino-store.json"), "{{{{").unwrap();
    let res = cli.run(&["balance"]);
    assert_eq!(res.exit_code, 0);
    assert_eq!(res.stdout.trim(), "Balance: 1000 coins");
    assert!(res.stderr.contains("corrupt"), "stderr={}", res.stderr);
}

#[test]
fn stats_on_missing_input_fails() {
    let res = CliRunner::new().run(&["stats", "--input", "nowhere.jsonl"]);
    assert_eq!(res.exit_code, 2);
    assert_eq!(res.stderr.matches("Failed to read").count(), 1, "stderr={}", res.stderr);
}

#[test]
fn usage_errors_and_help() {
    let cli = CliRunner::new();
    let res = cli.run(&[]);
    assert_eq!(res.exit_code, 2);
    for c in ["blackjack", "poker", "eval", "balance", "bonus", "cfg", "stats"] {
        assert!(res.stderr.contains(c), "missing {c}");
    }

    let res = cli.run(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("casino"));

    let res = cli.run(&["blackjack", "--help"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("--delay-ms"));
}
