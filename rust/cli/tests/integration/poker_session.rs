use crate::helpers::cli_runner::CliRunner;
use std::fs;

const TABLE: &[&str] = &["poker", "--seed", "7", "--delay-ms", "0"];

#[test]
fn folding_forfeits_the_bet() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(TABLE, "bet 50\ndeal\nfold\nq\n");
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Pot: 150"));
    assert!(res.stdout.contains("You fold."));
    assert!(res.stdout.contains("You receive: 0"));
    assert!(res.stdout.contains("Saved 1150 coins after 1 round(s)."));
}

#[test]
fn calling_every_street_reaches_a_settlement() {
    let cli = CliRunner::new();
    let history = cli.path_str("poker.jsonl");
    let mut args = TABLE.to_vec();
    args.extend(["--bot", "random", "--history", history.as_str()]);
    let res = cli.run_with_input(&args, "bet 10\ndeal\nc\nc\nc\nc\nq\n");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("You receive:"));

    let content = fs::read_to_string(&history).unwrap();
    assert_eq!(content.lines().count(), 1);
    let rec: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(rec["game"], "poker");
    assert_eq!(rec["bet"], 10);
    assert_eq!(rec["player_cards"].as_array().unwrap().len(), 2);
    assert_eq!(rec["opponent_cards"].as_array().unwrap().len(), 4);
}

#[test]
fn raise_puts_the_bet_in_again() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(TABLE, "bet 10\ndeal\nr\nq\n");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("You raise. Pot: 40"));
}

#[test]
fn seeded_tables_replay_identically() {
    let input = "bet 20\ndeal\nc\nc\nc\nc\nq\n";
    let a = CliRunner::new().run_with_input(TABLE, input);
    let b = CliRunner::new().run_with_input(TABLE, input);
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn bot_kind_comes_from_flag_or_config() {
    let cli = CliRunner::new();
    let mut args = TABLE.to_vec();
    args.extend(["--bot", "baseline"]);
    let res = cli.run_with_input(&args, "q\n");
    assert!(res.stdout.contains("(BaselineBot)"));

    let res = cli.run_with_env_and_input(TABLE, &[("CASINO_BOT", "baseline")], "q\n");
    assert!(res.stdout.contains("(BaselineBot)"));

    let res = cli.run_with_input(TABLE, "q\n");
    assert!(res.stdout.contains("(RandomBot)"));
}

#[test]
fn unknown_bot_flag_is_a_usage_error() {
    let res = CliRunner::new().run_with_input(&["poker", "--bot", "shark"], "q\n");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Commands:"));
}

#[test]
fn actions_before_the_deal_are_rejected() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(TABLE, "call\nraise\nfold\ndeal\nq\n");
    assert_eq!(res.exit_code, 0);
    assert!(res.stderr.contains("Cannot call while idle"));
    assert!(res.stderr.contains("Cannot fold while idle"));
    assert!(res.stderr.contains("Place a bet first"));
}
