use crate::helpers::cli_runner::CliRunner;
use serde_json::Value;
use std::fs;

fn cfg(cli: &CliRunner, env: &[(&str, &str)]) -> Value {
    let res = cli.run_with_env(&["cfg"], env);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    serde_json::from_str(&res.stdout).unwrap()
}

#[test]
fn defaults_without_file_or_env() {
    let json = cfg(&CliRunner::new(), &[]);
    assert_eq!(json["starting_balance"]["value"], 1000);
    assert_eq!(json["dealer_delay_ms"]["value"], 1000);
    assert_eq!(json["autosave_secs"]["value"], 30);
    assert_eq!(json["store_path"]["value"], "casino-store.json");
    assert_eq!(json["bot"]["value"], "random");
    assert!(json["seed"]["value"].is_null());
    for key in ["starting_balance", "seed", "store_path", "bot"] {
        assert_eq!(json[key]["source"], "default", "{key}");
    }
}

#[test]
fn env_beats_file_beats_default() {
    let cli = CliRunner::new();
    let file = cli.dir().join("casino.toml");
    fs::write(&file, "bot = \"baseline\"\nseed = 3\nautosave_secs = 10\n").unwrap();
    let file = file.to_string_lossy().into_owned();

    let json = cfg(&cli, &[("CASINO_CONFIG", &file), ("CASINO_SEED", "99")]);
    assert_eq!(json["bot"]["value"], "baseline");
    assert_eq!(json["bot"]["source"], "file");
    assert_eq!(json["seed"]["value"], 99);
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["autosave_secs"]["value"], 10);
    assert_eq!(json["starting_balance"]["source"], "default");
}

#[test]
fn invalid_configuration_fails_every_command() {
    let cli = CliRunner::new();
    let res = cli.run_with_env(&["cfg"], &[("CASINO_BOT", "shark")]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid configuration"));

    let res = cli.run_with_env(&["balance"], &[("CASINO_AUTOSAVE_SECS", "0")]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("autosave_secs"));
}

#[test]
fn store_and_starting_balance_from_env() {
    let cli = CliRunner::new();
    let store = cli.path_str("elsewhere/coins.json");
    let env = [
        ("CASINO_STORE", store.as_str()),
        ("CASINO_STARTING_BALANCE", "500"),
    ];
    let res = cli.run_with_env(&["bonus"], &env);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Balance: 700 coins"));
    assert!(std::path::Path::new(&store).exists());
    assert!(!cli.dir().join("casino-store.json").exists());
}

#[test]
fn seed_from_env_drives_the_table() {
    let input = "bet 10\ndeal\ns\nq\n";
    let env = [("CASINO_SEED", "1234"), ("CASINO_DEALER_DELAY_MS", "0")];
    let a = CliRunner::new().run_with_env_and_input(&["blackjack"], &env, input);
    let b = CliRunner::new().run_with_input(
        &["blackjack", "--seed", "1234", "--delay-ms", "0"],
        input,
    );
    assert!(a.stdout.starts_with("Seed: 1234"));
    assert_eq!(a.stdout, b.stdout);
}
