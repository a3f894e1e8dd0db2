use assert_cmd::Command;
use tempfile::tempdir;

#[test]
fn save_config_writes_effective_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let log = dir.path().join("mindgym.log");

    Command::cargo_bin("mindgym")
        .unwrap()
        .args(["--save-config", "--seed", "9", "--config"])
        .arg(&config)
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&config).unwrap()).unwrap();
    assert_eq!(saved["seed"], 9);
    assert_eq!(saved["attention_secs"], 30);
}

#[test]
fn refuses_to_run_without_a_tty() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("mindgym")
        .unwrap()
        .args(["--game", "logic", "--log-file"])
        .arg(dir.path().join("mindgym.log"))
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn unknown_game_is_a_usage_error() {
    Command::cargo_bin("mindgym")
        .unwrap()
        .args(["--game", "chess"])
        .assert()
        .failure();
}
