use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "geocoin-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("deterministic-world"));
}

#[test]
fn cli_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let output_path = temp_path("json");
    let output = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "smoke,economy",
            "--iterations",
            "2",
            "--seeds",
            "1,2",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Geocoin Automated Tester"));
    let content = std::fs::read_to_string(output_path).expect("read report");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report.as_array().map(Vec::len), Some(4));
}

#[test]
fn cli_rejects_bad_seeds() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let output = Command::new(exe)
        .args(["--seeds", "one"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}

#[test]
fn cli_play_mode_persists_to_save_file() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let save_path = temp_path("save");
    let output = Command::new(exe)
        .args(["--mode", "play", "--commands", "n,collect,e,save", "--save-file"])
        .arg(&save_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Final points"));
    assert!(stdout.contains("Trail: 2 steps"));
    let saved = std::fs::read_to_string(&save_path).expect("read save");
    assert!(saved.contains("\"cacheStates\""));

    let again = Command::new(exe)
        .args(["--mode", "play", "--commands", "reset", "--save-file"])
        .arg(&save_path)
        .output()
        .expect("run cli");
    assert!(again.status.success());
    let again_stdout = String::from_utf8_lossy(&again.stdout);
    assert!(again_stdout.contains("Final points: 0"));
    assert!(again_stdout.contains("Trail: 0 steps"));
    assert!(!save_path.exists());
}

#[test]
fn cli_rejects_oversized_radius_config() {
    let exe = env!("CARGO_BIN_EXE_geocoin-tester");
    let config_path = temp_path("radius");
    std::fs::write(&config_path, r#"{"neighborhood_radius": 4000000000}"#).expect("write config");
    let output = Command::new(exe)
        .args(["--mode", "play", "--commands", "n", "--config"])
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("neighborhood radius"), "{stderr}");
}
