use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "daggerheart-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_daggerheart-cli"))
        .args(args)
        .output()
        .expect("run cli")
}

fn json_of(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn cli_generates_json_character() {
    let output = run(&["--level", "4", "--archetype", "tank", "--seed", "11"]);
    let value = json_of(&output);
    assert_eq!(value["level"], 4);
    assert_eq!(value["archetype"], "Tank");
    let class = value["char_class"].as_str().unwrap();
    assert!(class == "Guardian" || class == "Warrior", "{class}");
    assert_eq!(value["traits"].as_object().unwrap().len(), 6);
    assert!(value["advancements_log"]["4"].is_array());
}

#[test]
fn cli_same_seed_same_character() {
    let args = ["--level", "6", "--archetype", "Support", "--seed", "19"];
    let first = json_of(&run(&args));
    let second = json_of(&run(&args));
    assert_eq!(first, second);
    assert_eq!(first["archetype"], "Support");
    let stderr = String::from_utf8_lossy(&run(&args).stderr).to_string();
    assert!(stderr.contains("seed") && stderr.contains("19"), "{stderr}");
}

#[test]
fn cli_infers_archetype_from_class_and_equips() {
    let output = run(&[
        "--class",
        "Warrior",
        "--subclass",
        "none",
        "--primary",
        "Longsword",
        "--armor",
        "Chainmail Armor",
        "--secondary",
        "",
        "--seed",
        "5",
    ]);
    let value = json_of(&output);
    assert_eq!(value["char_class"], "Warrior");
    assert_eq!(value["archetype"], "Tank");
    assert_eq!(value["subclass"], "Call of the Brave");
    assert_eq!(value["damage_roll"], "1d8+3");
    assert_eq!(value["armor_thresholds"], serde_json::json!([8, 16]));
    assert!(value["equipment"].get("secondary").is_none());
}

#[test]
fn cli_text_output_to_file() {
    let path = temp_path("text");
    let status = Command::new(env!("CARGO_BIN_EXE_daggerheart-cli"))
        .args(["--level", "2", "--archetype", "Face", "--name", "Marlowe"])
        .args(["--format", "text", "--seed", "77", "--output"])
        .arg(&path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&path).expect("read output");
    assert!(content.starts_with("Name: Marlowe\nArchetype: Face\n"));
    assert!(content.contains("Level 2 Advancements:"));
    assert!(content.contains("Seed: 77"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn cli_rejects_bad_requests() {
    for args in [
        &["--level", "11"][..],
        &["--level", "-1"][..],
        &["--archetype", "Bruiser"][..],
        &["--class", "Wizard", "--subclass", "Stalwart"][..],
        &["--subclass", "Troubadour", "--class", "Ranger"][..],
    ] {
        let output = run(args);
        assert!(!output.status.success(), "{args:?}");
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn cli_lists_reference_tables() {
    let output = run(&["--list", "communities"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 9);
    assert!(stdout.contains("Wildborne"));

    let output = run(&["--list", "archetypes"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l.starts_with("Control") && l.ends_with("Wizard, Druid")));
}

#[test]
fn cli_reports_missing_data_dir() {
    let dir = temp_path("missing-data");
    let output = Command::new(env!("CARGO_BIN_EXE_daggerheart-cli"))
        .arg("--data-dir")
        .arg(&dir)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load reference data"), "{stderr}");
}
