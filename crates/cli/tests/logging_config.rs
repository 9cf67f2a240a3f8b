use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("vault")).unwrap();

    let config_path = root.join("notepub.toml");
    let config_content = r#"
version = 1
[[vaults]]
name = "main"
path = "vault"

[logging]
level = "debug"
file = "logs/npub.log"
"#;
    fs::write(&config_path, config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("npub"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();

    assert!(root.join("logs/npub.log").exists(), "Log file should be created");
}

#[test]
fn test_logging_level_parsing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("vault")).unwrap();

    let config_path = root.join("notepub.toml");
    fs::write(
        &config_path,
        "version = 1\n[[vaults]]\nname = \"main\"\npath = \"vault\"\n[logging]\nlevel = \"trace\"\n",
    )
    .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("npub"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();
}
