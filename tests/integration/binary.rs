use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the hook binary with an isolated home and no CHANGE_UUID_* overrides
fn run(home: &Path, args: &[&std::ffi::OsStr]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_change-uuid"));
    cmd.args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("CHANGE_UUID") {
            cmd.env_remove(key);
        }
    }
    cmd.output().expect("hook binary should start")
}

#[test]
fn about_prints_one_liner() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["--about".as_ref()]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Add uuid to git commit message\n"
    );
}

#[test]
fn no_message_file_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &[]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn missing_message_file_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("store");
    let missing = temp.path().join("COMMIT_EDITMSG");
    let output = run(
        temp.path(),
        &["--store-dir".as_ref(), store_dir.as_os_str(), missing.as_os_str()],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    assert!(!store_dir.exists());
}

#[test]
fn message_file_gets_trailer() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("store");
    let message = temp.path().join("COMMIT_EDITMSG");
    fs::write(&message, "Fix bug\n# Please enter the commit message\n").unwrap();

    let output = run(
        temp.path(),
        &["--store-dir".as_ref(), store_dir.as_os_str(), message.as_os_str()],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let text = fs::read_to_string(&message).unwrap();
    let id = text
        .rsplit_once("\nChange-UUID: ")
        .map(|(_, id)| id)
        .expect("trailer should be appended");
    assert_eq!(id.len(), 32);
    assert_eq!(fs::read_dir(&store_dir).unwrap().count(), 1);
}
