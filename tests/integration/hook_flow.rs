use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use change_uuid::config::ChangeUuidConfig;
use change_uuid::tooling::cli::{Cli, CliContext};
use change_uuid::{ApiError, HookOutcome};
use clap::Parser;
use tempfile::TempDir;

fn context(store_dir: &Path) -> CliContext {
    let cli = Cli::try_parse_from([
        OsStr::new("change-uuid"),
        OsStr::new("--store-dir"),
        store_dir.as_os_str(),
    ])
    .unwrap();
    let mut config = ChangeUuidConfig::default();
    cli.apply_overrides(&mut config);
    CliContext::from_config(config)
}

fn write_message(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn trailer(path: &Path) -> String {
    let text = fs::read_to_string(path).unwrap();
    let line = text
        .lines()
        .find(|l| l.starts_with("Change-UUID: "))
        .expect("trailer should be present");
    line["Change-UUID: ".len()..].to_string()
}

#[test]
fn amended_commit_reuses_identifier() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("store");

    let first = write_message(
        temp.path(),
        "COMMIT_EDITMSG",
        "Fix crash on empty input\n\n# Please enter the commit message\n# On branch main\n",
    );
    let outcome = context(&store_dir).execute(&first).unwrap();
    assert!(matches!(outcome, HookOutcome::Generated(_)));
    let id = trailer(&first);
    assert_eq!(id.len(), 32);

    // Same text again with a different comment section, as after an amend
    let amended = write_message(
        temp.path(),
        "COMMIT_EDITMSG_2",
        "Fix crash on empty input\n# On branch main\n# Your branch is ahead\n",
    );
    let outcome = context(&store_dir).execute(&amended).unwrap();
    assert_eq!(outcome.change_id().map(|c| c.to_string()), Some(id.clone()));
    assert!(matches!(outcome, HookOutcome::Reused(_)));
    assert_eq!(trailer(&amended), id);

    assert_eq!(fs::read_dir(&store_dir).unwrap().count(), 1);
}

#[test]
fn tagged_message_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("store");
    let text = "Refactor parser\n\nChange-UUID: 00112233445566778899aabbccddeeff\n";
    let path = write_message(temp.path(), "COMMIT_EDITMSG", text);

    let outcome = context(&store_dir).execute(&path).unwrap();

    assert!(matches!(outcome, HookOutcome::AlreadyTagged(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
    assert!(!store_dir.exists());
}

#[test]
fn empty_message_is_a_silent_noop() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("store");
    let path = write_message(temp.path(), "COMMIT_EDITMSG", "\n# Please enter\n\n");

    let outcome = context(&store_dir).execute(&path).unwrap();

    assert_eq!(outcome, HookOutcome::EmptyMessage);
    assert!(!store_dir.exists());
}

#[test]
fn missing_message_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let err = context(&temp.path().join("store"))
        .execute(&temp.path().join("nope"))
        .unwrap_err();

    assert!(matches!(err, ApiError::MessageNotFound(_)));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn latin1_message_is_tagged_and_reused() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("store");
    let first = temp.path().join("COMMIT_EDITMSG");
    fs::write(&first, b"Fix caf\xe9 parser\n").unwrap();

    let outcome = context(&store_dir).execute(&first).unwrap();
    let HookOutcome::Generated(id) = outcome else {
        panic!("expected a generated identifier, got {outcome:?}");
    };
    let expected = [b"Fix caf\xe9 parser\n\nChange-UUID: ".as_slice(), id.as_str().as_bytes()].concat();
    assert_eq!(fs::read(&first).unwrap(), expected);

    let amended = temp.path().join("COMMIT_EDITMSG_2");
    fs::write(&amended, b"Fix caf\xe9 parser\n# Auf Zweig main\n").unwrap();
    let outcome = context(&store_dir).execute(&amended).unwrap();
    assert_eq!(outcome, HookOutcome::Reused(id));
}
