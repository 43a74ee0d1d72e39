use std::fs;
use std::time::{Duration, SystemTime};

use change_uuid::clock::ManualClock;
use change_uuid::store::{ChangeIdStore, FsChangeIdStore, DEFAULT_RETENTION_SECS};
use change_uuid::{digest, ChangeId, Fingerprint};
use tempfile::TempDir;

const FP: &str = "abc1234567";
const ID: &str = "0123456789abcdef0123456789abcdef";

fn start_clock() -> ManualClock {
    ManualClock::new(SystemTime::UNIX_EPOCH + Duration::from_secs(1_650_000_000))
}

fn store(temp: &TempDir, clock: &ManualClock) -> FsChangeIdStore {
    FsChangeIdStore::new(temp.path().join(".git_hooks/_data/change_uuid")).with_clock(clock.clone())
}

#[test]
fn empty_store_lookup_returns_none_without_creating_directory() {
    let temp = TempDir::new().unwrap();
    let mut store = store(&temp, &start_clock());

    let found = store.lookup(&Fingerprint::parse(FP).unwrap()).unwrap();

    assert_eq!(found, None);
    assert!(!temp.path().join(".git_hooks").exists());
}

#[test]
fn record_then_lookup_returns_identifier() {
    let temp = TempDir::new().unwrap();
    let mut store = store(&temp, &start_clock());
    let fp = Fingerprint::parse(FP).unwrap();
    let id = ChangeId::parse(ID).unwrap();

    store.record(&fp, &id).unwrap();

    assert_eq!(store.lookup(&fp).unwrap(), Some(id));
    assert!(store.root().join(format!("{FP}_{ID}")).is_file());
}

#[test]
fn expired_entry_is_deleted_by_next_lookup() {
    let temp = TempDir::new().unwrap();
    let clock = start_clock();
    let fp = Fingerprint::parse(FP).unwrap();

    let mut writer = store(&temp, &clock);
    writer.record(&fp, &ChangeId::parse(ID).unwrap()).unwrap();

    clock.advance(Duration::from_secs(DEFAULT_RETENTION_SECS + 60));

    // A later invocation looks up something unrelated and sweeps on the way.
    let mut reader = store(&temp, &clock);
    assert_eq!(reader.lookup(&Fingerprint::parse("9999999999").unwrap()).unwrap(), None);
    assert_eq!(fs::read_dir(reader.root()).unwrap().count(), 0);

    let mut fresh = store(&temp, &clock);
    assert_eq!(fresh.lookup(&fp).unwrap(), None);
}

#[test]
fn separate_invocations_share_bindings() {
    let temp = TempDir::new().unwrap();
    let clock = start_clock();
    let fp = digest(["Fix bug"], '#').unwrap();
    let id = ChangeId::parse(ID).unwrap();

    store(&temp, &clock).record(&fp, &id).unwrap();
    clock.advance(Duration::from_secs(60));

    let noisy = digest(["# comment", "", "Fix bug", "# Please enter..."], '#').unwrap();
    assert_eq!(store(&temp, &clock).lookup(&noisy).unwrap(), Some(id));
}

#[test]
fn two_identifiers_for_one_fingerprint_are_tolerated() {
    let temp = TempDir::new().unwrap();
    let clock = start_clock();
    let fp = Fingerprint::parse(FP).unwrap();
    let a = ChangeId::parse(ID).unwrap();
    let b = ChangeId::parse("fedcba9876543210fedcba9876543210").unwrap();

    // Two racing hooks that both missed each other's binding
    store(&temp, &clock).record(&fp, &a).unwrap();
    store(&temp, &clock).record(&fp, &b).unwrap();

    let found = store(&temp, &clock).lookup(&fp).unwrap().unwrap();
    assert!(found == a || found == b);
    assert_eq!(store(&temp, &clock).bindings().unwrap().len(), 2);
}

#[test]
fn stray_files_survive_sweeps() {
    let temp = TempDir::new().unwrap();
    let clock = start_clock();
    let mut writer = store(&temp, &clock);
    writer
        .record(&Fingerprint::parse(FP).unwrap(), &ChangeId::parse(ID).unwrap())
        .unwrap();
    fs::write(writer.root().join(".DS_Store"), "x").unwrap();
    fs::create_dir(writer.root().join("nested")).unwrap();

    clock.advance(Duration::from_secs(DEFAULT_RETENTION_SECS * 3));
    let mut reader = store(&temp, &clock);
    assert_eq!(reader.lookup(&Fingerprint::parse(FP).unwrap()).unwrap(), None);

    let mut names: Vec<String> = fs::read_dir(reader.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec![".DS_Store".to_string(), "nested".to_string()]);
}
