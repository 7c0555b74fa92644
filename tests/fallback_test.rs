mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let seed = common::seed_file();

    let mut cmd = Command::new(cargo_bin!("stripe-gateway"));
    cmd.arg("tests/fixtures/operations.csv")
        .arg("--seed")
        .arg(seed.path())
        .arg("--login")
        .arg("sk_test")
        .arg("--db-path")
        .arg("some_db");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let seed = common::seed_file();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("stripe-gateway"));
    cmd.arg("tests/fixtures/operations.csv")
        .arg("--seed")
        .arg(seed.path())
        .arg("--login")
        .arg("sk_test")
        .arg("--db-path")
        .arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Falling back").not());
}
