mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_csv_handling() {
    let seed = common::seed_file();
    let operations = NamedTempFile::new().unwrap();
    let mut wtr = csv::Writer::from_path(operations.path()).unwrap();
    wtr.write_record(["op", "payment", "amount"]).unwrap();

    // Valid authorize
    wtr.write_record(["authorize", "1", ""]).unwrap();
    // Unknown operation
    wtr.write_record(["chargeback", "1", ""]).unwrap();
    // Non-numeric amount
    wtr.write_record(["purchase", "3", "ten dollars"]).unwrap();
    // Valid purchase again
    wtr.write_record(["purchase", "3", "1.00"]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("stripe-gateway"));
    cmd.arg(operations.path())
        .arg("--seed")
        .arg(seed.path())
        .arg("--login")
        .arg("sk_test");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading operation"))
        .stdout(predicate::str::contains("authorize,1,true,ch_1,Transaction approved"))
        .stdout(predicate::str::contains("purchase,3,true,ch_2,Transaction approved"));
}

#[test]
fn test_unknown_payment_is_reported() {
    let seed = common::seed_file();
    let operations = NamedTempFile::new().unwrap();
    let mut wtr = csv::Writer::from_path(operations.path()).unwrap();
    wtr.write_record(["op", "payment", "amount"]).unwrap();
    wtr.write_record(["purchase", "99", "1.00"]).unwrap();
    wtr.write_record(["purchase", "1", "1.00"]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("stripe-gateway"));
    cmd.arg(operations.path())
        .arg("--seed")
        .arg(seed.path())
        .arg("--login")
        .arg("sk_test");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("unknown payment 99"))
        .stdout(predicate::str::contains("purchase,1,true,ch_1,Transaction approved"));
}

#[test]
fn test_declined_charge_is_a_result_row() {
    let seed = common::seed_file();
    let operations = NamedTempFile::new().unwrap();
    let mut wtr = csv::Writer::from_path(operations.path()).unwrap();
    wtr.write_record(["op", "payment", "amount"]).unwrap();
    wtr.write_record(["purchase", "2", ""]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("stripe-gateway"));
    cmd.arg(operations.path())
        .arg("--seed")
        .arg(seed.path())
        .arg("--login")
        .arg("sk_test");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("purchase,2,false,,Your card was declined."));
}
