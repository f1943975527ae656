//! CLI integration tests
//!
//! Every test runs the binary against its own temporary ledger directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bookkeeper(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookkeeper").unwrap();
    cmd.env("BOOKKEEPER_DATA_DIR", dir.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    bookkeeper(dir).args(args).assert().success();
}

/// Checking 1500.00 and a credit card owing 200.00 on 2024/01/01
fn seeded_ledger() -> TempDir {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["account", "create", "Checking", "--tags", "asset,cash"]);
    run(&dir, &["account", "create", "Savings", "--tags", "asset,cash"]);
    run(
        &dir,
        &["account", "create", "CreditCard", "--tags", "liability,credit card"],
    );
    run(
        &dir,
        &["txn", "add", "Checking", "1500.00", "--type", "BalanceChange", "--date", "2024/01/01"],
    );
    run(
        &dir,
        &["txn", "add", "CreditCard", "-200.00", "--type", "LiabilityChange", "--date", "2024/01/01"],
    );
    dir
}

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    bookkeeper(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("journal"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("account"));
}

#[test]
fn test_init_writes_settings() {
    let dir = TempDir::new().unwrap();
    bookkeeper(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());

    bookkeeper(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default validators: transfer_match"));
}

#[test]
fn test_account_create_and_list() {
    let dir = seeded_ledger();

    bookkeeper(&dir)
        .args(["account", "list", "--tag", "liability"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CreditCard"))
        .stdout(predicate::str::contains("Checking").not());

    bookkeeper(&dir)
        .args(["account", "create", "Checking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_account_show_balance_as_of() {
    let dir = seeded_ledger();

    bookkeeper(&dir)
        .args(["account", "show", "Checking", "--date", "2024/03/01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,500.00"));

    bookkeeper(&dir)
        .args(["account", "show", "Checking", "--date", "2023/12/31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn test_transaction_requires_category_for_out() {
    let dir = seeded_ledger();

    bookkeeper(&dir)
        .args(["txn", "add", "Checking", "45.12", "--type", "Out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    bookkeeper(&dir)
        .args([
            "txn", "add", "Checking", "45.12", "--type", "Out", "--date", "2024/02/10",
            "--category", "Food & Dining", "--sub-category", "Groceries",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$45.12"));
}

#[test]
fn test_transaction_list_query_and_csv() {
    let dir = seeded_ledger();
    let csv_path = dir.path().join("txns.csv");

    bookkeeper(&dir)
        .args(["txn", "list", "--query", "2024Q1 on Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BalanceChange"))
        .stdout(predicate::str::contains("LiabilityChange").not());

    bookkeeper(&dir)
        .args(["txn", "list", "--query", "2024", "--output"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 transactions"));

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("ID,Date,Type,Account"));
    assert!(csv.contains("1500.00"));
}

#[test]
fn test_journal_transfer_and_balance_sheet() {
    let dir = seeded_ledger();

    bookkeeper(&dir)
        .args([
            "journal", "transfer", "--from", "Checking", "--to", "Savings", "--amount", "100",
            "--date", "2024/02/01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Association ID"));

    bookkeeper(&dir)
        .args(["report", "balance", "--date", "2024/03/01", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"equities\": 130000"))
        .stdout(predicate::str::contains("\"cash\": 150000"))
        .stdout(predicate::str::contains("\"credit card\": 20000"));

    bookkeeper(&dir)
        .args(["report", "account-balance", "--account", "Savings", "--date", "2024/03/01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$100.00"));

    bookkeeper(&dir)
        .args(["audit", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("POST JournalEntry"));
}

#[test]
fn test_balance_sheet_table_and_csv() {
    let dir = seeded_ledger();

    bookkeeper(&dir)
        .args(["report", "balance", "--date", "2024/01/31,2024/03/01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024/01/31"))
        .stdout(predicate::str::contains("Net Worth"))
        .stdout(predicate::str::contains("$1,300.00"));

    bookkeeper(&dir)
        .args(["report", "balance", "--date", "2024/03/01", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Item,2024/03/01"))
        .stdout(predicate::str::contains("Net Worth,1300.00"));
}

#[test]
fn test_journal_check_rejects_unmatched_transfer() {
    let dir = seeded_ledger();
    let entry = dir.path().join("entry.json");
    fs::write(
        &entry,
        r#"{
            "title": "Move savings",
            "transactions": [
                {"account_name": "Checking", "type": "TransferOut", "date": "2024-02-01",
                 "amount": -10000, "association_id": "a1"},
                {"account_name": "Savings", "type": "TransferIn", "date": "2024-02-01",
                 "amount": 9000, "association_id": "a1"}
            ]
        }"#,
    )
    .unwrap();

    bookkeeper(&dir)
        .args(["journal", "check"])
        .arg(&entry)
        .assert()
        .failure()
        .stderr(predicate::str::contains("transfer_match"))
        .stderr(predicate::str::contains("a1"));

    bookkeeper(&dir)
        .args(["journal", "post"])
        .arg(&entry)
        .assert()
        .failure();

    // Nothing was written by the rejected post
    bookkeeper(&dir)
        .args(["txn", "list", "--query", "2024/02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_journal_post_with_zero_balance() {
    let dir = seeded_ledger();
    run(&dir, &["account", "create", "Payroll"]);
    let entry = dir.path().join("paycheck.json");
    fs::write(
        &entry,
        r#"{
            "title": "Paycheck",
            "transactions": [
                {"account_name": "Payroll", "type": "In", "date": "2024-02-15",
                 "category": "Professional Income", "sub_category": "Salary", "amount": 500000},
                {"account_name": "Payroll", "type": "Out", "date": "2024-02-15",
                 "category": "Taxes", "sub_category": "Federal", "amount": -100000},
                {"account_name": "Payroll", "type": "TransferOut", "date": "2024-02-15",
                 "amount": -400000, "association_id": "p1"},
                {"account_name": "Checking", "type": "TransferIn", "date": "2024-02-15",
                 "amount": 400000, "association_id": "p1"}
            ],
            "validators": ["transfer_match", "zero_balance:Payroll"]
        }"#,
    )
    .unwrap();

    bookkeeper(&dir)
        .args(["journal", "post"])
        .arg(&entry)
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted 'Paycheck' (4 transactions)"));

    bookkeeper(&dir)
        .args(["report", "income", "--period", "2024/02", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary,5000.00"))
        .stdout(predicate::str::contains("Taxes,1000.00"))
        .stdout(predicate::str::contains("Revenue Net Taxes,4000.00"));
}

#[test]
fn test_journal_rejects_unknown_account() {
    let dir = seeded_ledger();

    bookkeeper(&dir)
        .args(["journal", "transfer", "--from", "Checking", "--to", "Nowhere", "--amount", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'Nowhere' is not found"));
}

#[test]
fn test_init_data_file_dry_run() {
    let dir = TempDir::new().unwrap();
    let dump = dir.path().join("dump.json");
    fs::write(
        &dump,
        r#"{
            "accounts": [{"id": 1, "name": "Checking", "desc": "", "tags": ["asset", "cash"]}],
            "transactions": [{"id": 1, "type": "BalanceChange", "date": "2024-01-01",
                              "account_id": 1, "amount": 150000}]
        }"#,
    )
    .unwrap();

    bookkeeper(&dir)
        .args(["init", "--dry-run", "--data-file"])
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("insert account 1 'Checking'"))
        .stdout(predicate::str::contains("Dry run"));

    bookkeeper(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts found."));

    bookkeeper(&dir)
        .args(["init", "--data-file"])
        .arg(&dump)
        .assert()
        .success();

    bookkeeper(&dir)
        .args(["report", "account-balance", "--account", "Checking", "--date", "2024/01/01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,500.00"));
}

#[test]
fn test_export_round_trip_through_init() {
    let source = seeded_ledger();
    let export = source.path().join("ledger.json");

    bookkeeper(&source)
        .args(["export", "all"])
        .arg(&export)
        .assert()
        .success();

    let target = TempDir::new().unwrap();
    bookkeeper(&target)
        .args(["init", "--data-file"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 accounts and 2 transactions."));
}

#[test]
fn test_transaction_list_rejects_oversized_day_count() {
    let dir = seeded_ledger();

    bookkeeper(&dir)
        .args(["txn", "list", "--query", "past 999999999999999 days"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}
