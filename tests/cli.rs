use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "tracker";

fn tracker(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_TRACKER_DATA_DIR", data_dir)
        .env_remove("EXPENSE_TRACKER_USER")
        .env_remove("RUST_LOG");
    cmd
}

fn as_user(data_dir: &Path, user: &str) -> Command {
    let mut cmd = tracker(data_dir);
    cmd.args(["--user", user]);
    cmd
}

/// Add an expense and return its id from the "Expense: <id>" line
fn add_expense(data_dir: &Path, user: &str, args: &[&str]) -> String {
    let output = as_user(data_dir, user)
        .args(["expense", "add"])
        .args(args)
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 output");
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Expense: "))
        .map(|id| id.trim().to_string())
        .expect("id line printed")
}

#[test]
fn cli_requires_a_user() {
    let temp_dir = TempDir::new().unwrap();

    tracker(temp_dir.path())
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(contains("No user selected"));
}

#[test]
fn cli_user_from_environment() {
    let temp_dir = TempDir::new().unwrap();

    tracker(temp_dir.path())
        .env("EXPENSE_TRACKER_USER", "carol")
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("No expenses found."));
}

#[test]
fn cli_add_and_list_expense() {
    let temp_dir = TempDir::new().unwrap();

    as_user(temp_dir.path(), "alice")
        .args(["expense", "add", "12.50", "Food", "-d", "2025-03-14", "-m", "Lunch"])
        .assert()
        .success()
        .stdout(contains("Amount:      $12.50"))
        .stdout(contains("Description: Lunch"));

    as_user(temp_dir.path(), "alice")
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("2025-03-14"))
        .stdout(contains("Lunch"));

    let profiles = temp_dir.path().join("data").join("profiles.json");
    let contents = std::fs::read_to_string(profiles).unwrap();
    assert!(contents.contains("\"userName\": \"alice\""));
    assert!(contents.contains("12.5"));
}

#[test]
fn cli_rejects_bad_amounts_and_dates() {
    let temp_dir = TempDir::new().unwrap();

    as_user(temp_dir.path(), "alice")
        .args(["expense", "add", "abc", "Food"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    as_user(temp_dir.path(), "alice")
        .args(["expense", "add", "0", "Food"])
        .assert()
        .failure()
        .stderr(contains("greater than zero"));

    as_user(temp_dir.path(), "alice")
        .args(["income", "add", "100", "Salary", "--date", "yesterday"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    assert!(!temp_dir.path().join("data").join("profiles.json").exists());
}

#[test]
fn cli_category_budget_alert() {
    let temp_dir = TempDir::new().unwrap();

    as_user(temp_dir.path(), "alice")
        .args(["budget", "set", "Food", "50"])
        .assert()
        .success()
        .stdout(contains("Budget for 'Food' set to $50.00"));

    as_user(temp_dir.path(), "alice")
        .args(["expense", "add", "30", "Food"])
        .assert()
        .success()
        .stdout(contains("WARNING").not());

    as_user(temp_dir.path(), "alice")
        .args(["expense", "add", "30", "Food"])
        .assert()
        .success()
        .stdout(contains("WARNING: 'Food' budget exceeded!"))
        .stdout(contains("over by $10.00"));

    as_user(temp_dir.path(), "alice")
        .args(["budget", "status"])
        .assert()
        .success()
        .stdout(contains("Food: Spent $60.00 / Limit $50.00 -> OVER by 10.00"));
}

#[test]
fn cli_monthly_summary() {
    let temp_dir = TempDir::new().unwrap();

    as_user(temp_dir.path(), "alice")
        .args(["budget", "monthly", "100"])
        .assert()
        .success();
    add_expense(temp_dir.path(), "alice", &["120", "Rent"]);

    as_user(temp_dir.path(), "alice")
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Budget:         $100.00"))
        .stdout(contains("Over budget by: $20.00"));
}

#[test]
fn cli_edit_and_delete_expense() {
    let temp_dir = TempDir::new().unwrap();
    let id = add_expense(temp_dir.path(), "alice", &["10", "Food", "-m", "Snack"]);

    as_user(temp_dir.path(), "alice")
        .args(["expense", "edit", &id, "--amount", "15.25", "--category", "Fun"])
        .assert()
        .success()
        .stdout(contains(format!("Updated expense: {}", id)));

    as_user(temp_dir.path(), "alice")
        .args(["expense", "search", "snack"])
        .assert()
        .success()
        .stdout(contains("$15.25"))
        .stdout(contains("Fun"));

    as_user(temp_dir.path(), "alice")
        .args(["expense", "delete", &id])
        .assert()
        .success();

    as_user(temp_dir.path(), "alice")
        .args(["expense", "delete", &id])
        .assert()
        .failure()
        .stderr(contains("Expense not found"));
}

#[test]
fn cli_users_are_isolated() {
    let temp_dir = TempDir::new().unwrap();
    add_expense(temp_dir.path(), "alice", &["42", "Food", "-m", "Groceries"]);

    as_user(temp_dir.path(), "bob")
        .args(["expense", "add", "5", "Transport"])
        .assert()
        .success();

    as_user(temp_dir.path(), "bob")
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("Groceries").not());

    as_user(temp_dir.path(), "alice")
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("Groceries"));
}

#[test]
fn cli_balance_report() {
    let temp_dir = TempDir::new().unwrap();

    as_user(temp_dir.path(), "alice")
        .args(["income", "add", "1000", "Salary"])
        .assert()
        .success();
    add_expense(temp_dir.path(), "alice", &["250", "Rent"]);

    as_user(temp_dir.path(), "alice")
        .args(["report", "balance"])
        .assert()
        .success()
        .stdout(contains("Current Balance: $750.00 (Positive)"));

    as_user(temp_dir.path(), "alice")
        .args(["report", "timeline"])
        .assert()
        .success()
        .stdout(contains("INCOME"))
        .stdout(contains("EXPENSE"));
}

#[test]
fn cli_period_report_validates_prefix() {
    let temp_dir = TempDir::new().unwrap();
    add_expense(temp_dir.path(), "alice", &["8", "Food", "-d", "2025-03-02"]);
    add_expense(temp_dir.path(), "alice", &["9", "Food", "-d", "2025-04-02"]);

    as_user(temp_dir.path(), "alice")
        .args(["report", "period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("Total: $8.00"));

    as_user(temp_dir.path(), "alice")
        .args(["report", "period", "March"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn cli_category_management() {
    let temp_dir = TempDir::new().unwrap();

    as_user(temp_dir.path(), "alice")
        .args(["category", "add", "Pets"])
        .assert()
        .success();

    as_user(temp_dir.path(), "alice")
        .args(["category", "add", "pets"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    as_user(temp_dir.path(), "alice")
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Pets"));

    as_user(temp_dir.path(), "alice")
        .args(["category", "list", "--income"])
        .assert()
        .success()
        .stdout(contains("Salary"))
        .stdout(contains("Pets").not());
}

#[test]
fn cli_survives_corrupt_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("shared.json");
    std::fs::write(&data_file, "{ not json").unwrap();

    as_user(temp_dir.path(), "alice")
        .arg("--data-file")
        .arg(&data_file)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(contains("No expenses found."));

    as_user(temp_dir.path(), "alice")
        .arg("--data-file")
        .arg(&data_file)
        .args(["expense", "add", "3", "Food"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&data_file).unwrap();
    assert!(contents.trim_start().starts_with('['));
}

#[test]
fn cli_history_lists_changes() {
    let temp_dir = TempDir::new().unwrap();
    add_expense(temp_dir.path(), "alice", &["7", "Food"]);

    as_user(temp_dir.path(), "alice")
        .arg("history")
        .assert()
        .success()
        .stdout(contains("alice CREATE Expense"));

    as_user(temp_dir.path(), "bob")
        .arg("history")
        .assert()
        .success()
        .stdout(contains("No history recorded for 'bob'."));
}

#[test]
fn cli_config_needs_no_user() {
    let temp_dir = TempDir::new().unwrap();

    tracker(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Profiles file:"))
        .stdout(contains("Audit enabled:   true"));
}
