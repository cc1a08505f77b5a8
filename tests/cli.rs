use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_DATA_DIR", dir.path()).env("TALLY_LOG", "off");
    cmd
}

fn add_expense(dir: &TempDir, amount: &str, date: &str) {
    tally(dir)
        .args(["expense", "add", amount, "Spend", "-c", "Misc", "--date", date])
        .assert()
        .success();
}

/// Run a command and pull the `[id]` it echoes back
fn created_id(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let start = stdout.rfind('[').unwrap() + 1;
    let end = stdout[start..].find(']').unwrap() + start;
    stdout[start..end].to_string()
}

#[test]
fn init_writes_config() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Tally"));
    assert!(dir.path().join("config.json").exists());

    tally(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));

    tally(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol: $"));
}

#[test]
fn budget_status_carries_rollover() {
    let dir = TempDir::new().unwrap();
    tally(&dir).args(["budget", "add", "300"]).assert().success();
    add_expense(&dir, "8", "2024-11-01");
    add_expense(&dir, "5", "2024-11-02");
    add_expense(&dir, "15", "2024-11-03");
    add_expense(&dir, "3", "2024-11-04");

    tally(&dir)
        .args(["budget", "status", "--date", "2024-11-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Day 4 of 30: $9.00 available today (includes $2.00 rollover)",
        ))
        .stdout(predicate::str::contains("Spent so far:  $31.00 of $300.00"));

    tally(&dir)
        .args(["budget", "ledger", "--date", "2024-11-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-11-03"))
        .stdout(predicate::str::contains("$17.00"));
}

#[test]
fn budget_status_reports_deficit() {
    let dir = TempDir::new().unwrap();
    tally(&dir).args(["budget", "add", "300"]).assert().success();
    add_expense(&dir, "15", "2024-11-01");
    add_expense(&dir, "20", "2024-11-02");

    tally(&dir)
        .args(["budget", "status", "--date", "2024-11-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over budget by $10.00 today"))
        .stdout(predicate::str::contains("Status:        Over budget"));
}

#[test]
fn budget_status_requires_active_budget() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["budget", "status", "--date", "2024-11-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active monthly overall budget"));
}

#[test]
fn expense_list_and_delete() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args([
            "expense", "add", "12.50", "Lunch", "-c", "Food", "--date", "2024-11-04",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded $12.50 for 'Lunch' on 2024-11-04"));

    tally(&dir)
        .args(["expense", "list", "--month", "2024-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("-$12.50"));

    tally(&dir)
        .args(["expense", "list", "--month", "2024-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));

    tally(&dir)
        .args(["expense", "delete", "exp-zzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found"));
}

#[test]
fn card_payment_lowers_utilization() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["card", "add", "Visa", "--limit", "1000", "--balance", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "High utilization - pay down immediately",
        ));

    tally(&dir)
        .args(["card", "pay", "visa", "350", "--date", "2024-11-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("balance now $50.00"));

    tally(&dir)
        .args(["card", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Excellent utilization"));

    tally(&dir)
        .args(["card", "payments", "Visa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total paid: $350.00"));
}

#[test]
fn insights_report() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "40", "2024-10-14");
    add_expense(&dir, "60", "2024-11-03");

    tally(&dir)
        .args(["report", "insights", "--date", "2024-11-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total spending this month: $60.00"))
        .stdout(predicate::str::contains("2024-10"));
}

#[test]
fn log_lists_mutations() {
    let dir = TempDir::new().unwrap();
    tally(&dir).args(["budget", "add", "300"]).assert().success();

    tally(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Budget bud-"));
}

#[test]
fn rejects_bad_input() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["expense", "add", "5", "Snack", "--date", "11/04/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));

    tally(&dir)
        .args(["budget", "add", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn expense_edit_updates_and_audits() {
    let dir = TempDir::new().unwrap();
    let id = created_id(tally(&dir).args([
        "expense", "add", "12.50", "Lunch", "-c", "Food", "--date", "2024-11-04",
    ]));

    tally(&dir)
        .args(["expense", "edit", id.as_str(), "--amount", "20", "--description", "Dinner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated expense 'Dinner'"))
        .stdout(predicate::str::contains("-$20.00 on 2024-11-04"));

    tally(&dir)
        .args(["expense", "edit", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes specified"));

    tally(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dinner"))
        .stdout(predicate::str::contains("Lunch").not());

    tally(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE Expense"))
        .stdout(predicate::str::contains("description"));
}

#[test]
fn budget_edit_changes_daily_share() {
    let dir = TempDir::new().unwrap();
    let id = created_id(tally(&dir).args(["budget", "add", "300"]));

    tally(&dir)
        .args(["budget", "edit", id.as_str(), "--amount", "600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monthly overall budget: $600.00"));

    tally(&dir)
        .args(["budget", "status", "--date", "2024-11-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of 30: $20.00 available today"))
        .stdout(predicate::str::contains("Daily budget:  $20.00"));

    tally(&dir)
        .args(["budget", "edit", id.as_str(), "--amount", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn card_edit_renames_and_raises_limit() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["card", "add", "Visa", "--limit", "1000", "--balance", "400", "-m", "visa"])
        .assert()
        .success();

    tally(&dir)
        .args(["card", "edit", "visa", "--name", "Visa Gold", "--limit", "5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated card Visa Gold (visa)"))
        .stdout(predicate::str::contains("Excellent utilization"));

    tally(&dir)
        .args(["card", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Visa Gold"));

    tally(&dir)
        .args(["card", "edit", "Visa Gold", "--clear-method"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated card Visa Gold ["));
}

#[test]
fn amounts_with_extra_precision_or_overflow_are_rejected() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["expense", "add", "10.999", "Snack"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than two decimal places"));

    tally(&dir)
        .args(["budget", "add", "92233720368547759"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount is too large"));
}
