use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn add_and_list_transactions() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["txn", "add", "25.40", "Food", "--date", "2024-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded: 2024-01-05 | Food"));

    fintrack(&dir)
        .args(["txn", "add", "3000", "Salary", "--type", "income", "--date", "31/01/2024"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("$25.40"));

    assert!(dir.path().join("data").join("transactions.json").exists());
}

#[test]
fn budget_alert_reported_on_add() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["budget", "set", "Food", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for Food set to $100.00"));

    fintrack(&dir)
        .args(["txn", "add", "120", "Food", "--date", "2024-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Alert: You've exceeded the budget for Food by $20.00.",
        ));

    fintrack(&dir)
        .args(["budget", "alerts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeded the budget for Food"));
}

#[test]
fn goal_recommendation() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["goal", "set", "Car", "1200", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("you need to save $100.00 per month"));

    fintrack(&dir)
        .args(["goal", "set", "Boat", "1200", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Months to save must be greater than zero"));
}

#[test]
fn import_skips_malformed_rows() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bank.csv");
    fs::write(
        &file,
        "date,amount,category,type\n\
         2024-01-05,10,Food,expense\n\
         2024-01-06,oops,Food,expense\n\
         2024-01-07,20,Food,expense\n",
    )
    .unwrap();

    fintrack(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping row 3"))
        .stdout(predicate::str::contains("Imported 2 transactions"));
}

#[test]
fn import_unsupported_format_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bank.txt");
    fs::write(&file, "whatever").unwrap();

    fintrack(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn export_writes_csv() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["txn", "add", "12.5", "Food", "--date", "2024-01-05"])
        .assert()
        .success();

    let out = dir.path().join("out.csv");
    fintrack(&dir).arg("export").arg(&out).assert().success();

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content, "date,category,amount,type\n2024-01-05,Food,12.50,expense\n");
}

#[test]
fn report_write_and_compare() {
    let dir = TempDir::new().unwrap();
    for (amount, date) in [("200", "2024-01-05"), ("100", "2024-02-05")] {
        fintrack(&dir)
            .args(["txn", "add", amount, "Food", "--date", date])
            .assert()
            .success();
    }

    fintrack(&dir)
        .args(["report", "compare", "2024-01", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-50.00%"));

    let report = dir.path().join("report.txt");
    fintrack(&dir)
        .args(["report", "write"])
        .arg(&report)
        .assert()
        .success();
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("MONTHLY SPENDING SUMMARY"));
    assert!(text.contains("Total spending decreased by 50.00%."));
}

#[test]
fn shell_reads_menu_choices() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("shell")
        .write_stdin("7\n99\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("FINANCIAL SUMMARY"))
        .stdout(predicate::str::contains("Invalid choice '99'"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn audit_lists_changes() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["budget", "set", "Rent", "900"])
        .assert()
        .success();

    fintrack(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Budget Rent"));
}
