//! Integration tests for the runway binary.

use std::path::Path;
use std::process::Command;

fn run(store: &Path, args: &[&str]) -> (String, String, i32) {
    let config = store.join("no-config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_runway"))
        .arg("--store")
        .arg(store)
        // Tests must not depend on a user's ~/.config/runway/config.toml.
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute runway");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn new_model(store: &Path) -> String {
    let (stdout, stderr, code) = run(
        store,
        &[
            "new",
            "--salary",
            "100000",
            "--age",
            "30",
            "--retire-at",
            "33",
            "--growth",
            "10",
        ],
    );
    assert_eq!(code, 0, "{}", stderr);
    stdout.trim().to_string()
}

#[test]
fn test_new_reports_monthly_growth() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run(
        dir.path(),
        &[
            "new", "--salary", "100000", "--age", "30", "--retire-at", "33", "--growth", "10",
        ],
    );
    assert_eq!(code, 0);
    assert!(stderr.contains("3 working years; monthly growth rate 0.8%"), "{}", stderr);
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_new_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let id = new_model(dir.path());
    assert!(!id.is_empty());

    let (stdout, _, code) = run(dir.path(), &["list"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), id);
}

#[test]
fn test_show_prints_table() {
    let dir = tempfile::tempdir().unwrap();
    let id = new_model(dir.path());

    let (stdout, _, code) = run(dir.path(), &["show", &id]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("My Financial Plan\n"));
    assert!(stdout.contains("Year 3"));
    assert!(stdout.contains("[Income]"));
    assert!(stdout.contains("$121,000"));

    let (stdout, _, code) = run(dir.path(), &["show", &id, "--view", "monthly"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Month 1"));
    assert!(stdout.contains("$8,333"));
}

#[test]
fn test_formula_and_set() {
    let dir = tempfile::tempdir().unwrap();
    let id = new_model(dir.path());

    let (_, stderr, code) = run(
        dir.path(),
        &[
            "formula",
            &id,
            "tax",
            "ROW(annual_salary) * 0.2",
            "--type",
            "expense",
            "--label",
            "Tax",
        ],
    );
    assert_eq!(code, 0, "{}", stderr);

    let (_, stderr, code) = run(dir.path(), &["set", &id, "annual_salary", "1", "50000"]);
    assert_eq!(code, 0, "{}", stderr);

    let (stdout, _, code) = run(dir.path(), &["export", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("| Tax | $10,000 | $22,000 | $24,200 |"));
    assert!(stdout.contains("| **Expenses** |"));
}

#[test]
fn test_set_rejects_non_editable_row() {
    let dir = tempfile::tempdir().unwrap();
    let id = new_model(dir.path());

    let (_, stderr, code) = run(dir.path(), &["set", &id, "current_age", "1", "31"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not editable"));

    let (_, stderr, code) = run(dir.path(), &["set", &id, "annual_salary", "0", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("numbered from 1"));
}

#[test]
fn test_new_rejects_invalid_answers() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run(
        dir.path(),
        &["new", "--salary", "0", "--age", "30", "--retire-at", "65"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("annual salary"));
}

#[test]
fn test_show_unknown_model() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run(dir.path(), &["show", "missing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Model not found"));
}

#[test]
fn test_calc_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    std::fs::write(
        &input,
        r#"{
            "model": {
                "id": "m1", "name": "Plan", "num_periods": 3,
                "created_at": "2026-01-01T00:00:00Z",
                "updated_at": "2026-01-01T00:00:00Z"
            },
            "rows": [
                {"id": "r1", "category": "salary", "row_type": "income", "label": "Salary",
                 "display_order": 1,
                 "cells": [
                    {"period_index": 0, "value_type": "input", "input_value": 1000},
                    {"period_index": 1, "value_type": "input", "input_value": 1000},
                    {"period_index": 2, "value_type": "input", "input_value": 1000}
                 ]},
                {"id": "r2", "category": "cumulative", "row_type": "calculation",
                 "label": "Cumulative", "display_order": 2,
                 "cells": [
                    {"period_index": 0, "value_type": "formula", "formula": "PREV(cumulative) + ROW(salary)"},
                    {"period_index": 1, "value_type": "formula", "formula": "PREV(cumulative) + ROW(salary)"},
                    {"period_index": 2, "value_type": "formula", "formula": "PREV(cumulative) + ROW(salary)"}
                 ]},
                {"id": "r3", "category": "broken", "row_type": "calculation",
                 "label": "Broken", "display_order": 3,
                 "cells": [
                    {"period_index": 0, "value_type": "formula", "formula": "ROW(salary) +* 2"}
                 ]}
            ]
        }"#,
    )
    .unwrap();

    let (_, stderr, code) = run(
        dir.path(),
        &[
            "calc",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0, "{}", stderr);
    assert!(stderr.contains("row r3 period 1"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let cumulative: Vec<f64> = json["rows"][1]["cells"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["calculated_value"].as_f64().unwrap())
        .collect();
    assert_eq!(cumulative, [1000.0, 2000.0, 3000.0]);
    assert_eq!(json["rows"][2]["cells"][0]["calculated_value"], 0.0);
}

#[test]
fn test_calc_long_formula() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.json");
    let formula = vec!["ROW(salary)"; 20_000].join(" + ");
    let snapshot = serde_json::json!({
        "model": {
            "id": "m1", "name": "Plan", "num_periods": 1,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        },
        "rows": [
            {"id": "r1", "category": "salary", "row_type": "income", "label": "Salary",
             "cells": [{"period_index": 0, "value_type": "input", "input_value": 1}]},
            {"id": "r2", "category": "big", "row_type": "calculation", "label": "Big",
             "display_order": 1,
             "cells": [{"period_index": 0, "value_type": "formula", "formula": formula}]}
        ]
    });
    std::fs::write(&input, snapshot.to_string()).unwrap();

    let (stdout, stderr, code) = run(dir.path(), &["calc", input.to_str().unwrap()]);
    assert_eq!(code, 0, "{}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["rows"][1]["cells"][0]["calculated_value"], 20_000.0);
}

#[test]
fn test_calc_rejects_huge_period_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("huge.json");
    std::fs::write(
        &input,
        r#"{"model": {"id": "m1", "name": "Plan", "num_periods": 1000000000000,
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"}}"#,
    )
    .unwrap();

    let (_, stderr, code) = run(dir.path(), &["calc", input.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("more than the limit"), "{}", stderr);
}
