//! E2E тесты для CLI инструмента `ventas-report`.
//!
//! Проверяем отчёт в обоих форматах, чтение из stdin и выгрузку
//! очищенной таблицы.

use std::fs;

use assert_cmd::Command;
use e2e_tests::{fixture, read_fixture};
use predicates::prelude::*;
use tempfile::tempdir;

/// Создать команду для запуска ventas-report.
///
/// `cargo_bin` deprecated из-за edge case с custom build directories,
/// но это единственный способ для кросс-крейтовых бинарников.
#[expect(deprecated)]
fn ventas_report() -> Command {
    Command::cargo_bin("ventas-report").unwrap()
}

fn raw_fixture() -> String {
    fixture("ventas_raw.csv").to_str().unwrap().to_string()
}

// ============================================================================
// Отчёт
// ============================================================================

#[test]
fn test_text_report() {
    ventas_report()
        .args(["--input", raw_fixture().as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows before cleaning: 10 | Rows after cleaning: 4"))
        .stdout(predicate::str::contains("Total sales: € 39.60"))
        .stdout(predicate::str::contains("Total units: 8"))
        .stdout(predicate::str::contains("duplicates=1"))
        .stdout(predicate::str::contains("unknown_family=1"));
}

#[test]
fn test_json_report() {
    let output = ventas_report()
        .args(["-i", raw_fixture().as_str(), "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["count_before"], 10);
    assert_eq!(json["count_after"], 4);
    assert_eq!(json["duplicates"], 1);
    assert_eq!(json["totals"]["total_revenue"], 39.6);
    assert_eq!(json["totals"]["by_time_slot"]["Comida"], 33.5);
    assert_eq!(json["totals"]["by_family"]["Principal"], 25.0);

    let top: Vec<_> = json["totals"]["top_products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry[0].as_str().unwrap().to_string())
        .collect();
    assert_eq!(top, ["paella", "tarta", "cafe", "tostada"]);
}

#[test]
fn test_top_limit() {
    let output = ventas_report()
        .args(["-i", raw_fixture().as_str(), "--format", "json", "--top", "2"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totals"]["top_products"].as_array().unwrap().len(), 2);
}

#[test]
fn test_preview() {
    ventas_report()
        .args(["-i", raw_fixture().as_str(), "--preview", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Raw preview:"))
        .stdout(predicate::str::contains("2024-03-01,paella,comida,principal,2,12.5,999"))
        .stdout(predicate::str::contains("2024-03-01,paella,Comida,Principal,2,12.5,25"))
        .stdout(predicate::str::contains("2024-03-01,cafe,Desayuno,Bebida,3,1.2,3.6"))
        .stdout(predicate::str::contains("tostada,Desayuno").not());
}

#[test]
fn test_stdin_input() {
    ventas_report()
        .write_stdin(read_fixture("ventas_raw.csv").unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows after cleaning: 4"));
}

#[test]
fn test_blank_line_inside_table_is_counted() {
    let raw = read_fixture("ventas_raw.csv").unwrap().replacen("999\n", "999\n\n", 1);

    ventas_report()
        .write_stdin(raw)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows before cleaning: 11 | Rows after cleaning: 4"))
        .stdout(predicate::str::contains("invalid_date=2"));
}

#[test]
fn test_empty_input() {
    ventas_report()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows before cleaning: 0 | Rows after cleaning: 0"))
        .stdout(predicate::str::contains("Total sales: € 0.00"));
}

// ============================================================================
// Выгрузка
// ============================================================================

#[test]
fn test_export_matches_fixture() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("clean.csv");

    ventas_report()
        .args(["-i", raw_fixture().as_str(), "--export", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 4 record(s)"));

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, read_fixture("ventas_clean.csv").unwrap());
}

#[test]
fn test_export_default_file_name() {
    let dir = tempdir().unwrap();

    ventas_report()
        .current_dir(dir.path())
        .args(["-i", raw_fixture().as_str(), "--export"])
        .assert()
        .success();

    assert!(dir.path().join("ventas_clean.csv").exists());
}

#[test]
fn test_exported_table_cleans_to_itself() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    ventas_report()
        .args(["-i", raw_fixture().as_str(), "-e", first.to_str().unwrap()])
        .assert()
        .success();
    ventas_report()
        .args(["-i", first.to_str().unwrap(), "-e", second.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows before cleaning: 4 | Rows after cleaning: 4"))
        .stdout(predicate::str::contains("Total sales: € 39.60"));

    assert_eq!(fs::read_to_string(&first).unwrap(), fs::read_to_string(&second).unwrap());
}

// ============================================================================
// Ошибки
// ============================================================================

#[test]
fn test_missing_input_file() {
    ventas_report()
        .args(["--input", "does_not_exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_invalid_format() {
    ventas_report()
        .args(["-i", raw_fixture().as_str(), "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
