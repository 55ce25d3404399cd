use assert_cmd::Command;
use chrono::{Datelike, Local};
use predicates::prelude::*;
use serde_json::Value;

fn hr_metrics() -> Command {
    Command::cargo_bin("hr-metrics").unwrap()
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── single computations ────────────────────────────────────────────────

#[test]
fn test_business_days_spanning_weekend() {
    let value = stdout_json(hr_metrics().args([
        "business-days",
        "--start",
        "2024-01-05",
        "--end",
        "2024-01-08",
    ]));
    assert_eq!(value["business_days"], 2);
    assert_eq!(value["start"], "2024-01-05");
}

#[test]
fn test_business_days_normalizes_datetimes() {
    let value = stdout_json(hr_metrics().args([
        "business-days",
        "--start",
        "2024-01-01T18:00:00+01:00",
        "--end",
        "2024-01-05",
    ]));
    assert_eq!(value["start"], "2024-01-01");
    assert_eq!(value["business_days"], 5);
}

#[test]
fn test_business_days_invalid_date_fails() {
    hr_metrics()
        .args(["business-days", "--start", "01/05/2024", "--end", "2024-01-08"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_hours() {
    let value = stdout_json(hr_metrics().args(["hours", "--entry", "09:00", "--exit", "17:30"]));
    assert_eq!(value["hours"], 8.5);
}

#[test]
fn test_hours_overnight_is_zero() {
    let value = stdout_json(hr_metrics().args(["hours", "--entry", "17:00", "--exit", "09:00"]));
    assert_eq!(value["hours"], 0.0);
}

#[test]
fn test_hours_out_of_range_fails() {
    hr_metrics()
        .args(["hours", "--entry", "09:00", "--exit", "24:30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn test_late() {
    let value = stdout_json(hr_metrics().args(["late", "--scheduled", "08:30", "--actual", "08:47"]));
    assert_eq!(value["minutes_late"], 17);
}

// ── statistics ─────────────────────────────────────────────────────────

#[test]
fn test_absences_from_stdin() {
    let input = r#"[
        {"dateDebut": "2024-01-03", "dateFin": "2024-01-05", "motif": "Maladie"},
        {"dateDebut": "2023-03-06", "dateFin": "2023-03-17", "motif": "Congé"},
        {"dateDebut": "garbage", "dateFin": "2024-01-05", "motif": "Congé"}
    ]"#;
    let value = stdout_json(hr_metrics().args(["absences", "--year", "2024"]).write_stdin(input));
    assert_eq!(value["total_business_days_this_year"], 3);
    assert_eq!(value["record_count_this_year"], 1);
    assert_eq!(value["longest_record_days"], 10);
    assert_eq!(value["monthly_histogram"][0], 3);
    assert_eq!(value["category_totals"]["Congé"], 10);
    assert_eq!(value["skipped"][0]["index"], 2);
}

#[test]
fn test_absences_skipped_record_is_logged() {
    hr_metrics()
        .args(["absences", "--year", "2024", "-"])
        .env_remove("RUST_LOG")
        .write_stdin(r#"[{"start": "nope", "end": "2024-01-05"}]"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping unparsable record"));
}

#[test]
fn test_absences_null_field_skips_only_that_record() {
    let input = r#"[
        {"dateDebut": "2024-01-03", "dateFin": "2024-01-05", "motif": "Maladie"},
        {"dateDebut": "2024-02-01", "dateFin": null, "motif": "Congé"}
    ]"#;
    let value = stdout_json(hr_metrics().args(["absences", "--year", "2024"]).write_stdin(input));
    assert_eq!(value["total_business_days_this_year"], 3);
    assert_eq!(value["skipped"].as_array().unwrap().len(), 1);
    assert_eq!(value["skipped"][0]["index"], 1);
}

#[test]
fn test_pointage_null_exit_skips_only_that_record() {
    let input = r#"[
        {"dateJour": "2024-01-08", "heureEntree": "09:00", "heureSortie": "17:30"},
        {"dateJour": "2024-01-09", "heureEntree": "08:00", "heureSortie": null}
    ]"#;
    let value = stdout_json(hr_metrics().args(["pointage", "--year", "2024"]).write_stdin(input));
    assert_eq!(value["total_hours_this_year"], 8.5);
    assert_eq!(value["skipped"][0]["index"], 1);
}

#[test]
fn test_year_defaults_to_current_year() {
    let year = Local::now().year();
    let input = format!(
        r#"[
            {{"start": "{year}-06-03", "end": "{year}-06-03", "category": "Congé"}},
            {{"start": "{prior}-06-03", "end": "{prior}-06-03", "category": "Congé"}}
        ]"#,
        prior = year - 1
    );
    let value = stdout_json(hr_metrics().arg("absences").write_stdin(input));
    assert_eq!(value["record_count_this_year"], 1);
}

#[test]
fn test_verbose_flag_enables_debug_logging() {
    let input = r#"[{"start": "2024-01-03", "end": "2024-01-05", "category": "Maladie"}]"#;

    hr_metrics()
        .args(["absences", "--year", "2024"])
        .env_remove("RUST_LOG")
        .write_stdin(input)
        .assert()
        .success()
        .stderr(predicate::str::contains("aggregated absences").not());

    hr_metrics()
        .args(["-v", "absences", "--year", "2024"])
        .env_remove("RUST_LOG")
        .write_stdin(input)
        .assert()
        .success()
        .stderr(predicate::str::contains("aggregated absences"));
}

#[test]
fn test_absences_rejects_non_array_input() {
    hr_metrics()
        .args(["absences", "--year", "2024"])
        .write_stdin(r#"{"start": "2024-01-01"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array of absence records"));
}

#[test]
fn test_absences_missing_file_fails() {
    hr_metrics()
        .args(["absences", "--year", "2024", "does/not/exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_pointage_from_stdin() {
    let input = r#"[
        {"dateJour": "2024-01-08", "heureEntree": "09:00", "heureSortie": "17:30"},
        {"dateJour": "2024-01-09", "heureEntree": "08:00", "heureSortie": "12:00"}
    ]"#;
    let value = stdout_json(hr_metrics().args(["pointage", "--year", "2024"]).write_stdin(input));
    assert_eq!(value["total_hours_this_year"], 12.5);
    assert_eq!(value["average_hours_this_year"], 6.25);
}

#[test]
fn test_retards_from_stdin() {
    let input = r#"[{"date": "2024-02-01", "scheduled": "08:30", "actual": "08:50"}]"#;
    let value = stdout_json(hr_metrics().args(["retards", "--year", "2024"]).write_stdin(input));
    assert_eq!(value["total_minutes_this_year"], 20);
    assert_eq!(value["late_count_this_year"], 1);
    assert_eq!(value["monthly_minutes"][1], 20);
}

#[test]
fn test_compact_output_is_single_line() {
    hr_metrics()
        .args(["--compact", "late", "--scheduled", "08:30", "--actual", "08:31"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"^\{"scheduled":"08:30","actual":"08:31","minutes_late":1\}\n$"#).unwrap());
}
