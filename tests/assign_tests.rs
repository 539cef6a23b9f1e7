use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_sample, report_json, temp_out, wl_db, write_input};

#[test]
fn test_assign_changes_groups_and_alerts() {
    let db_path = init_db_with_sample("assign_changes_groups");

    wl_db(&db_path)
        .args(["assign", "John", "--group", "North", "--shift", "Day"])
        .assert()
        .success();

    let report = report_json(&db_path, &[]);
    let groups = report["byGroup"].as_array().unwrap();
    assert_eq!(groups[0]["key"], "North");
    assert_eq!(groups[0]["count"], 2);
    assert_eq!(groups[1]["key"], "Unassigned");
    assert_eq!(report["summary"]["topGroup"]["name"], "North");

    let unassigned: Vec<_> = report["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["kind"] == "unassigned")
        .collect();
    assert_eq!(unassigned.len(), 1);
    assert!(unassigned[0]["message"].as_str().unwrap().starts_with("1 person"));
}

#[test]
fn test_assign_list_and_remove() {
    let db_path = init_db_with_sample("assign_list_remove");

    wl_db(&db_path)
        .args(["assign", "Jane", "--shift", "Night"])
        .assert()
        .success();

    wl_db(&db_path)
        .args(["assign", "--list"])
        .assert()
        .success()
        .stdout(contains("Jane").and(contains("Night")));

    wl_db(&db_path)
        .args(["assign", "Jane", "--remove"])
        .assert()
        .success()
        .stdout(contains("Removed assignments for Jane"));

    wl_db(&db_path)
        .args(["assign", "--list"])
        .assert()
        .success()
        .stdout(contains("No assignments stored"));
}

#[test]
fn test_assign_import_export_document() {
    let db_path = init_db_with_sample("assign_import_export");

    let input = write_input(
        "assign_import_export.json",
        r#"{"personToGroup": {"John": "A", "Jane": "B"}, "personToShift": {"Jane": "Night"}}"#,
    );
    wl_db(&db_path)
        .args(["assign", "--import", &input])
        .assert()
        .success()
        .stdout(contains("Merged assignments for 2 people"));

    let out = temp_out("assign_import_export", "json");
    wl_db(&db_path)
        .args(["assign", "--export", &out])
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["personToGroup"]["Jane"], "B");
    assert_eq!(doc["personToShift"]["Jane"], "Night");
}

#[test]
fn test_assign_rejects_placeholder_name() {
    let db_path = init_db_with_sample("assign_placeholder");

    wl_db(&db_path)
        .args(["assign", "N/A", "--group", "North"])
        .assert()
        .failure()
        .stderr(contains("not a valid person name"));
}
