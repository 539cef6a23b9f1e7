#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn wl() -> Command {
    cargo_bin_cmd!("weighlog")
}

/// `weighlog --db <db> --test <args...>`
pub fn wl_db(db_path: &str) -> Command {
    let mut cmd = wl();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_weighlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write an input file into the temp dir and return its path
pub fn write_input(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(name);
    fs::write(&path, content).expect("write input file");
    path.to_string_lossy().to_string()
}

/// Three transactions: John twice (100 + 50), Jane once (25, impounded)
pub const SAMPLE_CSV: &str = "\
Driver Name,Date,Impounded,Amount Due,GVM Fine,D1 Fine
John,2024-01-01 09:15,no,100,,
John,2024-01-02 16:40,no,,50,
Jane,2024-01-01 23:05,yes,,,25
";

/// Init a fresh DB and import [`SAMPLE_CSV`] as upload #1
pub fn init_db_with_sample(name: &str) -> String {
    let db_path = setup_test_db(name);

    wl_db(&db_path).arg("init").assert().success();

    let csv = write_input(&format!("{name}_sample.csv"), SAMPLE_CSV);
    wl_db(&db_path).args(["import", &csv]).assert().success();

    db_path
}

/// Run `report --json` and parse stdout
pub fn report_json(db_path: &str, extra: &[&str]) -> serde_json::Value {
    let out = wl_db(db_path)
        .arg("report")
        .arg("--json")
        .args(extra)
        .output()
        .expect("run report");
    assert!(out.status.success(), "report failed: {:?}", out);

    let stdout = String::from_utf8_lossy(&out.stdout);
    let start = stdout.find('{').expect("json object in output");
    serde_json::from_str(&stdout[start..]).expect("valid report json")
}
