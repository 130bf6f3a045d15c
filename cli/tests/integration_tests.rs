use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runs the `packing` binary against `db` with host detection pinned to desktop.
fn packing(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_packing"))
        .arg("--db")
        .arg(db)
        .args(args)
        .env_remove("PACKING_HOST")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run packing")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("ledger.db")
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_init_creates_database_file() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let out = packing(&db, &["init"]);
    assert!(out.status.success(), "init failed: {}", stderr(&out));
    assert!(db.exists());

    let out = packing(&db, &["status", "--json"]);
    assert!(out.status.success());
    let status = json(&out);
    assert_eq!(status["tables_exist"], true);
    assert_eq!(status["containers"], 0);
}

#[test]
fn test_container_lifecycle() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let out = packing(
        &db,
        &[
            "container", "add", "--name", "40ft HC", "--length", "12.03", "--width", "2.35",
            "--height", "2.69", "--max-weight", "26500",
        ],
    );
    assert!(out.status.success(), "add failed: {}", stderr(&out));
    assert!(stdout(&out).contains("Created container 1"));

    let out = packing(&db, &["container", "show", "1", "--json"]);
    let container = json(&out);
    assert_eq!(container["name"], "40ft HC");
    assert_eq!(container["max_weight"], 26500.0);

    let out = packing(
        &db,
        &[
            "container", "update", "1", "--name", "40ft", "--length", "12.03", "--width", "2.35",
            "--height", "2.39",
        ],
    );
    assert!(out.status.success(), "update failed: {}", stderr(&out));

    let out = packing(&db, &["container", "list", "--json"]);
    let items = json(&out);
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["name"], "40ft");
    assert!(items[0]["max_weight"].is_null());

    let out = packing(&db, &["container", "remove", "1"]);
    assert!(out.status.success());
    let out = packing(&db, &["container", "list"]);
    assert!(stdout(&out).contains("(none)"));
}

#[test]
fn test_missing_record_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    for args in [
        &["container", "show", "42"][..],
        &["transformer", "remove", "42"][..],
        &["order", "show", "42"][..],
    ] {
        let out = packing(&db, args);
        assert!(!out.status.success(), "{args:?} should fail");
        assert!(stderr(&out).contains("with id 42"), "{}", stderr(&out));
    }
}

#[test]
fn test_invalid_payload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let out = packing(
        &db,
        &[
            "transformer", "add", "--name", "T1", "--length", "0", "--width", "1", "--height", "1",
        ],
    );
    assert!(!out.status.success());
    assert!(stderr(&out).contains("validation failed"), "{}", stderr(&out));

    let out = packing(&db, &["transformer", "list", "--json"]);
    assert_eq!(json(&out), serde_json::json!([]));
}

#[test]
fn test_order_add_defaults_date() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let out = packing(&db, &["order", "add", "--number", "PO-1"]);
    assert!(out.status.success(), "add failed: {}", stderr(&out));

    let out = packing(&db, &["order", "show", "1", "--json"]);
    let order = json(&out);
    assert_eq!(order["order_number"], "PO-1");
    assert!(!order["order_date"].as_str().unwrap().is_empty());
}

#[test]
fn test_order_update_keeps_stored_date_when_omitted() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);
    packing(&db, &["order", "add", "--date", "2020-01-15"]);

    let out = packing(&db, &["order", "update", "1", "--notes", "rush"]);
    assert!(out.status.success(), "update failed: {}", stderr(&out));

    let order = json(&packing(&db, &["order", "show", "1", "--json"]));
    assert_eq!(order["order_date"], "2020-01-15");
    assert_eq!(order["notes"], "rush");

    let out = packing(&db, &["order", "update", "1", "--date", "2020-02-01"]);
    assert!(out.status.success(), "update failed: {}", stderr(&out));
    let order = json(&packing(&db, &["order", "show", "1", "--json"]));
    assert_eq!(order["order_date"], "2020-02-01");
    assert!(order["notes"].is_null());

    let out = packing(&db, &["order", "update", "7", "--notes", "rush"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("no order with id 7"), "{}", stderr(&out));
}

#[test]
fn test_calculate_snapshots_referenced_records() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    packing(
        &db,
        &[
            "container", "add", "--name", "20ft", "--length", "5.9", "--width", "2.35",
            "--height", "2.39",
        ],
    );
    packing(
        &db,
        &[
            "transformer", "add", "--name", "T-400", "--length", "1.2", "--width", "0.9",
            "--height", "1.4", "--weight", "1800",
        ],
    );
    packing(&db, &["order", "add", "--date", "2026-03-01"]);

    let out = packing(
        &db,
        &[
            "order", "calculate", "1", "--container", "1", "--transformer", "1", "--stacking",
            "--total-fit", "8",
        ],
    );
    assert!(out.status.success(), "calculate failed: {}", stderr(&out));

    // The snapshot survives removal of the source container.
    packing(&db, &["container", "remove", "1"]);

    let out = packing(&db, &["order", "calculations", "1", "--json"]);
    let calcs = json(&out);
    assert_eq!(calcs.as_array().unwrap().len(), 1);
    assert_eq!(calcs[0]["container_name"], "20ft");
    assert_eq!(calcs[0]["container_length"], 5.9);
    assert_eq!(calcs[0]["transformer_weight"], 1800.0);
    assert_eq!(calcs[0]["stacking_enabled"], true);
    assert_eq!(calcs[0]["total_fit"], 8);
}

#[test]
fn test_calculate_with_explicit_dimensions() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);
    packing(&db, &["order", "add", "--date", "2026-03-01"]);

    let out = packing(
        &db,
        &[
            "order",
            "calculate",
            "1",
            "--container-dims",
            "12.03,2.35,2.69",
            "--transformer-dims",
            "1.2,0.9,1.4",
        ],
    );
    assert!(out.status.success(), "calculate failed: {}", stderr(&out));

    let out = packing(&db, &["order", "calculations", "1", "--json"]);
    let calcs = json(&out);
    assert_eq!(calcs[0]["container_height"], 2.69);
    assert_eq!(calcs[0]["stacking_enabled"], false);
    assert!(calcs[0]["container_name"].is_null());

    let out = packing(
        &db,
        &["order", "calculate", "1", "--container-dims", "1,2", "--transformer-dims", "1,1,1"],
    );
    assert!(!out.status.success());
}

#[test]
fn test_preview_host_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let out = packing(&db, &["--host", "preview", "container", "list"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("unavailable"), "{}", stderr(&out));
    assert!(!db.exists());
}

#[test]
fn test_config_file_selects_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("from-config.db");
    let config = dir.path().join("packing.yaml");
    std::fs::write(&config, format!("database: {}\nhost: desktop\n", db.display())).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_packing"))
        .arg("--config")
        .arg(&config)
        .args(["order", "add", "--date", "2026-03-01"])
        .env_remove("PACKING_HOST")
        .output()
        .unwrap();
    assert!(out.status.success(), "add failed: {}", stderr(&out));
    assert!(db.exists());

    let out = packing(&db, &["status", "--json"]);
    assert_eq!(json(&out)["orders"], 1);
}

#[test]
fn test_reset_empties_tables() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);
    packing(&db, &["order", "add", "--date", "2026-03-01"]);

    let out = packing(&db, &["reset"]);
    assert!(out.status.success(), "reset failed: {}", stderr(&out));

    let out = packing(&db, &["status", "--json"]);
    let status = json(&out);
    assert_eq!(status["tables_exist"], true);
    assert_eq!(status["orders"], 0);
}
