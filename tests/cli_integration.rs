//! Integration tests for the `td` CLI.
//!
//! Each test creates a temp list directory, runs `td` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

/// Run `td` with the given args in the given directory.
/// Returns (stdout, stderr, success).
fn run_td(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(td_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run td");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// A temp dir with an initialized list named "Test List".
fn init_list() -> TempDir {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, ok) = run_td(dir.path(), &["init", "--name", "Test List"]);
    assert!(ok, "init failed: {}", stderr);
    assert!(stdout.contains("Initialized to-do list \"Test List\""));
    dir
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_list_dir_and_empty_slot() {
    let dir = init_list();
    let tick_dir = dir.path().join("tick");
    assert!(tick_dir.join("list.toml").exists());
    assert_eq!(
        fs::read_to_string(tick_dir.join("tasks.json")).unwrap(),
        "[]"
    );
}

#[test]
fn init_twice_fails_without_force() {
    let dir = init_list();
    let (_, stderr, ok) = run_td(dir.path(), &["init", "--name", "Again"]);
    assert!(!ok);
    assert!(stderr.contains("already exists"));

    let (stdout, _, ok) = run_td(dir.path(), &["init", "--name", "Again", "--force"]);
    assert!(ok);
    assert!(stdout.contains("\"Again\""));
}

// ---------------------------------------------------------------------------
// add / list
// ---------------------------------------------------------------------------

#[test]
fn add_then_list_shows_the_task() {
    let dir = init_list();
    let (stdout, _, ok) = run_td(
        dir.path(),
        &[
            "add",
            "Buy milk",
            "--priority",
            "High",
            "--due",
            "2024-01-01",
            "--at",
            "09:00",
            "--category",
            "Shopping",
        ],
    );
    assert!(ok);
    assert!(stdout.contains("Added 1: Buy milk"));

    let (stdout, _, ok) = run_td(dir.path(), &["list"]);
    assert!(ok);
    assert!(stdout.contains("== Test List =="));
    assert!(stdout.contains("1. ↑ High   Buy milk  (due 2024-01-01 09:00)  [Shopping]"));
}

#[test]
fn listing_preserves_insertion_order() {
    let dir = init_list();
    run_td(dir.path(), &["add", "first"]);
    run_td(dir.path(), &["add", "second", "--priority", "Medium"]);
    run_td(dir.path(), &["add", "third", "--priority", "High"]);

    let (stdout, _, _) = run_td(dir.path(), &["list"]);
    let first = stdout.find("first").unwrap();
    let second = stdout.find("second").unwrap();
    let third = stdout.find("third").unwrap();
    assert!(first < second && second < third);
    assert!(stdout.contains("↓ Low"));
    assert!(stdout.contains("→ Medium"));
    assert!(stdout.contains("↑ High"));
}

#[test]
fn persisted_slot_has_the_exact_wire_shape() {
    let dir = init_list();
    run_td(
        dir.path(),
        &[
            "add",
            "Buy milk",
            "--priority",
            "High",
            "--due",
            "2024-01-01",
            "--at",
            "09:00",
            "--category",
            "Shopping",
        ],
    );

    let raw = fs::read_to_string(dir.path().join("tick/tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "text": "Buy milk",
            "priority": 3,
            "dueDate": "2024-01-01",
            "dueTime": "09:00",
            "category": "Shopping",
        }])
    );
}

#[test]
fn pre_existing_slot_data_loads_unchanged() {
    // The exact array shape an older list (or the original web page)
    // would have saved.
    let dir = init_list();
    fs::write(
        dir.path().join("tick/tasks.json"),
        r#"[{"text":"Carried over","priority":2,"dueDate":"","dueTime":"","category":"Work"}]"#,
    )
    .unwrap();

    let (stdout, _, ok) = run_td(dir.path(), &["list"]);
    assert!(ok);
    assert!(stdout.contains("1. → Medium Carried over  [Work]"));
}

#[test]
fn malformed_slot_loads_as_empty() {
    let dir = init_list();
    fs::write(dir.path().join("tick/tasks.json"), "not json {{{").unwrap();

    let (stdout, _, ok) = run_td(dir.path(), &["list"]);
    assert!(ok);
    assert!(stdout.contains("(no tasks)"));

    // The next mutation overwrites the bad slot with a valid list
    run_td(dir.path(), &["add", "fresh start"]);
    let raw = fs::read_to_string(dir.path().join("tick/tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[test]
fn add_with_blank_text_is_a_no_op() {
    let dir = init_list();
    let (stdout, _, ok) = run_td(dir.path(), &["add", "   "]);
    assert!(ok);
    assert!(stdout.contains("nothing to add"));
    assert_eq!(
        fs::read_to_string(dir.path().join("tick/tasks.json")).unwrap(),
        "[]"
    );
}

#[test]
fn add_rejects_bad_flag_values() {
    let dir = init_list();

    let (_, stderr, ok) = run_td(dir.path(), &["add", "x", "--priority", "Urgent"]);
    assert!(!ok);
    assert!(stderr.contains("invalid priority"));

    let (_, stderr, ok) = run_td(dir.path(), &["add", "x", "--due", "01/01/2024"]);
    assert!(!ok);
    assert!(stderr.contains("invalid due date"));

    let (_, stderr, ok) = run_td(dir.path(), &["add", "x", "--at", "9am"]);
    assert!(!ok);
    assert!(stderr.contains("invalid due time"));

    // None of the rejected adds touched the slot
    assert_eq!(
        fs::read_to_string(dir.path().join("tick/tasks.json")).unwrap(),
        "[]"
    );
}

// ---------------------------------------------------------------------------
// filtering
// ---------------------------------------------------------------------------

#[test]
fn search_is_case_sensitive() {
    let dir = init_list();
    run_td(dir.path(), &["add", "Buy milk"]);
    run_td(dir.path(), &["add", "buy bread"]);

    let (stdout, _, _) = run_td(dir.path(), &["list", "Buy"]);
    assert!(stdout.contains("Buy milk"));
    assert!(!stdout.contains("buy bread"));

    let (stdout, _, _) = run_td(dir.path(), &["list", "BUY"]);
    assert!(stdout.contains("(no matching tasks)"));
}

#[test]
fn category_filter_is_exact_and_combines_with_search() {
    let dir = init_list();
    run_td(dir.path(), &["add", "pay rent", "--category", "Home"]);
    run_td(dir.path(), &["add", "pay invoices", "--category", "Work"]);
    run_td(dir.path(), &["add", "file taxes", "--category", "Home"]);

    let (stdout, _, _) = run_td(dir.path(), &["list", "--category", "Home"]);
    assert!(stdout.contains("pay rent"));
    assert!(stdout.contains("file taxes"));
    assert!(!stdout.contains("pay invoices"));

    let (stdout, _, _) = run_td(dir.path(), &["list", "pay", "--category", "Home"]);
    assert!(stdout.contains("pay rent"));
    assert!(!stdout.contains("file taxes"));
    assert!(!stdout.contains("pay invoices"));
}

#[test]
fn filtered_listing_keeps_full_list_positions() {
    let dir = init_list();
    run_td(dir.path(), &["add", "alpha"]);
    run_td(dir.path(), &["add", "beta"]);

    let (stdout, _, _) = run_td(dir.path(), &["list", "beta"]);
    assert!(stdout.contains("2. ↓ Low    beta"));
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

#[test]
fn rm_deletes_by_position_and_keeps_order() {
    let dir = init_list();
    run_td(dir.path(), &["add", "a"]);
    run_td(dir.path(), &["add", "b"]);
    run_td(dir.path(), &["add", "c"]);

    let (stdout, _, ok) = run_td(dir.path(), &["rm", "2"]);
    assert!(ok);
    assert!(stdout.contains("Deleted 2: b"));

    let (stdout, _, _) = run_td(dir.path(), &["list"]);
    assert!(stdout.contains("1. ↓ Low    a"));
    assert!(stdout.contains("2. ↓ Low    c"));
    assert!(!stdout.contains(": b"));
}

#[test]
fn rm_out_of_range_is_a_guarded_no_op() {
    let dir = init_list();
    run_td(dir.path(), &["add", "only"]);

    for position in ["0", "2", "99"] {
        let (stdout, _, ok) = run_td(dir.path(), &["rm", position]);
        assert!(ok, "rm {} should not fail", position);
        assert!(stdout.contains(&format!("no task at position {}", position)));
    }

    let (stdout, _, _) = run_td(dir.path(), &["list"]);
    assert!(stdout.contains("only"));
}

// ---------------------------------------------------------------------------
// json / discovery
// ---------------------------------------------------------------------------

#[test]
fn json_listing_carries_positions_and_labels() {
    let dir = init_list();
    run_td(dir.path(), &["add", "alpha", "--priority", "High"]);
    run_td(dir.path(), &["add", "beta", "--category", "Work"]);

    let (stdout, _, ok) = run_td(dir.path(), &["list", "--json"]);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["list"], "Test List");
    let tasks = value["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["position"], 1);
    assert_eq!(tasks[0]["priority"], 3);
    assert_eq!(tasks[0]["priority_label"], "High");
    assert_eq!(tasks[1]["category"], "Work");
    // empty fields are omitted
    assert!(tasks[0].get("category").is_none());
}

#[test]
fn commands_discover_the_list_from_a_subdirectory() {
    let dir = init_list();
    let nested = dir.path().join("deep/inside");
    fs::create_dir_all(&nested).unwrap();

    run_td(&nested, &["add", "from below"]);
    let (stdout, _, _) = run_td(dir.path(), &["list"]);
    assert!(stdout.contains("from below"));
}

#[test]
fn dash_c_runs_against_another_directory() {
    let list_dir = init_list();
    let elsewhere = TempDir::new().unwrap();

    let target = list_dir.path().to_str().unwrap();
    run_td(elsewhere.path(), &["-C", target, "add", "remote task"]);
    let (stdout, _, ok) = run_td(elsewhere.path(), &["-C", target, "list"]);
    assert!(ok);
    assert!(stdout.contains("remote task"));
}

#[test]
fn commands_outside_a_list_fail_with_a_hint() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, ok) = run_td(dir.path(), &["list"]);
    assert!(!ok);
    assert!(stderr.contains("not a tick list"));
    assert!(stderr.contains("td init"));
}
