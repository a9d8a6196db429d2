//! End-to-end tests for the `scholastic` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scholastic(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("scholastic").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SCHOLASTIC_DATA")
        .env_remove("SCHOLASTIC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_data(dir: &TempDir, content: &str) {
    std::fs::write(dir.path().join("user_data.json"), content).unwrap();
}

fn read_data(dir: &TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.path().join("user_data.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn new_proposition_is_listed_and_saved() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, r#"{"propositions":[],"questions":[]}"#);

    scholastic(&dir)
        .write_stdin("new proposition\nA\nlist propositions\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Scholastic. 2024.\n"))
        .stdout(predicate::str::contains("text >> "))
        .stdout(predicate::str::contains("1: A\n"));

    assert_eq!(
        read_data(&dir),
        serde_json::json!({"propositions": [{"id": 1, "text": "A"}], "questions": []})
    );
}

#[test]
fn new_ids_follow_loaded_ids() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, r#"{"propositions":[{"id":5,"text":"x"}],"questions":[]}"#);

    scholastic(&dir)
        .write_stdin("new proposition\ny\nlist\nEXIT\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5: x\n6: y\n"));
}

#[test]
fn delete_unknown_id_reports_and_keeps_data() {
    let dir = TempDir::new().unwrap();
    write_data(
        &dir,
        r#"{"propositions":[{"id":1,"text":"keep"}],"questions":[]}"#,
    );

    scholastic(&dir)
        .write_stdin("delete proposition 99\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid id: 99"));

    assert_eq!(read_data(&dir)["propositions"].as_array().unwrap().len(), 1);
}

#[test]
fn startup_code_runs_before_input() {
    let dir = TempDir::new().unwrap();
    write_data(
        &dir,
        r#"{"propositions":[],"questions":[{"id":1,"text":"Why?","answer":null}]}"#,
    );
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"startup_code": ["print good morning", "random question unanswered"]}"#,
    )
    .unwrap();

    scholastic(&dir)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("good morning\n1 Why?\n"));
}

#[test]
fn missing_data_file_is_fatal() {
    let dir = TempDir::new().unwrap();

    scholastic(&dir)
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("User data file not found"))
        .stderr(predicate::str::contains("Cannot access"));
}

#[test]
fn malformed_record_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, r#"{"propositions":[{"text":"no id"}],"questions":[]}"#);

    scholastic(&dir)
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed proposition record at index 0"));
}

#[test]
fn auto_init_creates_data_file() {
    let dir = TempDir::new().unwrap();

    scholastic(&dir)
        .args(["--auto-init", "--data", "notes/beliefs.json"])
        .write_stdin("new question\nWhat now?\n")
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("notes/beliefs.json")).unwrap();
    let data: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        data["questions"],
        serde_json::json!([{"id": 1, "text": "What now?", "answer": null}])
    );
}
