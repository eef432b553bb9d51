mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use common::Fixture;

/// Command isolated from the caller's config and `HADITH_*` environment.
fn hadith(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("hadith").unwrap();
    cmd.current_dir(fixture.root())
        .env("HADITH_CONFIG", fixture.root().join("absent.toml"))
        .env_remove("HADITH_BOOKS_DIR")
        .env_remove("HADITH_SEARCH_LIMIT")
        .env_remove("RUST_LOG");
    cmd
}

fn robot_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("hadith").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("hadith").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_books_lists_sorted_names() {
    let fixture = Fixture::new();
    hadith(&fixture)
        .args(["-O", "plain", "books"])
        .assert()
        .success()
        .stdout("bukhari\nmuslim\n");
}

#[test]
fn test_count() {
    let fixture = Fixture::new();
    hadith(&fixture)
        .args(["-O", "plain", "count"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_explicit_books_dir() {
    let fixture = Fixture::new();
    let elsewhere = tempfile::tempdir().unwrap();
    let mut cmd = hadith(&fixture);
    cmd.current_dir(elsewhere.path())
        .arg("--books-dir")
        .arg(fixture.books_dir())
        .args(["-O", "plain", "count"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_books_dir_from_environment() {
    let fixture = Fixture::new();
    let elsewhere = tempfile::tempdir().unwrap();
    let mut cmd = hadith(&fixture);
    cmd.current_dir(elsewhere.path())
        .env("HADITH_BOOKS_DIR", fixture.books_dir())
        .args(["-O", "plain", "books"])
        .assert()
        .success()
        .stdout("bukhari\nmuslim\n");
}

#[test]
fn test_root_discovered_from_subdirectory() {
    let fixture = Fixture::new();
    let nested = fixture.root().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    let mut cmd = hadith(&fixture);
    cmd.current_dir(&nested)
        .args(["-O", "plain", "count"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_get_prints_record() {
    let fixture = Fixture::new();
    let output = hadith(&fixture)
        .args(["-O", "plain", "get", "bukhari", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["book"], "bukhari");
    assert_eq!(json["number"], 2);
    assert_eq!(json["arab"], "the moon sets");
    assert_eq!(json["id"], "bulan terbenam");
}

#[test]
fn test_get_missing_record_fails() {
    let fixture = Fixture::new();
    hadith(&fixture)
        .args(["-O", "plain", "get", "bukhari", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found: bukhari #9"));
}

#[test]
fn test_get_rejects_non_integer_number() {
    let fixture = Fixture::new();
    hadith(&fixture)
        .args(["-O", "plain", "get", "bukhari", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid number"));
}

#[test]
fn test_search_orders_ties_by_book() {
    let fixture = Fixture::new();
    let output = hadith(&fixture)
        .args(["-O", "plain", "search", "matahari", "--limit", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let bukhari = stdout.find("bukhari #1 [score 3]").unwrap();
    let muslim = stdout.find("muslim #1 [score 3]").unwrap();
    assert!(bukhari < muslim);
    assert!(!stdout.contains("bukhari #2"));
    assert!(stdout.contains("ID: matahari terbit"));
    assert!(stdout.contains("AR: the sun rises"));
}

#[test]
fn test_search_requires_query() {
    let fixture = Fixture::new();
    hadith(&fixture).arg("search").assert().failure();
}

#[test]
fn test_robot_search() {
    let fixture = Fixture::new();
    let json = robot_json(hadith(&fixture).args(["-m", "search", "sun"]));

    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["query"], "sun");
    assert_eq!(json["data"]["count"], 2);
    let results = json["data"]["results"].as_array().unwrap();
    assert_eq!(results[0]["hadith"]["book"], "bukhari");
    assert_eq!(results[0]["score"], 2);
    assert_eq!(results[1]["hadith"]["book"], "muslim");
}

#[test]
fn test_robot_search_with_book_filter() {
    let fixture = Fixture::new();
    let json = robot_json(hadith(&fixture).args(["-m", "search", "sun", "--book", "muslim"]));

    assert_eq!(json["data"]["book"], "muslim");
    assert_eq!(json["data"]["count"], 1);
}

#[test]
fn test_robot_search_page_window() {
    let fixture = Fixture::new();
    let json = robot_json(hadith(&fixture).args([
        "-m",
        "search",
        "matahari",
        "--page",
        "2",
        "--page-size",
        "1",
    ]));

    let page = &json["data"]["page"];
    assert_eq!(page["total"], 2);
    assert_eq!(page["mode"], "page");
    assert_eq!(page["page"], 2);
    let results = json["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["hadith"]["book"], "muslim");
}

#[test]
fn test_robot_error_is_structured() {
    let fixture = Fixture::new();
    let mut cmd = hadith(&fixture);
    cmd.args(["-m", "get", "muslim", "5"]);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let error = &json["status"]["error"];
    assert_eq!(error["code"], "HADITH_NOT_FOUND");
    assert_eq!(error["numeric_code"], 201);
    assert_eq!(error["context"]["book"], "muslim");
}

#[test]
fn test_malformed_document_fails_startup() {
    let fixture = Fixture::new();
    fixture.write_book("tirmidzi.json", "[{\"number\": 1,");

    hadith(&fixture)
        .args(["-O", "plain", "count"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tirmidzi.json"));
}

#[test]
fn test_browse_requires_terminal() {
    let fixture = Fixture::new();
    hadith(&fixture)
        .arg("browse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}
