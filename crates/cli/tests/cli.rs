// ABOUTME: Integration tests for the uchan-cli binary.
// ABOUTME: Tests offline page parsing and board/bookmark management in a temp data dir.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn uchan_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("uchan-cli").unwrap();
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

const BOARD_HTML: &str = r#"<html><body>
<div class="thread" id="t4001"><div class="post op">
  <div class="postInfo"><span class="name">Anonymous</span><span class="postNum"><span>No.4001</span></span></div>
  <blockquote class="postMessage">hello<br>world</blockquote>
</div></div>
</body></html>"#;

#[test]
fn parse_board_page_from_file() {
    let dir = TempDir::new().unwrap();
    let html_path = dir.path().join("board.html");
    fs::write(&html_path, BOARD_HTML).unwrap();

    let output = uchan_cmd(&dir)
        .arg("--compact")
        .arg("parse")
        .arg(&html_path)
        .arg("--board")
        .arg("g")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["posts"][0]["id"], "4001");
    assert_eq!(value["posts"][0]["is_thread"], true);
    assert_eq!(value["posts"][0]["content"], "hello\nworld");
    assert_eq!(value["posts"][0]["board_id"], "g");
}

#[test]
fn parse_thread_page_from_stdin() {
    let dir = TempDir::new().unwrap();

    uchan_cmd(&dir)
        .arg("parse")
        .arg("-")
        .arg("--posts")
        .write_stdin(BOARD_HTML)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    uchan_cmd(&dir)
        .arg("parse")
        .arg(dir.path().join("nope.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn boards_add_persists_to_settings() {
    let dir = TempDir::new().unwrap();

    uchan_cmd(&dir)
        .args(["boards", "add", "tv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\": true"));

    uchan_cmd(&dir)
        .args(["boards", "add", "tv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\": false"));

    let settings = fs::read_to_string(dir.path().join("settings.toml")).unwrap();
    assert!(settings.contains("\"tv\""));

    uchan_cmd(&dir)
        .args(["--compact", "boards", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["g","a","v","pol","b","tv"]"#));
}

#[test]
fn bookmarks_list_starts_empty() {
    let dir = TempDir::new().unwrap();

    uchan_cmd(&dir)
        .args(["--compact", "bookmarks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn bookmarks_clear_empties_store() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bookmarks.json"),
        r#"[{"url":"https://boards.4chan.org/g/thread/1","board_id":"g","thread_id":"1","title":"t","timestamp_ms":1}]"#,
    )
    .unwrap();

    uchan_cmd(&dir)
        .args(["--compact", "bookmarks", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"cleared":1}"#));

    uchan_cmd(&dir)
        .args(["--compact", "bookmarks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}
