// Copyright 2026 The Udiff Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

fn udiff() -> Command {
    Command::cargo_bin("udiff").unwrap()
}

fn write_files(left: &str, right: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let left_path = dir.path().join("left.txt");
    let right_path = dir.path().join("right.txt");
    fs::write(&left_path, left).unwrap();
    fs::write(&right_path, right).unwrap();
    (dir, left_path, right_path)
}

/// Splits captured stdout into the two header lines and the rest.
fn parse_output(stdout: &[u8]) -> (String, String, Vec<String>) {
    let stdout = std::str::from_utf8(stdout).unwrap();
    let mut lines = stdout.lines().map(|line| line.to_owned());
    let left_header = lines.next().unwrap();
    let right_header = lines.next().unwrap();
    (left_header, right_header, lines.collect())
}

fn assert_header_shape(header: &str, prefix: &str, name: &str) {
    let rest = header.strip_prefix(prefix).unwrap();
    let (header_name, timestamp) = rest.split_once('\t').unwrap();
    assert!(header_name.ends_with(name), "{header}");
    // Local ISO-8601-like timestamp with a UTC offset.
    let zone = timestamp.rsplit(' ').next().unwrap();
    assert_eq!(zone.len(), 5, "{header}");
    assert!(zone.starts_with('+') || zone.starts_with('-'), "{header}");
}

#[test]
fn test_identical_files() {
    let (_dir, left, right) = write_files("a\nb\n", "a\nb\n");
    udiff()
        .arg(&left)
        .arg(&right)
        .assert()
        .code(0)
        .stdout("")
        .stderr("");
}

#[test]
fn test_changed_file_output() {
    let (_dir, left, right) = write_files("a\nb\nc\n", "a\nx\nc\n");
    let assert = udiff().arg(&left).arg(&right).assert().code(1);
    let (left_header, right_header, body) = parse_output(&assert.get_output().stdout);
    assert_header_shape(&left_header, "--- ", "left.txt");
    assert_header_shape(&right_header, "+++ ", "right.txt");
    assert_eq!(body, ["@@ -1,3 +1,3 @@", " a", "-b", "+x", " c"]);
}

#[test]
fn test_zero_context() {
    let (_dir, left, right) = write_files("a\nb\nc\n", "a\nx\nc\n");
    let assert = udiff()
        .args(["-U", "0"])
        .arg(&left)
        .arg(&right)
        .assert()
        .code(1);
    let (_, _, body) = parse_output(&assert.get_output().stdout);
    assert_eq!(body, ["@@ -2 +2 @@", "-b", "+x"]);
}

#[test]
fn test_algorithms_agree() {
    let (_dir, left, right) = write_files("a\nb\nc\nd\n", "d\nc\nb\na\n");
    let hs = udiff()
        .args(["--algorithm", "hs"])
        .arg(&left)
        .arg(&right)
        .assert()
        .code(1);
    let kc = udiff()
        .args(["--algorithm", "kc"])
        .arg(&left)
        .arg(&right)
        .assert()
        .code(1);
    let (_, _, hs_body) = parse_output(&hs.get_output().stdout);
    let (_, _, kc_body) = parse_output(&kc.get_output().stdout);
    assert_eq!(hs_body, kc_body);
}

#[test]
fn test_ignore_case() {
    let (_dir, left, right) = write_files("Hello\nWorld\n", "hello\nworld\n");
    udiff()
        .arg("--ignore-case")
        .arg(&left)
        .arg(&right)
        .assert()
        .code(0)
        .stdout("");
    udiff().arg(&left).arg(&right).assert().code(1);
}

#[test]
fn test_stdin_input() {
    let (_dir, _left, right) = write_files("", "a\nx\nc\n");
    let assert = udiff()
        .arg("-")
        .arg(&right)
        .write_stdin("a\nb\nc\n")
        .assert()
        .code(1);
    let (left_header, _, body) = parse_output(&assert.get_output().stdout);
    assert!(left_header.starts_with("--- -\t"), "{left_header}");
    assert_eq!(body, ["@@ -1,3 +1,3 @@", " a", "-b", "+x", " c"]);
}

#[test]
fn test_both_stdin_rejected() {
    udiff().args(["-", "-"]).assert().code(2).stdout("");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let (_dir2, left, _right) = write_files("a\n", "a\n");
    udiff().arg(&left).arg(&missing).assert().code(2).stdout("");
}

#[test]
fn test_missing_final_newline() {
    let (_dir, left, right) = write_files("a\nb", "a\nc");
    let assert = udiff().arg(&left).arg(&right).assert().code(1);
    let (_, _, body) = parse_output(&assert.get_output().stdout);
    assert_eq!(
        body,
        [
            "@@ -1,2 +1,2 @@",
            " a",
            "-b",
            "\\ No newline at end of file",
            "+c",
            "\\ No newline at end of file",
        ]
    );
}
