//! End-to-end tests of the content-model binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_content-model"))
        .args(args)
        .output()
        .expect("failed to run content-model")
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_import_then_export() {
    let dir = TempDir::new().unwrap();
    let html = write(&dir, "in.html", "<div>Hello <b>world</b></div>");
    let model = dir.path().join("model.json");
    let model_path = model.to_string_lossy().into_owned();

    let output = run(&["import", &html, "-o", &model_path]);
    assert!(output.status.success());
    let json = fs::read_to_string(&model).unwrap();
    assert!(json.contains("\"blockType\": \"Paragraph\""));

    let output = run(&["export", &model_path]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "<div>Hello <span style=\"font-weight: bold\">world</span></div>"
    );
}

#[test]
fn test_text_and_compact_json() {
    let dir = TempDir::new().unwrap();
    let html = write(&dir, "in.html", "<div>one</div><hr><div>two</div>");

    let output = run(&["import", &html, "--compact"]);
    assert!(output.status.success());
    let json = stdout(&output);
    assert_eq!(json.trim().lines().count(), 1);

    let model = write(&dir, "model.json", json.trim());
    let output = run(&["text", &model, "--unix"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), format!("one\n{}\ntwo", "_".repeat(40)));
}

#[test]
fn test_missing_input_fails() {
    let output = run(&["info", "does-not-exist.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_merge_without_selection_fails() {
    let dir = TempDir::new().unwrap();
    let html = write(&dir, "in.html", "<div>a</div>");
    let model = dir.path().join("model.json");
    let model_path = model.to_string_lossy().into_owned();
    assert!(run(&["import", &html, "-o", &model_path]).status.success());
    assert!(Path::new(&model_path).exists());

    let output = run(&["merge", &model_path, &model_path]);
    assert!(!output.status.success());
}
