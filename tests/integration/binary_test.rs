//! Runs the `wordpos` binary against the built-in sample lexicon.

use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Runs the binary with an isolated config and `stdin` piped in.
fn wordpos(args: &[&str], stdin: &str) -> Output {
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("config.toml");
    let mut child = Command::new(env!("CARGO_BIN_EXE_wordpos"))
        .args(args)
        .arg("--config")
        .arg(&config)
        .env_remove("WORDNET_DICT")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_get_with_category_flags() {
    let output = wordpos(&["--mock-lexicon", "get", "-n", "-v", "dog", "run"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "# Noun 2:\ndog\nrun\n\n# Verb 2:\ndog\nrun\n\n\n");
}

#[test]
fn test_get_count_from_stdin() {
    let output = wordpos(&["--mock-lexicon", "get", "-c"], "the happy dog\n\u{4}\ncat\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1 1 1 0 2\n");
}

#[test]
fn test_parse_needs_no_dictionary() {
    let output = wordpos(&["parse", "-b", "Quick", "brown", "the", "Quick"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Quick brown \n\n");
}

#[test]
fn test_count_wins_over_json_except_for_def() {
    let output = wordpos(&["--mock-lexicon", "get", "-c", "-j", "dog", "happy"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1 1 1 0 2\n");

    let output = wordpos(&["--mock-lexicon", "def", "-c", "-j", "fox"], "");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["fox"].as_array().unwrap().len(), 1);
}

#[test]
fn test_empty_result_prints_blank_line() {
    let output = wordpos(&["--mock-lexicon", "get", "the", "of"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\n");
}

#[test]
fn test_stopwords_json() {
    let output = wordpos(&["stopwords", "-j"], "");
    assert!(output.status.success());
    let words: Vec<String> = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert!(words.contains(&"the".to_string()));
}

#[test]
fn test_missing_input_file_exits_with_failure() {
    let output = wordpos(&["--mock-lexicon", "get", "-i", "/nonexistent/words.txt"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input Error"));
}

#[test]
fn test_lookup_without_dictionary_is_config_error() {
    let output = wordpos(&["def", "bank"], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration Error"));
}

#[test]
fn test_no_command_prints_help() {
    let output = wordpos(&[], "");
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}
