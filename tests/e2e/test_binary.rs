//! Integration tests for the graph-layout binary.
//!
//! These tests run the compiled binary and compare its output against golden
//! `.expect.txt` files in `demos/`. A `<name>.json` next to `<name>.graph` is
//! passed as the configuration file.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

/// Run the binary with `input` on stdin and the given arguments.
fn run(input: &str, args: &[&str]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_graph-layout"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run binary");
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).ok();
    }
    child.wait_with_output().expect("Failed to wait for binary")
}

/// Run the binary and return stdout, asserting success.
fn run_ok(input: &str, args: &[&str]) -> String {
    let output = run(input, args);
    assert!(
        output.status.success(),
        "Binary exited with {:?}:\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Non-UTF8 output")
}

/// All (name, graph file, expect file) triples in the demos directory.
fn find_demo_pairs() -> Vec<(String, PathBuf, PathBuf)> {
    let dir = demos_dir();
    let mut pairs = Vec::new();
    if let Ok(entries) = fs::read_dir(&dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("graph") {
                continue;
            }
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            let expect = dir.join(format!("{}.expect.txt", name));
            if expect.exists() {
                pairs.push((name, path, expect));
            }
        }
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

// ─── Golden file tests ──────────────────────────────────────────────────────

#[test]
fn test_all_demos_match_expect() {
    let pairs = find_demo_pairs();
    assert!(!pairs.is_empty(), "No demo pairs found in {:?}", demos_dir());

    let mut failures = Vec::new();
    for (name, graph_file, expect_file) in &pairs {
        let src = fs::read_to_string(graph_file)
            .unwrap_or_else(|e| panic!("Cannot read {:?}: {}", graph_file, e));
        let expected = fs::read_to_string(expect_file)
            .unwrap_or_else(|e| panic!("Cannot read {:?}: {}", expect_file, e));

        let config = demos_dir().join(format!("{}.json", name));
        let config_arg = config.to_string_lossy().to_string();
        let args: Vec<&str> = if config.exists() {
            vec!["-c", config_arg.as_str()]
        } else {
            vec![]
        };

        let actual = run_ok(&src, &args);
        if actual != expected {
            failures.push(format!(
                "FAIL: {}\n--- expected\n{}--- actual\n{}",
                name, expected, actual
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Golden file mismatches ({}/{}):\n{}",
            failures.len(),
            pairs.len(),
            failures.join("\n")
        );
    }
}

// ─── Flag tests ─────────────────────────────────────────────────────────────

#[test]
fn test_layout_flag_overrides_config() {
    let src = "A [10x10]\nB [10x10]\nA -> B\n";
    let tree = run_ok(src, &["-l", "tree"]);
    let hierarchical = run_ok(src, &["--layout", "hierarchical"]);
    assert_eq!(tree, "A 0 0 10 10\nB 0 50 10 10\n");
    assert_eq!(hierarchical, tree);
}

#[test]
fn test_json_format() {
    let output = run_ok("A [10x20]\n", &["-f", "json"]);
    let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(value[0]["name"], "A");
    assert_eq!(value[0]["height"], 20);
}

#[test]
fn test_input_and_output_files() {
    let dir = std::env::temp_dir().join(format!("graph-layout-e2e-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("in.graph");
    let output = dir.join("out.txt");
    fs::write(&input, "A [4x4]\n").unwrap();

    let stdout = run_ok(
        "",
        &[input.to_str().unwrap(), "-o", output.to_str().unwrap()],
    );

    assert!(stdout.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "A 0 0 4 4\n");
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_version_flag() {
    let stdout = run_ok("", &["--version"]);
    assert!(stdout.starts_with("graph-layout "));
}

// ─── Error tests ────────────────────────────────────────────────────────────

#[test]
fn test_parse_error_exits_nonzero() {
    let output = run("A -> B [3x3]\n", &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: line 1:"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_root_exits_nonzero() {
    let dir = std::env::temp_dir().join(format!("graph-layout-root-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let config = dir.join("config.json");
    fs::write(&config, r#"{ "kind": "tree", "root": "nope" }"#).unwrap();

    let output = run("A -> B\n", &["-c", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown root node 'nope'"));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_input_file() {
    let output = run("", &["/definitely/not/here.graph"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: cannot read"));
}

#[test]
fn test_invalid_config_exits_nonzero() {
    let dir = std::env::temp_dir().join(format!("graph-layout-badcfg-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let config = dir.join("config.json");
    fs::write(&config, r#"{ "colour": "red" }"#).unwrap();

    let output = run("A -> B\n", &["-c", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: invalid configuration:"));
    fs::remove_dir_all(&dir).ok();
}
