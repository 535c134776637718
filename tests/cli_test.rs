//! End-to-end tests for the godecl binary.
//!
//! These run the compiled CLI the way an indexing service would: one file
//! per invocation, JSON on stdout, diagnostics on stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn godecl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_godecl"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run godecl")
}

fn godecl_on(path: &Path, extra: &[&str]) -> Output {
    let path = path.to_str().unwrap();
    let mut args = extra.to_vec();
    args.push(path);
    godecl(&args)
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_success_prints_single_json_document() {
    let output = godecl_on(&testdata_path().join("server.go"), &[]);

    assert_eq!(output.status.code(), Some(0));
    let text = String::from_utf8(output.stdout.clone()).unwrap();
    assert!(text.ends_with('\n'));
    assert_eq!(text.trim_end().lines().count(), 1);

    let json = stdout_json(&output);
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 2);
    assert!(json["functions"].is_array());
    assert!(json["imports"].is_array());
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_function_object_shape() {
    let output = godecl_on(&testdata_path().join("server.go"), &[]);
    let json = stdout_json(&output);
    let start = json["functions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "Start")
        .expect("Start should be present");

    assert_eq!(start["start_line"], 28);
    assert_eq!(start["end_line"], 34);
    assert_eq!(start["parameters"][0], "context.Context");
    assert_eq!(start["returns"], "error");
    assert_eq!(start["is_method"], true);
    assert_eq!(start["receiver"], "*Server");
    assert_eq!(start["docstring"], "Start runs the server until ctx is done.");
    assert!(start["calls"].is_array());
    assert!(start["raw_code"].as_str().unwrap().starts_with("func (s *Server) Start("));
}

#[test]
fn test_no_declarations_is_success() {
    let output = godecl_on(&testdata_path().join("empty.go"), &[]);

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["functions"], Value::Array(vec![]));
    assert_eq!(json["imports"], Value::Array(vec![]));
}

#[test]
fn test_malformed_source_exits_one_without_stdout() {
    let output = godecl_on(&testdata_path().join("malformed.go"), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error parsing file"), "{stderr}");
}

#[test]
fn test_missing_file_exits_one() {
    let output = godecl_on(&testdata_path().join("does-not-exist.go"), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error reading file"), "{stderr}");
}

#[test]
fn test_invalid_utf8_exits_one_without_stdout() {
    let mut file = tempfile::Builder::new().suffix(".go").tempfile().unwrap();
    file.write_all(b"package main\n\n// caf\xe9\nfunc f() { s := \"\xff\"; _ = s }\n")
        .unwrap();

    let output = godecl_on(file.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(":3:7: illegal UTF-8 encoding"), "{stderr}");
}

#[test]
fn test_wrong_argument_count_exits_one() {
    let none = godecl(&[]);
    assert_eq!(none.status.code(), Some(1));
    assert!(none.stdout.is_empty());
    assert!(!none.stderr.is_empty());

    let server = testdata_path().join("server.go");
    let server = server.to_str().unwrap();
    let two = godecl(&[server, server]);
    assert_eq!(two.status.code(), Some(1));
    assert!(two.stdout.is_empty());
}

#[test]
fn test_repeat_runs_are_byte_identical() {
    let path = testdata_path().join("server.go");
    let first = godecl_on(&path, &[]);
    let second = godecl_on(&path, &[]);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_pretty_output_same_value() {
    let path = testdata_path().join("server.go");
    let compact = godecl_on(&path, &[]);
    let pretty = godecl_on(&path, &["--pretty"]);

    assert_eq!(pretty.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&pretty.stdout).lines().count() > 1);
    assert_eq!(stdout_json(&compact), stdout_json(&pretty));
}

#[test]
fn test_qualified_calls_flag() {
    let mut file = tempfile::Builder::new().suffix(".go").tempfile().unwrap();
    write!(file, "package main\n\nfunc f() {{\n\tpkg.Foo()\n\tother.Foo()\n}}\n").unwrap();

    let plain = stdout_json(&godecl_on(file.path(), &[]));
    assert_eq!(plain["functions"][0]["calls"], serde_json::json!(["Foo"]));

    let qualified = stdout_json(&godecl_on(file.path(), &["--qualified-calls"]));
    assert_eq!(
        qualified["functions"][0]["calls"],
        serde_json::json!(["other.Foo", "pkg.Foo"])
    );
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let path = testdata_path().join("server.go");
    let quiet = godecl_on(&path, &[]);
    let verbose = godecl_on(&path, &["-v"]);

    assert_eq!(verbose.status.code(), Some(0));
    assert_eq!(quiet.stdout, verbose.stdout);
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("extracted file record"), "{stderr}");
}

#[test]
fn test_trace_logs_name_methods_by_receiver() {
    let output = godecl_on(&testdata_path().join("server.go"), &["-vv"]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("*Server.Start"), "{stderr}");
    assert!(stderr.contains("Server.Addr"), "{stderr}");
}

#[test]
fn test_help_exits_zero() {
    let output = godecl(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}
