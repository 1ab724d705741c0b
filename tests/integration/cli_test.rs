//! Integration tests for the zwconv binary
//!
//! These tests run the full end-to-end workflow: reading input from a
//! string, file, directory or stdin, converting it and writing the result.

#[cfg(test)]
mod cli_tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::fs;
    use std::io::Write;
    use std::process::{Command, Output, Stdio};
    use tempfile::tempdir;

    fn zwconv() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_zwconv"));
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn run(args: &[&str]) -> Output {
        zwconv().args(args).output().expect("failed to run zwconv")
    }

    fn run_stdin(input: &str, args: &[&str]) -> Output {
        let mut child = zwconv()
            .arg("--stdin")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start zwconv");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("failed to write stdin");
        child.wait_with_output().expect("failed to wait for zwconv")
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    #[test]
    fn test_json_string_to_zw() {
        let output = run(&[r#"{"name": "Alice", "age": 30}"#, "--root-type", "ZW-USER"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), "ZW-USER:\n  name: Alice\n  age: 30\n");
    }

    #[test]
    fn test_stdin_zw_to_json() {
        let output = run_stdin("ZW-NOTE:\n  TEXT: hi\n  COUNT: 2\n", &[]);
        assert!(output.status.success(), "{}", stderr(&output));
        let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(value, json!({"TEXT": "hi", "COUNT": 2}));
    }

    #[test]
    fn test_stdin_json_with_explicit_direction() {
        let output = run_stdin("[1, 2]", &["--to", "zw", "--quiet"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), "ZW-ARRAY:\n  - 1\n  - 2\n");
    }

    #[test]
    fn test_file_conversion_creates_output_dirs() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("scene.zw");
        fs::write(&input, "ZW-SCENE:\n  TITLE: Dawn\n  CAST:\n    - Tran\n").unwrap();
        let out = dir.path().join("nested/out/scene.json");

        let output = run(&[
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--quiet",
        ]);
        assert!(output.status.success(), "{}", stderr(&output));
        let value: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value, json!({"TITLE": "Dawn", "CAST": ["Tran"]}));
    }

    #[test]
    fn test_malformed_zw_fails() {
        let output = run_stdin("FOO: bar\n", &["--to", "json"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("ZW parse error at line 1"));
    }

    #[test]
    fn test_validate_only_reports_warnings() {
        let output = run_stdin("ZW-X:\n   A: 1\n", &["--validate-only"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("Valid ZW"));
        assert!(stderr(&output).contains("line 2"));

        let output = run_stdin("{\"a\": ", &["--validate-only", "--to", "zw"]);
        assert!(!output.status.success());
    }

    #[test]
    fn test_prettify_and_tree() {
        let messy = "ZW-X:\n    A:\n         B: 1\n";
        let output = run_stdin(messy, &["--prettify"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), "ZW-X:\n  A:\n    B: 1\n");

        let output = run_stdin(messy, &["--tree"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let tree: Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(tree["key"], "ZW-X");
        assert_eq!(tree["value"]["kind"], "sections");
    }

    #[test]
    fn test_directory_conversion_maps_extensions() {
        let input_dir = tempdir().unwrap();
        let nested = input_dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(input_dir.path().join("a.json"), r#"{"name": "Alice"}"#).unwrap();
        fs::write(nested.join("b.zw"), "ZW-B:\n  K: v\n").unwrap();
        fs::write(nested.join("c.txt"), "ignored").unwrap();

        let output_dir = tempdir().unwrap();
        let output = run(&[
            input_dir.path().to_str().unwrap(),
            "--output",
            output_dir.path().to_str().unwrap(),
            "--recursive",
        ]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("Converted 2 files"));

        assert_eq!(
            fs::read_to_string(output_dir.path().join("a.zw")).unwrap(),
            "ZW-OBJECT:\n  name: Alice\n"
        );
        assert!(output_dir.path().join("sub/b.json").exists());
        assert!(!output_dir.path().join("sub/c.json").exists());
    }

    #[test]
    fn test_directory_continue_on_error() {
        let input_dir = tempdir().unwrap();
        fs::write(input_dir.path().join("bad.zw"), "FOO: bar\n").unwrap();
        fs::write(input_dir.path().join("good.zw"), "ZW-G:\n  A: 1\n").unwrap();
        let output_dir = tempdir().unwrap();
        let out = output_dir.path().to_str().unwrap();
        let input = input_dir.path().to_str().unwrap();

        let output = run(&[input, "-o", out]);
        assert!(!output.status.success());

        let output = run(&[input, "-o", out, "--continue-on-error"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stderr(&output).contains("bad.zw"));
        assert!(output_dir.path().join("good.json").exists());
    }

    #[test]
    fn test_size_limit_flag() {
        let big = format!("ZW-BIG:\n  TEXT: {}\n", "x".repeat(4096));
        let output = run_stdin(&big, &["--max-size", "2KB"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("Input too large"));
    }

    #[test]
    fn test_missing_input_fails() {
        let output = run(&["does/not/exist.zw"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("does not exist"));
    }
}
