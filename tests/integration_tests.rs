//! End-to-end tests for the `scanner` binary.
//!
//! These run the built executable against files on disk and check the
//! token listing on stdout, diagnostics on stderr and the exit code.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use regex::Regex;
use scanner::{lexer::lexer::scan, render_tokens};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

struct CommandResult {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn write_source(contents: &[u8]) -> PathBuf {
    let base = std::env::temp_dir().join("scanner_cli_tests");
    fs::create_dir_all(&base).unwrap();

    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = base.join(format!("run_{}_{}.lox", std::process::id(), n));
    fs::write(&path, contents).unwrap();
    path
}

fn run_cmd(args: &[&str]) -> CommandResult {
    let output = Command::new(env!("CARGO_BIN_EXE_scanner"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    CommandResult {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn tokenize_file(contents: &[u8]) -> CommandResult {
    let path = write_source(contents);
    let result = run_cmd(&["tokenize", path.to_str().unwrap()]);
    let _ = fs::remove_file(&path);
    result
}

#[test]
fn test_tokenize_clean_file() {
    let result = tokenize_file(b"var_x = (1 + 2.50) >= \"ok\";\n");

    assert_eq!(result.code, Some(0));
    assert_eq!(result.stderr, "");
    assert_eq!(
        result.stdout,
        "IDENTIFIER var_x null\n\
         EQUAL = null\n\
         LEFT_PAREN ( null\n\
         NUMBER 1 1.0\n\
         PLUS + null\n\
         NUMBER 2.50 2.50\n\
         RIGHT_PAREN ) null\n\
         GREATER_EQUAL >= null\n\
         STRING \"ok\" ok\n\
         SEMICOLON ; null\n\
         EOF  null\n"
    );
}

#[test]
fn test_tokenize_empty_file() {
    let result = tokenize_file(b"");

    assert_eq!(result.code, Some(0));
    assert_eq!(result.stdout, "EOF  null\n");
}

#[test]
fn test_tokenize_lexical_errors_exit_65() {
    let result = tokenize_file(b",$(\n#\n\"open");

    assert_eq!(result.code, Some(65));
    assert_eq!(
        result.stderr,
        "[line 1] Error: Unexpected character: $\n\
         [line 2] Error: Unexpected character: #\n\
         [line 3] Error: Unterminated string.\n"
    );
    assert_eq!(result.stdout, "COMMA , null\nLEFT_PAREN ( null\nEOF  null\n");
}

#[test]
fn test_output_line_shapes() {
    let result = tokenize_file(b"{ a.b(12.3400, \"s t\") != !c } // done\n@ / * -");
    let token_line = Regex::new(r"^[A-Z_]+ .* \S+$").unwrap();
    let error_line = Regex::new(r"^\[line \d+\] Error: .+$").unwrap();

    assert_eq!(result.code, Some(65));
    for line in result.stdout.lines() {
        assert!(token_line.is_match(line), "bad token line: {:?}", line);
    }
    for line in result.stderr.lines() {
        assert!(error_line.is_match(line), "bad error line: {:?}", line);
    }
    assert!(result.stdout.contains("NUMBER 12.3400 12.340\n"));
    assert_eq!(result.stdout.lines().last(), Some("EOF  null"));
}

#[test]
fn test_cli_matches_library_rendering() {
    let source = b"if (x <= 10) { y = x / 2; }";
    let result = tokenize_file(source);
    let (tokens, had_error) = scan(source);

    assert!(!had_error);
    assert_eq!(result.stdout, render_tokens(&tokens));
}

#[test]
fn test_missing_file() {
    let result = run_cmd(&["tokenize", "/definitely/not/here.lox"]);

    assert_eq!(result.code, Some(1));
    assert!(result.stderr.starts_with("Error reading file:"));
    assert_eq!(result.stdout, "");
}

#[test]
fn test_unknown_command() {
    let result = run_cmd(&["parse", "file.lox"]);

    assert_eq!(result.code, Some(1));
}

#[test]
fn test_missing_arguments() {
    assert_eq!(run_cmd(&[]).code, Some(1));
    assert_eq!(run_cmd(&["tokenize"]).code, Some(1));
}
