//! Black-box tests against the built `rscode` binary: stdout and exit codes
//! are the contract the ground-station scripts rely on.

use std::process::{Command, Output};

fn rscode(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rscode"))
        .args(args)
        .env_remove("RSCODE_NPAR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn rscode")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_encode_default_parity_length() {
    let output = rscode(&["encode", "6361747321"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).len(), 2 * (5 + 32));
}

#[test]
fn test_round_trip_through_binary() {
    let encoded = stdout(&rscode(&["--npar", "4", "encode", "6361747321"]));
    let output = rscode(&["--npar", "4", "decode", &encoded, "4"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "6361747321");
}

#[test]
fn test_corrected_codeword() {
    let encoded = stdout(&rscode(&["encode", "4e6572766f75736c79"]));
    let mut damaged = encoded.into_bytes();
    damaged[0] = b'0';
    damaged[1] = b'0';
    let damaged = String::from_utf8(damaged).unwrap();

    let output = rscode(&["decode", &damaged, "32"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "4e6572766f75736c79");
}

#[test]
fn test_parse_error_exit_code() {
    let output = rscode(&["encode", "abc"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let output = rscode(&["decode", "zz", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_size_error_exit_code() {
    let output = rscode(&["--npar", "4", "decode", "636174732100000000", "10"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_usage_error_exit_code() {
    let output = rscode(&["decode", "00"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());

    let output = rscode(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_non_numeric_parity_exit_code() {
    let output = rscode(&["decode", "00", "four"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_oversized_npar_exit_code() {
    let output = rscode(&["--npar", "200", "decode", "00", "0"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_help_exits_cleanly() {
    let output = rscode(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_npar_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_rscode"))
        .args(["encode", "00"])
        .env("RSCODE_NPAR", "6")
        .output()
        .expect("failed to spawn rscode");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).len(), 2 * (1 + 6));
}
