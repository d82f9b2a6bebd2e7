use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

fn run_driver(input: &[u8]) -> (bool, Vec<Value>) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_duelboard"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn driver");
    child.stdin.take().expect("stdin").write_all(input).expect("write input");
    let out = child.wait_with_output().expect("driver output");
    let props = String::from_utf8(out.stdout)
        .expect("utf-8 output")
        .lines()
        .map(|l| serde_json::from_str(l).expect("props line is JSON"))
        .collect();
    (out.status.success(), props)
}

#[test]
fn skips_invalid_utf8_and_non_json_lines() {
    let mut input = Vec::new();
    input.extend_from_slice(b"{\"type\":\"squareClick\",\"square\":\"e2\"}\n");
    input.extend_from_slice(b"\xff\xfe bad\n");
    input.extend_from_slice(b"not json\n");
    input.extend_from_slice(b"{\"type\":\"squareClick\",\"square\":\"e4\"}\n");
    let (ok, props) = run_driver(&input);
    assert!(ok, "driver exited with failure");
    // initial props + one per processed click
    assert_eq!(props.len(), 3);
    let last = props.last().unwrap();
    assert_eq!(last["history"].as_array().map(|h| h.len()), Some(1));
    assert_eq!(last["history"][0]["san"], "e4");
}

#[test]
fn quit_stops_the_loop() {
    let input = b"{\"type\":\"drop\",\"sourceSquare\":\"e2\",\"targetSquare\":\"e4\"}\nquit\n{\"type\":\"drop\",\"sourceSquare\":\"e7\",\"targetSquare\":\"e5\"}\n";
    let (ok, props) = run_driver(input);
    assert!(ok);
    assert_eq!(props.len(), 2);
    assert_eq!(props[1]["turn"], "b");
}

#[test]
fn bad_start_fen_is_fatal() {
    let out = Command::new(env!("CARGO_BIN_EXE_duelboard"))
        .args(["--fen", "8/8/8 w"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("run driver");
    assert!(!out.success());
}
