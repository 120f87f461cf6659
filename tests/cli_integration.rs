// CLI integration tests for the demo, describe, and triple commands.
use std::process::Command;

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_goat");
    let mut command = Command::new(exe);
    command.env_remove("GOAT_LOG");
    command
}

fn parse_json(output: &[u8]) -> Value {
    let text = std::str::from_utf8(output).expect("utf8");
    serde_json::from_str(text.trim()).expect("valid json")
}

#[test]
fn demo_triples_four_and_grows_two_horns() {
    let demo = cmd().arg("demo").output().expect("demo");
    assert!(demo.status.success());
    let json = parse_json(&demo.stdout);
    assert_eq!(json["triple"], 12);
    assert_eq!(json["goat"]["horns"], 2);
    assert_eq!(json["goat"]["description"], "This goat has 2 horns.");
}

#[test]
fn describe_pluralizes() {
    let cases = [
        (None, 0, "This goat has 0 horns."),
        (Some("1"), 1, "This goat has 1 horn."),
        (Some("2"), 2, "This goat has 2 horns."),
    ];
    for (arg, horns, description) in cases {
        let mut command = cmd();
        command.arg("describe");
        if let Some(arg) = arg {
            command.args(["--horns", arg]);
        }
        let output = command.output().expect("describe");
        assert!(output.status.success());
        let json = parse_json(&output.stdout);
        assert_eq!(json["horns"], horns);
        assert_eq!(json["description"], description);
    }
}

#[test]
fn triple_wraps_at_32_bits() {
    let output = cmd()
        .args(["triple", "1431655766"])
        .output()
        .expect("triple");
    assert!(output.status.success());
    let json = parse_json(&output.stdout);
    assert_eq!(json["input"], 1_431_655_766u64);
    assert_eq!(json["triple"], 2);

    let output = cmd()
        .args(["triple", "1431655765"])
        .output()
        .expect("triple");
    assert_eq!(parse_json(&output.stdout)["triple"], 4_294_967_295u64);
}

#[test]
fn output_keys_follow_report_order() {
    let output = cmd()
        .args(["describe", "--horns", "1"])
        .output()
        .expect("describe");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"horns":1,"description":"This goat has 1 horn."}"#
    );

    let output = cmd().arg("demo").output().expect("demo");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"triple":12,"goat":{"horns":2,"description":"This goat has 2 horns."}}"#
    );

    let output = cmd().args(["triple", "4"]).output().expect("triple");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"input":4,"triple":12}"#
    );
}

#[test]
fn describe_rejects_horns_past_cap() {
    let output = cmd()
        .args(["describe", "--horns", "4294967295"])
        .output()
        .expect("describe");
    assert_eq!(output.status.code().unwrap(), 2);
    assert!(output.stdout.is_empty());
    let json = parse_json(&output.stderr);
    assert_eq!(json["error"]["kind"], "Usage");

    let output = cmd()
        .args(["describe", "--horns", "1000000"])
        .output()
        .expect("describe");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["horns"], 1_000_000);
}

#[test]
fn usage_exit_code() {
    let output = cmd()
        .args(["triple", "not-a-number"])
        .output()
        .expect("triple");
    assert_eq!(output.status.code().unwrap(), 2);
    assert!(output.stdout.is_empty());
    let json = parse_json(&output.stderr);
    assert_eq!(json["error"]["kind"], "Usage");
    assert_eq!(json["error"]["hint"], "Try `goat --help`.");
}

#[test]
fn help_exits_zero() {
    let output = cmd().arg("--help").output().expect("help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("describe"));
}

#[test]
fn debug_logging_stays_off_stdout() {
    let output = cmd()
        .args(["--log-level", "debug", "describe", "--horns", "3"])
        .output()
        .expect("describe");
    assert!(output.status.success());
    let json = parse_json(&output.stdout);
    assert_eq!(json["description"], "This goat has 3 horns.");
}
