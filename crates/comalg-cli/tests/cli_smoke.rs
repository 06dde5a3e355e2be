use std::io::Write;
use std::process::Command;

use serde_json::Value;
use tempfile::NamedTempFile;

fn comalg() -> Command {
    Command::new(env!("CARGO_BIN_EXE_comalg"))
}

#[test]
fn builtin_run_passes() {
    let output = comalg().output().expect("run comalg");
    assert_eq!(output.status.code(), Some(0));
    let body = String::from_utf8(output.stdout).expect("utf8");
    assert!(body.contains("equivalence_holds: true"));
    assert!(body.contains("identity_holds: true"));
    assert!(body.contains("associated_primes: {(2), (3)}"));
    assert!(body.contains("PASS"));
}

#[test]
fn json_report_is_parseable() {
    let output = comalg().arg("--json").output().expect("run comalg");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value.get("all_hold"), Some(&Value::Bool(true)));
    let outcomes = value
        .get("outcomes")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();
    assert_eq!(outcomes.len(), 5, "expected the built-in scenarios");
    assert!(value
        .get("analysis_hash")
        .and_then(|v| v.as_str())
        .is_some());
}

#[test]
fn scenario_file_is_honoured() {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(
        b"scenarios:\n  - name: z-mod-12\n    ring: { kind: integers }\n    module:\n      generators: [e]\n      relations: [[12]]\n",
    )
    .expect("write");
    let output = comalg()
        .arg("--scenarios")
        .arg(file.path())
        .output()
        .expect("run comalg");
    assert_eq!(output.status.code(), Some(0));
    let body = String::from_utf8(output.stdout).expect("utf8");
    assert!(body.contains("z-mod-12"));
    assert!(body.contains("annihilator: (12)"));
    assert!(body.contains("radical_of_annihilator: (6)"));
}

#[test]
fn errors_exit_with_two() {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(
        b"scenarios:\n  - name: untagged\n    ring: { kind: integers }\n    assume_noetherian: false\n    module:\n      generators: [e]\n      relations: [[6]]\n",
    )
    .expect("write");
    let output = comalg()
        .arg("--scenarios")
        .arg(file.path())
        .output()
        .expect("run comalg");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("not-noetherian"));

    let missing = comalg()
        .args(["--scenarios", "/nonexistent/comalg.yaml"])
        .output()
        .expect("run comalg");
    assert_eq!(missing.status.code(), Some(2));
}
