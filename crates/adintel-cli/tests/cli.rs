use std::process::Command;

fn adintel() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_adintel"));
    cmd.env("ADINTEL_MAX_AUDIENCE_LABELS", "lots");
    cmd
}

#[test]
fn help_succeeds_with_invalid_environment() {
    let output = adintel().arg("--help").output().expect("run adintel");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("categorize"));
}

#[test]
fn commands_still_reject_invalid_environment() {
    let output = adintel()
        .args(["categorize", "missing.json"])
        .output()
        .expect("run adintel");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ADINTEL_MAX_AUDIENCE_LABELS"));
}
