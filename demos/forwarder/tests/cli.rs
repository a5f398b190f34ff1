//! End-to-end runs of the forwarder binary.

use std::process::Output;

use assert_cmd::Command;

fn forwarder() -> Command {
    #[expect(
        deprecated,
        clippy::expect_used,
        reason = "cargo_bin is the standard assert_cmd API and test panics are acceptable"
    )]
    let mut cmd = Command::cargo_bin("forwarder").expect("binary should exist");
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("ENV")
        .env_remove("APP_TG_BOT_TOKEN")
        .env_remove("APP_LOGLEVEL")
        .env_remove("APP_PORT")
        .env("RUST_BACKTRACE", "0");
    cmd
}

fn run(cmd: &mut Command) -> (Output, String, String) {
    #[expect(clippy::expect_used, reason = "test panics are acceptable")]
    let output = cmd.output().expect("command should execute");
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    (output, stdout, stderr)
}

#[test]
fn help_exits_successfully_without_a_token() {
    let (output, stdout, _) = run(forwarder().arg("--help"));
    assert!(output.status.success());
    for fragment in [
        "--tg-bot-token",
        "[env: APP_TG_BOT_TOKEN]",
        "--proxy-url",
        "Application:",
    ] {
        assert!(stdout.contains(fragment), "missing {fragment:?} in:\n{stdout}");
    }
}

#[test]
fn missing_token_fails_with_a_hint() {
    let (output, _, stderr) = run(&mut forwarder());
    assert!(!output.status.success());
    assert!(
        stderr.contains("set --tg-bot-token or APP_TG_BOT_TOKEN"),
        "{stderr}"
    );
}

#[test]
fn token_from_the_environment_is_enough() {
    let (output, _, stderr) = run(forwarder().env("APP_TG_BOT_TOKEN", "123:abc"));
    assert!(output.status.success(), "{stderr}");
}

#[test]
fn flags_override_file_values() {
    let (output, _, stderr) = run(
        forwarder()
            .args(["--tg-bot-token", "123:abc", "--port", "9999"])
            .env("APP_LOGLEVEL", "info"),
    );
    assert!(output.status.success(), "{stderr}");
    assert!(stderr.contains("port=9999"), "{stderr}");
}
