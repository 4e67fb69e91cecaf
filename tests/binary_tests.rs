#![cfg(feature = "cli")]

//! Process-level behaviour of the `ci-triage` binary.

use std::process::Command;

#[test]
fn missing_api_key_exits_with_status_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_ci-triage"))
        .arg("analyze")
        .env("API_KEY", "")
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("binary should launch");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("set API_KEY in env."), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_ci-triage"))
        .arg("--help")
        .output()
        .expect("binary should launch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("fetch-logs"));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_logs_ignores_chat_settings() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job/e2e/artifacts/latest/logs.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw log\n"))
        .expect(1)
        .mount(&server)
        .await;
    let job_url = format!("{}/job/e2e", server.uri());

    let output = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_ci-triage"))
            .args(["fetch-logs", &job_url])
            .env("API_KEY", "")
            .env("TRIAGE_MAX_TURNS", "many")
            .current_dir(env!("CARGO_TARGET_TMPDIR"))
            .output()
            .expect("binary should launch")
    })
    .await
    .unwrap();

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "raw log\n");
}

#[test]
fn malformed_turn_limit_fails_analyze() {
    let output = Command::new(env!("CARGO_BIN_EXE_ci-triage"))
        .arg("analyze")
        .env("API_KEY", "sk-test")
        .env("TRIAGE_MAX_TURNS", "many")
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("binary should launch");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TRIAGE_MAX_TURNS"), "stderr: {stderr}");
}
