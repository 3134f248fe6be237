//! Integration tests for the varsync binary: exit codes, stream discipline, and
//! configuration layering as seen from the outside.

use super::test_utils::{api_url, IsolatedHome, TEST_TOKEN};
use serde_json::{json, Value};
use std::io::Write;
use std::process::{Output, Stdio};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_with_stdin(mut command: std::process::Command, stdin: &[u8]) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_missing_token_exits_with_validation_code() {
    let home = IsolatedHome::new();
    let mut command = home.command();
    command
        .args(["--url", "https://gitlab.example.com/api/v4", "--group", "7", "export"])
        .stdin(Stdio::null());
    let output = command.output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("token"), "stderr={}", stderr);
}

#[test]
fn test_missing_scope_exits_with_validation_code() {
    let home = IsolatedHome::new();
    let mut command = home.command();
    command
        .args(["--token", TEST_TOKEN, "--url", "https://gitlab.example.com/api/v4", "export"])
        .stdin(Stdio::null());
    let output = command.output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("group"));
}

#[test]
fn test_dry_run_import_of_junk_is_empty_report() {
    let home = IsolatedHome::new();
    let mut command = home.command();
    command.args([
        "--token",
        TEST_TOKEN,
        "--url",
        "http://127.0.0.1:9/api/v4",
        "--group",
        "7",
        "import",
        "--dry-run",
    ]);
    let output = run_with_stdin(command, b"this is not json");

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report, json!({"succeeded": [], "failed": []}));
}

#[test]
fn test_dry_run_import_reports_every_key() {
    let home = IsolatedHome::new();
    let mut command = home.command();
    command
        .env("VARSYNC_GITLAB__TOKEN", TEST_TOKEN)
        .env("VARSYNC_GITLAB__BASE_URL", "http://127.0.0.1:9/api/v4")
        .env("VARSYNC_GITLAB__GROUP", "7")
        .args(["import", "--dry-run"]);
    let output = run_with_stdin(
        command,
        br#"[{"key": "A", "value": "1"}, {"key": "B", "value": "2", "masked": true}]"#,
    );

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["succeeded"], json!(["A", "B"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_prints_listing_to_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/team%2Fapp/variables"))
        .and(header("PRIVATE-TOKEN", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"key": "A", "value": "1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let home = IsolatedHome::new();
    let config_file = home.path("varsync.toml");
    std::fs::write(
        &config_file,
        format!(
            "[gitlab]\ntoken = \"{}\"\nbase_url = \"{}/\"\ngroup = \"team\"\nproject = \"team/app\"\n",
            TEST_TOKEN,
            api_url(&server)
        ),
    )
    .unwrap();

    let mut command = home.command();
    command
        .arg("--config")
        .arg(&config_file)
        .arg("export")
        .stdin(Stdio::null());
    let output = command.output().unwrap();

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let listing: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing[0]["key"], json!("A"));
    assert_eq!(listing[0]["environment_scope"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_failure_exits_non_zero_without_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("401 Unauthorized"))
        .mount(&server)
        .await;

    let home = IsolatedHome::new();
    let mut command = home.command();
    command
        .arg("--token")
        .arg(TEST_TOKEN)
        .arg("--url")
        .arg(api_url(&server))
        .args(["--group", "7", "export"])
        .stdin(Stdio::null());
    let output = command.output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("401"), "stderr={}", stderr);
    assert!(stderr.contains("hint:"), "stderr={}", stderr);
}
