//! End-to-end transfers through the dispatcher against a mock GitLab.

use super::test_utils::{client, group_scope, project_scope};
use serde_json::{json, Value};
use std::sync::Arc;
use varsync::dispatch::{Command, CommandRegistry, Dispatcher, ProviderContext, ProviderRegistry};
use varsync::error::TransferError;
use varsync::model::Scope;
use varsync::remote::GitLabClient;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher(client: GitLabClient) -> Dispatcher {
    let client = Arc::new(client);
    Dispatcher::new(
        CommandRegistry::with_transfer_operations(client.clone(), client),
        ProviderRegistry::with_defaults(),
    )
}

async fn run(command: Command, scope: &Scope, input: &[u8]) -> Result<String, TransferError> {
    let mut input = input;
    let mut ctx = ProviderContext::new(scope, &mut input);
    dispatcher(client()).dispatch(command, &mut ctx).await
}

#[tokio::test]
async fn test_export_emits_field_complete_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/groups/7/variables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"key": "A", "value": "1"}])))
        .mount(&server)
        .await;

    let output = run(Command::Export, &group_scope(&server, "7"), b"")
        .await
        .unwrap();

    let emitted: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        serde_json::to_string(&emitted).unwrap(),
        r#"[{"key":"A","value":"1","variable_type":null,"protected":false,"masked":false,"environment_scope":null}]"#
    );
}

#[tokio::test]
async fn test_import_of_non_array_stream_is_empty_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let output = run(Command::Import, &group_scope(&server, "7"), b"not an array")
        .await
        .unwrap();

    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report, json!({"succeeded": [], "failed": []}));
}

#[tokio::test]
async fn test_export_unauthorized_fails_without_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("401 Unauthorized"))
        .mount(&server)
        .await;

    let result = run(Command::Export, &group_scope(&server, "7"), b"").await;
    match result {
        Err(TransferError::Remote { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_project_with_spaces_never_adds_a_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/my+group%2Fmy+project/variables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let scope = project_scope(&server, "my group", "my group/my project");
    let output = run(Command::Export, &scope, b"").await.unwrap();
    assert_eq!(serde_json::from_str::<Value>(&output).unwrap(), json!([]));
}

#[tokio::test]
async fn test_import_reports_each_variable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/groups/7/variables"))
        .and(body_partial_json(json!({"key": "BAD"})))
        .respond_with(ResponseTemplate::new(400).set_body_string("key has already been taken"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/groups/7/variables"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let input = br#"[
        {"key": "A", "value": "1"},
        {"key": "BAD", "value": "2"},
        {"key": "C", "value": "3", "protected": true}
    ]"#;
    let output = run(Command::Import, &group_scope(&server, "7"), input)
        .await
        .unwrap();

    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["succeeded"], json!(["A", "C"]));
    assert_eq!(report["failed"][0]["key"], json!("BAD"));
}

#[tokio::test]
async fn test_export_then_import_round_trip() {
    let source = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/old%2Fapp/variables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"key": "TOKEN", "value": "s3cr3t", "variable_type": "env_var",
             "protected": true, "masked": true, "environment_scope": "*"},
            {"key": "CERT", "value": "-----BEGIN-----", "variable_type": "file",
             "protected": false, "masked": false, "environment_scope": "staging"}
        ])))
        .mount(&source)
        .await;

    let destination = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/new%2Fapp/variables"))
        .and(body_partial_json(json!({
            "key": "TOKEN", "value": "s3cr3t", "protected": true, "masked": true
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&destination)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/new%2Fapp/variables"))
        .and(body_partial_json(json!({
            "key": "CERT", "variable_type": "file", "environment_scope": "staging"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&destination)
        .await;

    let exported = run(
        Command::Export,
        &project_scope(&source, "old", "old/app"),
        b"",
    )
    .await
    .unwrap();
    let output = run(
        Command::Import,
        &project_scope(&destination, "new", "new/app"),
        exported.as_bytes(),
    )
    .await
    .unwrap();

    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report, json!({"succeeded": ["TOKEN", "CERT"], "failed": []}));
}
