// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>
//! Commands, open and system endpoints, plus resource-group sharing on the
//! client facade.

mod common;

use obsidian_rest_client::{Command, ObsidianError};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{only_request, setup};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_commands_keeps_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/commands/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commands": [
                {"id": "global-search:open", "name": "Search: Search in all files"},
                {"id": "editor:toggle-bold", "name": "Toggle bold"}
            ]
        })))
        .mount(&server)
        .await;

    let commands = client.commands().list().await.unwrap();
    assert_eq!(
        commands,
        vec![
            Command {
                id: "global-search:open".into(),
                name: "Search: Search in all files".into(),
            },
            Command {
                id: "editor:toggle-bold".into(),
                name: "Toggle bold".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_execute_command() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/commands/editor:toggle-bold/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client.commands().execute("editor:toggle-bold").await);
}

#[tokio::test]
async fn test_execute_unknown_command() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/commands/nope/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Command not found"})))
        .mount(&server)
        .await;

    let err = client.commands().execute("nope").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.api_error().unwrap().message, "Command not found");
}

// ---------------------------------------------------------------------------
// Open
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_open_file_without_new_leaf() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/open/notes/hello.md"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert_ok!(client.open().file("notes/hello.md", false).await);

    let request = only_request(&server).await;
    assert_eq!(request.url.query_pairs().count(), 0);
}

#[tokio::test]
async fn test_open_file_in_new_leaf() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/open/notes/hello.md"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert_ok!(client.open().file("notes/hello.md", true).await);

    let request = only_request(&server).await;
    let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![("newLeaf".to_string(), "true".to_string())]);
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_server_status_ignores_extra_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "service": "Obsidian Local REST API",
            "authenticated": true,
            "versions": {"obsidian": "1.5.0", "self": "3.0.0"},
            "manifest": {"id": "obsidian-local-rest-api"},
            "certificateInfo": {"validityDays": 365}
        })))
        .mount(&server)
        .await;

    let status = client.system().status().await.unwrap();
    assert_eq!(status.status, "OK");
    assert_eq!(status.service, "Obsidian Local REST API");
    assert!(status.authenticated);
    assert_eq!(status.versions.obsidian, "1.5.0");
    assert_eq!(status.versions.plugin, "3.0.0");
}

#[tokio::test]
async fn test_server_status_accepts_ok_field() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": "OK",
            "service": "Obsidian Local REST API",
            "authenticated": false,
            "versions": {"obsidian": "1.5.0", "self": "3.0.0"}
        })))
        .mount(&server)
        .await;

    let status = client.system().status().await.unwrap();
    assert_eq!(status.status, "OK");
    assert!(!status.authenticated);
}

#[tokio::test]
async fn test_server_status_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.system().status().await.unwrap_err();
    assert!(matches!(err, ObsidianError::Serialization(_)), "got {err:?}");
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_openapi_returns_yaml_text() {
    let (server, client) = setup().await;
    let yaml = "openapi: 3.0.2\ninfo:\n  title: Local REST API for Obsidian\n";

    Mock::given(method("GET"))
        .and(path("/openapi.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(yaml))
        .mount(&server)
        .await;

    assert_eq!(client.system().openapi().await.unwrap(), yaml);
}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_resource_groups_share_one_transport() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"files": []})))
        .mount(&server)
        .await;

    assert!(std::ptr::eq(client.vault(), client.vault()));
    client.vault().list("").await.unwrap();
    client.vault().list("sub").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| r.headers.get("authorization").is_some()));
}
