// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>
//! Shared fixtures for integration tests: a mock REST API server and a
//! client pointed at it.

#![allow(dead_code)]

use obsidian_rest_client::{ClientConfig, ObsidianClient, Scheme};
use serde_json::{json, Value};
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-key";

/// Route `tracing` output to the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_test_writer()
        .try_init();
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    let addr = server.address();
    ClientConfig::new(API_KEY)
        .scheme(Scheme::Http)
        .host(addr.ip().to_string())
        .port(addr.port())
}

pub async fn setup() -> (MockServer, ObsidianClient) {
    init_tracing();
    let server = MockServer::start().await;
    let client = ObsidianClient::new(config_for(&server)).expect("client builds");
    (server, client)
}

/// The single request the mock server received.
pub async fn only_request(server: &MockServer) -> Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn note_json(path: &str) -> Value {
    json!({
        "content": "# Hello\nWorld",
        "frontmatter": {"title": "Hello"},
        "tags": ["greeting"],
        "path": path,
        "stat": {"ctime": 1700000000000u64, "mtime": 1700000100000u64, "size": 42}
    })
}

pub fn document_map_json() -> Value {
    json!({
        "headings": ["# Hello", "## Tasks"],
        "blocks": ["^abc123"],
        "frontmatterFields": ["title"]
    })
}
