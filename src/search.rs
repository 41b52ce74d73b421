// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Search operations across the vault.
//!
//! Three query languages are supported:
//!
//! - **simple**: plain text, with match offsets and surrounding context.
//! - **Dataview**: a DQL `TABLE` query; needs the Dataview plugin.
//! - **JsonLogic**: a JsonLogic expression evaluated against each note's
//!   JSON representation.
//!
//! All three return [`SearchResult`] values; simple search fills `score` and
//! `matches`, the query languages fill `result`.

use std::sync::Arc;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;

use crate::error::Result;
use crate::transport::{RequestOptions, Transport};
use crate::types::{ContentType, SearchResult};

/// Characters of context returned around each simple-search match.
pub const DEFAULT_CONTEXT_LENGTH: usize = 100;

/// Vault search.
#[derive(Debug)]
pub struct SearchResource {
    transport: Arc<Transport>,
}

impl SearchResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Plain-text search with [`DEFAULT_CONTEXT_LENGTH`] characters of
    /// context.
    pub async fn simple(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.simple_with_context(query, DEFAULT_CONTEXT_LENGTH).await
    }

    /// Plain-text search.
    ///
    /// # Arguments
    ///
    /// * `query`: Text to look for.
    /// * `context_length`: Characters of context around each match.
    pub async fn simple_with_context(
        &self,
        query: &str,
        context_length: usize,
    ) -> Result<Vec<SearchResult>> {
        let options = RequestOptions::new()
            .query("query", query)
            .query("contextLength", context_length);
        self.run("/search/simple/", options).await
    }

    /// Run a Dataview DQL query, e.g. `TABLE rating FROM #game`.
    pub async fn dataview(&self, dql: &str) -> Result<Vec<SearchResult>> {
        let options = RequestOptions::new()
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static(ContentType::DataviewDql.mime()),
            )
            .content(dql.as_bytes().to_vec());
        self.run("/search/", options).await
    }

    /// Run a JsonLogic query, e.g. `{"glob": ["*.md", {"var": "path"}]}`.
    pub async fn jsonlogic(&self, query: &serde_json::Value) -> Result<Vec<SearchResult>> {
        let options = RequestOptions::new()
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static(ContentType::JsonLogic.mime()),
            )
            .json(query.clone());
        self.run("/search/", options).await
    }

    async fn run(&self, path: &str, options: RequestOptions) -> Result<Vec<SearchResult>> {
        let response = self.transport.request(Method::POST, path, options).await?;
        self.transport.decode(response).await
    }
}
