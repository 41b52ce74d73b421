// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Server status and API description.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Result;
use crate::transport::{RequestOptions, Transport};
use crate::types::ServerStatus;

#[derive(Debug)]
pub struct SystemResource {
    transport: Arc<Transport>,
}

impl SystemResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Server status, versions, and whether the API key was accepted.
    ///
    /// The root endpoint answers without authentication, so this is also a
    /// cheap way to check a key: see [`ServerStatus::authenticated`].
    pub async fn status(&self) -> Result<ServerStatus> {
        let response = self
            .transport
            .request(Method::GET, "/", RequestOptions::new())
            .await?;
        self.transport.decode(response).await
    }

    /// The plugin's OpenAPI description, as YAML text.
    pub async fn openapi(&self) -> Result<String> {
        let response = self
            .transport
            .request(Method::GET, "/openapi.yaml", RequestOptions::new())
            .await?;
        self.transport.text(response).await
    }
}
