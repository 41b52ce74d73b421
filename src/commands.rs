// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Obsidian command palette: listing and execution.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;

use crate::error::Result;
use crate::transport::{escape_path, RequestOptions, Transport};
use crate::types::Command;

/// Body of `GET /commands/`.
#[derive(Debug, Deserialize)]
struct CommandList {
    commands: Vec<Command>,
}

/// Commands registered with Obsidian, core and plugin alike.
#[derive(Debug)]
pub struct CommandsResource {
    transport: Arc<Transport>,
}

impl CommandsResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// All available commands, in the order the server lists them.
    pub async fn list(&self) -> Result<Vec<Command>> {
        let response = self
            .transport
            .request(Method::GET, "/commands/", RequestOptions::new())
            .await?;
        let list: CommandList = self.transport.decode(response).await?;
        Ok(list.commands)
    }

    /// Run a command by id, e.g. `editor:toggle-bold`.
    ///
    /// # Errors
    ///
    /// Returns [`ObsidianError::NotFound`](crate::ObsidianError::NotFound)
    /// for an unknown command id.
    pub async fn execute(&self, command_id: &str) -> Result<()> {
        let path = format!("/commands/{}/", escape_path(command_id));
        self.transport
            .send(Method::POST, &path, RequestOptions::new())
            .await
    }
}
