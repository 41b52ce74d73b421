// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Operations on the file currently open in Obsidian.
//!
//! Every method returns
//! [`ObsidianError::NotFound`](crate::ObsidianError::NotFound) when no file
//! is open.

use std::sync::Arc;

use crate::content::PatchRequest;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{DocumentMap, NoteContent, NoteFormat, NoteJson};

const ACTIVE_PATH: &str = "/active/";

/// The active (frontmost) file.
#[derive(Debug)]
pub struct ActiveFileResource {
    transport: Arc<Transport>,
}

impl ActiveFileResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn get(&self, format: NoteFormat) -> Result<NoteContent> {
        self.transport.get_content(ACTIVE_PATH, format).await
    }

    pub async fn get_markdown(&self) -> Result<String> {
        self.transport.get_markdown(ACTIVE_PATH).await
    }

    pub async fn get_json(&self) -> Result<NoteJson> {
        self.transport.get_note_json(ACTIVE_PATH).await
    }

    pub async fn get_document_map(&self) -> Result<DocumentMap> {
        self.transport.get_document_map(ACTIVE_PATH).await
    }

    /// Replace the whole content of the active file.
    pub async fn update(&self, content: &str) -> Result<()> {
        self.transport.put_content(ACTIVE_PATH, content).await
    }

    pub async fn append(&self, content: &str) -> Result<()> {
        self.transport.append_content(ACTIVE_PATH, content).await
    }

    pub async fn patch(&self, content: &str, patch: &PatchRequest) -> Result<()> {
        self.transport.patch_content(ACTIVE_PATH, content, patch).await
    }

    pub async fn delete(&self) -> Result<()> {
        self.transport.delete_content(ACTIVE_PATH).await
    }
}
