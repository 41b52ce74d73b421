// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Vault file operations.
//!
//! Every method addresses a file by its vault-relative path under
//! `/vault/`. Directories are listed with [`VaultResource::list`].

use std::sync::Arc;

use reqwest::Method;

use crate::content::PatchRequest;
use crate::error::Result;
use crate::transport::{escape_path, RequestOptions, Transport};
use crate::types::{DocumentMap, NoteContent, NoteFormat, NoteJson, VaultDirectory};

/// Files in the vault, by path.
#[derive(Debug)]
pub struct VaultResource {
    transport: Arc<Transport>,
}

impl VaultResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Get a file in the requested format.
    ///
    /// # Errors
    ///
    /// Returns [`ObsidianError::NotFound`](crate::ObsidianError::NotFound) if
    /// the file does not exist.
    pub async fn get(&self, path: &str, format: NoteFormat) -> Result<NoteContent> {
        self.transport.get_content(&file_path(path), format).await
    }

    /// Raw Markdown content of a note.
    pub async fn get_markdown(&self, path: &str) -> Result<String> {
        self.transport.get_markdown(&file_path(path)).await
    }

    /// Content, frontmatter, tags and stats of a note.
    pub async fn get_json(&self, path: &str) -> Result<NoteJson> {
        self.transport.get_note_json(&file_path(path)).await
    }

    /// Headings, blocks and frontmatter fields of a note.
    pub async fn get_document_map(&self, path: &str) -> Result<DocumentMap> {
        self.transport.get_document_map(&file_path(path)).await
    }

    /// Create a file, or replace its content if it exists.
    pub async fn update(&self, path: &str, content: &str) -> Result<()> {
        self.transport.put_content(&file_path(path), content).await
    }

    /// Same as [`update`](Self::update).
    pub async fn create(&self, path: &str, content: &str) -> Result<()> {
        self.update(path, content).await
    }

    /// Append Markdown to the end of a file, creating it if needed.
    pub async fn append(&self, path: &str, content: &str) -> Result<()> {
        self.transport.append_content(&file_path(path), content).await
    }

    /// Insert or replace content relative to a heading, block or
    /// frontmatter field.
    pub async fn patch(&self, path: &str, content: &str, patch: &PatchRequest) -> Result<()> {
        self.transport
            .patch_content(&file_path(path), content, patch)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.transport.delete_content(&file_path(path)).await
    }

    /// List a directory. `""` lists the vault root.
    ///
    /// Leading and trailing slashes are ignored, so `"/folder/"` and
    /// `"folder"` list the same directory.
    pub async fn list(&self, path: &str) -> Result<VaultDirectory> {
        let response = self
            .transport
            .request(Method::GET, &directory_path(path), RequestOptions::new())
            .await?;
        self.transport.decode(response).await
    }
}

fn file_path(path: &str) -> String {
    format!("/vault/{}", escape_path(path.trim_start_matches('/')))
}

fn directory_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/vault/".to_owned()
    } else {
        format!("/vault/{}/", escape_path(trimmed))
    }
}
