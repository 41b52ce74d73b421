// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Periodic note operations.
//!
//! Addresses the current daily, weekly, monthly, quarterly or yearly note as
//! configured in Obsidian's periodic-notes settings. Requests for a period
//! whose note does not exist yet return
//! [`ObsidianError::NotFound`](crate::ObsidianError::NotFound), except
//! [`update`](PeriodicNotesResource::update) and
//! [`append`](PeriodicNotesResource::append), which create it.

use std::sync::Arc;

use crate::content::PatchRequest;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{DocumentMap, NoteContent, NoteFormat, NoteJson, Period};

/// The current periodic notes.
#[derive(Debug)]
pub struct PeriodicNotesResource {
    transport: Arc<Transport>,
}

impl PeriodicNotesResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn get(&self, period: Period, format: NoteFormat) -> Result<NoteContent> {
        self.transport.get_content(&period_path(period), format).await
    }

    pub async fn get_markdown(&self, period: Period) -> Result<String> {
        self.transport.get_markdown(&period_path(period)).await
    }

    pub async fn get_json(&self, period: Period) -> Result<NoteJson> {
        self.transport.get_note_json(&period_path(period)).await
    }

    pub async fn get_document_map(&self, period: Period) -> Result<DocumentMap> {
        self.transport.get_document_map(&period_path(period)).await
    }

    /// Replace the note's content, creating the note if needed.
    pub async fn update(&self, period: Period, content: &str) -> Result<()> {
        self.transport.put_content(&period_path(period), content).await
    }

    pub async fn append(&self, period: Period, content: &str) -> Result<()> {
        self.transport.append_content(&period_path(period), content).await
    }

    pub async fn patch(&self, period: Period, content: &str, patch: &PatchRequest) -> Result<()> {
        self.transport
            .patch_content(&period_path(period), content, patch)
            .await
    }

    pub async fn delete(&self, period: Period) -> Result<()> {
        self.transport.delete_content(&period_path(period)).await
    }
}

fn period_path(period: Period) -> String {
    format!("/periodic/{period}/")
}
