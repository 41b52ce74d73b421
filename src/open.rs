// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Opening files in the Obsidian UI.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Result;
use crate::transport::{escape_path, RequestOptions, Transport};

#[derive(Debug)]
pub struct OpenResource {
    transport: Arc<Transport>,
}

impl OpenResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Open `filename` (vault-relative) in Obsidian.
    ///
    /// With `new_leaf` the file opens in a new pane; otherwise it replaces
    /// the current one. Obsidian creates the file if it does not exist.
    pub async fn file(&self, filename: &str, new_leaf: bool) -> Result<()> {
        let path = format!("/open/{}", escape_path(filename.trim_start_matches('/')));
        let mut options = RequestOptions::new();
        if new_leaf {
            options = options.query("newLeaf", "true");
        }
        self.transport.send(Method::POST, &path, options).await
    }
}
