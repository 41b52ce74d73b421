// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # Obsidian REST Client
//!
//! A typed async client for the Obsidian
//! [Local REST API](https://github.com/coddingtonbear/obsidian-local-rest-api)
//! plugin: read, write, patch and delete notes, work with periodic notes and
//! the active file, search the vault, run commands and open files in the UI.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use obsidian_rest_client::{ClientConfig, ObsidianClient, PatchOperation, PatchRequest};
//!
//! #[tokio::main]
//! async fn main() -> obsidian_rest_client::Result<()> {
//!     let client = ObsidianClient::new(ClientConfig::new("my-api-key"))?;
//!
//!     let status = client.system().status().await?;
//!     println!("Obsidian {} (authenticated: {})", status.versions.obsidian, status.authenticated);
//!
//!     let patch = PatchRequest::heading(PatchOperation::Append, "Tasks");
//!     client.vault().patch("projects/today.md", "- [ ] write docs\n", &patch).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`]: The [`ObsidianClient`] facade and resource-group accessors.
//! - [`config`]: Connection settings, defaults and environment loading.
//! - [`transport`]: Authenticated HTTP transport and error-status mapping.
//! - [`content`]: Note GET/PUT/POST/PATCH shared by note-like resources.
//! - [`vault`], [`active`], [`periodic`]: Note resources.
//! - [`commands`], [`search`], [`open`], [`system`]: Other API surfaces.
//! - [`types`]: Enums and response records.
//! - [`error`]: Error types and the crate-level `Result` alias.

pub mod active;
pub mod client;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod open;
pub mod periodic;
pub mod search;
pub mod system;
pub mod transport;
pub mod types;
pub mod vault;

pub use client::ObsidianClient;
pub use config::{ClientConfig, Scheme};
pub use content::PatchRequest;
pub use error::{ApiError, ObsidianError, Result};
pub use transport::{RequestOptions, Transport};
pub use types::{
    Command, ContentType, DocumentMap, FileStat, MatchSpan, NoteContent, NoteFormat, NoteJson,
    PatchOperation, Period, SearchMatch, SearchResult, ServerStatus, TargetType, VaultDirectory,
    Versions,
};
