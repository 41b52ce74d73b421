// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Note content access shared by the vault, active-file and periodic-note
//! resources.
//!
//! All three address a single Markdown note by URL and support the same
//! verbs, so the request shapes live here as `impl Transport` methods and each
//! resource only supplies its path.
//!
//! PATCH requests carry their intent in headers:
//!
//! | Header | Value |
//! |---|---|
//! | `Operation` | `append`, `prepend` or `replace` |
//! | `Target-Type` | `heading`, `block` or `frontmatter` |
//! | `Target` | heading path, block id or field name (raw UTF-8) |
//! | `Target-Delimiter` | separator for nested headings, default `::` |
//! | `Content-Type` | `text/markdown`, or `application/json` for frontmatter |

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;

use crate::error::Result;
use crate::transport::{text_header, RequestOptions, Transport};
use crate::types::{
    ContentType, DocumentMap, NoteContent, NoteFormat, NoteJson, PatchOperation, TargetType,
};

pub const DEFAULT_TARGET_DELIMITER: &str = "::";

const OPERATION: &str = "operation";
const TARGET_TYPE: &str = "target-type";
const TARGET: &str = "target";
const TARGET_DELIMITER: &str = "target-delimiter";

/// Where and how a PATCH applies its content.
///
/// ```rust
/// use obsidian_rest_client::{PatchOperation, PatchRequest, TargetType};
///
/// let patch = PatchRequest::heading(PatchOperation::Append, "Projects/Tasks")
///     .with_delimiter("/");
/// assert_eq!(patch.target_type, TargetType::Heading);
/// assert_eq!(patch.delimiter, "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    pub operation: PatchOperation,
    pub target_type: TargetType,
    /// Heading path, block id (`^abc123`) or frontmatter field name.
    pub target: String,
    /// Separator between nested heading names in `target`.
    pub delimiter: String,
}

impl PatchRequest {
    pub fn new(operation: PatchOperation, target_type: TargetType, target: impl Into<String>) -> Self {
        Self {
            operation,
            target_type,
            target: target.into(),
            delimiter: DEFAULT_TARGET_DELIMITER.to_owned(),
        }
    }

    /// Target a heading section; nest with `::`, e.g. `Heading 1::Sub`.
    pub fn heading(operation: PatchOperation, heading: impl Into<String>) -> Self {
        Self::new(operation, TargetType::Heading, heading)
    }

    /// Target a block reference.
    pub fn block(operation: PatchOperation, block_id: impl Into<String>) -> Self {
        Self::new(operation, TargetType::Block, block_id)
    }

    /// Target a frontmatter field. The PATCH body must be a JSON value.
    pub fn frontmatter(operation: PatchOperation, field: impl Into<String>) -> Self {
        Self::new(operation, TargetType::Frontmatter, field)
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// `Content-Type` of the PATCH body.
    ///
    /// Frontmatter values are JSON; everything else is Markdown.
    pub fn body_content_type(&self) -> &'static str {
        match self.target_type {
            TargetType::Frontmatter => "application/json",
            TargetType::Heading | TargetType::Block => ContentType::Markdown.mime(),
        }
    }

    fn apply(&self, options: RequestOptions) -> Result<RequestOptions> {
        Ok(options
            .header(CONTENT_TYPE, HeaderValue::from_static(self.body_content_type()))
            .header(
                HeaderName::from_static(OPERATION),
                HeaderValue::from_static(self.operation.as_str()),
            )
            .header(
                HeaderName::from_static(TARGET_TYPE),
                HeaderValue::from_static(self.target_type.as_str()),
            )
            .header(
                HeaderName::from_static(TARGET),
                text_header("Target", &self.target)?,
            )
            .header(
                HeaderName::from_static(TARGET_DELIMITER),
                text_header("Target-Delimiter", &self.delimiter)?,
            ))
    }
}

fn markdown_body(content: &str) -> RequestOptions {
    RequestOptions::new()
        .header(CONTENT_TYPE, HeaderValue::from_static(ContentType::Markdown.mime()))
        .content(content.as_bytes().to_vec())
}

impl Transport {
    /// GET `path` with `Accept` set to `content_type`.
    async fn fetch_note(&self, path: &str, content_type: ContentType) -> Result<reqwest::Response> {
        let options =
            RequestOptions::new().header(ACCEPT, HeaderValue::from_static(content_type.mime()));
        self.request(Method::GET, path, options).await
    }

    pub(crate) async fn get_markdown(&self, path: &str) -> Result<String> {
        let response = self.fetch_note(path, ContentType::Markdown).await?;
        self.text(response).await
    }

    pub(crate) async fn get_note_json(&self, path: &str) -> Result<NoteJson> {
        let response = self.fetch_note(path, ContentType::NoteJson).await?;
        self.decode(response).await
    }

    pub(crate) async fn get_document_map(&self, path: &str) -> Result<DocumentMap> {
        let response = self.fetch_note(path, ContentType::DocumentMap).await?;
        self.decode(response).await
    }

    /// GET a note in the requested format.
    pub(crate) async fn get_content(&self, path: &str, format: NoteFormat) -> Result<NoteContent> {
        Ok(match format {
            NoteFormat::Markdown => NoteContent::Markdown(self.get_markdown(path).await?),
            NoteFormat::Json => NoteContent::Json(self.get_note_json(path).await?),
            NoteFormat::DocumentMap => NoteContent::DocumentMap(self.get_document_map(path).await?),
        })
    }

    /// PUT Markdown, creating or replacing the note.
    pub(crate) async fn put_content(&self, path: &str, content: &str) -> Result<()> {
        self.send(Method::PUT, path, markdown_body(content)).await
    }

    /// POST Markdown, appending it to the end of the note.
    pub(crate) async fn append_content(&self, path: &str, content: &str) -> Result<()> {
        self.send(Method::POST, path, markdown_body(content)).await
    }

    /// PATCH `content` into the section addressed by `patch`.
    pub(crate) async fn patch_content(
        &self,
        path: &str,
        content: &str,
        patch: &PatchRequest,
    ) -> Result<()> {
        let options = patch.apply(RequestOptions::new().content(content.as_bytes().to_vec()))?;
        self.send(Method::PATCH, path, options).await
    }

    pub(crate) async fn delete_content(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, RequestOptions::new()).await
    }
}
