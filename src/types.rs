// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Data types for the Obsidian REST client.
//!
//! The enums are closed sets sent on the wire as path segments or header
//! values. The records mirror the JSON bodies the plugin returns; serde does
//! the structural validation, so a body with a missing or mistyped field
//! surfaces as [`ObsidianError::Serialization`](crate::error::ObsidianError).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Time period of a periodic note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    /// Every period, shortest first.
    pub const ALL: [Period; 5] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Quarterly,
        Period::Yearly,
    ];

    /// Path segment used by `/periodic/{period}/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PatchOperation / TargetType
// ---------------------------------------------------------------------------

/// How PATCH content is placed relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    /// Insert after the target.
    Append,
    /// Insert before the target.
    Prepend,
    /// Replace the target entirely.
    Replace,
}

impl PatchOperation {
    /// Value of the `Operation` header.
    pub fn as_str(self) -> &'static str {
        match self {
            PatchOperation::Append => "append",
            PatchOperation::Prepend => "prepend",
            PatchOperation::Replace => "replace",
        }
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a note a PATCH addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// A heading section, e.g. `Heading 1::Subheading`.
    Heading,
    /// A block reference, e.g. `^abc123`.
    Block,
    /// A frontmatter field. The body is a JSON value.
    Frontmatter,
}

impl TargetType {
    /// Value of the `Target-Type` header.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Heading => "heading",
            TargetType::Block => "block",
            TargetType::Frontmatter => "frontmatter",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ContentType / NoteFormat
// ---------------------------------------------------------------------------

/// MIME types understood by the plugin, used in `Accept` and `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Plain Markdown text.
    Markdown,
    /// Note content plus frontmatter, tags and file stats.
    NoteJson,
    /// Headings, block references and frontmatter field names of a note.
    DocumentMap,
    /// A Dataview (DQL) query string.
    DataviewDql,
    /// A JsonLogic query object.
    JsonLogic,
}

impl ContentType {
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Markdown => "text/markdown",
            ContentType::NoteJson => "application/vnd.olrapi.note+json",
            ContentType::DocumentMap => "application/vnd.olrapi.document-map+json",
            ContentType::DataviewDql => "application/vnd.olrapi.dataview.dql+txt",
            ContentType::JsonLogic => "application/vnd.olrapi.jsonlogic+json",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Response shape a note GET may ask for.
///
/// Only these three content types make sense as an `Accept` value for a
/// note, so the query types are not representable here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NoteFormat {
    #[default]
    Markdown,
    Json,
    DocumentMap,
}

impl NoteFormat {
    pub fn content_type(self) -> ContentType {
        match self {
            NoteFormat::Markdown => ContentType::Markdown,
            NoteFormat::Json => ContentType::NoteJson,
            NoteFormat::DocumentMap => ContentType::DocumentMap,
        }
    }
}

impl From<NoteFormat> for ContentType {
    fn from(format: NoteFormat) -> Self {
        format.content_type()
    }
}

/// A note decoded according to the requested [`NoteFormat`].
#[derive(Debug, Clone, PartialEq)]
pub enum NoteContent {
    Markdown(String),
    Json(NoteJson),
    DocumentMap(DocumentMap),
}

impl NoteContent {
    pub fn format(&self) -> NoteFormat {
        match self {
            NoteContent::Markdown(_) => NoteFormat::Markdown,
            NoteContent::Json(_) => NoteFormat::Json,
            NoteContent::DocumentMap(_) => NoteFormat::DocumentMap,
        }
    }

    pub fn into_markdown(self) -> Option<String> {
        match self {
            NoteContent::Markdown(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<NoteJson> {
        match self {
            NoteContent::Json(note) => Some(note),
            _ => None,
        }
    }

    pub fn into_document_map(self) -> Option<DocumentMap> {
        match self {
            NoteContent::DocumentMap(map) => Some(map),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// File metadata attached to a [`NoteJson`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// Creation time, milliseconds since the Unix epoch.
    pub ctime: u64,
    /// Modification time, milliseconds since the Unix epoch.
    pub mtime: u64,
    /// Size in bytes.
    pub size: u64,
}

impl FileStat {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.ctime)
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.mtime)
    }
}

fn millis_to_datetime(millis: u64) -> Option<DateTime<Utc>> {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// A note as returned for `application/vnd.olrapi.note+json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteJson {
    /// Raw Markdown content, frontmatter included.
    pub content: String,
    /// Parsed frontmatter.
    pub frontmatter: serde_json::Map<String, serde_json::Value>,
    /// Tags found in the note, in document order.
    pub tags: Vec<String>,
    /// Vault-relative path.
    pub path: String,
    pub stat: FileStat,
}

/// Structure of a note as returned for
/// `application/vnd.olrapi.document-map+json`.
///
/// The entries are exactly the strings usable as a PATCH `Target`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMap {
    pub headings: Vec<String>,
    pub blocks: Vec<String>,
    #[serde(
        rename = "frontmatterFields",
        alias = "frontmatter_fields",
        default
    )]
    pub frontmatter_fields: Vec<String>,
}

/// A vault directory listing.
///
/// Sub-directories are listed with a trailing `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDirectory {
    pub files: Vec<String>,
}

impl VaultDirectory {
    /// Entries that are sub-directories, trailing slash kept.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|entry| entry.ends_with('/'))
    }

    /// Entries that are files.
    pub fn file_entries(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|entry| !entry.ends_with('/'))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Character offsets of a match within a note.
///
/// Deserialization rejects a span whose `start` is past its `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchSpan")]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Deserialize)]
struct RawMatchSpan {
    start: usize,
    end: usize,
}

impl TryFrom<RawMatchSpan> for MatchSpan {
    type Error = String;

    fn try_from(raw: RawMatchSpan) -> Result<Self, Self::Error> {
        if raw.start > raw.end {
            return Err(format!(
                "match span start {} is past end {}",
                raw.start, raw.end
            ));
        }
        Ok(Self {
            start: raw.start,
            end: raw.end,
        })
    }
}

impl MatchSpan {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One occurrence of a simple-search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    #[serde(rename = "match")]
    pub span: MatchSpan,
    /// Text surrounding the match.
    pub context: String,
}

/// A search hit.
///
/// Simple search fills `score` and `matches`; Dataview and JsonLogic queries
/// fill `result` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Vault-relative path of the matching file.
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<SearchMatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Commands / system
// ---------------------------------------------------------------------------

/// An Obsidian command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    /// Stable identifier, e.g. `editor:toggle-bold`.
    pub id: String,
    /// Human-readable label, e.g. `Toggle bold`.
    pub name: String,
}

/// Versions of Obsidian and of the REST API plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    pub obsidian: String,
    /// Plugin version, sent as `self`.
    #[serde(rename = "self")]
    pub plugin: String,
}

/// Response of the root endpoint.
///
/// The plugin adds fields over time (manifest, certificate info, API
/// extensions); anything not listed here is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawServerStatus")]
pub struct ServerStatus {
    /// Usually `OK`. Older fixtures call this field `ok`; when a body has
    /// both, `status` wins.
    pub status: String,
    pub service: String,
    /// Whether this request's bearer token was accepted.
    pub authenticated: bool,
    pub versions: Versions,
}

#[derive(Deserialize)]
struct RawServerStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    ok: Option<String>,
    service: String,
    authenticated: bool,
    versions: Versions,
}

impl TryFrom<RawServerStatus> for ServerStatus {
    type Error = &'static str;

    fn try_from(raw: RawServerStatus) -> Result<Self, Self::Error> {
        let status = raw.status.or(raw.ok).ok_or("missing field `status`")?;
        Ok(Self {
            status,
            service: raw.service,
            authenticated: raw.authenticated,
            versions: raw.versions,
        })
    }
}
