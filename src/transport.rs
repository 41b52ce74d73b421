// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! HTTP transport layer.
//!
//! [`Transport`] owns the base URL, the `reqwest` client, the bearer header
//! and the timeout. Every resource group funnels through
//! [`Transport::request`], which is the only place where error statuses are
//! turned into [`ObsidianError`] values.

use std::borrow::Cow;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{self, ObsidianError, Result};

// ---------------------------------------------------------------------------
// RequestOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum RequestBody {
    Content(Vec<u8>),
    Json(serde_json::Value),
}

/// Body, extra headers and query parameters of a single request.
///
/// ```rust
/// use obsidian_rest_client::transport::RequestOptions;
/// use reqwest::header::{HeaderValue, ACCEPT};
///
/// let options = RequestOptions::new()
///     .header(ACCEPT, HeaderValue::from_static("text/markdown"))
///     .query("contextLength", 100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    body: Option<RequestBody>,
    headers: HeaderMap,
    query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `body` verbatim.
    pub fn content(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Content(body.into()));
        self
    }

    /// Send `value` as JSON. `Content-Type: application/json` is added unless
    /// a content type header is also set on these options.
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Add a header, replacing any earlier value for the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Authenticated HTTP transport bound to one REST API endpoint.
#[derive(Debug)]
pub struct Transport {
    /// Parsed base URL, e.g. `https://127.0.0.1:27124/`.
    base_url: Url,
    /// Connection-pooled client, owned or supplied by the caller.
    http: reqwest::Client,
    /// `Bearer <api key>`, marked sensitive.
    auth_header: HeaderValue,
    timeout: Duration,
    /// Whether `http` was supplied by the caller.
    external: bool,
}

impl Transport {
    /// Build a transport with its own `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`ObsidianError::Config`] for an unusable host or API key and
    /// [`ObsidianError::Network`] if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("obsidian-rest-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(ObsidianError::Network)?;

        Self::build(config, http, false)
    }

    /// Build a transport around a caller-supplied client.
    ///
    /// The client is used as-is (its TLS settings win over
    /// `config.verify_ssl`); [`close`](Self::close) hands it back instead of
    /// releasing it.
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> Result<Self> {
        Self::build(config, http, true)
    }

    fn build(config: &ClientConfig, http: reqwest::Client, external: bool) -> Result<Self> {
        let base_url = config.base_url()?;

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| {
                ObsidianError::Config("API key contains characters not allowed in a header".into())
            })?;
        auth_header.set_sensitive(true);

        Ok(Self {
            base_url,
            http,
            auth_header,
            timeout: config.timeout,
            external,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the HTTP client was supplied by the caller.
    pub fn is_external(&self) -> bool {
        self.external
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build a full URL by joining `path` onto the base URL.
    ///
    /// The URL parser percent-encodes spaces and non-ASCII bytes; existing
    /// `%XX` escapes are left alone.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ObsidianError::InvalidRequest(format!("invalid path {path:?}: {e}")))
    }

    /// Send one request.
    ///
    /// Caller headers override the default `Authorization` header. Returns
    /// the response untouched for statuses below 400; any other status is
    /// returned as the matching [`ObsidianError`] variant.
    #[instrument(level = "debug", skip(self, options), fields(status = tracing::field::Empty))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        let url = self.url(path)?;
        let RequestOptions {
            body,
            headers: extra_headers,
            query,
        } = options;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        for (name, value) in &extra_headers {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self.http.request(method, url).timeout(self.timeout);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        match body {
            Some(RequestBody::Content(bytes)) => builder = builder.body(bytes),
            Some(RequestBody::Json(value)) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                builder = builder.body(serde_json::to_vec(&value)?);
            }
            None => {}
        }

        let response = builder
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        tracing::Span::current().record("status", status);

        if status >= 400 {
            let body = response.text().await.map_err(|e| self.transport_error(e))?;
            let err = error::from_status(status, &body);
            warn!(
                status,
                error_code = ?err.api_error().and_then(|e| e.error_code),
                "request failed"
            );
            return Err(err);
        }

        debug!(status, "request completed");
        Ok(response)
    }

    /// Read a successful response body as text.
    pub(crate) async fn text(&self, response: Response) -> Result<String> {
        response.text().await.map_err(|e| self.transport_error(e))
    }

    /// Read a successful response body as JSON and validate it into `T`.
    pub(crate) async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let body = self.text(response).await?;
        serde_json::from_str(&body).map_err(ObsidianError::Serialization)
    }

    /// Send a request whose success body is irrelevant.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<()> {
        self.request(method, path, options).await.map(drop)
    }

    fn transport_error(&self, err: reqwest::Error) -> ObsidianError {
        if err.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ObsidianError::Timeout(millis)
        } else {
            ObsidianError::Network(err)
        }
    }

    /// Release the transport.
    ///
    /// An owned client is dropped and its pooled connections released;
    /// `None` is returned. A caller-supplied client is returned so the caller
    /// can keep using it.
    pub fn close(self) -> Option<reqwest::Client> {
        if self.external {
            debug!(base_url = %self.base_url, "transport closed, external HTTP client left open");
            Some(self.http)
        } else {
            debug!(base_url = %self.base_url, "transport closed, HTTP client released");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Escape the characters the URL parser would not encode on its own.
///
/// File names may legitimately contain `?` and `#`, which would end the path,
/// and a bare `%`, which the parser keeps literally. A `%` that already starts
/// a `%XX` escape is left intact. Spaces and non-ASCII text are left for the
/// URL parser.
pub(crate) fn escape_path(path: &str) -> Cow<'_, str> {
    let bytes = path.as_bytes();
    let needs_escape = |i: usize| match bytes[i] {
        b'?' | b'#' => true,
        b'%' => !starts_escape(bytes, i),
        _ => false,
    };
    if !(0..bytes.len()).any(needs_escape) {
        return Cow::Borrowed(path);
    }
    let mut out = String::with_capacity(path.len() + 4);
    for (i, ch) in path.char_indices() {
        match ch {
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            '%' if !starts_escape(bytes, i) => out.push_str("%25"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Whether the `%` at `bytes[i]` is followed by two hex digits.
fn starts_escape(bytes: &[u8], i: usize) -> bool {
    bytes
        .get(i + 1..i + 3)
        .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
}

/// Header value carrying arbitrary UTF-8 text as raw bytes.
pub(crate) fn text_header(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|_| {
        ObsidianError::InvalidRequest(format!(
            "{name} header value contains control characters: {value:?}"
        ))
    })
}
