// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>
//! Client configuration.
//!
//! Defaults match the plugin's out-of-the-box setup:
//! - HTTPS on `127.0.0.1:27124`
//! - self-signed certificate accepted (`verify_ssl = false`)
//! - 30 second request timeout

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ObsidianError, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 27124;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variables read by [`ClientConfig::from_env`].
pub const API_KEY_ENV: &str = "OBSIDIAN_API_KEY";
pub const HOST_ENV: &str = "OBSIDIAN_HOST";
pub const PORT_ENV: &str = "OBSIDIAN_PORT";
pub const SCHEME_ENV: &str = "OBSIDIAN_SCHEME";
pub const TIMEOUT_MS_ENV: &str = "OBSIDIAN_TIMEOUT_MS";
pub const VERIFY_SSL_ENV: &str = "OBSIDIAN_VERIFY_SSL";

/// URL scheme of the REST API listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// The plugin's insecure listener (disabled by default in the plugin).
    Http,
    #[default]
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ObsidianError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(ObsidianError::Config(format!("unknown scheme: {other}"))),
        }
    }
}

/// Connection settings for an [`ObsidianClient`](crate::client::ObsidianClient).
///
/// ```rust
/// use std::time::Duration;
/// use obsidian_rest_client::config::{ClientConfig, Scheme};
///
/// let config = ClientConfig::new("my-api-key")
///     .host("localhost")
///     .port(27123)
///     .scheme(Scheme::Http)
///     .timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:27123/");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token shown in the plugin's settings.
    pub api_key: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub scheme: Scheme,
    /// Applied to every request.
    #[serde(default = "default_timeout", rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,
    /// Verify the server certificate. Off by default because the plugin
    /// serves a self-signed certificate.
    #[serde(default)]
    pub verify_ssl: bool,
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl ClientConfig {
    /// Default settings with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: default_host(),
            port: DEFAULT_PORT,
            scheme: Scheme::default(),
            timeout: DEFAULT_TIMEOUT,
            verify_ssl: false,
        }
    }

    /// Read settings from `OBSIDIAN_*` environment variables.
    ///
    /// `OBSIDIAN_API_KEY` is required; the others fall back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ObsidianError::Config(format!("{API_KEY_ENV} is not set")))?;

        let mut config = Self::new(api_key.trim());

        if let Some(host) = lookup(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| ObsidianError::Config(format!("{PORT_ENV}={port}: {e}")))?;
        }
        if let Some(scheme) = lookup(SCHEME_ENV) {
            config.scheme = scheme.parse()?;
        }
        if let Some(timeout) = lookup(TIMEOUT_MS_ENV) {
            let millis: u64 = timeout
                .trim()
                .parse()
                .map_err(|e| ObsidianError::Config(format!("{TIMEOUT_MS_ENV}={timeout}: {e}")))?;
            config.timeout = Duration::from_millis(millis);
        }
        if let Some(verify) = lookup(VERIFY_SSL_ENV) {
            config.verify_ssl = parse_bool(&verify).ok_or_else(|| {
                ObsidianError::Config(format!("{VERIFY_SSL_ENV}={verify}: expected a boolean"))
            })?;
        }

        Ok(config)
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// `scheme://host:port/`, the base every request path is joined onto.
    ///
    /// # Errors
    ///
    /// Returns [`ObsidianError::Config`] if the host does not form a valid
    /// URL.
    pub fn base_url(&self) -> Result<Url> {
        let raw = format!("{}://{}:{}", self.scheme, self.host, self.port);
        let url = Url::parse(&raw)
            .map_err(|e| ObsidianError::Config(format!("invalid base URL {raw:?}: {e}")))?;
        if url.path() != "/" || url.query().is_some() {
            return Err(ObsidianError::Config(format!(
                "host must not contain a path or query: {:?}",
                self.host
            )));
        }
        Ok(url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("timeout", &self.timeout)
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Serde adapter storing a [`Duration`] as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 27124);
        assert_eq!(config.scheme, Scheme::Https);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.verify_ssl);
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://127.0.0.1:27124/"
        );
    }

    #[test]
    fn test_custom_url() {
        let config = ClientConfig::new("key")
            .host("localhost")
            .port(8080)
            .scheme(Scheme::Http);
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_host_with_path_rejected() {
        let config = ClientConfig::new("key").host("localhost/vault");
        assert!(matches!(config.base_url(), Err(ObsidianError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_from_env_requires_api_key() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ObsidianError::Config(msg) if msg.contains(API_KEY_ENV)));

        let err = ClientConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "  ")])).unwrap_err();
        assert!(matches!(err, ObsidianError::Config(_)));
    }

    #[test]
    fn test_from_env_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "abc"),
            (HOST_ENV, "obsidian.local"),
            (PORT_ENV, "27123"),
            (SCHEME_ENV, "HTTP"),
            (TIMEOUT_MS_ENV, "1500"),
            (VERIFY_SSL_ENV, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.host, "obsidian.local");
        assert_eq!(config.port, 27123);
        assert_eq!(config.scheme, Scheme::Http);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert!(config.verify_ssl);
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        for (name, value) in [
            (PORT_ENV, "not-a-port"),
            (SCHEME_ENV, "ftp"),
            (TIMEOUT_MS_ENV, "-3"),
            (VERIFY_SSL_ENV, "maybe"),
        ] {
            let result = ClientConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "k"), (name, value)]));
            assert!(
                matches!(result, Err(ObsidianError::Config(_))),
                "{name}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("k"));

        let config: ClientConfig =
            serde_json::from_str(r#"{"api_key": "k", "scheme": "http", "timeout_ms": 250}"#)
                .unwrap();
        assert_eq!(config.scheme, Scheme::Http);
        assert_eq!(config.timeout, Duration::from_millis(250));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout_ms"], 250);
    }
}
