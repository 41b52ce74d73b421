// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Client facade.
//!
//! [`ObsidianClient`] is the primary entry point. It owns the
//! [`Transport`] and hands out one long-lived facade per resource group
//! (vault, active file, periodic notes, commands, search, open, system).
//! Each facade is built on first access and reused afterwards; concurrent
//! first accesses still build it only once.

use std::sync::{Arc, OnceLock};

use reqwest::{Method, Response};
use tracing::debug;
use url::Url;

use crate::active::ActiveFileResource;
use crate::commands::CommandsResource;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::open::OpenResource;
use crate::periodic::PeriodicNotesResource;
use crate::search::SearchResource;
use crate::system::SystemResource;
use crate::transport::{RequestOptions, Transport};
use crate::vault::VaultResource;

/// Async client for the Obsidian Local REST API.
///
/// # Examples
///
/// ```rust,no_run
/// use obsidian_rest_client::{ClientConfig, ObsidianClient, Period};
///
/// # #[tokio::main]
/// # async fn main() -> obsidian_rest_client::Result<()> {
/// let client = ObsidianClient::new(ClientConfig::new("my-api-key"))?;
/// let today = client.periodic().get_markdown(Period::Daily).await?;
/// client.vault().append("inbox.md", "\n- follow up on standup").await?;
/// println!("{today}");
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ObsidianClient {
    transport: Arc<Transport>,
    vault: OnceLock<VaultResource>,
    active: OnceLock<ActiveFileResource>,
    periodic: OnceLock<PeriodicNotesResource>,
    commands: OnceLock<CommandsResource>,
    search: OnceLock<SearchResource>,
    open: OnceLock<OpenResource>,
    system: OnceLock<SystemResource>,
}

impl ObsidianClient {
    // -- Constructors -------------------------------------------------------

    /// Create a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ObsidianError::Config`](crate::ObsidianError::Config) if the
    /// host or API key cannot be used.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_transport(Transport::new(&config)?))
    }

    /// Create a client from `OBSIDIAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client that sends through a caller-supplied `reqwest` client.
    ///
    /// [`close`](Self::close) hands that client back untouched.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        Ok(Self::from_transport(Transport::with_http_client(
            &config, http,
        )?))
    }

    fn from_transport(transport: Transport) -> Self {
        Self {
            transport: Arc::new(transport),
            vault: OnceLock::new(),
            active: OnceLock::new(),
            periodic: OnceLock::new(),
            commands: OnceLock::new(),
            search: OnceLock::new(),
            open: OnceLock::new(),
            system: OnceLock::new(),
        }
    }

    // -- Resource groups ----------------------------------------------------

    /// Files in the vault.
    pub fn vault(&self) -> &VaultResource {
        self.vault
            .get_or_init(|| VaultResource::new(Arc::clone(&self.transport)))
    }

    /// The file currently open in Obsidian.
    pub fn active(&self) -> &ActiveFileResource {
        self.active
            .get_or_init(|| ActiveFileResource::new(Arc::clone(&self.transport)))
    }

    /// Daily, weekly, monthly, quarterly and yearly notes.
    pub fn periodic(&self) -> &PeriodicNotesResource {
        self.periodic
            .get_or_init(|| PeriodicNotesResource::new(Arc::clone(&self.transport)))
    }

    pub fn commands(&self) -> &CommandsResource {
        self.commands
            .get_or_init(|| CommandsResource::new(Arc::clone(&self.transport)))
    }

    pub fn search(&self) -> &SearchResource {
        self.search
            .get_or_init(|| SearchResource::new(Arc::clone(&self.transport)))
    }

    /// Opening files in the Obsidian UI.
    pub fn open(&self) -> &OpenResource {
        self.open
            .get_or_init(|| OpenResource::new(Arc::clone(&self.transport)))
    }

    pub fn system(&self) -> &SystemResource {
        self.system
            .get_or_init(|| SystemResource::new(Arc::clone(&self.transport)))
    }

    // -- Low-level access ---------------------------------------------------

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Send a raw request for endpoints without a typed wrapper.
    ///
    /// Error statuses are mapped exactly as for the typed methods.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        self.transport.request(method, path, options).await
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Shut the client down.
    ///
    /// Releases the owned HTTP client and returns `None`, or returns the
    /// caller-supplied client (still open) if one was given at construction.
    pub fn close(self) -> Option<reqwest::Client> {
        let Self {
            transport,
            vault,
            active,
            periodic,
            commands,
            search,
            open,
            system,
        } = self;
        // Facades hold the remaining transport handles.
        drop((vault, active, periodic, commands, search, open, system));

        match Arc::try_unwrap(transport) {
            Ok(transport) => transport.close(),
            Err(shared) => {
                debug!("transport still shared at close");
                shared.is_external().then(|| shared.http_client().clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::config::Scheme;

    fn client() -> ObsidianClient {
        ObsidianClient::new(ClientConfig::new("key")).unwrap()
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(client().base_url().as_str(), "https://127.0.0.1:27124/");
    }

    #[test]
    fn test_custom_base_url() {
        let config = ClientConfig::new("key")
            .host("localhost")
            .port(8080)
            .scheme(Scheme::Http);
        let client = ObsidianClient::new(config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_resource_groups_are_memoized() {
        let client = client();
        assert!(std::ptr::eq(client.vault(), client.vault()));
        assert!(std::ptr::eq(client.search(), client.search()));
        // Built groups share the one transport.
        client.active();
        client.system();
        assert_eq!(Arc::strong_count(&client.transport), 5);
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let client = client();
        let addresses: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| client.periodic() as *const PeriodicNotesResource as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(Arc::strong_count(&client.transport), 2);
    }

    #[test]
    fn test_close_owned_client() {
        let client = client();
        client.vault();
        client.commands();
        assert!(client.close().is_none());
    }

    #[test]
    fn test_close_returns_external_client() {
        let http = reqwest::Client::new();
        let client = ObsidianClient::with_http_client(ClientConfig::new("key"), http).unwrap();
        client.open();
        assert!(client.transport().is_external());
        assert!(client.close().is_some());
    }
}
