//! HTTP client for the TuneIn OPML API
//!
//! Every public method builds a [`Request`] and hands it to
//! [`TuneInClient::call`], which performs exactly one GET, classifies the
//! envelope and attaches parsed URLs to the top-level items.
//!
//! # Example
//!
//! ```no_run
//! use pmotunein::TuneInClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TuneInClient::new()?;
//!
//!     let music = client.browse_music().await?;
//!     for genre in &music.body {
//!         println!("{}", genre.text.as_deref().unwrap_or("?"));
//!     }
//!
//!     let streams = client.tune_stream_urls("s67868").await?;
//!     println!("{} streams", streams.len());
//!
//!     Ok(())
//! }
//! ```

use crate::config::{TuneInConfig, RENDER_FORMAT};
use crate::error::{Error, Result};
use crate::models::{Envelope, UrlObj};
use crate::request::{BrowseOptions, Category, Request, LOCATIONS_ROOT_ID};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// TuneIn HTTP client
///
/// The client holds no per-call state: it can be cloned and shared between
/// tasks, and concurrent calls never see each other's parameters.
#[derive(Debug, Clone)]
pub struct TuneInClient {
    pub(crate) client: Client,
    config: Arc<TuneInConfig>,
}

impl TuneInClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration
    pub fn from_config(config: TuneInConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            config: Arc::new(TuneInConfig::default()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &TuneInConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    // ========================================================================
    // Request translation
    // ========================================================================

    /// Full URL of a request, fixed parameters included
    pub fn request_url(&self, request: &Request) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request.endpoint().path()
        ))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in request.params() {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("render", RENDER_FORMAT);
            if let Some(partner_id) = self.config.partner_id.as_deref().filter(|p| !p.is_empty()) {
                pairs.append_pair("partnerId", partner_id);
            }
        }

        Ok(url)
    }

    /// Execute a request
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] if the exchange fails
    /// - [`Error::Json`] if the body is not a TuneIn envelope
    /// - [`Error::RemoteFault`] if `head.status` is missing or not 200
    pub async fn call(&self, request: Request) -> Result<Envelope> {
        let url = self.request_url(&request)?;

        debug!("Fetching TuneIn {}: {}", request.endpoint(), url);

        let body = self
            .client
            .get(url.clone())
            .timeout(self.config.timeout())
            .send()
            .await?
            .text()
            .await?;

        let mut envelope: Envelope = serde_json::from_str(&body)?;

        if !envelope.is_success() {
            warn!(
                "TuneIn {} failed (status {}): {}",
                request.endpoint(),
                envelope
                    .head
                    .status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "missing".to_string()),
                envelope.head.fault.as_deref().unwrap_or("no fault message")
            );
            return Err(Error::remote_fault(envelope));
        }

        for item in &mut envelope.body {
            if !item.enrich_url(&url) {
                warn!(
                    "Ignoring unparsable URL in TuneIn item: {}",
                    item.url.as_deref().unwrap_or_default()
                );
            }
        }

        debug!(
            "Received {} items from TuneIn {}",
            envelope.body.len(),
            request.endpoint()
        );

        Ok(envelope)
    }

    // ========================================================================
    // Search & Tune
    // ========================================================================

    /// Search stations, shows and topics
    pub async fn search(&self, query: &str) -> Result<Envelope> {
        self.call(Request::search(query)).await
    }

    /// Resolve the streams of a guide id (e.g. "s67868")
    pub async fn tune_radio(&self, id: &str) -> Result<Envelope> {
        self.call(Request::tune(id)).await
    }

    /// Parsed stream URLs of a guide id
    ///
    /// Audio items whose location cannot be parsed are skipped.
    pub async fn tune_stream_urls(&self, id: &str) -> Result<Vec<UrlObj>> {
        let envelope = self.tune_radio(id).await?;

        Ok(envelope
            .body
            .iter()
            .filter(|item| item.is_audio())
            .filter_map(|item| item.stream_url())
            .filter_map(|href| match UrlObj::parse(href) {
                Ok(obj) => Some(obj),
                Err(e) => {
                    warn!("Skipping invalid stream URL {}: {}", href, e);
                    None
                }
            })
            .collect())
    }

    // ========================================================================
    // Browse
    // ========================================================================

    /// Browse the directory
    ///
    /// With default options this returns the root categories.
    pub async fn browse(&self, options: &BrowseOptions) -> Result<Envelope> {
        self.call(Request::browse(options)).await
    }

    /// Browse a root category
    pub async fn browse_category(
        &self,
        category: Category,
        username: Option<&str>,
    ) -> Result<Envelope> {
        let mut options = BrowseOptions::new().category(category);
        options.username = username.map(str::to_string);
        self.browse(&options).await
    }

    /// Local stations, optionally for a TuneIn account
    pub async fn browse_local(&self, username: Option<&str>) -> Result<Envelope> {
        self.browse_category(Category::Local, username).await
    }

    /// Music genres
    pub async fn browse_music(&self) -> Result<Envelope> {
        self.browse_category(Category::Music, None).await
    }

    /// Talk categories
    pub async fn browse_talk(&self) -> Result<Envelope> {
        self.browse_category(Category::Talk, None).await
    }

    /// Sports categories
    pub async fn browse_sports(&self) -> Result<Envelope> {
        self.browse_category(Category::Sports, None).await
    }

    /// Geographical areas
    pub async fn browse_locations(&self) -> Result<Envelope> {
        self.browse(&BrowseOptions::new().id(LOCATIONS_ROOT_ID)).await
    }

    /// Languages
    pub async fn browse_langs(&self) -> Result<Envelope> {
        self.browse_category(Category::Lang, None).await
    }

    /// Podcast categories
    pub async fn browse_podcast(&self) -> Result<Envelope> {
        self.browse_category(Category::Podcast, None).await
    }

    /// Trending stations
    pub async fn browse_popular(&self) -> Result<Envelope> {
        self.browse_category(Category::Popular, None).await
    }

    /// Best stations
    pub async fn browse_best(&self) -> Result<Envelope> {
        self.browse_category(Category::Best, None).await
    }
}

/// Builder for configuring a TuneInClient
#[derive(Debug, Default)]
pub struct ClientBuilder {
    client: Option<Client>,
    config: TuneInConfig,
    proxy: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: TuneInConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the TuneIn partner id
    pub fn partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.config.partner_id = Some(partner_id.into());
        self
    }

    /// Set the request timeout
    ///
    /// Sub-millisecond parts round up, so only `Duration::ZERO` is rejected
    /// by `build`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.config.timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<TuneInClient> {
        self.config.validate()?;

        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.config.user_agent)
                .timeout(self.config.timeout());

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(TuneInClient {
            client,
            config: Arc::new(self.config),
        })
    }
}
