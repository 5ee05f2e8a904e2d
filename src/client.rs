use std::time::Duration;

use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::config::{ConfigSource, NamecheapConfig};
use crate::errors::NamecheapError;
use crate::http::dispatch;
use crate::request::{Method, RequestParams};
use crate::response::ApiResponse;

/// Total request timeout applied unless the builder overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// The main client for calling the Namecheap XML API.
///
/// Each call is a single HTTP request: no retries, no caching.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) config: NamecheapConfig,
    #[allow(clippy::struct_field_names)]
    pub(crate) http_client: ReqwestClient,
}

/// Builder for `Client` instances.
///
/// # Example
///
/// ```
/// use namecheap_rs::{Client, NamecheapConfig};
/// use std::time::Duration;
///
/// let client = Client::builder(NamecheapConfig::default())
///     .timeout(Duration::from_secs(60))
///     .connect_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    config: NamecheapConfig,
    timeout: Duration,
    connect_timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Sets the total request timeout, from connect to the end of the body.
    ///
    /// Defaults to 45 seconds.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    ///
    /// If not set, uses reqwest's default.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds the `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`NamecheapError::ClientBuild`] if the HTTP client cannot be
    /// constructed (for example, TLS backend initialization failure).
    pub fn build(self) -> Result<Client, NamecheapError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| NamecheapError::ClientBuild(e.to_string()))?;

        Ok(Client {
            config: self.config,
            http_client,
        })
    }
}

impl Client {
    /// Creates a new builder for `Client` instances.
    #[must_use]
    pub const fn builder(config: NamecheapConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
        }
    }

    /// Creates a client with the default 45 second timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NamecheapError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: NamecheapConfig) -> Result<Self, NamecheapError> {
        Self::builder(config).build()
    }

    /// Resolves the `namecheap.*` keys from `source` and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`NamecheapError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, NamecheapError> {
        Self::new(NamecheapConfig::from_source(source))
    }

    #[must_use]
    pub fn config(&self) -> &NamecheapConfig {
        &self.config
    }

    /// Authentication parameters plus `Command`, ready for caller-specific fields.
    ///
    /// ```
    /// # use namecheap_rs::{Client, NamecheapConfig};
    /// let client = Client::new(NamecheapConfig::default()).unwrap();
    /// let mut params = client.params("namecheap.domains.dns.setDefault");
    /// params.insert("SLD", "example");
    /// params.insert("TLD", "com");
    /// assert_eq!(params.get("Command"), Some("namecheap.domains.dns.setDefault"));
    /// ```
    #[must_use]
    pub fn params(&self, command: &str) -> RequestParams {
        self.config.request_params(command)
    }

    /// Sends `params` as a GET query string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP request fails or exceeds the timeout
    /// - The response status is above 299
    /// - The body is not XML, has no `ApiResponse` element, or reports `Status="ERROR"`
    pub async fn get_request(&self, params: &RequestParams) -> Result<ApiResponse, NamecheapError> {
        self.request(Method::Get, params).await
    }

    /// Sends `params` as a form-encoded POST body.
    ///
    /// Namecheap accepts both; POST is needed when parameters are too large
    /// for a URL (for example `setHosts` with many records).
    ///
    /// # Errors
    ///
    /// Same as [`get_request`](Self::get_request).
    pub async fn post_request(
        &self,
        params: &RequestParams,
    ) -> Result<ApiResponse, NamecheapError> {
        self.request(Method::Post, params).await
    }

    /// Sends `params` to the configured URL with `method`.
    ///
    /// # Errors
    ///
    /// Same as [`get_request`](Self::get_request).
    pub async fn request(
        &self,
        method: Method,
        params: &RequestParams,
    ) -> Result<ApiResponse, NamecheapError> {
        debug!(
            "Calling Namecheap command {:?} via {method}",
            params.get("Command")
        );
        dispatch::send(&self.http_client, &self.config.url, method, params).await
    }

    /// Builds the parameters for `command`, adds `fields`, and sends them with GET.
    ///
    /// ```no_run
    /// # use namecheap_rs::{Client, NamecheapConfig};
    /// # async fn example() -> Result<(), namecheap_rs::NamecheapError> {
    /// let client = Client::new(NamecheapConfig::from_env())?;
    /// let response = client
    ///     .execute("namecheap.domains.check", [("DomainList", "example.com")])
    ///     .await?;
    /// println!("{:?}", response.command_response());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`get_request`](Self::get_request).
    pub async fn execute<K, V>(
        &self,
        command: &str,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ApiResponse, NamecheapError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = self.params(command);
        params.extend(fields);
        self.get_request(&params).await
    }
}
