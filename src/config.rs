//! Client configuration and credential resolution.
//!
//! A [`ClientConfig`] is resolved once through [`ClientConfigBuilder`] and is
//! read-only afterwards. Resolution is where the two implicit inputs are
//! handled:
//!
//! - the service address has its trailing slashes removed and must parse
//!   as a URL;
//! - the bearer credential comes from the builder, then from the
//!   `LIS2_API_TOKEN` environment variable, and is otherwise absent.

use std::fmt;
use std::time::Duration;

use crate::client::RequestError;

/// Address used when none is configured.
pub const DEFAULT_SERVICE_ADDRESS: &str = "http://localhost:8080/api/v1";

/// Environment variable consulted when no credential is given explicitly.
pub const API_TOKEN_ENV: &str = "LIS2_API_TOKEN";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Bearer token sent in the `Authorization` header.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Strips every trailing `/` from a service address.
///
/// ```
/// use lis2_client::config::normalize_address;
///
/// assert_eq!(normalize_address("http://x/api/"), "http://x/api");
/// assert_eq!(normalize_address("http://x/api///"), "http://x/api");
/// ```
pub fn normalize_address(address: &str) -> String {
    address.trim_end_matches('/').to_string()
}

/// Picks the credential to use: explicit value, then `LIS2_API_TOKEN`, then none.
///
/// Empty strings from either source are treated as absent.
pub fn resolve_credential(explicit: Option<String>) -> Option<Credential> {
    explicit
        .filter(|token| !token.is_empty())
        .or_else(|| std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty()))
        .map(Credential)
}

/// Resolved settings for a [`Lis2Client`](crate::Lis2Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    model_name: String,
    service_address: String,
    credential: Option<Credential>,
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Starts a builder for the given model.
    pub fn builder(model_name: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new().model_name(model_name)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Base URL of the service, without a trailing slash.
    pub fn service_address(&self) -> &str {
        &self.service_address
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Overall per-request deadline, `None` for no deadline.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Joins an endpoint path onto the service address.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.service_address, path)
    }
}

/// Builder for [`ClientConfig`].
///
/// # Examples
///
/// ```
/// use lis2_client::ClientConfig;
///
/// let config = ClientConfig::builder("google/gemma-3-27b-it")
///     .service_address("http://gpu-box:8080/api/v1/")
///     .credential("secret")
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.service_address(), "http://gpu-box:8080/api/v1");
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    model_name: Option<String>,
    service_address: Option<String>,
    credential: Option<Credential>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model the service should load and generate with.
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Sets the service base URL (e.g., "http://localhost:8080/api/v1").
    pub fn service_address(mut self, address: impl Into<String>) -> Self {
        self.service_address = Some(address.into());
        self
    }

    /// Sets the bearer token explicitly, overriding `LIS2_API_TOKEN`.
    pub fn credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Credential::new(token));
        self
    }

    /// Sets the TCP connect timeout (default 5 seconds).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets an overall deadline for each request. Unset means no deadline.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the model name is missing or blank
    /// - `InvalidUrl` if the service address does not parse
    ///
    /// # Environment Variables
    ///
    /// If `credential()` was not called, `LIS2_API_TOKEN` is read.
    pub fn build(self) -> Result<ClientConfig, RequestError> {
        let model_name = self
            .model_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| RequestError::InvalidConfig("model name cannot be empty".into()))?;

        let service_address = normalize_address(
            self.service_address
                .as_deref()
                .unwrap_or(DEFAULT_SERVICE_ADDRESS),
        );
        reqwest::Url::parse(&service_address)
            .map_err(|e| RequestError::InvalidUrl(format!("{}: {}", service_address, e)))?;

        Ok(ClientConfig {
            model_name,
            service_address,
            credential: resolve_credential(self.credential.map(|c| c.0)),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            request_timeout: self.request_timeout,
        })
    }
}
