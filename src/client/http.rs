/// Blocking HTTP client for the LIS2 service.
///
/// This module provides `Lis2Client`, which triggers a model load and submits
/// generation requests over `reqwest::blocking`.
use reqwest::blocking::{RequestBuilder, Response};
use serde::Serialize;

use super::error::RequestError;
use super::types::{GenerationParams, GenerationRequest, GenerationResult, LoadOutcome, LoadRequest};
use crate::config::{ClientConfig, ClientConfigBuilder};

/// Trait for text generation against a remote model.
///
/// This trait enables mocking in unit tests of code that consumes a client.
pub trait TextGenerator: Send + Sync {
    /// Generates a continuation of `prompt` with default sampling parameters.
    fn generate(&self, prompt: &str) -> Result<String, RequestError>;
}

/// Synchronous client for the LIS2 text-generation service.
///
/// The configuration is fixed at construction. Calls take `&self` and share
/// no mutable state, so one client can serve several threads.
///
/// # Examples
///
/// ```no_run
/// use lis2_client::{ClientConfig, Lis2Client};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::builder("google/gemma-3-27b-it").build()?;
/// let client = Lis2Client::initialize(config)?;
///
/// let text = client.generate("Hello, how are you?")?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Lis2Client {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl Lis2Client {
    /// Creates a client without contacting the service.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the underlying HTTP client cannot be built.
    pub fn create(config: ClientConfig) -> Result<Self, RequestError> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(RequestError::Network)?;

        Ok(Self { http, config })
    }

    /// Creates a client and asks the service to load its model.
    ///
    /// A failed load is logged as a warning and does not fail construction.
    pub fn initialize(config: ClientConfig) -> Result<Self, RequestError> {
        Self::initialize_with_observer(config, |_| {})
    }

    /// Like [`initialize`](Self::initialize), and hands the load outcome to `observer`.
    pub fn initialize_with_observer<F>(config: ClientConfig, observer: F) -> Result<Self, RequestError>
    where
        F: FnOnce(&LoadOutcome),
    {
        let client = Self::create(config)?;
        let outcome = client.ensure_loaded();
        observer(&outcome);
        Ok(client)
    }

    /// One-call construction: resolves the config, then initializes.
    ///
    /// `service_address` defaults to `http://localhost:8080/api/v1` and
    /// `credential` falls back to `LIS2_API_TOKEN`.
    pub fn new(
        model_name: impl Into<String>,
        service_address: Option<&str>,
        credential: Option<&str>,
    ) -> Result<Self, RequestError> {
        let mut builder = ClientConfigBuilder::new().model_name(model_name);
        if let Some(address) = service_address {
            builder = builder.service_address(address);
        }
        if let Some(token) = credential {
            builder = builder.credential(token);
        }
        Self::initialize(builder.build()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.config.model_name()
    }

    pub fn service_address(&self) -> &str {
        self.config.service_address()
    }

    /// Asks the service to load the configured model.
    ///
    /// Never fails: transport errors and error statuses come back as
    /// `LoadOutcome::Failed` and are logged at warn level.
    pub fn ensure_loaded(&self) -> LoadOutcome {
        let model = self.config.model_name();
        let body = LoadRequest { model };

        let outcome = match self.post("load", &body) {
            Ok(_) => LoadOutcome::Loaded,
            Err(error) => LoadOutcome::Failed {
                model: model.to_string(),
                error,
            },
        };

        if !outcome.is_loaded() {
            tracing::warn!("{}", outcome);
        }
        outcome
    }

    /// Generates text with the default parameters (4096 tokens, 0.7, 1.0).
    pub fn generate(&self, prompt: &str) -> Result<String, RequestError> {
        self.generate_with(prompt, GenerationParams::default())
    }

    /// Generates text with explicit sampling parameters.
    ///
    /// Returns the service's `response` field, or an empty string when the
    /// field is absent.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `max_tokens` is zero (no request is sent)
    /// - `Network`/`Timeout` if no response arrived
    /// - `Service` for a non-2xx status
    /// - `Decode` if the body is not a JSON object or `response` is not a string
    pub fn generate_with(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, RequestError> {
        let request = GenerationRequest::new(self.config.model_name(), prompt, params)?;
        let response = self.post("generate", &request)?;
        let body = response.text().map_err(RequestError::from_transport)?;

        GenerationResult::from_json(&body).map(GenerationResult::into_text)
    }

    /// Sends one JSON POST and maps non-2xx statuses to `Service` errors.
    fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response, RequestError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, model = self.config.model_name(), "sending request");

        let response = self
            .authorize(self.http.post(&url).json(body))
            .send()
            .map_err(RequestError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            // The body is diagnostic only; an unreadable one is reported as empty.
            let body = response.text().unwrap_or_default();
            return Err(RequestError::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.credential() {
            Some(credential) => request.bearer_auth(credential.token()),
            None => request,
        }
    }
}

impl TextGenerator for Lis2Client {
    fn generate(&self, prompt: &str) -> Result<String, RequestError> {
        self.generate_with(prompt, GenerationParams::default())
    }
}
