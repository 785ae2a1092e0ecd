/// Request and response payloads for the LIS2 service endpoints.
use std::fmt;

use serde::Serialize;
use serde::de::Error as _;
use serde_json::{Map, Value};

use super::error::RequestError;

/// Default upper bound on generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default nucleus sampling mass.
pub const DEFAULT_TOP_P: f64 = 1.0;

/// Sampling parameters for a single `generate` call.
///
/// Ranges are not checked here beyond `max_tokens > 0`; the service decides
/// what values it accepts.
///
/// # Examples
///
/// ```
/// use lis2_client::GenerationParams;
///
/// let params = GenerationParams::new().max_tokens(256).temperature(0.2);
/// assert_eq!(params.max_tokens_value(), 256);
/// assert_eq!(params.top_p_value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl GenerationParams {
    /// Creates parameters with the service defaults (4096, 0.7, 1.0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the nucleus sampling mass.
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn max_tokens_value(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature_value(&self) -> f64 {
        self.temperature
    }

    pub fn top_p_value(&self) -> f64 {
        self.top_p
    }
}

/// Body of `POST /load`.
#[derive(Debug, Serialize)]
pub(crate) struct LoadRequest<'a> {
    pub model: &'a str,
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl<'a> GenerationRequest<'a> {
    /// Assembles a request body, rejecting `max_tokens == 0`.
    pub fn new(
        model: &'a str,
        prompt: &'a str,
        params: GenerationParams,
    ) -> Result<Self, RequestError> {
        if params.max_tokens == 0 {
            return Err(RequestError::InvalidRequest(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        })
    }
}

/// Generated continuation returned by `POST /generate`.
///
/// The body must be a JSON object. Only its `response` field is read; a
/// missing or `null` field decodes to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    text: String,
}

impl GenerationResult {
    /// Decodes a `/generate` response body.
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        let object: Map<String, Value> = match serde_json::from_str(body) {
            Ok(Value::Object(object)) => object,
            Ok(other) => return Err(decode_error(format!("expected a JSON object, found {other}"))),
            Err(e) => return Err(RequestError::Decode(e)),
        };

        let text = match object.get("response") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => {
                return Err(decode_error(format!(
                    "expected string in `response`, found {other}"
                )));
            }
        };

        Ok(Self { text })
    }

    /// Returns the generated text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

fn decode_error(message: String) -> RequestError {
    RequestError::Decode(serde_json::Error::custom(message))
}

/// Outcome of a load trigger.
///
/// A failed load is advisory: the service loads the model on the first
/// `generate` call instead.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The service acknowledged the load request with a 2xx status
    Loaded,
    /// The request failed in transport or the service returned an error status
    Failed { model: String, error: RequestError },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }

    /// Returns the error behind a failed load.
    pub fn error(&self) -> Option<&RequestError> {
        match self {
            LoadOutcome::Loaded => None,
            LoadOutcome::Failed { error, .. } => Some(error),
        }
    }

    /// Human-readable warning for a failed load, `None` when loaded.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            LoadOutcome::Loaded => None,
            LoadOutcome::Failed { .. } => Some(self.to_string()),
        }
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded => write!(f, "model loaded"),
            LoadOutcome::Failed { model, error } => {
                write!(f, "Failed to pre-load model {model}: {error}")?;
                if let Some(body) = error.body() {
                    write!(f, "\nServer details: {body}")?;
                }
                Ok(())
            }
        }
    }
}
