/// LIS2 service client module.
///
/// This module provides a blocking HTTP client for the LIS2 text-generation
/// service: a best-effort model load trigger and prompt generation.
mod error;
mod http;
mod types;

pub use error::RequestError;
pub use http::{Lis2Client, TextGenerator};
pub use types::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, GenerationParams, GenerationRequest,
    GenerationResult, LoadOutcome,
};
