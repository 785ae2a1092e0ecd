//! Client for the LIS2 text-generation service.
//!
//! The client asks the service to load a model, then submits prompts:
//!
//! ```no_run
//! use lis2_client::Lis2Client;
//!
//! # fn example() -> Result<(), lis2_client::RequestError> {
//! let client = Lis2Client::new("google/gemma-3-27b-it", None, None)?;
//! let text = client.generate("Hello, how are you?")?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;

pub use client::{GenerationParams, LoadOutcome, Lis2Client, RequestError, TextGenerator};
pub use config::{ClientConfig, ClientConfigBuilder, Credential};
