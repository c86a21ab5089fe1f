//! # openai-completion
//!
//! A small typed client for the OpenAI text completions endpoint
//! (`POST /v1/completions`). One call, one request, one typed outcome.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use openai_completion::{ClientConfig, CompletionClient, CompletionRequest, Context};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionClient::new(ClientConfig::new("sk-...", "org-..."));
//!     let ctx = Context::background().with_timeout(Duration::from_secs(30));
//!
//!     let request = CompletionRequest::new("text-davinci-003", "Say hello", 0.2, 16);
//!     let response = client.complete(&ctx, &request).await?;
//!
//!     println!("{}", response.choices[0].text);
//!     Ok(())
//! }
//! ```
//!
//! Errors reported by the server surface as [`CompletionError::Api`], carrying
//! the server's `type` tag untouched. Nothing is retried.

mod client;
mod config;
pub mod constants;
mod context;
mod error;
mod types;

pub use client::CompletionClient;
pub use config::ClientConfig;
pub use context::Context;
pub use error::{ApiError, CompletionError, Result};
pub use tokio_util::sync::CancellationToken;
pub use types::{Choice, CompletionRequest, CompletionResponse, Usage};
