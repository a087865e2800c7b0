//! Single-file HTML generation for serialized React projects.
//!
//! [`Generator`] assembles the prompt, drives a [`GenerationClient`] with
//! exponential backoff and strips markdown fencing from the reply.
//! [`GeminiClient`] is the production client.

pub mod client;
pub mod error;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod response;
pub mod retry;

pub use client::{DEFAULT_API_BASE_URL, GeminiClient, GenerationClient, GenerationRequest};
pub use error::{GenError, Result};
pub use generator::Generator;
pub use model::Model;
pub use prompt::{SYSTEM_INSTRUCTION, build_prompt};
pub use response::clean_html;
pub use retry::{RetryPolicy, retry_delay};
