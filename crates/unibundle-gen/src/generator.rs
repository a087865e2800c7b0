use tracing::{info, warn};

use crate::client::{GenerationClient, GenerationRequest};
use crate::error::{GenError, Result};
use crate::model::Model;
use crate::prompt::{SYSTEM_INSTRUCTION, build_prompt};
use crate::response::clean_html;
use crate::retry::{RetryPolicy, retry_delay};

/// Turns a serialized project into a cleaned HTML document, retrying
/// transient failures of the underlying client.
#[derive(Debug)]
pub struct Generator<C> {
    client: C,
    model: Model,
    retry: RetryPolicy,
}

impl<C: GenerationClient> Generator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            model: Model::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn request_for(&self, serialized: &str) -> GenerationRequest {
        GenerationRequest {
            model: self.model,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(serialized),
        }
    }

    /// Raw model text for `request`, after at most `max_retries` retries.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let mut retries = 0;
        loop {
            match self.client.generate(request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && retries < self.retry.max_retries => {
                    let delay = retry_delay(retries, self.retry.base_delay);
                    warn!(
                        attempt = retries + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "generation failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Prompt, generate, clean. An empty document is an error.
    pub async fn generate_html(&self, serialized: &str) -> Result<String> {
        let request = self.request_for(serialized);
        info!(model = %self.model, prompt_bytes = request.prompt.len(), "generating single-file bundle");
        let raw = self.generate(&request).await?;
        let html = clean_html(&raw);
        if html.is_empty() {
            return Err(GenError::EmptyResponse);
        }
        Ok(html)
    }
}
