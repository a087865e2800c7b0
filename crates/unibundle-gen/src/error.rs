use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("request to the generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", status_message(*status, body))]
    Status { status: u16, body: String },

    #[error("could not decode the service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("the model returned an empty response")]
    EmptyResponse,
}

impl GenError {
    /// Rate limiting, server faults and connection problems are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenError::Transport(e) => e.is_timeout() || e.is_connect(),
            GenError::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

fn status_message(status: u16, body: &str) -> String {
    if status == 400 {
        format!(
            "generation service returned {status}: {body} (Bad Request - likely model configuration or prompt issue)"
        )
    } else {
        format!("generation service returned {status}: {body}")
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
