use mealpick_core::error::MealpickError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Every way a chat completion round-trip can fail.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request to OpenAI failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t decode OpenAI response: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("API key is not a valid header value")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// Non-2xx reply. `message` is the `error.message` field of the body
    /// when it has one, otherwise the raw body.
    #[error("OpenAI answered {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        body: String,
    },

    #[error("unexpected OpenAI response: {0}")]
    Format(String),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiError {
    pub(crate) fn api(status: StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.trim().to_owned());
        OpenAiError::Api {
            status,
            message,
            body,
        }
    }
}

impl From<OpenAiError> for MealpickError {
    fn from(value: OpenAiError) -> Self {
        MealpickError::Backend(Box::new(value))
    }
}
