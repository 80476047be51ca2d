use std::sync::Arc;

use mealpick_core::error::{MealpickError, Result};

use crate::{client::OpenAiClient, error::OpenAiError};

/// Thin wrapper that wires the HTTP client [`OpenAiClient`] into a value that
/// implements [`mealpick_core::provider::ChatCompletionProvider`].
///
/// The type exposes **no additional methods**: all user-facing functionality
/// sits on [`mealpick_core::MealpickClient`] once the adapter is plugged in.
#[derive(Debug)]
pub struct OpenAiAdapter {
    pub(crate) client: Arc<OpenAiClient>,
}

/// Builder for [`OpenAiAdapter`].
///
/// ```rust,no_run
/// use mealpick_openai::OpenAiAdapterBuilder;
///
/// # fn main() -> mealpick_core::error::Result<()> {
/// let backend = OpenAiAdapterBuilder::new()
///     .with_api_key("sk-...")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct OpenAiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
}

impl OpenAiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the adapter at an OpenAI-compatible endpoint (proxy, gateway,
    /// local mock). `None` keeps the public API.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`MealpickError::Invalid`] – if the API key is missing or empty.
    /// * [`MealpickError::Backend`] – if the HTTP client cannot be built.
    pub fn build(self) -> Result<OpenAiAdapter> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| MealpickError::Invalid("missing OpenAI API key".into()))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(OpenAiError::from)?;
        let client = OpenAiClient::with_http(api_key, http, self.base_url);

        Ok(OpenAiAdapter {
            client: Arc::new(client),
        })
    }
}
