//! Generic, lightweight client that runs a [`PromptTemplate`] against a
//! single concrete [`ChatCompletionProvider`].
//!
//! The client is **generic over the backend type `B`**, so the compiler
//! guarantees the prompt's `Message` type converts into what the backend
//! expects, with no dynamic dispatch in user code.
//!
//! Any backend crate (e.g. `mealpick-openai`) implements the provider trait
//! and the same client works out of the box.
use std::sync::Arc;

use crate::{
    error::Result,
    generic::GenericChatCompletionResponse,
    provider::{ChatCompleteParameters, ChatCompletionProvider},
    template::PromptTemplate,
};

/// A client bound to a single provider.
///
/// Cloning only bumps the reference count of the shared backend.
pub struct MealpickClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for MealpickClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> MealpickClient<B>
where
    B: ChatCompletionProvider,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Send `prompt` with the model and temperature it declares and return
    /// the generated text. Errors from the backend are returned as-is.
    pub async fn complete<P>(&self, prompt: P) -> Result<String>
    where
        P: PromptTemplate,
        P::Message: Into<B::Message> + Clone,
    {
        let params = ChatCompleteParameters::from_template(prompt);
        let response = self.backend.chat_complete(params).await?;
        Ok(response.content)
    }
}

impl<B: ChatCompletionProvider> ChatCompletionProvider for MealpickClient<B> {
    type Message = B::Message;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>,
    >
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        self.backend.chat_complete(params)
    }
}
