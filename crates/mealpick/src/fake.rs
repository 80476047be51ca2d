//! In-process stand-in for the completion service.

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

use mealpick_core::{
    error::{MealpickError, Result},
    generic::{GenericChatCompletionResponse, GenericMessage},
    model::Model,
    provider::{ChatCompleteParameters, ChatCompletionProvider},
};
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub messages: Vec<GenericMessage>,
    pub model: Model,
    pub temperature: Option<f64>,
}

/// Records every request and answers with a numbered markdown reply, or
/// fails once [`FakeProvider::fail_with`] was called. A gated provider holds
/// each reply until the gate is notified.
#[derive(Clone, Default)]
pub struct FakeProvider {
    calls: Arc<Mutex<Vec<Recorded>>>,
    failure: Arc<Mutex<Option<String>>>,
    gate: Option<Arc<Notify>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_owned());
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn answer(n: usize) -> String {
        format!("### 추천 {n}\n\n1. **김밥**\n2. 라면\n3. 떡볶이\n")
    }
}

impl ChatCompletionProvider for FakeProvider {
    type Message = GenericMessage;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let calls = Arc::clone(&self.calls);
        let failure = self.failure.lock().unwrap().clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            let model = params.model();
            let temperature = params.temperature;
            let messages = params.into_messages().into_iter().map(Into::into).collect();
            let n = {
                let mut calls = calls.lock().unwrap();
                calls.push(Recorded {
                    messages,
                    model,
                    temperature,
                });
                calls.len()
            };

            if let Some(gate) = gate {
                gate.notified().await;
            }

            match failure {
                Some(message) => Err(MealpickError::Invalid(message)),
                None => Ok(GenericChatCompletionResponse {
                    content: FakeProvider::answer(n),
                    usage: None,
                }),
            }
        })
    }
}
