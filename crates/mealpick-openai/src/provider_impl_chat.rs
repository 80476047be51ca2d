use std::{future::Future, pin::Pin, sync::Arc};

use mealpick_core::{
    error::Result,
    generic::GenericChatCompletionResponse,
    provider::{ChatCompleteParameters, ChatCompletionProvider},
};

use crate::{
    OpenAiAdapter,
    api_v1::{ChatCompletionMessage, ChatCompletionRequest},
    error::OpenAiError,
};

impl ChatCompletionProvider for OpenAiAdapter {
    type Message = ChatCompletionMessage;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            let request = ChatCompletionRequest::try_from(params)?;

            let response = client.chat_completion(request).await?;
            let usage = response.usage.map(Into::into);

            // Only the first choice is consumed.
            let Some(first_choice) = response.choices.into_iter().next() else {
                return Err(OpenAiError::Format("response has no choices".into()).into());
            };

            #[cfg(feature = "tracing")]
            {
                if first_choice.finish_reason != Some(crate::api_v1::FinishReason::Stop) {
                    tracing::warn!(
                        finish_reason = ?first_choice.finish_reason,
                        "completion did not stop cleanly"
                    );
                }
            }

            let content = first_choice
                .message
                .content
                .filter(|text| !text.is_empty())
                .ok_or_else(|| {
                    let detail = first_choice
                        .message
                        .refusal
                        .unwrap_or_else(|| "no text content".to_owned());
                    OpenAiError::Format(format!("first choice carries no answer: {detail}"))
                })?;

            Ok(GenericChatCompletionResponse { content, usage })
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, routing::post};
    use mealpick_core::{
        MealpickClient,
        error::MealpickError,
        generic::{GenericMessage, GenericRole},
        model::{Model, OpenAiModel},
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::OpenAiAdapterBuilder;

    async fn serve_reply(reply: Value) -> String {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let reply = reply.clone();
                async move { Json(reply) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn completion(choices: Value) -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o-mini",
            "choices": choices,
            "usage": {"prompt_tokens": 3, "completion_tokens": 4, "total_tokens": 7}
        })
    }

    fn adapter(base: String) -> OpenAiAdapter {
        OpenAiAdapterBuilder::new()
            .with_api_key("sk-test")
            .with_base_url(Some(base))
            .build()
            .unwrap()
    }

    fn params() -> ChatCompleteParameters<GenericMessage> {
        ChatCompleteParameters::new(
            vec![
                GenericMessage::new("persona", GenericRole::System),
                GenericMessage::new("question", GenericRole::User),
            ],
            Model::OpenAi(OpenAiModel::Gpt4oMini),
        )
        .with_temperature(1.0)
    }

    fn format_error(err: MealpickError) -> String {
        match err {
            MealpickError::Backend(inner) => match inner.downcast::<OpenAiError>() {
                Ok(openai) => match *openai {
                    OpenAiError::Format(detail) => detail,
                    other => panic!("unexpected openai error: {other:?}"),
                },
                Err(other) => panic!("unexpected backend error: {other}"),
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn first_choice_text_and_usage_are_returned() {
        let base = serve_reply(completion(json!([
            {"index": 0, "message": {"role": "assistant", "content": "### 1. 냉면"}, "finish_reason": "stop"},
            {"index": 1, "message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
        ])))
        .await;

        let response = adapter(base).chat_complete(params()).await.unwrap();

        assert_eq!(response.content, "### 1. 냉면");
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(7));
    }

    #[tokio::test]
    async fn empty_choices_is_a_format_error() {
        let base = serve_reply(completion(json!([]))).await;

        let err = adapter(base).chat_complete(params()).await.unwrap_err();

        assert_eq!(format_error(err), "response has no choices");
    }

    #[tokio::test]
    async fn missing_content_is_a_format_error() {
        let base = serve_reply(completion(json!([
            {"index": 0, "message": {"role": "assistant", "content": null, "refusal": "I can't help"}, "finish_reason": "stop"}
        ])))
        .await;

        let err = adapter(base).chat_complete(params()).await.unwrap_err();

        assert!(format_error(err).contains("I can't help"));
    }

    #[tokio::test]
    async fn works_behind_the_generic_client() {
        let base = serve_reply(completion(json!([
            {"index": 0, "message": {"role": "assistant", "content": "떡볶이"}, "finish_reason": "length"}
        ])))
        .await;
        let client = MealpickClient::new(adapter(base));

        let response = client.chat_complete(params()).await.unwrap();

        assert_eq!(response.content, "떡볶이");
    }
}
