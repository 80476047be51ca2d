use mealpick_core::error::MealpickError;
use mealpick_core::generic::{GenericMessage, GenericRole};
use mealpick_core::provider::ChatCompleteParameters;
use serde::{Deserialize, Serialize};

use crate::impl_builder_methods;
use crate::model_map::map_model;

use super::common;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
        }
    }
}

impl_builder_methods!(ChatCompletionRequest, temperature: f64);

impl<M> TryFrom<ChatCompleteParameters<M>> for ChatCompletionRequest
where
    M: Into<ChatCompletionMessage> + Clone,
{
    type Error = MealpickError;

    fn try_from(value: ChatCompleteParameters<M>) -> Result<Self, Self::Error> {
        if value.messages.is_empty() {
            return Err(MealpickError::InvalidRequest(
                "chat completion needs at least one message".into(),
            ));
        }

        Ok(Self {
            model: map_model(&value.model).to_owned(),
            messages: value.messages.into_iter().map(Into::into).collect(),
            temperature: value.temperature,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Assistant,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionMessageForResponse {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub index: i64,
    pub message: ChatCompletionMessageForResponse,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Option<common::Usage>,
    pub system_fingerprint: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    #[serde(other)]
    Other,
}

impl From<GenericRole> for MessageRole {
    fn from(value: GenericRole) -> Self {
        match value {
            GenericRole::System => MessageRole::System,
            GenericRole::Assistant => MessageRole::Assistant,
            GenericRole::User => MessageRole::User,
        }
    }
}

impl From<GenericMessage> for ChatCompletionMessage {
    fn from(value: GenericMessage) -> Self {
        Self {
            role: value.role.into(),
            content: value.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use mealpick_core::model::{Model, OpenAiModel};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

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

    #[test]
    fn request_body_has_model_temperature_and_ordered_messages() {
        let request = ChatCompletionRequest::try_from(params()).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o-mini",
                "temperature": 1.0,
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "question"}
                ]
            })
        );
    }

    #[test]
    fn empty_message_list_is_rejected() {
        let params: ChatCompleteParameters<GenericMessage> =
            ChatCompleteParameters::new(vec![], Model::OpenAi(OpenAiModel::Gpt4o));

        let err = ChatCompletionRequest::try_from(params).unwrap_err();
        assert!(matches!(err, MealpickError::InvalidRequest(_)));
    }

    #[test]
    fn generic_roles_map_onto_wire_roles() {
        let roles: Vec<_> = [GenericRole::System, GenericRole::User, GenericRole::Assistant]
            .into_iter()
            .map(|role| serde_json::to_value(MessageRole::from(role)).unwrap())
            .collect();

        assert_eq!(roles, vec![json!("system"), json!("user"), json!("assistant")]);
    }

    #[test]
    fn response_tolerates_missing_usage_and_unknown_finish_reason() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "## 추천"},
                "finish_reason": "function_call"
            }]
        }))
        .unwrap();

        assert!(response.usage.is_none());
        assert_eq!(response.choices[0].finish_reason, Some(FinishReason::Other));
        assert_eq!(response.choices[0].message.content.as_deref(), Some("## 추천"));
    }
}
