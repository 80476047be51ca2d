//! The recommendation prompt: a fixed persona as the system message and a
//! fixed instruction template wrapped around a [`SerializedContext`] as the
//! user message.
//!
//! The instruction to avoid repeating earlier picks is always part of the
//! template. No previous answer is ever sent along with it; the model is
//! only asked to diversify.

use mealpick_core::{
    generic::{GenericMessage, GenericRole},
    model::{Model, OpenAiModel},
    template::{IntoPrompt, PromptTemplate},
};
use mealpick_prompt::{builder::PromptBuilder, chain::PromptChain};

use crate::{context::SerializedContext, fragments::StaticFragment};

/// Persona sent as the system message.
pub const SYSTEM_PERSONA: &str = "너는 현실적이고 세심한 한국인 식사 메뉴 추천 도우미야.";

pub const RECOMMEND_THREE: &str = "아래 상황을 보고 오늘 먹기 좋은 메뉴를 3가지 추천해 줘.";

pub const AVOID_REPEATS: &str = "가능하면 이전 추천과 최대한 겹치지 않는 다른 메뉴들을 위주로 추천해줘.";

/// Sampling temperature; the top of the range the service is used with here.
pub const TEMPERATURE: f64 = 1.0;

/// A ready-to-send recommendation request for one context.
#[derive(Debug, Clone, PartialEq)]
pub struct MealPrompt {
    context: SerializedContext,
    is_regeneration: bool,
}

impl MealPrompt {
    pub fn new(context: SerializedContext, is_regeneration: bool) -> Self {
        Self {
            context,
            is_regeneration,
        }
    }

    pub fn context(&self) -> &SerializedContext {
        &self.context
    }

    /// `true` when the request replays the stored context. Only informative:
    /// the template text is the same either way.
    pub fn is_regeneration(&self) -> bool {
        self.is_regeneration
    }

    pub fn system_text(&self) -> &'static str {
        SYSTEM_PERSONA
    }

    pub fn user_text(&self) -> String {
        PromptBuilder::new()
            .add_blank_line()
            .add_line("너는 한국 사용자를 위한 식사 메뉴 추천 도우미야.")
            .add_line(RECOMMEND_THREE)
            .add_blank_line()
            .add_line("각 메뉴에 대해:")
            .add_bullet("메뉴 이름 (한글로)")
            .add_bullet("간단한 설명")
            .add_bullet("왜 이 상황과 시간대에 잘 맞는지")
            .add_blank_line()
            .add_line("단, 사용자가 다시 추천을 요청한 경우에는")
            .add_line(AVOID_REPEATS)
            .add_blank_line()
            .add_line("상황:")
            .add_line(&self.context)
            .finalize()
    }
}

/// Build the `(system, user)` texts for `context`.
pub fn build(context: &SerializedContext, is_regeneration: bool) -> (String, String) {
    let prompt = MealPrompt::new(context.clone(), is_regeneration);
    (prompt.system_text().to_owned(), prompt.user_text())
}

impl IntoPrompt for MealPrompt {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        let user = GenericMessage::new(self.user_text(), GenericRole::User);

        PromptChain::new()
            .with(StaticFragment::from(SYSTEM_PERSONA))
            .with(user)
            .build()
    }
}

impl PromptTemplate for MealPrompt {
    const MODEL: Model = Model::OpenAi(OpenAiModel::Gpt4oMini);
    const TEMPERATURE: Option<f64> = Some(TEMPERATURE);
}
