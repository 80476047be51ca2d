use mealpick_core::model::{Model, OpenAiModel};

pub const GPT4_O_MINI: &str = "gpt-4o-mini";
pub const GPT4_O: &str = "gpt-4o";

pub(crate) fn map_model(model: &Model) -> &'static str {
    match model {
        Model::OpenAi(OpenAiModel::Gpt4o) => GPT4_O,
        Model::OpenAi(OpenAiModel::Gpt4oMini) => GPT4_O_MINI,
    }
}
