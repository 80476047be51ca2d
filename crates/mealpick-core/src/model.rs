//! Model identifiers used throughout the **mealpick** workspace.
//!
//! Application code never types literal strings such as `"gpt-4o-mini"`;
//! it picks an enum variant and lets the provider adapter translate it.
//!
//! # Adding more models
//!
//! 1. Add the variant to the provider sub-enum (`OpenAiModel`).
//! 2. Update the mapping function in the provider crate
//!    (`mealpick-openai::model_map::map_model`).
//!
//! ```rust
//! use mealpick_core::model::{Model, OpenAiModel};
//! assert_eq!(Model::from(OpenAiModel::Gpt4oMini),
//!            Model::OpenAi(OpenAiModel::Gpt4oMini));
//! ```

/// Universal identifier for an LLM model, grouped by provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    OpenAi(OpenAiModel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiModel {
    Gpt4o,
    Gpt4oMini,
}

impl From<OpenAiModel> for Model {
    fn from(val: OpenAiModel) -> Self {
        Model::OpenAi(val)
    }
}
